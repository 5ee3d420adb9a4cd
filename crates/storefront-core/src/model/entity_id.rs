// ── Core identity type ──
//
// Sections and every collaborator record they reference are keyed by an
// opaque `EntityId`. Persisted ids are usually 24-char hex ObjectIds;
// ids minted locally are UUID-derived. Consumers never care which.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier for a section, slider, category, product, banner,
/// brand, media asset or user.
///
/// Surrounding whitespace is trimmed on construction. An empty id is
/// representable (admin forms send `""` for "nothing selected") and is
/// treated as absent by every lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_owned())
    }

    /// Mint a fresh id for a newly created record.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether this looks like a 24-char hex document id.
    pub fn is_object_id(&self) -> bool {
        self.0.len() == 24 && self.0.bytes().all(|b| b.is_ascii_hexdigit())
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        if s.trim().len() == s.len() {
            Self(s)
        } else {
            Self::new(s)
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Drop empty ids and duplicates, keeping first-seen order.
pub fn normalize_ids(ids: &[EntityId]) -> Vec<EntityId> {
    let mut out: Vec<EntityId> = Vec::with_capacity(ids.len());
    for id in ids {
        if !id.is_empty() && !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_trims_whitespace() {
        let id = EntityId::from("  507f1f77bcf86cd799439011 ");
        assert_eq!(id.as_str(), "507f1f77bcf86cd799439011");
        assert!(id.is_object_id());
    }

    #[test]
    fn generated_ids_are_unique_and_not_object_ids() {
        let a = EntityId::generate();
        let b = EntityId::generate();
        assert_ne!(a, b);
        assert!(!a.is_object_id());
    }

    #[test]
    fn entity_id_deserializes_from_plain_string() {
        let id: EntityId = serde_json::from_str("\" abc \"").unwrap();
        assert_eq!(id.to_string(), "abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn normalize_drops_empty_and_duplicate_ids() {
        let ids = vec![
            EntityId::from("b"),
            EntityId::from(""),
            EntityId::from("a"),
            EntityId::from("b"),
        ];
        assert_eq!(
            normalize_ids(&ids),
            vec![EntityId::from("b"), EntityId::from("a")]
        );
    }
}
