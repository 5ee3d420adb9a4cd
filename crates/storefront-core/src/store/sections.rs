// ── Section persistence ──

use std::future::{Future, ready};

use super::collection::EntityCollection;
use crate::error::StoreError;
use crate::model::{EntityId, Section, public_sections};

/// Storage contract for homepage sections.
///
/// Implementations store records as given; validation (unique names,
/// known types) happens in [`SectionAdmin`](crate::command::SectionAdmin).
pub trait SectionRepository: Send + Sync {
    /// Every stored section, in no particular order.
    fn list(&self) -> impl Future<Output = Result<Vec<Section>, StoreError>> + Send;

    fn get(&self, id: &EntityId) -> impl Future<Output = Result<Option<Section>, StoreError>> + Send;

    /// Store a new section. Fails with `Conflict` if the id is taken.
    fn insert(&self, section: Section) -> impl Future<Output = Result<Section, StoreError>> + Send;

    /// Replace an existing section. Fails with `NotFound` if it is gone.
    fn update(&self, section: Section) -> impl Future<Output = Result<Section, StoreError>> + Send;

    fn delete(&self, id: &EntityId) -> impl Future<Output = Result<Section, StoreError>> + Send;

    /// Active and published sections in display order.
    fn public_sections(&self) -> impl Future<Output = Result<Vec<Section>, StoreError>> + Send {
        async move { Ok(public_sections(self.list().await?)) }
    }
}

fn not_found(id: &EntityId) -> StoreError {
    StoreError::NotFound {
        entity_type: "section",
        identifier: id.to_string(),
    }
}

/// In-memory [`SectionRepository`].
pub struct MemorySectionStore {
    sections: EntityCollection<Section>,
}

impl Default for MemorySectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySectionStore {
    pub fn new() -> Self {
        Self {
            sections: EntityCollection::new(),
        }
    }

    pub fn from_sections(sections: impl IntoIterator<Item = Section>) -> Self {
        let store = Self::new();
        store
            .sections
            .replace_all(sections.into_iter().map(|s| (s.id.clone(), s)));
        store
    }

    /// All sections in insertion order.
    pub fn all(&self) -> Vec<Section> {
        self.sections
            .snapshot()
            .iter()
            .map(|s| Section::clone(s))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl SectionRepository for MemorySectionStore {
    fn list(&self) -> impl Future<Output = Result<Vec<Section>, StoreError>> + Send {
        ready(Ok(self.all()))
    }

    fn get(&self, id: &EntityId) -> impl Future<Output = Result<Option<Section>, StoreError>> + Send {
        ready(Ok(self.sections.get(id).map(|s| Section::clone(&s))))
    }

    fn insert(&self, section: Section) -> impl Future<Output = Result<Section, StoreError>> + Send {
        let result = if self.sections.get(&section.id).is_some() {
            Err(StoreError::Conflict {
                entity_type: "section",
                reason: format!("id {} already exists", section.id),
            })
        } else {
            self.sections.upsert(section.id.clone(), section.clone());
            Ok(section)
        };
        ready(result)
    }

    fn update(&self, section: Section) -> impl Future<Output = Result<Section, StoreError>> + Send {
        let id = section.id.clone();
        let result = self
            .sections
            .update(&id, move |_| Some(section))
            .map(|s| Section::clone(&s))
            .ok_or_else(|| not_found(&id));
        ready(result)
    }

    fn delete(&self, id: &EntityId) -> impl Future<Output = Result<Section, StoreError>> + Send {
        let result = self
            .sections
            .remove(id)
            .map(|s| Section::clone(&s))
            .ok_or_else(|| not_found(id));
        ready(result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn section(id: &str, ordering: i32, published: bool) -> Section {
        serde_json::from_value(json!({
            "id": id, "name": id, "type": "hero",
            "ordering": ordering, "isPublished": published
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn public_sections_filters_and_orders() {
        let store = MemorySectionStore::from_sections([
            section("c", 3, true),
            section("a", 1, true),
            section("draft", 0, false),
            section("b", 2, true),
        ]);
        let ids: Vec<_> = store
            .public_sections()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id.to_string())
            .collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = MemorySectionStore::new();
        store.insert(section("a", 0, true)).await.unwrap();
        let err = store.insert(section("a", 1, true)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn update_and_delete_missing_are_not_found() {
        let store = MemorySectionStore::new();
        let err = store.update(section("ghost", 0, true)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        let err = store.delete(&EntityId::from("ghost")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
