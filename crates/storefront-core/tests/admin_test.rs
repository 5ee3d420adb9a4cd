#![allow(clippy::unwrap_used)]

// Admin writes flowing through to what the public homepage resolves.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

use storefront_core::{
    CommandResult, CoreError, CreateSectionRequest, EntityId, HomepageConfig, MemoryCatalog,
    MemorySectionStore, ReorderEntry, Resolver, Section, SectionAdmin, SectionCommand,
    SectionRepository, SectionType, UpdateSectionRequest, config_object,
};

fn setup() -> (
    SectionAdmin<MemorySectionStore>,
    Resolver<MemoryCatalog, MemorySectionStore>,
) {
    let store = Arc::new(MemorySectionStore::new());
    let admin = SectionAdmin::new(Arc::clone(&store));
    let resolver = Resolver::new(Arc::new(MemoryCatalog::new()), store, HomepageConfig::default());
    (admin, resolver)
}

fn obj(value: Value) -> Map<String, Value> {
    config_object(value).unwrap()
}

fn cta(name: &str, title: &str) -> CreateSectionRequest {
    CreateSectionRequest::new(name, SectionType::StoreCta).with_config(obj(json!({ "title": title })))
}

async fn public_names(resolver: &Resolver<MemoryCatalog, MemorySectionStore>) -> Vec<String> {
    resolver
        .resolve_public_sections()
        .await
        .into_iter()
        .map(|r| r.meta.name)
        .collect()
}

#[tokio::test]
async fn created_sections_show_up_in_creation_order() {
    let (admin, resolver) = setup();
    admin.create(cta("First", "One")).await.unwrap();
    admin.create(cta("Second", "Two")).await.unwrap();
    admin.create(cta("Third", "Three")).await.unwrap();

    assert_eq!(public_names(&resolver).await, ["First", "Second", "Third"]);
    let orderings: Vec<i32> = admin.list().await.unwrap().iter().map(|s| s.ordering).collect();
    assert_eq!(orderings, [0, 1, 2]);
}

#[tokio::test]
async fn duplicate_names_are_rejected() {
    let (admin, _) = setup();
    admin.create(cta("Promo", "Hi")).await.unwrap();

    let err = admin.create(cta("  Promo ", "Again")).await.unwrap_err();
    assert!(matches!(err, CoreError::DuplicateName { ref name } if name == "Promo"));
    assert_eq!(admin.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_type_and_bad_config_are_rejected() {
    let (admin, _) = setup();

    let err = admin
        .create(CreateSectionRequest::new("Mega", SectionType::from("megaMenu")))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { ref field, .. } if field == "type"));

    let err = admin
        .create(
            CreateSectionRequest::new("Deals", SectionType::ProductCarousel)
                .with_config(obj(json!({ "limit": [1, 2] }))),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { ref field, .. } if field == "config"));

    let err = config_object(json!("not an object")).unwrap_err();
    assert!(err.to_string().contains("expected a JSON object"));
}

#[tokio::test]
async fn unpublishing_hides_a_section() {
    let (admin, resolver) = setup();
    let kept = admin.create(cta("Kept", "Stay")).await.unwrap();
    let hidden = admin.create(cta("Hidden", "Go")).await.unwrap();

    admin
        .update(
            &hidden.id,
            UpdateSectionRequest {
                is_published: Some(false),
                ..UpdateSectionRequest::default()
            },
        )
        .await
        .unwrap();

    let resolved = resolver.resolve_public_sections().await;
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].meta.id, kept.id);
}

#[tokio::test]
async fn reorder_applies_good_entries_and_reports_bad_ones() {
    let (admin, resolver) = setup();
    let a = admin.create(cta("A", "a")).await.unwrap();
    let b = admin.create(cta("B", "b")).await.unwrap();
    let c = admin.create(cta("C", "c")).await.unwrap();

    let report = admin
        .reorder(vec![
            ReorderEntry { id: a.id.clone(), ordering: 30 },
            ReorderEntry { id: EntityId::from("ghost"), ordering: 0 },
            ReorderEntry { id: c.id.clone(), ordering: 10 },
            ReorderEntry { id: b.id.clone(), ordering: 20 },
        ])
        .await;

    assert!(!report.is_complete());
    assert_eq!(report.updated, [a.id, c.id, b.id]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].id.as_str(), "ghost");
    assert_eq!(public_names(&resolver).await, ["C", "B", "A"]);
}

#[tokio::test]
async fn commands_dispatch_to_admin_operations() {
    let (admin, _) = setup();

    let CommandResult::Created(created) = admin
        .execute(SectionCommand::Create(cta("Promo", "Hi")))
        .await
        .unwrap()
    else {
        panic!("expected a created section");
    };

    let CommandResult::Updated(updated) = admin
        .execute(SectionCommand::Update {
            id: created.id.clone(),
            update: UpdateSectionRequest {
                name: Some("Promo 2".into()),
                ..UpdateSectionRequest::default()
            },
        })
        .await
        .unwrap()
    else {
        panic!("expected an updated section");
    };
    assert_eq!(updated.name, "Promo 2");

    let result = admin
        .execute(SectionCommand::Delete { id: created.id.clone() })
        .await
        .unwrap();
    assert!(matches!(result, CommandResult::Deleted(ref s) if s.id == created.id));
    assert!(admin.repository().get(&created.id).await.unwrap().is_none());

    let err = admin
        .execute(SectionCommand::Delete { id: created.id })
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::SectionNotFound { .. }));
}

#[tokio::test]
async fn audit_flags_sections_written_around_validation() {
    let (admin, _) = setup();
    admin.create(cta("Promo", "Hi")).await.unwrap();

    // Written straight to the repository, bypassing the admin checks.
    let repo = admin.repository();
    let mut raw = serde_json::from_value::<Section>(json!({
        "id": "raw-1", "name": "Promo", "type": "storeCta", "config": { "title": "dup" }
    }))
    .unwrap();
    repo.insert(raw.clone()).await.unwrap();
    raw.id = EntityId::from("raw-2");
    raw.name = "Broken".into();
    raw.section_type = SectionType::ProductTabs;
    raw.config = obj(json!({ "tabs": "nope" }));
    repo.insert(raw).await.unwrap();

    let issues = admin.audit().await.unwrap();
    let flagged: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(flagged.len(), 2);
    assert!(flagged.contains(&"raw-1"));
    assert!(flagged.contains(&"raw-2"));
}
