//! Integration tests for the catalog store

use std::sync::Arc;

use catalog_store::{
    CatalogStore, FileStorage, KeyValueStorage, Link, LinkGroup, MainCategory, MemoryStorage,
    StorageKey, WorkflowFields, WorkflowType,
};
use tempfile::tempdir;

async fn raw_documents<S: KeyValueStorage>(storage: &S) -> Vec<Option<String>> {
    let mut docs = Vec::new();
    for key in StorageKey::ALL {
        docs.push(storage.read(key).await.unwrap());
    }
    docs
}

#[tokio::test]
async fn test_delete_category_cascades_through_reload() {
    let storage = Arc::new(MemoryStorage::new());
    let store = CatalogStore::open(storage.clone()).await;

    let categories = store.main_categories().await;
    for category in categories {
        store.delete_category(&category.id).await.unwrap();

        let reloaded = CatalogStore::open(storage.clone()).await;
        let snapshot = reloaded.snapshot().await;
        assert!(snapshot
            .nav
            .dev_links
            .iter()
            .all(|g| g.main_category != category.id));
    }
}

#[tokio::test]
async fn test_deleted_catalog_is_not_reseeded() {
    let storage = Arc::new(MemoryStorage::new());
    let store = CatalogStore::open(storage.clone()).await;
    store.delete_category("dev-tools").await.unwrap();
    store.delete_category("team-collab").await.unwrap();

    let reloaded = CatalogStore::open(storage).await;
    let snapshot = reloaded.snapshot().await;
    assert!(snapshot.nav.main_categories.is_empty());
    assert!(snapshot.nav.dev_links.is_empty());
}

#[tokio::test]
async fn test_toggle_favorite_twice_is_involution() {
    let store = CatalogStore::open(MemoryStorage::new()).await;
    store
        .toggle_favorite(Link::new("监控平台", "https://monitoring.example.com"))
        .await
        .unwrap();
    let original = store.favorites().await;

    let link = Link::new("日志平台", "https://logs.example.com");
    store.toggle_favorite(link.clone()).await.unwrap();
    store.toggle_favorite(link).await.unwrap();

    assert_eq!(store.favorites().await, original);
}

#[tokio::test]
async fn test_save_of_load_leaves_storage_unchanged() {
    let dir = tempdir().unwrap();
    let storage = FileStorage::new(dir.path());
    let store = CatalogStore::open(storage.clone()).await;
    store
        .create_workflow(WorkflowFields::new("发包").with_tag("release"))
        .await
        .unwrap();

    let before = raw_documents(&storage).await;
    let snapshot = store.load().await;
    store.save(snapshot).await.unwrap();
    let after = raw_documents(&storage).await;

    assert_eq!(before, after);
}

#[tokio::test]
async fn test_save_is_visible_to_other_consumers() {
    let storage = Arc::new(MemoryStorage::new());
    let writer = CatalogStore::open(storage.clone()).await;
    let reader = CatalogStore::open(storage.clone()).await;

    let mut snapshot = writer.snapshot().await;
    snapshot.nav.main_categories.push(MainCategory::new("ops", "运维"));
    snapshot.favorites.push(Link::new("CDN管理", "https://cdn.example.com"));
    writer.save(snapshot.clone()).await.unwrap();

    assert_eq!(reader.load().await, snapshot);
}

#[tokio::test]
async fn test_workflow_archive_round_trip_preserves_fields() {
    let store = CatalogStore::open(MemoryStorage::new()).await;
    let created = store
        .create_workflow(
            WorkflowFields::new("发包工作流")
                .with_description("每周发布")
                .with_type(WorkflowType::Temporary)
                .with_tag("release")
                .with_url("CI/CD平台", "https://jenkins.example.com")
                .with_url("发布计划", "https://releases.example.com"),
        )
        .await
        .unwrap();
    store.toggle_workflow_completion(created.id).await.unwrap();
    let live = store.workflow(created.id).await.unwrap();

    assert!(store.delete_workflow(created.id).await.unwrap());
    assert!(store.workflows().await.is_empty());
    let archived = store.archived_workflows().await;
    assert_eq!(archived, vec![live.clone()]);

    assert!(store.restore_workflow(created.id).await.unwrap());
    assert!(store.archived_workflows().await.is_empty());
    assert_eq!(store.workflows().await, vec![live]);
}

fn names(workflows: &[catalog_store::Workflow]) -> Vec<&str> {
    workflows.iter().map(|w| w.name.as_str()).collect()
}

#[tokio::test]
async fn test_archive_and_restore_append_in_action_order() {
    let storage = Arc::new(MemoryStorage::new());
    let store = CatalogStore::open(storage.clone()).await;

    let mut ids = Vec::new();
    for (name, workflow_type) in [
        ("A", WorkflowType::Temporary),
        ("B", WorkflowType::Permanent),
        ("C", WorkflowType::Temporary),
    ] {
        let workflow = store
            .create_workflow(WorkflowFields::new(name).with_type(workflow_type))
            .await
            .unwrap();
        ids.push(workflow.id);
    }
    let (a, b) = (ids[0], ids[1]);

    assert_eq!(
        names(&store.workflows_by_type(WorkflowType::Temporary).await),
        ["A", "C"]
    );

    assert!(store.delete_workflow(b).await.unwrap());
    assert!(store.delete_workflow(a).await.unwrap());
    assert_eq!(names(&store.archived_workflows().await), ["B", "A"]);
    assert_eq!(names(&store.workflows().await), ["C"]);

    assert!(store.restore_workflow(b).await.unwrap());
    assert_eq!(names(&store.workflows().await), ["C", "B"]);
    assert_eq!(names(&store.archived_workflows().await), ["A"]);

    assert_eq!(
        names(&store.workflows_by_type(WorkflowType::Temporary).await),
        ["C"]
    );
    assert_eq!(
        names(&store.workflows_by_type(WorkflowType::Permanent).await),
        ["B"]
    );

    let reloaded = CatalogStore::open(storage).await;
    assert_eq!(names(&reloaded.workflows().await), ["C", "B"]);
    assert_eq!(names(&reloaded.archived_workflows().await), ["A"]);
}

#[tokio::test]
async fn test_toggle_completion_ignores_permanent_workflows() {
    let store = CatalogStore::open(MemoryStorage::new()).await;
    let workflow = store
        .create_workflow(WorkflowFields::new("每日站会"))
        .await
        .unwrap();

    assert!(!store.toggle_workflow_completion(workflow.id).await.unwrap());
    assert!(!store.workflow(workflow.id).await.unwrap().completed);

    // Even a permanent workflow persisted as completed stays that way
    let mut snapshot = store.snapshot().await;
    snapshot.workflows[0].completed = true;
    store.save(snapshot).await.unwrap();

    assert!(!store.toggle_workflow_completion(workflow.id).await.unwrap());
    assert!(store.workflow(workflow.id).await.unwrap().completed);
}

#[tokio::test]
async fn test_workflow_save_drops_incomplete_links() {
    let storage = Arc::new(MemoryStorage::new());
    let store = CatalogStore::open(storage.clone()).await;

    store
        .create_workflow(WorkflowFields::new("w").with_url("", "x").with_url("y", "z"))
        .await
        .unwrap();

    let raw = storage.read(StorageKey::Workflows).await.unwrap().unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let urls = persisted[0]["urls"].as_array().unwrap();
    assert_eq!(urls.len(), 1);
    assert_eq!(urls[0]["name"], "y");
    assert_eq!(urls[0]["url"], "z");
}

#[tokio::test]
async fn test_reads_browser_shaped_documents() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .write(
            StorageKey::NavData,
            r#"{
                "mainCategories": [
                    {"id": "ops", "name": "运维", "icon": "Server", "description": "", "color": "bg-red-500"}
                ],
                "devLinks": [
                    {"category": "监控", "mainCategory": "ops", "icon": "BarChart",
                     "color": "bg-teal-100 text-teal-800",
                     "links": [{"name": "Grafana", "url": "https://grafana.example.com"}]}
                ]
            }"#,
        )
        .await
        .unwrap();
    storage
        .write(
            StorageKey::Workflows,
            r#"[{
                "id": "6f1c1f5e-8f53-4b1c-9d1e-2f3b4c5d6e7f",
                "name": "巡检",
                "description": "",
                "urls": [{"id": "0b6d7c1e-1d2a-4c3b-8e4f-5a6b7c8d9e0f", "name": "日志", "url": "https://logs.example.com"}],
                "type": "temporary",
                "tags": ["ops"],
                "completed": false,
                "createdAt": "2024-05-01T08:30:00.000Z"
            }]"#,
        )
        .await
        .unwrap();

    let store = CatalogStore::open(storage).await;
    let snapshot = store.snapshot().await;

    assert_eq!(snapshot.nav.main_categories[0].id, "ops");
    assert_eq!(
        snapshot.nav.dev_links,
        vec![LinkGroup::new("监控", "ops")
            .with_icon(catalog_store::Icon::BarChart)
            .with_color("bg-teal-100 text-teal-800")
            .with_link("Grafana", "https://grafana.example.com")]
    );
    assert_eq!(snapshot.workflows.len(), 1);
    assert_eq!(snapshot.workflows[0].workflow_type, WorkflowType::Temporary);
}

#[tokio::test]
async fn test_unknown_icons_survive_rewrite() {
    let storage = Arc::new(MemoryStorage::new());
    storage
        .write(
            StorageKey::NavData,
            r#"{
                "mainCategories": [
                    {"id": "ops", "name": "运维", "icon": "Rocket", "description": "", "color": "bg-red-500"}
                ],
                "devLinks": [
                    {"category": "监控", "mainCategory": "ops", "icon": "Radar",
                     "color": "bg-teal-100 text-teal-800",
                     "links": [{"name": "Grafana", "url": "https://grafana.example.com"}]}
                ]
            }"#,
        )
        .await
        .unwrap();

    let store = CatalogStore::open(storage.clone()).await;
    store
        .upsert_category(MainCategory::new("", "文档"))
        .await
        .unwrap();

    let raw = storage.read(StorageKey::NavData).await.unwrap().unwrap();
    let nav: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(nav["mainCategories"][0]["icon"], "Rocket");
    assert_eq!(nav["devLinks"][0]["icon"], "Radar");
    assert_eq!(nav["mainCategories"][1]["icon"], "Code");
}
