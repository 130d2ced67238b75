mod common;

use common::{create_test_dir, german, german_messages};
use messagesource::{
    Importer, InMemoryMessageStore, JsonMessageStore, MessageAcceptor, MessageProvider, Messages,
};
use std::sync::Arc;

#[tokio::test]
async fn test_store_persists_across_instances() {
    let temp_dir = create_test_dir();
    let path = temp_dir.path().join("store/messages.json");

    JsonMessageStore::new(&path)
        .set_messages("foo", german_messages())
        .await
        .expect("Should write");

    let reopened = JsonMessageStore::new(&path);
    assert_eq!(
        reopened.get_messages("foo").await.unwrap(),
        Some(german_messages())
    );
    assert_eq!(
        reopened.available_base_names().await.unwrap(),
        vec!["foo".to_string()]
    );
}

#[tokio::test]
async fn test_document_layout() {
    let temp_dir = create_test_dir();
    let path = temp_dir.path().join("messages.json");
    let store = JsonMessageStore::new(&path);

    let mut messages = german_messages();
    messages.add_message(None, "key", "fallback");
    store.set_messages("foo", messages).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(json["schemaVersion"], 1);
    assert!(json["updatedAt"].is_string());
    assert_eq!(json["bundles"]["foo"]["default"]["key"], "fallback");
    assert_eq!(json["bundles"]["foo"]["de"]["key"], "value");
}

#[tokio::test]
async fn test_set_keeps_other_base_names() {
    let temp_dir = create_test_dir();
    let store = JsonMessageStore::new(temp_dir.path().join("messages.json"));

    let mut other = Messages::new();
    other.add_message(None, "a", "1");
    store.set_messages("other", other.clone()).await.unwrap();
    store.set_messages("foo", german_messages()).await.unwrap();
    store.set_messages("foo", Messages::new()).await.unwrap();

    assert_eq!(store.get_messages("other").await.unwrap(), Some(other));
    assert_eq!(store.get_messages("foo").await.unwrap(), Some(Messages::new()));
}

#[tokio::test]
async fn test_import_into_json_store_twice() {
    let temp_dir = create_test_dir();
    let source = Arc::new(InMemoryMessageStore::with_messages("foo", german_messages()));
    let target = Arc::new(JsonMessageStore::new(temp_dir.path().join("messages.json")));
    let importer = Importer::new(source.clone(), target.clone());

    importer.import_messages("foo").await.unwrap();

    let mut changed = german_messages();
    changed.remove_message(Some(&german()), "key");
    changed.add_message(Some(&german()), "bar", "barvalue");
    source.set_messages("foo", changed.clone()).await.unwrap();

    importer.import_messages("foo").await.unwrap();

    let imported = target.get_messages("foo").await.unwrap().unwrap();
    assert_eq!(imported, changed);
    assert_eq!(imported.get_message(Some(&german()), "key"), None);
}

#[tokio::test]
async fn test_corrupt_document_is_an_error() {
    let temp_dir = create_test_dir();
    let path = temp_dir.path().join("messages.json");
    std::fs::write(&path, "not json").unwrap();

    let store = JsonMessageStore::new(&path);
    assert!(store.get_messages("foo").await.is_err());
}
