//! Label client behaviour against the in-memory transport.
//!
//! Each test gets a fresh `MemoryTransport`, so the service starts empty.

use std::sync::Arc;

use labels_client::{BlockingLabelClient, ClientError, LabelClient, MemoryTransport};
use labels_core::{Label, Properties};

fn new_client() -> LabelClient<MemoryTransport> {
    LabelClient::new(MemoryTransport::new())
}

fn props(pairs: &[(&str, &str)]) -> Properties {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn create_label_round_trips_through_find() {
    let client = new_client();

    let label = client
        .create_label(
            "Cool Resource",
            props(&[("color", "red"), ("source", "remote api")]),
        )
        .await
        .unwrap();
    assert!(!label.id.is_empty());
    assert_eq!(label.name, "Cool Resource");
    assert_eq!(label.properties.len(), 2);
    assert_eq!(label.properties["color"], "red");
    assert_eq!(label.properties["source"], "remote api");

    let found = client.find_label_by_id(&label.id).await.unwrap().unwrap();
    assert_eq!(found, label);
}

#[tokio::test]
async fn create_from_name_only_draft() {
    let client = new_client();

    let label = client
        .create_label_from(&Label::draft("Cool Resource"))
        .await
        .unwrap();
    assert!(!label.id.is_empty());
    assert_eq!(label.name, "Cool Resource");
    assert!(label.properties.is_empty());
}

#[tokio::test]
async fn find_unknown_id_is_absent() {
    let client = new_client();
    let found = client.find_label_by_id("020f755c3c082000").await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn find_labels_grows_by_one() {
    let client = new_client();
    let before = client.find_labels().await.unwrap().len();

    client
        .create_label("Cool Resource", Properties::new())
        .await
        .unwrap();

    let after = client.find_labels().await.unwrap();
    assert_eq!(after.len(), before + 1);
}

#[tokio::test]
async fn find_labels_on_empty_service() {
    let client = new_client();
    assert!(client.find_labels().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_is_terminal_and_idempotent() {
    let client = new_client();
    let created = client
        .create_label("Cool Resource", Properties::new())
        .await
        .unwrap();
    assert!(client.find_label_by_id(&created.id).await.unwrap().is_some());

    client.delete_label(&created).await.unwrap();
    assert!(client.find_label_by_id(&created.id).await.unwrap().is_none());

    client.delete_label(&created).await.unwrap();
    client.delete_label_by_id("020f755c3c082000").await.unwrap();
}

#[tokio::test]
async fn update_merges_properties() {
    let client = new_client();
    let mut label = client
        .create_label("Cool Resource", Properties::new())
        .await
        .unwrap();
    assert!(label.properties.is_empty());

    label.properties.insert("color".into(), "blue".into());
    label = client.update_label(&label).await.unwrap();
    assert_eq!(label.properties, props(&[("color", "blue")]));

    label.properties.insert("type".into(), "free".into());
    label = client.update_label(&label).await.unwrap();
    assert_eq!(label.properties, props(&[("color", "blue"), ("type", "free")]));

    label.properties.insert("type".into(), "paid".into());
    label.properties.insert("color".into(), String::new());
    label = client.update_label(&label).await.unwrap();
    assert_eq!(label.properties, props(&[("type", "paid")]));

    let stored = client.find_label_by_id(&label.id).await.unwrap().unwrap();
    assert_eq!(stored.properties, props(&[("type", "paid")]));
}

#[tokio::test]
async fn update_leaves_unsubmitted_keys_alone() {
    let client = new_client();
    let label = client
        .create_label("Cool Resource", props(&[("color", "blue")]))
        .await
        .unwrap();

    // A second copy that never saw "color" still cannot erase it.
    let partial = Label {
        id: label.id.clone(),
        name: label.name.clone(),
        properties: props(&[("type", "free")]),
    };
    let merged = client.update_label(&partial).await.unwrap();
    assert_eq!(merged.properties, props(&[("color", "blue"), ("type", "free")]));
}

#[tokio::test]
async fn update_renames() {
    let client = new_client();
    let mut label = client.create_label("before", Properties::new()).await.unwrap();
    label.name = "after".into();
    let renamed = client.update_label(&label).await.unwrap();
    assert_eq!(renamed.name, "after");
    assert_eq!(renamed.id, label.id);
}

#[tokio::test]
async fn update_draft_sends_nothing() {
    let client = new_client();
    let err = client.update_label(&Label::draft("x")).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidArgument(_)));
    assert_eq!(client.transport().request_count(), 0);
}

#[tokio::test]
async fn update_after_delete_is_remote_not_found() {
    let client = new_client();
    let label = client.create_label("gone", Properties::new()).await.unwrap();
    client.delete_label(&label).await.unwrap();

    let err = client.update_label(&label).await.unwrap_err();
    assert!(err.is_remote_request());
    assert_eq!(err.status(), Some(404));
    assert!(client.find_label_by_id(&label.id).await.unwrap().is_none());
}

#[tokio::test]
async fn create_blank_name_is_rejected_by_service() {
    let client = new_client();
    let err = client.create_label("", Properties::new()).await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(client.transport().request_count(), 1);
}

#[tokio::test]
async fn concurrent_creates_all_land() {
    let client = Arc::new(new_client());
    let mut handles = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .create_label(&format!("label-{i}"), Properties::new())
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    assert_eq!(client.find_labels().await.unwrap().len(), 8);
}

#[test]
fn blocking_client_crud() {
    let client = BlockingLabelClient::new(MemoryTransport::new()).unwrap();

    let mut label = client
        .create_label("Cool Resource", props(&[("color", "red")]))
        .unwrap();
    assert_eq!(client.find_labels().unwrap().len(), 1);

    label.properties.insert("color".into(), String::new());
    let updated = client.update_label(&label).unwrap();
    assert!(updated.properties.is_empty());

    client.delete_label(&updated).unwrap();
    assert!(client.find_label_by_id(&updated.id).unwrap().is_none());
    client.delete_label_by_id(&updated.id).unwrap();
    assert_eq!(client.transport().request_count(), 6);
}
