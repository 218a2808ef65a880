use std::sync::atomic::Ordering;

use tasklane_core::AppError;
use tasklane_domain::{ProjectId, ProjectRole, TaskId};

use crate::UploadFileInput;
use crate::test_support::{Harness, TEST_MAX_UPLOAD_BYTES, id_of, identity};

fn upload(name: &str, bytes: Vec<u8>) -> UploadFileInput {
    UploadFileInput {
        task_id: None,
        file_name: name.to_owned(),
        content_type: String::new(),
        bytes,
    }
}

#[tokio::test]
async fn upload_then_download_returns_same_bytes() {
    let harness = Harness::new();
    let alice = identity("alice");
    let project_id = ProjectId::new();
    harness
        .seed_roles(project_id, &alice, &[ProjectRole::Owner])
        .await;

    let uploaded = harness
        .files
        .upload_file(&alice, project_id, upload("notes.txt", b"hello".to_vec()))
        .await;
    let Ok(file) = uploaded else {
        panic!("upload should succeed");
    };
    assert_eq!(file.content_type, "application/octet-stream");
    assert_eq!(file.size_bytes, 5);
    assert_eq!(file.uploaded_by, id_of(&alice));

    let downloaded = harness
        .files
        .download_file(&alice, project_id, file.id)
        .await;
    assert_eq!(
        downloaded.ok().map(|(_, bytes)| bytes),
        Some(b"hello".to_vec())
    );
}

#[tokio::test]
async fn oversized_and_unsafe_uploads_are_rejected() {
    let harness = Harness::new();
    let alice = identity("alice");
    let project_id = ProjectId::new();
    harness
        .seed_roles(project_id, &alice, &[ProjectRole::Owner])
        .await;

    let oversized = harness
        .files
        .upload_file(
            &alice,
            project_id,
            upload("big.bin", vec![0; TEST_MAX_UPLOAD_BYTES + 1]),
        )
        .await;
    assert!(matches!(oversized, Err(AppError::Validation(_))));

    let traversal = harness
        .files
        .upload_file(&alice, project_id, upload("../escape", vec![1]))
        .await;
    assert!(matches!(traversal, Err(AppError::Validation(_))));

    let mut unknown_task = upload("a.txt", vec![1]);
    unknown_task.task_id = Some(TaskId::new());
    let missing = harness
        .files
        .upload_file(&alice, project_id, unknown_task)
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    assert!(harness.storage.objects.lock().await.is_empty());
}

#[tokio::test]
async fn member_reads_but_cannot_upload_or_delete() {
    let harness = Harness::new();
    let alice = identity("alice");
    let bob = identity("bob");
    let project_id = ProjectId::new();
    harness
        .seed_roles(project_id, &alice, &[ProjectRole::Owner])
        .await;
    harness
        .seed_roles(project_id, &bob, &[ProjectRole::Member])
        .await;

    let Ok(file) = harness
        .files
        .upload_file(&alice, project_id, upload("plan.md", b"# plan".to_vec()))
        .await
    else {
        panic!("upload should succeed");
    };

    let listed = harness
        .files
        .list_files(&bob, project_id)
        .await
        .unwrap_or_default();
    assert_eq!(listed.len(), 1);

    let upload_denied = harness
        .files
        .upload_file(&bob, project_id, upload("x.txt", vec![1]))
        .await;
    assert!(matches!(upload_denied, Err(AppError::Forbidden(_))));

    let delete_denied = harness.files.delete_file(&bob, project_id, file.id).await;
    assert!(matches!(delete_denied, Err(AppError::Forbidden(_))));

    let deleted = harness.files.delete_file(&alice, project_id, file.id).await;
    assert!(deleted.is_ok());
    assert!(harness.storage.objects.lock().await.is_empty());
    assert!(harness.store.files.lock().await.is_empty());
}

#[tokio::test]
async fn failed_metadata_insert_removes_stored_bytes() {
    let harness = Harness::new();
    let alice = identity("alice");
    let project_id = ProjectId::new();
    harness
        .seed_roles(project_id, &alice, &[ProjectRole::Owner])
        .await;
    harness.store.fail_file_inserts.store(true, Ordering::SeqCst);

    let uploaded = harness
        .files
        .upload_file(&alice, project_id, upload("plan.md", b"# plan".to_vec()))
        .await;
    assert!(matches!(uploaded, Err(AppError::Internal(_))));
    assert!(harness.storage.objects.lock().await.is_empty());
    assert!(harness.store.files.lock().await.is_empty());
}

#[tokio::test]
async fn failed_cleanup_still_reports_the_insert_error() {
    let harness = Harness::new();
    let alice = identity("alice");
    let project_id = ProjectId::new();
    harness
        .seed_roles(project_id, &alice, &[ProjectRole::Owner])
        .await;
    harness.store.fail_file_inserts.store(true, Ordering::SeqCst);
    harness.storage.fail_deletes.store(true, Ordering::SeqCst);

    let uploaded = harness
        .files
        .upload_file(&alice, project_id, upload("plan.md", b"# plan".to_vec()))
        .await;
    assert!(matches!(
        uploaded,
        Err(AppError::Internal(message)) if message.contains("metadata")
    ));
    assert_eq!(harness.storage.objects.lock().await.len(), 1);
}

#[tokio::test]
async fn upload_authorization_requires_update_role() {
    let harness = Harness::new();
    let bob = identity("bob");
    let carol = identity("carol");
    let mallory = identity("mallory");
    let project_id = ProjectId::new();
    harness
        .seed_roles(project_id, &bob, &[ProjectRole::Member])
        .await;
    harness
        .seed_roles(project_id, &carol, &[ProjectRole::Update])
        .await;

    let member = harness.files.authorize_upload(&bob, project_id).await;
    assert!(matches!(member, Err(AppError::Forbidden(_))));

    let outsider = harness.files.authorize_upload(&mallory, project_id).await;
    assert!(matches!(outsider, Err(AppError::Forbidden(_))));

    assert!(harness.files.authorize_upload(&carol, project_id).await.is_ok());
    assert!(harness.storage.objects.lock().await.is_empty());
}
