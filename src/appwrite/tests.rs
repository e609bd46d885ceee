// Integration tests for the content store client
use super::*;
use mockito::Matcher;
use serde_json::json;

#[tokio::test]
async fn test_list_documents() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/databases/db/collections/projects/documents")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "total": 2,
                "documents": [
                    {
                        "$id": "p1",
                        "Title": "Demo",
                        "Description": "A demo project",
                        "Link": "https://demo.example",
                        "Img": "img1",
                        "TechStack": ["Rust", "SQLite"]
                    },
                    {
                        "$id": "p2",
                        "Title": "Sparse"
                    }
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = AppwriteClient::new(server.url(), "folio-test").unwrap();
    let documents = client.list_documents("db", "projects").await.unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].id, "p1");
    assert_eq!(documents[0].title.as_deref(), Some("Demo"));
    assert_eq!(documents[0].img.as_deref(), Some("img1"));
    assert_eq!(
        documents[0].tech_stack.as_deref(),
        Some(&["Rust".to_string(), "SQLite".to_string()][..])
    );
    // Missing fields default rather than failing the whole listing
    assert_eq!(documents[1].id, "p2");
    assert!(documents[1].img.is_none());
    assert!(documents[1].tech_stack.is_none());
}

#[tokio::test]
async fn test_list_documents_unauthorized() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/databases/db/collections/projects/documents")
        .with_status(401)
        .with_body(r#"{"message": "Unauthorized"}"#)
        .create_async()
        .await;

    let client = AppwriteClient::new(server.url(), "folio-test").unwrap();
    let result = client.list_documents("db", "projects").await;

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("unauthorized"));
}

#[tokio::test]
async fn test_create_document() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("POST", "/databases/db/collections/comments/documents")
        .match_body(Matcher::PartialJson(json!({
            "documentId": "unique()",
            "data": { "name": "Ada" }
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"$id": "cm1"}"#)
        .create_async()
        .await;

    let client = AppwriteClient::new(server.url(), "folio-test").unwrap();
    let document = client
        .create_document("db", "comments", json!({"name": "Ada", "message": "Nice work"}))
        .await
        .unwrap();

    assert_eq!(document.id, "cm1");
}

#[test]
fn test_file_view_url() {
    let client = AppwriteClient::new("https://backend.example/v1/", "folio-test").unwrap();

    assert_eq!(
        client.file_view_url("media", "img1"),
        "https://backend.example/v1/storage/buckets/media/files/img1/view?project=folio-test"
    );
}
