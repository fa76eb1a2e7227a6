use seaweed_s3_client::{
    BucketDeletion, ClientConfig, ClientError, ObjectStoreClient, create_s3_client,
};
use std::io::Read;
use std::time::Duration;

// Note: These tests require an S3 gateway (for example `weed server -s3`)
// configured via environment variables:
// - S3_ENDPOINT (default: http://localhost:8333)
// - S3_ACCESS_KEY (default: any)
// - S3_SECRET_KEY (default: any)

fn client() -> ObjectStoreClient {
    let endpoint =
        std::env::var("S3_ENDPOINT").unwrap_or_else(|_| "http://localhost:8333".to_string());
    let access_key = std::env::var("S3_ACCESS_KEY").unwrap_or_else(|_| "any".to_string());
    let secret_key = std::env::var("S3_SECRET_KEY").unwrap_or_else(|_| "any".to_string());

    println!("Connecting to S3 gateway at {}", endpoint);

    let config = ClientConfig::builder()
        .endpoint(endpoint)
        .access_key(access_key)
        .secret_key(secret_key)
        .build();
    create_s3_client(config).unwrap()
}

fn unique_bucket(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}

#[tokio::test]
#[ignore = "requires SeaweedFS S3 gateway"]
async fn test_bucket_lifecycle() {
    let client = client();
    let bucket = unique_bucket("lifecycle");

    client.create_bucket(&bucket, None).await.unwrap();
    let names: Vec<String> = client
        .list_buckets()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert!(names.contains(&bucket));
    assert!(client.bucket_exists(&bucket).await.unwrap());

    assert_eq!(
        client.delete_bucket(&bucket).await.unwrap(),
        BucketDeletion::Deleted
    );
    let names: Vec<String> = client
        .list_buckets()
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();
    assert!(!names.contains(&bucket));

    assert_eq!(
        client.delete_bucket(&bucket).await.unwrap(),
        BucketDeletion::NotFound
    );
}

#[tokio::test]
#[ignore = "requires SeaweedFS S3 gateway"]
async fn test_object_round_trip() {
    let client = client();
    let bucket = unique_bucket("objects");
    client.create_bucket(&bucket, None).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("s3_config.json");
    std::fs::write(&path, br#"{"identities":[]}"#).unwrap();

    let uri = client.upload_file(&path, &bucket, None).await.unwrap();
    assert_eq!(uri.to_string(), format!("s3://{}/s3_config.json", bucket));

    let mut buffer = client
        .download_object(&bucket, "s3_config.json")
        .await
        .unwrap();
    let mut downloaded = Vec::new();
    buffer.read_to_end(&mut downloaded).unwrap();
    assert_eq!(downloaded, br#"{"identities":[]}"#);

    let objects = client.list_objects(&bucket, None).await.unwrap();
    assert_eq!(objects.len(), 1);

    assert!(matches!(
        client.delete_bucket(&bucket).await,
        Err(ClientError::BucketNotEmpty { .. })
    ));

    client.delete_object(&bucket, "s3_config.json").await.unwrap();
    assert!(matches!(
        client.download_object(&bucket, "s3_config.json").await,
        Err(ClientError::ObjectNotFound { .. })
    ));

    client.delete_bucket(&bucket).await.unwrap();
}

#[tokio::test]
#[ignore = "requires SeaweedFS S3 gateway"]
async fn test_presigned_download_expires() {
    let client = client();
    let bucket = unique_bucket("presign");
    client.create_bucket(&bucket, None).await.unwrap();
    client
        .upload_bytes("presigned content", &bucket, "shared.txt")
        .await
        .unwrap();

    let presigned = client
        .presigned_download_url(&bucket, "shared.txt", Some(2))
        .await
        .unwrap();

    let http = reqwest::Client::new();
    let response = http.get(&presigned.url).send().await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "presigned content");

    tokio::time::sleep(Duration::from_secs(4)).await;
    let response = http.get(&presigned.url).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::FORBIDDEN);

    client.delete_object(&bucket, "shared.txt").await.unwrap();
    client.delete_bucket(&bucket).await.unwrap();
}

#[tokio::test]
#[ignore = "requires SeaweedFS S3 gateway"]
async fn test_presigned_put_and_post_uploads() {
    let client = client();
    let bucket = unique_bucket("upload");
    client.create_bucket(&bucket, None).await.unwrap();
    let http = reqwest::Client::new();

    let presigned = client
        .presigned_put_url(&bucket, "put.txt", None)
        .await
        .unwrap();
    let response = http
        .put(&presigned.url)
        .body("via put")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let post = client
        .presigned_upload_url(&bucket, "post.txt", None)
        .unwrap();
    let mut form = reqwest::multipart::Form::new();
    for (name, value) in &post.fields {
        form = form.text(name.clone(), value.clone());
    }
    form = form.part("file", reqwest::multipart::Part::bytes(b"via post".to_vec()));
    let response = http.post(&post.url).multipart(form).send().await.unwrap();
    assert!(response.status().is_success());

    let downloaded = client.download_object(&bucket, "put.txt").await.unwrap();
    assert_eq!(downloaded.get_ref().as_ref(), b"via put");
    let downloaded = client.download_object(&bucket, "post.txt").await.unwrap();
    assert_eq!(downloaded.get_ref().as_ref(), b"via post");

    for key in ["put.txt", "post.txt"] {
        client.delete_object(&bucket, key).await.unwrap();
    }
    client.delete_bucket(&bucket).await.unwrap();
}
