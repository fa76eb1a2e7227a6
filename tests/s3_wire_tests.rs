use std::collections::HashMap;

use seaweed_s3_client::{
    BucketDeletion, ClientConfig, ClientError, ObjectStoreClient, create_s3_client,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// A one-shot HTTP responder on localhost: each accepted connection gets the
// next canned response, and every request is recorded for inspection.

struct Canned {
    status: u16,
    headers: Vec<(&'static str, String)>,
    body: String,
}

impl Canned {
    fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    fn xml(status: u16, body: &str) -> Self {
        Self::status(status)
            .header("content-type", "application/xml")
            .body(body)
    }

    fn error(status: u16, code: &str, message: &str) -> Self {
        Self::xml(
            status,
            &format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<Error><Code>{}</Code><Message>{}</Message><RequestId>1</RequestId></Error>"#,
                code, message
            ),
        )
    }

    fn header(mut self, name: &'static str, value: &str) -> Self {
        self.headers.push((name, value.to_string()));
        self
    }

    fn body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }
}

#[derive(Debug)]
struct Received {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

async fn serve(responses: Vec<Canned>) -> (ObjectStoreClient, JoinHandle<Vec<Received>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut received = Vec::new();
        for canned in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            write_response(&mut socket, &request.method, &canned).await;
            received.push(request);
        }
        received
    });

    let config = ClientConfig::builder()
        .endpoint(format!("http://{}", addr))
        .access_key("AKIDEXAMPLE")
        .secret_key("secret")
        .build();
    (create_s3_client(config).unwrap(), handle)
}

async fn read_request(socket: &mut TcpStream) -> Received {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request head");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8(buf[..head_end].to_vec()).unwrap();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap().split(' ');
    let method = request_line.next().unwrap().to_string();
    let path = request_line.next().unwrap().to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let length: usize = headers
        .get("content-length")
        .map(|v| v.parse().unwrap())
        .unwrap_or(0);
    let mut body = buf[head_end..].to_vec();
    while body.len() < length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before request body");
        body.extend_from_slice(&chunk[..n]);
    }

    Received {
        method,
        path,
        headers,
        body,
    }
}

async fn write_response(socket: &mut TcpStream, method: &str, canned: &Canned) {
    let reason = http::StatusCode::from_u16(canned.status)
        .unwrap()
        .canonical_reason()
        .unwrap_or("");
    let mut response = format!(
        "HTTP/1.1 {} {}\r\ncontent-length: {}\r\nconnection: close\r\n",
        canned.status,
        reason,
        canned.body.len()
    );
    for (name, value) in &canned.headers {
        response.push_str(&format!("{}: {}\r\n", name, value));
    }
    response.push_str("\r\n");
    if method != "HEAD" {
        response.push_str(&canned.body);
    }

    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.unwrap();
}

#[tokio::test]
async fn list_buckets_sends_signed_request() {
    let (client, server) = serve(vec![Canned::xml(
        200,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ListAllMyBucketsResult xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
  <Owner><ID>any</ID></Owner>
  <Buckets>
    <Bucket><Name>testbucket</Name><CreationDate>2024-03-01T10:15:30Z</CreationDate></Bucket>
    <Bucket><Name>models</Name></Bucket>
  </Buckets>
</ListAllMyBucketsResult>"#,
    )])
    .await;

    let buckets = client.list_buckets().await.unwrap();
    let names: Vec<&str> = buckets.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["testbucket", "models"]);
    assert!(buckets[0].creation_date.is_some());
    assert!(buckets[1].creation_date.is_none());

    let requests = server.await.unwrap();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].path, "/");
    let authorization = &requests[0].headers["authorization"];
    assert!(
        authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"),
        "unexpected authorization {}",
        authorization
    );
    assert!(authorization.contains("/us-east-1/s3/aws4_request"));
    assert!(requests[0].headers.contains_key("x-amz-date"));
    assert!(requests[0].headers.contains_key("x-amz-content-sha256"));
}

#[tokio::test]
async fn head_without_body_reports_missing_bucket() {
    let (client, server) = serve(vec![Canned::status(404), Canned::status(200)]).await;

    assert!(!client.bucket_exists("ghost").await.unwrap());
    assert!(client.bucket_exists("testbucket").await.unwrap());

    let requests = server.await.unwrap();
    assert_eq!(requests[0].method, "HEAD");
    assert_eq!(requests[0].path, "/ghost");
    assert_eq!(requests[1].path, "/testbucket");
}

#[tokio::test]
async fn deleting_missing_bucket_reports_not_found() {
    let (client, server) = serve(vec![Canned::error(
        404,
        "NoSuchBucket",
        "The specified bucket does not exist",
    )])
    .await;

    let outcome = client.delete_bucket("ghost").await.unwrap();
    assert_eq!(outcome, BucketDeletion::NotFound);

    let requests = server.await.unwrap();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].path, "/ghost");
}

#[tokio::test]
async fn deleting_non_empty_bucket_fails() {
    let (client, _server) = serve(vec![Canned::error(
        409,
        "BucketNotEmpty",
        "The bucket you tried to delete is not empty",
    )])
    .await;

    match client.delete_bucket("testbucket").await {
        Err(ClientError::BucketNotEmpty { bucket }) => assert_eq!(bucket, "testbucket"),
        other => panic!("Expected BucketNotEmpty, got {:?}", other),
    }
}

#[tokio::test]
async fn service_error_codes_map_to_client_errors() {
    let (client, _server) = serve(vec![
        Canned::error(403, "AccessDenied", "Access Denied"),
        Canned::status(403),
        Canned::error(409, "BucketAlreadyOwnedByYou", "Already yours"),
        Canned::error(500, "InternalError", "We encountered an internal error"),
    ])
    .await;

    match client.list_buckets().await {
        Err(ClientError::AccessDenied { message }) => assert_eq!(message, "Access Denied"),
        other => panic!("Expected AccessDenied, got {:?}", other),
    }
    assert!(matches!(
        client.bucket_exists("testbucket").await,
        Err(ClientError::AccessDenied { .. })
    ));
    assert!(matches!(
        client.create_bucket("testbucket", None).await,
        Err(ClientError::BucketAlreadyExists { .. })
    ));
    match client.delete_bucket("testbucket").await {
        Err(ClientError::Service { status, code, .. }) => {
            assert_eq!(status, http::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(code, "InternalError");
        }
        other => panic!("Expected Service error, got {:?}", other),
    }
}

#[tokio::test]
async fn create_bucket_sends_location_constraint() {
    let (client, server) = serve(vec![Canned::status(200), Canned::status(200)]).await;

    client.create_bucket("testbucket", None).await.unwrap();
    client
        .create_bucket("eu-bucket", Some("eu-west-1"))
        .await
        .unwrap();

    let requests = server.await.unwrap();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].path, "/testbucket");
    assert!(requests[0].body.is_empty());

    assert_eq!(requests[1].path, "/eu-bucket");
    let body = String::from_utf8(requests[1].body.clone()).unwrap();
    assert!(body.contains("<LocationConstraint>eu-west-1</LocationConstraint>"));
}

#[tokio::test]
async fn object_keys_reach_the_wire_encoded_once() {
    let last_modified = "Tue, 14 Oct 2025 10:00:00 GMT";
    let (client, server) = serve(vec![
        Canned::status(200).header("etag", "\"5d41402abc4b2a76b9719d911017c592\""),
        Canned::status(200)
            .header("etag", "\"5d41402abc4b2a76b9719d911017c592\"")
            .header("last-modified", last_modified)
            .header("content-type", "application/octet-stream")
            .body("hello"),
        Canned::status(200).header("etag", "\"7d793037a0760186574b0282f2f435e7\""),
    ])
    .await;

    let uri = client
        .upload_bytes("hello", "testbucket", "café.txt")
        .await
        .unwrap();
    assert_eq!(uri.to_string(), "s3://testbucket/café.txt");

    let buffer = client.download_object("testbucket", "café.txt").await.unwrap();
    assert_eq!(buffer.get_ref().as_ref(), b"hello");

    client
        .upload_bytes("world", "otherbucket", "report~1.json")
        .await
        .unwrap();

    let requests = server.await.unwrap();
    let path = |i: usize| requests[i].path.split('?').next().unwrap().to_string();

    assert_eq!(requests[0].method, "PUT");
    assert_eq!(path(0), "/testbucket/caf%C3%A9.txt");
    assert_eq!(requests[0].body, b"hello");

    assert_eq!(requests[1].method, "GET");
    assert_eq!(path(1), "/testbucket/caf%C3%A9.txt");

    assert_eq!(path(2), "/otherbucket/report~1.json");
    assert_eq!(requests[2].body, b"world");
}
