//! HttpGateway tests against a local server
//!
//! Each test starts a small hyper server that answers every request with one
//! canned response and records what it received.

use std::convert::Infallible;
use std::sync::Arc;
use std::sync::Mutex;

use http_body_util::BodyExt;
use http_body_util::Full;
use hyper::Request;
use hyper::Response;
use hyper::StatusCode;
use hyper::body::Bytes;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use sorter_lib::error::EditorError;
use sorter_lib::error::GatewayError;
use sorter_lib::gateway::FetchRequest;
use sorter_lib::gateway::HttpGateway;
use sorter_lib::gateway::HttpGatewayConfig;
use sorter_lib::gateway::PersistRequest;
use sorter_lib::gateway::RemoteDataGateway;
use sorter_lib::model::Value;
use sorter_lib::notify::ToastQueue;
use sorter_lib::{EditorConfig, ListEditor, View};

// =============================================================================
// Fixtures
// =============================================================================

/// One request as the server saw it.
#[derive(Debug, Clone)]
struct Received {
    path: String,
    authorization: Option<String>,
    body: serde_json::Value,
}

struct StubServer {
    base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
}

impl StubServer {
    async fn start(status: StatusCode, response_body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = received.clone();

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let log = log.clone();
                let service = service_fn(move |req: Request<Incoming>| {
                    let log = log.clone();
                    async move {
                        let path = req.uri().path().to_string();
                        let authorization = req
                            .headers()
                            .get(hyper::header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string);
                        let bytes = req.into_body().collect().await.unwrap().to_bytes();
                        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
                        log.lock().unwrap().push(Received {
                            path,
                            authorization,
                            body,
                        });

                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(status)
                                .header("Content-Type", "application/json")
                                .body(Full::new(Bytes::from_static(response_body.as_bytes())))
                                .unwrap(),
                        )
                    }
                });
                tokio::spawn(async move {
                    let _ = http1::Builder::new()
                        .serve_connection(TokioIo::new(stream), service)
                        .await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}/sorter"),
            received,
        }
    }

    fn gateway(&self) -> HttpGateway {
        let config = HttpGatewayConfig::new(&self.base_url)
            .unwrap()
            .with_bearer_token("t0k");
        HttpGateway::new(config)
    }

    fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

fn fetch_request() -> FetchRequest {
    FetchRequest {
        child_type_name: "Line_Item__c".into(),
        parent_id: "q1".into(),
        parent_link_field_name: "Quote__c".into(),
        order_field_name: "Sort_Order__c".into(),
        display_fields_csv: "Name,Product__r.Name".into(),
    }
}

fn persist_request() -> PersistRequest {
    PersistRequest {
        ordered_ids: vec!["a2".into(), "a1".into()],
        order_field_name: "Sort_Order__c".into(),
        child_type_name: "Line_Item__c".into(),
    }
}

const FETCH_BODY: &str = r#"{
    "objectLabel": "Line Item",
    "fieldLabels": {"Name": "Item", "Product__r.Name": "Product"},
    "records": [
        {"attributes": {"type": "Line_Item__c"}, "Id": "a1", "Name": "Bolt", "Sort_Order__c": 1, "Product__r": {"Name": "Fasteners"}},
        {"Id": "a2", "Name": "Nut", "Sort_Order__c": 2, "Product__r": null}
    ]
}"#;

// =============================================================================
// Successful calls
// =============================================================================

#[tokio::test]
async fn test_fetch_posts_request_and_parses_result() {
    let server = StubServer::start(StatusCode::OK, FETCH_BODY).await;

    let result = server
        .gateway()
        .fetch_ordered_records(&fetch_request())
        .await
        .unwrap();

    assert_eq!(result.object_label, "Line Item");
    let keys: Vec<&str> = result.field_labels.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, vec!["Name", "Product__r.Name"]);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].resolve("Product__r.Name"), Value::from("Fasteners"));
    assert_eq!(result.records[1].resolve("Product__r.Name"), Value::empty());

    let received = server.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].path, "/sorter/records");
    assert_eq!(received[0].authorization.as_deref(), Some("Bearer t0k"));
    assert_eq!(received[0].body["childTypeName"], "Line_Item__c");
    assert_eq!(received[0].body["displayFieldsCsv"], "Name,Product__r.Name");
}

#[tokio::test]
async fn test_persist_posts_ordered_ids() {
    let server = StubServer::start(StatusCode::OK, "").await;

    server.gateway().persist_order(&persist_request()).await.unwrap();

    let received = server.received();
    assert_eq!(received[0].path, "/sorter/sort-order");
    assert_eq!(received[0].body["orderedIds"], serde_json::json!(["a2", "a1"]));
    assert_eq!(received[0].body["orderFieldName"], "Sort_Order__c");
}

// =============================================================================
// Failed calls
// =============================================================================

#[tokio::test]
async fn test_rejection_carries_status_and_payload() {
    let body = r#"[{"message": "insufficient access", "errorCode": "INSUFFICIENT_ACCESS"}]"#;
    let server = StubServer::start(StatusCode::BAD_REQUEST, body).await;

    let err = server
        .gateway()
        .persist_order(&persist_request())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.payload_message(), Some("insufficient access"));
    assert!(matches!(err, GatewayError::Remote { body: Some(_), .. }));
}

#[tokio::test]
async fn test_unstructured_rejection_falls_back_to_status() {
    let server = StubServer::start(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").await;

    let err = server
        .gateway()
        .fetch_ordered_records(&fetch_request())
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.payload_message(), None);
    assert_eq!(EditorError::from(err).user_message(), "remote call rejected (HTTP 500)");
}

#[tokio::test]
async fn test_malformed_fetch_body_is_a_parse_error() {
    let server = StubServer::start(StatusCode::OK, "not json").await;

    let err = server
        .gateway()
        .fetch_ordered_records(&fetch_request())
        .await
        .unwrap_err();

    match err {
        GatewayError::Parse { body, .. } => assert_eq!(body.as_deref(), Some("not json")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_editor_shows_remote_payload_message() {
    let server = StubServer::start(StatusCode::FORBIDDEN, r#"{"message": "field-level security"}"#).await;
    let config = EditorConfig::new()
        .with_parent_id("q1")
        .with_child_type_name("Line_Item__c")
        .with_parent_link_field_name("Quote__c")
        .with_order_field_name("Sort_Order__c")
        .with_display_fields_csv("Name");
    let editor = ListEditor::new(config, Arc::new(server.gateway()), Arc::new(ToastQueue::new()));

    assert!(editor.load().await.is_err());

    assert_eq!(editor.state().view(), View::Error("field-level security"));
}
