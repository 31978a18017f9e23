//! Tests for the backend REST collaborator, against a mock HTTP server.

use stock_notify::api::BackendClient;
use stock_notify::jobs::reminder::PendingEventSource;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_events_for_user_parses_backend_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("userId", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "id": 1,
                "title": "Team sync",
                "date": "2099-03-01",
                "time": "10:00",
                "completed": false,
                "userId": 5
            },
            {
                "id": 2,
                "title": "Stock count",
                "date": "2099-03-02",
                "time": "09:30",
                "completed": true,
                "userId": 5
            }
        ])))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).unwrap();
    let events = client.events_for_user(5).await.unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].title, "Team sync");
    assert_eq!(events[0].user_id, 5);
    assert!(!events[0].completed);
    assert!(events[1].completed);
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/events"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri()).unwrap();
    assert!(client.events_for_user(5).await.is_err());
}

#[tokio::test]
async fn test_unreachable_backend_is_an_error() {
    // nothing listens on this port
    let client = BackendClient::new("http://127.0.0.1:1").unwrap();
    assert!(client.events_for_user(5).await.is_err());
}
