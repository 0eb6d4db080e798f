//! Integration tests for the HTTP mail relay
//!
//! A wiremock server stands in for the relay endpoint.

use gympoint_core::{HttpMailer, MailConfig, Notification, Notifier, NotifyError};
use serde_json::{json, Map, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn notification() -> Notification {
    let mut context = Map::new();
    context.insert("studentName".to_string(), Value::from("Ana Souza"));
    context.insert("planTitle".to_string(), Value::from("Gold"));

    Notification {
        to: "Ana Souza <ana@example.com>".to_string(),
        subject: "Gympoint - Gold Plan Enrollment".to_string(),
        template: "enrollment".to_string(),
        context,
    }
}

fn relay_config(server: &MockServer) -> MailConfig {
    MailConfig::new(format!("{}/send", server.uri()))
}

#[tokio::test]
async fn test_posts_message_with_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/send"))
        .and(header("authorization", "Bearer relay-key"))
        .and(body_partial_json(json!({
            "from": "Gympoint <noreply@gympoint.com>",
            "to": "Ana Souza <ana@example.com>",
            "subject": "Gympoint - Gold Plan Enrollment",
            "template": "enrollment",
            "context": { "studentName": "Ana Souza", "planTitle": "Gold" }
        })))
        .respond_with(ResponseTemplate::new(202))
        .expect(1)
        .mount(&server)
        .await;

    let mailer = HttpMailer::new(relay_config(&server).with_api_key("relay-key"));

    let result = mailer.send(notification()).await;

    assert!(result.is_ok(), "Expected delivery, got: {:?}", result);
}

#[tokio::test]
async fn test_custom_sender() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "from": "Front Desk <desk@gympoint.com>" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mailer = HttpMailer::new(relay_config(&server).with_from("Front Desk <desk@gympoint.com>"));

    assert!(mailer.send(notification()).await.is_ok());
}

#[tokio::test]
async fn test_relay_error_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("template missing"))
        .mount(&server)
        .await;

    let mailer = HttpMailer::new(relay_config(&server));

    match mailer.send(notification()).await {
        Err(NotifyError::Rejected(_)) => {}
        other => panic!("Expected Rejected, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_relay_is_transport_error() {
    // Nothing listens on the discard port
    let mailer = HttpMailer::new(MailConfig::new("http://127.0.0.1:9/send"));

    match mailer.send(notification()).await {
        Err(NotifyError::Transport(_)) => {}
        other => panic!("Expected Transport, got: {:?}", other),
    }
}
