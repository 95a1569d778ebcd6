//! Tests for the LINE channel module.

use super::*;
use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

const TEXT_EVENT: &str = r#"{
    "destination": "U0bot",
    "events": [
        {
            "type": "message",
            "replyToken": "tok-1",
            "timestamp": 1700000000000,
            "source": {"type": "user", "userId": "U123"},
            "webhookEventId": "01H",
            "message": {"type": "text", "id": "m1", "text": "こんにちは"}
        }
    ]
}"#;

// ---------------------------------------------------------------------------
// Webhook decoding
// ---------------------------------------------------------------------------

#[test]
fn test_decode_text_event() {
    let events = decode_webhook(TEXT_EVENT.as_bytes()).unwrap();
    assert_eq!(events.len(), 1);
    let msg = &events[0];
    assert_eq!(msg.id, "m1");
    assert_eq!(msg.channel, "line");
    assert_eq!(msg.sender_id.as_deref(), Some("U123"));
    assert_eq!(msg.reply_target, "tok-1");
    assert_eq!(msg.content, MessageContent::Text("こんにちは".into()));
    assert_eq!(msg.timestamp.timestamp_millis(), 1_700_000_000_000);
}

#[test]
fn test_decode_keeps_order_and_skips_non_message_events() {
    let body = json!({
        "destination": "U0bot",
        "events": [
            {"type": "follow", "replyToken": "f", "timestamp": 1},
            {"type": "message", "replyToken": "a", "timestamp": 2,
             "message": {"type": "sticker", "id": "s1", "packageId": "1", "stickerId": "2"}},
            {"type": "postback", "replyToken": "p", "timestamp": 3, "postback": {"data": "x"}},
            {"type": "message", "replyToken": "b", "timestamp": 4,
             "message": {"type": "text", "id": "t1", "text": "hello"}}
        ]
    });
    let events = decode_webhook(body.to_string().as_bytes()).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].reply_target, "a");
    assert_eq!(events[0].content, MessageContent::Unsupported("sticker".into()));
    assert_eq!(events[1].reply_target, "b");
    assert_eq!(events[1].content, MessageContent::Text("hello".into()));
    assert!(events[1].sender_id.is_none());
}

#[test]
fn test_decode_ignores_unmodelled_fields() {
    let body = json!({
        "destination": "U0bot",
        "events": [{
            "type": "message",
            "mode": "active",
            "replyToken": "g",
            "timestamp": 5,
            "webhookEventId": "01HXYZ",
            "deliveryContext": {"isRedelivery": false},
            "source": {"type": "group", "groupId": "C1"},
            "message": {"type": "text", "id": "t9", "text": "hi", "quoteToken": "q"}
        }]
    });
    let events = decode_webhook(body.to_string().as_bytes()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].reply_target, "g");
    assert!(events[0].sender_id.is_none());
    assert_eq!(events[0].content, MessageContent::Text("hi".into()));
}

#[test]
fn test_decode_empty_events() {
    let events = decode_webhook(br#"{"destination":"U0bot","events":[]}"#).unwrap();
    assert!(events.is_empty());
}

#[test]
fn test_decode_malformed_json() {
    let err = decode_webhook(b"{not json").unwrap_err();
    assert!(matches!(err, HonyakuError::Payload(_)));
}

#[test]
fn test_decode_message_event_without_reply_token() {
    let body = r#"{"events":[{"type":"message","message":{"type":"text","id":"1","text":"x"}}]}"#;
    let err = decode_webhook(body.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("replyToken"));
}

#[test]
fn test_decode_text_message_without_text() {
    let body = r#"{"events":[{"type":"message","replyToken":"t","message":{"type":"text","id":"1"}}]}"#;
    assert!(matches!(
        decode_webhook(body.as_bytes()),
        Err(HonyakuError::Payload(_))
    ));
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

#[test]
fn test_signature_roundtrip() {
    let sig = signature::sign("secret", TEXT_EVENT.as_bytes()).unwrap();
    assert!(signature::verify("secret", TEXT_EVENT.as_bytes(), &sig).is_ok());
}

#[test]
fn test_signature_known_vector() {
    // HMAC-SHA256("key", "The quick brown fox jumps over the lazy dog")
    let sig = signature::sign("key", b"The quick brown fox jumps over the lazy dog").unwrap();
    assert_eq!(sig, "97yD9DBThCSxMpjmqm+xQ+9NWaFJRhdZl0edvC0aPNg=");
}

#[test]
fn test_signature_rejects_tampered_body() {
    let sig = signature::sign("secret", b"original").unwrap();
    let err = signature::verify("secret", b"tampered", &sig).unwrap_err();
    assert!(matches!(err, HonyakuError::Signature(_)));
}

#[test]
fn test_signature_rejects_wrong_secret() {
    let sig = signature::sign("other", b"body").unwrap();
    assert!(signature::verify("secret", b"body", &sig).is_err());
}

#[test]
fn test_signature_rejects_garbage() {
    let err = signature::verify("secret", b"body", "!!!not base64").unwrap_err();
    assert!(err.to_string().contains("base64"));
}

// ---------------------------------------------------------------------------
// Replies
// ---------------------------------------------------------------------------

#[test]
fn test_build_reply_single_message() {
    let req = build_reply("tok", "Hello");
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(
        json,
        json!({"replyToken": "tok", "messages": [{"type": "text", "text": "Hello"}]})
    );
}

#[test]
fn test_build_reply_caps_message_count() {
    let text = "a".repeat(MAX_TEXT_CHARS * 7);
    let req = build_reply("tok", &text);
    assert_eq!(req.messages.len(), MAX_REPLY_MESSAGES);
    for m in &req.messages {
        assert_eq!(m.text.chars().count(), MAX_TEXT_CHARS);
    }
}

type Recorded = Arc<Mutex<Vec<(Option<String>, Value)>>>;

async fn spawn_line_mock(status: StatusCode) -> (String, Recorded) {
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&recorded);
    let app = Router::new().route(
        "/v2/bot/message/reply",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let sink = Arc::clone(&sink);
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                sink.lock().unwrap().push((auth, body));
                (status, Json(json!({"message": "stub"})))
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), recorded)
}

fn channel_with_timeout(base: String, timeout_secs: u64) -> LineChannel {
    LineChannel::new(&LineConfig {
        channel_secret: "secret".into(),
        access_token: "line-token".into(),
        api_base_url: base,
        verify_signature: true,
        timeout_secs,
    })
    .unwrap()
}

fn channel(base: String) -> LineChannel {
    channel_with_timeout(base, 30)
}

#[tokio::test]
async fn test_send_posts_reply() {
    let (base, recorded) = spawn_line_mock(StatusCode::OK).await;
    let ch = channel(base);
    assert_eq!(ch.name(), "line");

    ch.send(OutgoingMessage {
        text: "Hello".into(),
        reply_target: "tok-9".into(),
    })
    .await
    .unwrap();

    let calls = recorded.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0.as_deref(), Some("Bearer line-token"));
    assert_eq!(calls[0].1["replyToken"], "tok-9");
    assert_eq!(calls[0].1["messages"][0]["text"], "Hello");
}

#[tokio::test]
async fn test_send_non_success_is_channel_error() {
    let (base, _) = spawn_line_mock(StatusCode::BAD_REQUEST).await;
    let err = channel(base).reply("expired", "Hello").await.unwrap_err();
    assert!(matches!(err, HonyakuError::Channel(_)));
    assert!(err.to_string().contains("400"));
}

#[tokio::test]
async fn test_send_times_out_on_stalled_reply_api() {
    let app = Router::new().route(
        "/v2/bot/message/reply",
        post(|| async {
            tokio::time::sleep(std::time::Duration::from_secs(3)).await;
            Json(json!({}))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let ch = channel_with_timeout(format!("http://{addr}"), 1);
    let started = std::time::Instant::now();
    let err = ch.reply("tok", "Hello").await.unwrap_err();
    assert!(matches!(err, HonyakuError::Channel(_)));
    assert!(started.elapsed() < std::time::Duration::from_secs(3));
}
