use super::*;
use wire::parse_response;

fn response(value: serde_json::Value) -> GenerateResponse {
    parse_response(&value.to_string()).unwrap()
}

/// Points at a closed local port; any request that reaches the network fails
/// with `Transport`, so `Configuration` proves no attempt was made.
fn offline_client(key: KeySource) -> GeminiClient {
    let config = GeminiConfig { base_url: "http://127.0.0.1:9".into(), ..GeminiConfig::default() };
    GeminiClient::from_config(&config).with_key_source(key)
}

// =========================================================================
// chat_reply
// =========================================================================

#[test]
fn chat_reply_returns_text() {
    let resp = response(serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "Hi there" }] },
            "finishReason": "STOP"
        }]
    }));
    assert_eq!(chat_reply(&resp).unwrap(), ChatReply { text: "Hi there".into() });
}

#[test]
fn chat_reply_without_text_fails_with_finish_reason() {
    let resp = response(serde_json::json!({
        "candidates": [{ "finishReason": "SAFETY" }]
    }));
    assert_eq!(
        chat_reply(&resp).unwrap_err(),
        StudioError::Generation { finish_reason: "SAFETY".into() }
    );
}

#[test]
fn chat_reply_empty_stop_is_empty_text() {
    let resp = response(serde_json::json!({
        "candidates": [{ "content": { "parts": [] }, "finishReason": "STOP" }]
    }));
    assert_eq!(chat_reply(&resp).unwrap().text, "");
}

#[test]
fn chat_reply_empty_without_reason_is_empty_text() {
    let resp = response(serde_json::json!({}));
    assert_eq!(chat_reply(&resp).unwrap().text, "");
}

// =========================================================================
// grounded_reply
// =========================================================================

#[test]
fn grounded_reply_normalizes_missing_titles() {
    let resp = response(serde_json::json!({
        "candidates": [{
            "content": { "parts": [{ "text": "Here is the news" }] },
            "groundingMetadata": { "groundingChunks": [
                { "web": { "title": "X", "uri": "u1" } },
                { "web": { "uri": "u2" } }
            ]}
        }]
    }));
    let reply = grounded_reply(&resp);
    assert_eq!(reply.text, "Here is the news");
    assert_eq!(
        reply.sources,
        vec![
            Source { title: "X".into(), uri: "u1".into() },
            Source { title: UNTITLED_SOURCE.into(), uri: "u2".into() },
        ]
    );
}

#[test]
fn grounded_reply_empty_title_is_untitled() {
    let resp = response(serde_json::json!({
        "candidates": [{
            "groundingMetadata": { "groundingChunks": [
                { "web": { "title": "", "uri": "https://example.test/a?b=c" } }
            ]}
        }]
    }));
    let reply = grounded_reply(&resp);
    assert_eq!(reply.sources[0].title, UNTITLED_SOURCE);
    assert_eq!(reply.sources[0].uri, "https://example.test/a?b=c");
}

#[test]
fn grounded_reply_without_chunks_has_empty_sources() {
    let resp = response(serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "no citations" }] } }]
    }));
    assert!(grounded_reply(&resp).sources.is_empty());

    let resp = response(serde_json::json!({
        "candidates": [{ "groundingMetadata": {} }]
    }));
    assert!(grounded_reply(&resp).sources.is_empty());
}

// =========================================================================
// image_data_uri
// =========================================================================

#[test]
fn image_data_uri_prefixes_png() {
    let resp = response(serde_json::json!({
        "candidates": [{ "content": { "parts": [
            { "text": "a fox" },
            { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
        ]}}]
    }));
    assert_eq!(image_data_uri(&resp).unwrap(), "data:image/png;base64,iVBORw0KGgo=");
}

#[test]
fn image_data_uri_without_payload_is_no_image() {
    let resp = response(serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": "I cannot draw that" }] } }]
    }));
    assert_eq!(image_data_uri(&resp).unwrap_err(), StudioError::NoImage);
}

// =========================================================================
// credentials
// =========================================================================

#[tokio::test]
async fn missing_key_fails_every_operation_before_network() {
    let client = offline_client(KeySource::Fixed(None));

    assert!(matches!(client.send_chat("Hello").await, Err(StudioError::Configuration { .. })));
    assert!(matches!(
        client.send_grounded_query("latest AI news").await,
        Err(StudioError::Configuration { .. })
    ));
    assert!(matches!(client.generate_image("a red fox").await, Err(StudioError::Configuration { .. })));
}

#[tokio::test]
async fn blank_key_counts_as_missing() {
    let client = offline_client(KeySource::Fixed(Some("   ".into())));
    assert!(matches!(client.send_chat("Hello").await, Err(StudioError::Configuration { .. })));
}

#[tokio::test]
async fn unset_env_var_is_named_in_error() {
    let var = "GEMINI_STUDIO_TEST_KEY_NEVER_SET";
    let client = offline_client(KeySource::Env(var.into()));
    match client.send_chat("Hello").await {
        Err(StudioError::Configuration { var: named }) => assert_eq!(named, var),
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[tokio::test]
async fn present_key_reaches_transport() {
    let client = offline_client(KeySource::Fixed(Some("secret".into())));
    let err = client.send_chat("Hello").await.unwrap_err();
    assert!(matches!(err, StudioError::Transport(_)));
}

#[test]
fn from_config_trims_base_url_and_copies_models() {
    let config = GeminiConfig { base_url: "https://x.test/v1beta/".into(), ..GeminiConfig::default() };
    let client = GeminiClient::from_config(&config);
    assert_eq!(client.base_url, "https://x.test/v1beta");
    assert_eq!(client.chat_model(), "gemini-3-flash-preview");
    assert_eq!(client.image_model(), "gemini-2.5-flash-image");
}
