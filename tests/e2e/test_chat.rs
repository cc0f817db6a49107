use crate::e2e::helpers;

use helpers::providers::anthropic_reply;
use helpers::{TestContext, ANTHROPIC_TEST_KEY, TEST_CHAT_MODEL};
use hyper::StatusCode;
use irish_tutor_backend::infrastructure::credentials::{Credential, StaticCredentials};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use wiremock::matchers::{body_bytes, body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forward_chat_body_verbatim(ctx: &TestContext) {
    // Odd spacing and key order must survive untouched
    let request_body =
        br#"{ "model":"claude-x",  "max_tokens": 300, "messages":[{"role":"user","content":"Dia duit"}] }"#;
    let provider_body = serde_json::to_vec(&anthropic_reply("Dia is Muire duit!")).unwrap();

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", ANTHROPIC_TEST_KEY))
        .and(header("anthropic-version", "2023-06-01"))
        .and(header("content-type", "application/json"))
        .and(body_bytes(request_body.to_vec()))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(provider_body.clone(), "application/json"),
        )
        .expect(1)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post_raw("/api/chat", request_body, "application/json")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("content-type", "application/json");
    assert_eq!(response.body_bytes, provider_body);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forward_provider_error_as_server_error(ctx: &TestContext) {
    let provider_error = json!({
        "type": "error",
        "error": {"type": "overloaded_error", "message": "Overloaded"}
    });

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(529).set_body_json(&provider_error))
        .expect(1)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post("/api/chat", &json!({"model": "m", "max_tokens": 10, "messages": []}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Anthropic API error (529)");
    assert_eq!(response.error_details(), Some(&provider_error));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_chat_body(ctx: &TestContext) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post_raw("/api/chat", b"", "application/json")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Request body is required");
}

#[tokio::test]
async fn it_should_fail_chat_without_api_key() {
    let credentials = StaticCredentials::new().with(Credential::ElevenLabsApiKey, "key");
    let ctx = TestContext::with_credentials(credentials).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post("/api/chat", &json!({"messages": []}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("ANTHROPIC_API_KEY is not configured");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_structured_turn(ctx: &TestContext) {
    let reply = r#"{
        "message": "Tá mé go maith, go raibh maith agat! (I'm well, thanks!) Agus tú féin?",
        "message_spoken": "Tá mé go maith, go raibh maith agat! Agus tú féin?",
        "words": [
            {"irish": "go raibh maith agat", "phonetic": "guh rev mah ah-gut", "munster_note": "Often shortened to 'go raibh maith agat' with a soft 'bh'", "english": "thank you"}
        ],
        "suggestions": ["Tá mé go maith", "Táim tuirseach"]
    }"#;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", ANTHROPIC_TEST_KEY))
        .and(body_partial_json(json!({
            "model": TEST_CHAT_MODEL,
            "max_tokens": 256,
            "messages": [{"role": "user", "content": "Conas atá tú?"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_reply(reply)))
        .expect(1)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post(
            "/api/chat/turn",
            &json!({"messages": [{"role": "user", "content": "Conas atá tú?"}]}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(
        body["message_spoken"],
        json!("Tá mé go maith, go raibh maith agat! Agus tú féin?")
    );
    assert_eq!(body["words"][0]["english"], json!("thank you"));
    assert_eq!(body["suggestions"], json!(["Tá mé go maith", "Táim tuirseach"]));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_fall_back_to_raw_reply_text(ctx: &TestContext) {
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(anthropic_reply("Maith thú! Well done.")),
        )
        .expect(1)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post(
            "/api/chat/turn",
            &json!({"messages": [{"role": "user", "content": "Tá mé go maith"}]}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({
            "message": "Maith thú! Well done.",
            "message_spoken": "Maith thú! Well done.",
            "words": [],
            "suggestions": []
        }))
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_turn_not_ending_with_user(ctx: &TestContext) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post(
            "/api/chat/turn",
            &json!({"messages": [
                {"role": "user", "content": "Dia duit"},
                {"role": "assistant", "content": "Dia is Muire duit"}
            ]}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("end with a user message");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_turn_request(ctx: &TestContext) {
    let response = ctx
        .client
        .post_raw("/api/chat/turn", b"{not json", "application/json")
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.body.as_ref().and_then(|b| b.get("message")).is_some());
}
