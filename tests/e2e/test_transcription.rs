use crate::e2e::helpers;

use helpers::providers::{encode_audio, fast_transcription_reply, mock_recording};
use helpers::{all_credentials, TestContext, AZURE_TEST_KEY};
use hyper::StatusCode;
use irish_tutor_backend::infrastructure::config::TranscriptionBackend;
use irish_tutor_backend::infrastructure::credentials::{Credential, StaticCredentials};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_context::test_context;
use wiremock::matchers::{body_bytes, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const FAST_PATH: &str = "/speechtotext/transcriptions:transcribe";
const SHORT_AUDIO_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_transcribe_with_locale_hints(ctx: &TestContext) {
    Mock::given(method("POST"))
        .and(path(FAST_PATH))
        .and(query_param("api-version", "2024-11-15"))
        .and(header("Ocp-Apim-Subscription-Key", AZURE_TEST_KEY))
        .and(body_string_contains(r#"{"locales":["ga-IE","en-IE"]}"#))
        .and(body_string_contains(r#"name="audio""#))
        .and(body_string_contains(r#"filename="audio.webm""#))
        .and(body_string_contains("fake-webm-recording"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fast_transcription_reply("Tá mé go maith", "ga-IE")),
        )
        .expect(1)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post(
            "/api/transcribe",
            &json!({"audio": encode_audio(&mock_recording())}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({"text": "Tá mé go maith", "language": "ga-IE"}))
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_data_url_audio(ctx: &TestContext) {
    Mock::given(method("POST"))
        .and(path(FAST_PATH))
        .and(body_string_contains(r#"filename="audio.ogg""#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fast_transcription_reply("Good morning", "en-IE")),
        )
        .expect(1)
        .mount(&ctx.providers)
        .await;

    let data_url = format!("data:audio/ogg;base64,{}", encode_audio(&mock_recording()));
    let response = ctx
        .client
        .post("/api/transcribe", &json!({"audio": data_url}))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({"text": "Good morning", "language": "en-IE"}))
    );
}

#[tokio::test]
async fn it_should_transcribe_raw_audio_with_short_audio_backend() {
    let ctx = TestContext::with_config(all_credentials(), |config| {
        config.transcription_backend = TranscriptionBackend::ShortAudio;
    })
    .await;

    Mock::given(method("POST"))
        .and(path(SHORT_AUDIO_PATH))
        .and(query_param("language", "ga-IE"))
        .and(query_param("format", "simple"))
        .and(header("Ocp-Apim-Subscription-Key", AZURE_TEST_KEY))
        .and(header("Content-Type", "audio/wav"))
        .and(body_bytes(mock_recording()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "RecognitionStatus": "Success",
            "DisplayText": "I would like a cup of tea with milk, thank you very much.",
            "Offset": 500000,
            "Duration": 31000000
        })))
        .expect(1)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post(
            "/api/transcribe",
            &json!({
                "audio": encode_audio(&mock_recording()),
                "mime_type": "audio/wav"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({
            "text": "I would like a cup of tea with milk, thank you very much.",
            "language": "en-IE"
        }))
    );
}

#[tokio::test]
async fn it_should_use_primary_locale_when_nothing_was_heard() {
    let ctx = TestContext::with_config(all_credentials(), |config| {
        config.transcription_backend = TranscriptionBackend::ShortAudio;
    })
    .await;

    Mock::given(method("POST"))
        .and(path(SHORT_AUDIO_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"RecognitionStatus": "NoMatch"})),
        )
        .expect(1)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post(
            "/api/transcribe",
            &json!({"audio": encode_audio(&mock_recording())}),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body,
        Some(json!({"text": "", "language": "ga-IE"}))
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forward_provider_error_as_server_error(ctx: &TestContext) {
    let provider_error = json!({
        "error": {"code": "InvalidRequest", "message": "Audio format is not supported."}
    });

    Mock::given(method("POST"))
        .and(path(FAST_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(&provider_error))
        .expect(1)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post(
            "/api/transcribe",
            &json!({"audio": encode_audio(&mock_recording())}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("Azure Speech API error (422)");
    assert_eq!(response.error_details(), Some(&provider_error));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_require_audio(ctx: &TestContext) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.providers)
        .await;

    for body in [json!({}), json!({"audio": ""}), json!({"audio": "  "})] {
        let response = ctx.client.post("/api/transcribe", &body).await.unwrap();

        response
            .assert_status(StatusCode::BAD_REQUEST)
            .assert_error_message("No audio data provided");
    }
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_audio_that_is_not_base64(ctx: &TestContext) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post("/api/transcribe", &json!({"audio": "not base64 at all!"}))
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Audio is not valid base64");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_malformed_mime_type(ctx: &TestContext) {
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post(
            "/api/transcribe",
            &json!({
                "audio": encode_audio(&mock_recording()),
                "mime_type": "not a mime type"
            }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid audio mime type");
}

#[tokio::test]
async fn it_should_fail_transcription_without_api_key() {
    let credentials = StaticCredentials::new()
        .with(Credential::AnthropicApiKey, "key")
        .with(Credential::AzureSpeechRegion, "northeurope");
    let ctx = TestContext::with_credentials(credentials).await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.providers)
        .await;

    let response = ctx
        .client
        .post(
            "/api/transcribe",
            &json!({"audio": encode_audio(&mock_recording())}),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error_message("AZURE_SPEECH_KEY is not configured");
}
