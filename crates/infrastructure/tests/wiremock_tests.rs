//! Integration tests for the infrastructure adapters
//!
//! Tests cover:
//! - Tutor replies through the OpenRouter adapter
//! - Speech synthesis into the local scratch store
//! - Transcription cleanup of uploaded audio

use std::sync::Arc;

use ai_speech::{GoogleTtsConfig, SpeechConfig};
use application::{SpeechService, TutorService};
use domain::{AudioFormat, TRANSLATION_INSTRUCTION, TRANSLATION_PLACEHOLDER, Translation};
use infrastructure::{LocalAudioStore, OpenRouterInferenceAdapter, SpeechAdapter};
use secrecy::SecretString;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "model": "deepseek/deepseek-chat-v3.1:free",
        "choices": [{"message": {"role": "assistant", "content": content}, "finish_reason": "stop"}]
    }))
}

fn tutor(server: &MockServer) -> TutorService {
    let config = ai_core::InferenceConfig {
        base_url: server.uri(),
        api_key: Some(SecretString::from("sk-or-test".to_string())),
        ..Default::default()
    };
    let adapter = OpenRouterInferenceAdapter::new(config).unwrap();
    TutorService::new(Arc::new(adapter))
}

async fn mount_translation(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [{"role": "system", "content": TRANSLATION_INSTRUCTION}]
        })))
        .respond_with(response)
        .with_priority(1)
        .mount(server)
        .await;
}

// ============================================================================
// Tutor Tests
// ============================================================================

mod tutor_tests {
    use super::*;

    #[tokio::test]
    async fn reply_is_truncated_then_translated() {
        let server = MockServer::start().await;
        mount_translation(&server, completion("  مرحبا، كيف حالك \n")).await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(completion("Hola, ¿cómo estás hoy mi buen amigo?"))
            .with_priority(5)
            .mount(&server)
            .await;

        let reply = tutor(&server)
            .respond("Hola", Some("A1"), Some(5))
            .await
            .unwrap();

        assert_eq!(reply.reply, "Hola, ¿cómo estás hoy mi...");
        assert!(reply.truncated);
        assert_eq!(
            reply.translation,
            Translation::Translated("مرحبا، كيف حالك".to_string())
        );
    }

    #[tokio::test]
    async fn translation_failure_uses_placeholder() {
        let server = MockServer::start().await;
        mount_translation(&server, ResponseTemplate::new(503)).await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(completion("Muy bien."))
            .with_priority(5)
            .mount(&server)
            .await;

        let reply = tutor(&server).respond("Hola", None, None).await.unwrap();

        assert_eq!(reply.reply, "Muy bien.");
        assert_eq!(reply.translation.as_display_text(), TRANSLATION_PLACEHOLDER);
    }

    #[tokio::test]
    async fn reply_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = tutor(&server).respond("Hola", Some("B2"), None).await;

        assert!(result.is_err());
    }
}

// ============================================================================
// Speech Tests
// ============================================================================

mod speech_tests {
    use super::*;

    fn speech_service(server: &MockServer, scratch: &TempDir) -> SpeechService {
        let config = SpeechConfig {
            tts: GoogleTtsConfig {
                base_url: Some(server.uri()),
                ..Default::default()
            },
            ..Default::default()
        };
        let adapter = SpeechAdapter::new(config).unwrap();
        let store = LocalAudioStore::new(scratch.path().join("temp"));
        SpeechService::new(Arc::new(adapter), Arc::new(store))
    }

    #[tokio::test]
    async fn synthesized_audio_lands_in_scratch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .and(query_param("tl", "es"))
            .and(query_param("q", "Buenos días"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3mp3".to_vec()))
            .expect(1)
            .mount(&server)
            .await;
        let scratch = TempDir::new().unwrap();
        let service = speech_service(&server, &scratch);

        let name = service.synthesize_to_scratch("Buenos días").await.unwrap();

        assert_eq!(name.format(), Some(AudioFormat::Mp3));
        let (_, data) = service.open_audio(name.as_str()).await.unwrap();
        assert_eq!(&data[..], b"ID3mp3");
    }

    #[tokio::test]
    async fn upstream_failure_leaves_no_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/translate_tts"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        let scratch = TempDir::new().unwrap();
        let service = speech_service(&server, &scratch);

        let result = service.synthesize_to_scratch("Hola").await;

        assert!(result.is_err());
        assert!(!scratch.path().join("temp").exists());
    }

    #[tokio::test]
    async fn failed_transcription_still_removes_upload() {
        let server = MockServer::start().await;
        let scratch = TempDir::new().unwrap();
        let service = speech_service(&server, &scratch);

        // The default whisper-cli binary is not installed in the test environment.
        let result = service.transcribe_upload(b"RIFF....WAVE").await;

        assert!(result.is_err());
        let leftovers = std::fs::read_dir(scratch.path().join("temp"))
            .unwrap()
            .count();
        assert_eq!(leftovers, 0);
    }
}
