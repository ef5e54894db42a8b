use super::*;

use crate::background::BackgroundScript;
use crate::persona::{PersonaLoader, StaticPersonaSource};
use crate::test_support::{article_html, MockBackend, API_KEY};

fn runtime_port(persona: &str) -> Arc<MessagePort> {
    let loader = Arc::new(PersonaLoader::new(Arc::new(StaticPersonaSource::new(persona))));
    BackgroundScript::install(loader)
}

fn fast_config() -> ContentScriptConfig {
    ContentScriptConfig {
        persona_timeout: Duration::from_millis(200),
        persona_retry_delay: Duration::from_millis(10),
        ..ContentScriptConfig::default()
    }
}

fn script(html: &str, runtime: Arc<MessagePort>, backend: Arc<MockBackend>) -> ContentScript {
    ContentScript::new(Arc::from(html), runtime, backend, fast_config())
}

#[tokio::test]
async fn test_ping() {
    let backend = MockBackend::returning("S");
    let script = script("<p>x</p>", runtime_port("P"), backend);
    let response = script.on_message(Request::Ping).await.unwrap();
    assert!(matches!(response, Response::Pong { ref status, timestamp } if status == "ok" && timestamp > 0));
}

#[tokio::test]
async fn test_get_persona_not_handled() {
    let script = script("<p>x</p>", runtime_port("P"), MockBackend::returning("S"));
    assert!(script.on_message(Request::GetPersona).await.is_none());
}

#[tokio::test]
async fn test_summarize_round_trip() {
    let backend = MockBackend::returning("S");
    let script = script(&article_html(), runtime_port("Persona P"), backend.clone());

    let response = script
        .on_message(Request::summarize(SummaryLength::Concise, API_KEY))
        .await
        .unwrap();

    assert_eq!(response, Response::summary("S"));
    assert_eq!(backend.call_count(), 1);
    assert_eq!(backend.personas.lock()[0], "Persona P");
    assert_eq!(backend.pages.lock()[0].title, "Rust Ownership");
    assert!(!script.is_processing());
}

#[tokio::test]
async fn test_insufficient_content_makes_no_calls() {
    let backend = MockBackend::returning("S");
    let script = script(
        "<html><body><p>Too short to summarize.</p></body></html>",
        runtime_port("P"),
        backend.clone(),
    );

    let response = script
        .on_message(Request::summarize(SummaryLength::Concise, API_KEY))
        .await
        .unwrap();

    assert_eq!(
        response,
        Response::error(
            "Not enough content to summarize on this page. Try a page with more text content."
        )
    );
    assert_eq!(backend.call_count(), 0);
    assert!(!script.is_processing());
}

#[tokio::test]
async fn test_short_api_key_rejected() {
    let backend = MockBackend::returning("S");
    let script = script(&article_html(), runtime_port("P"), backend.clone());

    let response = script
        .on_message(Request::summarize(SummaryLength::Detailed, "  short  "))
        .await
        .unwrap();

    assert_eq!(
        response,
        Response::error("Invalid API key. Please check your settings.")
    );
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn test_backend_error_is_wrapped() {
    let backend = MockBackend::failing(SummarizeError::RateLimited);
    let script = script(&article_html(), runtime_port("P"), backend.clone());

    let response = script
        .on_message(Request::summarize(SummaryLength::Concise, API_KEY))
        .await
        .unwrap();

    assert_eq!(
        response,
        Response::error(
            "Failed to generate summary: Rate limit exceeded. Please try again in a few minutes."
        )
    );
    assert!(!script.is_processing());
}

#[tokio::test]
async fn test_unreachable_background_uses_fallback_persona() {
    let backend = MockBackend::returning("S");
    let silent = Arc::new(MessagePort::new("runtime"));
    let script = script(&article_html(), silent, backend.clone());

    let response = script
        .on_message(Request::summarize(SummaryLength::Concise, API_KEY))
        .await
        .unwrap();

    assert_eq!(response, Response::summary("S"));
    assert_eq!(backend.personas.lock()[0], FALLBACK_PERSONA);
}

#[tokio::test]
async fn test_persona_retry_exhaustion() {
    let silent = Arc::new(MessagePort::new("runtime"));
    let script = script(&article_html(), silent, MockBackend::returning("S"));

    let err = script.persona_with_retry().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to get persona after 3 attempts: Receiving end does not exist"
    );
}

#[tokio::test]
async fn test_concurrent_summarize_rejected() {
    let backend = MockBackend::slow("S", Duration::from_millis(300));
    let script = Arc::new(script(&article_html(), runtime_port("P"), backend.clone()));

    let first = {
        let script = Arc::clone(&script);
        tokio::spawn(async move {
            script
                .on_message(Request::summarize(SummaryLength::Concise, API_KEY))
                .await
        })
    };
    while !script.is_processing() || backend.call_count() == 0 {
        tokio::task::yield_now().await;
    }

    let second = script
        .on_message(Request::summarize(SummaryLength::Concise, API_KEY))
        .await
        .unwrap();
    assert_eq!(
        second,
        Response::error("Already processing a request. Please wait.")
    );

    assert_eq!(first.await.unwrap(), Some(Response::summary("S")));
    assert_eq!(backend.call_count(), 1);
    assert!(!script.is_processing());
}
