    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "AIzaTestKey123";

    fn config_for(server: &MockServer) -> SummarizerConfig {
        SummarizerConfig {
            base_url: server.uri(),
            backoff: Backoff {
                base: Duration::from_millis(1),
                max: Duration::from_millis(8),
            },
            request_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    fn page() -> PageContent {
        PageContent::new("T", "C")
    }

    fn success(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        }))
    }

    fn model_path(model: &str) -> String {
        format!("/models/{}:generateContent", model)
    }

    #[test]
    fn test_backoff_schedule() {
        let backoff = Backoff::default();
        assert_eq!(backoff.delay_for_retry(0), Duration::ZERO);
        assert_eq!(backoff.delay_for_retry(1), Duration::from_millis(1000));
        assert_eq!(backoff.delay_for_retry(2), Duration::from_millis(2000));
        assert_eq!(backoff.delay_for_retry(3), Duration::from_millis(4000));
        assert_eq!(backoff.delay_for_retry(4), Duration::from_millis(8000));
        assert_eq!(backoff.delay_for_retry(10), Duration::from_millis(8000));
        assert_eq!(backoff.delay_for_retry(40), Duration::from_millis(8000));
    }

    #[test]
    fn test_backoff_non_decreasing() {
        let backoff = Backoff::default();
        let delays: Vec<_> = (1..=6).map(|n| backoff.delay_for_retry(n)).collect();
        assert!(delays.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_config_default() {
        let config = SummarizerConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_content_chars, 30_000);
    }

    #[tokio::test]
    async fn test_round_trip_returns_summary() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(model_path("gemini-1.5-pro")))
            .and(body_string_contains("Title: T"))
            .and(body_string_contains("HARM_CATEGORY_DANGEROUS_CONTENT"))
            .respond_with(success("S"))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = GeminiSummarizer::new(config_for(&server)).unwrap();
        let summary = summarizer
            .summarize(&page(), "Persona", SummaryLength::Concise, KEY)
            .await
            .unwrap();
        assert_eq!(summary, "S");
    }

    #[tokio::test]
    async fn test_rate_limit_exhausts_after_three_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(model_path("gemini-1.5-pro")))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(model_path("gemini-1.5-flash")))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(model_path("gemini-pro")))
            .respond_with(ResponseTemplate::new(429))
            .expect(2)
            .mount(&server)
            .await;

        let summarizer = GeminiSummarizer::new(config_for(&server)).unwrap();
        let err = summarizer
            .summarize(&page(), "Persona", SummaryLength::Concise, KEY)
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::RateLimited);
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded. Please try again in a few minutes."
        );
    }

    #[tokio::test]
    async fn test_rate_limit_falls_back_to_next_tier() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(model_path("gemini-1.5-pro")))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(model_path("gemini-1.5-flash")))
            .and(body_string_contains("\"maxOutputTokens\":1024"))
            .respond_with(success("from flash"))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = GeminiSummarizer::new(config_for(&server)).unwrap();
        let summary = summarizer
            .summarize(&page(), "Persona", SummaryLength::Detailed, KEY)
            .await
            .unwrap();
        assert_eq!(summary, "from flash");
    }

    #[tokio::test]
    async fn test_quota_body_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(model_path("gemini-1.5-pro")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"code": 429, "message": "quota exceeded"}
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(model_path("gemini-1.5-flash")))
            .respond_with(success("after quota"))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = GeminiSummarizer::new(config_for(&server)).unwrap();
        let summary = summarizer
            .summarize(&page(), "Persona", SummaryLength::Concise, KEY)
            .await
            .unwrap();
        assert_eq!(summary, "after quota");
    }

    #[tokio::test]
    async fn test_forbidden_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = GeminiSummarizer::new(config_for(&server)).unwrap();
        let err = summarizer
            .summarize(&page(), "Persona", SummaryLength::Concise, KEY)
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::InvalidApiKey);
    }

    #[tokio::test]
    async fn test_other_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = GeminiSummarizer::new(config_for(&server)).unwrap();
        let err = summarizer
            .summarize(&page(), "Persona", SummaryLength::Concise, KEY)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: 400 - bad request");
    }

    #[tokio::test]
    async fn test_missing_result_path_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .expect(1)
            .mount(&server)
            .await;

        let summarizer = GeminiSummarizer::new(config_for(&server)).unwrap();
        let err = summarizer
            .summarize(&page(), "Persona", SummaryLength::Concise, KEY)
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::Format);
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(success("unreachable"))
            .expect(0)
            .mount(&server)
            .await;

        let summarizer = GeminiSummarizer::new(config_for(&server)).unwrap();

        let err = summarizer
            .summarize(&page(), "Persona", SummaryLength::Concise, "   ")
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::MissingApiKey);

        let err = summarizer
            .summarize(&page(), "Persona", SummaryLength::Concise, "short")
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::InvalidApiKeyFormat);

        let err = summarizer
            .summarize(&PageContent::new("T", "  "), "Persona", SummaryLength::Concise, KEY)
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::NoContent);
    }
