    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::tier::ModelTier;

    const MODEL_PATH: &str = "/models/gemini-1.5-pro:generateContent";

    fn request() -> GenerateContentRequest {
        GenerateContentRequest::from_prompt("prompt", ModelTier::Primary.generation_config())
    }

    async fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(server.uri(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "S"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(format!("{}/", server.uri()), Duration::from_secs(5)).unwrap();
        let response = client
            .generate_content("gemini-1.5-pro", "AIzaTestKey123", &request())
            .await
            .unwrap();
        assert_eq!(response.first_text(), Some("S"));
    }

    #[tokio::test]
    async fn test_generate_content_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(query_param("key", "AIzaTestKey123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "S"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let response = client
            .generate_content("gemini-1.5-pro", "AIzaTestKey123", &request())
            .await
            .unwrap();
        assert_eq!(response.first_text(), Some("S"));
    }

    #[tokio::test]
    async fn test_forbidden_is_invalid_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_content("gemini-1.5-pro", "AIzaTestKey123", &request())
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::InvalidApiKey);
    }

    #[tokio::test]
    async fn test_too_many_requests_is_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_content("gemini-1.5-pro", "AIzaTestKey123", &request())
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::RateLimited);
    }

    #[tokio::test]
    async fn test_other_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_content("gemini-1.5-pro", "AIzaTestKey123", &request())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            SummarizeError::Api {
                status: 500,
                body: "backend exploded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_quota_error_in_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"code": 400, "message": "Resource has been exhausted (e.g. check quota)."}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_content("gemini-1.5-pro", "AIzaTestKey123", &request())
            .await
            .unwrap_err();
        assert!(err.is_rate_limit());
        assert!(err.to_string().contains("quota"));
    }

    #[tokio::test]
    async fn test_non_quota_error_in_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"code": 400, "message": "Invalid argument"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_content("gemini-1.5-pro", "AIzaTestKey123", &request())
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::Upstream("Invalid argument".to_string()));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_format_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .generate_content("gemini-1.5-pro", "AIzaTestKey123", &request())
            .await
            .unwrap_err();
        assert_eq!(err, SummarizeError::Format);
    }
