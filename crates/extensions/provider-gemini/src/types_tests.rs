    use super::*;
    use serde_json::json;

    #[test]
    fn test_part_text() {
        let part = Part::text("Hello");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json, json!({"text": "Hello"}));
    }

    #[test]
    fn test_request_wire_shape() {
        let config = GenerationConfig {
            temperature: 0.5,
            top_p: 0.8,
            top_k: 40,
            max_output_tokens: 1024,
            stop_sequences: vec![],
        };
        let request = GenerateContentRequest::from_prompt("Summarize this", config);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "Summarize this");
        assert!(json["contents"][0].get("role").is_none());
        assert_eq!(json["generationConfig"]["topK"], 40);
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(json["generationConfig"]["stopSequences"], json!([]));
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.5).abs() < 1e-6);
        assert!((json["generationConfig"]["topP"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_safety_settings() {
        let settings = default_safety_settings();
        assert_eq!(settings.len(), 4);
        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json[0]["category"], "HARM_CATEGORY_HARASSMENT");
        assert_eq!(json[1]["category"], "HARM_CATEGORY_HATE_SPEECH");
        assert_eq!(json[2]["category"], "HARM_CATEGORY_SEXUALLY_EXPLICIT");
        assert_eq!(json[3]["category"], "HARM_CATEGORY_DANGEROUS_CONTENT");
        for setting in json.as_array().unwrap() {
            assert_eq!(setting["threshold"], "BLOCK_MEDIUM_AND_ABOVE");
        }
    }

    #[test]
    fn test_response_first_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "S"}], "role": "model"}}]
        }))
        .unwrap();
        assert_eq!(response.first_text(), Some("S"));
    }

    #[test]
    fn test_response_missing_path() {
        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(empty.first_text().is_none());

        let no_parts: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": []}}]
        }))
        .unwrap();
        assert!(no_parts.first_text().is_none());

        let no_content: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert!(no_content.first_text().is_none());
    }

    #[test]
    fn test_response_with_usage() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "S"}]}, "finishReason": "STOP"}],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 5, "totalTokenCount": 15}
        }))
        .unwrap();
        let usage = response.usage_metadata.unwrap();
        assert_eq!(usage.total_token_count, 15);
        assert_eq!(response.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_error_detail_quota() {
        let by_code = GeminiErrorDetail {
            code: Some(429),
            ..Default::default()
        };
        assert!(by_code.is_quota());

        let by_message = GeminiErrorDetail {
            code: Some(400),
            message: Some("You exceeded your current quota".to_string()),
            status: None,
        };
        assert!(by_message.is_quota());

        let other = GeminiErrorDetail {
            code: Some(400),
            message: Some("Invalid argument".to_string()),
            status: Some("INVALID_ARGUMENT".to_string()),
        };
        assert!(!other.is_quota());
    }

    #[test]
    fn test_error_body_parse() {
        let error: GeminiError = serde_json::from_value(json!({
            "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
        }))
        .unwrap();
        assert_eq!(error.error.code, Some(403));
        assert_eq!(error.error.message.as_deref(), Some("API key not valid"));
    }
