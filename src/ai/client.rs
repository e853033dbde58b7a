use super::{AiError, ChatMessage, TextGenerator};
use crate::config::AiSettings;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Calls a hosted model through `POST {api_base}/run/{model}`.
#[derive(Debug, Clone)]
pub struct HttpTextGenerator {
    api_base: String,
    model: String,
    api_token: Option<String>,
    timeout: Duration,
}

impl HttpTextGenerator {
    pub fn new(api_base: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            model: model.into(),
            api_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.api_token = token;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn from_settings(settings: &AiSettings) -> Self {
        Self::new(settings.resolved_api_base(), settings.model.clone())
            .with_token(settings.resolved_api_token())
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/run/{}",
            self.api_base.trim_end_matches('/'),
            self.model.trim_start_matches('/')
        )
    }
}

impl TextGenerator for HttpTextGenerator {
    fn generate_text(&self, messages: &[ChatMessage], max_tokens: u32) -> Result<String, AiError> {
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let mut request = agent.post(&self.endpoint());
        if let Some(token) = &self.api_token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }

        let body = json!({
            "messages": messages,
            "max_tokens": max_tokens,
        });
        let response = match request.send_json(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                return Err(AiError::Status { status, body });
            }
            Err(err) => return Err(AiError::Request(err.to_string())),
        };

        let value: Value = response
            .into_json()
            .map_err(|e| AiError::Response(e.to_string()))?;
        extract_response_text(&value)
            .ok_or_else(|| AiError::Response("reply carried no response text".to_string()))
    }
}

pub(crate) fn extract_response_text(value: &Value) -> Option<String> {
    if let Some(text) = value
        .get("result")
        .and_then(|result| result.get("response"))
        .and_then(Value::as_str)
    {
        return Some(text.to_string());
    }
    if let Some(text) = value.get("response").and_then(Value::as_str) {
        return Some(text.to_string());
    }
    value.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_model() {
        let client = HttpTextGenerator::new("http://127.0.0.1:9/", "@cf/meta/llama-3-8b-instruct");
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9/run/@cf/meta/llama-3-8b-instruct"
        );
    }

    #[test]
    fn response_text_prefers_result_envelope() {
        let wrapped = json!({"result": {"response": "inner"}, "response": "outer"});
        assert_eq!(extract_response_text(&wrapped).as_deref(), Some("inner"));
        let flat = json!({"response": "outer"});
        assert_eq!(extract_response_text(&flat).as_deref(), Some("outer"));
        assert_eq!(extract_response_text(&json!("raw")).as_deref(), Some("raw"));
        assert_eq!(extract_response_text(&json!({"success": true})), None);
    }
}
