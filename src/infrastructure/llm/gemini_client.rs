use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::application::ports::{
    GenerationRequest, GenerativeModel, ModelInvocationError, Part,
};
use crate::domain::RawModelResponse;
use crate::presentation::config::ModelSettings;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// REST client for the `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<WireContent<'a>>,
}

#[derive(Serialize)]
struct WireContent<'a> {
    role: &'static str,
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WirePart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: WireBlob<'a> },
}

#[derive(Serialize)]
struct WireBlob<'a> {
    mime_type: &'a str,
    data: &'a str,
}

impl<'a> From<&'a Part> for WirePart<'a> {
    fn from(part: &'a Part) -> Self {
        match part {
            Part::Text(text) => WirePart::Text { text },
            Part::InlineData { mime_type, data } => WirePart::InlineData {
                inline_data: WireBlob { mime_type, data },
            },
        }
    }
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        model: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, ModelInvocationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelInvocationError::ApiRequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.trim().to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_settings(settings: &ModelSettings) -> Result<Self, ModelInvocationError> {
        Self::new(
            &settings.base_url,
            &settings.name,
            &settings.api_key,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    #[tracing::instrument(skip(self, request), fields(model = %self.model, parts = request.parts.len()))]
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<RawModelResponse, ModelInvocationError> {
        let body = GenerateContentRequest {
            contents: vec![WireContent {
                role: "user",
                parts: request.parts.iter().map(WirePart::from).collect(),
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ModelInvocationError::ApiRequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelInvocationError::RateLimited(body));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Model request failed");
            return Err(ModelInvocationError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ModelInvocationError::InvalidResponse(e.to_string()))?;

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!(body = %text, "Unparseable model response");
            ModelInvocationError::InvalidResponse(e.to_string())
        })?;

        Ok(RawModelResponse::new(json))
    }
}
