use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::config::RequesterConfig;
use crate::error::RequestFailure;
use crate::{Answer, Question};

// Structures matching the OpenAI-compatible /chat/completions endpoint
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    // usage, id, created etc. are ignored
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

/// Sends one chat-completion request per question. No retries, no history.
#[derive(Debug, Clone)]
pub struct AnswerRequester {
    client: Client,
    config: RequesterConfig,
}

impl AnswerRequester {
    pub fn new(config: RequesterConfig) -> Result<Self, RequestFailure> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RequestFailure::ClientSetup)?;
        Ok(Self { client, config })
    }

    /// Combines the fixed system instruction with the question.
    pub fn compose(&self, question: &Question) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: self.config.system_instruction.clone(),
                },
                ChatMessage {
                    role: Role::User,
                    content: question.as_str().to_string(),
                },
            ],
        }
    }

    #[instrument(skip(self, question), fields(model = %self.config.model))]
    pub async fn request_answer(&self, question: &Question) -> Result<Answer, RequestFailure> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(RequestFailure::MissingApiKey)?;

        let url = self.config.completions_url();
        let payload = self.compose(question);
        debug!(%url, question = question.as_str(), "Sending chat-completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RequestFailure::from_transport(e, self.config.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!(%status, %error_body, "Chat-completion request failed");
            return Err(RequestFailure::from_status(
                status,
                extract_error_message(&error_body),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RequestFailure::from_transport(e, self.config.timeout))?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body)
            .map_err(|e| RequestFailure::MalformedResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| RequestFailure::MalformedResponse("response has no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(RequestFailure::EmptyAnswer);
        }

        info!(answer_len = content.len(), "Received answer");
        Ok(Answer::new(content))
    }
}

/// Pulls `error.message` out of a provider error body. Gemini wraps the
/// error object in a single-element array; plain OpenAI-style bodies don't.
/// Falls back to the raw body.
pub fn extract_error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    let error_object = parsed.as_ref().map(|value| match value {
        serde_json::Value::Array(items) => items.first().unwrap_or(value),
        _ => value,
    });

    error_object
        .and_then(|value| value.pointer("/error/message"))
        .and_then(|message| message.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}
