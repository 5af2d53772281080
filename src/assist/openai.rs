// SPDX-License-Identifier: PMPL-1.0-or-later
//! Client for OpenAI-compatible chat and transcription endpoints

use async_trait::async_trait;
use base64::Engine;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::Assistant;
use crate::config::OpenAiConfig;
use crate::error::{Error, Result};

const ALT_TEXT_PROMPT: &str = "Generate a concise, descriptive alt text for this image that would be suitable for screen readers. Focus on the main subject and important details. Keep it under 125 characters.";

const ALT_TEXT_MAX_TOKENS: u32 = 300;
const SIMPLIFY_MAX_TOKENS: u32 = 1000;
const SIMPLIFY_TEMPERATURE: f64 = 0.7;

fn simplify_prompt(target_level: &str) -> String {
    format!(
        "You are an expert in simplifying text to make it more accessible. \
         Simplify the provided text to approximately a {} reading level. \
         Maintain all the important information but use simpler words, shorter sentences, and clearer structure. \
         Do not add any explanatory text or commentary - just return the simplified version.",
        target_level
    )
}

/// OpenAI API client
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    vision_model: String,
    text_model: String,
    transcription_model: String,
}

impl OpenAiClient {
    /// Create a client; fails if no API key is configured
    pub fn new(config: &OpenAiConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| Error::Config("openai.api_key is not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            vision_model: config.vision_model.clone(),
            text_model: config.text_model.clone(),
            transcription_model: config.transcription_model.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn chat(&self, body: serde_json::Value) -> Result<String> {
        let response = self
            .client
            .post(self.url("/chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Assistant(format!(
                "chat completion returned status {}",
                response.status()
            )));
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| Error::Assistant("chat completion had no content".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Transcription {
    text: String,
}

#[async_trait]
impl Assistant for OpenAiClient {
    async fn describe_image(&self, image: &[u8], mime: &str) -> Result<String> {
        let data_url = format!(
            "data:{};base64,{}",
            mime,
            base64::engine::general_purpose::STANDARD.encode(image)
        );
        tracing::debug!(model = %self.vision_model, bytes = image.len(), "requesting alt text");

        self.chat(json!({
            "model": self.vision_model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": ALT_TEXT_PROMPT },
                    { "type": "image_url", "image_url": { "url": data_url } },
                ],
            }],
            "max_tokens": ALT_TEXT_MAX_TOKENS,
        }))
        .await
    }

    async fn simplify_text(&self, text: &str, target_level: &str) -> Result<String> {
        tracing::debug!(model = %self.text_model, target_level, "requesting simplification");

        self.chat(json!({
            "model": self.text_model,
            "messages": [
                { "role": "system", "content": simplify_prompt(target_level) },
                { "role": "user", "content": text },
            ],
            "temperature": SIMPLIFY_TEMPERATURE,
            "max_tokens": SIMPLIFY_MAX_TOKENS,
        }))
        .await
    }

    async fn transcribe_audio(&self, audio: Vec<u8>, file_name: &str, mime: &str) -> Result<String> {
        tracing::debug!(model = %self.transcription_model, bytes = audio.len(), "requesting transcript");

        let file = Part::bytes(audio).file_name(file_name.to_string()).mime_str(mime)?;
        let form = Form::new()
            .text("model", self.transcription_model.clone())
            .part("file", file);

        let response = self
            .client
            .post(self.url("/audio/transcriptions"))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Assistant(format!(
                "transcription returned status {}",
                response.status()
            )));
        }

        let transcription: Transcription = response.json().await?;
        Ok(transcription.text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_api_key() {
        assert!(OpenAiClient::new(&OpenAiConfig::default()).is_err());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = OpenAiConfig {
            api_key: Some("sk-test".into()),
            base_url: "http://localhost:9999/v1/".into(),
            ..OpenAiConfig::default()
        };
        let client = OpenAiClient::new(&config).expect("client");
        assert_eq!(client.url("/chat/completions"), "http://localhost:9999/v1/chat/completions");
    }

    #[test]
    fn test_simplify_prompt_names_level() {
        assert!(simplify_prompt("grade6").contains("approximately a grade6 reading level"));
    }
}
