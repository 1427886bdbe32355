use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::sync::mpsc::Sender;

use crate::common::MessageRole;
use crate::config::MuseConfig;

use super::MuseError;
use super::session::MuseSession;

/// Reply used when the model answers with no candidate text at all.
pub const EMPTY_REPLY: &str = "I'm speechless.";

/// HTTP transport against the Gemini generateContent API.
pub struct GeminiTransport {
    client: Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiTransport {
    /// Build the transport. A missing credential fails here, at startup,
    /// instead of surfacing later inside a streaming loop.
    pub fn new(config: &MuseConfig, api_key: Option<String>) -> Result<Self, MuseError> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(MuseError::MissingApiKey),
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|err| MuseError::Network(err.to_string()))?;

        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// One-shot generation: resolves to the full reply text.
    pub async fn generate(
        &self,
        session: &MuseSession,
        message: &str,
    ) -> Result<String, MuseError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        );
        let response = self.post(&url, session, message).await?;
        let json: Value = response
            .json()
            .await
            .map_err(|err| MuseError::MalformedResponse(err.to_string()))?;

        Ok(extract_text(&json).unwrap_or_else(|| EMPTY_REPLY.to_string()))
    }

    /// Streaming generation: each text fragment is forwarded through `tx` in
    /// arrival order. The sequence is finite and not restartable; every call
    /// makes a fresh request.
    pub async fn generate_stream(
        &self,
        session: &MuseSession,
        message: &str,
        tx: Sender<String>,
    ) -> Result<(), MuseError> {
        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.api_base, self.model
        );
        let response = self.post(&url, session, message).await?;

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let bytes = chunk.map_err(|err| MuseError::Network(err.to_string()))?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));

            // SSE frames are newline-delimited; keep any trailing partial line
            while let Some(newline) = buffer.find('\n') {
                let line = buffer[..newline].trim().to_string();
                buffer.drain(..=newline);

                if let Some(fragment) = parse_sse_line(&line) {
                    if tx.send(fragment).await.is_err() {
                        // Receiver gone: nobody is rendering, stop reading.
                        return Ok(());
                    }
                }
            }
        }

        Ok(())
    }

    async fn post(
        &self,
        url: &str,
        session: &MuseSession,
        message: &str,
    ) -> Result<reqwest::Response, MuseError> {
        let body = request_body(session, message);
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| MuseError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MuseError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

/// Gemini takes the system prompt as a separate field; `contents` carries
/// only the user/model turns plus the new message.
fn request_body(session: &MuseSession, message: &str) -> Value {
    let mut contents: Vec<Value> = session
        .turns()
        .iter()
        .map(|turn| {
            json!({
                "role": role_name(turn.role),
                "parts": [{ "text": turn.text }],
            })
        })
        .collect();
    contents.push(json!({
        "role": "user",
        "parts": [{ "text": message }],
    }));

    json!({
        "system_instruction": { "parts": [{ "text": session.system_instruction() }] },
        "contents": contents,
    })
}

fn role_name(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Model => "model",
    }
}

/// Pull the text fragment out of one SSE line, if it carries one.
fn parse_sse_line(line: &str) -> Option<String> {
    let data = line.strip_prefix("data: ")?;
    let json = serde_json::from_str::<Value>(data).ok()?;
    extract_text(&json)
}

/// Candidate text, shared by the one-shot response and each stream chunk.
fn extract_text(json: &Value) -> Option<String> {
    let text = json["candidates"][0]["content"]["parts"][0]["text"].as_str()?;
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_fails_before_any_network_attempt() {
        let config = MuseConfig::default();
        assert!(matches!(
            GeminiTransport::new(&config, None),
            Err(MuseError::MissingApiKey)
        ));
    }

    #[test]
    fn blank_key_fails_too() {
        let config = MuseConfig::default();
        assert!(matches!(
            GeminiTransport::new(&config, Some("   ".to_string())),
            Err(MuseError::MissingApiKey)
        ));
    }

    #[test]
    fn request_body_carries_history_and_new_message() {
        let mut session = MuseSession::with_instruction("persona");
        session.commit_exchange("配色方案", "红色与金色");

        let body = request_body(&session, "字体呢");
        assert_eq!(
            body["system_instruction"]["parts"][0]["text"], "persona"
        );

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "字体呢");
    }

    #[test]
    fn parses_fragment_from_sse_data_line() {
        let line = r#"data: {"candidates":[{"content":{"parts":[{"text":"红色"}],"role":"model"}}]}"#;
        assert_eq!(parse_sse_line(line), Some("红色".to_string()));
    }

    #[test]
    fn ignores_non_data_and_unparsable_lines() {
        assert_eq!(parse_sse_line(""), None);
        assert_eq!(parse_sse_line(": keep-alive"), None);
        assert_eq!(parse_sse_line("data: [DONE]"), None);
    }

    #[test]
    fn empty_candidate_text_counts_as_no_fragment() {
        let json: Value = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&json), None);

        let blocked: Value =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert_eq!(extract_text(&blocked), None);
    }
}
