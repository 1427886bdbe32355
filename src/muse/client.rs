use tokio::sync::mpsc;

use crate::common::{MuseCommand, MuseEvent};
use crate::config::MuseConfig;

use super::MuseError;
use super::session::MuseSession;
use super::transport::{EMPTY_REPLY, GeminiTransport};

/// Background worker that owns the conversational session and the transport.
/// The UI talks to it exclusively through the command/event channels, so one
/// logical thread of control lives on each side.
pub struct MuseClient {
    event_sender: mpsc::Sender<MuseEvent>,
    command_receiver: mpsc::Receiver<MuseCommand>,
    transport: GeminiTransport,
    session: MuseSession,
    stream_replies: bool,
}

impl MuseClient {
    pub fn new(
        config: &MuseConfig,
        api_key: Option<String>,
        event_sender: mpsc::Sender<MuseEvent>,
        command_receiver: mpsc::Receiver<MuseCommand>,
    ) -> Result<Self, MuseError> {
        let transport = GeminiTransport::new(config, api_key)?;
        Ok(Self {
            event_sender,
            command_receiver,
            transport,
            session: MuseSession::new(),
            stream_replies: config.stream_replies,
        })
    }

    pub async fn run(mut self) {
        log::info!("Muse worker started");
        while let Some(command) = self.command_receiver.recv().await {
            match command {
                MuseCommand::SendMessage(text) => self.handle_send(text).await,
                MuseCommand::ResetSession => {
                    self.session.reset();
                    log::info!("Muse session reset");
                }
            }
        }
        log::info!("Muse worker stopped");
    }

    async fn handle_send(&mut self, text: String) {
        self.emit(MuseEvent::ReplyStarted).await;

        let result = if self.stream_replies {
            self.send_streaming(&text).await
        } else {
            self.send_single(&text).await
        };

        match result {
            Ok(reply) => {
                // Only successful exchanges become part of the session history.
                self.session.commit_exchange(&text, &reply);
                self.emit(MuseEvent::ReplyFinished).await;
            }
            Err(err) => {
                log::error!("Muse request failed: {err}");
                self.emit(MuseEvent::ReplyFailed(err.to_string())).await;
            }
        }
    }

    async fn send_single(&mut self, text: &str) -> Result<String, MuseError> {
        let reply = self.transport.generate(&self.session, text).await?;
        self.emit(MuseEvent::Fragment(reply.clone())).await;
        Ok(reply)
    }

    async fn send_streaming(&mut self, text: &str) -> Result<String, MuseError> {
        let (tx, mut rx) = mpsc::channel::<String>(32);

        // Forward fragments to the UI while the request is still in flight.
        let events = self.event_sender.clone();
        let forwarder = tokio::spawn(async move {
            let mut full = String::new();
            while let Some(fragment) = rx.recv().await {
                full.push_str(&fragment);
                let _ = events.send(MuseEvent::Fragment(fragment)).await;
            }
            full
        });

        let result = self.transport.generate_stream(&self.session, text, tx).await;
        // The transport dropped its sender, so the forwarder drains and ends.
        let full = forwarder.await.unwrap_or_default();
        result?;

        if full.is_empty() {
            // Stream completed without any candidate text.
            let reply = EMPTY_REPLY.to_string();
            self.emit(MuseEvent::Fragment(reply.clone())).await;
            return Ok(reply);
        }
        Ok(full)
    }

    async fn emit(&self, event: MuseEvent) {
        if let Err(err) = self.event_sender.send(event).await {
            log::warn!("Failed to notify UI: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> MuseConfig {
        MuseConfig {
            // Nothing listens on the discard port, so requests fail fast.
            api_base: "http://127.0.0.1:9".to_string(),
            stream_replies: false,
            ..MuseConfig::default()
        }
    }

    #[tokio::test]
    async fn missing_key_is_a_construction_error() {
        let (event_tx, _event_rx) = mpsc::channel(8);
        let (_cmd_tx, cmd_rx) = mpsc::channel(8);
        let result = MuseClient::new(&MuseConfig::default(), None, event_tx, cmd_rx);
        assert!(matches!(result, Err(MuseError::MissingApiKey)));
    }

    #[tokio::test]
    async fn failed_exchange_emits_started_then_failed() {
        let (event_tx, mut event_rx) = mpsc::channel(8);
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let client = MuseClient::new(
            &unreachable_config(),
            Some("test-key".to_string()),
            event_tx,
            cmd_rx,
        )
        .unwrap();
        tokio::spawn(client.run());

        cmd_tx
            .send(MuseCommand::SendMessage("配色方案".to_string()))
            .await
            .unwrap();

        assert!(matches!(event_rx.recv().await, Some(MuseEvent::ReplyStarted)));
        assert!(matches!(
            event_rx.recv().await,
            Some(MuseEvent::ReplyFailed(_))
        ));
    }
}
