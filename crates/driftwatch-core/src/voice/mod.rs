//! Live voice conversations with the generative collaborator.
//!
//! The network transport is an external collaborator behind
//! [`VoiceTransport`]; everything here is the session logic the
//! dashboard needs: PCM framing, playback scheduling, transcript
//! accumulation, and the one-stream-at-a-time rule.

pub mod pcm;
pub mod session;

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::Error;
use crate::genai::CollabError;
pub use session::{Playback, ServerEvent, SessionUpdate, VoiceSession};

/// Seam to the bidirectional audio transport.
#[async_trait]
pub trait VoiceTransport: Send {
    /// Send one outbound frame of 16 kHz PCM bytes.
    async fn send_audio(&mut self, frame: &[u8]) -> Result<(), CollabError>;

    /// Close the stream. Further sends are invalid.
    async fn close(&mut self) -> Result<(), CollabError>;
}

/// Manages at most one live voice stream.
///
/// Starting a new conversation tears down the previous one first, so two
/// streams are never open at the same time.
pub struct VoiceChat<T: VoiceTransport> {
    active: Option<(VoiceSession, T)>,
}

impl<T: VoiceTransport> VoiceChat<T> {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn is_listening(&self) -> bool {
        self.active.is_some()
    }

    /// Open a new conversation over `transport`, closing any active one.
    pub async fn start(&mut self, transport: T) -> Result<(), Error> {
        self.stop().await?;
        self.active = Some((VoiceSession::new(), transport));
        Ok(())
    }

    /// Close the active conversation, if any.
    pub async fn stop(&mut self) -> Result<(), Error> {
        if let Some((_, mut transport)) = self.active.take() {
            transport.close().await?;
        }
        Ok(())
    }

    /// Forward one microphone buffer to the collaborator.
    ///
    /// A no-op when no conversation is open; microphone capture may
    /// outlive the stream by a tick.
    pub async fn send_audio(&mut self, samples: &[f32]) -> Result<(), Error> {
        let Some((_, transport)) = self.active.as_mut() else {
            debug!("dropping microphone buffer, no active voice stream");
            return Ok(());
        };
        let frame = pcm::encode_pcm16(samples);
        transport.send_audio(&frame).await?;
        Ok(())
    }

    /// Feed a collaborator event into the active session.
    ///
    /// `now` is the current position of the output clock. When the
    /// collaborator closes the stream the session is dropped without a
    /// local close.
    pub fn on_event(&mut self, now: Duration, event: ServerEvent) -> SessionUpdate {
        let Some((session, _)) = self.active.as_mut() else {
            return SessionUpdate::default();
        };

        let update = session.on_event(now, event);
        if update.closed {
            self.active = None;
        }
        update
    }
}

impl<T: VoiceTransport> Default for VoiceChat<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct TransportLog {
        frames: Vec<Vec<u8>>,
        closed: bool,
    }

    /// Transport stub that records what the manager does with it.
    struct StubTransport {
        log: Arc<Mutex<TransportLog>>,
    }

    impl StubTransport {
        fn new() -> (Self, Arc<Mutex<TransportLog>>) {
            let log = Arc::new(Mutex::new(TransportLog::default()));
            (Self { log: log.clone() }, log)
        }
    }

    #[async_trait]
    impl VoiceTransport for StubTransport {
        async fn send_audio(&mut self, frame: &[u8]) -> Result<(), CollabError> {
            self.log.lock().unwrap().frames.push(frame.to_vec());
            Ok(())
        }

        async fn close(&mut self) -> Result<(), CollabError> {
            self.log.lock().unwrap().closed = true;
            Ok(())
        }
    }

    #[tokio::test]
    async fn starting_a_second_stream_closes_the_first() {
        let (first, first_log) = StubTransport::new();
        let (second, second_log) = StubTransport::new();
        let mut chat = VoiceChat::new();

        chat.start(first).await.unwrap();
        assert!(chat.is_listening());

        chat.start(second).await.unwrap();
        assert!(chat.is_listening());
        assert!(first_log.lock().unwrap().closed);
        assert!(!second_log.lock().unwrap().closed);
    }

    #[tokio::test]
    async fn stop_closes_and_clears_the_stream() {
        let (transport, log) = StubTransport::new();
        let mut chat = VoiceChat::new();

        chat.start(transport).await.unwrap();
        chat.stop().await.unwrap();

        assert!(!chat.is_listening());
        assert!(log.lock().unwrap().closed);

        // A second stop is a no-op.
        chat.stop().await.unwrap();
    }

    #[tokio::test]
    async fn microphone_audio_is_encoded_and_forwarded() {
        let (transport, log) = StubTransport::new();
        let mut chat = VoiceChat::new();
        chat.start(transport).await.unwrap();

        chat.send_audio(&[0.0, 1.0]).await.unwrap();

        let frames = &log.lock().unwrap().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0], pcm::encode_pcm16(&[0.0, 1.0]));
    }

    #[tokio::test]
    async fn audio_without_a_stream_is_dropped() {
        let mut chat: VoiceChat<StubTransport> = VoiceChat::new();
        chat.send_audio(&[0.5]).await.unwrap();
    }

    #[tokio::test]
    async fn server_close_drops_the_session() {
        let (transport, log) = StubTransport::new();
        let mut chat = VoiceChat::new();
        chat.start(transport).await.unwrap();

        let update = chat.on_event(Duration::ZERO, ServerEvent::Closed);

        assert!(update.closed);
        assert!(!chat.is_listening());
        // The collaborator closed the stream; no local close is sent.
        assert!(!log.lock().unwrap().closed);
    }
}
