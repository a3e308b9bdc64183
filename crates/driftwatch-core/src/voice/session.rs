use std::time::Duration;

use crate::chat::ChatMessage;

use super::pcm;

/// Events arriving from the voice collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// A chunk of 24 kHz model speech.
    Audio(Vec<i16>),
    /// Incremental transcription of the user's speech.
    InputTranscription(String),
    /// Incremental transcription of the model's speech.
    OutputTranscription(String),
    /// The model finished its turn.
    TurnComplete,
    /// The user interrupted the model mid-turn.
    Interrupted,
    /// The collaborator closed the stream.
    Closed,
}

/// Playback instructions for the audio sink.
#[derive(Debug, Clone, PartialEq)]
pub enum Playback {
    /// Start these samples at the given offset on the output clock.
    Schedule { at: Duration, samples: Vec<i16> },
    /// Stop and discard everything scheduled so far.
    FlushAll,
}

/// What the caller should do after feeding one event to the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionUpdate {
    pub playback: Option<Playback>,
    /// Transcript entries finalized by this event.
    pub committed: Vec<ChatMessage>,
    pub closed: bool,
}

/// State machine for one live voice conversation.
///
/// Playback is scheduled gaplessly: each audio chunk starts where the
/// previous one ends, or immediately when the queue has drained. The
/// incremental transcripts accumulate until the model completes a turn,
/// at which point both sides are committed as chat messages.
#[derive(Debug, Default)]
pub struct VoiceSession {
    user_transcript: String,
    model_transcript: String,
    playhead: Duration,
}

impl VoiceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one collaborator event; `now` is the current output-clock time.
    pub fn on_event(&mut self, now: Duration, event: ServerEvent) -> SessionUpdate {
        let mut update = SessionUpdate::default();

        match event {
            ServerEvent::Audio(samples) => {
                self.playhead = self.playhead.max(now);
                let at = self.playhead;
                self.playhead += pcm::playback_duration(samples.len());
                update.playback = Some(Playback::Schedule { at, samples });
            }
            ServerEvent::InputTranscription(text) => self.user_transcript.push_str(&text),
            ServerEvent::OutputTranscription(text) => self.model_transcript.push_str(&text),
            ServerEvent::TurnComplete => {
                let user = self.user_transcript.trim();
                if !user.is_empty() {
                    update.committed.push(ChatMessage::user(user));
                }
                let model = self.model_transcript.trim();
                if !model.is_empty() {
                    update.committed.push(ChatMessage::model(model, Vec::new()));
                }
                self.user_transcript.clear();
                self.model_transcript.clear();
            }
            ServerEvent::Interrupted => {
                self.playhead = Duration::ZERO;
                update.playback = Some(Playback::FlushAll);
            }
            ServerEvent::Closed => update.closed = true,
        }

        update
    }

    /// In-flight (not yet committed) transcripts, user then model.
    pub fn partial_transcripts(&self) -> (&str, &str) {
        (&self.user_transcript, &self.model_transcript)
    }
}
