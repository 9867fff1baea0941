//! The symptom triage "catbot".
//!
//! Text is sent to the backend first; when that fails, the local rules answer instead and the
//! message is marked as offline.

use std::fmt;

use tracing::{info, instrument};

use crate::{
    base::{
        demo::OFFLINE_SUFFIX,
        triage::Classifier,
        types::{TriageRequest, TriageResult},
    },
    service::{portal::PortalClient, voice::VoiceClient},
};

use super::{Notice, Outcome, Tone, attempt};

pub const ANALYZING: &str = "Analyzing symptoms...";
pub const LISTENING: &str = "Listening... speak your symptoms.";
pub const CAPTURE_FAILED: &str = "Could not capture audio. Try again or type your symptoms.";
pub const VOICE_UNSUPPORTED: &str = "🎤 Not supported";

/// A triage answer ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageView(pub TriageResult);

impl fmt::Display for TriageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Priority: {}", self.0.priority)?;
        writeln!(f, "Suggested speciality: {}", self.0.suggested_speciality)?;
        writeln!(f, "Suggested action: {}", self.0.suggested_action)?;
        write!(f, "{}", self.0.message)
    }
}

/// Result of a voice interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceTurn {
    /// No speech-to-text is available; the voice button is disabled.
    Unsupported(Notice),
    /// Capture failed; nothing was sent.
    Failed(Notice),
    /// The transcript was captured and handed to the catbot.
    Heard { transcript: String, reply: Option<Outcome<TriageView>> },
}

impl fmt::Display for VoiceTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoiceTurn::Unsupported(notice) | VoiceTurn::Failed(notice) => notice.fmt(f),
            VoiceTurn::Heard { transcript, reply } => {
                write!(f, "You said: {transcript}")?;

                if let Some(reply) = reply {
                    write!(f, "\n{reply}")?;
                }

                Ok(())
            }
        }
    }
}

/// The catbot widget.
#[derive(Clone)]
pub struct Catbot {
    portal: PortalClient,
    voice: VoiceClient,
    classifier: Classifier,
}

impl Catbot {
    pub fn new(portal: PortalClient, voice: VoiceClient) -> Self {
        Self {
            portal,
            voice,
            classifier: Classifier::standard(),
        }
    }

    /// Status shown while `text` is being triaged; `None` when nothing would be sent.
    pub fn pending_notice(text: &str) -> Option<Notice> {
        (!text.trim().is_empty()).then(|| Notice::pending(ANALYZING))
    }

    /// Whether the voice button is usable.
    pub fn voice_supported(&self) -> bool {
        self.voice.is_supported()
    }

    /// Triage a symptom description.
    ///
    /// Blank text is ignored: no request is made and no result is rendered.
    #[instrument(name = "Catbot::send", skip_all)]
    pub async fn send(&self, text: &str) -> Option<Outcome<TriageView>> {
        let text = text.trim();

        let offline = self.classifier.classify(text)?;
        let request = TriageRequest { symptoms_text: text.to_string() };

        let outcome = attempt("Triage", self.portal.triage(&request), TriageView, move || {
            let mut result = offline;
            result.message.push_str(OFFLINE_SUFFIX);
            TriageView(result)
        })
        .await;

        info!(priority = %outcome.view().0.priority, demo = outcome.is_demo(), "Triage complete.");

        Some(outcome)
    }

    /// Capture one utterance and triage it.
    #[instrument(name = "Catbot::listen", skip_all)]
    pub async fn listen(&self) -> VoiceTurn {
        if !self.voice.is_supported() {
            return VoiceTurn::Unsupported(Notice::new(VOICE_UNSUPPORTED, Tone::Neutral));
        }

        info!("{}", LISTENING);

        let transcript = match self.voice.capture().await {
            Ok(transcript) => transcript,
            Err(err) => {
                info!("Voice capture failed: {:#}", err);
                return VoiceTurn::Failed(Notice::error(CAPTURE_FAILED));
            }
        };

        let reply = self.send(&transcript).await;

        VoiceTurn::Heard { transcript, reply }
    }
}
