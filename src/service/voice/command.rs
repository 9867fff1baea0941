//! Voice capture through an external speech-to-text program.
//!
//! The program records one utterance and prints the transcript on stdout. Only the first
//! non-empty line is used. The language hint is exported as `VOICE_LANG`.

use std::{process::Stdio, sync::Arc};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::base::types::Res;

use super::{GenericVoiceCapture, VoiceClient};

impl VoiceClient {
    pub fn command(program: &str, args: &[String], language: &str) -> Self {
        let capture = CommandVoiceCapture::new(program, args, language);
        Self { inner: Arc::new(capture) }
    }
}

/// Runs a speech-to-text program per capture.
#[derive(Debug, Clone)]
pub struct CommandVoiceCapture {
    program: String,
    args: Vec<String>,
    language: String,
}

impl CommandVoiceCapture {
    pub fn new(program: &str, args: &[String], language: &str) -> Self {
        Self {
            program: program.to_string(),
            args: args.to_vec(),
            language: language.to_string(),
        }
    }
}

#[async_trait]
impl GenericVoiceCapture for CommandVoiceCapture {
    fn is_supported(&self) -> bool {
        true
    }

    #[instrument(name = "CommandVoiceCapture::capture", skip_all, fields(program = %self.program))]
    async fn capture(&self) -> Res<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .env("VOICE_LANG", &self.language)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(anyhow::anyhow!("speech-to-text exited with {}", output.status));
        }

        let stdout = String::from_utf8(output.stdout)?;
        let transcript = stdout.lines().map(str::trim).find(|l| !l.is_empty()).ok_or_else(|| anyhow::anyhow!("no speech detected"))?;

        debug!("Captured {} characters of speech.", transcript.len());

        Ok(transcript.to_string())
    }
}
