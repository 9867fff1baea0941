//! Speech-to-text capture for the catbot.

pub mod command;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::{config::Config, types::Res};

// Traits.

/// Generic voice capture trait that speech-to-text providers must implement.
#[async_trait]
pub trait GenericVoiceCapture: Send + Sync + 'static {
    /// Whether this provider can capture audio at all.
    fn is_supported(&self) -> bool;

    /// Capture one utterance and return its final transcript.
    async fn capture(&self) -> Res<String>;
}

// Structs.

/// Voice client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct VoiceClient {
    inner: Arc<dyn GenericVoiceCapture>,
}

impl Deref for VoiceClient {
    type Target = dyn GenericVoiceCapture;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl VoiceClient {
    pub fn new(inner: Arc<dyn GenericVoiceCapture>) -> Self {
        Self { inner }
    }

    /// Use the configured speech-to-text command, or report voice as unsupported.
    pub fn from_config(config: &Config) -> Self {
        match &config.voice_command {
            Some(program) => Self::command(program, &config.voice_args, &config.voice_language),
            None => Self::unsupported(),
        }
    }

    pub fn unsupported() -> Self {
        Self { inner: Arc::new(UnsupportedVoiceCapture) }
    }
}

/// Used when no speech-to-text provider is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedVoiceCapture;

#[async_trait]
impl GenericVoiceCapture for UnsupportedVoiceCapture {
    fn is_supported(&self) -> bool {
        false
    }

    async fn capture(&self) -> Res<String> {
        Err(anyhow::anyhow!("voice capture is not supported"))
    }
}
