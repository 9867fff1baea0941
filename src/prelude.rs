pub use crate::base::{
    config::Config,
    triage::{Classifier, classify},
    types::{Err, Priority, Res, SuggestedAction, TriageResult, Void},
};
pub use crate::interaction::{Notice, Outcome, attempt};
pub use crate::service::{portal::PortalClient, voice::VoiceClient};
pub use anyhow::anyhow;
pub use tracing::{debug, error, info, instrument, warn};
