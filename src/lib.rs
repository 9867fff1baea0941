//! Library root for `clinic-portal`.
//!
//! Clinic-portal is the client side of a small clinic/hospital portal:
//! - Look up medicine stock and doctor availability
//! - Triage symptom descriptions, typed or spoken, into an urgency tier
//! - Notify the emergency desk
//! - Sign in, preview the patient profile, and upload reports
//!
//! Every backend call is optional. When the backend cannot be reached, each widget shows
//! static demo content instead, and the catbot answers from the same keyword rules the demo
//! backend (`clinic-portal serve`) uses.

pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use rustls::crypto;
use tracing::{debug, info};

pub use runtime::Command;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and runs one command:
/// - Initializes the crypto provider
/// - Creates the runtime context with the portal and voice clients
/// - Runs the command, or the interactive shell
pub async fn start(config: Config, command: Command) -> Void {
    info!("Starting clinic-portal ...");

    // Start the crypto provider.
    if crypto::ring::default_provider().install_default().is_err() {
        debug!("Crypto provider already installed.");
    }

    // Initialize the runtime.
    let mut runtime = runtime::Runtime::new(config)?;

    // Run the command.
    if command == Command::Shell {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        return runtime.shell(stdin, tokio::io::stdout()).await;
    }

    let output = runtime.execute(command).await?;

    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
