//! Load configuration via `config` crate with env-override support.

use std::{net::SocketAddr, ops::Deref, path::PathBuf, sync::Arc};

use serde::Deserialize;

use super::types::Res;

/// Default address for the demo backend.
fn default_server_addr() -> String {
    "0.0.0.0:8080".to_string()
}

/// Default directory for uploaded reports.
fn default_upload_dir() -> PathBuf {
    PathBuf::from(".hidden/uploads")
}

/// Default demo account email.
fn default_demo_account_email() -> String {
    "patient@clinic.example".to_string()
}

/// Default demo account password.
fn default_demo_account_password() -> String {
    "demo".to_string()
}

/// Default demo account display name.
fn default_demo_account_name() -> String {
    "Demo Patient".to_string()
}

/// Default speech recognition language.
fn default_voice_language() -> String {
    "en-IN".to_string()
}

/// Default stock level below which a medicine counts as low stock.
fn default_low_stock_threshold() -> u32 {
    50
}

/// Configuration for the clinic portal.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { inner: Arc::new(ConfigInner::default()) }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ConfigInner {
    /// Base URL of the portal API, e.g. `http://localhost:8080/api` (`API_BASE`).
    /// When unset, every widget shows its demo content.
    #[serde(default)]
    pub api_base: Option<String>,
    /// Address the demo backend listens on (`SERVER_ADDR`).
    #[serde(default = "default_server_addr")]
    pub server_addr: String,
    /// Directory where the demo backend stores uploaded reports (`UPLOAD_DIR`).
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    /// Email accepted by the demo backend's login (`DEMO_ACCOUNT_EMAIL`).
    #[serde(default = "default_demo_account_email")]
    pub demo_account_email: String,
    /// Password accepted by the demo backend's login (`DEMO_ACCOUNT_PASSWORD`).
    #[serde(default = "default_demo_account_password")]
    pub demo_account_password: String,
    /// Name returned by the demo backend's login (`DEMO_ACCOUNT_NAME`).
    #[serde(default = "default_demo_account_name")]
    pub demo_account_name: String,
    /// Speech-to-text program that prints a transcript on stdout (`VOICE_COMMAND`).
    /// Voice input is reported as unsupported when unset.
    #[serde(default)]
    pub voice_command: Option<String>,
    /// Extra arguments passed to the speech-to-text program (`VOICE_ARGS`, space separated).
    #[serde(default)]
    pub voice_args: Vec<String>,
    /// Language hint exported to the speech-to-text program as `VOICE_LANG` (`VOICE_LANGUAGE`).
    #[serde(default = "default_voice_language")]
    pub voice_language: String,
    /// Stock level below which the demo backend counts a medicine as low (`LOW_STOCK_THRESHOLD`).
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            api_base: None,
            server_addr: default_server_addr(),
            upload_dir: default_upload_dir(),
            demo_account_email: default_demo_account_email(),
            demo_account_password: default_demo_account_password(),
            demo_account_name: default_demo_account_name(),
            voice_command: None,
            voice_args: Vec::new(),
            voice_language: default_voice_language(),
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let env = config::Environment::default()
            .prefix("CLINIC_PORTAL")
            .try_parsing(true)
            .list_separator(" ")
            .with_list_parse_key("voice_args");

        let mut cfg = config::Config::builder().add_source(env);

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Check values that `serde` cannot.
    pub fn validate(&self) -> Res<()> {
        if let Some(api_base) = &self.api_base {
            let url = reqwest::Url::parse(api_base).map_err(|e| anyhow::anyhow!("Invalid API base `{api_base}`: {e}."))?;

            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(anyhow::anyhow!("API base must use http or https."));
            }
        }

        self.server_addr
            .parse::<SocketAddr>()
            .map_err(|e| anyhow::anyhow!("Invalid server address `{}`: {e}.", self.server_addr))?;

        if self.demo_account_email.trim().is_empty() || self.demo_account_password.trim().is_empty() {
            return Err(anyhow::anyhow!("Demo account email and password must not be empty."));
        }

        if matches!(&self.voice_command, Some(c) if c.trim().is_empty()) {
            return Err(anyhow::anyhow!("Voice command must not be blank; leave it unset to disable voice input."));
        }

        Ok(())
    }
}
