//! Runtime services and shared state for the clinic portal.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::instrument;

use crate::{
    base::{
        config::Config,
        demo::SPECIALITIES,
        types::{Res, Void},
    },
    interaction::{
        Notice,
        catbot::Catbot,
        contact::ContactForm,
        doctors::check_doctors,
        emergency::{self, notify_emergency},
        medicine::check_medicine,
        portal::PortalSession,
        stats::load_quick_stats,
    },
    service::{portal::PortalClient, server, voice::VoiceClient},
};

/// Portal actions, shared by the command line and the interactive shell.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the demo backend.
    Serve,
    /// Show the dashboard counters.
    Stats,
    /// Check a medicine's stock.
    Medicine {
        /// Medicine name, or part of it.
        #[arg(num_args = 1.., trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// List doctors with open slots.
    Doctors {
        /// Only this speciality.
        #[arg(short, long)]
        speciality: Option<String>,
        /// Print the known specialities instead.
        #[arg(long)]
        list: bool,
    },
    /// Describe symptoms to the triage catbot.
    Triage {
        #[arg(num_args = 1.., trailing_var_arg = true)]
        symptoms: Vec<String>,
    },
    /// Speak symptoms to the triage catbot.
    Listen,
    /// Notify the emergency desk.
    Emergency {
        /// What happened.
        #[arg(short, long)]
        note: Option<String>,
    },
    /// Sign in to the patient portal.
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Upload a report (signs in first when credentials are given).
    Upload {
        /// The report file.
        file: Option<PathBuf>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Send a message to support.
    Contact {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        message: String,
    },
    /// Interactive session that keeps you signed in between commands.
    Shell,
}

pub const UNBALANCED_QUOTES: &str = "Unbalanced quotes; close every quote and try again.";

/// Put the in-flight status, if any, above the final rendering.
fn with_pending(pending: Option<Notice>, rendered: String) -> String {
    match pending {
        Some(pending) if !rendered.is_empty() => format!("{pending}\n{rendered}"),
        _ => rendered,
    }
}

/// A line typed into the shell.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

/// Runtime service context.
///
/// Holds the configuration, the clients, and the widgets. Cloning is cheap, but each clone
/// carries its own portal session.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The portal backend client.
    pub portal: PortalClient,
    /// The triage catbot.
    pub catbot: Catbot,
    /// The portal session (auth token, upload access).
    pub session: PortalSession,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        let portal = PortalClient::from_config(&config)?;
        let voice = VoiceClient::from_config(&config);

        Ok(Self::with_clients(config, portal, voice))
    }

    /// Create a runtime around existing clients.
    pub fn with_clients(config: Config, portal: PortalClient, voice: VoiceClient) -> Self {
        Self {
            catbot: Catbot::new(portal.clone(), voice),
            session: PortalSession::new(portal.clone()),
            config,
            portal,
        }
    }

    /// Run one command and return what it renders; an empty string means nothing to show.
    #[instrument(skip_all)]
    pub async fn execute(&mut self, command: Command) -> Res<String> {
        let output = match command {
            Command::Serve => {
                server::serve(self.config.clone()).await?;
                String::new()
            }
            Command::Stats => load_quick_stats(&self.portal).await.to_string(),
            Command::Medicine { query } => check_medicine(&self.portal, &query.join(" ")).await.map(|o| o.to_string()).unwrap_or_default(),
            Command::Doctors { list: true, .. } => SPECIALITIES.join("\n"),
            Command::Doctors { speciality, .. } => check_doctors(&self.portal, speciality.as_deref()).await.to_string(),
            Command::Triage { symptoms } => {
                let text = symptoms.join(" ");
                let reply = self.catbot.send(&text).await.map(|o| o.to_string()).unwrap_or_default();

                with_pending(Catbot::pending_notice(&text), reply)
            }
            Command::Listen => self.catbot.listen().await.to_string(),
            Command::Emergency { note } => {
                let notice = notify_emergency(&self.portal, note.as_deref()).await;

                with_pending(Some(emergency::pending_notice()), notice.to_string())
            }
            Command::Login { email, password } => {
                let pending = PortalSession::login_pending(&email, &password);
                let view = self.session.login(&email, &password).await;

                with_pending(pending, view.to_string())
            }
            Command::Upload { file, email, password } => {
                let mut lines = Vec::new();

                if email.is_some() || password.is_some() {
                    let (email, password) = (email.unwrap_or_default(), password.unwrap_or_default());

                    let pending = PortalSession::login_pending(&email, &password);
                    let view = self.session.login(&email, &password).await;
                    lines.push(with_pending(pending, view.notice.to_string()));
                }

                let pending = self.session.upload_pending(file.as_deref());
                let notice = self.session.upload_report(file.as_deref()).await;
                lines.push(with_pending(pending, notice.to_string()));

                lines.join("\n")
            }
            Command::Contact { name, email, message } => ContactForm::new(name, email, message).submit().to_string(),
            Command::Shell => "Already in the shell.".to_string(),
        };

        Ok(output)
    }

    /// Read commands line by line until EOF or `exit`, writing each rendering to `output`.
    pub async fn shell<R, W>(&mut self, input: R, mut output: W) -> Void
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        output.write_all(b"> ").await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();

            if line == "exit" || line == "quit" {
                break;
            }

            let rendered = if line.is_empty() {
                String::new()
            } else {
                match shlex::split(line).map(|words| ShellLine::try_parse_from(words)) {
                    None => UNBALANCED_QUOTES.to_string(),
                    Some(Ok(ShellLine { command: Command::Serve | Command::Shell })) => "Not available inside the shell.".to_string(),
                    Some(Ok(ShellLine { command })) => self.execute(command).await?,
                    Some(Err(err)) => err.render().to_string(),
                }
            };

            if !rendered.is_empty() {
                output.write_all(rendered.trim_end().as_bytes()).await?;
                output.write_all(b"\n").await?;
            }

            output.write_all(b"> ").await?;
            output.flush().await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_runtime() -> Runtime {
        Runtime::with_clients(Config::default(), PortalClient::offline(), VoiceClient::unsupported())
    }

    async fn run_shell(script: &str) -> String {
        let mut runtime = offline_runtime();
        let mut output = Vec::new();

        runtime.shell(script.as_bytes(), &mut output).await.unwrap();

        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_execute_triage_offline() {
        let mut runtime = offline_runtime();
        let output = runtime
            .execute(Command::Triage {
                symptoms: vec!["trouble".into(), "catching".into(), "my".into(), "breath".into()],
            })
            .await
            .unwrap();

        assert!(output.contains("Priority: high"));
        assert!(output.contains("[Demo offline mode]"));
    }

    #[tokio::test]
    async fn test_execute_lists_specialities() {
        let output = offline_runtime().execute(Command::Doctors { speciality: None, list: true }).await.unwrap();

        assert!(output.lines().any(|l| l == "Cardiologist"));
    }

    #[tokio::test]
    async fn test_shell_runs_commands_and_stops_on_exit() {
        let output = run_shell("stats\nmedicine aspirin\nexit\ntriage chest pain\n").await;

        assert!(output.contains("Doctors on duty: 5"));
        assert!(output.contains("Paracetamol 500mg — Stock: 125 (Pharmacy A)"));
        assert!(!output.contains("Priority"));
    }

    #[tokio::test]
    async fn test_shell_honours_quoted_arguments() {
        let output = run_shell("contact -n Asha -e asha@clinic.in -m \"Need help with my bill\"\n").await;

        assert!(output.contains("Thanks — your message has been recorded (demo)."));
    }

    #[tokio::test]
    async fn test_shell_reports_unbalanced_quotes() {
        let output = run_shell("emergency --note \"fell down\n").await;

        assert!(output.contains(UNBALANCED_QUOTES));
        assert!(!output.contains("Notifying"));
    }

    #[tokio::test]
    async fn test_pending_statuses_precede_results() {
        let mut runtime = offline_runtime();

        let triage = runtime.execute(Command::Triage { symptoms: vec!["mild".into(), "cough".into()] }).await.unwrap();
        assert!(triage.starts_with("Analyzing symptoms...\n"));

        let login = runtime
            .execute(Command::Login {
                email: "asha@clinic.in".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert!(login.starts_with("Signing in...\nLogin failed."));
    }

    #[tokio::test]
    async fn test_no_pending_status_when_nothing_is_sent() {
        let mut runtime = offline_runtime();

        let triage = runtime.execute(Command::Triage { symptoms: vec!["  ".into()] }).await.unwrap();
        assert_eq!(triage, "");

        let login = runtime
            .execute(Command::Login {
                email: "asha@clinic.in".into(),
                password: " ".into(),
            })
            .await
            .unwrap();
        assert!(login.starts_with("Please enter both email and password."));

        let upload = runtime.execute(Command::Upload { file: None, email: None, password: None }).await.unwrap();
        assert_eq!(upload, "Sign in to upload reports.");
    }

    #[tokio::test]
    async fn test_shell_reports_unknown_commands() {
        let output = run_shell("dance\n").await;

        assert!(output.contains("unrecognized subcommand"));
    }

    #[tokio::test]
    async fn test_shell_refuses_nested_server() {
        let output = run_shell("serve\n").await;

        assert!(output.contains("Not available inside the shell."));
    }
}
