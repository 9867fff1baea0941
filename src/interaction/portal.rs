//! Patient portal session: sign-in, profile preview, and report upload.
//!
//! The session owns the only mutable client state, the auth token. Each sign-in attempt
//! overwrites it; a failed attempt clears it and locks the upload form again.

use std::{fmt, path::Path};

use tracing::{info, instrument};

use crate::{
    base::{
        demo::{HISTORY_MORE, HISTORY_PREVIEW, PROFILE_ROWS, SIGNED_OUT_PROFILE},
        types::{LoginRequest, LoginResponse, ReportUpload},
    },
    service::portal::PortalClient,
};

use super::{ListItem, Listing, Notice, attempt};

pub const MISSING_CREDENTIALS: &str = "Please enter both email and password.";
pub const SIGNING_IN: &str = "Signing in...";
pub const LOGIN_FAILED: &str = "Login failed. Use valid credentials or connect backend.";
pub const SIGN_IN_TO_UPLOAD: &str = "Sign in to upload reports.";
pub const NO_FILE: &str = "Please select a file first.";
pub const UNREADABLE_FILE: &str = "Could not read the selected file.";
pub const UPLOADING: &str = "Uploading report...";
pub const DEMO_UPLOAD: &str = "Demo: report would be uploaded. Connect backend to enable.";

/// What the portal page shows after a sign-in attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginView {
    pub notice: Notice,
    /// `None` when the attempt was rejected locally and the profile panel is left as it was.
    pub profile: Option<Listing>,
    pub history: Listing,
    pub upload_enabled: bool,
}

impl LoginView {
    fn signed_in(name: &str) -> Self {
        let mut profile = vec![ListItem::new(format!("Name: {name}"))];
        profile.extend(PROFILE_ROWS.iter().map(|(label, value)| ListItem::new(format!("{label}: {value}"))));

        Self {
            notice: Notice::success(format!("Welcome, {name}.")),
            profile: Some(Listing(profile)),
            history: Listing::demo(HISTORY_PREVIEW, HISTORY_MORE),
            upload_enabled: true,
        }
    }

    fn signed_out(notice: Notice) -> Self {
        Self {
            notice,
            profile: Some(Listing(vec![ListItem::muted(SIGNED_OUT_PROFILE)])),
            history: Listing::default(),
            upload_enabled: false,
        }
    }
}

impl fmt::Display for LoginView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.notice)?;

        if let Some(profile) = &self.profile {
            write!(f, "\n{profile}")?;
        }

        if !self.history.items().is_empty() {
            write!(f, "\n\nHistory\n{}", self.history)?;
        }

        Ok(())
    }
}

/// A signed-in (or not) portal session.
#[derive(Clone)]
pub struct PortalSession {
    portal: PortalClient,
    auth_token: Option<String>,
    upload_enabled: bool,
}

impl PortalSession {
    pub fn new(portal: PortalClient) -> Self {
        Self {
            portal,
            auth_token: None,
            upload_enabled: false,
        }
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    pub fn upload_enabled(&self) -> bool {
        self.upload_enabled
    }

    /// Status shown while signing in; `None` when the credentials would be rejected locally.
    pub fn login_pending(email: &str, password: &str) -> Option<Notice> {
        (!email.trim().is_empty() && !password.trim().is_empty()).then(|| Notice::pending(SIGNING_IN))
    }

    /// Status shown while uploading; `None` when nothing would be sent.
    pub fn upload_pending(&self, path: Option<&Path>) -> Option<Notice> {
        (self.upload_enabled && path.and_then(Path::file_name).is_some()).then(|| Notice::pending(UPLOADING))
    }

    /// Sign in.
    ///
    /// Blank credentials are rejected locally without touching the session or the network.
    #[instrument(name = "PortalSession::login", skip_all)]
    pub async fn login(&mut self, email: &str, password: &str) -> LoginView {
        let (email, password) = (email.trim(), password.trim());

        if email.is_empty() || password.is_empty() {
            return LoginView {
                notice: Notice::error(MISSING_CREDENTIALS),
                profile: None,
                history: Listing::default(),
                upload_enabled: self.upload_enabled,
            };
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let response: Option<LoginResponse> = attempt("Login", self.portal.login(&request), Some, || None).await.into_view();

        match response {
            Some(LoginResponse { token, name }) => {
                info!("Signed in.");

                self.auth_token = Some(token);
                self.upload_enabled = true;

                LoginView::signed_in(&name)
            }
            None => {
                self.auth_token = None;
                self.upload_enabled = false;

                LoginView::signed_out(Notice::error(LOGIN_FAILED))
            }
        }
    }

    /// Upload a report file.
    ///
    /// Requires a successful sign-in and a readable file; otherwise nothing is sent.
    #[instrument(name = "PortalSession::upload_report", skip(self))]
    pub async fn upload_report(&self, path: Option<&Path>) -> Notice {
        if !self.upload_enabled {
            return Notice::error(SIGN_IN_TO_UPLOAD);
        }

        let Some(path) = path else {
            return Notice::error(NO_FILE);
        };

        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else {
            return Notice::error(NO_FILE);
        };

        let contents = match tokio::fs::read(path).await {
            Ok(contents) => contents,
            Err(err) => {
                info!("Could not read report: {}", err);
                return Notice::error(UNREADABLE_FILE);
            }
        };

        let upload = ReportUpload { file_name, contents };

        attempt(
            "Report upload",
            self.portal.upload_report(&upload),
            |response| Notice::success(format!("Uploaded: {}", response.filename.as_deref().unwrap_or(&upload.file_name))),
            || Notice::warning(DEMO_UPLOAD),
        )
        .await
        .into_view()
    }
}
