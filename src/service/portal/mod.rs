//! Clients for the portal backend.
//!
//! The backend is an optional collaborator: every call may fail, and callers are expected to
//! fall back to demo content when it does (see [`crate::interaction::attempt`]).

pub mod http;
pub mod offline;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::{
    config::Config,
    types::{DoctorAvailability, DoctorQuery, EmergencyNotice, LoginRequest, LoginResponse, Medicine, QuickStats, ReportUpload, Res, TriageRequest, TriageResult, UploadResponse, Void},
};

// Traits.

/// Generic portal backend trait that clients must implement.
///
/// Any transport failure, non-success status, or undecodable body must surface as an error.
#[async_trait]
pub trait GenericPortalBackend: Send + Sync + 'static {
    /// Fetch the dashboard counters.
    async fn quick_stats(&self) -> Res<QuickStats>;

    /// Search medicines by name.
    async fn search_medicines(&self, query: &str) -> Res<Vec<Medicine>>;

    /// List doctors with open slots, optionally for one speciality.
    async fn doctor_availability(&self, query: &DoctorQuery) -> Res<Vec<DoctorAvailability>>;

    /// Ask the backend to triage a symptom description.
    async fn triage(&self, request: &TriageRequest) -> Res<TriageResult>;

    /// Notify the emergency desk.
    async fn notify_emergency(&self, notice: &EmergencyNotice) -> Void;

    /// Exchange credentials for a session token.
    async fn login(&self, request: &LoginRequest) -> Res<LoginResponse>;

    /// Upload a medical report.
    async fn upload_report(&self, upload: &ReportUpload) -> Res<UploadResponse>;
}

// Structs.

/// Portal client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct PortalClient {
    inner: Arc<dyn GenericPortalBackend>,
}

impl Deref for PortalClient {
    type Target = dyn GenericPortalBackend;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl PortalClient {
    pub fn new(inner: Arc<dyn GenericPortalBackend>) -> Self {
        Self { inner }
    }

    /// Pick the client for the configuration: HTTP when an API base is set, offline otherwise.
    pub fn from_config(config: &Config) -> Res<Self> {
        match &config.api_base {
            Some(api_base) => Self::http(api_base),
            None => Ok(Self::offline()),
        }
    }
}
