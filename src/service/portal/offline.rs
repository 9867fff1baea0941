//! Backend stand-in used when no API base is configured.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::base::types::{DoctorAvailability, DoctorQuery, EmergencyNotice, LoginRequest, LoginResponse, Medicine, QuickStats, ReportUpload, Res, TriageRequest, TriageResult, UploadResponse, Void};

use super::{GenericPortalBackend, PortalClient};

impl PortalClient {
    pub fn offline() -> Self {
        Self { inner: Arc::new(OfflinePortalBackend) }
    }
}

/// Fails every call, sending each widget to its demo content.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflinePortalBackend;

impl OfflinePortalBackend {
    fn unavailable<T>(call: &str) -> Res<T> {
        debug!("No backend configured for `{}`.", call);
        Err(anyhow::anyhow!("no backend configured"))
    }
}

#[async_trait]
impl GenericPortalBackend for OfflinePortalBackend {
    async fn quick_stats(&self) -> Res<QuickStats> {
        Self::unavailable("quick_stats")
    }

    async fn search_medicines(&self, _query: &str) -> Res<Vec<Medicine>> {
        Self::unavailable("search_medicines")
    }

    async fn doctor_availability(&self, _query: &DoctorQuery) -> Res<Vec<DoctorAvailability>> {
        Self::unavailable("doctor_availability")
    }

    async fn triage(&self, _request: &TriageRequest) -> Res<TriageResult> {
        Self::unavailable("triage")
    }

    async fn notify_emergency(&self, _notice: &EmergencyNotice) -> Void {
        Self::unavailable("notify_emergency")
    }

    async fn login(&self, _request: &LoginRequest) -> Res<LoginResponse> {
        Self::unavailable("login")
    }

    async fn upload_report(&self, _upload: &ReportUpload) -> Res<UploadResponse> {
        Self::unavailable("upload_report")
    }
}
