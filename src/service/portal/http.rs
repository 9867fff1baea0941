//! HTTP implementation of the portal backend.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{
    Client, Url,
    multipart::{Form, Part},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::base::types::{DoctorAvailability, DoctorQuery, EmergencyNotice, LoginRequest, LoginResponse, Medicine, QuickStats, ReportUpload, Res, TriageRequest, TriageResult, UploadResponse, Void};

use super::{GenericPortalBackend, PortalClient};

// Extra methods on `PortalClient` applied by the HTTP implementation.

impl PortalClient {
    pub fn http(api_base: &str) -> Res<Self> {
        let client = HttpPortalBackend::new(api_base)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Specific implementations.

/// Talks to the portal API over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPortalBackend {
    client: Client,
    api_base: String,
}

impl HttpPortalBackend {
    /// Create a new HTTP backend rooted at `api_base` (e.g. `http://localhost:8080/api`).
    #[instrument(name = "HttpPortalBackend::new", skip_all)]
    pub fn new(api_base: &str) -> Res<Self> {
        Url::parse(api_base)?;

        Ok(Self {
            client: Client::builder().build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    async fn get_json<Q, T>(&self, path: &str, query: &Q) -> Res<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.client.get(url).query(query).send().await?.error_for_status()?;

        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Res<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("POST {}", url);

        let response = self.client.post(url).json(body).send().await?.error_for_status()?;

        Ok(response.json().await?)
    }
}

#[async_trait]
impl GenericPortalBackend for HttpPortalBackend {
    #[instrument(skip_all)]
    async fn quick_stats(&self) -> Res<QuickStats> {
        let no_query: &[(&str, &str)] = &[];
        self.get_json("stats/overview", no_query).await
    }

    #[instrument(skip_all)]
    async fn search_medicines(&self, query: &str) -> Res<Vec<Medicine>> {
        self.get_json("medicines/search", &[("q", query)]).await
    }

    #[instrument(skip_all)]
    async fn doctor_availability(&self, query: &DoctorQuery) -> Res<Vec<DoctorAvailability>> {
        self.get_json("doctors/availability", query).await
    }

    #[instrument(skip_all)]
    async fn triage(&self, request: &TriageRequest) -> Res<TriageResult> {
        self.post_json("catbot/triage", request).await
    }

    #[instrument(skip_all)]
    async fn notify_emergency(&self, notice: &EmergencyNotice) -> Void {
        let url = self.url("emergency");
        debug!("POST {}", url);

        // Any 2xx will do; the body is not needed.
        self.client.post(url).json(notice).send().await?.error_for_status()?;

        Ok(())
    }

    #[instrument(skip_all)]
    async fn login(&self, request: &LoginRequest) -> Res<LoginResponse> {
        self.post_json("auth/login", request).await
    }

    #[instrument(skip_all, fields(file_name = %upload.file_name))]
    async fn upload_report(&self, upload: &ReportUpload) -> Res<UploadResponse> {
        let url = self.url("reports/upload");
        debug!("POST {}", url);

        let part = Part::bytes(upload.contents.clone()).file_name(upload.file_name.clone());
        let form = Form::new().part("file", part);

        let response = self.client.post(url).multipart(form).send().await?.error_for_status()?;

        Ok(response.json().await?)
    }
}
