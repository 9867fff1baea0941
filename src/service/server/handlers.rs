use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::base::{
    demo::{CATALOGUE, DEMO_STATS, ROSTER},
    types::{DoctorAvailability, DoctorQuery, EmergencyNotice, LoginRequest, LoginResponse, Medicine, QuickStats, TriageRequest, TriageResult, UploadResponse},
};

use super::{AppState, EmergencyRecord};

type Reply<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Debug, Serialize)]
pub struct Health {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
pub struct MedicineSearch {
    #[serde(default)]
    pub q: String,
}

pub async fn health() -> Json<Health> {
    Json(Health { ok: true })
}

#[instrument(skip_all)]
pub async fn quick_stats(State(state): State<AppState>) -> Json<QuickStats> {
    let low_stock = CATALOGUE.iter().filter(|(_, stock, _)| *stock < state.config.low_stock_threshold).count();

    Json(QuickStats {
        doctors_on_duty: ROSTER.len() as u32,
        low_stock_medicines: low_stock as u32,
        upcoming_appointments: DEMO_STATS.upcoming_appointments,
    })
}

#[instrument(skip_all)]
pub async fn search_medicines(Query(search): Query<MedicineSearch>) -> Json<Vec<Medicine>> {
    let needle = search.q.trim().to_lowercase();

    let found = CATALOGUE
        .iter()
        .filter(|(name, _, _)| !needle.is_empty() && name.to_lowercase().contains(&needle))
        .map(|(name, stock, location)| Medicine {
            name: name.to_string(),
            stock: *stock,
            location: location.to_string(),
        })
        .collect();

    Json(found)
}

#[instrument(skip_all)]
pub async fn doctor_availability(Query(query): Query<DoctorQuery>) -> Json<Vec<DoctorAvailability>> {
    let query = DoctorQuery::new(query.speciality.as_deref());

    let found = ROSTER
        .iter()
        .filter(|(_, speciality)| query.speciality.as_deref().is_none_or(|s| s.eq_ignore_ascii_case(speciality)))
        .map(|(name, speciality)| DoctorAvailability {
            doctor_name: name.to_string(),
            speciality: speciality.to_string(),
        })
        .collect();

    Json(found)
}

#[instrument(skip_all)]
pub async fn triage(State(state): State<AppState>, Json(request): Json<TriageRequest>) -> Reply<TriageResult> {
    let result = state
        .classifier
        .classify(&request.symptoms_text)
        .ok_or_else(|| (StatusCode::BAD_REQUEST, "symptoms_text must not be empty".to_string()))?;

    info!(priority = %result.priority, "Triaged request.");

    Ok(Json(result))
}

#[instrument(skip_all)]
pub async fn emergency(State(state): State<AppState>, Json(notice): Json<EmergencyNotice>) -> StatusCode {
    warn!(severity = ?notice.severity, note = %notice.note, "Emergency reported.");

    state
        .record_emergency(EmergencyRecord {
            severity: notice.severity,
            note: notice.note,
            received_at: Utc::now(),
        })
        .await;

    StatusCode::ACCEPTED
}

#[instrument(skip_all)]
pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Reply<LoginResponse> {
    let config = &state.config;

    if !request.email.trim().eq_ignore_ascii_case(config.demo_account_email.trim()) || request.password != config.demo_account_password {
        return Err((StatusCode::UNAUTHORIZED, "invalid credentials".to_string()));
    }

    Ok(Json(LoginResponse {
        token: uuid::Uuid::new_v4().to_string(),
        name: config.demo_account_name.clone(),
    }))
}

#[instrument(skip_all)]
pub async fn upload_report(State(state): State<AppState>, mut multipart: Multipart) -> Reply<UploadResponse> {
    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().and_then(sanitize_file_name).ok_or_else(|| (StatusCode::BAD_REQUEST, "file name is missing".to_string()))?;
        let contents = field.bytes().await.map_err(bad_request)?;

        let dir = &state.config.upload_dir;
        tokio::fs::create_dir_all(dir).await.map_err(internal)?;
        tokio::fs::write(dir.join(&file_name), &contents).await.map_err(internal)?;

        info!(file_name = %file_name, bytes = contents.len(), "Stored report.");

        return Ok(Json(UploadResponse { filename: Some(file_name) }));
    }

    Err((StatusCode::BAD_REQUEST, "missing `file` field".to_string()))
}

/// Keep only the final path component, and refuse names that would escape the upload directory.
fn sanitize_file_name(name: &str) -> Option<String> {
    let name = name.rsplit(['/', '\\']).next()?.trim();

    if name.is_empty() || name == "." || name == ".." {
        return None;
    }

    Some(name.to_string())
}

fn bad_request(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn internal(err: impl std::fmt::Display) -> (StatusCode, String) {
    warn!("Upload failed: {}", err);
    (StatusCode::INTERNAL_SERVER_ERROR, "could not store report".to_string())
}
