use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

// Triage.

/// Urgency tier of a triage result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

impl Priority {
    /// The action that goes with this tier; `High` always means `Emergency`.
    pub fn action(self) -> SuggestedAction {
        match self {
            Priority::Normal => SuggestedAction::Appointment,
            Priority::High => SuggestedAction::Emergency,
        }
    }
}

/// Recommended next step for the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestedAction {
    Appointment,
    Emergency,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Normal => f.write_str("normal"),
            Priority::High => f.write_str("high"),
        }
    }
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::Appointment => f.write_str("appointment"),
            SuggestedAction::Emergency => f.write_str("emergency"),
        }
    }
}

/// Free-text symptoms sent to the triage endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageRequest {
    pub symptoms_text: String,
}

/// The outcome of a triage, as produced locally or returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageResult {
    pub priority: Priority,
    pub suggested_speciality: String,
    #[serde(rename = "suggest_action")]
    pub suggested_action: SuggestedAction,
    pub message: String,
}

impl TriageResult {
    /// Build a result whose action is derived from `priority`.
    pub fn new(priority: Priority, suggested_speciality: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            priority,
            suggested_speciality: suggested_speciality.into(),
            suggested_action: priority.action(),
            message: message.into(),
        }
    }
}

// Lookups.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QuickStats {
    pub doctors_on_duty: u32,
    pub low_stock_medicines: u32,
    pub upcoming_appointments: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub name: String,
    pub stock: u32,
    pub location: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DoctorQuery {
    pub speciality: Option<String>,
}

impl DoctorQuery {
    /// Build a query, treating a blank speciality as "any".
    pub fn new(speciality: Option<&str>) -> Self {
        let speciality = speciality.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

        Self { speciality }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorAvailability {
    pub doctor_name: String,
    pub speciality: String,
}

// Emergency.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyNotice {
    pub severity: Severity,
    pub note: String,
}

// Portal.

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
}

/// A report file read from disk, ready to be sent as multipart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportUpload {
    pub file_name: String,
    pub contents: Vec<u8>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub filename: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_triage_result_uses_wire_names() {
        let result = TriageResult::new(Priority::High, "Cardiologist", "Go now.");
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            json!({
                "priority": "high",
                "suggested_speciality": "Cardiologist",
                "suggest_action": "emergency",
                "message": "Go now."
            })
        );
    }

    #[test]
    fn test_triage_result_rejects_unknown_priority() {
        let value = json!({
            "priority": "urgent",
            "suggested_speciality": "Cardiologist",
            "suggest_action": "emergency",
            "message": "Go now."
        });

        assert!(serde_json::from_value::<TriageResult>(value).is_err());
    }

    #[test]
    fn test_doctor_query_blank_speciality_is_omitted() {
        let query = DoctorQuery::new(Some("   "));

        assert_eq!(query.speciality, None);
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({}));
    }

    #[test]
    fn test_upload_response_tolerates_missing_filename() {
        let response: UploadResponse = serde_json::from_value(json!({})).unwrap();

        assert_eq!(response.filename, None);
    }
}
