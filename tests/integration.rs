#![cfg(test)]

use std::{path::Path, sync::Arc};

use async_trait::async_trait;
use clinic_portal::{
    base::{
        demo::OFFLINE_SUFFIX,
        triage::classify,
        types::{
            DoctorAvailability, DoctorQuery, EmergencyNotice, LoginRequest, LoginResponse, Medicine, Priority, QuickStats, ReportUpload, Res, Severity, SuggestedAction,
            TriageRequest, TriageResult, UploadResponse, Void,
        },
    },
    interaction::{
        Tone,
        catbot::Catbot,
        doctors::check_doctors,
        emergency::{DEFAULT_NOTE, FORWARDED, notify_emergency},
        medicine::check_medicine,
        portal::{LOGIN_FAILED, MISSING_CREDENTIALS, NO_FILE, PortalSession},
        stats::load_quick_stats,
    },
    service::{
        portal::{GenericPortalBackend, PortalClient},
        voice::VoiceClient,
    },
};
use mockall::mock;

// Mocks.

// Mock portal backend for testing.

mock! {
    pub Portal {}

    #[async_trait]
    impl GenericPortalBackend for Portal {
        async fn quick_stats(&self) -> Res<QuickStats>;
        async fn search_medicines(&self, query: &str) -> Res<Vec<Medicine>>;
        async fn doctor_availability(&self, query: &DoctorQuery) -> Res<Vec<DoctorAvailability>>;
        async fn triage(&self, request: &TriageRequest) -> Res<TriageResult>;
        async fn notify_emergency(&self, notice: &EmergencyNotice) -> Void;
        async fn login(&self, request: &LoginRequest) -> Res<LoginResponse>;
        async fn upload_report(&self, upload: &ReportUpload) -> Res<UploadResponse>;
    }
}

fn client(mock: MockPortal) -> PortalClient {
    PortalClient::new(Arc::new(mock))
}

fn network_error<T>() -> Res<T> {
    Err(anyhow::anyhow!("connection refused"))
}

fn signed_in_mock() -> MockPortal {
    let mut mock = MockPortal::new();

    mock.expect_login().returning(|_| {
        Ok(LoginResponse {
            token: "tok-123".to_string(),
            name: "Asha".to_string(),
        })
    });

    mock
}

// Lookups.

#[tokio::test]
async fn test_failed_medicine_lookup_shows_static_fallback() {
    let mut mock = MockPortal::new();
    mock.expect_search_medicines().times(1).returning(|_| network_error());

    let outcome = check_medicine(&client(mock), "paracetamol").await.unwrap();

    assert!(outcome.is_demo());
    assert_eq!(outcome.view().items().len(), 3);
    assert_eq!(outcome.view().items()[0].text, "Paracetamol 500mg — Stock: 125 (Pharmacy A)");
}

#[tokio::test]
async fn test_medicine_lookup_sends_trimmed_query_and_renders_rows() {
    let mut mock = MockPortal::new();
    mock.expect_search_medicines().withf(|q| q == "ibuprofen").times(1).returning(|_| {
        Ok(vec![Medicine {
            name: "Ibuprofen 400mg".to_string(),
            stock: 18,
            location: "Pharmacy B".to_string(),
        }])
    });

    let outcome = check_medicine(&client(mock), "  ibuprofen ").await.unwrap();

    assert!(!outcome.is_demo());
    assert_eq!(outcome.view().texts(), vec!["Ibuprofen 400mg — Stock: 18 (Location: Pharmacy B)"]);
}

#[tokio::test]
async fn test_blank_medicine_query_makes_no_call() {
    let mut mock = MockPortal::new();
    mock.expect_search_medicines().never();

    assert!(check_medicine(&client(mock), "").await.is_none());
}

#[tokio::test]
async fn test_doctor_lookup_omits_blank_speciality() {
    let mut mock = MockPortal::new();
    mock.expect_doctor_availability()
        .withf(|q| q.speciality.is_none())
        .times(1)
        .returning(|_| Ok(vec![]));

    let outcome = check_doctors(&client(mock), Some("")).await;

    assert!(!outcome.is_demo());
    assert_eq!(outcome.view().texts(), vec!["No doctors found for the selected criteria."]);
}

#[tokio::test]
async fn test_failed_doctor_lookup_shows_static_fallback() {
    let mut mock = MockPortal::new();
    mock.expect_doctor_availability().returning(|_| network_error());

    let outcome = check_doctors(&client(mock), Some("Cardiologist")).await;

    assert!(outcome.is_demo());
    assert!(outcome.view().items()[2].muted);
}

#[tokio::test]
async fn test_quick_stats_live_and_fallback() {
    let mut live = MockPortal::new();
    live.expect_quick_stats().returning(|| {
        Ok(QuickStats {
            doctors_on_duty: 9,
            low_stock_medicines: 1,
            upcoming_appointments: 12,
        })
    });

    let outcome = load_quick_stats(&client(live)).await;
    assert!(!outcome.is_demo());
    assert_eq!(outcome.view().0.doctors_on_duty, 9);

    let mut down = MockPortal::new();
    down.expect_quick_stats().returning(network_error);

    let outcome = load_quick_stats(&client(down)).await;
    assert!(outcome.is_demo());
    assert_eq!(outcome.view().0.doctors_on_duty, 5);
}

// Catbot.

#[tokio::test]
async fn test_catbot_shows_backend_result_unchanged() {
    let mut mock = MockPortal::new();
    mock.expect_triage()
        .withf(|r| r.symptoms_text == "itchy rash")
        .times(1)
        .returning(|_| Ok(TriageResult::new(Priority::Normal, "Dermatologist", "Book a skin check.")));

    let catbot = Catbot::new(client(mock), VoiceClient::unsupported());
    let outcome = catbot.send(" itchy rash ").await.unwrap();

    assert!(!outcome.is_demo());
    assert_eq!(outcome.view().0.suggested_speciality, "Dermatologist");
    assert_eq!(outcome.view().0.message, "Book a skin check.");
}

#[tokio::test]
async fn test_catbot_falls_back_to_local_rules() {
    let mut mock = MockPortal::new();
    mock.expect_triage().returning(|_| network_error());

    let catbot = Catbot::new(client(mock), VoiceClient::unsupported());
    let outcome = catbot.send("He is unconscious").await.unwrap();
    let local = classify("He is unconscious").unwrap();

    assert!(outcome.is_demo());
    assert_eq!(outcome.view().0.priority, Priority::High);
    assert_eq!(outcome.view().0.suggested_action, SuggestedAction::Emergency);
    assert_eq!(outcome.view().0.message, format!("{}{}", local.message, OFFLINE_SUFFIX));
}

#[tokio::test]
async fn test_catbot_ignores_blank_text() {
    let mut mock = MockPortal::new();
    mock.expect_triage().never();

    let catbot = Catbot::new(client(mock), VoiceClient::unsupported());

    assert!(catbot.send("   ").await.is_none());
}

// Emergency.

#[tokio::test]
async fn test_emergency_sends_high_severity_with_default_note() {
    let mut mock = MockPortal::new();
    mock.expect_notify_emergency()
        .withf(|n| n.severity == Severity::High && n.note == DEFAULT_NOTE)
        .times(1)
        .returning(|_| Ok(()));

    let outcome = notify_emergency(&client(mock), Some("  ")).await;

    assert!(!outcome.is_demo());
    assert_eq!(outcome.view().text, FORWARDED);
    assert_eq!(outcome.view().tone, Tone::Alert);
}

// Portal.

#[tokio::test]
async fn test_login_with_empty_password_makes_no_call() {
    let mut mock = MockPortal::new();
    mock.expect_login().never();

    let mut session = PortalSession::new(client(mock));
    let view = session.login("asha@clinic.in", "").await;

    assert_eq!(view.notice.text, MISSING_CREDENTIALS);
    assert_eq!(view.notice.tone, Tone::Error);
    assert_eq!(session.auth_token(), None);
}

#[tokio::test]
async fn test_login_stores_token_and_unlocks_upload() {
    let mut session = PortalSession::new(client(signed_in_mock()));
    let view = session.login(" asha@clinic.in ", "secret").await;

    assert_eq!(view.notice.text, "Welcome, Asha.");
    assert!(view.upload_enabled);
    assert_eq!(view.profile.as_ref().unwrap().items()[0].text, "Name: Asha");
    assert_eq!(view.history.items().len(), 3);
    assert_eq!(session.auth_token(), Some("tok-123"));
    assert!(session.upload_enabled());
}

#[tokio::test]
async fn test_blank_resubmission_keeps_existing_session() {
    let mut mock = MockPortal::new();
    mock.expect_login().times(1).returning(|_| {
        Ok(LoginResponse {
            token: "tok-123".to_string(),
            name: "Asha".to_string(),
        })
    });

    let mut session = PortalSession::new(client(mock));
    session.login("asha@clinic.in", "secret").await;

    let view = session.login("asha@clinic.in", "").await;

    assert_eq!(view.to_string(), MISSING_CREDENTIALS);
    assert_eq!(view.profile, None);
    assert!(view.upload_enabled);
    assert_eq!(session.auth_token(), Some("tok-123"));
    assert!(session.upload_enabled());
}

#[tokio::test]
async fn test_failed_login_clears_previous_session() {
    let mut mock = MockPortal::new();
    let mut calls = 0;
    mock.expect_login().times(2).returning(move |_| {
        calls += 1;
        if calls == 1 {
            Ok(LoginResponse {
                token: "tok-1".to_string(),
                name: "Asha".to_string(),
            })
        } else {
            network_error()
        }
    });

    let mut session = PortalSession::new(client(mock));
    session.login("asha@clinic.in", "secret").await;
    assert!(session.auth_token().is_some());

    let view = session.login("asha@clinic.in", "wrong").await;

    assert_eq!(view.notice.text, LOGIN_FAILED);
    assert!(!view.upload_enabled);
    assert_eq!(session.auth_token(), None);
    assert!(!session.upload_enabled());
}

#[tokio::test]
async fn test_upload_without_file_makes_no_call() {
    let mut mock = signed_in_mock();
    mock.expect_upload_report().never();

    let mut session = PortalSession::new(client(mock));
    session.login("asha@clinic.in", "secret").await;

    assert_eq!(session.upload_report(None).await.text, NO_FILE);
}

#[tokio::test]
async fn test_upload_uses_server_name_then_local_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blood-test.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();

    let mut mock = signed_in_mock();
    let mut calls = 0;
    mock.expect_upload_report()
        .withf(|u| u.file_name == "blood-test.pdf" && u.contents == b"%PDF-1.4")
        .times(2)
        .returning(move |_| {
            calls += 1;
            let filename = (calls == 1).then(|| "r-001.pdf".to_string());
            Ok(UploadResponse { filename })
        });

    let mut session = PortalSession::new(client(mock));
    session.login("asha@clinic.in", "secret").await;

    let first = session.upload_report(Some(path.as_path())).await;
    assert_eq!(first.text, "Uploaded: r-001.pdf");
    assert_eq!(first.tone, Tone::Success);

    let second = session.upload_report(Some(path.as_path())).await;
    assert_eq!(second.text, "Uploaded: blood-test.pdf");
}

#[tokio::test]
async fn test_failed_upload_shows_demo_notice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xray.png");
    std::fs::write(&path, [0u8; 16]).unwrap();

    let mut mock = signed_in_mock();
    mock.expect_upload_report().returning(|_| network_error());

    let mut session = PortalSession::new(client(mock));
    session.login("asha@clinic.in", "secret").await;

    let notice = session.upload_report(Some(Path::new(&path))).await;

    assert_eq!(notice.text, "Demo: report would be uploaded. Connect backend to enable.");
    assert_eq!(notice.tone, Tone::Warning);
}
