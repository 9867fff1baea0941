//! Static demo content.
//!
//! Shown whenever the backend cannot be reached, and used as the data set of the demo backend.

use super::types::QuickStats;

/// Note appended to fallback listings.
pub const DEMO_NOTE: &str = "[Demo data – connect to backend later]";

/// Suffix appended to the catbot message when the backend is unavailable.
pub const OFFLINE_SUFFIX: &str = " [Demo offline mode]";

/// Quick stats shown without a backend.
pub const DEMO_STATS: QuickStats = QuickStats {
    doctors_on_duty: 5,
    low_stock_medicines: 7,
    upcoming_appointments: 3,
};

/// Fallback rows for the medicine lookup.
pub const DEMO_MEDICINE_LINES: &[&str] = &["Paracetamol 500mg — Stock: 125 (Pharmacy A)", "Ibuprofen 200mg — Stock: 60 (Pharmacy B)"];

/// Fallback rows for the doctor lookup.
pub const DEMO_DOCTOR_LINES: &[&str] = &[
    "Dr. Sharma (General Physician) — Slots available today & tomorrow",
    "Dr. Kaur (Cardiologist) — Limited slots in the next 3 days",
];

/// Specialities offered by the doctor lookup.
pub const SPECIALITIES: &[&str] = &["General Physician", "Cardiologist", "Dermatologist", "Orthopedics", "Pediatrics"];

/// Profile rows shown after a successful sign-in; the name comes from the backend.
pub const PROFILE_ROWS: &[(&str, &str)] = &[
    ("Role", "Employee"),
    ("Dependents", "Spouse, 1 Child"),
    ("Next appointment", "Dr. Sharma — Tomorrow 10:30 AM"),
];

/// History preview shown after a successful sign-in.
pub const HISTORY_PREVIEW: &[&str] = &["Jan 2025 — Annual health check-up", "Mar 2025 — Follow-up for blood tests"];

/// Trailing muted line of the history preview.
pub const HISTORY_MORE: &str = "More details available in full history view.";

/// Placeholder profile text while signed out.
pub const SIGNED_OUT_PROFILE: &str = "Sign in to view your profile and family details.";

/// Medicines stocked by the demo backend: `(name, stock, location)`.
pub const CATALOGUE: &[(&str, u32, &str)] = &[
    ("Paracetamol 500mg", 125, "Pharmacy A"),
    ("Paracetamol 650mg", 40, "Pharmacy A"),
    ("Ibuprofen 200mg", 60, "Pharmacy B"),
    ("Ibuprofen 400mg", 18, "Pharmacy B"),
    ("Amoxicillin 250mg", 32, "Pharmacy A"),
    ("Cetirizine 10mg", 210, "Pharmacy C"),
    ("Metformin 500mg", 12, "Pharmacy C"),
    ("Omeprazole 20mg", 75, "Pharmacy B"),
    ("Salbutamol Inhaler", 9, "Emergency Store"),
    ("Aspirin 75mg", 44, "Emergency Store"),
];

/// Doctors on the demo backend's roster: `(name, speciality)`.
pub const ROSTER: &[(&str, &str)] = &[
    ("Dr. Sharma", "General Physician"),
    ("Dr. Iyer", "General Physician"),
    ("Dr. Kaur", "Cardiologist"),
    ("Dr. Mehta", "Dermatologist"),
    ("Dr. Rao", "Orthopedics"),
];
