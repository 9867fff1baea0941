//! Doctor availability lookup by specialty and date.

use tracing::instrument;

use crate::{
    base::demo::{DEMO_DOCTOR_LINES, DEMO_NOTE},
    base::types::{DoctorAvailability, DoctorQuery},
    service::portal::PortalClient,
};

use super::{ListItem, Listing, Outcome, attempt};

/// List doctors with open slots; a blank or missing speciality means any.
#[instrument(skip(portal))]
pub async fn check_doctors(portal: &PortalClient, speciality: Option<&str>) -> Outcome<Listing> {
    let query = DoctorQuery::new(speciality);

    attempt("Doctor availability", portal.doctor_availability(&query), render, || Listing::demo(DEMO_DOCTOR_LINES, DEMO_NOTE)).await
}

fn render(doctors: Vec<DoctorAvailability>) -> Listing {
    if doctors.is_empty() {
        return Listing(vec![ListItem::new("No doctors found for the selected criteria.")]);
    }

    Listing(doctors.into_iter().map(|d| ListItem::new(format!("{} ({})", d.doctor_name, d.speciality))).collect())
}
