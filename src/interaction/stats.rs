//! Quick stats widget: today's counts, or the demo figures when the portal is unreachable.

use std::fmt;

use tracing::instrument;

use crate::{
    base::{demo::DEMO_STATS, types::QuickStats},
    service::portal::PortalClient,
};

use super::{Outcome, attempt};

/// Dashboard counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsView(pub QuickStats);

impl fmt::Display for StatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Doctors on duty: {}", self.0.doctors_on_duty)?;
        writeln!(f, "Low-stock medicines: {}", self.0.low_stock_medicines)?;
        write!(f, "Upcoming appointments: {}", self.0.upcoming_appointments)
    }
}

#[instrument(skip_all)]
pub async fn load_quick_stats(portal: &PortalClient) -> Outcome<StatsView> {
    attempt("Quick stats", portal.quick_stats(), StatsView, || StatsView(DEMO_STATS)).await
}
