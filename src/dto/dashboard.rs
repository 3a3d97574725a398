use serde::Serialize;

use crate::domain::enrichment::AppointmentView;
use crate::domain::stats::DashboardStats;

/// Everything the dashboard shows at once.
#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub today: Vec<AppointmentView>,
}
