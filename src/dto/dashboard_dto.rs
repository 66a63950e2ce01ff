use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::repositories::dashboard_repository::{CategoryRevenueRow, DashboardSnapshot};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryRevenue {
    pub vehicle_type: String,
    pub checkouts: i64,
    pub revenue: Decimal,
}

impl From<CategoryRevenueRow> for CategoryRevenue {
    fn from(row: CategoryRevenueRow) -> Self {
        Self {
            vehicle_type: row.vehicle_type,
            checkouts: row.checkouts,
            revenue: row.revenue,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub date: NaiveDate,
    pub vehicles_parked: i64,
    pub checkins: i64,
    pub checkouts: i64,
    pub revenue: Decimal,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub active_passes: i64,
    pub pass_revenue: Decimal,
}

impl DashboardResponse {
    pub fn new(date: NaiveDate, snapshot: DashboardSnapshot) -> Self {
        Self {
            date,
            vehicles_parked: snapshot.vehicles_parked,
            checkins: snapshot.checkins,
            checkouts: snapshot.checkouts,
            revenue: snapshot.revenue,
            revenue_by_category: snapshot.by_category.into_iter().map(Into::into).collect(),
            active_passes: snapshot.active_passes,
            pass_revenue: snapshot.pass_revenue,
        }
    }
}
