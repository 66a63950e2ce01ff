mod common;

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{authenticated, InMemoryDashboard, InMemoryPasses, TestParking};
use parking_manager::controllers::dashboard_controller::DashboardController;
use parking_manager::dto::dashboard_dto::DashboardQuery;
use parking_manager::models::monthly_pass::{pass_end_date, MonthlyPass};
use parking_manager::models::pricing::PricingMode;
use parking_manager::models::user::{UserRole, PERM_CHECKIN, PERM_VIEW_DASHBOARD};
use parking_manager::services::parking_service::CheckinCommand;
use parking_manager::utils::errors::AppError;

fn at(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, minute, 0).unwrap()
}

fn ist() -> FixedOffset {
    FixedOffset::east_opt(330 * 60).unwrap()
}

fn query(date: &str) -> DashboardQuery {
    DashboardQuery {
        date: Some(date.to_string()),
    }
}

fn pass(account_id: Uuid, start: NaiveDate, amount: Decimal, created_at: DateTime<Utc>) -> MonthlyPass {
    MonthlyPass {
        id: Uuid::new_v4(),
        account_id,
        vehicle_number: "MH12AB1234".to_string(),
        vehicle_type: "car".to_string(),
        owner_name: "Ravi".to_string(),
        owner_phone: None,
        months: 1,
        amount,
        start_date: start,
        end_date: pass_end_date(start, 1).unwrap(),
        is_active: true,
        created_by: Uuid::new_v4(),
        created_at,
    }
}

async fn park(parking: &TestParking, plate: &str, category: &str, entry: DateTime<Utc>) -> String {
    parking
        .service
        .check_in_at(
            parking.account_id,
            parking.operator_id,
            CheckinCommand {
                vehicle_number: plate.to_string(),
                vehicle_type: category.to_string(),
                prepaid_units: 0,
            },
            entry,
        )
        .await
        .unwrap()
        .token
}

async fn leave(parking: &TestParking, token: &str, exit: DateTime<Utc>) {
    parking
        .service
        .check_out_at(parking.account_id, parking.operator_id, token, exit)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_daily_dashboard_uses_local_day_window() {
    let parking = TestParking::with_rates(&[("car", "100"), ("bike", "20"), ("van", "70")], PricingMode::PerDay).await;
    let passes = Arc::new(InMemoryPasses::default());
    let controller = DashboardController::new(
        Arc::new(InMemoryDashboard {
            checkins: parking.checkins.clone(),
            passes: passes.clone(),
        }),
        ist(),
    );

    // 1 de junio en IST = [31 may 18:30Z, 1 jun 18:30Z)
    let car = park(&parking, "KA01AB1", "car", at(5, 31, 19, 0)).await;
    leave(&parking, &car, at(6, 1, 10, 0)).await;

    // entra el 31 local, sale el 1 local
    let bike = park(&parking, "KA01AB2", "bike", at(5, 31, 17, 0)).await;
    leave(&parking, &bike, at(5, 31, 19, 30)).await;

    // sale ya en el 2 de junio local
    let van = park(&parking, "KA01AB3", "van", at(6, 1, 6, 0)).await;
    leave(&parking, &van, at(6, 1, 18, 45)).await;

    park(&parking, "KA01AB4", "car", at(6, 1, 5, 0)).await;

    let d1 = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    passes.seed(pass(parking.account_id, d1, dec!(900), at(6, 1, 4, 0)));
    passes.seed(pass(
        parking.account_id,
        NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        dec!(800),
        at(5, 31, 4, 0),
    ));

    let admin = authenticated(parking.account_id, UserRole::Admin, &[]);
    let dashboard = controller.daily(&admin, query("2024-06-01")).await.unwrap();

    assert_eq!(dashboard.date, d1);
    assert_eq!(dashboard.vehicles_parked, 1);
    assert_eq!(dashboard.checkins, 3);
    assert_eq!(dashboard.checkouts, 2);
    assert_eq!(dashboard.revenue, dec!(120));
    assert_eq!(dashboard.active_passes, 1);
    assert_eq!(dashboard.pass_revenue, dec!(900));

    let categories: Vec<(&str, i64, Decimal)> = dashboard
        .revenue_by_category
        .iter()
        .map(|c| (c.vehicle_type.as_str(), c.checkouts, c.revenue))
        .collect();
    assert_eq!(categories, vec![("bike", 1, dec!(20)), ("car", 1, dec!(100))]);
}

#[tokio::test]
async fn test_dashboard_is_scoped_to_account() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let controller = DashboardController::new(
        Arc::new(InMemoryDashboard {
            checkins: parking.checkins.clone(),
            passes: Arc::new(InMemoryPasses::default()),
        }),
        FixedOffset::east_opt(0).unwrap(),
    );
    let token = park(&parking, "AB12CD", "car", at(6, 1, 8, 0)).await;
    leave(&parking, &token, at(6, 1, 9, 0)).await;

    let stranger = authenticated(Uuid::new_v4(), UserRole::Admin, &[]);
    let dashboard = controller.daily(&stranger, query("2024-06-01")).await.unwrap();
    assert_eq!(dashboard.checkouts, 0);
    assert_eq!(dashboard.revenue, Decimal::ZERO);
    assert!(dashboard.revenue_by_category.is_empty());
}

#[tokio::test]
async fn test_dashboard_permissions_and_date_validation() {
    let parking = TestParking::new();
    let controller = DashboardController::new(
        Arc::new(InMemoryDashboard {
            checkins: parking.checkins.clone(),
            passes: Arc::new(InMemoryPasses::default()),
        }),
        FixedOffset::east_opt(0).unwrap(),
    );

    let clerk = authenticated(parking.account_id, UserRole::Staff, &[PERM_CHECKIN]);
    let err = controller.daily(&clerk, query("2024-06-01")).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let viewer = authenticated(parking.account_id, UserRole::Staff, &[PERM_VIEW_DASHBOARD]);
    let err = controller.daily(&viewer, query("01/06/2024")).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let today = controller
        .daily(&viewer, DashboardQuery { date: None })
        .await
        .unwrap();
    assert_eq!(today.date, Utc::now().date_naive());
    assert_eq!(today.checkins, 0);
}
