mod common;

use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use common::{pricing_table, TestParking};
use parking_manager::dto::checkin_dto::CheckoutResponse;
use parking_manager::models::checkin::{SessionQuery, SessionStatus, VehicleCheckin};
use parking_manager::models::pricing::PricingMode;
use parking_manager::services::parking_service::CheckinCommand;
use parking_manager::utils::errors::AppError;

fn entry() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
}

fn command(plate: &str, category: &str) -> CheckinCommand {
    CheckinCommand {
        vehicle_number: plate.to_string(),
        vehicle_type: category.to_string(),
        prepaid_units: 0,
    }
}

#[tokio::test]
async fn test_checkin_then_checkout_per_day() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;

    let record = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("ab 12 cd", "Car"), entry())
        .await
        .unwrap();
    assert_eq!(record.vehicle_number, "AB12CD");
    assert_eq!(record.vehicle_type, "car");
    assert_eq!(record.rate, Some(dec!(100)));
    assert!(record.token.starts_with("PK"));

    let outcome = parking
        .service
        .check_out_at(
            parking.account_id,
            parking.operator_id,
            &record.token,
            entry() + Duration::hours(49),
        )
        .await
        .unwrap();

    assert_eq!(outcome.quote.charge, dec!(300));
    assert_eq!(outcome.quote.duration_label, "3 days");
    assert!(outcome.record.checked_out);
    assert_eq!(outcome.record.total_amount, Some(dec!(300)));
    assert_eq!(outcome.record.exit_by, Some(parking.operator_id));
}

#[tokio::test]
async fn test_checkout_per_hour_mode() {
    let parking = TestParking::with_rates(&[("bike", "40")], PricingMode::PerHour).await;

    let record = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("MH01X1", "bike"), entry())
        .await
        .unwrap();

    let outcome = parking
        .service
        .check_out_at(
            parking.account_id,
            parking.operator_id,
            &record.token,
            entry() + Duration::minutes(90) + Duration::seconds(1),
        )
        .await
        .unwrap();

    assert_eq!(outcome.quote.charge, dec!(60.67));
    assert_eq!(outcome.quote.duration_label, "91 minutes");
    assert_eq!(outcome.quote.mode, PricingMode::PerHour);
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;

    let err = parking
        .service
        .check_out_at(parking.account_id, parking.operator_id, "PKDOESNOTEXI", entry())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_second_checkout_conflicts_and_keeps_totals() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let record = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("KA01AB1234", "car"), entry())
        .await
        .unwrap();

    parking
        .service
        .check_out_at(parking.account_id, parking.operator_id, &record.token, entry() + Duration::hours(2))
        .await
        .unwrap();

    let err = parking
        .service
        .check_out_at(parking.account_id, Uuid::new_v4(), &record.token, entry() + Duration::hours(50))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let stored = parking.checkins.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].total_amount, Some(dec!(100)));
    assert_eq!(stored[0].exit_time, Some(entry() + Duration::hours(2)));
    assert_eq!(stored[0].exit_by, Some(parking.operator_id));
}

#[tokio::test]
async fn test_concurrent_checkouts_close_once() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let record = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("DL3C1234", "car"), entry())
        .await
        .unwrap();

    let exit = entry() + Duration::hours(3);
    let (first, second) = tokio::join!(
        parking
            .service
            .check_out_at(parking.account_id, parking.operator_id, &record.token, exit),
        parking
            .service
            .check_out_at(parking.account_id, parking.operator_id, &record.token, exit),
    );

    let successes = [first.is_ok(), second.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1);
    assert!(matches!(first.err().or(second.err()), Some(AppError::Conflict(_))));
}

#[tokio::test]
async fn test_pricing_change_does_not_touch_open_sessions() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let record = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("GJ05ZZ9", "car"), entry())
        .await
        .unwrap();

    parking
        .service
        .replace_pricing(&pricing_table(parking.account_id, &[("car", "250")], PricingMode::PerDay))
        .await
        .unwrap();

    let outcome = parking
        .service
        .check_out_at(parking.account_id, parking.operator_id, &record.token, entry() + Duration::hours(30))
        .await
        .unwrap();

    assert_eq!(outcome.quote.rate, dec!(100));
    assert_eq!(outcome.quote.charge, dec!(200));
}

#[tokio::test]
async fn test_session_without_snapshot_uses_current_rate() {
    let parking = TestParking::with_rates(&[("van", "70")], PricingMode::PerDay).await;

    let mut legacy = VehicleCheckin::from_new(parking_manager::models::checkin::NewCheckin {
        token: "PKLEGACY0001".to_string(),
        account_id: parking.account_id,
        vehicle_number: "TN10AA1".to_string(),
        vehicle_type: "van".to_string(),
        entry_time: entry(),
        rate: dec!(1),
        prepaid_units: 0,
        prepaid_amount: dec!(0),
        entry_by: parking.operator_id,
    });
    legacy.rate = None;
    parking.checkins.seed(legacy);

    let outcome = parking
        .service
        .check_out_at(parking.account_id, parking.operator_id, "PKLEGACY0001", entry() + Duration::hours(1))
        .await
        .unwrap();
    assert_eq!(outcome.quote.rate, dec!(70));
    assert_eq!(outcome.quote.charge, dec!(70));
}

#[tokio::test]
async fn test_duplicate_plate_after_normalization_conflicts() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("ab12cd", "car"), entry())
        .await
        .unwrap();

    let err = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command(" AB 12 CD ", "car"), entry())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_plate_can_return_after_checkout() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let first = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("AB12CD", "car"), entry())
        .await
        .unwrap();
    parking
        .service
        .check_out_at(parking.account_id, parking.operator_id, &first.token, entry() + Duration::hours(1))
        .await
        .unwrap();

    let second = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("AB12CD", "car"), entry() + Duration::hours(2))
        .await
        .unwrap();
    assert_ne!(first.token, second.token);
}

#[tokio::test]
async fn test_missing_pricing_is_a_client_error() {
    let parking = TestParking::new();
    let err = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("AB12CD", "car"), entry())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));

    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let err = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("AB12CD", "truck"), entry())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_invalid_plate_is_rejected() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let err = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("A!", "car"), entry())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_estimate_leaves_session_open() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let record = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("AB12CD", "car"), entry())
        .await
        .unwrap();

    let estimate = parking
        .service
        .estimate_at(parking.account_id, &record.token, entry() + Duration::hours(25))
        .await
        .unwrap();
    assert_eq!(estimate.quote.charge, dec!(200));
    assert!(!estimate.record.checked_out);

    let stored = parking.checkins.snapshot();
    assert!(!stored[0].checked_out);
    assert!(stored[0].total_amount.is_none());
}

#[tokio::test]
async fn test_prepaid_units_reduce_balance() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let record = parking
        .service
        .check_in_at(
            parking.account_id,
            parking.operator_id,
            CheckinCommand {
                vehicle_number: "AB12CD".to_string(),
                vehicle_type: "car".to_string(),
                prepaid_units: 2,
            },
            entry(),
        )
        .await
        .unwrap();
    assert_eq!(record.prepaid_amount, dec!(200));

    let outcome = parking
        .service
        .check_out_at(parking.account_id, parking.operator_id, &record.token, entry() + Duration::hours(60))
        .await
        .unwrap();
    let exit_time = entry() + Duration::hours(60);
    let response = CheckoutResponse::from_outcome(outcome, exit_time, &FixedOffset::east_opt(0).unwrap());
    assert_eq!(response.charge, dec!(300));
    assert_eq!(response.prepaid_amount, dec!(200));
    assert_eq!(response.balance_due, dec!(100));
}

#[tokio::test]
async fn test_oversized_stored_rate_rejects_prepaid_checkin() {
    let parking = TestParking::new();
    parking
        .service
        .replace_pricing(&pricing_table(
            parking.account_id,
            &[("car", "79228162514264337593543950335")],
            PricingMode::PerDay,
        ))
        .await
        .unwrap();

    let err = parking
        .service
        .check_in_at(
            parking.account_id,
            parking.operator_id,
            CheckinCommand {
                vehicle_number: "AB12CD".to_string(),
                vehicle_type: "car".to_string(),
                prepaid_units: 2,
            },
            entry(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(parking.checkins.snapshot().is_empty());
}

#[tokio::test]
async fn test_overflowing_snapshot_rate_fails_checkout_and_keeps_session_open() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;

    let mut legacy = VehicleCheckin::from_new(parking_manager::models::checkin::NewCheckin {
        token: "PKHUGERATE01".to_string(),
        account_id: parking.account_id,
        vehicle_number: "KA01ZZ9".to_string(),
        vehicle_type: "car".to_string(),
        entry_time: entry(),
        rate: dec!(1),
        prepaid_units: 0,
        prepaid_amount: dec!(0),
        entry_by: parking.operator_id,
    });
    legacy.rate = Some(Decimal::MAX);
    parking.checkins.seed(legacy);

    let err = parking
        .service
        .check_out_at(parking.account_id, parking.operator_id, "PKHUGERATE01", entry() + Duration::hours(25))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(!parking.checkins.snapshot()[0].checked_out);
}

#[tokio::test]
async fn test_sessions_are_scoped_to_account() {
    let parking = TestParking::with_rates(&[("car", "100")], PricingMode::PerDay).await;
    let record = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("AB12CD", "car"), entry())
        .await
        .unwrap();

    let err = parking
        .service
        .find_session(Uuid::new_v4(), &record.token)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_list_sessions_filters_by_status() {
    let parking = TestParking::with_rates(&[("car", "100"), ("bike", "20")], PricingMode::PerDay).await;
    let car = parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("AB12CD", "car"), entry())
        .await
        .unwrap();
    parking
        .service
        .check_in_at(parking.account_id, parking.operator_id, command("XY99ZZ", "bike"), entry() + Duration::minutes(5))
        .await
        .unwrap();
    parking
        .service
        .check_out_at(parking.account_id, parking.operator_id, &car.token, entry() + Duration::hours(1))
        .await
        .unwrap();

    let open = parking
        .service
        .list_sessions(
            parking.account_id,
            &SessionQuery {
                status: SessionStatus::Open,
                vehicle_number: None,
                vehicle_type: None,
                limit: 50,
                offset: 0,
            },
        )
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].vehicle_number, "XY99ZZ");

    let all = parking
        .service
        .list_sessions(
            parking.account_id,
            &SessionQuery {
                status: SessionStatus::All,
                vehicle_number: None,
                vehicle_type: None,
                limit: 50,
                offset: 0,
            },
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}
