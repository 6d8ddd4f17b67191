mod common;
use common::entry;

use chrono::NaiveDate;
use rtoil::core::balance::{calculate_balance, month_hours, totals_by_type};
use rtoil::models::entry::TimeEntry;
use rtoil::models::entry_kind::EntryKind;

fn mixed_set() -> Vec<TimeEntry> {
    vec![
        entry(1, "a@x.com", "2025-01-10", EntryKind::Overtime, 2.0, 3.0),
        entry(2, "a@x.com", "2025-01-11", EntryKind::Timeoff, 4.0, -4.0),
        entry(3, "a@x.com", "2025-02-01", EntryKind::Overtime, 1.0, 1.5),
        entry(4, "a@x.com", "2025-02-02", EntryKind::Timeoff, 0.5, -0.5),
    ]
}

#[test]
fn balance_equals_overtime_minus_timeoff() {
    let set = mixed_set();
    let totals = totals_by_type(&set);
    let balance = calculate_balance(&set);

    assert!((totals.overtime_total - 4.5).abs() < 1e-9);
    assert!((totals.timeoff_total - 4.5).abs() < 1e-9);
    assert!((balance - (totals.overtime_total - totals.timeoff_total)).abs() < 1e-9);
}

#[test]
fn balance_of_empty_set_is_zero() {
    assert_eq!(calculate_balance(&[]), 0.0);
    let totals = totals_by_type(&[]);
    assert_eq!(totals.overtime_total, 0.0);
    assert_eq!(totals.timeoff_total, 0.0);
}

#[test]
fn timeoff_then_overtime_scenario() {
    // timeoff 4h, then overtime 2h at x1.5 -> balance -4 + 3 = -1
    let set = vec![
        entry(1, "a@x.com", "2025-03-03", EntryKind::Timeoff, 4.0, -4.0),
        entry(2, "a@x.com", "2025-03-04", EntryKind::Overtime, 2.0, 3.0),
    ];
    assert!((calculate_balance(&set) - (-1.0)).abs() < 1e-9);
}

#[test]
fn credited_sign_follows_kind() {
    assert_eq!(EntryKind::Overtime.credited(2.0, 1.5), 3.0);
    assert_eq!(EntryKind::Overtime.credited(0.25, 2.0), 0.5);
    assert_eq!(EntryKind::Timeoff.credited(4.0, 1.5), -4.0);

    for e in mixed_set() {
        match e.kind {
            EntryKind::Overtime => assert!(e.credited_hours >= 0.0),
            EntryKind::Timeoff => assert!(e.credited_hours <= 0.0),
        }
    }
}

#[test]
fn placeholder_applies_current_multiplier() {
    let ot = TimeEntry::placeholder(
        1,
        "A@X.com",
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        EntryKind::Overtime,
        2.0,
        1.5,
        "release night",
        "",
    );
    assert_eq!(ot.credited_hours, 3.0);
    assert_eq!(ot.user_email, "a@x.com"); // email normalized
    assert!(ot.id.is_pending());
    assert!(ot.created_at.is_none());

    let off = TimeEntry::placeholder(
        2,
        "a@x.com",
        NaiveDate::from_ymd_opt(2025, 1, 11).unwrap(),
        EntryKind::Timeoff,
        4.0,
        1.5,
        "",
        "Boss",
    );
    assert_eq!(off.credited_hours, -4.0);
    assert_eq!(off.approved_by, "Boss");
}

#[test]
fn non_finite_credited_counts_as_zero() {
    let mut broken = entry(9, "a@x.com", "2025-01-12", EntryKind::Overtime, 1.0, 1.5);
    broken.credited_hours = f64::NAN;

    let set = vec![
        broken,
        entry(1, "a@x.com", "2025-01-10", EntryKind::Overtime, 2.0, 3.0),
    ];
    assert!((calculate_balance(&set) - 3.0).abs() < 1e-9);

    let totals = totals_by_type(&set);
    assert!((totals.overtime_total - 3.0).abs() < 1e-9);
}

#[test]
fn month_hours_counts_absolute_hours_of_reference_month() {
    let set = mixed_set();
    let jan = NaiveDate::from_ymd_opt(2025, 1, 20).unwrap();
    let feb = NaiveDate::from_ymd_opt(2025, 2, 20).unwrap();

    assert!((month_hours(&set, jan) - 7.0).abs() < 1e-9); // |3.0| + |-4.0|
    assert!((month_hours(&set, feb) - 2.0).abs() < 1e-9); // |1.5| + |-0.5|
}

#[test]
fn month_hours_respects_year_boundary() {
    let set = vec![
        entry(1, "a@x.com", "2025-01-05", EntryKind::Overtime, 2.0, 3.0),
        entry(2, "a@x.com", "2024-01-05", EntryKind::Overtime, 2.0, 3.0),
    ];
    let jan_2025 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    assert!((month_hours(&set, jan_2025) - 3.0).abs() < 1e-9);
}

#[test]
fn first_of_month_entry_lands_in_its_month() {
    // an ISO-midnight date string must classify into March for any client
    // UTC offset
    let e = entry(
        1,
        "a@x.com",
        "2025-03-01T00:00:00.000Z",
        EntryKind::Overtime,
        2.0,
        3.0,
    );
    let march = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
    let feb = NaiveDate::from_ymd_opt(2025, 2, 15).unwrap();

    assert!((month_hours(&[e.clone()], march) - 3.0).abs() < 1e-9);
    assert_eq!(month_hours(&[e], feb), 0.0);
}
