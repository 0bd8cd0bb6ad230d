use chrono::{DateTime, NaiveDate, Utc};

use tripstore::{
    core::clock::{Clock, SystemClock, display_date},
    persist::snapshot,
    trip::{Countdown, TripDraft, days_until},
    types::Category,
};

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).expect("timestamp").with_timezone(&Utc)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

#[test]
fn days_until_rounds_partial_days_up() {
    let start = date(2025, 6, 10);
    assert_eq!(days_until(start, at("2025-06-01T12:00:00Z")), 9);
    assert_eq!(days_until(start, at("2025-06-09T00:00:00Z")), 1);
    assert_eq!(days_until(start, at("2025-06-10T08:00:00Z")), 0);
    assert_eq!(days_until(start, at("2025-06-12T00:00:00Z")), -2);
    assert_eq!(days_until(start, at("2025-06-12T06:00:00Z")), -2);
}

#[test]
fn countdown_labels_match_the_trip_card() {
    assert_eq!(Countdown::from_days(1).to_string(), "1 day away");
    assert_eq!(Countdown::from_days(12).to_string(), "12 days away");
    assert_eq!(Countdown::from_days(0).to_string(), "Today!");
    assert_eq!(Countdown::from_days(-1).to_string(), "Trip was 1 day ago");
    assert_eq!(Countdown::from_days(-3), Countdown::Past(3));
}

#[test]
fn creation_dates_render_short_us_style() {
    assert_eq!(display_date(date(2025, 6, 1)), "6/1/2025");
    assert_eq!(display_date(date(2024, 12, 25)), "12/25/2024");
}

#[test]
fn category_labels() {
    assert_eq!(Category::RoadTrip.label(), "Road trip");
    assert_eq!(Category::RoadTrip.as_str(), "road-trip");
    assert_eq!(Category::default(), Category::Adventure);
    assert_eq!(Category::ALL.len(), 6);
    assert!(!Category::Family.emoji().is_empty());
}

#[test]
fn snapshot_uses_camel_case_field_names() {
    let trip = TripDraft {
        destination: "Route 66".to_string(),
        duration: 10,
        start_date: Some(date(2025, 6, 1)),
        budget: 2500.0,
        category: Category::RoadTrip,
        ..TripDraft::default()
    }
    .into_trip(42, "5/1/2025".to_string())
    .expect("valid draft");

    let raw = snapshot::encode(&[trip]).expect("encode");
    assert!(raw.contains(r#""startDate":"2025-06-01""#));
    assert!(raw.contains(r#""createdAt":"5/1/2025""#));
    assert!(raw.contains(r#""category":"road-trip""#));
    assert!(raw.contains(r#""id":42"#));
}

#[test]
fn snapshots_with_text_numbers_still_load() {
    let raw = r#"[
        {"destination":"Rome","duration":"4","startDate":"2024-09-01","budget":"1500.50",
         "category":"road-trip","itinerary":"","notes":"gelato","id":1717000000000,"createdAt":"5/29/2024"},
        {"destination":"Oslo","duration":2,"startDate":"2024-10-01","budget":300,
         "category":"business","id":1716000000000,"createdAt":"5/18/2024"}
    ]"#;

    let trips = snapshot::decode(raw).expect("decode");
    assert_eq!(trips.len(), 2);
    assert_eq!(trips[0].duration, 4);
    assert_eq!(trips[0].budget, 1500.5);
    assert_eq!(trips[0].category, Category::RoadTrip);
    assert_eq!(trips[1].notes, "");
    assert_eq!(trips[1].itinerary, "");
}

#[test]
fn snapshot_with_unknown_category_is_rejected() {
    let raw = r#"[{"destination":"Mars","duration":1,"startDate":"2030-01-01","budget":1,
        "category":"space","id":1,"createdAt":"1/1/2030"}]"#;
    assert!(snapshot::decode(raw).is_err());
}

#[test]
fn snapshot_with_non_finite_text_budget_is_rejected() {
    for budget in ["\"inf\"", "\"NaN\"", "null"] {
        let raw = format!(
            r#"[{{"destination":"Rome","duration":4,"startDate":"2024-09-01","budget":{budget},
                "category":"family","id":1,"createdAt":"5/29/2024"}}]"#
        );
        assert!(snapshot::decode(&raw).is_err(), "budget {budget}");
    }
}

#[test]
fn system_clock_millis_follow_its_instant() {
    let before = Utc::now().timestamp_millis();
    let ms = SystemClock.now_ms();
    let after = Utc::now().timestamp_millis();
    assert!(i64::try_from(ms).unwrap() >= before);
    assert!(i64::try_from(ms).unwrap() <= after);
}
