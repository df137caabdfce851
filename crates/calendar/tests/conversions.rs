use chrono::{Datelike, NaiveDate};
use mpa_calendar::{CalendarError, DayOfYear};

#[test]
fn every_date_of_a_leap_year_maps_to_a_distinct_slot() {
    let mut seen = vec![false; DayOfYear::SLOTS];
    let mut date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    while date.year() == 2020 {
        let doy = DayOfYear::from_date(date);
        assert!(!seen[doy.index()], "slot {} assigned twice", doy.index());
        seen[doy.index()] = true;
        date = date.succ_opt().unwrap();
    }
    assert!(seen.iter().all(|&s| s), "every slot must be reachable");
}

#[test]
fn common_year_never_reaches_leap_slot() {
    let mut date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    while date.year() == 2021 {
        assert!(!DayOfYear::from_date(date).is_leap_day());
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn roundtrip_through_month_day() {
    let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    while date.year() == 2024 {
        let doy = DayOfYear::from_date(date);
        let back = DayOfYear::new(doy.month(), doy.day()).unwrap();
        assert_eq!(doy, back, "roundtrip failed for {date}");
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn invalid_keys_are_rejected() {
    assert!(matches!(
        DayOfYear::new(4, 31),
        Err(CalendarError::InvalidDay {
            day: 31,
            month: 4,
            max_day: 30
        })
    ));
    assert!(matches!(
        DayOfYear::new(0, 10),
        Err(CalendarError::InvalidMonth { month: 0 })
    ));
}

#[test]
fn serializes_as_month_day_string() {
    let doy = DayOfYear::new(6, 15).unwrap();
    assert_eq!(serde_json::to_string(&doy).unwrap(), "\"06-15\"");
}
