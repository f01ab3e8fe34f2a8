use chrono::NaiveDate;
use roster_engine::{parse_days_back, DateFilter, RunConfig};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

#[test]
fn boundary_day_is_inclusive() {
    let filter = DateFilter::DaysBack(7);
    assert!(filter.is_within_range("2024-03-03", today()));
    assert!(!filter.is_within_range("2024-03-02", today()));
    assert!(filter.is_within_range("2024-03-10", today()));
}

#[test]
fn cutoff_crosses_month_and_leap_day() {
    let filter = DateFilter::DaysBack(10);
    assert_eq!(
        filter.cutoff(today()),
        NaiveDate::from_ymd_opt(2024, 2, 29)
    );
    assert!(filter.is_within_range("2024-02-29", today()));
    assert!(!filter.is_within_range("2024-02-28", today()));
}

#[test]
fn zero_days_back_keeps_only_today() {
    let filter = DateFilter::DaysBack(0);
    assert!(filter.is_within_range("2024-03-10", today()));
    assert!(!filter.is_within_range("2024-03-09", today()));
}

#[test]
fn disabled_filter_accepts_anything() {
    let filter = DateFilter::Disabled;
    assert_eq!(filter.cutoff(today()), None);
    assert!(filter.is_within_range("1999-01-01", today()));
    assert!(filter.is_within_range("garbage", today()));
    assert!(filter.is_within_range("", today()));
}

#[test]
fn unparsable_dates_fail_open() {
    let filter = DateFilter::DaysBack(7);
    assert!(filter.is_within_range("2024/01/01", today()));
    assert!(filter.is_within_range("", today()));
    assert!(filter.is_within_range("2024-13-45", today()));
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let filter = DateFilter::DaysBack(7);
    assert!(!filter.is_within_range("  2024-01-01\n", today()));
}

#[test]
fn days_back_input_defaults_to_seven() {
    assert_eq!(parse_days_back("14"), 14);
    assert_eq!(parse_days_back(" 3 "), 3);
    assert_eq!(parse_days_back("0"), 0);
    assert_eq!(parse_days_back(""), 7);
    assert_eq!(parse_days_back("-2"), 7);
    assert_eq!(parse_days_back("a week"), 7);
}

#[test]
fn config_selects_filter_from_toggle() {
    let mut config = RunConfig::new("out.csv").unwrap();
    config.days_back = 3;
    assert_eq!(config.date_filter(), DateFilter::Disabled);
    config.date_filter_enabled = true;
    assert_eq!(config.date_filter(), DateFilter::DaysBack(3));
}

#[test]
fn config_rejects_bad_webdriver_url() {
    let config = RunConfig::new("out.csv").unwrap();
    assert!(config.clone().with_webdriver_url("not a url").is_err());
    let config = config.with_webdriver_url("http://127.0.0.1:9515").unwrap();
    assert_eq!(config.webdriver_url.as_str(), "http://127.0.0.1:9515/");
}
