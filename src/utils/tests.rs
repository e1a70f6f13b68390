use super::*;
use chrono::TimeZone;

#[test]
fn test_format_number_comma() {
    let options = NumberFormatOptions {
        use_comma: true,
        ..Default::default()
    };

    assert_eq!(format_number(123u64, &options), "123");
    assert_eq!(format_number(1000u64, &options), "1,000");
    assert_eq!(format_number(1_000_000u64, &options), "1,000,000");
}

#[test]
fn test_format_number_human() {
    let options = NumberFormatOptions {
        use_human: true,
        decimal_places: 1,
        ..Default::default()
    };

    assert_eq!(format_number(100u64, &options), "100");
    assert_eq!(format_number(1500u64, &options), "1.5k");
    assert_eq!(format_number(1_500_000u64, &options), "1.5m");
    assert_eq!(format_number(1_500_000_000u64, &options), "1.5b");
}

#[test]
fn test_format_number_plain() {
    let options = NumberFormatOptions::default();
    assert_eq!(format_number(1000u64, &options), "1000");
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(0), "0s");
    assert_eq!(format_duration_ms(999), "0s");
    assert_eq!(format_duration_ms(5_000), "5s");
    assert_eq!(format_duration_ms(65_000), "1m 5s");
    assert_eq!(format_duration_ms(3_600_000), "1h 0m");
    assert_eq!(format_duration_ms(90_000_000), "1d 1h 0m");
}

#[test]
fn test_format_timestamp_for_display() {
    let ts = Utc.with_ymd_and_hms(2023, 1, 15, 14, 32, 5).unwrap();
    assert_eq!(format_timestamp_for_display(&ts), "01/15/2023 14:32");
}

#[test]
fn test_month_name() {
    assert_eq!(month_name(1), "January");
    assert_eq!(month_name(12), "December");
    assert_eq!(month_name(0), "Unknown");
    assert_eq!(month_name(13), "Unknown");
}
