use runlog_core::time_value::{
    format_from_seconds, format_pace, normalize_time_input, parse_pace_label, parse_to_seconds, EventKind, Precision,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn parses_common_inputs() {
    assert!(approx(parse_to_seconds("1:20.5"), 80.5));
    assert!(approx(parse_to_seconds("30000"), 180.0));
    assert!(approx(parse_to_seconds("2:15:34"), 8134.0));
    assert_eq!(parse_to_seconds(""), 0.0);
    assert_eq!(parse_to_seconds("garbage"), 0.0);
}

#[test]
fn short_numbers_are_plain_seconds() {
    assert!(approx(parse_to_seconds("80.5"), 80.5));
    assert!(approx(parse_to_seconds("75"), 75.0));
    assert!(approx(parse_to_seconds(" 42 "), 42.0));
}

#[test]
fn five_digits_and_more_are_packed() {
    // 1 min, 23 s, 45 cs
    assert!(approx(parse_to_seconds("12345"), 83.45));
    assert!(approx(parse_to_seconds("100000"), 600.0));
}

#[test]
fn groups_are_not_range_checked_and_seconds_carry() {
    assert!(approx(parse_to_seconds("90:00"), 5400.0));
    assert!(approx(parse_to_seconds("1:75"), 135.0));
    assert!(approx(parse_to_seconds("0:59:90"), 3630.0));
}

#[test]
fn invalid_inputs_fail_soft() {
    for bad in ["-5", "NaN", "inf", "1:2:3:4", "1::2", "a:10", "1:10x", "1.2.3"] {
        assert_eq!(parse_to_seconds(bad), 0.0, "input {bad:?}");
    }
}

#[test]
fn formats_with_and_without_centiseconds() {
    assert_eq!(format_from_seconds(80.5, Precision::Centiseconds), "1:20.50");
    assert_eq!(format_from_seconds(80.5, Precision::WholeSeconds), "1:21");
    assert_eq!(format_from_seconds(8134.0, Precision::WholeSeconds), "2:15:34");
    assert_eq!(format_from_seconds(3605.25, Precision::Centiseconds), "1:00:05.25");
    assert_eq!(format_from_seconds(5.0, Precision::WholeSeconds), "0:05");
}

#[test]
fn rounding_carries_into_minutes() {
    assert_eq!(format_from_seconds(59.999, Precision::Centiseconds), "1:00.00");
    assert_eq!(format_from_seconds(3599.6, Precision::WholeSeconds), "1:00:00");
}

#[test]
fn negative_and_nan_format_as_zero() {
    assert_eq!(format_from_seconds(-3.0, Precision::WholeSeconds), "0:00");
    assert_eq!(format_from_seconds(f64::NAN, Precision::Centiseconds), "0:00.00");
}

#[test]
fn parse_inverts_format_for_centiseconds() {
    for k in (0..200_000u64).step_by(37) {
        let s = k as f64 / 100.0;
        let text = format_from_seconds(s, Precision::Centiseconds);
        let back = parse_to_seconds(&text);
        assert!(approx(back, s), "{s} -> {text} -> {back}");
    }
}

#[test]
fn parse_inverts_format_for_whole_seconds() {
    for s in (0..20_000u64).step_by(7) {
        let text = format_from_seconds(s as f64, Precision::WholeSeconds);
        assert_eq!(parse_to_seconds(&text), s as f64, "{text}");
    }
}

#[test]
fn normalize_converts_to_display_form() {
    assert_eq!(normalize_time_input("30000", Precision::Centiseconds).as_deref(), Some("3:00.00"));
    assert_eq!(normalize_time_input("80.5", Precision::Centiseconds).as_deref(), Some("1:20.50"));
    assert_eq!(normalize_time_input("125", Precision::WholeSeconds).as_deref(), Some("2:05"));
    assert_eq!(normalize_time_input("abc", Precision::WholeSeconds), None);
}

#[test]
fn precision_follows_event_kind() {
    assert_eq!(Precision::for_event(EventKind::Track), Precision::Centiseconds);
    assert_eq!(Precision::for_event(EventKind::Road), Precision::WholeSeconds);
    assert_eq!(Precision::for_event(EventKind::Relay), Precision::WholeSeconds);
}

#[test]
fn pace_labels() {
    assert!(approx(parse_pace_label("4:30/km"), 270.0));
    assert!(approx(parse_pace_label(" 4:30 /KM "), 270.0));
    assert!(approx(parse_pace_label("4:30"), 270.0));
    assert_eq!(parse_pace_label("/km"), 0.0);
    assert_eq!(format_pace(270.0), "4:30/km");
    assert_eq!(format_pace(0.0), "0:00/km");
    assert_eq!(format_pace(f64::INFINITY), "0:00/km");
}
