use chrono::NaiveDate;
use domain_primitives::*;
use serde::{Deserialize, Serialize};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn closed(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, Some(end)).unwrap()
}

// --- Construction ---

#[test]
fn test_new_closed() {
    let range = closed(date(2025, 8, 1), date(2025, 8, 31));
    assert_eq!(range.start(), date(2025, 8, 1));
    assert_eq!(range.end(), Some(date(2025, 8, 31)));
    assert!(!range.is_open_ended());
    assert_eq!(range.effective_end(), date(2025, 8, 31));
}

#[test]
fn test_new_end_before_start_fails() {
    let err = DateRange::new(date(2025, 8, 2), Some(date(2025, 8, 1))).unwrap_err();
    assert!(matches!(err, Error::Argument { param: "start", .. }));
}

#[test]
fn test_new_same_day() {
    let range = DateRange::single_day(date(2025, 8, 1)).unwrap();
    assert_eq!(range.start(), range.end().unwrap());
}

#[test]
fn test_open_ended() {
    let range = DateRange::open_ended(date(2025, 8, 1)).unwrap();
    assert!(range.is_open_ended());
    assert_eq!(range.end(), None);
    assert_eq!(range.effective_end(), MAX_DATE);
}

#[test]
fn test_new_outside_supported_dates() {
    let err = DateRange::new(date(10000, 1, 1), None).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { param: "start", .. }));

    let err = DateRange::new(date(2025, 1, 1), Some(date(10000, 1, 1))).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { param: "end", .. }));
}

#[test]
fn test_default_is_universal_range() {
    let range = DateRange::default();
    assert_eq!(range.start(), MIN_DATE);
    assert!(range.is_open_ended());
    assert!(range.contains(MAX_DATE));
    assert!(range.contains(MIN_DATE));
    assert_eq!(range.to_string(), "0001-01-01|∞");
}

#[test]
fn test_equality_is_structural() {
    let closed_at_max = closed(date(2025, 1, 1), MAX_DATE);
    let open = DateRange::open_ended(date(2025, 1, 1)).unwrap();
    assert_ne!(closed_at_max, open);
    assert_eq!(open, DateRange::open_ended(date(2025, 1, 1)).unwrap());
}

#[test]
fn test_ordering_open_end_last() {
    let mut ranges = vec![
        DateRange::open_ended(date(2025, 1, 1)).unwrap(),
        closed(date(2025, 1, 1), date(2025, 2, 1)),
        closed(date(2024, 6, 1), date(2024, 6, 2)),
    ];
    ranges.sort();
    assert_eq!(ranges[0].start(), date(2024, 6, 1));
    assert_eq!(ranges[1].end(), Some(date(2025, 2, 1)));
    assert!(ranges[2].is_open_ended());
}

// --- Formatting ---

#[test]
fn test_to_string_closed() {
    let range = closed(date(2025, 8, 1), date(2025, 8, 31));
    assert_eq!(range.to_string(), "2025-08-01|2025-08-31");
}

#[test]
fn test_to_string_open_ended() {
    let range = DateRange::open_ended(date(2025, 8, 1)).unwrap();
    assert_eq!(range.to_string(), "2025-08-01|∞");
}

#[test]
fn test_to_string_pads_small_years() {
    let range = closed(date(33, 2, 3), date(987, 11, 5));
    assert_eq!(range.to_string(), "0033-02-03|0987-11-05");
}

#[test]
fn test_format_into_buffer() {
    let range = closed(date(2025, 8, 1), date(2025, 8, 31));
    let mut buf = [0u8; 32];
    let written = range.format_into(&mut buf).unwrap();
    assert_eq!(written, 21);
    assert_eq!(&buf[..written], b"2025-08-01|2025-08-31");

    let open = DateRange::open_ended(date(2025, 8, 1)).unwrap();
    let written = open.format_into(&mut buf).unwrap();
    assert_eq!(written, open.formatted_len());
    assert_eq!(std::str::from_utf8(&buf[..written]).unwrap(), "2025-08-01|∞");
}

#[test]
fn test_format_into_too_small() {
    let range = closed(date(2025, 8, 1), date(2025, 8, 31));
    let mut buf = [0u8; 20];
    let err = range.format_into(&mut buf).unwrap_err();
    assert_eq!(
        err,
        BufferTooSmall {
            required: 21,
            available: 20
        }
    );
    assert!(buf.iter().all(|b| *b == 0));
}

// --- Parsing ---

#[test]
fn test_try_parse_closed() {
    let range = DateRange::try_parse("2025-08-01|2025-08-31").unwrap();
    assert_eq!(range, closed(date(2025, 8, 1), date(2025, 8, 31)));
}

#[test]
fn test_try_parse_open_ended() {
    let range = DateRange::try_parse("2025-08-01|∞").unwrap();
    assert_eq!(range, DateRange::open_ended(date(2025, 8, 1)).unwrap());
}

#[test]
fn test_try_parse_tolerates_whitespace() {
    let range = DateRange::try_parse("  2025-08-01 |  2025-08-02 ").unwrap();
    assert_eq!(range, closed(date(2025, 8, 1), date(2025, 8, 2)));
    assert!(DateRange::try_parse(" 2025-08-01 | ∞ ").is_some());
}

#[test]
fn test_try_parse_rejects() {
    let cases = [
        "",
        "   ",
        "2025-08-01",
        "2025-08-01|2025-08-01|2025-08-02",
        "|2025-08-01",
        "2025-08-01|",
        "2025-08-01| ",
        "2025-08-02|2025-08-01",
        "2025-8-1|2025-08-02",
        "2025-08-01|infinity",
        "2025-08-01|∞∞",
        "∞|2025-08-01",
        "2025-13-01|∞",
        "01/08/2025|∞",
        "2025-08-01T00:00|∞",
    ];
    for input in &cases {
        assert!(
            DateRange::try_parse(input).is_none(),
            "{input:?} should not parse"
        );
    }
}

#[test]
fn test_parse_strict_message() {
    let err = DateRange::parse("garbage").unwrap_err();
    assert_eq!(err, Error::Format(INVALID_DATE_RANGE_FORMAT.to_string()));
    assert_eq!(err.to_string(), INVALID_DATE_RANGE_FORMAT);

    let err: Error = "".parse::<DateRange>().unwrap_err();
    assert_eq!(err.to_string(), INVALID_DATE_RANGE_FORMAT);
}

#[test]
fn test_from_str() {
    let range: DateRange = "2025-01-01|2025-12-31".parse().unwrap();
    assert_eq!(range.try_duration(), Some(365));
}

// --- JSON ---

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Booking {
    name: String,
    period: DateRange,
    blackout: Option<DateRange>,
}

#[test]
fn test_json_serialize_open_ended() {
    let range = DateRange::open_ended(date(2025, 8, 1)).unwrap();
    let json = serde_json::to_string(&range).unwrap();
    assert_eq!(json, "\"2025-08-01|∞\"");
}

#[test]
fn test_json_serialize_closed() {
    let range = closed(date(2025, 8, 1), date(2025, 8, 2));
    let json = serde_json::to_string(&range).unwrap();
    assert_eq!(json, "\"2025-08-01|2025-08-02\"");
}

#[test]
fn test_json_deserialize_escaped_infinity() {
    let escaped: DateRange = serde_json::from_str("\"2025-08-01|\\u221E\"").unwrap();
    let raw: DateRange = serde_json::from_str("\"2025-08-01|∞\"").unwrap();
    assert_eq!(escaped, raw);
    assert!(raw.is_open_ended());
}

#[test]
fn test_json_rejects_non_string_tokens() {
    for json in ["42", "true", "null", "{}", "[]", "1.5"] {
        let err = serde_json::from_str::<DateRange>(json).unwrap_err();
        assert!(
            err.to_string().contains(EXPECTED_JSON_STRING),
            "{json}: {err}"
        );
        assert!(err.to_string().starts_with("Expected a JSON string"));
    }
}

#[test]
fn test_json_rejects_empty_string() {
    for json in ["\"\"", "\"   \""] {
        let err = serde_json::from_str::<DateRange>(json).unwrap_err();
        assert!(err.to_string().contains("cannot be null/empty"), "{err}");
    }
}

#[test]
fn test_json_rejects_invalid_format() {
    let err = serde_json::from_str::<DateRange>("\"2025-08-02|2025-08-01\"").unwrap_err();
    assert!(err.to_string().contains(INVALID_DATE_RANGE_FORMAT), "{err}");
}

#[test]
fn test_json_nested_field() {
    let booking = Booking {
        name: "summer".into(),
        period: closed(date(2025, 6, 1), date(2025, 8, 31)),
        blackout: Some(DateRange::open_ended(date(2025, 8, 15)).unwrap()),
    };
    let json = serde_json::to_string(&booking).unwrap();
    assert_eq!(
        json,
        r#"{"name":"summer","period":"2025-06-01|2025-08-31","blackout":"2025-08-15|∞"}"#
    );
    let back: Booking = serde_json::from_str(&json).unwrap();
    assert_eq!(back, booking);
}

#[test]
fn test_json_nested_null_option() {
    let json = r#"{"name":"x","period":"2025-01-01|∞","blackout":null}"#;
    let booking: Booking = serde_json::from_str(json).unwrap();
    assert!(booking.blackout.is_none());
    assert!(booking.period.is_open_ended());
}

#[test]
fn test_json_nested_invalid_field_fails() {
    let json = r#"{"name":"x","period":7,"blackout":null}"#;
    let err = serde_json::from_str::<Booking>(json).unwrap_err();
    assert!(err.to_string().contains(EXPECTED_JSON_STRING));
}
