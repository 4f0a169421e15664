//! Timestamp parsing for upstream payloads.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::error::DomainError;

/// Naive layouts accepted when the upstream omits an offset.
const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an upstream timestamp.
///
/// Accepts RFC 3339 (including a trailing `Z`). A date-time without an offset
/// is taken to be UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidTimestamp {
            value: raw.to_string(),
        });
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| DomainError::InvalidTimestamp {
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_zulu_suffix() {
        let parsed = parse_timestamp("2024-03-02T15:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 2, 15, 0, 0).unwrap());
    }

    #[test]
    fn normalises_offsets_to_utc() {
        let parsed = parse_timestamp("2024-03-02T18:00:00+03:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 2, 15, 0, 0).unwrap());
    }

    #[test]
    fn naive_timestamp_is_utc() {
        let parsed = parse_timestamp("2024-03-02T15:00:00.250").unwrap();
        assert_eq!(parsed.timestamp_millis() % 1000, 250);
        assert_eq!(
            parse_timestamp("2024-03-02 15:00:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 2, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_timestamp("next sunday"),
            Err(DomainError::InvalidTimestamp { .. })
        ));
        assert!(parse_timestamp("   ").is_err());
    }
}
