// Date rules

use chrono::{DateTime, Datelike, Timelike};

/// Largest magnitude a script time value may have, in milliseconds
const MAX_TIME_VALUE: f64 = 8.64e15;

/// `Date.prototype.toISOString`, or `None` for an invalid date
pub fn iso_string(epoch_ms: f64) -> Option<String> {
    if !epoch_ms.is_finite() || epoch_ms.abs() > MAX_TIME_VALUE {
        return None;
    }
    let dt = DateTime::from_timestamp_millis(epoch_ms.trunc() as i64)?;
    let year = dt.year();
    let year_text = if (0..=9999).contains(&year) {
        format!("{:04}", year)
    } else if year < 0 {
        format!("-{:06}", year.unsigned_abs())
    } else {
        format!("+{:06}", year)
    };
    Some(format!(
        "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        year_text,
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.timestamp_subsec_millis()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        assert_eq!(iso_string(0.0).unwrap(), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_millis_and_negative() {
        assert_eq!(
            iso_string(1_577_836_800_123.0).unwrap(),
            "2020-01-01T00:00:00.123Z"
        );
        assert_eq!(iso_string(-1.0).unwrap(), "1969-12-31T23:59:59.999Z");
    }

    #[test]
    fn test_extended_years() {
        assert_eq!(
            iso_string(253_402_300_800_000.0).unwrap(),
            "+010000-01-01T00:00:00.000Z"
        );
    }

    #[test]
    fn test_invalid() {
        assert!(iso_string(f64::NAN).is_none());
        assert!(iso_string(8.64e15 + 1.0).is_none());
    }
}
