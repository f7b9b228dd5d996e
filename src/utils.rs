use chrono::{DateTime, SecondsFormat, Utc};

/// Current time as ISO-8601 UTC with millisecond precision, e.g.
/// `2026-01-31T09:15:00.123Z`. Used for `deletedAt` / `wrappedAt` stamps.
pub fn now_iso8601() -> String {
    format_iso8601(Utc::now())
}

pub fn format_iso8601(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Unix seconds as ISO-8601, or the raw number when out of range.
pub fn format_unix_secs(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| DateTime::<Utc>::from_timestamp(s, 0))
        .map(format_iso8601)
        .unwrap_or_else(|| secs.to_string())
}

/// Render a USD amount held in cents, e.g. `1999` as `$19.99`.
pub fn format_usd_cents(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Render an integer `value * 10^expo` as a decimal string. Falls back to
/// `{value}e{expo}` when the scaled value does not fit in an `i128`.
pub fn format_scaled(value: i128, expo: i32) -> String {
    let raw = || format!("{}e{}", value, expo);
    let Some(scale) = 10i128.checked_pow(expo.unsigned_abs()) else {
        return raw();
    };
    if expo >= 0 {
        return value
            .checked_mul(scale)
            .map(|v| v.to_string())
            .unwrap_or_else(raw);
    }
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    let scale = scale.unsigned_abs();
    format!(
        "{}{}.{:0width$}",
        sign,
        abs / scale,
        abs % scale,
        width = expo.unsigned_abs() as usize
    )
}

/// Render a basis-point value, e.g. `250` as `2.50%`.
pub fn format_bps(bps: u64) -> String {
    format!("{}.{:02}%", bps / 100, bps % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_iso8601_has_millis_and_z() {
        let t = Utc.with_ymd_and_hms(2026, 1, 31, 9, 15, 0).unwrap();
        assert_eq!(format_iso8601(t), "2026-01-31T09:15:00.000Z");
        assert!(now_iso8601().ends_with('Z'));
        assert_eq!(format_unix_secs(0), "1970-01-01T00:00:00.000Z");
        assert_eq!(format_unix_secs(u64::MAX), u64::MAX.to_string());
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(format_usd_cents(1999), "$19.99");
        assert_eq!(format_usd_cents(5), "$0.05");
        assert_eq!(format_scaled(123456, -2), "1234.56");
        assert_eq!(format_scaled(-5, -3), "-0.005");
        assert_eq!(format_scaled(7, 2), "700");
        assert_eq!(format_bps(250), "2.50%");
    }

    #[test]
    fn test_format_scaled_out_of_range_exponent() {
        assert_eq!(format_scaled(1, -40), "1e-40");
        assert_eq!(format_scaled(1, 40), "1e40");
        assert_eq!(format_scaled(i128::MAX, 1), format!("{}e1", i128::MAX));
        assert_eq!(
            format_scaled(i128::MIN, -2),
            "-1701411834604692317316873037158841057.28"
        );
        assert_eq!(format_scaled(1, -38).len(), "0.".len() + 38);
    }
}
