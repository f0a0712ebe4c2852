use chrono_tz::Tz;

/// Format unix timestamp (millis) as `DD/MM/YYYY HH:MM` in the given timezone
pub fn format_timestamp(ts: i64, tz: Tz) -> String {
    if let Some(dt) = chrono::DateTime::from_timestamp_millis(ts) {
        dt.with_timezone(&tz).format("%d/%m/%Y %H:%M").to_string()
    } else {
        "--/--/---- --:--".to_string()
    }
}

/// Format unix timestamp (millis) as `HH:MM` in the given timezone
pub fn format_time(ts: i64, tz: Tz) -> String {
    if let Some(dt) = chrono::DateTime::from_timestamp_millis(ts) {
        dt.with_timezone(&tz).format("%H:%M").to_string()
    } else {
        "--:--".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_madrid() {
        // 2024-01-22 08:32:15 UTC = 09:32 in Madrid (CET)
        let ts = 1705912335000;
        assert_eq!(format_timestamp(ts, chrono_tz::Europe::Madrid), "22/01/2024 09:32");
        assert_eq!(format_time(ts, chrono_tz::Europe::Madrid), "09:32");
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(i64::MAX, chrono_tz::Europe::Madrid), "--/--/---- --:--");
    }
}
