use super::ParseError;
use chrono::Duration;

/// Parse a PBS walltime period (`"HH:MM:SS"`, hours may exceed 99).
pub fn parse_walltime(walltime: &str) -> Result<Duration, ParseError> {
    let parts: Vec<&str> = walltime.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(ParseError::Walltime(walltime.to_string()));
    };

    let hours: i64 = hours
        .parse()
        .map_err(|_| ParseError::Walltime(walltime.to_string()))?;
    let minutes: i64 = minutes
        .parse()
        .map_err(|_| ParseError::Walltime(walltime.to_string()))?;
    let seconds: i64 = seconds
        .parse()
        .map_err(|_| ParseError::Walltime(walltime.to_string()))?;

    Ok(Duration::hours(hours) + Duration::minutes(minutes) + Duration::seconds(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hms() {
        let d = parse_walltime("01:02:03").unwrap();
        assert_eq!(d, Duration::hours(1) + Duration::minutes(2) + Duration::seconds(3));
    }

    #[test]
    fn parses_hours_over_99() {
        let d = parse_walltime("120:00:00").unwrap();
        assert_eq!(d, Duration::hours(120));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(parse_walltime("01:02").is_err());
        assert!(parse_walltime("01:02:03:04").is_err());
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(parse_walltime("aa:bb:cc").is_err());
    }
}
