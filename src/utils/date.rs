use chrono::NaiveDate;

use crate::consts::DATE_FORMAT;
use crate::error::AppError;

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let trimmed = s.trim();
    // Try YYYYMMDD
    if trimmed.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(d);
    }
    Err(AppError::InvalidDate {
        input: s.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compact_and_dashed() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        assert_eq!(parse_date("20250604").unwrap(), expected);
        assert_eq!(parse_date("2025-06-04").unwrap(), expected);
        assert_eq!(parse_date(" 2025-06-04 ").unwrap(), expected);
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_date("June 4").unwrap_err();
        assert!(err.to_string().contains("June 4"));
        assert!(parse_date("2025-13-01").is_err());
    }
}
