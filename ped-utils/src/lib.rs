//! Shared utility functions for the pedestrian dashboard crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Wire format the backend expects for `datum` query parameters.
    pub const DATUM_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATUM_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), DATUM_FORMAT)?)
    }

    /// Parse a date string in "YYYYMMDD" format
    pub fn parse_date_compact(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y%m%d")?)
    }

    /// Parse either "YYYY-MM-DD" or "YYYYMMDD".
    ///
    /// Date inputs in the browser always produce the dashed form; the compact
    /// form is accepted for command line convenience.
    pub fn parse_date_any(s: &str) -> anyhow::Result<NaiveDate> {
        parse_date(s).or_else(|_| parse_date_compact(s))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2021, 9, 29).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2021-09-29");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_date_any() {
            let date = NaiveDate::from_ymd_opt(2021, 9, 29).unwrap();
            assert_eq!(parse_date_any("2021-09-29").unwrap(), date);
            assert_eq!(parse_date_any("20210929").unwrap(), date);
            assert_eq!(parse_date_any(" 2021-09-29 ").unwrap(), date);
            assert!(parse_date_any("29.09.2021").is_err());
        }
    }
}
