use chrono::NaiveDate;
use thiserror::Error;

/// Offset between a Minguo (ROC) year and its Gregorian year.
pub const ROC_YEAR_OFFSET: i32 = 1911;

const ROC_DATE_LEN: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    #[error("expected 7 digits (YYYMMDD), got {len} characters")]
    WrongLength { len: usize },

    /// Six digits: a pre-2011 date such as `0991231` whose leading zero was
    /// lost when the cell was stored as a number.
    #[error("expected 7 digits (YYYMMDD), got 6; the leading zero of a year below 100 may have been dropped")]
    MissingLeadingZero,

    #[error("non-digit character {found:?} at position {position}")]
    NonDigit { position: usize, found: char },

    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidCalendarDate { year: i32, month: u32, day: u32 },
}

/// Result of decoding an effective-date cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedDate {
    Valid(NaiveDate),
    Failure { raw: String, reason: DateFormatError },
}

impl ParsedDate {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            ParsedDate::Valid(date) => Some(*date),
            ParsedDate::Failure { .. } => None,
        }
    }
}

/// Decodes a `YYYMMDD` Minguo numeral such as `1090101` (2020-01-01).
pub fn parse_roc_date(input: &str) -> ParsedDate {
    match decode(input) {
        Ok(date) => ParsedDate::Valid(date),
        Err(reason) => ParsedDate::Failure {
            raw: input.to_string(),
            reason,
        },
    }
}

fn decode(input: &str) -> Result<NaiveDate, DateFormatError> {
    let len = input.chars().count();
    if len == ROC_DATE_LEN - 1 && input.chars().all(|c| c.is_ascii_digit()) {
        return Err(DateFormatError::MissingLeadingZero);
    }
    if len != ROC_DATE_LEN {
        return Err(DateFormatError::WrongLength { len });
    }
    if let Some((position, found)) = input.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(DateFormatError::NonDigit { position, found });
    }

    // All seven characters are ASCII digits, so byte slicing is safe and the
    // parses below cannot fail.
    let roc_year: i32 = input[0..3].parse().unwrap_or_default();
    let month: u32 = input[3..5].parse().unwrap_or_default();
    let day: u32 = input[5..7].parse().unwrap_or_default();
    let year = roc_year + ROC_YEAR_OFFSET;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or(DateFormatError::InvalidCalendarDate { year, month, day })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn decodes_minguo_numeral() {
        assert_eq!(parse_roc_date("1090101"), ParsedDate::Valid(ymd(2020, 1, 1)));
        assert_eq!(parse_roc_date("1131231"), ParsedDate::Valid(ymd(2024, 12, 31)));
        assert_eq!(parse_roc_date("0000101"), ParsedDate::Valid(ymd(1911, 1, 1)));
        assert_eq!(parse_roc_date("0010101"), ParsedDate::Valid(ymd(1912, 1, 1)));
    }

    #[test]
    fn accepts_leap_day_only_in_leap_years() {
        assert_eq!(parse_roc_date("1090229"), ParsedDate::Valid(ymd(2020, 2, 29)));
        assert_eq!(
            parse_roc_date("1100229"),
            ParsedDate::Failure {
                raw: "1100229".to_string(),
                reason: DateFormatError::InvalidCalendarDate {
                    year: 2021,
                    month: 2,
                    day: 29
                },
            }
        );
    }

    #[test]
    fn rejects_wrong_length() {
        for raw in ["", "10901", "10901011", "1090101 ", "10901a"] {
            match parse_roc_date(raw) {
                ParsedDate::Failure {
                    raw: failed_raw,
                    reason: DateFormatError::WrongLength { .. },
                } => assert_eq!(failed_raw, raw),
                other => panic!("expected length failure for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn six_digit_numeral_reports_dropped_leading_zero() {
        assert_eq!(
            parse_roc_date("991231"),
            ParsedDate::Failure {
                raw: "991231".to_string(),
                reason: DateFormatError::MissingLeadingZero,
            }
        );
        assert!(DateFormatError::MissingLeadingZero
            .to_string()
            .contains("leading zero"));
    }

    #[test]
    fn rejects_non_digit_content() {
        assert_eq!(
            parse_roc_date("abc1234"),
            ParsedDate::Failure {
                raw: "abc1234".to_string(),
                reason: DateFormatError::NonDigit {
                    position: 0,
                    found: 'a'
                },
            }
        );
        assert!(matches!(
            parse_roc_date("109-1-1"),
            ParsedDate::Failure {
                reason: DateFormatError::NonDigit { position: 3, .. },
                ..
            }
        ));
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        let parsed = parse_roc_date("一〇九〇一〇一");
        assert!(matches!(
            parsed,
            ParsedDate::Failure {
                reason: DateFormatError::NonDigit { position: 0, .. },
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_month_and_day() {
        for raw in ["1091301", "1090001", "1090100", "1090431"] {
            assert!(
                matches!(
                    parse_roc_date(raw),
                    ParsedDate::Failure {
                        reason: DateFormatError::InvalidCalendarDate { .. },
                        ..
                    }
                ),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn failure_reason_is_readable() {
        let reason = DateFormatError::NonDigit {
            position: 2,
            found: 'x',
        };
        assert_eq!(reason.to_string(), "non-digit character 'x' at position 2");
    }
}
