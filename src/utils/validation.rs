use crate::core::slots::TimeSlots;
use crate::utils::error::{ReservationError, Result};
use chrono::NaiveDate;
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 表單日期格式 (與 `<input type="date">` 相同)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn validate_date(date: &str) -> Result<NaiveDate> {
    if date.is_empty() {
        return Err(ReservationError::MissingDate);
    }

    let parsed =
        NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|e| ReservationError::InvalidDate {
            value: date.to_string(),
            reason: e.to_string(),
        })?;

    // chrono 接受 "2025-6-1"；key 不做正規化，必須與標準格式完全一致
    if parsed.format(DATE_FORMAT).to_string() != date {
        return Err(ReservationError::InvalidDate {
            value: date.to_string(),
            reason: format!("expected zero-padded YYYY-MM-DD, e.g. {}", parsed.format(DATE_FORMAT)),
        });
    }

    Ok(parsed)
}

pub fn validate_time_slot(slots: &TimeSlots, time: &str) -> Result<()> {
    if time.is_empty() {
        return Err(ReservationError::MissingTime);
    }

    if !slots.contains(time) {
        return Err(ReservationError::UnknownTimeSlot {
            time: time.to_string(),
        });
    }

    Ok(())
}

/// Digit-only phone pattern with an inclusive length range.
#[derive(Debug, Clone)]
pub struct PhonePattern {
    regex: Regex,
    min: usize,
    max: usize,
}

impl PhonePattern {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        validate_positive_number("phone.min_digits", min, 1)?;
        if min > max {
            return Err(ReservationError::InvalidConfigValueError {
                field: "phone.max_digits".to_string(),
                value: max.to_string(),
                reason: format!("Must not be smaller than phone.min_digits ({})", min),
            });
        }

        // `\d` 在 Rust regex 會匹配 Unicode 數字，這裡只接受 ASCII
        let regex = Regex::new(&format!("^[0-9]{{{},{}}}$", min, max)).map_err(|e| {
            ReservationError::InvalidConfigValueError {
                field: "phone".to_string(),
                value: format!("{}..={}", min, max),
                reason: e.to_string(),
            }
        })?;

        Ok(Self { regex, min, max })
    }

    pub fn is_match(&self, phone: &str) -> bool {
        self.regex.is_match(phone)
    }

    pub fn validate(&self, phone: &str) -> Result<()> {
        if self.is_match(phone) {
            Ok(())
        } else {
            Err(ReservationError::InvalidPhoneFormat {
                min: self.min,
                max: self.max,
            })
        }
    }

    pub fn bounds(&self) -> (usize, usize) {
        (self.min, self.max)
    }
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReservationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReservationError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ReservationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ReservationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ReservationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ReservationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReservationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ReservationError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_date() {
        assert!(validate_date("2025-06-01").is_ok());
        assert!(matches!(validate_date(""), Err(ReservationError::MissingDate)));
        assert!(matches!(
            validate_date("01/06/2025"),
            Err(ReservationError::InvalidDate { .. })
        ));
        assert!(matches!(
            validate_date("2025-02-30"),
            Err(ReservationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_validate_date_requires_canonical_spelling() {
        for date in ["2025-6-1", "2025-06-1", "2025-6-01", "+2025-06-01", " 2025-06-01"] {
            assert!(
                matches!(validate_date(date), Err(ReservationError::InvalidDate { .. })),
                "{} should be rejected",
                date
            );
        }
        assert_eq!(
            validate_date("2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn test_validate_time_slot() {
        let slots = TimeSlots::new(8, 20);
        assert!(validate_time_slot(&slots, "9:00 AM").is_ok());
        assert!(validate_time_slot(&slots, "7:00 PM").is_ok());
        assert!(matches!(
            validate_time_slot(&slots, ""),
            Err(ReservationError::MissingTime)
        ));
        // 沒有正規化，"09:00 AM" 不等於 "9:00 AM"
        assert!(matches!(
            validate_time_slot(&slots, "09:00 AM"),
            Err(ReservationError::UnknownTimeSlot { .. })
        ));
        assert!(validate_time_slot(&slots, "8:00 PM").is_err());
    }

    #[test]
    fn test_phone_pattern_bounds() {
        let extended = PhonePattern::new(8, 13).unwrap();
        let standard = PhonePattern::new(8, 11).unwrap();

        assert!(extended.is_match("12345678"));
        assert!(extended.is_match("1234567890123"));
        assert!(!extended.is_match("12345678901234"));

        assert!(standard.is_match("12345678901"));
        assert!(!standard.is_match("123456789012"));

        for pattern in [&extended, &standard] {
            assert!(!pattern.is_match("12345"));
            assert!(!pattern.is_match(""));
            assert!(!pattern.is_match("5555-1234"));
            assert!(!pattern.is_match(" 55551234"));
            assert!(!pattern.is_match("+50255551234"));
        }
    }

    #[test]
    fn test_phone_pattern_rejects_non_ascii_digits() {
        let pattern = PhonePattern::new(8, 13).unwrap();
        assert!(!pattern.is_match("١٢٣٤٥٦٧٨"));
        assert!(!pattern.is_match("１２３４５６７８"));
    }

    #[test]
    fn test_phone_pattern_rejects_bad_bounds() {
        assert!(PhonePattern::new(0, 8).is_err());
        assert!(PhonePattern::new(12, 8).is_err());
        assert_eq!(PhonePattern::new(8, 8).unwrap().bounds(), (8, 8));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("submission.endpoint", "https://example.com").is_ok());
        assert!(validate_url("submission.endpoint", "http://Clinica.somee.com/api/Insert").is_ok());
        assert!(validate_url("submission.endpoint", "").is_err());
        assert!(validate_url("submission.endpoint", "invalid-url").is_err());
        assert!(validate_url("submission.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("schedule.end_hour", 20u32, 1, 24).is_ok());
        assert!(validate_range("schedule.end_hour", 25u32, 1, 24).is_err());
    }
}
