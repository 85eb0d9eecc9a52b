use serde::{Deserialize, Serialize};

/// Web regional settings used for locale-aware formatting.
///
/// `Default` yields the invariant settings used until the remote
/// settings are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalSettings {
    pub thousand_separator: String,
    pub decimal_separator: String,
    /// Server local time minus UTC, in whole hours
    pub hours_offset: i32,
    /// Moment-style date format (`MM/DD/YYYY`, `D.M.YYYY`, ...)
    pub web_date_format: String,
    /// Bit mask of work days, Sunday is the highest bit (62 = Mon..Fri)
    pub work_days: u32,
    pub first_day_of_week: u32,
    pub first_week_of_year: u32,
}

impl Default for RegionalSettings {
    fn default() -> Self {
        Self {
            thousand_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
            hours_offset: 0,
            web_date_format: "MM/DD/YYYY".to_string(),
            work_days: 62,
            first_day_of_week: 0,
            first_week_of_year: 0,
        }
    }
}

impl RegionalSettings {
    pub fn separators(&self) -> DigitSeparators {
        DigitSeparators {
            thousand: self.thousand_separator.clone(),
            decimal: self.decimal_separator.clone(),
        }
    }
}

/// Thousand/decimal separator pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitSeparators {
    pub thousand: String,
    pub decimal: String,
}

impl DigitSeparators {
    pub fn new(thousand: impl Into<String>, decimal: impl Into<String>) -> Self {
        Self {
            thousand: thousand.into(),
            decimal: decimal.into(),
        }
    }
}

impl Default for DigitSeparators {
    fn default() -> Self {
        Self::new(",", ".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_defaults() {
        let s = RegionalSettings::default();
        assert_eq!(s.decimal_separator, ".");
        assert_eq!(s.thousand_separator, ",");
        assert_eq!(s.web_date_format, "MM/DD/YYYY");
        assert_eq!(s.work_days, 62);
        assert_eq!(s.hours_offset, 0);
    }

    #[test]
    fn test_persisted_shape_is_camel_case() {
        let json = serde_json::to_value(RegionalSettings::default()).unwrap();
        assert_eq!(json["webDateFormat"], "MM/DD/YYYY");
        assert_eq!(json["firstDayOfWeek"], 0);
    }
}
