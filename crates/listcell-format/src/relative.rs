use crate::numbers::parse_int;
use crate::strings::LocalizedStrings;

/// Build a relative date-time phrase ("2 hours ago", "Tomorrow at 10:00").
///
/// `format` is the host's pipe-delimited encoding:
/// `isRelative|isFuture|formatType|timeValue|dayValue`. A non-relative
/// value (`0|...`) is returned as is, minus the leading flag.
///
/// Returns `None` for an unknown format type or when the selected phrase
/// has no text.
pub fn relative_date_time_string(format: &str, strings: &dyn LocalizedStrings) -> Option<String> {
    let parts: Vec<&str> = format.split('|').collect();

    if parts[0] == "0" {
        return Some(format.get(2..).unwrap_or_default().to_string());
    }

    let is_future = parts.get(1) == Some(&"1");
    let format_type = parts.get(2).copied().unwrap_or_default();
    let time = parts.get(3).copied();
    let day = parts.get(4).copied();

    let pick = |past: &str, future: &str| -> Option<String> {
        strings
            .get(if is_future { future } else { past })
            .map(str::to_string)
    };
    let count_phrase = |past: &str, future: &str| -> Option<String> {
        let (key, intervals) = if is_future {
            (future.to_string(), format!("{}Intervals", future))
        } else {
            (past.to_string(), format!("{}Intervals", past))
        };
        localized_count_value(strings.get(&key), strings.get(&intervals), js_number(time))
    };

    let mut result: Option<String> = None;
    let mut placeholders: Option<String> = None;

    match format_type {
        "1" => {
            result = pick(
                "L_RelativeDateTime_AFewSeconds",
                "L_RelativeDateTime_AFewSecondsFuture",
            )
        }
        "2" => {
            result = pick(
                "L_RelativeDateTime_AboutAMinute",
                "L_RelativeDateTime_AboutAMinuteFuture",
            )
        }
        "3" => {
            placeholders = count_phrase(
                "L_RelativeDateTime_XMinutes",
                "L_RelativeDateTime_XMinutesFuture",
            )
        }
        "4" => {
            result = pick(
                "L_RelativeDateTime_AboutAnHour",
                "L_RelativeDateTime_AboutAnHourFuture",
            )
        }
        "5" => {
            if time.is_none() {
                result = pick("L_RelativeDateTime_Yesterday", "L_RelativeDateTime_Tomorrow");
            } else {
                placeholders = pick(
                    "L_RelativeDateTime_YesterdayAndTime",
                    "L_RelativeDateTime_TomorrowAndTime",
                );
            }
        }
        "6" => {
            placeholders = count_phrase("L_RelativeDateTime_XHours", "L_RelativeDateTime_XHoursFuture")
        }
        "7" => {
            if day.is_none() {
                result = time.map(str::to_string);
            } else {
                placeholders = strings.get("L_RelativeDateTime_DayAndTime").map(str::to_string);
            }
        }
        "8" => {
            placeholders = count_phrase("L_RelativeDateTime_XDays", "L_RelativeDateTime_XDaysFuture")
        }
        "9" => result = strings.get("L_RelativeDateTime_Today").map(str::to_string),
        _ => {}
    }

    if let Some(template) = placeholders {
        let mut text = template.replacen("{0}", time.unwrap_or("null"), 1);
        if let Some(day) = day {
            text = text.replacen("{1}", day, 1);
        }
        result = Some(text);
    }

    result
}

/// Select the pluralization variant of `format` for count `n`.
///
/// `format` and `intervals` are both `||`-separated and aligned by position.
/// Each interval alternative is a `,`-separated list of exact values (`1`)
/// or inclusive ranges (`2-4`, `-4` from zero, `5-` unbounded above). The
/// first alternative containing `n` wins.
///
/// Returns `None` when either input is missing and an empty string when no
/// alternative matches.
pub fn localized_count_value(
    format: Option<&str>,
    intervals: Option<&str>,
    n: f64,
) -> Option<String> {
    let (format, intervals) = (format?, intervals?);

    let matched = intervals
        .split("||")
        .enumerate()
        .filter(|(_, option)| !option.is_empty())
        .find(|(_, option)| {
            option
                .split(',')
                .filter(|part| !part.is_empty())
                .any(|part| interval_contains(part, n))
        })
        .map(|(idx, _)| idx);

    let result = matched
        .and_then(|idx| format.split("||").nth(idx))
        .filter(|variant| !variant.is_empty())
        .unwrap_or_default();

    Some(result.to_string())
}

fn interval_contains(part: &str, n: f64) -> bool {
    if parse_number_invariant(part).is_some() {
        return parse_int(part).is_some_and(|exact| n == exact as f64);
    }

    let bounds: Vec<&str> = part.split('-').collect();
    if bounds.len() != 2 {
        return false;
    }

    let low = if bounds[0].is_empty() {
        0
    } else if parse_number_invariant(bounds[0]).is_none() {
        return false;
    } else {
        match parse_int(bounds[0]) {
            Some(v) => v,
            None => return false,
        }
    };

    if n < low as f64 {
        return false;
    }
    if bounds[1].is_empty() {
        return true;
    }
    if parse_number_invariant(bounds[1]).is_none() {
        return false;
    }
    parse_int(bounds[1]).is_some_and(|high| n <= high as f64)
}

/// Invariant-culture number parse: ASCII digits, sign, `.` and exponent only
fn parse_number_invariant(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty()
        || !s
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Numeric conversion of an optional string: missing → 0, unparsable → NaN
fn js_number(s: Option<&str>) -> f64 {
    match s {
        None => 0.0,
        Some(s) if s.trim().is_empty() => 0.0,
        Some(s) => parse_number_invariant(s).unwrap_or(f64::NAN),
    }
}
