use std::collections::{BTreeMap, HashMap};

/// Opaque key → localized string mapping
pub trait LocalizedStrings {
    fn get(&self, key: &str) -> Option<&str>;
}

impl LocalizedStrings for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl LocalizedStrings for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

/// Built-in English strings for relative date phrases and user cards.
///
/// Interval keys use the pluralization encoding understood by
/// [`crate::localized_count_value`]: `||` separates alternatives, `,`
/// separates ranges or exact values inside one alternative.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrings;

const DEFAULT_STRINGS: &[(&str, &str)] = &[
    ("L_RelativeDateTime_AFewSeconds", "A few seconds ago"),
    ("L_RelativeDateTime_AFewSecondsFuture", "In a few seconds"),
    ("L_RelativeDateTime_AboutAMinute", "About a minute ago"),
    ("L_RelativeDateTime_AboutAMinuteFuture", "In about a minute"),
    ("L_RelativeDateTime_XMinutes", "{0} minute ago||{0} minutes ago"),
    ("L_RelativeDateTime_XMinutesIntervals", "1||2-"),
    ("L_RelativeDateTime_XMinutesFuture", "In {0} minute||In {0} minutes"),
    ("L_RelativeDateTime_XMinutesFutureIntervals", "1||2-"),
    ("L_RelativeDateTime_AboutAnHour", "About an hour ago"),
    ("L_RelativeDateTime_AboutAnHourFuture", "In about an hour"),
    ("L_RelativeDateTime_Yesterday", "Yesterday"),
    ("L_RelativeDateTime_Tomorrow", "Tomorrow"),
    ("L_RelativeDateTime_YesterdayAndTime", "Yesterday at {0}"),
    ("L_RelativeDateTime_TomorrowAndTime", "Tomorrow at {0}"),
    ("L_RelativeDateTime_XHours", "{0} hour ago||{0} hours ago"),
    ("L_RelativeDateTime_XHoursIntervals", "1||2-"),
    ("L_RelativeDateTime_XHoursFuture", "In {0} hour||In {0} hours"),
    ("L_RelativeDateTime_XHoursFutureIntervals", "1||2-"),
    ("L_RelativeDateTime_DayAndTime", "{1} at {0}"),
    ("L_RelativeDateTime_XDays", "{0} day ago||{0} days ago"),
    ("L_RelativeDateTime_XDaysIntervals", "1||2-"),
    ("L_RelativeDateTime_XDaysFuture", "{0} day from now||{0} days from now"),
    ("L_RelativeDateTime_XDaysFutureIntervals", "1||2-"),
    ("L_RelativeDateTime_Today", "Today"),
    ("SendEmailTo", "Send email to {0}"),
    ("StartChatWith", "Start a chat with {0}"),
    ("Contact", "Contact"),
    ("UpdateProfile", "Update your profile"),
];

impl LocalizedStrings for DefaultStrings {
    fn get(&self, key: &str) -> Option<&str> {
        DEFAULT_STRINGS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

/// Overrides layered on top of another table
pub struct Overlay<'a, B: LocalizedStrings + ?Sized> {
    pub overrides: &'a BTreeMap<String, String>,
    pub base: &'a B,
}

impl<B: LocalizedStrings + ?Sized> LocalizedStrings for Overlay<'_, B> {
    fn get(&self, key: &str) -> Option<&str> {
        self.overrides
            .get(key)
            .map(String::as_str)
            .or_else(|| self.base.get(key))
    }
}
