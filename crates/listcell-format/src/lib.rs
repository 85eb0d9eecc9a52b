//! Pure, stateless value formatting used by the cell dispatcher.
//!
//! Nothing here touches the network or shared state; regional settings and
//! localized strings are passed in by the caller.

pub mod dates;
pub mod digits;
pub mod encode;
pub mod files;
pub mod html;
pub mod numbers;
pub mod relative;
pub mod strings;
pub mod url;

pub use dates::{deformat_date, derive_web_date_format, format_date, is_valid_date, parse_date};
pub use digits::{
    deformat_digit, digit_test_regex, escape_separator, format_digit, is_correct_locale_digit,
    is_numeric,
};
pub use encode::encode_text;
pub use files::{file_extension, file_icon_name, icon_for_extension};
pub use html::text_from_html;
pub use numbers::{parse_float, parse_int};
pub use relative::{localized_count_value, relative_date_time_string};
pub use strings::{DefaultStrings, LocalizedStrings, Overlay};
pub use url::{query_param, trim_slash};
