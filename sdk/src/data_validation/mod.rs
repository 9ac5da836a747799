// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Parsing and checking of submitted form values.
//!
//! Every helper takes the raw text posted for a field, records any problem in the supplied
//! `DataValidationError` under the field name, and returns the parsed value when it is usable.
//! Blank optional values parse to `None`.

mod error;

use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;

pub use error::DataValidationError;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_MOBILE: &str = "Enter a valid mobile number (7–15 digits).";
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";
pub const MISSING_CATEGORY: &str = "Please select a category.";

/// Digits allowed in a quantity or money value, including the fractional part.
pub const MAX_DIGITS: u32 = 10;
/// Fractional digits allowed in a quantity or money value.
pub const DECIMAL_PLACES: u32 = 2;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

lazy_static! {
    static ref MOBILE_FORMAT: Regex = Regex::new(r"^\d{7,15}$").expect("valid mobile pattern");
}

pub fn is_valid_mobile(value: &str) -> bool {
    MOBILE_FORMAT.is_match(value)
}

/// Trimmed text of a required field, at most `max_length` characters.
pub fn required_text(
    errors: &mut DataValidationError,
    field: &str,
    value: &str,
    max_length: usize,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.add_field_error(field, REQUIRED);
        return None;
    }
    check_length(errors, field, value, max_length)
}

/// Trimmed text of an optional field; blank text is `None`.
pub fn optional_text(
    errors: &mut DataValidationError,
    field: &str,
    value: &str,
    max_length: usize,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    check_length(errors, field, value, max_length)
}

fn check_length(
    errors: &mut DataValidationError,
    field: &str,
    value: &str,
    max_length: usize,
) -> Option<String> {
    let length = value.chars().count();
    if length > max_length {
        errors.add_field_error(
            field,
            &format!(
                "Ensure this value has at most {} characters (it has {}).",
                max_length, length
            ),
        );
        return None;
    }
    Some(value.to_string())
}

/// A 7 to 15 digit mobile number.
pub fn mobile(
    errors: &mut DataValidationError,
    field: &str,
    value: &str,
    required: bool,
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        if required {
            errors.add_field_error(field, REQUIRED);
        }
        return None;
    }
    if !is_valid_mobile(value) {
        errors.add_field_error(field, INVALID_MOBILE);
        return None;
    }
    Some(value.to_string())
}

/// A non-negative decimal with at most `MAX_DIGITS` digits, `DECIMAL_PLACES` of them after the
/// point. `label` is used in the "cannot be negative" message.
pub fn decimal(
    errors: &mut DataValidationError,
    field: &str,
    label: &str,
    value: &str,
    required: bool,
) -> Option<Decimal> {
    let value = value.trim();
    if value.is_empty() {
        if required {
            errors.add_field_error(field, REQUIRED);
        }
        return None;
    }

    let number = match Decimal::from_str(value) {
        Ok(number) => number,
        Err(_) => {
            errors.add_field_error(field, "Enter a number.");
            return None;
        }
    };

    let decimals = number.scale();
    let whole_digits = {
        let whole = number.abs().trunc().to_string();
        if whole == "0" {
            0
        } else {
            whole.len() as u32
        }
    };

    if whole_digits + decimals > MAX_DIGITS {
        errors.add_field_error(
            field,
            &format!(
                "Ensure that there are no more than {} digits in total.",
                MAX_DIGITS
            ),
        );
        return None;
    }
    if decimals > DECIMAL_PLACES {
        errors.add_field_error(
            field,
            &format!(
                "Ensure that there are no more than {} decimal places.",
                DECIMAL_PLACES
            ),
        );
        return None;
    }
    if whole_digits > MAX_DIGITS - DECIMAL_PLACES {
        errors.add_field_error(
            field,
            &format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                MAX_DIGITS - DECIMAL_PLACES
            ),
        );
        return None;
    }
    if number.is_sign_negative() && !number.is_zero() {
        errors.add_field_error(field, &format!("{} cannot be negative.", label));
        return None;
    }

    Some(number)
}

/// The id of a selected row, e.g. a `<select>` of employees.
pub fn id(
    errors: &mut DataValidationError,
    field: &str,
    value: &str,
    required: bool,
) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        if required {
            errors.add_field_error(field, REQUIRED);
        }
        return None;
    }
    match value.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add_field_error(field, INVALID_CHOICE);
            None
        }
    }
}

/// A calendar date in `YYYY-MM-DD` form.
pub fn date(
    errors: &mut DataValidationError,
    field: &str,
    value: &str,
    required: bool,
) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        if required {
            errors.add_field_error(field, REQUIRED);
        }
        return None;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add_field_error(field, "Enter a valid date.");
            None
        }
    }
}

/// A date and time as sent by a `datetime-local` input, with or without seconds.
pub fn datetime(
    errors: &mut DataValidationError,
    field: &str,
    value: &str,
    required: bool,
) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        if required {
            errors.add_field_error(field, REQUIRED);
        }
        return None;
    }
    let parsed = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok());
    if parsed.is_none() {
        errors.add_field_error(field, "Enter a valid date/time.");
    }
    parsed
}

/// One of the `(value, label)` pairs in `choices`.
pub fn choice(
    errors: &mut DataValidationError,
    field: &str,
    value: &str,
    choices: &[(&str, &str)],
) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        errors.add_field_error(field, REQUIRED);
        return None;
    }
    if choices.iter().any(|(choice, _)| *choice == value) {
        Some(value.to_string())
    } else {
        errors.add_field_error(
            field,
            &format!(
                "Select a valid choice. {} is not one of the available choices.",
                value
            ),
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        let mut errors = DataValidationError::new();
        assert_eq!(
            required_text(&mut errors, "name", "  Paint Shop ", 100),
            Some("Paint Shop".to_string())
        );
        assert_eq!(required_text(&mut errors, "city", "   ", 100), None);
        assert_eq!(errors.field_errors("city"), &[REQUIRED.to_string()]);

        assert_eq!(required_text(&mut errors, "code", "ABCDEF", 5), None);
        assert_eq!(
            errors.field_errors("code"),
            &["Ensure this value has at most 5 characters (it has 6).".to_string()]
        );
    }

    #[test]
    fn test_mobile() {
        let mut errors = DataValidationError::new();
        assert_eq!(
            mobile(&mut errors, "mobile1", "9876543210", true),
            Some("9876543210".to_string())
        );
        assert!(errors.is_empty());

        assert_eq!(mobile(&mut errors, "mobile1", "98765", true), None);
        assert_eq!(mobile(&mut errors, "mobile2", "98765abc12", true), None);
        assert_eq!(mobile(&mut errors, "mobile3", "1234567890123456", true), None);
        assert_eq!(errors.field_errors("mobile1"), &[INVALID_MOBILE.to_string()]);
        assert!(errors.has_field_error("mobile2"));
        assert!(errors.has_field_error("mobile3"));

        let mut errors = DataValidationError::new();
        assert_eq!(mobile(&mut errors, "mobile", "", false), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_decimal_limits() {
        let mut errors = DataValidationError::new();
        assert_eq!(
            decimal(&mut errors, "qty", "Quantity", "12.50", true),
            Some(Decimal::new(1250, 2))
        );
        assert_eq!(
            decimal(&mut errors, "qty", "Quantity", "99999999.99", true),
            Some(Decimal::new(9999999999, 2))
        );
        assert!(errors.is_empty());

        assert_eq!(decimal(&mut errors, "a", "A", "1.234", true), None);
        assert_eq!(
            errors.field_errors("a"),
            &["Ensure that there are no more than 2 decimal places.".to_string()]
        );
        assert_eq!(decimal(&mut errors, "b", "B", "123456789", true), None);
        assert_eq!(
            errors.field_errors("b"),
            &["Ensure that there are no more than 8 digits before the decimal point.".to_string()]
        );
        assert_eq!(decimal(&mut errors, "c", "C", "12345678901", true), None);
        assert_eq!(
            errors.field_errors("c"),
            &["Ensure that there are no more than 10 digits in total.".to_string()]
        );
        assert_eq!(decimal(&mut errors, "d", "D", "ten", true), None);
        assert_eq!(errors.field_errors("d"), &["Enter a number.".to_string()]);
    }

    #[test]
    fn test_decimal_negative_and_blank() {
        let mut errors = DataValidationError::new();
        assert_eq!(decimal(&mut errors, "price", "Price", "-1", false), None);
        assert_eq!(
            errors.field_errors("price"),
            &["Price cannot be negative.".to_string()]
        );

        let mut errors = DataValidationError::new();
        assert_eq!(decimal(&mut errors, "price", "Price", "", false), None);
        assert!(errors.is_empty());
        assert_eq!(decimal(&mut errors, "price", "Price", "", true), None);
        assert_eq!(errors.field_errors("price"), &[REQUIRED.to_string()]);
    }

    #[test]
    fn test_dates() {
        let mut errors = DataValidationError::new();
        assert_eq!(
            date(&mut errors, "d", "2024-02-29", true),
            Some(NaiveDate::from_ymd(2024, 2, 29))
        );
        assert_eq!(
            datetime(&mut errors, "t", "2024-02-29T08:30", true),
            Some(NaiveDate::from_ymd(2024, 2, 29).and_hms(8, 30, 0))
        );
        assert!(errors.is_empty());

        assert_eq!(date(&mut errors, "d", "2023-02-29", true), None);
        assert_eq!(datetime(&mut errors, "t", "tomorrow", true), None);
        assert_eq!(errors.field_errors("d"), &["Enter a valid date.".to_string()]);
        assert_eq!(
            errors.field_errors("t"),
            &["Enter a valid date/time.".to_string()]
        );
    }

    #[test]
    fn test_id_and_choice() {
        let mut errors = DataValidationError::new();
        assert_eq!(id(&mut errors, "head", "", false), None);
        assert_eq!(id(&mut errors, "head", "7", false), Some(7));
        assert!(errors.is_empty());
        assert_eq!(id(&mut errors, "head", "x", false), None);
        assert!(errors.has_field_error("head"));

        let choices = [("RM", "Raw Material"), ("FG", "Finished Goods")];
        assert_eq!(
            choice(&mut errors, "category", "RM", &choices),
            Some("RM".to_string())
        );
        assert_eq!(choice(&mut errors, "category", "PK", &choices), None);
        assert_eq!(
            errors.field_errors("category"),
            &["Select a valid choice. PK is not one of the available choices.".to_string()]
        );
    }
}
