//! Form validation.
//!
//! Rules are plain functions from a raw value to either a cleaned value or a
//! message. [`Validator`] runs them per field and collects every failure, so
//! a form either yields all of its cleaned values or none of them.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

mod countries;

pub use countries::is_country_code;

pub const MINIMUM_AGE: u32 = 18;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid regex"));

pub type Rule<T> = Result<T, String>;

/// Field-level and form-level error messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct FieldErrors {
    pub fields: BTreeMap<String, Vec<String>>,
    pub non_field: Vec<String>,
}

impl FieldErrors {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add_non_field(message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.non_field.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

#[derive(Debug, Default)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the rule outcome for `name`; `Some` carries the cleaned value.
    pub fn field<T>(&mut self, name: &str, outcome: Rule<T>) -> Option<T> {
        match outcome {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.add(name, message);
                None
            }
        }
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

pub fn required(value: &str) -> Rule<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("This field is required.".into());
    }
    Ok(value.to_string())
}

/// Like [`required`] but keeps surrounding whitespace; passwords are opaque.
pub fn required_secret(value: &str) -> Rule<String> {
    if value.is_empty() {
        return Err("This field is required.".into());
    }
    Ok(value.to_string())
}

pub fn optional(value: &str) -> Rule<String> {
    Ok(value.trim().to_string())
}

pub fn max_length(limit: usize) -> impl Fn(String) -> Rule<String> {
    move |value| {
        let length = value.chars().count();
        if length > limit {
            return Err(format!(
                "Ensure this value has at most {limit} characters (it has {length})."
            ));
        }
        Ok(value)
    }
}

pub fn email_address(value: String) -> Rule<String> {
    if !EMAIL_RE.is_match(&value) {
        return Err("Enter a valid email address.".into());
    }
    Ok(value)
}

pub fn date(value: String) -> Rule<NaiveDate> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| "Enter a valid date.".to_string())
}

/// Whole calendar years between `birth_date` and `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

pub fn adult(today: NaiveDate) -> impl Fn(NaiveDate) -> Rule<NaiveDate> {
    move |birth_date| {
        if age_on(birth_date, today) < MINIMUM_AGE as i32 {
            return Err(format!(
                "You must be at least {MINIMUM_AGE} years old to register."
            ));
        }
        Ok(birth_date)
    }
}

pub fn country(value: String) -> Rule<String> {
    let code = value.to_ascii_uppercase();
    if !is_country_code(&code) {
        return Err(format!("Select a valid choice. {value} is not one of the available choices."));
    }
    Ok(code)
}

/// Age check shared by registration and profile updates.
pub fn birth_date(raw: &str, today: NaiveDate) -> Rule<NaiveDate> {
    required(raw).and_then(date).and_then(adult(today))
}

pub fn username(raw: &str) -> Rule<String> {
    required(raw).and_then(max_length(150))
}

pub fn name_part(raw: &str) -> Rule<String> {
    optional(raw).and_then(max_length(150))
}

pub fn email(raw: &str) -> Rule<String> {
    required(raw)
        .and_then(max_length(254))
        .and_then(email_address)
}
