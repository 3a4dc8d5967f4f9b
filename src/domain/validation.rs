use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill required fields";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email format";
pub const SHORT_PHONE_MESSAGE: &str = "Phone must be at least 10 digits";
pub const NON_DIGIT_PHONE_MESSAGE: &str = "Phone must contain only digits";

pub const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// The user-editable fields of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Message => "message",
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Message)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checks a single field value against the shared contact contract.
///
/// Empty values never produce a format error; presence is checked by
/// [`ContactFields::validate`](crate::domain::contact::ContactFields::validate).
#[must_use]
pub fn validate_field(field: Field, value: &str) -> Option<&'static str> {
    if value.is_empty() {
        return None;
    }
    match field {
        Field::Email if !EMAIL_PATTERN.is_match(value) => Some(INVALID_EMAIL_MESSAGE),
        Field::Phone if !is_phone_input(value) => Some(NON_DIGIT_PHONE_MESSAGE),
        Field::Phone if value.chars().count() < MIN_PHONE_DIGITS => Some(SHORT_PHONE_MESSAGE),
        _ => None,
    }
}

/// Returns true when `value` is acceptable as typed phone input (digits only, or empty).
#[must_use]
pub fn is_phone_input(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Per-field error messages, as shown next to form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of validating `field`: sets the message or clears it.
    pub fn set(&mut self, field: Field, message: Option<&str>) {
        match message {
            Some(msg) => {
                self.0.insert(field, msg.to_string());
            }
            None => {
                self.0.remove(&field);
            }
        }
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn has(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill required fields")]
    MissingRequired,
    #[error("{message}")]
    Invalid { field: Field, message: &'static str },
}
