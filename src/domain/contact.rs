use crate::domain::validation::{Field, ValidationError, validate_field};
use time::OffsetDateTime;
use uuid::Uuid;

/// A stored contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub created_at: OffsetDateTime,
}

impl Contact {
    /// Single-character avatar: the first letter of the name, uppercased.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name.chars().next().map_or_else(|| "?".to_string(), |c| c.to_uppercase().collect())
    }

    /// Case-insensitive match on the name, or a literal substring match on the phone.
    #[must_use]
    pub fn matches_search(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase()) || self.phone.contains(query)
    }

    #[must_use]
    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: self.message.clone(),
        }
    }

    /// Replaces the user-editable fields, leaving `id` and `created_at` untouched.
    pub fn apply(&mut self, fields: ContactFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.phone = fields.phone;
        self.message = fields.message;
    }
}

/// The user-supplied part of a contact, used for both create and full-replace update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
}

impl ContactFields {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => self.message.as_deref().unwrap_or_default(),
        }
    }

    /// Checks presence of the required fields, then the format of each field.
    ///
    /// # Errors
    /// Returns `ValidationError::MissingRequired` if name, email or phone is blank,
    /// otherwise `ValidationError::Invalid` for the first malformed field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if Field::ALL.iter().any(|f| f.is_required() && self.get(*f).trim().is_empty()) {
            return Err(ValidationError::MissingRequired);
        }
        for field in Field::ALL {
            if let Some(message) = validate_field(field, self.get(field)) {
                return Err(ValidationError::Invalid { field, message });
            }
        }
        Ok(())
    }

    /// Drops an empty optional note so it is stored as absent.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.message.as_deref().is_some_and(|m| m.trim().is_empty()) {
            self.message = None;
        }
        self
    }
}
