//! State behind the contact form and list.
//!
//! The contact list held here is a local cache of the server collection. It is
//! filled by [`ContactsView::load`] and afterwards patched from each successful
//! API response instead of being re-fetched. A record the server reports as
//! missing is evicted from the cache.

use crate::client::api::{ClientError, ContactsApi};
use crate::domain::contact::{Contact, ContactFields};
use crate::domain::validation::{Field, FieldErrors, is_phone_input, validate_field};
use uuid::Uuid;

pub const SUBMIT_FAILED_NOTICE: &str = "Something went wrong. Please try again.";
pub const DELETE_FAILED_NOTICE: &str = "Error deleting contact";
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this contact?";

/// Current values of the form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Message => &mut self.message,
        }
    }

    #[must_use]
    pub fn to_fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            message: (!self.message.is_empty()).then(|| self.message.clone()),
        }
    }
}

impl From<&Contact> for ContactForm {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            message: contact.message.clone().unwrap_or_default(),
        }
    }
}

/// A user action against the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Load,
    ChangeField(Field, String),
    Search(String),
    Submit,
    Edit(Uuid),
    CancelEdit,
    RequestDelete(Uuid),
    ConfirmDelete,
    CancelDelete,
}

/// What handling an [`Event`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Local state changed.
    Changed,
    /// The event was not applicable (dropped keystroke, blocked submit, unknown id).
    Ignored,
    /// The form was persisted; carries the server's copy of the record.
    Saved(Contact),
    Deleted(Uuid),
    /// A delete is pending until the user answers the prompt.
    AwaitingConfirmation(&'static str),
    /// The API call failed; a notice is showing.
    Failed,
}

#[derive(Debug)]
pub struct ContactsView {
    contacts: Vec<Contact>,
    loading: bool,
    search: String,
    form: ContactForm,
    editing_id: Option<Uuid>,
    errors: FieldErrors,
    notice: Option<String>,
    pending_delete: Option<Uuid>,
}

impl Default for ContactsView {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactsView {
    /// A view that has not fetched yet, so it starts in the loading state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
            loading: true,
            search: String::new(),
            form: ContactForm::default(),
            editing_id: None,
            errors: FieldErrors::new(),
            notice: None,
            pending_delete: None,
        }
    }

    #[must_use]
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub const fn form(&self) -> &ContactForm {
        &self.form
    }

    #[must_use]
    pub const fn editing_id(&self) -> Option<Uuid> {
        self.editing_id
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub const fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }

    /// Routes an event to the matching handler.
    pub async fn dispatch(&mut self, api: &dyn ContactsApi, event: Event) -> Outcome {
        match event {
            Event::Load => {
                self.load(api).await;
                Outcome::Changed
            }
            Event::ChangeField(field, value) => {
                if self.change_field(field, &value) {
                    Outcome::Changed
                } else {
                    Outcome::Ignored
                }
            }
            Event::Search(query) => {
                self.set_search(query);
                Outcome::Changed
            }
            Event::Submit => self.submit(api).await,
            Event::Edit(id) => {
                if self.edit(id) {
                    Outcome::Changed
                } else {
                    Outcome::Ignored
                }
            }
            Event::CancelEdit => {
                self.reset_form();
                Outcome::Changed
            }
            Event::RequestDelete(id) => self.request_delete(id),
            Event::ConfirmDelete => self.confirm_delete(api).await,
            Event::CancelDelete => {
                self.pending_delete = None;
                Outcome::Changed
            }
        }
    }

    /// Replaces the cached list with the server's. Also serves as an explicit refresh.
    pub async fn load(&mut self, api: &dyn ContactsApi) {
        self.loading = true;
        match api.list().await {
            Ok(contacts) => self.contacts = contacts,
            Err(e) => tracing::error!(error = %e, "Failed to fetch contacts"),
        }
        self.loading = false;
    }

    /// Applies a new input value. Returns false when the value is refused.
    ///
    /// Phone input that would contain a non-digit is dropped and the previous
    /// value kept.
    pub fn change_field(&mut self, field: Field, value: &str) -> bool {
        if field == Field::Phone && !is_phone_input(value) {
            return false;
        }
        value.clone_into(self.form.get_mut(field));
        self.errors.set(field, validate_field(field, value));
        true
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// True when every required input is filled and no field shows an error.
    #[must_use]
    pub fn is_submittable(&self) -> bool {
        [Field::Name, Field::Email, Field::Phone].into_iter().all(|f| !self.form.get(f).trim().is_empty())
            && !self.errors.has(Field::Email)
            && !self.errors.has(Field::Phone)
    }

    /// Creates or updates the contact in the form, then patches the cached list.
    pub async fn submit(&mut self, api: &dyn ContactsApi) -> Outcome {
        if !self.is_submittable() {
            return Outcome::Ignored;
        }
        let fields = self.form.to_fields();

        let result = match self.editing_id {
            Some(id) => api.update(id, &fields).await.map(|saved| {
                if let Some(slot) = self.contacts.iter_mut().find(|c| c.id == id) {
                    *slot = saved.clone();
                }
                saved
            }),
            None => api.create(&fields).await.map(|saved| {
                self.contacts.insert(0, saved.clone());
                saved
            }),
        };

        match result {
            Ok(saved) => {
                self.reset_form();
                Outcome::Saved(saved)
            }
            Err(ClientError::NotFound) => {
                if let Some(id) = self.editing_id.take() {
                    tracing::warn!(contact.id = %id, "Contact vanished on the server; dropping cached copy");
                    self.contacts.retain(|c| c.id != id);
                }
                self.notice = Some(SUBMIT_FAILED_NOTICE.to_string());
                Outcome::Failed
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save contact");
                self.notice = Some(SUBMIT_FAILED_NOTICE.to_string());
                Outcome::Failed
            }
        }
    }

    /// Loads a cached contact into the form for editing. Returns false for an unknown id.
    pub fn edit(&mut self, id: Uuid) -> bool {
        let Some(contact) = self.contacts.iter().find(|c| c.id == id) else {
            return false;
        };
        self.form = ContactForm::from(contact);
        self.editing_id = Some(id);
        self.errors.clear();
        self.notice = None;
        true
    }

    /// Clears the form, its errors and edit mode.
    pub fn reset_form(&mut self) {
        self.form = ContactForm::default();
        self.errors.clear();
        self.editing_id = None;
        self.notice = None;
    }

    /// Marks `id` for deletion; the caller must ask the user with the returned prompt.
    pub fn request_delete(&mut self, id: Uuid) -> Outcome {
        self.pending_delete = Some(id);
        Outcome::AwaitingConfirmation(DELETE_PROMPT)
    }

    /// Deletes the contact marked by [`request_delete`](Self::request_delete).
    pub async fn confirm_delete(&mut self, api: &dyn ContactsApi) -> Outcome {
        let Some(id) = self.pending_delete.take() else {
            return Outcome::Ignored;
        };

        match api.delete(id).await {
            Ok(()) => {
                self.contacts.retain(|c| c.id != id);
                if self.editing_id == Some(id) {
                    self.reset_form();
                }
                Outcome::Deleted(id)
            }
            Err(e) => {
                tracing::error!(error = %e, contact.id = %id, "Failed to delete contact");
                self.notice = Some(DELETE_FAILED_NOTICE.to_string());
                Outcome::Failed
            }
        }
    }

    /// Cached contacts matching the search string, in list order.
    #[must_use]
    pub fn filtered_contacts(&self) -> Vec<&Contact> {
        self.contacts.iter().filter(|c| c.matches_search(&self.search)).collect()
    }
}
