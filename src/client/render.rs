use crate::client::view_model::ContactsView;
use crate::domain::contact::Contact;
use crate::domain::validation::Field;
use std::fmt::Write;

pub const EMPTY_STATE: &str = "No contacts found. Start adding some!";
pub const LOADING: &str = "Loading...";

const fn label(field: Field) -> &'static str {
    match field {
        Field::Name => "Full Name",
        Field::Email => "Email Address",
        Field::Phone => "Phone Number",
        Field::Message => "Notes (Optional)",
    }
}

/// Renders the form panel: heading, inputs with inline errors, submit state and notice.
#[must_use]
pub fn render_form(view: &ContactsView) -> String {
    let editing = view.editing_id().is_some();
    let mut out = String::new();

    let _ = writeln!(out, "{}", if editing { "Edit Contact" } else { "Add New Contact" });
    for field in Field::ALL {
        let _ = writeln!(out, "  {:<18} {}", label(field), view.form().get(field));
        if let Some(error) = view.errors().get(field) {
            let _ = writeln!(out, "  {:<18} ! {error}", "");
        }
    }

    let action = if editing { "Update Contact" } else { "Save Contact" };
    let state = if view.is_submittable() { "" } else { " (disabled)" };
    let _ = writeln!(out, "  [{action}]{state}");

    if let Some(notice) = view.notice() {
        let _ = writeln!(out, "  ! {notice}");
    }
    out
}

fn render_contact(out: &mut String, contact: &Contact) {
    let _ = writeln!(out, "  ({}) {}  <{}>  {}  [{}]", contact.initials(), contact.name, contact.email, contact.phone, contact.id);
    if let Some(message) = &contact.message {
        let _ = writeln!(out, "      {message}");
    }
}

/// Renders the list panel, applying the current search filter.
#[must_use]
pub fn render_list(view: &ContactsView) -> String {
    let mut out = String::new();
    let visible = view.filtered_contacts();

    let _ = writeln!(out, "Your Contacts ({})", visible.len());
    if view.is_loading() {
        let _ = writeln!(out, "  {LOADING}");
    } else if visible.is_empty() {
        let _ = writeln!(out, "  {EMPTY_STATE}");
    } else {
        for contact in visible {
            render_contact(&mut out, contact);
        }
    }
    out
}
