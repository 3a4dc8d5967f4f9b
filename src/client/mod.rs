//! Interactive side of the contact manager: a REST client and the form/list view state.

pub mod api;
pub mod render;
pub mod view_model;

pub use api::{ClientError, ContactsApi, HttpContactsApi};
pub use view_model::{ContactsView, Event, Outcome};
