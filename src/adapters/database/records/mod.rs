pub mod contact;

pub use contact::ContactRecord;
