//! Data models for contact records.

pub mod contact;

pub use contact::{Contact, ContactChanges, ContactPage, CustomField, NewContact};
