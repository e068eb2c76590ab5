//! Application service layer.
//!
//! Services orchestrate the contact pipeline: normalize, validate, resolve,
//! persist, broadcast. They are the boundary between the HTTP surface and
//! the store/validator/broadcaster collaborators.

mod bulk_import;
mod contact_service;

pub use bulk_import::{BulkImportCoordinator, ImportFailure, ImportRecord, ImportReport};
pub use contact_service::{
    ContactService, ContactServiceImpl, CreateContactParams, UpdateContactParams,
};
