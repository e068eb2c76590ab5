//! Contact Sync - tenant-scoped contact management for a multi-tenant messaging CRM.
//!
//! This library implements the contact validation, normalization, and
//! synchronization pipeline: raw phone input is normalized and format-checked,
//! validated against tenant acceptability rules, resolved to a canonical
//! routable identity by the external messaging network, persisted through a
//! tenant-scoped store, and announced to connected clients over per-tenant
//! event channels. Bulk import applies the local checks per uploaded row,
//! without normalization or network resolution, and reports every outcome.
//!
//! # Architecture
//!
//! - **domain**: value objects (tenant id, phone normalization, email)
//! - **models**: contact records and page/report types
//! - **error**: custom error types for precise error handling
//! - **config**: configuration management from environment variables
//! - **client**: HTTP client for the messaging-network identity service
//! - **validator**: two-stage contact validation (local rules, then resolution)
//! - **store**: tenant-scoped contact persistence
//! - **broadcast**: per-tenant change-event fan-out
//! - **services**: mutation/query pipeline and the bulk-import coordinator
//! - **server**: HTTP API and WebSocket event stream

pub mod broadcast;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod store;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use broadcast::{ContactEvent, EventBroadcaster};
pub use client::{AsyncIdentityClient, AsyncIdentityClientImpl, IdentityClient, ResolvedIdentity};
pub use config::Config;
pub use domain::{normalize_number, CanonicalNumber, EmailAddress, TenantId, ValidationError};
pub use error::{ConfigError, ContactError, IdentityError, StoreError};
pub use models::{Contact, ContactPage, CustomField};
pub use services::{
    BulkImportCoordinator, ContactService, ContactServiceImpl, CreateContactParams, ImportFailure,
    ImportRecord, ImportReport, UpdateContactParams,
};
pub use store::{ContactStore, InMemoryContactStore};
pub use validator::ContactValidator;
