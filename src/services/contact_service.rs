//! Contact mutation and query pipeline.
//!
//! Single-record mutations run the full pipeline: normalize the candidate
//! number, format-check it, apply acceptability rules, resolve the canonical
//! identity over the network, persist, then broadcast. Reads are pure
//! tenant-scoped queries with no validation and no events.

use crate::broadcast::{ContactEvent, EventBroadcaster};
use crate::domain::{normalize_number, CanonicalNumber, TenantId, ValidationError};
use crate::error::ContactResult;
use crate::models::{Contact, ContactChanges, ContactPage, CustomField, NewContact};
use crate::services::bulk_import::{BulkImportCoordinator, ImportRecord, ImportReport};
use crate::store::ContactStore;
use crate::validator::ContactValidator;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Fields accepted when creating a contact.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactParams {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub extra_info: Option<Vec<CustomField>>,
}

/// Partial fields accepted when updating a contact.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateContactParams {
    pub name: Option<String>,
    pub number: Option<String>,
}

/// Tenant-scoped contact operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Page through contacts matching a search string.
    async fn list(&self, tenant: TenantId, search: &str, page: usize)
        -> ContactResult<ContactPage>;

    /// Find the contact with exactly this name and number.
    async fn lookup_by_name_and_number(
        &self,
        tenant: TenantId,
        name: &str,
        number: &str,
    ) -> ContactResult<Contact>;

    /// Validate, resolve, persist, and announce a new contact.
    async fn create(&self, tenant: TenantId, params: CreateContactParams)
        -> ContactResult<Contact>;

    /// Retrieve a single contact.
    async fn show(&self, tenant: TenantId, id: &str) -> ContactResult<Contact>;

    /// Apply a partial update; a supplied number goes through the full
    /// validation pipeline again.
    async fn update(
        &self,
        tenant: TenantId,
        id: &str,
        params: UpdateContactParams,
    ) -> ContactResult<Contact>;

    /// Delete a contact that exists for this tenant.
    async fn delete(&self, tenant: TenantId, id: &str) -> ContactResult<()>;

    /// All contacts whose name matches the filter.
    async fn simple_list(&self, tenant: TenantId, name: &str) -> ContactResult<Vec<Contact>>;

    /// Run a batch of uploaded rows through per-record validation and
    /// creation, reporting every outcome.
    async fn bulk_import(
        &self,
        tenant: TenantId,
        records: Vec<ImportRecord>,
    ) -> ContactResult<ImportReport>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    store: Arc<dyn ContactStore>,
    validator: Arc<ContactValidator>,
    broadcaster: EventBroadcaster,
}

impl ContactServiceImpl {
    pub fn new(
        store: Arc<dyn ContactStore>,
        validator: Arc<ContactValidator>,
        broadcaster: EventBroadcaster,
    ) -> Self {
        Self {
            store,
            validator,
            broadcaster,
        }
    }

    /// Run the number pipeline shared by create and update: normalize,
    /// format-check, acceptability rules, canonical resolution. Returns the
    /// digit string to store.
    async fn resolve_candidate_number(
        &self,
        raw: &str,
        tenant: TenantId,
    ) -> ContactResult<String> {
        let normalized = normalize_number(raw);
        let candidate = CanonicalNumber::new(normalized)?;
        self.validator
            .check_is_valid_contact(candidate.as_str(), tenant)?;
        let identity = self
            .validator
            .check_contact_number(candidate.as_str(), tenant)
            .await?;
        Ok(identity.digits())
    }
}

/// Validation helper functions.
fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list(
        &self,
        tenant: TenantId,
        search: &str,
        page: usize,
    ) -> ContactResult<ContactPage> {
        Ok(self.store.list(tenant, search, page).await?)
    }

    async fn lookup_by_name_and_number(
        &self,
        tenant: TenantId,
        name: &str,
        number: &str,
    ) -> ContactResult<Contact> {
        self.store
            .find_by_name_and_number(tenant, name, number)
            .await?
            .ok_or_else(|| crate::error::ContactError::NotFound(format!("{} / {}", name, number)))
    }

    async fn create(
        &self,
        tenant: TenantId,
        params: CreateContactParams,
    ) -> ContactResult<Contact> {
        validate_name(&params.name)?;
        let number = self.resolve_candidate_number(&params.number, tenant).await?;

        let contact = self
            .store
            .create(
                tenant,
                NewContact {
                    name: params.name,
                    number,
                    email: params.email.unwrap_or_default(),
                    profile_pic_url: None,
                    extra_info: params.extra_info.unwrap_or_default(),
                },
            )
            .await?;

        info!(%tenant, contact_id = %contact.id, "contact created");
        self.broadcaster.publish(
            tenant,
            ContactEvent::Create {
                contact: contact.clone(),
            },
        );

        Ok(contact)
    }

    async fn show(&self, tenant: TenantId, id: &str) -> ContactResult<Contact> {
        Ok(self.store.get(tenant, id).await?)
    }

    async fn update(
        &self,
        tenant: TenantId,
        id: &str,
        params: UpdateContactParams,
    ) -> ContactResult<Contact> {
        if let Some(ref name) = params.name {
            validate_name(name)?;
        }

        let number = match params.number {
            Some(raw) => Some(self.resolve_candidate_number(&raw, tenant).await?),
            None => None,
        };

        let contact = self
            .store
            .update(
                tenant,
                id,
                ContactChanges {
                    name: params.name,
                    number,
                },
            )
            .await?;

        info!(%tenant, contact_id = %contact.id, "contact updated");
        self.broadcaster.publish(
            tenant,
            ContactEvent::Update {
                contact: contact.clone(),
            },
        );

        Ok(contact)
    }

    async fn delete(&self, tenant: TenantId, id: &str) -> ContactResult<()> {
        // Tenant-scoped existence check; a miss fails before any side effect
        self.store.get(tenant, id).await?;
        self.store.delete(tenant, id).await?;

        info!(%tenant, contact_id = id, "contact deleted");
        self.broadcaster.publish(
            tenant,
            ContactEvent::Delete {
                contact_id: id.to_string(),
            },
        );

        Ok(())
    }

    async fn simple_list(&self, tenant: TenantId, name: &str) -> ContactResult<Vec<Contact>> {
        Ok(self.store.simple_list(tenant, name).await?)
    }

    async fn bulk_import(
        &self,
        tenant: TenantId,
        records: Vec<ImportRecord>,
    ) -> ContactResult<ImportReport> {
        let coordinator = BulkImportCoordinator::new(
            self.store.clone(),
            self.validator.clone(),
            self.broadcaster.clone(),
        );
        Ok(coordinator.import(tenant, records).await)
    }
}
