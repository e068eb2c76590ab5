//! Bulk import of uploaded contact rows.
//!
//! Records are processed sequentially within one batch, which keeps resource
//! use bounded and the report order deterministic at the cost of batch
//! latency proportional to the per-record work. The batch is best-effort: a
//! failing record is reported and skipped, committed records stay committed,
//! and there is no rollback.
//!
//! Unlike single-record creation, uploaded numbers get no normalization pass:
//! a row must already carry a digit-only number or it is rejected. Rows only
//! go through the local acceptability check, not the per-number network
//! resolution, and the uploaded digit string is stored as-is.

use crate::broadcast::{ContactEvent, EventBroadcaster};
use crate::domain::{CanonicalNumber, EmailAddress, TenantId, ValidationError};
use crate::error::ContactError;
use crate::models::{Contact, NewContact};
use crate::store::ContactStore;
use crate::validator::ContactValidator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// One uploaded row: name, raw number, optional email.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRecord {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A record that was rejected, with its position in the batch.
#[derive(Debug, Clone, Serialize)]
pub struct ImportFailure {
    pub index: usize,
    pub name: String,
    pub number: String,
    pub reason: String,
}

/// Per-record outcomes of one batch.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Contacts created, in batch order.
    pub created: Vec<Contact>,
    /// Rejected records, in batch order.
    pub failures: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives per-record validation and creation for one batch.
pub struct BulkImportCoordinator {
    store: Arc<dyn ContactStore>,
    validator: Arc<ContactValidator>,
    broadcaster: EventBroadcaster,
}

impl BulkImportCoordinator {
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

    /// Process a batch for one tenant.
    ///
    /// Every record gets an outcome: created contacts are announced on the
    /// tenant's channel as they land, rejected records are collected with the
    /// triggering error. The batch always runs to the end of the sequence.
    pub async fn import(&self, tenant: TenantId, records: Vec<ImportRecord>) -> ImportReport {
        let total = records.len();
        let mut report = ImportReport::default();

        for (index, record) in records.into_iter().enumerate() {
            match self.import_record(tenant, &record).await {
                Ok(contact) => {
                    self.broadcaster.publish(
                        tenant,
                        ContactEvent::Create {
                            contact: contact.clone(),
                        },
                    );
                    report.created.push(contact);
                }
                Err(err) => {
                    warn!(%tenant, index, number = %record.number, error = %err, "import record rejected");
                    report.failures.push(ImportFailure {
                        index,
                        name: record.name,
                        number: record.number,
                        reason: err.to_string(),
                    });
                }
            }
        }

        info!(
            %tenant,
            total,
            created = report.created.len(),
            failed = report.failures.len(),
            "bulk import finished"
        );
        report
    }

    async fn import_record(
        &self,
        tenant: TenantId,
        record: &ImportRecord,
    ) -> Result<Contact, ContactError> {
        if record.name.trim().is_empty() {
            return Err(ValidationError::EmptyName.into());
        }

        // Blank cells in the upload count as absent
        let email = record.email.as_deref().filter(|e| !e.trim().is_empty());
        if let Some(email) = email {
            EmailAddress::new(email)?;
        }

        // The raw uploaded number must already be a digit string; formatted
        // numbers fail the row's schema check
        let candidate = CanonicalNumber::new(record.number.as_str())?;
        self.validator
            .check_is_valid_contact(candidate.as_str(), tenant)?;

        let contact = self
            .store
            .create(
                tenant,
                NewContact {
                    name: record.name.clone(),
                    number: candidate.into_inner(),
                    email: email.unwrap_or_default().to_string(),
                    profile_pic_url: None,
                    extra_info: Vec::new(),
                },
            )
            .await?;

        Ok(contact)
    }
}
