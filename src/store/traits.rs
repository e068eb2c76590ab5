use crate::domain::TenantId;
use crate::error::StoreResult;
use crate::models::{Contact, ContactChanges, ContactPage, NewContact};
use async_trait::async_trait;

/// Tenant-scoped contact persistence.
///
/// Every operation takes the acting tenant explicitly and must never read or
/// mutate a contact owned by a different tenant. No uniqueness constraint is
/// imposed on tenant+number; callers that need one must add it in the
/// backing implementation.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a new contact for the tenant, assigning its id.
    async fn create(&self, tenant: TenantId, data: NewContact) -> StoreResult<Contact>;

    /// Retrieve a single contact by id.
    async fn get(&self, tenant: TenantId, id: &str) -> StoreResult<Contact>;

    /// Apply a partial field set to an existing contact.
    async fn update(
        &self,
        tenant: TenantId,
        id: &str,
        changes: ContactChanges,
    ) -> StoreResult<Contact>;

    /// Remove a contact.
    async fn delete(&self, tenant: TenantId, id: &str) -> StoreResult<()>;

    /// Page through contacts whose name or number matches `search`.
    /// Pages are 1-based; an empty search matches everything.
    async fn list(&self, tenant: TenantId, search: &str, page: usize) -> StoreResult<ContactPage>;

    /// Find the contact with exactly this name and number, if any.
    async fn find_by_name_and_number(
        &self,
        tenant: TenantId,
        name: &str,
        number: &str,
    ) -> StoreResult<Option<Contact>>;

    /// All contacts whose name contains `name_filter`, ordered by name.
    async fn simple_list(&self, tenant: TenantId, name_filter: &str) -> StoreResult<Vec<Contact>>;
}
