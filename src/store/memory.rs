//! In-memory contact store.
//!
//! The store contract treats persistence as opaque; this implementation backs
//! the service with tenant-partitioned vectors behind an `RwLock`. It is the
//! stand-in used in production wiring and in every pipeline test.

use crate::domain::TenantId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ContactChanges, ContactPage, NewContact};
use crate::store::ContactStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Default number of contacts per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Tenant-partitioned in-memory contact store.
///
/// Intentionally enforces no tenant+number uniqueness: two concurrent creates
/// for the same number both land.
pub struct InMemoryContactStore {
    page_size: usize,
    next_id: AtomicU64,
    contacts: RwLock<HashMap<TenantId, Vec<Contact>>>,
}

impl InMemoryContactStore {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            next_id: AtomicU64::new(1),
            contacts: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<TenantId, Vec<Contact>>>> {
        self.contacts
            .read()
            .map_err(|_| StoreError::Backend("contact store lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<TenantId, Vec<Contact>>>> {
        self.contacts
            .write()
            .map_err(|_| StoreError::Backend("contact store lock poisoned".to_string()))
    }

    fn matches_search(contact: &Contact, search_lower: &str) -> bool {
        search_lower.is_empty()
            || contact.name.to_lowercase().contains(search_lower)
            || contact.number.contains(search_lower)
    }
}

impl Default for InMemoryContactStore {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn create(&self, tenant: TenantId, data: NewContact) -> StoreResult<Contact> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = chrono::Utc::now().to_rfc3339();

        let contact = Contact {
            id: id.to_string(),
            company_id: tenant,
            name: data.name,
            number: data.number,
            email: data.email,
            profile_pic_url: data.profile_pic_url,
            extra_info: data.extra_info,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };

        let mut map = self.write()?;
        map.entry(tenant).or_default().push(contact.clone());
        Ok(contact)
    }

    async fn get(&self, tenant: TenantId, id: &str) -> StoreResult<Contact> {
        let map = self.read()?;
        map.get(&tenant)
            .and_then(|contacts| contacts.iter().find(|c| c.id == id))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update(
        &self,
        tenant: TenantId,
        id: &str,
        changes: ContactChanges,
    ) -> StoreResult<Contact> {
        let mut map = self.write()?;
        let contact = map
            .get_mut(&tenant)
            .and_then(|contacts| contacts.iter_mut().find(|c| c.id == id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(name) = changes.name {
            contact.name = name;
        }
        if let Some(number) = changes.number {
            contact.number = number;
        }
        contact.updated_at = Some(chrono::Utc::now().to_rfc3339());

        Ok(contact.clone())
    }

    async fn delete(&self, tenant: TenantId, id: &str) -> StoreResult<()> {
        let mut map = self.write()?;
        let contacts = map
            .get_mut(&tenant)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        if contacts.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn list(&self, tenant: TenantId, search: &str, page: usize) -> StoreResult<ContactPage> {
        let search_lower = search.trim().to_lowercase();
        let page = page.max(1);

        let map = self.read()?;
        let matches: Vec<Contact> = map
            .get(&tenant)
            .map(|contacts| {
                contacts
                    .iter()
                    .filter(|c| Self::matches_search(c, &search_lower))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let count = matches.len();
        // Saturate so an absurd page number yields an empty page, not an
        // arithmetic overflow
        let offset = (page - 1).saturating_mul(self.page_size);
        let contacts: Vec<Contact> = matches
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .collect();
        let has_more = offset.saturating_add(contacts.len()) < count;

        Ok(ContactPage {
            contacts,
            count,
            has_more,
        })
    }

    async fn find_by_name_and_number(
        &self,
        tenant: TenantId,
        name: &str,
        number: &str,
    ) -> StoreResult<Option<Contact>> {
        let map = self.read()?;
        Ok(map.get(&tenant).and_then(|contacts| {
            contacts
                .iter()
                .find(|c| c.name == name && c.number == number)
                .cloned()
        }))
    }

    async fn simple_list(&self, tenant: TenantId, name_filter: &str) -> StoreResult<Vec<Contact>> {
        let filter_lower = name_filter.trim().to_lowercase();

        let map = self.read()?;
        let mut contacts: Vec<Contact> = map
            .get(&tenant)
            .map(|contacts| {
                contacts
                    .iter()
                    .filter(|c| {
                        filter_lower.is_empty() || c.name.to_lowercase().contains(&filter_lower)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        contacts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(contacts)
    }
}
