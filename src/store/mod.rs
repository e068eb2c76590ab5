//! Tenant-scoped contact persistence.

mod memory;
mod traits;

pub use memory::InMemoryContactStore;
pub use traits::ContactStore;
