//! TenantId value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of the tenant (`companyId`) that partitions all contact data.
///
/// Every store operation and every event channel is scoped by this value;
/// it is threaded as an explicit argument instead of living on an ambient
/// request context.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TenantId(u64);

impl TenantId {
    /// Create a tenant id from its numeric value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the underlying numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TenantId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(Self)
    }
}
