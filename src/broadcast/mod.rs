//! Per-tenant change notifications for connected clients.
//!
//! Events are informational facts about successful mutations, never
//! directives: clients must still query the store for authoritative data.
//! Delivery is best-effort and at-most-once; publishing never blocks the
//! mutation's response path, and a slow subscriber loses events once its
//! channel buffer fills.

use crate::domain::TenantId;
use crate::models::Contact;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::debug;

/// Maximum number of events buffered per tenant channel.
const EVENT_BUFFER_SIZE: usize = 100;

/// A change notification emitted after a successful contact mutation.
///
/// Serializes as `{"action": "create"|"update"|"delete", ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ContactEvent {
    /// A contact was created.
    Create { contact: Contact },
    /// A contact was updated.
    Update { contact: Contact },
    /// A contact was deleted.
    Delete {
        #[serde(rename = "contactId")]
        contact_id: String,
    },
}

/// Fan-out of contact events, one channel per tenant.
///
/// Channels are created lazily on first subscription; publishing to a tenant
/// nobody listens to is a no-op. Cross-tenant leakage is impossible by
/// construction since a receiver is bound to exactly one tenant's sender.
#[derive(Clone, Default)]
pub struct EventBroadcaster {
    channels: Arc<RwLock<HashMap<TenantId, broadcast::Sender<ContactEvent>>>>,
}

impl EventBroadcaster {
    /// Creates a new broadcaster with no channels.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes an event on the tenant's channel.
    ///
    /// Fire-and-forget: if the tenant has no subscribers the event is
    /// silently dropped. Never blocks.
    pub fn publish(&self, tenant: TenantId, event: ContactEvent) {
        let sender = match self.channels.read() {
            Ok(map) => map.get(&tenant).cloned(),
            Err(_) => None,
        };

        let Some(sender) = sender else {
            debug!(%tenant, "no channel for tenant, dropping event");
            return;
        };

        match sender.send(event) {
            Ok(receivers) => {
                debug!(%tenant, receivers, "broadcast contact event");
            }
            Err(_) => {
                // All receivers dropped since the channel was created
                debug!(%tenant, "no receivers for contact event");
            }
        }
    }

    /// Subscribes to the tenant's event stream, creating the channel if this
    /// is the tenant's first subscriber. Events published before subscription
    /// are not received.
    pub fn subscribe(&self, tenant: TenantId) -> broadcast::Receiver<ContactEvent> {
        let mut map = match self.channels.write() {
            Ok(map) => map,
            Err(poisoned) => poisoned.into_inner(),
        };

        map.entry(tenant)
            .or_insert_with(|| broadcast::channel(EVENT_BUFFER_SIZE).0)
            .subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    fn sample_contact(tenant: TenantId) -> Contact {
        Contact {
            id: "1".to_string(),
            company_id: tenant,
            name: "Alice".to_string(),
            number: "5511999999999".to_string(),
            email: String::new(),
            profile_pic_url: None,
            extra_info: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_publish_without_subscribers_does_not_panic() {
        let broadcaster = EventBroadcaster::new();
        broadcaster.publish(
            TenantId::new(1),
            ContactEvent::Delete {
                contact_id: "1".to_string(),
            },
        );
    }

    #[test]
    fn test_subscriber_receives_event() {
        let broadcaster = EventBroadcaster::new();
        let tenant = TenantId::new(1);
        let mut rx = broadcaster.subscribe(tenant);

        broadcaster.publish(
            tenant,
            ContactEvent::Create {
                contact: sample_contact(tenant),
            },
        );

        match rx.try_recv() {
            Ok(ContactEvent::Create { contact }) => assert_eq!(contact.name, "Alice"),
            other => panic!("expected create event, got {other:?}"),
        }
    }

    #[test]
    fn test_events_stay_within_tenant_channel() {
        let broadcaster = EventBroadcaster::new();
        let t1 = TenantId::new(1);
        let t2 = TenantId::new(2);
        let mut rx1 = broadcaster.subscribe(t1);
        let mut rx2 = broadcaster.subscribe(t2);

        broadcaster.publish(
            t1,
            ContactEvent::Create {
                contact: sample_contact(t1),
            },
        );

        assert!(matches!(rx1.try_recv(), Ok(ContactEvent::Create { .. })));
        assert!(matches!(rx2.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn test_multiple_receivers_on_one_tenant() {
        let broadcaster = EventBroadcaster::new();
        let tenant = TenantId::new(1);
        let mut rx1 = broadcaster.subscribe(tenant);
        let mut rx2 = broadcaster.subscribe(tenant);

        broadcaster.publish(
            tenant,
            ContactEvent::Delete {
                contact_id: "9".to_string(),
            },
        );

        assert!(matches!(rx1.try_recv(), Ok(ContactEvent::Delete { .. })));
        assert!(matches!(rx2.try_recv(), Ok(ContactEvent::Delete { .. })));
    }

    #[test]
    fn test_event_wire_shape() {
        let tenant = TenantId::new(5);
        let create = serde_json::to_value(ContactEvent::Create {
            contact: sample_contact(tenant),
        })
        .unwrap();
        assert_eq!(create["action"], "create");
        assert_eq!(create["contact"]["companyId"], 5);

        let delete = serde_json::to_value(ContactEvent::Delete {
            contact_id: "9".to_string(),
        })
        .unwrap();
        assert_eq!(delete["action"], "delete");
        assert_eq!(delete["contactId"], "9");
    }
}
