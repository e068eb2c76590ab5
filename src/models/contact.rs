//! Contact record and the field sets handed to the store.

use crate::domain::TenantId;
use serde::{Deserialize, Serialize};

/// A custom name/value annotation attached to a contact (`extraInfo`).
///
/// Entries are ordered and keys are not required to be unique.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CustomField {
    pub name: String,
    pub value: String,
}

/// A contact record scoped to one tenant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Store-assigned identifier.
    pub id: String,

    /// Owning tenant. Immutable once set; partitions all contact data.
    pub company_id: TenantId,

    /// Display name.
    pub name: String,

    /// Canonical number as recognized by the messaging network: a pure digit
    /// string derived from the resolved routable identity, never raw input.
    pub number: String,

    /// Email address; empty string when none was supplied.
    #[serde(default)]
    pub email: String,

    /// Profile picture reference, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic_url: Option<String>,

    /// Ordered custom field entries.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_info: Vec<CustomField>,

    /// When the contact was created (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// When the contact was last updated (RFC 3339).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Fields for a new contact, handed to the store by the pipeline.
///
/// `number` has already been through validation and resolution by the time
/// this struct exists.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub number: String,
    pub email: String,
    pub profile_pic_url: Option<String>,
    pub extra_info: Vec<CustomField>,
}

/// Partial field set for an update. Only name and number are mutable; a
/// present `number` has already been re-validated and resolved.
#[derive(Debug, Clone, Default)]
pub struct ContactChanges {
    pub name: Option<String>,
    pub number: Option<String>,
}

/// One page of a tenant's contact listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPage {
    pub contacts: Vec<Contact>,
    /// Total matches across all pages.
    pub count: usize,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_contact() -> Contact {
        Contact {
            id: "1".to_string(),
            company_id: TenantId::new(5),
            name: "Alice".to_string(),
            number: "5511999999999".to_string(),
            email: String::new(),
            profile_pic_url: None,
            extra_info: vec![CustomField {
                name: "cpf".to_string(),
                value: "123".to_string(),
            }],
            created_at: Some("2026-01-01T00:00:00+00:00".to_string()),
            updated_at: None,
        }
    }

    #[test]
    fn test_contact_serializes_camel_case() {
        let json = serde_json::to_value(sample_contact()).unwrap();
        assert_eq!(json["companyId"], 5);
        assert_eq!(json["extraInfo"][0]["name"], "cpf");
        assert!(json.get("profilePicUrl").is_none());
        assert_eq!(json["createdAt"], "2026-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_contact_round_trip() {
        let contact = sample_contact();
        let json = serde_json::to_string(&contact).unwrap();
        let back: Contact = serde_json::from_str(&json).unwrap();
        assert_eq!(back, contact);
    }

    #[test]
    fn test_duplicate_extra_info_keys_are_allowed() {
        let json = r#"{
            "id": "1",
            "companyId": 1,
            "name": "Bob",
            "number": "123",
            "extraInfo": [
                {"name": "tag", "value": "a"},
                {"name": "tag", "value": "b"}
            ]
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.extra_info.len(), 2);
        assert_eq!(contact.extra_info[0].name, contact.extra_info[1].name);
    }
}
