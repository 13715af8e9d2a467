//! DTOs for the organization and user resources.
//!
//! These mirror the backend's JSON schema. Update payloads only serialize
//! the fields that are set, so omitted fields stay unchanged on the server.

use crate::types::QueryParams;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An organization returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    /// Server-assigned identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request payload for creating an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrganization {
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request payload for updating an organization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizationUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A user belonging to an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Server-assigned identifier
    pub id: Uuid,
    /// Owning organization
    pub organization_id: Uuid,
    /// Login email address
    pub email: String,
    /// Display name
    pub name: String,
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Login email address
    pub email: String,
    /// Display name
    pub name: String,
}

/// Request payload for updating a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Pagination for list calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of items to return
    pub limit: Option<u32>,
    /// Number of items to skip
    pub offset: Option<u32>,
}

impl ListOptions {
    /// Query parameters for these options; unset fields are left out.
    pub fn to_query(&self) -> QueryParams {
        let mut query = QueryParams::new();
        if let Some(limit) = self.limit {
            query.insert("limit".to_string(), vec![limit.to_string()]);
        }
        if let Some(offset) = self.offset {
            query.insert("offset".to_string(), vec![offset.to_string()]);
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_skips_unset_fields() {
        let update = OrganizationUpdate {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["name"], "Renamed");
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_organization_without_description() {
        let org: Organization = serde_json::from_str(
            r#"{"id":"00000000-0000-0000-0000-000000000001","name":"Acme"}"#,
        )
        .unwrap();
        assert_eq!(org.name, "Acme");
        assert_eq!(org.description, None);
    }

    #[test]
    fn test_list_options_query() {
        assert!(ListOptions::default().to_query().is_empty());
        let query = ListOptions {
            limit: Some(25),
            offset: None,
        }
        .to_query();
        assert_eq!(query.get("limit"), Some(&vec!["25".to_string()]));
        assert!(!query.contains_key("offset"));
    }
}
