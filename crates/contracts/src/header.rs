//! EventHeader - embedded in every event
//!
//! Multi-tenancy, tracing and deduplication context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Mandatory metadata carried by every pipeline event.
///
/// Decoding never checks the fields for emptiness; producers call
/// [`crate::Event::validate`] before publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHeader {
    /// Publish time (UTC, RFC 3339 on the wire)
    pub timestamp: DateTime<Utc>,

    /// One document's processing run
    pub workflow_id: String,

    /// Owning user
    pub user_id: String,

    /// Tenant isolation key
    pub tenant_id: String,

    /// Unique per published message
    pub event_id: String,
}

impl EventHeader {
    /// Header for a new workflow message, stamped now with a fresh event id.
    pub fn new(
        workflow_id: impl Into<String>,
        user_id: impl Into<String>,
        tenant_id: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            workflow_id: workflow_id.into(),
            user_id: user_id.into(),
            tenant_id: tenant_id.into(),
            event_id: new_event_id(),
        }
    }

    /// Header for an event derived from this one.
    ///
    /// Keeps workflow, user and tenant; the timestamp and event id are new.
    pub fn follow_on(&self) -> Self {
        Self {
            timestamp: Utc::now(),
            workflow_id: self.workflow_id.clone(),
            user_id: self.user_id.clone(),
            tenant_id: self.tenant_id.clone(),
            event_id: new_event_id(),
        }
    }

    /// Whether both headers belong to the same workflow run
    pub fn same_workflow(&self, other: &EventHeader) -> bool {
        self.workflow_id == other.workflow_id && self.tenant_id == other.tenant_id
    }
}

fn new_event_id() -> String {
    Uuid::new_v4().to_string()
}
