//! Event trait - common surface of every payload type
//!
//! Producer-side validation lives here. Decoding never calls it: a consumer
//! decides for itself whether an inbound message is acceptable.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::{ContractError, EventHeader, EventKind};

/// Position of a page-scoped event within its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageScope {
    /// 1-based
    pub page_number: u32,
    pub total_pages: u32,
}

impl PageScope {
    /// Check `1 <= page_number <= total_pages`
    pub fn new(page_number: u32, total_pages: u32) -> Result<Self, ContractError> {
        let scope = Self {
            page_number,
            total_pages,
        };
        scope.check()?;
        Ok(scope)
    }

    pub fn is_last(&self) -> bool {
        self.page_number == self.total_pages
    }

    fn check(&self) -> Result<(), ContractError> {
        if self.page_number == 0 {
            return Err(ContractError::validation(
                "pageNumber",
                "page numbers are 1-based, got 0",
            ));
        }
        if self.page_number > self.total_pages {
            return Err(ContractError::validation(
                "pageNumber",
                format!(
                    "page {} exceeds totalPages {}",
                    self.page_number, self.total_pages
                ),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for PageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.page_number, self.total_pages)
    }
}

/// A pipeline message payload
pub trait Event:
    Serialize + DeserializeOwned + Clone + PartialEq + fmt::Debug + Send + Sync + 'static
{
    /// Which message this is
    const KIND: EventKind;

    fn header(&self) -> &EventHeader;

    /// Page position, `None` for document-level kinds
    fn page(&self) -> Option<PageScope> {
        None
    }

    /// Object-store references carried by the event, as (wire name, key)
    fn object_keys(&self) -> Vec<(&'static str, &str)>;

    /// Reject values JSON cannot carry faithfully
    ///
    /// Called by the encoder before serializing.
    fn check_encodable(&self) -> Result<(), ContractError> {
        Ok(())
    }

    /// Publish-time invariants
    ///
    /// Returns the first violation found.
    fn validate(&self) -> Result<(), ContractError> {
        validate_header(self.header())?;
        for (field, key) in self.object_keys() {
            validate_non_empty(field, key)?;
        }
        if let Some(scope) = self.page() {
            scope.check()?;
        }
        self.check_encodable()
    }
}

/// Header fields must all be non-empty
pub fn validate_header(header: &EventHeader) -> Result<(), ContractError> {
    validate_non_empty("header.workflowId", &header.workflow_id)?;
    validate_non_empty("header.userId", &header.user_id)?;
    validate_non_empty("header.tenantId", &header.tenant_id)?;
    validate_non_empty("header.eventId", &header.event_id)?;
    Ok(())
}

fn validate_non_empty(field: &str, value: &str) -> Result<(), ContractError> {
    if value.trim().is_empty() {
        return Err(ContractError::validation(field, "must not be empty"));
    }
    Ok(())
}
