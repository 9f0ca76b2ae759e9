use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A colleague's ask for one catalog item.
///
/// At most one active request may exist per item; the store enforces this
/// with a partial unique index, not application logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Internal immutable identifier
    pub id: Uuid,

    /// The requested catalog item
    pub item_id: Uuid,

    /// Who asked for it
    pub requester_id: Uuid,

    /// Lifecycle state
    pub status: RequestStatus,

    /// Set only by the fulfillment engine when the request is closed out
    pub fulfillment_id: Option<Uuid>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Lifecycle of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InFulfillment,
    Fulfilled,
}

impl Request {
    /// Create a new pending Request
    pub fn new(item_id: Uuid, requester_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_id,
            requester_id,
            status: RequestStatus::Pending,
            fulfillment_id: None,
            created_at: Utc::now(),
        }
    }

    /// Active requests are the ones on the current list: not yet attached to
    /// any fulfillment and not cancelled.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            RequestStatus::Pending | RequestStatus::InFulfillment
        ) && self.fulfillment_id.is_none()
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Pending => write!(f, "pending"),
            RequestStatus::InFulfillment => write!(f, "in_fulfillment"),
            RequestStatus::Fulfilled => write!(f, "fulfilled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_request_is_active() {
        let request = Request::new(Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(request.status, RequestStatus::Pending);
        assert!(request.is_active());
    }

    #[test]
    fn test_fulfilled_request_is_not_active() {
        let mut request = Request::new(Uuid::new_v4(), Uuid::new_v4());
        request.status = RequestStatus::Fulfilled;
        request.fulfillment_id = Some(Uuid::new_v4());
        assert!(!request.is_active());
    }

    #[test]
    fn test_in_fulfillment_without_id_is_active() {
        let mut request = Request::new(Uuid::new_v4(), Uuid::new_v4());
        request.status = RequestStatus::InFulfillment;
        assert!(request.is_active());
    }
}
