// src/services/notification_service.rs
//
// Persistence side of the trigger engine: when a trigger fires, every user
// holding the orderer role receives one notification, written as a single
// batch. Read-marking is scoped to the owning user.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Identity, Notification, NotificationKind};
use crate::error::AppResult;
use crate::repositories::{NotificationRepository, UserRepository};

/// Unread notifications shown on the dashboard.
const UNREAD_FEED_LIMIT: u32 = 20;

pub struct NotificationService {
    notification_repo: Arc<dyn NotificationRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl NotificationService {
    pub fn new(
        notification_repo: Arc<dyn NotificationRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            notification_repo,
            user_repo,
        }
    }

    /// Fan a message out to every orderer. Returns how many copies were
    /// written; zero when no orderer exists yet.
    pub fn notify_orderers(
        &self,
        kind: NotificationKind,
        message: String,
        metadata: Option<serde_json::Value>,
    ) -> AppResult<usize> {
        let orderers = self.user_repo.list_orderers()?;

        if orderers.is_empty() {
            log::warn!("trigger fired but there is no orderer to notify");
            return Ok(0);
        }

        let batch: Vec<Notification> = orderers
            .iter()
            .map(|orderer| {
                Notification::new(orderer.id, kind, message.clone(), metadata.clone())
            })
            .collect();

        self.notification_repo.insert_batch(&batch)?;

        log::info!("queued {} '{}' notification(s): {}", batch.len(), kind, message);

        Ok(batch.len())
    }

    /// Dismiss one notification owned by the caller.
    pub fn mark_read(&self, identity: &Identity, notification_id: Uuid) -> AppResult<()> {
        self.notification_repo
            .mark_read(identity.id, notification_id, Utc::now())
    }

    pub fn unread_for(&self, user_id: Uuid) -> AppResult<Vec<Notification>> {
        self.notification_repo.list_unread(user_id, UNREAD_FEED_LIMIT)
    }
}
