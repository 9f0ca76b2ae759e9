// src/services/user_service.rs
//
// User directory. The auth collaborator resolves sessions; this service
// provisions the users those sessions refer to.

use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{normalize_email, User, UserRole};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, UserProvisioned};
use crate::repositories::UserRepository;

/// Directory configuration.
#[derive(Debug, Clone, Default)]
pub struct DirectoryConfig {
    /// Emails that always provision as orderers.
    pub orderer_emails: Vec<String>,
}

pub struct UserService {
    user_repo: Arc<dyn UserRepository>,
    orderer_emails: HashSet<String>,
    event_bus: Arc<EventBus>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        config: DirectoryConfig,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            user_repo,
            orderer_emails: config
                .orderer_emails
                .iter()
                .map(|email| normalize_email(email))
                .collect(),
            event_bus,
        }
    }

    /// Look the email up, provisioning on a miss.
    ///
    /// Role rule: allowlisted emails become orderers, as does the very first
    /// user (someone has to be able to place orders on a fresh install);
    /// everyone else is a colleague.
    pub fn get_or_create_user(&self, email: &str) -> AppResult<User> {
        let normalized = normalize_email(email);
        if normalized.is_empty() {
            return Err(AppError::InvalidInput("Email is required.".to_string()));
        }

        if let Some(existing) = self.user_repo.find_by_email(&normalized)? {
            return Ok(existing);
        }

        let role = if self.orderer_emails.contains(&normalized) || self.user_repo.count()? == 0 {
            UserRole::Orderer
        } else {
            UserRole::Colleague
        };

        let user = User::new(normalized.clone(), role);

        match self.user_repo.insert(&user) {
            Ok(()) => {
                log::info!("provisioned {} as {}", user.email, user.role);
                self.event_bus.emit(UserProvisioned::new(
                    user.id,
                    user.email.clone(),
                    user.role.to_string(),
                ));
                Ok(user)
            }
            Err(AppError::Conflict(_)) => {
                // Concurrent provision of the same email; the winner is
                // authoritative.
                self.user_repo.find_by_email(&normalized)?.ok_or_else(|| {
                    AppError::Other("User vanished after conflicting insert".to_string())
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Lookup for callers that already hold a user id.
    pub fn require_user(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo
            .get_by_id(user_id)?
            .ok_or_else(|| AppError::NotFound("User not found.".to_string()))
    }
}
