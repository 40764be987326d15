//! User synchronization service
//!
//! Registrations carry denormalized user email/name so listings never need
//! a cross-service call. That cache needs a synchronization contract with
//! the identity service: on `user.updated` the changed fields are propagated
//! to every registration of the user, and on `user.deleted` all active
//! registrations are cancelled. The platform's messaging bridge delivers
//! these notifications to the internal hook endpoint.

use tracing::info;

use crate::database::RegistrationRepository;
use crate::models::user::UserEvent;
use crate::utils::errors::Result;

const DELETED_REASON: &str = "User account deleted";

#[derive(Debug, Clone)]
pub struct UserSyncService {
    registrations: RegistrationRepository,
}

impl UserSyncService {
    pub fn new(registrations: RegistrationRepository) -> Self {
        Self { registrations }
    }

    /// Apply one identity-service notification. Returns the number of
    /// registrations touched.
    pub async fn apply(&self, event: UserEvent) -> Result<u64> {
        match event {
            UserEvent::Updated {
                user_id,
                email,
                full_name,
            } => {
                let updated = self
                    .registrations
                    .sync_user_fields(user_id, email.as_deref(), full_name.as_deref())
                    .await?;

                info!(
                    user_id = %user_id,
                    registrations_updated = updated,
                    "Propagated user profile update to registrations"
                );
                Ok(updated)
            }
            UserEvent::Deleted { user_id } => {
                let cancelled = self
                    .registrations
                    .cancel_all_active_for_user(user_id, DELETED_REASON)
                    .await?;

                info!(
                    user_id = %user_id,
                    registrations_cancelled = cancelled,
                    "Cancelled registrations for deleted user"
                );
                Ok(cancelled)
            }
        }
    }
}
