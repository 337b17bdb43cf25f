//! User directory and passwordless (OTP) authentication.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::auth;
use crate::db::DbPool;
use crate::entities::{otp_code, user};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::services::audit;

/// What OTP verification hands back: the authenticated user and a signed
/// access token.
#[derive(Debug, Clone)]
pub struct VerifiedLogin {
    pub user: user::Model,
    pub access_token: String,
}

/// Result of an OTP send. `code` is echoed to the caller in development,
/// mirroring the behaviour of the simulated-email login flow.
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub user: user::Model,
    pub code: String,
}

#[derive(Clone)]
pub struct UserService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    jwt_secret: String,
    jwt_expiration: usize,
    otp_ttl: Duration,
}

impl UserService {
    pub fn new(
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        jwt_secret: String,
        jwt_expiration: usize,
        otp_ttl: Duration,
    ) -> Self {
        Self {
            db_pool,
            event_sender,
            jwt_secret,
            jwt_expiration,
            otp_ttl,
        }
    }

    /// Active users sorted by name, for pickers and directory views.
    pub async fn list_active(&self) -> Result<Vec<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::Active.eq(true))
            .order_by_asc(user::Column::Name)
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Every user record, newest first; the admin console view.
    pub async fn list_all(&self) -> Result<Vec<user::Model>, ServiceError> {
        user::Entity::find()
            .order_by_desc(user::Column::CreatedAt)
            .all(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    #[instrument(skip(self))]
    pub async fn create_user(
        &self,
        name: String,
        email: String,
        role: String,
        department: String,
    ) -> Result<user::Model, ServiceError> {
        let db = self.db_pool.as_ref();

        let existing = user::Entity::find()
            .filter(user::Column::Email.eq(email.clone()))
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;
        if existing.is_some() {
            return Err(ServiceError::ValidationError(
                "User with this email already exists".to_string(),
            ));
        }

        let created = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            role: Set(role),
            department: Set(department),
            active: Set(true),
            created_at: Set(Utc::now().naive_utc()),
            updated_at: Set(None),
        }
        .insert(db)
        .await
        .map_err(ServiceError::db_error)?;

        self.event_sender
            .send(Event::UserCreated(created.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(created)
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<user::Model>, ServiceError> {
        user::Entity::find()
            .filter(user::Column::Email.eq(email.to_lowercase()))
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)
    }

    /// Generate and store a one-time passcode for the given address. The
    /// "email" is simulated: the code is logged and echoed to the caller.
    #[instrument(skip(self))]
    pub async fn send_otp(&self, email: &str) -> Result<IssuedOtp, ServiceError> {
        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| {
                ServiceError::ValidationError(
                    "User not found with this email address".to_string(),
                )
            })?;

        if !user.active {
            return Err(ServiceError::ValidationError(
                "User account is inactive".to_string(),
            ));
        }

        let code = auth::generate_otp_code();
        let now = Utc::now().naive_utc();
        let expires_at = now + chrono::Duration::from_std(self.otp_ttl).unwrap_or_else(|_| chrono::Duration::minutes(10));

        otp_code::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user.id),
            code: Set(code.clone()),
            expires_at: Set(expires_at),
            consumed: Set(false),
            created_at: Set(now),
        }
        .insert(self.db_pool.as_ref())
        .await
        .map_err(ServiceError::db_error)?;

        info!(
            to = %user.email,
            "login code issued (simulated email; expires in {}s)",
            self.otp_ttl.as_secs()
        );

        Ok(IssuedOtp { user, code })
    }

    /// Verify a passcode: it must match the newest unconsumed, unexpired
    /// code for the user, and is consumed on success.
    #[instrument(skip(self, otp))]
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<VerifiedLogin, ServiceError> {
        if !auth::is_valid_otp_format(otp) {
            return Err(ServiceError::ValidationError(
                "Invalid OTP format".to_string(),
            ));
        }

        let user = self
            .find_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::ValidationError("User not found".to_string()))?;

        let db = self.db_pool.as_ref();
        let now = Utc::now().naive_utc();

        let stored = otp_code::Entity::find()
            .filter(otp_code::Column::UserId.eq(user.id))
            .filter(otp_code::Column::Consumed.eq(false))
            .filter(otp_code::Column::ExpiresAt.gt(now))
            .order_by_desc(otp_code::Column::CreatedAt)
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;

        let stored = match stored {
            Some(row) if row.code == otp => row,
            _ => {
                return Err(ServiceError::ValidationError(
                    "Invalid or expired OTP".to_string(),
                ))
            }
        };

        let mut consumed: otp_code::ActiveModel = stored.into();
        consumed.consumed = Set(true);
        consumed
            .update(db)
            .await
            .map_err(ServiceError::db_error)?;

        audit::record_action(
            db,
            Some(user.id),
            "USER_LOGIN",
            "user",
            &user.id.to_string(),
            Some(format!("User {} logged in successfully", user.name)),
        )
        .await?;

        let access_token = auth::issue_access_token(
            user.id,
            &user.name,
            &user.email,
            &user.role,
            &user.department,
            &self.jwt_secret,
            self.jwt_expiration,
        )?;

        self.event_sender
            .send(Event::UserLoggedIn(user.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(VerifiedLogin { user, access_token })
    }
}

/// Split a stored full name into the first/last pair the directory view
/// serves.
pub fn split_name(name: &str) -> (String, String) {
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or("Unknown").to_string();
    let rest: Vec<&str> = parts.collect();
    (first, rest.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_name_handles_single_and_multi_part_names() {
        assert_eq!(split_name("Sam Lee"), ("Sam".into(), "Lee".into()));
        assert_eq!(
            split_name("Anna Maria del Rio"),
            ("Anna".into(), "Maria del Rio".into())
        );
        assert_eq!(split_name("Prince"), ("Prince".into(), "".into()));
        assert_eq!(split_name(""), ("Unknown".into(), "".into()));
    }
}
