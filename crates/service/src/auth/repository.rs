use async_trait::async_trait;
use uuid::Uuid;

use super::domain::AdminRecord;
use super::errors::AuthError;

/// Repository abstraction for admin persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminRecord>, AuthError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminRecord>, AuthError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminRecord>, AuthError>;
    /// Insert a new admin; a duplicate username or email yields `AuthError::Conflict`.
    async fn create(&self, username: &str, email: &str, password_hash: String) -> Result<AdminRecord, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::auth::domain::AdminProfile;

    #[derive(Default)]
    pub struct MockAuthRepository {
        admins: Mutex<HashMap<Uuid, AdminRecord>>,
    }

    impl MockAuthRepository {
        fn find_where(&self, pred: impl Fn(&AdminRecord) -> bool) -> Option<AdminRecord> {
            let admins = self.admins.lock().unwrap();
            admins.values().find(|a| pred(a)).cloned()
        }

        /// Drop an admin, as if removed out of band.
        pub fn remove(&self, id: Uuid) {
            self.admins.lock().unwrap().remove(&id);
        }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_by_username(&self, username: &str) -> Result<Option<AdminRecord>, AuthError> {
            Ok(self.find_where(|a| a.profile.username == username))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<AdminRecord>, AuthError> {
            Ok(self.find_where(|a| a.profile.email == email))
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminRecord>, AuthError> {
            Ok(self.admins.lock().unwrap().get(&id).cloned())
        }

        async fn create(&self, username: &str, email: &str, password_hash: String) -> Result<AdminRecord, AuthError> {
            let mut admins = self.admins.lock().unwrap();
            if admins.values().any(|a| a.profile.username == username || a.profile.email == email) {
                return Err(AuthError::Conflict("username or email already taken".into()));
            }
            let record = AdminRecord {
                profile: AdminProfile {
                    id: Uuid::new_v4(),
                    username: username.to_string(),
                    email: email.to_string(),
                    role: models::admin::DEFAULT_ROLE.to_string(),
                },
                password_hash,
            };
            admins.insert(record.profile.id, record.clone());
            Ok(record)
        }
    }
}
