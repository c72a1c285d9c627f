use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::domain::{AdminProfile, AdminRecord};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

fn to_record(m: models::admin::Model) -> AdminRecord {
    AdminRecord {
        profile: AdminProfile { id: m.id, username: m.username, email: m.email, role: m.role },
        password_hash: m.password_hash,
    }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminRecord>, AuthError> {
        let res = models::admin::find_by_username(&self.db, username).await?;
        Ok(res.map(to_record))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AdminRecord>, AuthError> {
        let res = models::admin::find_by_email(&self.db, email).await?;
        Ok(res.map(to_record))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminRecord>, AuthError> {
        let res = models::admin::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(models::errors::ModelError::from)?;
        Ok(res.map(to_record))
    }

    async fn create(&self, username: &str, email: &str, password_hash: String) -> Result<AdminRecord, AuthError> {
        let created = models::admin::create(&self.db, username, email, password_hash).await?;
        Ok(to_record(created))
    }
}
