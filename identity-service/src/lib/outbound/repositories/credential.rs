use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::DisplayName;
use crate::domain::credential::models::EmailAddress;
use crate::domain::credential::models::Role;
use crate::domain::credential::models::RoleId;
use crate::domain::credential::models::SubjectId;
use crate::domain::credential::models::Username;
use crate::domain::credential::ports::CredentialStore;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

fn credential_from_row(row: &PgRow) -> Result<Credential, StoreError> {
    let corrupt = |e: String| StoreError::Unavailable(format!("Invalid stored credential: {}", e));

    Ok(Credential {
        id: SubjectId(row.try_get::<Uuid, _>("uuid").map_err(unavailable)?),
        username: Username::new(row.try_get("username").map_err(unavailable)?)
            .map_err(|e| corrupt(e.to_string()))?,
        email: EmailAddress::new(row.try_get("email").map_err(unavailable)?)
            .map_err(|e| corrupt(e.to_string()))?,
        display_name: DisplayName::new(row.try_get("name").map_err(unavailable)?)
            .map_err(|e| corrupt(e.to_string()))?,
        password_hash: row.try_get("password").map_err(unavailable)?,
        role_id: RoleId(row.try_get::<Uuid, _>("role_uuid").map_err(unavailable)?),
    })
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<(Credential, Role)>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT u.uuid, u.role_uuid, u.name, u.username, u.email, u.password,
                   COALESCE(
                       ARRAY_AGG(p.name ORDER BY p.name) FILTER (WHERE p.name IS NOT NULL),
                       '{}'
                   ) AS permissions
            FROM users u
            LEFT JOIN role_has_permissions rp ON rp.role_uuid = u.role_uuid
            LEFT JOIN permissions p ON p.uuid = rp.permission_uuid
            WHERE (u.username = $1 OR u.email = $1) AND u.deleted_at IS NULL
            GROUP BY u.uuid
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        match row {
            Some(r) => {
                let credential = credential_from_row(&r)?;
                let role = Role {
                    id: credential.role_id,
                    permissions: r.try_get("permissions").map_err(unavailable)?,
                };
                Ok(Some((credential, role)))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, credential: Credential) -> Result<Credential, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (uuid, role_uuid, name, username, email, password)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credential.id.0)
        .bind(credential.role_id.0)
        .bind(credential.display_name.as_str())
        .bind(credential.username.as_str())
        .bind(credential.email.as_str())
        .bind(&credential.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("users_username_key") {
                        return StoreError::Duplicate(credential.username.to_string());
                    }
                    if db_err.constraint() == Some("users_email_key") {
                        return StoreError::Duplicate(credential.email.to_string());
                    }
                }
                if db_err.is_foreign_key_violation() {
                    return StoreError::Unavailable(format!(
                        "Role {} does not exist",
                        credential.role_id
                    ));
                }
            }
            StoreError::Unavailable(e.to_string())
        })?;

        Ok(credential)
    }

    async fn permissions_for_role(&self, role_id: &RoleId) -> Result<Vec<String>, StoreError> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT p.name
            FROM permissions p
            JOIN role_has_permissions rp ON rp.permission_uuid = p.uuid
            WHERE rp.role_uuid = $1
            ORDER BY p.name
            "#,
        )
        .bind(role_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)
    }
}
