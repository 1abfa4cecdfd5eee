use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::credential::errors::StoreError;
use crate::domain::credential::models::Credential;
use crate::domain::credential::models::Role;
use crate::domain::credential::models::RoleId;
use crate::domain::credential::ports::CredentialStore;

/// Credential store kept in process memory.
///
/// Roles are seeded at construction and never change. Uniqueness checks and
/// inserts happen under one write guard, so concurrent registrations of the
/// same identifier produce exactly one winner.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: Arc<RwLock<Vec<Credential>>>,
    roles: Arc<HashMap<RoleId, Vec<String>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a role and its permission names.
    pub fn with_role(mut self, role_id: RoleId, permissions: Vec<String>) -> Self {
        Arc::make_mut(&mut self.roles).insert(role_id, permissions);
        self
    }

    /// Number of stored credentials
    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }

    fn role(&self, role_id: &RoleId) -> Role {
        Role {
            id: *role_id,
            permissions: self.roles.get(role_id).cloned().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<(Credential, Role)>, StoreError> {
        let credentials = self.credentials.read().await;

        Ok(credentials
            .iter()
            .find(|c| c.username.as_str() == identifier || c.email.as_str() == identifier)
            .map(|c| (c.clone(), self.role(&c.role_id))))
    }

    async fn insert(&self, credential: Credential) -> Result<Credential, StoreError> {
        let mut credentials = self.credentials.write().await;

        if credentials.iter().any(|c| c.username == credential.username) {
            return Err(StoreError::Duplicate(credential.username.to_string()));
        }
        if credentials.iter().any(|c| c.email == credential.email) {
            return Err(StoreError::Duplicate(credential.email.to_string()));
        }

        credentials.push(credential.clone());
        Ok(credential)
    }

    async fn permissions_for_role(&self, role_id: &RoleId) -> Result<Vec<String>, StoreError> {
        Ok(self.role(role_id).permissions)
    }
}
