// src/services/user_service.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    common::pagination::Page,
    db::UserRepository,
    models::auth::{ListUsersQuery, Role, UpdateUserPayload, User},
};

// Perfil próprio + administração de usuários (rotas ADMIN).
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn profile(&self, id: Uuid) -> Result<User, AppError> {
        self.users.find_by_id(id).await?.ok_or(AppError::UserNotFound)
    }

    pub async fn list(&self, query: ListUsersQuery) -> Result<Page<User>, AppError> {
        let (items, total) = self
            .users
            .list(query.q.as_deref(), query.page, query.limit)
            .await?;
        Ok(Page::new(items, query.page, query.limit, total))
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.users.find_by_id(id).await?.ok_or(AppError::UserNotFound)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User, AppError> {
        self.users
            .update(id, &payload)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn set_role(&self, id: Uuid, role: Role) -> Result<User, AppError> {
        self.users
            .set_role(id, role)
            .await?
            .ok_or(AppError::UserNotFound)
    }
}
