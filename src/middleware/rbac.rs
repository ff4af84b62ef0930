// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    models::auth::{AuthUser, Role},
};

// Guardião de papel, composto sobre o auth_guard: identidade provada
// porém sem ADMIN vira 403 (distinto do 401, que significa identidade
// não provada).
pub struct RequireAdmin(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        if user.role != Role::Admin {
            return Err(AppError::Forbidden);
        }

        Ok(RequireAdmin(user))
    }
}
