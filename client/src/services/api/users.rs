//! # User Management Endpoints
//!
//! Admin-only CRUD over resident and admin accounts.

use shared::{CreateUserRequest, UpdateUserRequest, User};

use super::client::ApiClient;
use crate::core::error::{AppError, Result};
use crate::utils::validation::validate_new_user;

#[tracing::instrument(skip(client))]
pub async fn list_users(client: &ApiClient) -> Result<Vec<User>> {
    client.get("/admin/users", &[]).await
}

#[tracing::instrument(skip(client, request), fields(email = %request.email, role = %request.role))]
pub async fn create_user(client: &ApiClient, request: &CreateUserRequest) -> Result<User> {
    validate_new_user(request)?;
    let user: User = client.post("/admin/users", Some(request)).await?;
    tracing::info!(user_id = %user.id, "User created");
    Ok(user)
}

#[tracing::instrument(skip(client, request))]
pub async fn update_user(client: &ApiClient, user_id: &str, request: &UpdateUserRequest) -> Result<User> {
    if request.is_empty() {
        return Err(AppError::Validation("Tidak ada perubahan untuk disimpan".to_string()));
    }
    client.put(&format!("/admin/users/{}", user_id), request).await
}

#[tracing::instrument(skip(client))]
pub async fn delete_user(client: &ApiClient, user_id: &str) -> Result<()> {
    client.delete(&format!("/admin/users/{}", user_id)).await?;
    tracing::info!("User deleted");
    Ok(())
}
