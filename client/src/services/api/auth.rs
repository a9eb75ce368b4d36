//! # Authentication Endpoints
//!
//! Login, logout and the current-user lookup. A successful login is written
//! to the client's [`Session`](crate::core::session::Session) so later calls
//! carry the bearer token.

use shared::{AuthResponse, LoginRequest, User};

use super::client::ApiClient;
use crate::core::error::Result;
use crate::utils::validation::validate_login;

/// Login with email and password.
#[tracing::instrument(skip(client, password), fields(email = %email))]
pub async fn login(client: &ApiClient, email: String, password: String) -> Result<AuthResponse> {
    validate_login(&email, &password)?;

    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let request = LoginRequest { email, password };
    let auth: AuthResponse = client.post("/auth/login", Some(&request)).await?;

    client.session().store(&auth)?;

    tracing::info!(
        user_id = %auth.user.id,
        role = %auth.user.role,
        duration_ms = start.elapsed().as_millis(),
        "Login successful"
    );
    Ok(auth)
}

/// Logout. The local session is cleared even when the backend call fails.
#[tracing::instrument(skip(client))]
pub async fn logout(client: &ApiClient) -> Result<()> {
    let result = client.post::<(), ()>("/auth/logout", None).await;
    client.session().clear();

    if let Err(ref e) = result {
        tracing::warn!(error = %e, "Logout call failed, local session cleared anyway");
    }
    result
}

/// Fetch the user behind the current token.
#[tracing::instrument(skip(client))]
pub async fn me(client: &ApiClient) -> Result<User> {
    client.get("/auth/me", &[]).await
}
