// ABOUTME: Operator account commands behind the CLI
// ABOUTME: Bootstrap administrator creation and bearer token issuance

use archive_core::Role;
use archive_security::{SecurityError, TokenService, User, UserCreateInput, UserStorage};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum AccountCommandError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Security(#[from] SecurityError),
}

/// Create an administrator account. Admins cannot be created over HTTP.
pub async fn create_admin(
    users: &UserStorage,
    input: UserCreateInput,
) -> Result<User, AccountCommandError> {
    let admin = users.create_user(Role::Admin, input).await?;
    info!("Created administrator {} ({})", admin.username, admin.id);
    Ok(admin)
}

/// Check credentials and sign a token for that account
pub async fn issue_token(
    users: &UserStorage,
    tokens: &TokenService,
    username: &str,
    password: &str,
) -> Result<(User, String), AccountCommandError> {
    let Some(user) = users.verify_credentials(username.trim(), password).await? else {
        warn!("Token request refused for username {}", username);
        return Err(AccountCommandError::InvalidCredentials);
    };

    let token = tokens.issue(&user.id, user.role)?;
    info!("Issued token for {} ({})", user.username, user.role);
    Ok((user, token))
}
