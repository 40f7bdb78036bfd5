use std::sync::Arc;

use crate::domain::{Email, User, UserId};
use crate::error::{DomainError, RepoError};
use crate::ports::UserRepository;
use crate::services::{AuthService, IssuedToken};

/// Same wording for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Register a new account with a unique email.
#[derive(Clone)]
pub struct RegisterUser {
    users: Arc<dyn UserRepository>,
    auth: AuthService,
}

impl RegisterUser {
    pub fn new(users: Arc<dyn UserRepository>, auth: AuthService) -> Self {
        Self { users, auth }
    }

    pub async fn execute(&self, input: RegisterUserInput) -> Result<User, DomainError> {
        let email = Email::new(input.email)?;
        if input.password.is_empty() {
            return Err(DomainError::validation("Password is required"));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(duplicate_email());
        }

        let password_hash = self.auth.hash_password(&input.password).await?;
        let user = User::create(email, input.username, password_hash)?;

        // The store's unique index still wins a race between two registrations.
        self.users.create(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => duplicate_email(),
            other => other.into(),
        })
    }
}

fn duplicate_email() -> DomainError {
    DomainError::Duplicate {
        entity_type: "User",
        field: "email",
    }
}

#[derive(Debug, Clone)]
pub struct LoginUserInput {
    pub email: String,
    pub password: String,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
    pub token: IssuedToken,
}

/// Exchange email and password for an authentication credential.
#[derive(Clone)]
pub struct LoginUser {
    users: Arc<dyn UserRepository>,
    auth: AuthService,
}

impl LoginUser {
    pub fn new(users: Arc<dyn UserRepository>, auth: AuthService) -> Self {
        Self { users, auth }
    }

    pub async fn execute(&self, input: LoginUserInput) -> Result<LoginResult, DomainError> {
        let email =
            Email::new(input.email).map_err(|_| DomainError::authentication(INVALID_CREDENTIALS))?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::authentication(INVALID_CREDENTIALS))?;

        if !self.auth.verify_password(&input.password, user.password_hash()).await {
            return Err(DomainError::authentication(INVALID_CREDENTIALS));
        }

        let token = self.auth.issue_token(user.id(), user.email()).await?;
        Ok(LoginResult { user, token })
    }
}

/// Invalidate a credential.
#[derive(Clone)]
pub struct LogoutUser {
    auth: AuthService,
}

impl LogoutUser {
    pub fn new(auth: AuthService) -> Self {
        Self { auth }
    }

    pub async fn execute(&self, token: &str) -> Result<(), DomainError> {
        self.auth.revoke_token(token).await
    }
}

/// Load the authenticated user's own account.
#[derive(Clone)]
pub struct GetUserProfile {
    users: Arc<dyn UserRepository>,
}

impl GetUserProfile {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, user_id: &UserId) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id.as_str()))
    }
}
