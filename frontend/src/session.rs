use thiserror::Error;

use crate::api::BudgetApi;
use crate::error::ApiError;
use crate::models::{LoginRequest, RegisterRequest, User};

pub const DELETE_FIRST_WARNING: &str = "Are you sure you want to delete your account? This action cannot be undone and will permanently delete all your data.";
pub const DELETE_FINAL_WARNING: &str = "This is your final warning. Delete account and all data?";
pub const ACCOUNT_DELETED: &str = "Your account has been successfully deleted.";

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::SignedIn(user) => Some(user),
            Session::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn(_))
    }
}

/// User-facing reasons a login or registration did not go through.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthFailure {
    #[error("Login failed. Please check your credentials.")]
    LoginRejected,
    #[error("Login failed. Please try again.")]
    LoginUnavailable,
    #[error("Email already exists. Please use a different email.")]
    EmailTaken,
    #[error("Registration failed. Please try again.")]
    RegistrationFailed,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AccountFailure {
    #[error("Failed to delete account. Please try again.")]
    DeleteFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
}

/// Any failure, including a network error, means signed out.
pub async fn check_session<A: BudgetApi + ?Sized>(api: &A) -> Session {
    match api.current_user().await {
        Ok(user) => {
            log::info!("session active for user {}", user.id);
            Session::SignedIn(user)
        }
        Err(ApiError::Server(status)) => {
            log::info!("no active session (status {})", status);
            Session::SignedOut
        }
        Err(e) => {
            log::error!("Auth check failed: {}", e);
            Session::SignedOut
        }
    }
}

pub async fn login<A: BudgetApi + ?Sized>(
    api: &A,
    email: &str,
    password: &str,
) -> Result<User, AuthFailure> {
    api.login(&LoginRequest { email, password })
        .await
        .map_err(|e| {
            log::error!("Login error: {}", e);
            match e {
                ApiError::Server(_) => AuthFailure::LoginRejected,
                _ => AuthFailure::LoginUnavailable,
            }
        })
}

pub async fn register<A: BudgetApi + ?Sized>(
    api: &A,
    full_name: &str,
    email: &str,
    password: &str,
) -> Result<User, AuthFailure> {
    let request = RegisterRequest {
        full_name,
        email,
        password,
    };
    api.register(&request).await.map_err(|e| {
        log::error!("Registration error: {}", e);
        match e {
            ApiError::DuplicateAccount => AuthFailure::EmailTaken,
            _ => AuthFailure::RegistrationFailed,
        }
    })
}

/// Best-effort: the server call may fail, the local session ends regardless.
pub async fn logout<A: BudgetApi + ?Sized>(api: &A) {
    if let Err(e) = api.logout().await {
        log::warn!("Logout error: {}", e);
    }
}

/// Asks `confirm` twice before anything is sent; declining either prompt
/// cancels.
pub async fn delete_account<A, C>(api: &A, mut confirm: C) -> Result<DeleteOutcome, AccountFailure>
where
    A: BudgetApi + ?Sized,
    C: FnMut(&str) -> bool,
{
    if !confirm(DELETE_FIRST_WARNING) || !confirm(DELETE_FINAL_WARNING) {
        return Ok(DeleteOutcome::Cancelled);
    }
    match api.delete_account().await {
        Ok(()) => {
            log::info!("account deleted");
            Ok(DeleteOutcome::Deleted)
        }
        Err(e) => {
            log::error!("Delete account error: {}", e);
            Err(AccountFailure::DeleteFailed)
        }
    }
}
