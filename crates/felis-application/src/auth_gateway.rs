//! Auth gateway use case.
//!
//! Validates the login and registration forms, calls the auth backend and,
//! for login only, hands the result to the session store.

use std::sync::Arc;

use felis_core::auth::AuthApi;
use felis_core::error::Result;
use felis_core::session::{Session, SessionStore};
use felis_core::user::UserProfile;
use felis_core::validation::{LoginForm, RegistrationForm};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The session as published by the store.
    pub session: Session,
    pub message: Option<String>,
}

impl LoginOutcome {
    pub fn user(&self) -> Option<&UserProfile> {
        self.session.user()
    }
}

/// Result of a successful registration. No session is established.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub user: UserProfile,
    pub message: Option<String>,
}

/// Entry point of the login, registration and logout flows.
///
/// Requests are issued once; nothing is retried. Only a successful login
/// mutates the session.
#[derive(Clone)]
pub struct AuthGateway {
    api: Arc<dyn AuthApi>,
    session: Arc<SessionStore>,
}

impl AuthGateway {
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Logs in with `email` and `password`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome> {
        self.submit_login(&LoginForm::new(email, password)).await
    }

    /// Validates `form`, calls the login endpoint and publishes the session.
    ///
    /// On any failure the error is returned as is and the session is left
    /// untouched.
    pub async fn submit_login(&self, form: &LoginForm) -> Result<LoginOutcome> {
        let request = form.validate()?;

        let response = self.api.login(&request).await.inspect_err(|e| {
            tracing::warn!("[AuthGateway] Login failed: {}", e);
        })?;

        let session = self.session.set_session(response.user, response.token)?;
        tracing::info!("[AuthGateway] Logged in");

        Ok(LoginOutcome {
            session,
            message: response.message,
        })
    }

    /// Validates `form` and creates the account.
    ///
    /// The returned token is discarded: registering does not log in.
    pub async fn register(&self, form: &RegistrationForm) -> Result<RegistrationOutcome> {
        let request = form.validate()?;

        let response = self.api.register(&request).await.inspect_err(|e| {
            tracing::warn!("[AuthGateway] Registration failed: {}", e);
        })?;
        tracing::info!("[AuthGateway] Registered user {}", response.user.id);

        Ok(RegistrationOutcome {
            user: response.user.into(),
            message: response.message,
        })
    }

    /// Ends the current session.
    pub fn logout(&self) -> Result<()> {
        self.session.clear()
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }
}
