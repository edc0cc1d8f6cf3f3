//! Client-side form rules for the login and registration views.
//!
//! Validation runs before any request is issued; a form that fails never
//! reaches the network.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::auth::{LoginRequest, RegisterRequest};
use crate::error::{FelisError, Result};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_USERNAME_LEN: usize = 3;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks the form and turns it into the login request body.
    pub fn validate(&self) -> Result<LoginRequest> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        finish(errors)?;

        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

impl RegistrationForm {
    /// Checks the form and turns it into the registration request body.
    ///
    /// The confirmation field is dropped; names are sent only when filled.
    pub fn validate(&self) -> Result<RegisterRequest> {
        let mut errors = Vec::new();

        let username = self.username.trim();
        if username.is_empty() {
            errors.push("username is required".to_string());
        } else if username.chars().count() < MIN_USERNAME_LEN {
            errors.push(format!(
                "username must be at least {MIN_USERNAME_LEN} characters"
            ));
        }
        check_email(&self.email, &mut errors);
        check_password(&self.password, &mut errors);
        if self.password != self.confirm_password {
            errors.push("passwords do not match".to_string());
        }
        finish(errors)?;

        Ok(RegisterRequest {
            email: self.email.trim().to_string(),
            username: username.to_string(),
            password: self.password.clone(),
            first_name: non_empty(&self.first_name),
            last_name: non_empty(&self.last_name),
        })
    }
}

fn check_email(email: &str, errors: &mut Vec<String>) {
    let email = email.trim();
    if email.is_empty() {
        errors.push("email is required".to_string());
    } else if !EMAIL_RE.is_match(email) {
        errors.push("email is not a valid address".to_string());
    }
}

fn check_password(password: &str, errors: &mut Vec<String>) {
    if password.is_empty() {
        errors.push("password is required".to_string());
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
}

fn finish(errors: Vec<String>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FelisError::Validation(errors))
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
