//! Login and signup forms

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{present, FieldErrors, Validated};

pub const USERNAME_TAKEN: &str = "That username is taken. Please choose a different one.";
pub const UNKNOWN_USERNAME: &str = "No user with that username. Please try again.";
pub const WRONG_PASSWORD: &str = "Password doesn't match. Please try again.";

/// Checked credentials, not yet authenticated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct SignupForm {
    #[validate(
        required(message = "This field is required."),
        length(min = 3, max = 80, message = "Your username needs to be between 3 and 80 chars")
    )]
    pub username: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct LoginForm {
    #[validate(required(message = "This field is required."))]
    pub username: Option<String>,
    #[validate(required(message = "This field is required."))]
    pub password: Option<String>,
}

/// Values echoed back when a form is re-rendered; passwords never are
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct CredentialsEcho {
    pub username: Option<String>,
}

fn check<F: Validate>(form: &F, username: Option<String>, password: Option<String>) -> Validated<Credentials> {
    form.validate().map_err(FieldErrors::from)?;
    match (username, password) {
        (Some(username), Some(password)) => Ok(Credentials { username, password }),
        _ => Err(FieldErrors::new()),
    }
}

impl SignupForm {
    pub fn validated(&self) -> Validated<Credentials> {
        let normalized = Self {
            username: present(&self.username),
            password: present(&self.password),
        };
        check(&normalized, normalized.username.clone(), normalized.password.clone())
    }

    pub fn echo(&self) -> CredentialsEcho {
        CredentialsEcho {
            username: self.username.clone(),
        }
    }
}

impl LoginForm {
    pub fn validated(&self) -> Validated<Credentials> {
        let normalized = Self {
            username: present(&self.username),
            password: present(&self.password),
        };
        check(&normalized, normalized.username.clone(), normalized.password.clone())
    }

    pub fn echo(&self) -> CredentialsEcho {
        CredentialsEcho {
            username: self.username.clone(),
        }
    }
}
