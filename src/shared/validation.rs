//! Form validation
//!
//! Checks run before a form is submitted. A failing form never reaches the
//! network.

use chrono::NaiveDate;

use crate::shared::error::SharedError;
use crate::shared::feed::{LoginRequest, RegisterRequest, UpdateProfileRequest, MAX_POST_LENGTH};

const PASSWORD_LEN: (usize, usize) = (8, 20);
const LOGIN_USERNAME_LEN: (usize, usize) = (8, 20);
const REGISTER_USERNAME_LEN: (usize, usize) = (3, 20);
const MAX_BIO_LENGTH: usize = 160;

fn check_len(field: &str, value: &str, (min, max): (usize, usize)) -> Result<(), SharedError> {
    let len = value.chars().count();
    if len < min {
        return Err(SharedError::validation(
            field,
            format!("must be at least {} characters", min),
        ));
    }
    if len > max {
        return Err(SharedError::validation(
            field,
            format!("must not exceed {} characters", max),
        ));
    }
    Ok(())
}

fn require(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, "is required"));
    }
    Ok(())
}

/// `local@domain.tld`, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Validate the login form
pub fn login(username: &str, password: &str) -> Result<LoginRequest, SharedError> {
    check_len("username", username, LOGIN_USERNAME_LEN)?;
    check_len("password", password, PASSWORD_LEN)?;
    Ok(LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Validate a registration form against `today`
pub fn register(request: &RegisterRequest, today: NaiveDate) -> Result<(), SharedError> {
    check_len("username", &request.username, REGISTER_USERNAME_LEN)?;
    check_len("password", &request.password, PASSWORD_LEN)?;
    if !is_valid_email(&request.email) {
        return Err(SharedError::validation("email", "Invalid email"));
    }
    require("firstName", &request.first_name)?;
    require("lastName", &request.last_name)?;
    require("dob", &request.dob)?;

    let dob = NaiveDate::parse_from_str(request.dob.trim(), "%Y-%m-%d")
        .map_err(|_| SharedError::validation("dob", "Invalid date of birth"))?;
    if dob > today {
        return Err(SharedError::validation("dob", "Invalid date of birth"));
    }
    Ok(())
}

/// Profile edit form as typed by the user
#[derive(Debug, Clone, Default)]
pub struct ProfileEditForm {
    pub first_name: String,
    pub last_name: String,
    pub bio: String,
    pub current_password: String,
    pub new_password: Option<String>,
    pub confirm_new_password: Option<String>,
}

impl ProfileEditForm {
    /// Validate and turn into the update payload
    pub fn into_request(self) -> Result<UpdateProfileRequest, SharedError> {
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)?;
        if self.bio.chars().count() > MAX_BIO_LENGTH {
            return Err(SharedError::validation(
                "bio",
                format!("must be {} characters or less", MAX_BIO_LENGTH),
            ));
        }
        if self.current_password.chars().count() < PASSWORD_LEN.0 {
            return Err(SharedError::validation("currentPassword", "Current password is required"));
        }

        let new_password = self.new_password.filter(|p| !p.is_empty());
        if let Some(new_password) = &new_password {
            if new_password.chars().count() < PASSWORD_LEN.0 {
                return Err(SharedError::validation(
                    "newPassword",
                    format!("must be at least {} characters", PASSWORD_LEN.0),
                ));
            }
            if self.confirm_new_password.as_deref() != Some(new_password.as_str()) {
                return Err(SharedError::validation("confirmNewPassword", "Passwords do not match"));
            }
        }

        Ok(UpdateProfileRequest {
            current_password: self.current_password,
            first_name: self.first_name,
            last_name: self.last_name,
            bio: Some(self.bio).filter(|b| !b.is_empty()),
            password: new_password,
        })
    }
}

/// A post needs text or an image, and text has a length cap.
pub fn post(content: &str, has_image: bool) -> Result<(), SharedError> {
    if content.trim().is_empty() && !has_image {
        return Err(SharedError::validation("content", "Post content or image is required"));
    }
    if content.chars().count() > MAX_POST_LENGTH {
        return Err(SharedError::validation(
            "content",
            format!("must not exceed {} characters", MAX_POST_LENGTH),
        ));
    }
    Ok(())
}
