//! User model: names, email, credential hash, admin flag, and the
//! back-references to bookings the user has made.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, Result};
use crate::ports::Record;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$")
        .expect("email pattern compiles")
});

const NAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 8;

/// A guest account. The credential is held only as an opaque hash and is
/// never serialized back out.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    first_name: String,
    last_name: String,
    email: String,
    #[serde(skip_serializing)]
    password_hash: String,
    is_admin: bool,
    booking_ids: Vec<Uuid>,
}

impl User {
    /// Builds a validated user. `password_hash` must already be hashed;
    /// plaintext never reaches the model (see [`User::validate_password`]).
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        is_admin: bool,
    ) -> Result<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let email = email.into();
        validate_name("First name", &first_name)?;
        validate_name("Last name", &last_name)?;
        validate_email(&email)?;

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            first_name,
            last_name,
            email,
            password_hash: password_hash.into(),
            is_admin,
            booking_ids: Vec::new(),
        })
    }

    /// Plaintext policy, checked by the facade before hashing.
    pub fn validate_password(password: &str) -> Result<()> {
        if password.len() < PASSWORD_MIN {
            return Err(DomainError::validation(format!(
                "Password must be at least {PASSWORD_MIN} characters long"
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Opaque credential hash, for verification at the facade boundary only.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Bookings this user has made, oldest first.
    pub fn booking_ids(&self) -> &[Uuid] {
        &self.booking_ids
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> Result<()> {
        let first_name = first_name.into();
        validate_name("First name", &first_name)?;
        self.first_name = first_name;
        self.touch();
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> Result<()> {
        let last_name = last_name.into();
        validate_name("Last name", &last_name)?;
        self.last_name = last_name;
        self.touch();
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<()> {
        let email = email.into();
        validate_email(&email)?;
        self.email = email;
        self.touch();
        Ok(())
    }

    /// Replaces the stored credential with a freshly hashed one.
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.touch();
    }

    pub fn set_is_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
        self.touch();
    }

    pub fn add_booking(&mut self, booking_id: Uuid) {
        if !self.booking_ids.contains(&booking_id) {
            self.booking_ids.push(booking_id);
            self.touch();
        }
    }

    pub fn remove_booking(&mut self, booking_id: Uuid) {
        self.booking_ids.retain(|id| *id != booking_id);
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Record for User {
    const KIND: &'static str = "User";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_name(label: &str, value: &str) -> Result<()> {
    if value.chars().count() > NAME_MAX {
        return Err(DomainError::validation(format!(
            "{label} length must not exceed {NAME_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_PATTERN.is_match(email) {
        return Err(DomainError::validation(
            "Email must have valid mail address format",
        ));
    }
    Ok(())
}

/// Inbound record for account creation. The facade validates and hashes the
/// plaintext password before anything is stored.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}
