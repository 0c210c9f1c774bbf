//! Account and token models

use chrono::{DateTime, Utc};
use rand::RngCore;

/// Length in bytes of a token key before hex encoding
const TOKEN_BYTES: usize = 20;

/// A login identity; every account owns exactly one Customer
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

/// Fields of an account that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_joined: DateTime<Utc>,
}

impl NewAccount {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            date_joined: Utc::now(),
        }
    }

    pub fn into_account(self, id: i64) -> Account {
        Account {
            id,
            username: self.username,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            date_joined: self.date_joined,
        }
    }
}

impl Account {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

/// Opaque API credential sent as `Authorization: Token <key>`
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub key: String,
    pub account_id: i64,
    pub created: DateTime<Utc>,
}

impl Token {
    /// Issue a fresh random token for an account
    pub fn generate(account_id: i64) -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);

        Self {
            key: hex::encode(bytes),
            account_id,
            created: Utc::now(),
        }
    }
}
