/*
[INPUT]:  Public API key and private secret key
[OUTPUT]: Validated key pair
[POS]:    Auth layer - credential holder
[UPDATE]: When credential validation rules change
*/

use std::fmt;

use crate::error::{OkcoinError, Result};

/// API key pair used to sign parameterized channels
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret_key: String,
}

impl Credentials {
    /// Create a key pair, rejecting empty keys
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();
        if api_key.is_empty() || secret_key.is_empty() {
            return Err(OkcoinError::Validation(
                "api key and secret key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            api_key,
            secret_key,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

// Keeps the secret out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"***")
            .finish()
    }
}
