//! Password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::Error;

/// Argon2 hashing parameters.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Params {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Argon2Params {
    /// Create Argon2 instance with these parameters.
    fn to_argon2(self) -> Result<Argon2<'static>, Error> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None).map_err(|e| Error::Internal {
            operation: format!("create argon2 params: {e}"),
        })?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for Argon2Params {
    /// Secure defaults for production (Argon2id RFC recommendations)
    fn default() -> Self {
        Self {
            memory_kib: 19456, // 19 MB
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl From<&crate::config::PasswordConfig> for Argon2Params {
    fn from(config: &crate::config::PasswordConfig) -> Self {
        Self {
            memory_kib: config.argon2_memory_kib,
            iterations: config.argon2_iterations,
            parallelism: config.argon2_parallelism,
        }
    }
}

/// Hash a password using Argon2.
///
/// Uses the provided parameters or secure defaults if None.
pub fn hash_string_with_params(input: &str, params: Option<Argon2Params>) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = if let Some(p) = params {
        p.to_argon2()?
    } else {
        Argon2Params::default().to_argon2()?
    };

    let hash = argon2.hash_password(input.as_bytes(), &salt).map_err(|e| Error::Internal {
        operation: format!("hash string: {e}"),
    })?;

    Ok(hash.to_string())
}

/// Hash a password using Argon2 with default secure parameters.
pub fn hash_string(input: &str) -> Result<String, Error> {
    hash_string_with_params(input, None)
}

/// Verify a password against an Argon2 hash.
///
/// Note: Verification uses the parameters embedded in the hash itself.
pub fn verify_string(input: &str, hash: &str) -> Result<bool, Error> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| Error::Internal {
        operation: format!("parse hash: {e}"),
    })?;

    // Verification always uses params from the hash
    let argon2 = Argon2::default();
    Ok(argon2.verify_password(input.as_bytes(), &parsed_hash).is_ok())
}

/// A credential as stored in the `users.password_hash` column.
///
/// Accounts imported from the previous system may carry their password as
/// plaintext. That state is only usable behind the explicit
/// `auth.allow_legacy_plaintext` configuration flag; with the flag off (the
/// production setting), `parse` refuses the legacy variant and every login
/// against such an account fails closed.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredCredential<'a> {
    /// PHC-formatted Argon2 hash
    Argon2(&'a str),
    /// Legacy plaintext credential awaiting migration
    LegacyPlaintext(&'a str),
}

impl<'a> StoredCredential<'a> {
    /// Classify a stored credential string.
    ///
    /// Returns `None` when the credential is legacy plaintext and the
    /// compatibility mode is disabled.
    pub fn parse(stored: &'a str, allow_legacy_plaintext: bool) -> Option<Self> {
        if stored.starts_with("$argon2") {
            Some(StoredCredential::Argon2(stored))
        } else if allow_legacy_plaintext {
            tracing::warn!("Verifying against a legacy plaintext credential; migrate this account");
            Some(StoredCredential::LegacyPlaintext(stored))
        } else {
            tracing::warn!("Rejected legacy plaintext credential: compatibility mode is disabled");
            None
        }
    }

    /// Verify an input password against this credential.
    pub fn verify(&self, input: &str) -> Result<bool, Error> {
        match self {
            StoredCredential::Argon2(hash) => verify_string(input, hash),
            StoredCredential::LegacyPlaintext(stored) => Ok(*stored == input),
        }
    }

    /// Whether the credential should be re-hashed on the next password write.
    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredCredential::LegacyPlaintext(_))
    }
}
