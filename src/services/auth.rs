//! Admin credential check
//!
//! One admin account. The username comes from settings; the password is
//! either an Argon2id hash stored in settings or, on a fresh install, the
//! storefront's built-in default (`root` / `video`).

use tracing::error;

use crate::config::settings::AdminSettings;
use crate::crypto::{hash_password, verify_password, HashParams, SecureString};
use crate::error::CartaResult;

const DEFAULT_PASSWORD: &str = "video";

/// Verifies admin credentials
#[derive(Debug, Clone)]
pub struct Authenticator {
    username: String,
    password_hash: String,
}

impl Authenticator {
    /// Authenticator for a username and a PHC hash
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Authenticator from settings, hashing the default password if no hash is configured
    pub fn from_settings(settings: &AdminSettings) -> CartaResult<Self> {
        let hash = match &settings.password_hash {
            Some(hash) => hash.clone(),
            None => hash_password(&SecureString::from(DEFAULT_PASSWORD), HashParams::light())?,
        };
        Ok(Self::new(settings.username.clone(), hash))
    }

    /// The default `root` / `video` pair
    pub fn default_credentials() -> CartaResult<Self> {
        Self::from_settings(&AdminSettings::default())
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether the pair matches the configured admin
    ///
    /// An unusable stored hash denies access and is logged.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }
        match verify_password(password, &self.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                error!(error = %e, "admin password hash cannot be used");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pair() {
        let auth = Authenticator::default_credentials().unwrap();
        assert!(auth.verify("root", "video"));
        assert!(!auth.verify("root", "wrong"));
        assert!(!auth.verify("wrong", "video"));
    }

    #[test]
    fn test_configured_hash_replaces_default() {
        let hash = hash_password(&SecureString::from("s3cret"), HashParams::light()).unwrap();
        let settings = AdminSettings {
            username: "tienda".into(),
            password_hash: Some(hash),
        };
        let auth = Authenticator::from_settings(&settings).unwrap();

        assert!(auth.verify("tienda", "s3cret"));
        assert!(!auth.verify("root", "video"));
    }

    #[test]
    fn test_broken_hash_denies() {
        let auth = Authenticator::new("root", "not-a-hash");
        assert!(!auth.verify("root", "video"));
    }
}
