use crate::config::Config;
use crate::models::Credentials;

/// Decides whether a set of credentials may enter the dashboard
pub trait CredentialVerifier {
    fn verify(&self, credentials: &Credentials) -> bool;
}

/// Compares against a single configured email/password pair.
///
/// This is a gate for a demo desk, not an authentication boundary.
pub struct StaticCredentials {
    expected: Credentials,
}

impl StaticCredentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            expected: Credentials::new(email, password),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.login_email.clone(), config.login_password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, credentials: &Credentials) -> bool {
        *credentials == self.expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_only() {
        let verifier = StaticCredentials::from_config(&Config::default());

        assert!(verifier.verify(&Credentials::new("admin@gmail.com", "123456")));
        assert!(!verifier.verify(&Credentials::new("admin@gmail.com", "1234567")));
        assert!(!verifier.verify(&Credentials::new("Admin@gmail.com", "123456")));
        assert!(!verifier.verify(&Credentials::new(" admin@gmail.com", "123456")));
    }
}
