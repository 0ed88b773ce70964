//! Password hashing utilities

use bcrypt::{hash, DEFAULT_COST};

/// Hash a password using bcrypt at `cost` (`None` = bcrypt default)
pub fn hash_password(password: &str, cost: Option<u32>) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost.unwrap_or(DEFAULT_COST))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_hides_password() {
        let hashed = hash_password("correct horse", Some(4)).unwrap();
        assert!(!hashed.contains("correct horse"));
        assert!(bcrypt::verify("correct horse", &hashed).unwrap());
        assert!(!bcrypt::verify("wrong horse", &hashed).unwrap());
    }
}
