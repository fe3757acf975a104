use crate::domain::error::UserError;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use bcrypt::DEFAULT_COST;
use std::fmt::{Display, Formatter};

pub trait Hasher: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String, UserError>;
    fn verify_password(&self, password: &str, hash: &str) -> bool;
}

/// Salted, slow password hashing schemes. Stored hashes carry the scheme as a
/// `<scheme>.` prefix so the scheme can change without invalidating old hashes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum HashingScheme {
    #[default]
    Argon2,
    Bcrypt,
    BcryptLow,
}

impl HashingScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashingScheme::Argon2 => "argon2",
            HashingScheme::Bcrypt => "bcrypt",
            HashingScheme::BcryptLow => "bcrypt_low",
        }
    }

    fn hasher(&self) -> Box<dyn Hasher> {
        match self {
            HashingScheme::Argon2 => Box::new(Argon2Hasher),
            HashingScheme::Bcrypt => Box::new(BcryptHasher { cost: DEFAULT_COST }),
            HashingScheme::BcryptLow => Box::new(BcryptHasher { cost: 4 }),
        }
    }
}

impl Display for HashingScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for HashingScheme {
    type Error = UserError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "argon2" => Ok(HashingScheme::Argon2),
            "bcrypt" => Ok(HashingScheme::Bcrypt),
            "bcrypt_low" => Ok(HashingScheme::BcryptLow),
            _ => Err(UserError::SchemeNotSupported),
        }
    }
}

impl TryFrom<String> for HashingScheme {
    type Error = UserError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HashingScheme::try_from(value.as_str())
    }
}

/// Hashes with the configured scheme, verifies with whatever scheme the stored hash names.
#[derive(Debug, Clone, Copy)]
pub struct SchemeAwareHasher {
    current_scheme: HashingScheme,
}

impl SchemeAwareHasher {
    pub fn with_scheme(scheme: HashingScheme) -> Self {
        SchemeAwareHasher {
            current_scheme: scheme,
        }
    }

    pub fn current_scheme(&self) -> HashingScheme {
        self.current_scheme
    }

    pub fn is_outdated(&self, hash: &str) -> bool {
        match hash.split_once('.') {
            Some((scheme, _)) => HashingScheme::try_from(scheme)
                .map(|scheme| scheme != self.current_scheme)
                .unwrap_or(true),
            None => true,
        }
    }
}

impl Default for SchemeAwareHasher {
    fn default() -> Self {
        SchemeAwareHasher::with_scheme(HashingScheme::default())
    }
}

impl Hasher for SchemeAwareHasher {
    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        let hashed = self.current_scheme.hasher().hash_password(password)?;

        Ok(format!("{}.{}", self.current_scheme, hashed))
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        let Some((scheme, stored)) = hash.split_once('.') else {
            return false;
        };

        match HashingScheme::try_from(scheme) {
            Ok(scheme) => scheme.hasher().verify_password(password, stored),
            Err(_) => false,
        }
    }
}

struct Argon2Hasher;

impl Hasher for Argon2Hasher {
    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|_| UserError::EncryptionFailed)
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

struct BcryptHasher {
    cost: u32,
}

impl Hasher for BcryptHasher {
    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        bcrypt::hash(password, self.cost).map_err(|_| UserError::EncryptionFailed)
    }

    fn verify_password(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}
