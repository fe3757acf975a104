use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid username: {reason}")]
    InvalidUsername { reason: String },
    #[error("Invalid email: {email}")]
    InvalidEmail { email: String },
    #[error("Password must not be empty")]
    EmptyPassword,
    #[error("Password hashing failed")]
    EncryptionFailed,
    #[error("Password hashing scheme not supported")]
    SchemeNotSupported,
}
