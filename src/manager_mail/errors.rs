use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("MailError::InvalidEmailAddress: {0}")]
    InvalidEmailAddress(#[from] lettre::address::AddressError),
    #[error("MailError::Message: {0}")]
    Message(#[from] lettre::error::Error),
    #[error("MailError::Smtp: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}
