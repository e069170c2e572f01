pub mod errors;

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::info;
use crate::config::MailParameters;
use crate::manager_mail::errors::MailError;

pub struct Mail {
    transport: SmtpTransport,
    from: Mailbox,
    to: Mailbox,
}

impl Mail {
    /// Returns a new instance of the Mail struct
    ///
    /// # Arguments
    ///
    /// * 'mail' - the mail configuration section, endpoint plus credentials
    ///   and the fixed sender and recipient addresses
    pub fn new(mail: &MailParameters) -> Result<Self, MailError> {
        let credentials = Credentials::new(mail.smtp_user.clone(), mail.smtp_password.clone());

        let transport = SmtpTransport::relay(&mail.smtp_endpoint)?
            .credentials(credentials)
            .build();

        Ok(
            Self {
                transport,
                from: mail.from.parse::<Mailbox>()?,
                to: mail.to.parse::<Mailbox>()?,
            }
        )
    }

    /// Sends a plain text mail with the given subject and body.
    ///
    /// The transport pools its connection internally, dropping the struct
    /// closes the session whether or not the send succeeded.
    ///
    /// # Arguments
    ///
    /// * 'subject' - the subject of the mail
    /// * 'body' - the body of the mail
    pub fn send_mail(&self, subject: String, body: String) -> Result<(), MailError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        self.transport.send(&message)?;

        info!("Rain alert email sent successfully to {}", self.to);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters(from: &str, to: &str) -> MailParameters {
        MailParameters {
            smtp_user: "monitor@example.com".to_string(),
            smtp_password: "secret".to_string(),
            smtp_endpoint: "smtp.example.com".to_string(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn accepts_valid_addresses() {
        let mail = Mail::new(&parameters("Rain Monitor <monitor@example.com>", "someone@example.com"));

        assert!(mail.is_ok());
    }

    #[test]
    fn rejects_malformed_sender() {
        let mail = Mail::new(&parameters("not-an-address", "someone@example.com"));

        assert!(matches!(mail, Err(MailError::InvalidEmailAddress(_))));
    }
}
