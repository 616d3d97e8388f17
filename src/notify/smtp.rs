//! SMTP mail delivery over lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, MultiPart, SinglePart},
    transport::smtp::{
        authentication::Credentials,
        client::{Tls, TlsParameters},
    },
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{info, warn};

use super::{Mailer, OutgoingMail};
use crate::config::SmtpConfig;
use crate::{CustodiaError, Result};

/// SMTP mailer over a long-lived transport.
///
/// The transport is built once at startup and reused for every send.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
    send_timeout: Duration,
}

impl SmtpMailer {
    /// Build the transport from configuration.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let host = &config.host;

        let mut builder = if config.use_tls {
            let tls_params = TlsParameters::new(host.clone())
                .map_err(|e| CustodiaError::Config(format!("TLS configuration error: {e}")))?;

            // Port 465 uses implicit TLS (SMTPS), other ports use STARTTLS
            if config.port == 465 {
                AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                    .map_err(|e| CustodiaError::Config(format!("SMTP relay error: {e}")))?
                    .port(config.port)
                    .tls(Tls::Wrapper(tls_params))
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                    .map_err(|e| CustodiaError::Config(format!("SMTP relay error: {e}")))?
                    .port(config.port)
                    .tls(Tls::Required(tls_params))
            }
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host).port(config.port)
        };

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from: config.from.clone(),
            send_timeout: Duration::from_secs(config.send_timeout_secs),
        })
    }

    /// Probe the relay once at startup.
    ///
    /// A failed probe is logged, not fatal: the relay may come up later
    /// and sends carry their own error handling.
    pub async fn check_connection(&self) {
        match tokio::time::timeout(self.send_timeout, self.transport.test_connection()).await {
            Ok(Ok(true)) => info!("SMTP relay is ready to send mail"),
            Ok(Ok(false)) => warn!("SMTP relay refused the connection probe"),
            Ok(Err(e)) => warn!(error = %e, "SMTP connection probe failed"),
            Err(_) => warn!("SMTP connection probe timed out"),
        }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &OutgoingMail) -> Result<()> {
        let message = Message::builder()
            .from(self.from.parse().map_err(|e| {
                CustodiaError::Notification(format!("invalid from address: {e}"))
            })?)
            .to(mail.to.parse().map_err(|e| {
                CustodiaError::Notification(format!("invalid to address: {e}"))
            })?)
            .subject(&mail.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(mail.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(mail.html.clone()),
                    ),
            )
            .map_err(|e| CustodiaError::Notification(format!("failed to build mail: {e}")))?;

        // Bound the send so a slow relay cannot stall the caller's request
        match tokio::time::timeout(self.send_timeout, self.transport.send(message)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(CustodiaError::Notification(e.to_string())),
            Err(_) => Err(CustodiaError::Notification(format!(
                "mail send timed out after {}s",
                self.send_timeout.as_secs()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> SmtpConfig {
        SmtpConfig {
            enabled: true,
            host: "localhost".to_string(),
            port: 25,
            username: None,
            password: None,
            from: "EMS <ops@example.org>".to_string(),
            fallback_mailbox: "ops@example.org".to_string(),
            use_tls: false,
            send_timeout_secs: 1,
        }
    }

    #[test]
    fn test_mailer_creation_no_tls() {
        assert!(SmtpMailer::new(&base_config()).is_ok());
    }

    #[test]
    fn test_mailer_creation_with_credentials() {
        let mut config = base_config();
        config.port = 587;
        config.username = Some("user".to_string());
        config.password = Some("pass".to_string());
        assert!(SmtpMailer::new(&config).is_ok());
    }

    #[test]
    fn test_mailer_creation_tls_variants() {
        let mut config = base_config();
        config.use_tls = true;
        config.port = 465;
        assert!(SmtpMailer::new(&config).is_ok());

        config.port = 587;
        assert!(SmtpMailer::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_send_rejects_invalid_recipient() {
        let mailer = SmtpMailer::new(&base_config()).unwrap();
        let mail = OutgoingMail {
            to: "not an address".to_string(),
            subject: "s".to_string(),
            text: "t".to_string(),
            html: "<p>t</p>".to_string(),
        };

        let result = mailer.send(&mail).await;
        assert!(matches!(result, Err(CustodiaError::Notification(_))));
    }
}
