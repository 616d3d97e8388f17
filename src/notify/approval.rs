//! Approval notification construction.
//!
//! Pure construction and delivery: given a freshly created pending user,
//! mint a review token, render the mail, and hand it to the mailer. The
//! decision of *whether* to notify belongs to the workflows.

use std::sync::Arc;

use tracing::warn;

use super::templates;
use super::{Mailer, OutgoingMail};
use crate::auth::{TokenIssuer, TokenPurpose};
use crate::db::{Status, User};
use crate::Result;

/// Builds and delivers the mails tied to the approval lifecycle.
pub struct ApprovalNotifier {
    mailer: Arc<dyn Mailer>,
    tokens: TokenIssuer,
    frontend_url: String,
    fallback_mailbox: String,
}

impl ApprovalNotifier {
    /// Create a notifier.
    pub fn new(
        mailer: Arc<dyn Mailer>,
        tokens: TokenIssuer,
        frontend_url: impl Into<String>,
        fallback_mailbox: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            tokens,
            frontend_url: frontend_url.into(),
            fallback_mailbox: fallback_mailbox.into(),
        }
    }

    /// Resolve the reviewing address for a station admin lookup.
    ///
    /// Degrades to the configured operator mailbox when no admin address
    /// is resolvable, so a registration is never silently unreviewable.
    pub fn recipient_for_admin(&self, admin: Option<&User>) -> String {
        match admin {
            Some(a) if !a.email.is_empty() => a.email.clone(),
            _ => {
                warn!("no admin address resolvable; degrading to operator mailbox");
                self.fallback_mailbox.clone()
            }
        }
    }

    /// Build the frontend review link embedding a fresh approval token.
    pub fn review_link(&self, token: &str) -> String {
        format!(
            "{}/approve-user/{}",
            self.frontend_url.trim_end_matches('/'),
            token
        )
    }

    /// Mail the station admin a review request for a new pending user.
    ///
    /// Errors propagate: the signup workflow treats an unreviewable
    /// registration as a failed registration.
    pub async fn notify_admin_of_signup(&self, admin_email: &str, user: &User) -> Result<()> {
        let token = self.tokens.issue(user.id, TokenPurpose::Approval)?;
        let link = self.review_link(&token);
        let content = templates::approval_request(user, &link);

        self.mailer
            .send(&OutgoingMail::new(admin_email, content))
            .await
    }

    /// Mail the applicant the outcome of their review.
    ///
    /// Callers treat this as best-effort; the status transition has
    /// already committed when this runs.
    pub async fn notify_applicant(&self, user: &User, outcome: Status) -> Result<()> {
        let content = match outcome {
            Status::Approved => templates::account_approved(),
            Status::Rejected => templates::account_rejected(),
            Status::Pending => return Ok(()),
        };

        self.mailer
            .send(&OutgoingMail::new(user.email.clone(), content))
            .await
    }
}
