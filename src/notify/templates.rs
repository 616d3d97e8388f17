//! Mail templates for the registration and approval flows.

use crate::db::User;

/// Rendered content for one mail message.
#[derive(Debug, Clone)]
pub struct MailContent {
    /// Subject line.
    pub subject: String,
    /// Plain text body.
    pub text: String,
    /// HTML body.
    pub html: String,
}

/// Review-request mail sent to the station admin when a new registration
/// lands in the pending queue.
pub fn approval_request(user: &User, review_link: &str) -> MailContent {
    let role = user.role.display_name();

    let text = format!(
        r#"A new {role} has registered and requires your approval:

  Name:           {name}
  Email:          {email}
  Role:           {role}
  Police Station: {station}

Open the link below to approve or reject this registration:

  {link}

The link expires in 24 hours."#,
        role = role,
        name = user.name,
        email = user.email,
        station = user.police_station,
        link = review_link,
    );

    let html = format!(
        r#"<h3>{role} Registration Request</h3>
<p>A new {role_lower} has registered and requires your approval:</p>
<ul>
  <li>Name: {name}</li>
  <li>Email: {email}</li>
  <li>Role: {role}</li>
  <li>Police Station: {station}</li>
</ul>
<p>Click the link below to approve or reject this registration:</p>
<p><a href="{link}">Review Registration</a></p>
<p>The link expires in 24 hours.</p>"#,
        role = role,
        role_lower = user.role.as_str(),
        name = user.name,
        email = user.email,
        station = user.police_station,
        link = review_link,
    );

    MailContent {
        subject: format!("{role} Registration Approval Required"),
        text,
        html,
    }
}

/// Courtesy mail sent to the applicant after approval.
pub fn account_approved() -> MailContent {
    MailContent {
        subject: "Account Registration Status".to_string(),
        text: "Your account has been approved. You can now log in to the \
               Evidence Management System."
            .to_string(),
        html: "<h3>Account Approved</h3>\
               <p>Your account has been approved. You can now log in to the \
               Evidence Management System.</p>"
            .to_string(),
    }
}

/// Courtesy mail sent to the applicant after rejection.
pub fn account_rejected() -> MailContent {
    MailContent {
        subject: "Account Registration Status".to_string(),
        text: "We regret to inform you that your account registration has \
               been rejected."
            .to_string(),
        html: "<h3>Account Registration Update</h3>\
               <p>We regret to inform you that your account registration has \
               been rejected.</p>"
            .to_string(),
    }
}
