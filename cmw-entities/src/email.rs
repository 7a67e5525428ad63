use url::form_urlencoded;

use crate::approval::Approval;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Everything an external mail client needs to compose an email.
///
/// The email is never sent by this application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeRequest {
    /// Empty if no recipient has been chosen yet
    pub recipient: String,
    pub content: EmailContent,
}

impl ComposeRequest {
    pub fn has_recipient(&self) -> bool {
        !self.recipient.trim().is_empty()
    }

    /// `mailto:` URL with the query encoded like an HTML form.
    pub fn mailto_url(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("subject", &self.content.subject)
            .append_pair("body", &self.content.body)
            .finish();
        format!("mailto:{}?{query}", self.recipient.trim())
    }
}

impl From<&Approval> for ComposeRequest {
    fn from(from: &Approval) -> Self {
        Self {
            recipient: from.recipient_email.clone(),
            content: from.email_content(),
        }
    }
}
