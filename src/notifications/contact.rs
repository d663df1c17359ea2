use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{EmailSender, NotificationError, NotificationTemplates};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactCategory {
    GeneralInquiry,
    BugReport,
    FeatureRequest,
    TechnicalSupport,
    Feedback,
    Other,
}

impl ContactCategory {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::GeneralInquiry => "General Inquiry",
            Self::BugReport => "Bug Report",
            Self::FeatureRequest => "Feature Request",
            Self::TechnicalSupport => "Technical Support",
            Self::Feedback => "Feedback",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactMessage {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters."))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 5, max = 200, message = "Subject must be between 5 and 200 characters."))]
    pub subject: String,
    pub category: ContactCategory,
    #[validate(length(min = 10, max = 2000, message = "Message must be between 10 and 2000 characters."))]
    pub message: String,
}

/// Sends the site owner a copy of the message, then thanks the sender.
pub async fn deliver(
    sender: &EmailSender,
    templates: &NotificationTemplates,
    admin_email: &str,
    message: &ContactMessage,
    submitted_at: DateTime<Utc>,
) -> Result<(), NotificationError> {
    let admin_body = templates.contact_admin_email(message, submitted_at)?;
    sender
        .send_email(
            admin_email,
            "GardenHub",
            &format!("GardenHub Contact Form: {}", message.subject),
            &admin_body,
        )
        .await?;

    let confirmation = templates.contact_confirmation_email(message)?;
    sender
        .send_email(
            &message.email,
            &message.name,
            "Thank you for contacting GardenHub",
            &confirmation,
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Broken chart".into(),
            category: ContactCategory::BugReport,
            message: "The humidity chart is empty.".into(),
        }
    }

    #[test]
    fn short_fields_are_rejected() {
        let mut bad = message();
        bad.name = "A".into();
        bad.email = "not-an-email".into();
        bad.message = "short".into();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("message"));
        assert!(!fields.contains_key("subject"));
    }

    #[tokio::test]
    async fn delivers_both_emails_in_mock_mode() {
        let templates = NotificationTemplates::new().unwrap();
        let sender = EmailSender::mock("noreply@gardenhub.app");
        deliver(&sender, &templates, "owner@gardenhub.app", &message(), Utc::now())
            .await
            .unwrap();
    }
}
