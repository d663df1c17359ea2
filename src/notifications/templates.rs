use chrono::{DateTime, Utc};
use handlebars::{html_escape, Handlebars, RenderError, TemplateError};
use serde_json::json;

use super::ContactMessage;

const CONTACT_ADMIN: &str = "contact_admin";
const CONTACT_CONFIRMATION: &str = "contact_confirmation";

const CONTACT_ADMIN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body { font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; }
        .container { max-width: 600px; margin: 0 auto; padding: 20px; border: 1px solid #ddd; border-radius: 8px; }
        .header { background-color: #2d6a4f; color: white; padding: 15px; border-radius: 8px 8px 0 0; }
        .field { margin-bottom: 12px; }
        .label { font-weight: bold; color: #555; }
        .message { background-color: #f8f9fa; padding: 15px; border-left: 4px solid #40916c; }
        .footer { margin-top: 30px; font-size: 12px; color: #999; }
    </style>
</head>
<body>
    <div class="container">
        <div class="header"><h2>New Contact Form Submission</h2></div>
        <div class="field"><span class="label">From:</span> {{name}} ({{email}})</div>
        <div class="field"><span class="label">Category:</span> {{category}}</div>
        <div class="field"><span class="label">Subject:</span> {{subject}}</div>
        <div class="field"><span class="label">Message:</span></div>
        <div class="message">{{{message_html}}}</div>
        <div class="footer">Submitted on {{submitted_at}}</div>
    </div>
</body>
</html>
"#;

const CONTACT_CONFIRMATION_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body { font-family: 'Helvetica Neue', Helvetica, Arial, sans-serif; line-height: 1.6; color: #333; }
        .container { max-width: 600px; margin: 0 auto; padding: 20px; }
        .summary { background-color: #f8f9fa; padding: 15px; border-radius: 6px; }
        .footer { margin-top: 30px; font-size: 12px; color: #999; }
    </style>
</head>
<body>
    <div class="container">
        <h2>Thank you for contacting GardenHub, {{name}}!</h2>
        <p>We've received your message and will get back to you as soon as possible.</p>
        <div class="summary">
            <p><strong>Category:</strong> {{category}}</p>
            <p><strong>Subject:</strong> {{subject}}</p>
        </div>
        <div class="footer">This is an automated message from GardenHub. Please do not reply.</div>
    </div>
</body>
</html>
"#;

/// Email bodies rendered through handlebars. Templates are compiled once at
/// startup so a broken template fails the boot, not a request.
pub struct NotificationTemplates {
    registry: Handlebars<'static>,
}

impl NotificationTemplates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_template_string(CONTACT_ADMIN, CONTACT_ADMIN_TEMPLATE)?;
        registry.register_template_string(CONTACT_CONFIRMATION, CONTACT_CONFIRMATION_TEMPLATE)?;
        Ok(Self { registry })
    }

    pub fn contact_admin_email(
        &self,
        message: &ContactMessage,
        submitted_at: DateTime<Utc>,
    ) -> Result<String, RenderError> {
        // The body is escaped before newlines become <br>, then rendered raw.
        let message_html = html_escape(&message.message).replace('\n', "<br>");
        self.registry.render(
            CONTACT_ADMIN,
            &json!({
                "name": message.name,
                "email": message.email,
                "category": message.category.display_name(),
                "subject": message.subject,
                "message_html": message_html,
                "submitted_at": submitted_at.format("%B %d, %Y at %H:%M UTC").to_string(),
            }),
        )
    }

    pub fn contact_confirmation_email(&self, message: &ContactMessage) -> Result<String, RenderError> {
        self.registry.render(
            CONTACT_CONFIRMATION,
            &json!({
                "name": message.name,
                "category": message.category.display_name(),
                "subject": message.subject,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::ContactCategory;
    use chrono::TimeZone;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada <Admin>".into(),
            email: "ada@example.com".into(),
            subject: "Feature idea".into(),
            category: ContactCategory::FeatureRequest,
            message: "Line one\nLine <two>".into(),
        }
    }

    #[test]
    fn admin_email_keeps_line_breaks_and_escapes_markup() {
        let templates = NotificationTemplates::new().unwrap();
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap();
        let html = templates.contact_admin_email(&message(), at).unwrap();

        assert!(html.contains("Line one<br>Line &lt;two&gt;"));
        assert!(html.contains("Ada &lt;Admin&gt;"));
        assert!(html.contains("Feature Request"));
        assert!(html.contains("June 01, 2024 at 14:30 UTC"));
    }

    #[test]
    fn confirmation_greets_the_sender() {
        let templates = NotificationTemplates::new().unwrap();
        let html = templates.contact_confirmation_email(&message()).unwrap();
        assert!(html.contains("Thank you for contacting GardenHub"));
        assert!(html.contains("Feature idea"));
    }
}
