pub mod contact;
pub mod email;
pub mod templates;

pub use contact::{ContactCategory, ContactMessage};
pub use email::EmailSender;
pub use templates::NotificationTemplates;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("template error: {0}")]
    Template(#[from] handlebars::RenderError),
    #[error("SendGrid error: {0}")]
    Send(String),
}
