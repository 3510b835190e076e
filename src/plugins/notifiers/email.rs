use async_trait::async_trait;
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use crate::config::SmtpConfig;
use crate::plugins::traits::{ChangeType, NotificationEvent, Notifier};
use crate::utils::error::AppError;

pub struct EmailNotifier {
    config: SmtpConfig,
}

impl EmailNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        EmailNotifier { config }
    }

    fn format_subject(&self, event: &NotificationEvent) -> String {
        match event.change_type() {
            ChangeType::Decreased => format!("Price Drop: {} - {}", event.item_id, event.current),
            ChangeType::Increased => format!("Price Increase: {} - {}", event.item_id, event.current),
            ChangeType::Unchanged => format!("Price Change Alert: {}", event.item_id),
        }
    }

    fn format_text_body(&self, event: &NotificationEvent) -> String {
        format!(
            "The price of item \"{}\" went from {} to {}!\n\n{}",
            event.item_id,
            event.formatted_previous(),
            event.current,
            event.url
        )
    }

    fn format_html_body(&self, event: &NotificationEvent) -> String {
        let change_class = match event.change_type() {
            ChangeType::Increased => "price-increase",
            _ => "price-drop",
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 20px; }}
        .change {{ margin: 15px 0; padding: 10px; border-radius: 5px; }}
        .price-drop {{ background: #e8f5e8; border-left: 4px solid #4CAF50; }}
        .price-increase {{ background: #fff3cd; border-left: 4px solid #ff9800; }}
    </style>
</head>
<body>
    <div class="change {}">
        The price of item <strong>{}</strong> went from {} to {}!
    </div>
    <p><a href="{}">{}</a></p>
</body>
</html>
"#,
            change_class,
            escape_html(&event.item_id),
            event.formatted_previous(),
            event.current,
            escape_html(&event.url),
            escape_html(&event.url)
        )
    }

    fn sender(&self) -> Result<Mailbox, AppError> {
        let address = self
            .config
            .from_address
            .as_deref()
            .or(self.config.username.as_deref())
            .ok_or_else(|| AppError::Notify("no sender address configured (SENDER_EMAIL)".to_string()))?;

        format!("{} <{}>", self.config.from_name, address)
            .parse()
            .map_err(|e| AppError::Notify(format!("invalid sender address '{}': {}", address, e)))
    }

    fn recipient(&self) -> Result<Mailbox, AppError> {
        let address = self
            .config
            .recipient
            .as_deref()
            .ok_or_else(|| AppError::Notify("no recipient address configured".to_string()))?;

        address
            .parse()
            .map_err(|e| AppError::Notify(format!("invalid recipient address '{}': {}", address, e)))
    }

    fn credentials(&self) -> Result<Credentials, AppError> {
        match (&self.config.username, &self.config.password) {
            (Some(username), Some(password)) => Ok(Credentials::new(username.clone(), password.clone())),
            _ => Err(AppError::Notify(
                "SMTP credentials missing (SENDER_EMAIL / EMAIL_PASSWORD)".to_string(),
            )),
        }
    }

    fn build_message(&self, event: &NotificationEvent) -> Result<Message, AppError> {
        Message::builder()
            .from(self.sender()?)
            .to(self.recipient()?)
            .subject(self.format_subject(event))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_PLAIN)
                            .body(self.format_text_body(event)),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(header::ContentType::TEXT_HTML)
                            .body(self.format_html_body(event)),
                    ),
            )
            .map_err(|e| AppError::Notify(format!("failed to build email: {}", e)))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, AppError> {
        let credentials = self.credentials()?;

        let builder = if self.config.use_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.host)
                .map_err(|e| AppError::Notify(format!("invalid SMTP relay '{}': {}", self.config.host, e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&self.config.host)
        };

        Ok(builder.port(self.config.port).credentials(credentials).build())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, event: &NotificationEvent) -> Result<(), AppError> {
        let message = self.build_message(event)?;
        let mailer = self.transport()?;

        let response = mailer
            .send(message)
            .await
            .map_err(|e| AppError::Notify(format!("SMTP delivery failed: {}", e)))?;

        debug!(code = %response.code(), "SMTP server accepted message");
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
