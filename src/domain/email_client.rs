use color_eyre::eyre::Result;

use super::Email;

#[async_trait::async_trait]
pub trait EmailClient {
    /// Sends one message with an HTML part and a plain-text part.
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<()>;
}
