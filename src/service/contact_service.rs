use std::sync::Arc;
use validator::Validate;

use crate::{
    domain::ContactRequest,
    error::{AppError, Result},
    notifications::{self, Mailer},
};

pub struct ContactService {
    mailer: Arc<dyn Mailer>,
    admin_address: Option<String>,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn Mailer>, admin_address: Option<String>) -> Self {
        Self { mailer, admin_address }
    }

    pub async fn submit(&self, request: ContactRequest) -> Result<()> {
        request.validate()?;

        let admin_address = self.admin_address.as_deref().ok_or_else(|| {
            AppError::Mail("No admin address configured for contact messages".to_string())
        })?;

        let mail = notifications::contact_message(&request, admin_address);
        self.mailer.send(mail).await?;

        tracing::info!(from = %request.email, "Contact message forwarded");
        Ok(())
    }
}
