use serde::{Deserialize, Serialize};
use validator::Validate;

/// Message submitted through the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 5000))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContactRequest {
        ContactRequest {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            subject: "Airport pickup".to_string(),
            message: "Do you deliver cars to the airport?".to_string(),
        }
    }

    #[test]
    fn test_valid_contact_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_invalid_contact_request() {
        let mut bad_email = request();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut empty_message = request();
        empty_message.message = String::new();
        assert!(empty_message.validate().is_err());
    }
}
