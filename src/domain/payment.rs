use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ColorTag, Colored};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

closed_enum! {
    pub enum PaymentStatus as "payment status" {
        Pending => ("pending", "Pending"),
        Completed => ("completed", "Completed"),
        Failed => ("failed", "Failed"),
        Refunded => ("refunded", "Refunded"),
    }
}

impl Colored for PaymentStatus {
    fn color(&self) -> ColorTag {
        match self {
            PaymentStatus::Pending => ColorTag::Warning,
            PaymentStatus::Completed => ColorTag::Success,
            PaymentStatus::Failed => ColorTag::Danger,
            PaymentStatus::Refunded => ColorTag::Info,
        }
    }
}

closed_enum! {
    pub enum PaymentMethod as "payment method" {
        Cash => ("cash", "Cash"),
        CreditCard => ("credit_card", "Credit Card"),
        DebitCard => ("debit_card", "Debit Card"),
        BankTransfer => ("bank_transfer", "Bank Transfer"),
    }
}

closed_enum! {
    pub enum PaymentType as "payment type" {
        Deposit => ("deposit", "Deposit"),
        Rental => ("rental", "Rental"),
        Refund => ("refund", "Refund"),
        Damage => ("damage", "Damage"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub booking_id: Uuid,
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
    pub payment_type: PaymentType,
    pub status: Option<PaymentStatus>,
    pub transaction_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{color_of, colored_options, options};

    #[test]
    fn test_payment_status_colors() {
        assert_eq!(PaymentStatus::Pending.color(), ColorTag::Warning);
        assert_eq!(PaymentStatus::Completed.color(), ColorTag::Success);
        assert_eq!(PaymentStatus::Failed.color(), ColorTag::Danger);
        assert_eq!(PaymentStatus::Refunded.color(), ColorTag::Info);
        assert_eq!(color_of::<PaymentStatus>("refunded"), Ok(ColorTag::Info));
        assert!(color_of::<PaymentStatus>("chargeback").is_err());
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::CreditCard.as_str(), "credit_card");
        assert_eq!(PaymentMethod::CreditCard.label(), "Credit Card");
        assert_eq!(PaymentMethod::BankTransfer.label(), "Bank Transfer");
        assert_eq!(
            "debit_card".parse::<PaymentMethod>(),
            Ok(PaymentMethod::DebitCard)
        );
    }

    #[test]
    fn test_options_listing() {
        let types = options::<PaymentType>();
        let values: Vec<_> = types.iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["deposit", "rental", "refund", "damage"]);
        assert!(types.iter().all(|o| o.color.is_none()));

        let statuses = colored_options::<PaymentStatus>();
        assert_eq!(statuses.len(), 4);
        assert_eq!(statuses[1].color, Some(ColorTag::Success));
    }
}
