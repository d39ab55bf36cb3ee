use crate::{
    config::BusinessConfig,
    domain::{Booking, Car, ContactRequest, Customer},
    error::{AppError, Result},
    notifications::OutgoingMail,
    reporting::format_cents,
};

const DATE_FORMAT: &str = "%B %d, %Y %H:%M";

pub fn booking_confirmation(
    booking: &Booking,
    customer: &Customer,
    car: &Car,
    business: &BusinessConfig,
) -> OutgoingMail {
    let body = format!(
        "Dear {name},\n\n\
         Thank you for booking with {business}. Your booking {reference} is {status}.\n\n\
         Car: {car}\n\
         Pickup: {pickup}\n\
         Return: {dropoff}\n\
         Total: {total}\n\n\
         We look forward to seeing you.\n\n\
         {business}\n",
        name = customer.full_name(),
        business = business.name,
        reference = booking.reference,
        status = booking.status.label().to_lowercase(),
        car = car.name,
        pickup = booking.pickup_date.format(DATE_FORMAT),
        dropoff = booking.dropoff_date.format(DATE_FORMAT),
        total = format_cents(booking.total_amount_cents, &business.currency_symbol),
    );

    OutgoingMail {
        to: customer.email.clone(),
        reply_to: None,
        subject: format!("Booking Confirmation - {}", booking.reference),
        body,
    }
}

/// Reminder for an outstanding balance. Both the balance and the payment link
/// must already be recorded on the booking.
pub fn payment_reminder(
    booking: &Booking,
    customer: &Customer,
    business: &BusinessConfig,
) -> Result<OutgoingMail> {
    let (balance, url) = match (booking.balance_due(), booking.balance_payment_url()) {
        (Some(balance), Some(url)) => (balance, url),
        _ => {
            return Err(AppError::BadRequest(format!(
                "Booking {} has no outstanding balance details",
                booking.reference
            )))
        }
    };

    let body = format!(
        "Dear {name},\n\n\
         This is a reminder that a balance of {balance} is due for booking {reference}, \
         picked up on {pickup}.\n\n\
         You can pay securely here: {url}\n\n\
         {business}\n",
        name = customer.full_name(),
        balance = format_cents(balance, &business.currency_symbol),
        reference = booking.reference,
        pickup = booking.pickup_date.format(DATE_FORMAT),
        url = url,
        business = business.name,
    );

    Ok(OutgoingMail {
        to: customer.email.clone(),
        reply_to: None,
        subject: format!("Payment Reminder - {}", booking.reference),
        body,
    })
}

pub fn contact_message(request: &ContactRequest, admin_address: &str) -> OutgoingMail {
    let body = format!(
        "New contact form submission\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\n\
         {}\n",
        request.name,
        request.email,
        request.phone.as_deref().unwrap_or("-"),
        request.message,
    );

    OutgoingMail {
        to: admin_address.to_string(),
        reply_to: Some(request.email.clone()),
        subject: format!("Contact: {}", request.subject),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingStatus, CarStatus, FuelType, Transmission};
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn business() -> BusinessConfig {
        BusinessConfig {
            name: "Coastline Rentals".to_string(),
            currency_symbol: "$".to_string(),
        }
    }

    fn customer() -> Customer {
        let now = Utc::now();
        Customer {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            driving_license_number: None,
            date_of_birth: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn car() -> Car {
        let now = Utc::now();
        Car {
            id: Uuid::new_v4(),
            category_id: None,
            name: "Volkswagen Golf".to_string(),
            slug: "volkswagen-golf".to_string(),
            make: "Volkswagen".to_string(),
            model: "Golf".to_string(),
            year: 2023,
            license_plate: "GOLF-1".to_string(),
            seats: 5,
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Manual,
            daily_rate_cents: 5500,
            status: CarStatus::Available,
            is_active: true,
            is_featured: false,
            description: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn booking(balance: Option<i64>, url: Option<&str>) -> Booking {
        let pickup = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        Booking {
            id: Uuid::new_v4(),
            reference: "BK-1A2B3C4D".to_string(),
            customer_id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            pickup_location_id: Uuid::new_v4(),
            dropoff_location_id: None,
            pickup_date: pickup,
            dropoff_date: Utc.with_ymd_and_hms(2024, 7, 4, 9, 0, 0).unwrap(),
            actual_dropoff_date: None,
            daily_rate_cents: 5500,
            total_amount_cents: 16500,
            status: BookingStatus::Confirmed,
            balance_due_cents: balance,
            balance_payment_url: url.map(str::to_string),
            notes: None,
            created_at: pickup,
            updated_at: pickup,
        }
    }

    #[test]
    fn test_booking_confirmation_content() {
        let mail = booking_confirmation(&booking(None, None), &customer(), &car(), &business());

        assert_eq!(mail.to, "ada@example.com");
        assert_eq!(mail.subject, "Booking Confirmation - BK-1A2B3C4D");
        assert!(mail.body.contains("Dear Ada Lovelace"));
        assert!(mail.body.contains("is confirmed"));
        assert!(mail.body.contains("Volkswagen Golf"));
        assert!(mail.body.contains("$165.00"));
    }

    #[test]
    fn test_payment_reminder_uses_recorded_balance() {
        let b = booking(Some(8250), Some("https://pay.example.com/BK-1A2B3C4D"));
        let mail = payment_reminder(&b, &customer(), &business()).unwrap();

        assert_eq!(mail.subject, "Payment Reminder - BK-1A2B3C4D");
        assert!(mail.body.contains("$82.50"));
        assert!(mail.body.contains("https://pay.example.com/BK-1A2B3C4D"));
    }

    #[test]
    fn test_payment_reminder_requires_balance_details() {
        let missing_url = booking(Some(8250), None);
        assert!(matches!(
            payment_reminder(&missing_url, &customer(), &business()),
            Err(AppError::BadRequest(_))
        ));

        let missing_balance = booking(None, Some("https://pay.example.com"));
        assert!(payment_reminder(&missing_balance, &customer(), &business()).is_err());
    }

    #[test]
    fn test_contact_message_replies_to_sender() {
        let request = ContactRequest {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            subject: "Long-term rental".to_string(),
            message: "Do you offer monthly rates?".to_string(),
        };
        let mail = contact_message(&request, "desk@example.com");

        assert_eq!(mail.to, "desk@example.com");
        assert_eq!(mail.reply_to.as_deref(), Some("sam@example.com"));
        assert_eq!(mail.subject, "Contact: Long-term rental");
        assert!(mail.body.contains("555-0100"));
    }
}
