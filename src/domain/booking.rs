use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ColorTag, Colored};

closed_enum! {
    pub enum BookingStatus as "booking status" {
        Pending => ("pending", "Pending"),
        Confirmed => ("confirmed", "Confirmed"),
        Active => ("active", "Active"),
        Completed => ("completed", "Completed"),
        Cancelled => ("cancelled", "Cancelled"),
    }
}

impl Colored for BookingStatus {
    fn color(&self) -> ColorTag {
        match self {
            BookingStatus::Pending => ColorTag::Warning,
            BookingStatus::Confirmed => ColorTag::Info,
            BookingStatus::Active => ColorTag::Success,
            BookingStatus::Completed => ColorTag::Gray,
            BookingStatus::Cancelled => ColorTag::Danger,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub reference: String,
    pub customer_id: Uuid,
    pub car_id: Uuid,
    pub pickup_location_id: Uuid,
    pub dropoff_location_id: Option<Uuid>,
    pub pickup_date: DateTime<Utc>,
    pub dropoff_date: DateTime<Utc>,
    pub actual_dropoff_date: Option<DateTime<Utc>>,
    pub daily_rate_cents: i64,
    pub total_amount_cents: i64,
    pub status: BookingStatus,
    pub balance_due_cents: Option<i64>,
    pub balance_payment_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Outstanding amount as recorded by whoever manages the booking's
    /// payments. Never recomputed here.
    pub fn balance_due(&self) -> Option<i64> {
        self.balance_due_cents
    }

    pub fn balance_payment_url(&self) -> Option<&str> {
        self.balance_payment_url.as_deref()
    }

    pub fn rental_days(&self) -> i64 {
        rental_days(self.pickup_date, self.dropoff_date)
    }

    /// Checks the invariants every stored booking must hold: dropoff not
    /// before pickup, and no negative amounts.
    pub fn check_consistency(&self) -> Result<(), String> {
        if self.dropoff_date < self.pickup_date {
            return Err("Dropoff date must not be before pickup date".to_string());
        }
        if let Some(returned) = self.actual_dropoff_date {
            if returned < self.pickup_date {
                return Err("Actual dropoff date must not be before pickup date".to_string());
            }
        }
        if self.daily_rate_cents < 0 || self.total_amount_cents < 0 {
            return Err("Amounts cannot be negative".to_string());
        }
        if matches!(self.balance_due_cents, Some(balance) if balance < 0) {
            return Err("Balance due cannot be negative".to_string());
        }
        Ok(())
    }
}

/// Whole rental days between pickup and dropoff, rounding partial days up.
/// A same-day rental still counts as one day.
pub fn rental_days(pickup: DateTime<Utc>, dropoff: DateTime<Utc>) -> i64 {
    let minutes = (dropoff - pickup).num_minutes();
    let days = (minutes + 24 * 60 - 1).div_euclid(24 * 60);
    days.max(1)
}

pub fn generate_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("BK-{}", id[..8].to_uppercase())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub customer_id: Uuid,
    pub car_id: Uuid,
    pub pickup_location_id: Uuid,
    pub dropoff_location_id: Option<Uuid>,
    pub pickup_date: DateTime<Utc>,
    pub dropoff_date: DateTime<Utc>,
    /// Defaults to `Pending`.
    pub status: Option<BookingStatus>,
    /// Defaults to the car's daily rate at booking time.
    pub daily_rate_cents: Option<i64>,
    /// Defaults to `daily_rate_cents * rental days`.
    pub total_amount_cents: Option<i64>,
    pub notes: Option<String>,
}

/// Partial booking update. For the nullable fields the outer `None` (key
/// absent) keeps the stored value and `Some(None)` (explicit `null`) clears it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateBookingRequest {
    pub pickup_location_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub dropoff_location_id: Option<Option<Uuid>>,
    pub pickup_date: Option<DateTime<Utc>>,
    pub dropoff_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub actual_dropoff_date: Option<Option<DateTime<Utc>>>,
    pub daily_rate_cents: Option<i64>,
    pub total_amount_cents: Option<i64>,
    pub status: Option<BookingStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub balance_due_cents: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub balance_payment_url: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

impl UpdateBookingRequest {
    pub fn apply_to(self, booking: &mut Booking) {
        if let Some(id) = self.pickup_location_id {
            booking.pickup_location_id = id;
        }
        if let Some(id) = self.dropoff_location_id {
            booking.dropoff_location_id = id;
        }
        if let Some(date) = self.pickup_date {
            booking.pickup_date = date;
        }
        if let Some(date) = self.dropoff_date {
            booking.dropoff_date = date;
        }
        if let Some(date) = self.actual_dropoff_date {
            booking.actual_dropoff_date = date;
        }
        if let Some(rate) = self.daily_rate_cents {
            booking.daily_rate_cents = rate;
        }
        if let Some(total) = self.total_amount_cents {
            booking.total_amount_cents = total;
        }
        if let Some(status) = self.status {
            booking.status = status;
        }
        if let Some(balance) = self.balance_due_cents {
            booking.balance_due_cents = balance;
        }
        if let Some(url) = self.balance_payment_url {
            booking.balance_payment_url = url;
        }
        if let Some(notes) = self.notes {
            booking.notes = notes;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub customer_id: Option<Uuid>,
    pub car_id: Option<Uuid>,
}
