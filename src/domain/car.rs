use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ColorTag, Colored};

closed_enum! {
    pub enum CarStatus as "car status" {
        Available => ("available", "Available"),
        Rented => ("rented", "Rented"),
        Maintenance => ("maintenance", "Maintenance"),
    }
}

impl Colored for CarStatus {
    fn color(&self) -> ColorTag {
        match self {
            CarStatus::Available => ColorTag::Success,
            CarStatus::Rented => ColorTag::Warning,
            CarStatus::Maintenance => ColorTag::Danger,
        }
    }
}

closed_enum! {
    pub enum FuelType as "fuel type" {
        Petrol => ("petrol", "Petrol"),
        Diesel => ("diesel", "Diesel"),
        Electric => ("electric", "Electric"),
        Hybrid => ("hybrid", "Hybrid"),
    }
}

closed_enum! {
    pub enum Transmission as "transmission" {
        Automatic => ("automatic", "Automatic"),
        Manual => ("manual", "Manual"),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    pub id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub seats: i32,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub daily_rate_cents: i64,
    pub status: CarStatus,
    pub is_active: bool,
    pub is_featured: bool,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    /// Whether the car can be offered for a new rental right now.
    pub fn is_bookable(&self) -> bool {
        self.is_active && self.status == CarStatus::Available
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCarRequest {
    pub category_id: Option<Uuid>,
    pub name: String,
    pub slug: Option<String>,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub seats: i32,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub daily_rate_cents: i64,
    pub status: Option<CarStatus>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateCarRequest {
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub category_id: Option<Option<Uuid>>,
    pub name: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub license_plate: Option<String>,
    pub seats: Option<i32>,
    pub fuel_type: Option<FuelType>,
    pub transmission: Option<Transmission>,
    pub daily_rate_cents: Option<i64>,
    pub status: Option<CarStatus>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "::serde_with::rust::double_option")]
    pub image_url: Option<Option<String>>,
}
