pub mod admin;
pub mod bookings;
pub mod cars;
pub mod categories;
pub mod customers;
pub mod locations;
pub mod payments;
pub mod public;
pub mod root;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Deserialize)]
pub struct IncludeInactive {
    #[serde(default)]
    pub include_inactive: bool,
}
