#![allow(dead_code)]

use std::sync::Arc;

use carhire::{
    config::Settings,
    domain::{
        Car, CarStatus, Category, CreateCarRequest, CreateCategoryRequest,
        CreateCustomerRequest, CreateLocationRequest, Customer, FuelType, Location,
        Transmission,
    },
    notifications::{Mailer, RecordingMailer},
    service::ServiceContext,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

/// Fresh in-memory database with the schema applied. A single connection
/// keeps every query on the same database.
pub async fn test_pool() -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await?;

    Ok(pool)
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.mail.admin_address = Some("office@carhire.test".to_string());
    settings
}

pub async fn test_context() -> anyhow::Result<(Arc<ServiceContext>, Arc<RecordingMailer>)> {
    let pool = test_pool().await?;
    let recorder = Arc::new(RecordingMailer::new());
    let mailer: Arc<dyn Mailer> = recorder.clone();
    let context = Arc::new(ServiceContext::new(pool, mailer, &test_settings()));
    Ok((context, recorder))
}

pub struct Fixtures {
    pub category: Category,
    pub location: Location,
    pub car: Car,
    pub customer: Customer,
}

pub fn car_request(name: &str, plate: &str, daily_rate_cents: i64) -> CreateCarRequest {
    CreateCarRequest {
        category_id: None,
        name: name.to_string(),
        slug: None,
        make: "Toyota".to_string(),
        model: "Yaris".to_string(),
        year: 2023,
        license_plate: plate.to_string(),
        seats: 5,
        fuel_type: FuelType::Hybrid,
        transmission: Transmission::Automatic,
        daily_rate_cents,
        status: None,
        is_active: None,
        is_featured: None,
        description: None,
        image_url: None,
    }
}

pub fn customer_request(email: &str) -> CreateCustomerRequest {
    CreateCustomerRequest {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: email.to_string(),
        phone: None,
        driving_license_number: Some("DL1234".to_string()),
        date_of_birth: None,
        address: None,
    }
}

pub async fn fixtures(context: &ServiceContext) -> anyhow::Result<Fixtures> {
    let category = context.category_repo.create(CreateCategoryRequest {
        name: "Economy".to_string(),
        slug: None,
        description: None,
        sort_order: Some(1),
    }).await?;

    let location = context.location_repo.create(CreateLocationRequest {
        name: "Airport Desk".to_string(),
        address: "1 Terminal Road".to_string(),
        city: "Springfield".to_string(),
        phone: None,
    }).await?;

    let mut request = car_request("Toyota Yaris", "AB-123", 4000);
    request.category_id = Some(category.id);
    request.status = Some(CarStatus::Available);
    let car = context.car_repo.create(request).await?;

    let customer = context.customer_repo.create(customer_request("jane@example.com")).await?;

    Ok(Fixtures { category, location, car, customer })
}
