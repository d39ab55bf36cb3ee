pub mod booking_service;
pub mod contact_service;
pub mod dashboard_service;
pub mod fleet_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::config::Settings;
use crate::notifications::Mailer;
use crate::repository::*;
use booking_service::BookingService;
use contact_service::ContactService;
use dashboard_service::DashboardService;
use fleet_service::FleetService;

pub use dashboard_service::RecentBooking;

pub struct ServiceContext {
    pub car_repo: Arc<dyn CarRepository>,
    pub category_repo: Arc<dyn CategoryRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
    pub customer_repo: Arc<dyn CustomerRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub payment_repo: Arc<dyn PaymentRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub booking_service: Arc<BookingService>,
    pub contact_service: Arc<ContactService>,
    pub dashboard_service: Arc<DashboardService>,
    pub fleet_service: Arc<FleetService>,
}

impl ServiceContext {
    pub fn new(db_pool: SqlitePool, mailer: Arc<dyn Mailer>, settings: &Settings) -> Self {
        // Create repositories
        let car_repo: Arc<dyn CarRepository> = Arc::new(SqliteCarRepository::new(db_pool.clone()));
        let category_repo: Arc<dyn CategoryRepository> = Arc::new(SqliteCategoryRepository::new(db_pool.clone()));
        let location_repo: Arc<dyn LocationRepository> = Arc::new(SqliteLocationRepository::new(db_pool.clone()));
        let customer_repo: Arc<dyn CustomerRepository> = Arc::new(SqliteCustomerRepository::new(db_pool.clone()));
        let booking_repo: Arc<dyn BookingRepository> = Arc::new(SqliteBookingRepository::new(db_pool.clone()));
        let payment_repo: Arc<dyn PaymentRepository> = Arc::new(SqlitePaymentRepository::new(db_pool));

        // Create services
        let booking_service = Arc::new(BookingService::new(
            booking_repo.clone(),
            car_repo.clone(),
            customer_repo.clone(),
            location_repo.clone(),
            mailer.clone(),
            settings.business.clone(),
        ));
        let contact_service = Arc::new(ContactService::new(
            mailer.clone(),
            settings.mail.admin_address.clone(),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            booking_repo.clone(),
            car_repo.clone(),
            customer_repo.clone(),
        ));
        let fleet_service = Arc::new(FleetService::new(car_repo.clone(), category_repo.clone()));

        Self {
            car_repo,
            category_repo,
            location_repo,
            customer_repo,
            booking_repo,
            payment_repo,
            mailer,
            booking_service,
            contact_service,
            dashboard_service,
            fleet_service,
        }
    }
}
