use carhire::{
    domain::{
        default_categories, generate_reference, Booking, BookingStatus, Car, CarStatus,
        CreateCarRequest, CreateCategoryRequest, CreateCustomerRequest, CreateLocationRequest,
        CreatePaymentRequest, Customer, FuelType, Location, PaymentMethod, PaymentStatus,
        PaymentType, Transmission, UpdateBookingRequest, UpdateCarRequest,
    },
    repository::{
        BookingRepository, CarRepository, CategoryRepository, CustomerRepository,
        LocationRepository, PaymentRepository, SqliteBookingRepository, SqliteCarRepository,
        SqliteCategoryRepository, SqliteCustomerRepository, SqliteLocationRepository,
        SqlitePaymentRepository,
    },
};
use chrono::{Duration, Utc};
use clap::Parser;
use fake::{
    faker::{
        address::en::StreetName,
        name::en::{FirstName, LastName},
        phone_number::en::PhoneNumber,
    },
    Fake,
};
use rand::{seq::SliceRandom, Rng};
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "seed", about = "Populate a car hire database with demo data")]
struct Args {
    #[arg(long, default_value = "sqlite://carhire.db?mode=rwc")]
    database_url: String,

    /// Number of fake customers to create.
    #[arg(long, default_value_t = 25)]
    customers: usize,

    /// How many months of completed rentals to generate.
    #[arg(long, default_value_t = 12)]
    months: i64,
}

struct FleetEntry {
    name: &'static str,
    make: &'static str,
    model: &'static str,
    category: &'static str,
    fuel_type: FuelType,
    transmission: Transmission,
    seats: i32,
    daily_rate_cents: i64,
}

const FLEET: &[FleetEntry] = &[
    FleetEntry { name: "Toyota Yaris", make: "Toyota", model: "Yaris", category: "economy", fuel_type: FuelType::Hybrid, transmission: Transmission::Automatic, seats: 5, daily_rate_cents: 3500 },
    FleetEntry { name: "Kia Picanto", make: "Kia", model: "Picanto", category: "economy", fuel_type: FuelType::Petrol, transmission: Transmission::Manual, seats: 4, daily_rate_cents: 2900 },
    FleetEntry { name: "Volkswagen Golf", make: "Volkswagen", model: "Golf", category: "compact", fuel_type: FuelType::Petrol, transmission: Transmission::Manual, seats: 5, daily_rate_cents: 4500 },
    FleetEntry { name: "Ford Focus", make: "Ford", model: "Focus", category: "compact", fuel_type: FuelType::Diesel, transmission: Transmission::Automatic, seats: 5, daily_rate_cents: 4200 },
    FleetEntry { name: "Toyota RAV4", make: "Toyota", model: "RAV4", category: "suv", fuel_type: FuelType::Hybrid, transmission: Transmission::Automatic, seats: 5, daily_rate_cents: 6900 },
    FleetEntry { name: "Nissan X-Trail", make: "Nissan", model: "X-Trail", category: "suv", fuel_type: FuelType::Diesel, transmission: Transmission::Automatic, seats: 7, daily_rate_cents: 7400 },
    FleetEntry { name: "BMW 5 Series", make: "BMW", model: "5 Series", category: "luxury", fuel_type: FuelType::Diesel, transmission: Transmission::Automatic, seats: 5, daily_rate_cents: 12900 },
    FleetEntry { name: "Mercedes E-Class", make: "Mercedes-Benz", model: "E-Class", category: "luxury", fuel_type: FuelType::Petrol, transmission: Transmission::Automatic, seats: 5, daily_rate_cents: 13900 },
    FleetEntry { name: "Tesla Model 3", make: "Tesla", model: "Model 3", category: "electric", fuel_type: FuelType::Electric, transmission: Transmission::Automatic, seats: 5, daily_rate_cents: 9900 },
    FleetEntry { name: "Renault Zoe", make: "Renault", model: "Zoe", category: "electric", fuel_type: FuelType::Electric, transmission: Transmission::Automatic, seats: 5, daily_rate_cents: 4900 },
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng = rand::thread_rng();

    println!("Seeding {}", args.database_url);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&args.database_url)
        .await?;

    println!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    let category_repo = SqliteCategoryRepository::new(db_pool.clone());
    let location_repo = SqliteLocationRepository::new(db_pool.clone());
    let car_repo = SqliteCarRepository::new(db_pool.clone());
    let customer_repo = SqliteCustomerRepository::new(db_pool.clone());
    let booking_repo = SqliteBookingRepository::new(db_pool.clone());
    let payment_repo = SqlitePaymentRepository::new(db_pool.clone());

    // Categories
    let mut categories = Vec::new();
    for (i, (name, slug)) in default_categories().into_iter().enumerate() {
        let category = category_repo.create(CreateCategoryRequest {
            name: name.to_string(),
            slug: Some(slug.to_string()),
            description: None,
            sort_order: Some(i as i32),
        }).await?;
        categories.push(category);
    }
    println!("  Created {} categories", categories.len());

    // Locations
    let mut locations: Vec<Location> = Vec::new();
    for (name, city) in [("Airport Desk", "Springfield"), ("Central Station", "Springfield"), ("Harbour Office", "Shelbyville")] {
        let street: String = StreetName().fake_with_rng(&mut rng);
        let location = location_repo.create(CreateLocationRequest {
            name: name.to_string(),
            address: format!("{} {}", rng.gen_range(1..200), street),
            city: city.to_string(),
            phone: Some(PhoneNumber().fake_with_rng(&mut rng)),
        }).await?;
        locations.push(location);
    }
    println!("  Created {} locations", locations.len());

    // Cars
    let mut cars: Vec<Car> = Vec::new();
    for (i, entry) in FLEET.iter().enumerate() {
        let category_id = categories.iter()
            .find(|c| c.slug == entry.category)
            .map(|c| c.id);

        let car = car_repo.create(CreateCarRequest {
            category_id,
            name: entry.name.to_string(),
            slug: None,
            make: entry.make.to_string(),
            model: entry.model.to_string(),
            year: rng.gen_range(2020..=2024),
            license_plate: format!("CH{:02}-{:03}", i + 10, rng.gen_range(100..1000)),
            seats: entry.seats,
            fuel_type: entry.fuel_type,
            transmission: entry.transmission,
            daily_rate_cents: entry.daily_rate_cents,
            status: Some(CarStatus::Available),
            is_active: Some(true),
            is_featured: Some(i % 3 == 0),
            description: Some(format!("{} {} with {} seats", entry.make, entry.model, entry.seats)),
            image_url: None,
        }).await?;
        cars.push(car);
    }
    println!("  Created {} cars", cars.len());

    // Customers
    let mut customers: Vec<Customer> = Vec::new();
    for i in 0..args.customers {
        let first_name: String = FirstName().fake_with_rng(&mut rng);
        let last_name: String = LastName().fake_with_rng(&mut rng);
        let email = format!(
            "{}.{}{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase().replace(' ', ""),
            i
        );

        let customer = customer_repo.create(CreateCustomerRequest {
            first_name,
            last_name,
            email,
            phone: Some(PhoneNumber().fake_with_rng(&mut rng)),
            driving_license_number: Some(format!("DL{:08}", rng.gen_range(0..100_000_000))),
            date_of_birth: None,
            address: None,
        }).await?;
        customers.push(customer);
    }
    println!("  Created {} customers", customers.len());

    if customers.is_empty() {
        println!("No customers, skipping bookings");
        return Ok(());
    }

    // Completed rentals spread over past months, each with a payment
    let now = Utc::now();
    let mut completed = 0;
    for months_back in 0..args.months {
        for _ in 0..rng.gen_range(2..6) {
            let (Some(car), Some(customer), Some(location)) = (
                cars.choose(&mut rng),
                customers.choose(&mut rng),
                locations.choose(&mut rng),
            ) else {
                continue;
            };

            let days = rng.gen_range(1..8);
            let pickup = now - Duration::days(months_back * 30 + rng.gen_range(days..28));
            let dropoff = pickup + Duration::days(days);
            let total = car.daily_rate_cents * days;

            let booking = booking_repo.create(Booking {
                id: Uuid::new_v4(),
                reference: generate_reference(),
                customer_id: customer.id,
                car_id: car.id,
                pickup_location_id: location.id,
                dropoff_location_id: None,
                pickup_date: pickup,
                dropoff_date: dropoff,
                actual_dropoff_date: Some(dropoff),
                daily_rate_cents: car.daily_rate_cents,
                total_amount_cents: total,
                status: BookingStatus::Completed,
                balance_due_cents: None,
                balance_payment_url: None,
                notes: None,
                created_at: pickup - Duration::days(3),
                updated_at: dropoff,
            }).await?;

            let method = [PaymentMethod::CreditCard, PaymentMethod::DebitCard, PaymentMethod::Cash]
                .choose(&mut rng)
                .copied()
                .unwrap_or(PaymentMethod::CreditCard);

            payment_repo.create(CreatePaymentRequest {
                booking_id: booking.id,
                amount_cents: total,
                payment_method: method,
                payment_type: PaymentType::Rental,
                status: Some(PaymentStatus::Completed),
                transaction_id: None,
                paid_at: Some(dropoff),
                notes: None,
            }).await?;

            completed += 1;
        }
    }
    println!("  Created {} completed bookings with payments", completed);

    // Current and upcoming rentals
    let statuses = [
        BookingStatus::Active,
        BookingStatus::Active,
        BookingStatus::Confirmed,
        BookingStatus::Pending,
        BookingStatus::Pending,
        BookingStatus::Cancelled,
    ];
    for (i, status) in statuses.into_iter().enumerate() {
        let car = &cars[i % cars.len()];
        let Some(customer) = customers.choose(&mut rng) else {
            continue;
        };
        let location = &locations[i % locations.len()];

        let pickup = match status {
            BookingStatus::Active => now - Duration::days(2),
            _ => now + Duration::days(rng.gen_range(3..30)),
        };
        let dropoff = pickup + Duration::days(5);

        let booking = booking_repo.create(Booking {
            id: Uuid::new_v4(),
            reference: generate_reference(),
            customer_id: customer.id,
            car_id: car.id,
            pickup_location_id: location.id,
            dropoff_location_id: None,
            pickup_date: pickup,
            dropoff_date: dropoff,
            actual_dropoff_date: None,
            daily_rate_cents: car.daily_rate_cents,
            total_amount_cents: car.daily_rate_cents * 5,
            status,
            balance_due_cents: None,
            balance_payment_url: None,
            notes: None,
            created_at: now - Duration::days(1),
            updated_at: now - Duration::days(1),
        }).await?;

        if status == BookingStatus::Active {
            car_repo.update(car.id, UpdateCarRequest {
                status: Some(CarStatus::Rented),
                ..Default::default()
            }).await?;
        }

        // Confirmed bookings carry a deposit and an outstanding balance
        if status == BookingStatus::Confirmed {
            let deposit = booking.total_amount_cents / 5;
            payment_repo.create(CreatePaymentRequest {
                booking_id: booking.id,
                amount_cents: deposit,
                payment_method: PaymentMethod::CreditCard,
                payment_type: PaymentType::Deposit,
                status: Some(PaymentStatus::Completed),
                transaction_id: None,
                paid_at: Some(now),
                notes: None,
            }).await?;

            booking_repo.update(booking.id, UpdateBookingRequest {
                balance_due_cents: Some(Some(booking.total_amount_cents - deposit)),
                balance_payment_url: Some(Some(format!("https://pay.example.com/{}", booking.reference))),
                ..Default::default()
            }).await?;
        }
    }

    if let Some(car) = cars.last() {
        car_repo.update(car.id, UpdateCarRequest {
            status: Some(CarStatus::Maintenance),
            ..Default::default()
        }).await?;
    }
    println!("  Created {} current bookings", statuses.len());

    println!("Seeding complete");
    Ok(())
}
