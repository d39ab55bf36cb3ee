mod common;

use carhire::domain::{
    generate_reference, Booking, BookingStatus, CarStatus, UpdateBookingRequest, UpdateCarRequest,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use common::{car_request, customer_request, fixtures, test_context, Fixtures};

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0).unwrap()
}

fn booking(
    fx: &Fixtures,
    status: BookingStatus,
    total: i64,
    returned: Option<DateTime<Utc>>,
    created: DateTime<Utc>,
) -> Booking {
    Booking {
        id: Uuid::new_v4(),
        reference: generate_reference(),
        customer_id: fx.customer.id,
        car_id: fx.car.id,
        pickup_location_id: fx.location.id,
        dropoff_location_id: None,
        pickup_date: created,
        dropoff_date: created + Duration::days(2),
        actual_dropoff_date: returned,
        daily_rate_cents: total / 2,
        total_amount_cents: total,
        status,
        balance_due_cents: None,
        balance_payment_url: None,
        notes: None,
        created_at: created,
        updated_at: created,
    }
}

#[tokio::test]
async fn test_stats_on_empty_database() -> anyhow::Result<()> {
    let (ctx, _) = test_context().await?;

    let stats = ctx.dashboard_service.stats().await?;
    assert_eq!(stats.total_bookings, 0);
    assert_eq!(stats.active_rentals, 0);
    assert_eq!(stats.available_cars, 0);
    assert_eq!(stats.total_revenue_cents, 0);
    assert_eq!(stats.total_customers, 0);
    assert_eq!(stats.pending_bookings, 0);

    Ok(())
}

#[tokio::test]
async fn test_stats_counts() -> anyhow::Result<()> {
    let (ctx, _) = test_context().await?;
    let fx = fixtures(&ctx).await?;

    let rented = ctx.car_repo.create(car_request("Ford Focus", "EF-789", 4200)).await?;
    ctx.car_repo.update(rented.id, UpdateCarRequest {
        status: Some(CarStatus::Rented),
        ..Default::default()
    }).await?;
    let mut retired = car_request("Old Golf", "GH-000", 2000);
    retired.is_active = Some(false);
    ctx.car_repo.create(retired).await?;

    ctx.customer_repo.create(customer_request("second@example.com")).await?;

    let day = at(2024, 3, 1);
    for b in [
        booking(&fx, BookingStatus::Pending, 1000, None, day),
        booking(&fx, BookingStatus::Pending, 1000, None, day),
        booking(&fx, BookingStatus::Active, 2000, None, day),
        booking(&fx, BookingStatus::Completed, 5000, Some(at(2024, 3, 3)), day),
        booking(&fx, BookingStatus::Completed, 2500, Some(at(2024, 1, 9)), day),
        booking(&fx, BookingStatus::Cancelled, 9000, None, day),
    ] {
        ctx.booking_repo.create(b).await?;
    }

    let stats = ctx.dashboard_service.stats().await?;
    assert_eq!(stats.total_bookings, 6);
    assert_eq!(stats.pending_bookings, 2);
    assert_eq!(stats.active_rentals, 1);
    // Only completed bookings count towards revenue
    assert_eq!(stats.total_revenue_cents, 7500);
    assert_eq!(stats.total_customers, 2);
    // The inactive car is excluded even though its status is available
    assert_eq!(stats.available_cars, 1);

    Ok(())
}

#[tokio::test]
async fn test_revenue_series_buckets_by_return_month() -> anyhow::Result<()> {
    let (ctx, _) = test_context().await?;
    let fx = fixtures(&ctx).await?;

    let created = at(2023, 11, 20);
    for b in [
        booking(&fx, BookingStatus::Completed, 10_000, Some(at(2024, 1, 2)), created),
        booking(&fx, BookingStatus::Completed, 5_000, Some(at(2024, 1, 30)), created),
        booking(&fx, BookingStatus::Completed, 7_500, Some(at(2023, 12, 31)), created),
        // Outside the window
        booking(&fx, BookingStatus::Completed, 99_900, Some(at(2023, 10, 15)), created),
        // Not completed, or not returned yet
        booking(&fx, BookingStatus::Active, 4_000, Some(at(2024, 2, 1)), created),
        booking(&fx, BookingStatus::Completed, 3_000, None, created),
    ] {
        ctx.booking_repo.create(b).await?;
    }

    let series = ctx.dashboard_service
        .revenue_series(4, at(2024, 2, 14))
        .await?;

    let labels: Vec<_> = series.iter().map(|m| m.label.as_str()).collect();
    assert_eq!(labels, vec!["Nov 2023", "Dec 2023", "Jan 2024", "Feb 2024"]);

    let totals: Vec<_> = series.iter().map(|m| m.revenue_cents).collect();
    assert_eq!(totals, vec![0, 7_500, 15_000, 0]);

    Ok(())
}

#[tokio::test]
async fn test_cleared_return_date_leaves_revenue_series() -> anyhow::Result<()> {
    let (ctx, _) = test_context().await?;
    let fx = fixtures(&ctx).await?;

    let returned = booking(&fx, BookingStatus::Completed, 8_000, Some(at(2024, 3, 5)), at(2024, 3, 1));
    let returned = ctx.booking_repo.create(returned).await?;

    let series = ctx.dashboard_service.revenue_series(1, at(2024, 3, 20)).await?;
    assert_eq!(series[0].revenue_cents, 8_000);

    let cleared = ctx.booking_repo.update(returned.id, UpdateBookingRequest {
        actual_dropoff_date: Some(None),
        ..Default::default()
    }).await?;
    assert_eq!(cleared.actual_dropoff_date, None);

    let stored = ctx.booking_repo.find_by_id(returned.id).await?;
    assert_eq!(stored.and_then(|b| b.actual_dropoff_date), None);

    let series = ctx.dashboard_service.revenue_series(1, at(2024, 3, 20)).await?;
    assert_eq!(series[0].revenue_cents, 0);
    // Still completed, so it stays in the all-time total
    assert_eq!(ctx.dashboard_service.stats().await?.total_revenue_cents, 8_000);

    Ok(())
}

#[tokio::test]
async fn test_recent_bookings_rows() -> anyhow::Result<()> {
    let (ctx, _) = test_context().await?;
    let fx = fixtures(&ctx).await?;

    let older = booking(&fx, BookingStatus::Completed, 8000, Some(at(2024, 1, 5)), at(2024, 1, 1));
    let newer = booking(&fx, BookingStatus::Confirmed, 6000, None, at(2024, 2, 1));
    ctx.booking_repo.create(older).await?;
    let newer = ctx.booking_repo.create(newer).await?;

    let rows = ctx.dashboard_service.recent_bookings(1).await?;
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.reference, newer.reference);
    assert_eq!(row.customer_name, "Jane Doe");
    assert_eq!(row.car_name, "Toyota Yaris");
    assert_eq!(row.status.value, "confirmed");
    assert_eq!(row.status.label, "Confirmed");

    Ok(())
}
