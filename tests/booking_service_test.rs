mod common;

use std::sync::Arc;

use async_trait::async_trait;
use carhire::{
    domain::{BookingStatus, ContactRequest, CreateBookingRequest, UpdateBookingRequest, UpdateCarRequest},
    error::{AppError, Result},
    notifications::{Mailer, OutgoingMail},
    service::ServiceContext,
};
use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use common::{fixtures, test_context, test_pool, test_settings, Fixtures};

fn booking_request(fx: &Fixtures) -> CreateBookingRequest {
    let pickup = Utc.with_ymd_and_hms(2030, 6, 1, 9, 0, 0).unwrap();
    CreateBookingRequest {
        customer_id: fx.customer.id,
        car_id: fx.car.id,
        pickup_location_id: fx.location.id,
        dropoff_location_id: None,
        pickup_date: pickup,
        dropoff_date: pickup + Duration::days(3) + Duration::hours(2),
        status: None,
        daily_rate_cents: None,
        total_amount_cents: None,
        notes: None,
    }
}

struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    fn name(&self) -> &str {
        "failing"
    }

    async fn send(&self, _mail: OutgoingMail) -> Result<()> {
        Err(AppError::Mail("relay unavailable".to_string()))
    }
}

#[tokio::test]
async fn test_create_booking_defaults_and_confirmation() -> anyhow::Result<()> {
    let (ctx, mailer) = test_context().await?;
    let fx = fixtures(&ctx).await?;

    let booking = ctx.booking_service.create_booking(booking_request(&fx)).await?;

    assert!(booking.reference.starts_with("BK-"));
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.daily_rate_cents, 4000);
    // 3 days and 2 hours rounds up to 4 days
    assert_eq!(booking.total_amount_cents, 16000);
    assert_eq!(booking.balance_due(), None);

    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "jane@example.com");
    assert_eq!(sent[0].subject, format!("Booking Confirmation - {}", booking.reference));
    assert!(sent[0].body.contains("Toyota Yaris"));
    assert!(sent[0].body.contains("$160.00"));

    Ok(())
}

#[tokio::test]
async fn test_create_booking_keeps_explicit_amounts() -> anyhow::Result<()> {
    let (ctx, _) = test_context().await?;
    let fx = fixtures(&ctx).await?;

    let mut request = booking_request(&fx);
    request.daily_rate_cents = Some(3000);
    request.total_amount_cents = Some(9999);
    request.status = Some(BookingStatus::Confirmed);

    let booking = ctx.booking_service.create_booking(request).await?;
    assert_eq!(booking.daily_rate_cents, 3000);
    assert_eq!(booking.total_amount_cents, 9999);
    assert_eq!(booking.status, BookingStatus::Confirmed);

    Ok(())
}

#[tokio::test]
async fn test_create_booking_validation() -> anyhow::Result<()> {
    let (ctx, mailer) = test_context().await?;
    let fx = fixtures(&ctx).await?;

    let mut reversed = booking_request(&fx);
    reversed.dropoff_date = reversed.pickup_date - Duration::days(1);
    let result = ctx.booking_service.create_booking(reversed).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let mut unknown_car = booking_request(&fx);
    unknown_car.car_id = Uuid::new_v4();
    let result = ctx.booking_service.create_booking(unknown_car).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let mut unknown_location = booking_request(&fx);
    unknown_location.dropoff_location_id = Some(Uuid::new_v4());
    let result = ctx.booking_service.create_booking(unknown_location).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    ctx.car_repo.update(fx.car.id, UpdateCarRequest {
        is_active: Some(false),
        ..Default::default()
    }).await?;
    let result = ctx.booking_service.create_booking(booking_request(&fx)).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    assert!(mailer.sent().await.is_empty());
    assert!(ctx.booking_repo.list_all().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_oversized_rate_is_rejected() -> anyhow::Result<()> {
    let (ctx, mailer) = test_context().await?;
    let fx = fixtures(&ctx).await?;

    let mut request = booking_request(&fx);
    request.daily_rate_cents = Some(i64::MAX / 2);
    let result = ctx.booking_service.create_booking(request).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    assert!(mailer.sent().await.is_empty());
    assert!(ctx.booking_repo.list_all().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_update_rechecks_dates_and_amounts() -> anyhow::Result<()> {
    let (ctx, _) = test_context().await?;
    let fx = fixtures(&ctx).await?;
    let booking = ctx.booking_service.create_booking(booking_request(&fx)).await?;

    let result = ctx.booking_service.update_booking(booking.id, UpdateBookingRequest {
        dropoff_date: Some(booking.pickup_date - Duration::days(5)),
        ..Default::default()
    }).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    // Moving pickup past the stored dropoff is caught against the merged row
    let result = ctx.booking_service.update_booking(booking.id, UpdateBookingRequest {
        pickup_date: Some(booking.dropoff_date + Duration::days(1)),
        ..Default::default()
    }).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = ctx.booking_service.update_booking(booking.id, UpdateBookingRequest {
        total_amount_cents: Some(-100),
        ..Default::default()
    }).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = ctx.booking_service.update_booking(booking.id, UpdateBookingRequest {
        daily_rate_cents: Some(-1),
        ..Default::default()
    }).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = ctx.booking_service.update_booking(booking.id, UpdateBookingRequest {
        balance_due_cents: Some(Some(-500)),
        ..Default::default()
    }).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    let result = ctx.booking_service.update_booking(booking.id, UpdateBookingRequest {
        dropoff_location_id: Some(Some(Uuid::new_v4())),
        ..Default::default()
    }).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let stored = ctx.booking_repo.find_by_id(booking.id).await?.unwrap();
    assert_eq!(stored.dropoff_date, booking.dropoff_date);
    assert_eq!(stored.pickup_date, booking.pickup_date);
    assert_eq!(stored.total_amount_cents, booking.total_amount_cents);
    assert_eq!(stored.daily_rate_cents, booking.daily_rate_cents);
    assert_eq!(stored.balance_due(), None);

    let extended = ctx.booking_service.update_booking(booking.id, UpdateBookingRequest {
        dropoff_date: Some(booking.dropoff_date + Duration::days(2)),
        total_amount_cents: Some(24_000),
        ..Default::default()
    }).await?;
    assert_eq!(extended.dropoff_date, booking.dropoff_date + Duration::days(2));
    assert_eq!(extended.total_amount_cents, 24_000);

    let missing = ctx.booking_service
        .update_booking(Uuid::new_v4(), UpdateBookingRequest::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_cleared_balance_blocks_reminder() -> anyhow::Result<()> {
    let (ctx, mailer) = test_context().await?;
    let fx = fixtures(&ctx).await?;
    let booking = ctx.booking_service.create_booking(booking_request(&fx)).await?;

    ctx.booking_service.update_booking(booking.id, UpdateBookingRequest {
        balance_due_cents: Some(Some(6000)),
        balance_payment_url: Some(Some("https://pay.example.com/bk".to_string())),
        ..Default::default()
    }).await?;
    ctx.booking_service.send_payment_reminder(booking.id).await?;

    let cleared = ctx.booking_service.update_booking(booking.id, UpdateBookingRequest {
        balance_due_cents: Some(None),
        balance_payment_url: Some(None),
        ..Default::default()
    }).await?;
    assert_eq!(cleared.balance_due(), None);
    assert_eq!(cleared.balance_payment_url(), None);

    let result = ctx.booking_service.send_payment_reminder(booking.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    // Confirmation plus the one reminder
    assert_eq!(mailer.sent().await.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_failed_confirmation_keeps_booking() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let ctx = ServiceContext::new(pool, Arc::new(FailingMailer), &test_settings());
    let fx = fixtures(&ctx).await?;

    let booking = ctx.booking_service.create_booking(booking_request(&fx)).await?;

    let stored = ctx.booking_repo.find_by_id(booking.id).await?;
    assert_eq!(stored.map(|b| b.reference), Some(booking.reference));

    Ok(())
}

#[tokio::test]
async fn test_payment_reminder_requires_balance_details() -> anyhow::Result<()> {
    let (ctx, mailer) = test_context().await?;
    let fx = fixtures(&ctx).await?;
    let booking = ctx.booking_service.create_booking(booking_request(&fx)).await?;

    let result = ctx.booking_service.send_payment_reminder(booking.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    // Balance without a link is still not enough
    ctx.booking_repo.update(booking.id, UpdateBookingRequest {
        balance_due_cents: Some(Some(8000)),
        ..Default::default()
    }).await?;
    let result = ctx.booking_service.send_payment_reminder(booking.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    ctx.booking_repo.update(booking.id, UpdateBookingRequest {
        balance_payment_url: Some(Some("https://pay.example.com/bk".to_string())),
        ..Default::default()
    }).await?;
    ctx.booking_service.send_payment_reminder(booking.id).await?;

    let sent = mailer.sent().await;
    // Confirmation plus the reminder
    assert_eq!(sent.len(), 2);
    let reminder = &sent[1];
    assert_eq!(reminder.subject, format!("Payment Reminder - {}", booking.reference));
    assert!(reminder.body.contains("$80.00"));
    assert!(reminder.body.contains("https://pay.example.com/bk"));

    let missing = ctx.booking_service.send_payment_reminder(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    Ok(())
}

#[tokio::test]
async fn test_reminder_delivery_failure_is_reported() -> anyhow::Result<()> {
    let pool = test_pool().await?;
    let ctx = ServiceContext::new(pool, Arc::new(FailingMailer), &test_settings());
    let fx = fixtures(&ctx).await?;
    let booking = ctx.booking_service.create_booking(booking_request(&fx)).await?;

    ctx.booking_repo.update(booking.id, UpdateBookingRequest {
        balance_due_cents: Some(Some(500)),
        balance_payment_url: Some(Some("https://pay.example.com/x".to_string())),
        ..Default::default()
    }).await?;

    let result = ctx.booking_service.send_payment_reminder(booking.id).await;
    assert!(matches!(result, Err(AppError::Mail(_))));

    Ok(())
}

#[tokio::test]
async fn test_contact_message_goes_to_admin() -> anyhow::Result<()> {
    let (ctx, mailer) = test_context().await?;

    ctx.contact_service.submit(ContactRequest {
        name: "Sam Lee".to_string(),
        email: "sam@example.com".to_string(),
        phone: None,
        subject: "Child seats".to_string(),
        message: "Do you offer child seats?".to_string(),
    }).await?;

    let sent = mailer.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "office@carhire.test");
    assert_eq!(sent[0].reply_to.as_deref(), Some("sam@example.com"));
    assert_eq!(sent[0].subject, "Contact: Child seats");

    let invalid = ctx.contact_service.submit(ContactRequest {
        name: "Sam Lee".to_string(),
        email: "not-an-email".to_string(),
        phone: None,
        subject: "Hi".to_string(),
        message: "Hello".to_string(),
    }).await;
    assert!(matches!(invalid, Err(AppError::Validation(_))));
    assert_eq!(mailer.sent().await.len(), 1);

    Ok(())
}
