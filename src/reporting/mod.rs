//! Dashboard figures computed from in-memory record snapshots.
//!
//! Nothing here touches the database or the clock: callers load the records
//! and pass the reference instant explicitly.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use crate::domain::{Booking, BookingStatus, Car, Customer};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Point-in-time view of the records the dashboard is built from.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub bookings: &'a [Booking],
    pub cars: &'a [Car],
    pub customers: &'a [Customer],
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_bookings: usize,
    pub active_rentals: usize,
    pub available_cars: usize,
    pub total_revenue_cents: i64,
    pub total_customers: usize,
    pub pending_bookings: usize,
}

impl DashboardStats {
    pub fn compute(snapshot: &Snapshot<'_>) -> Self {
        Self {
            total_bookings: total_bookings(snapshot.bookings),
            active_rentals: active_rentals(snapshot.bookings),
            available_cars: available_cars(snapshot.cars),
            total_revenue_cents: total_revenue(snapshot.bookings),
            total_customers: total_customers(snapshot.customers),
            pending_bookings: pending_bookings(snapshot.bookings),
        }
    }
}

pub fn total_bookings(bookings: &[Booking]) -> usize {
    bookings.len()
}

pub fn count_with_status(bookings: &[Booking], status: BookingStatus) -> usize {
    bookings.iter().filter(|b| b.status == status).count()
}

pub fn active_rentals(bookings: &[Booking]) -> usize {
    count_with_status(bookings, BookingStatus::Active)
}

pub fn pending_bookings(bookings: &[Booking]) -> usize {
    count_with_status(bookings, BookingStatus::Pending)
}

/// Cars that are both marked available and switched on in the fleet.
pub fn available_cars(cars: &[Car]) -> usize {
    cars.iter().filter(|c| c.is_bookable()).count()
}

/// Sum of booking totals over completed bookings, in cents. Saturates at
/// the `i64` bounds.
pub fn total_revenue(bookings: &[Booking]) -> i64 {
    bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Completed)
        .map(|b| b.total_amount_cents)
        .fold(0, i64::saturating_add)
}

pub fn total_customers(customers: &[Customer]) -> usize {
    customers.len()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// Formatted as `Mon YYYY`, e.g. `Jan 2025`.
    pub label: String,
    pub year: i32,
    pub month: u32,
    pub revenue_cents: i64,
}

/// Completed-booking revenue for the `months` calendar months ending with the
/// month of `reference`, oldest first.
///
/// Bookings are bucketed by the month of their actual dropoff; bookings that
/// have not been returned yet are ignored. Months without revenue are still
/// present with a zero total, so the result always has `months` entries.
pub fn revenue_by_month(
    bookings: &[Booking],
    months: u32,
    reference: DateTime<Utc>,
) -> Vec<MonthlyRevenue> {
    let mut totals: HashMap<(i32, u32), i64> = HashMap::new();
    for booking in bookings {
        if booking.status != BookingStatus::Completed {
            continue;
        }
        if let Some(returned) = booking.actual_dropoff_date {
            let total = totals.entry((returned.year(), returned.month())).or_insert(0);
            *total = total.saturating_add(booking.total_amount_cents);
        }
    }

    let anchor = i64::from(reference.year()) * 12 + i64::from(reference.month0());

    (0..i64::from(months))
        .rev()
        .map(|offset| {
            let index = anchor - offset;
            let year = index.div_euclid(12) as i32;
            let month0 = index.rem_euclid(12) as usize;
            let month = month0 as u32 + 1;

            MonthlyRevenue {
                label: format!("{} {:04}", MONTH_ABBREVIATIONS[month0], year),
                year,
                month,
                revenue_cents: totals.get(&(year, month)).copied().unwrap_or(0),
            }
        })
        .collect()
}

/// Line-chart series: parallel label and value arrays, values in major
/// currency units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueChart {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl From<&[MonthlyRevenue]> for RevenueChart {
    fn from(series: &[MonthlyRevenue]) -> Self {
        Self {
            labels: series.iter().map(|m| m.label.clone()).collect(),
            data: series
                .iter()
                .map(|m| m.revenue_cents as f64 / 100.0)
                .collect(),
        }
    }
}

pub fn format_cents(cents: i64, currency_symbol: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}{}.{:02}", sign, currency_symbol, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CarStatus, FuelType, Transmission};
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn booking(status: BookingStatus, total: i64, returned: Option<DateTime<Utc>>) -> Booking {
        let pickup = at(2024, 1, 1);
        Booking {
            id: Uuid::new_v4(),
            reference: "BK-TEST0001".to_string(),
            customer_id: Uuid::new_v4(),
            car_id: Uuid::new_v4(),
            pickup_location_id: Uuid::new_v4(),
            dropoff_location_id: None,
            pickup_date: pickup,
            dropoff_date: pickup,
            actual_dropoff_date: returned,
            daily_rate_cents: total,
            total_amount_cents: total,
            status,
            balance_due_cents: None,
            balance_payment_url: None,
            notes: None,
            created_at: pickup,
            updated_at: pickup,
        }
    }

    fn car(status: CarStatus, is_active: bool) -> Car {
        let now = at(2024, 1, 1);
        Car {
            id: Uuid::new_v4(),
            category_id: None,
            name: "Test Car".to_string(),
            slug: "test-car".to_string(),
            make: "Make".to_string(),
            model: "Model".to_string(),
            year: 2022,
            license_plate: "TEST-1".to_string(),
            seats: 5,
            fuel_type: FuelType::Petrol,
            transmission: Transmission::Manual,
            daily_rate_cents: 4500,
            status,
            is_active,
            is_featured: false,
            description: None,
            image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn empty_snapshot() -> DashboardStats {
        DashboardStats::compute(&Snapshot {
            bookings: &[],
            cars: &[],
            customers: &[],
        })
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        assert_eq!(empty_snapshot(), DashboardStats::default());

        let series = revenue_by_month(&[], 6, at(2024, 6, 15));
        assert_eq!(series.len(), 6);
        assert!(series.iter().all(|m| m.revenue_cents == 0));
    }

    #[test]
    fn test_revenue_counts_only_completed() {
        let bookings = vec![
            booking(BookingStatus::Completed, 100, Some(at(2024, 3, 15))),
            booking(BookingStatus::Completed, 50, Some(at(2024, 3, 20))),
            booking(BookingStatus::Pending, 999, None),
        ];

        assert_eq!(total_revenue(&bookings), 150);

        let series = revenue_by_month(&bookings, 12, at(2024, 6, 1));
        let march = series.iter().find(|m| m.label == "Mar 2024").unwrap();
        assert_eq!(march.revenue_cents, 150);
        assert_eq!(series.iter().map(|m| m.revenue_cents).sum::<i64>(), 150);
    }

    #[test]
    fn test_revenue_by_month_window_shape() {
        let series = revenue_by_month(&[], 12, at(2025, 1, 31));
        assert_eq!(series.len(), 12);
        assert_eq!(series.first().unwrap().label, "Feb 2024");
        assert_eq!(series.last().unwrap().label, "Jan 2025");

        for pair in series.windows(2) {
            let earlier = pair[0].year * 12 + pair[0].month as i32;
            let later = pair[1].year * 12 + pair[1].month as i32;
            assert_eq!(later - earlier, 1);
        }

        for entry in &series {
            let (month, year) = entry.label.split_once(' ').unwrap();
            assert_eq!(month.len(), 3);
            assert_eq!(year.len(), 4);
            assert_eq!(year.parse::<i32>().unwrap(), entry.year);
        }
    }

    #[test]
    fn test_revenue_by_month_zero_window() {
        assert!(revenue_by_month(&[], 0, at(2024, 6, 1)).is_empty());
    }

    #[test]
    fn test_revenue_uses_dropoff_month_not_pickup() {
        // Picked up in January, returned in February.
        let returned = booking(BookingStatus::Completed, 300, Some(at(2024, 2, 2)));
        let series = revenue_by_month(&[returned], 3, at(2024, 3, 10));

        let values: Vec<_> = series.iter().map(|m| (m.label.as_str(), m.revenue_cents)).collect();
        assert_eq!(values, vec![("Jan 2024", 0), ("Feb 2024", 300), ("Mar 2024", 0)]);
    }

    #[test]
    fn test_revenue_ignores_same_month_other_year() {
        let old = booking(BookingStatus::Completed, 700, Some(at(2023, 5, 10)));
        let series = revenue_by_month(&[old], 1, at(2024, 5, 10));
        assert_eq!(series[0].label, "May 2024");
        assert_eq!(series[0].revenue_cents, 0);
    }

    #[test]
    fn test_revenue_ignores_returned_but_not_completed() {
        let cancelled = booking(BookingStatus::Cancelled, 400, Some(at(2024, 5, 10)));
        let series = revenue_by_month(&[cancelled], 1, at(2024, 5, 20));
        assert_eq!(series[0].revenue_cents, 0);
    }

    #[test]
    fn test_active_rentals() {
        let bookings: Vec<_> = [
            BookingStatus::Active,
            BookingStatus::Active,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ]
        .into_iter()
        .map(|s| booking(s, 10, None))
        .collect();

        assert_eq!(active_rentals(&bookings), 2);
        assert_eq!(pending_bookings(&bookings), 0);
    }

    #[test]
    fn test_available_cars_requires_active_flag() {
        let cars = vec![
            car(CarStatus::Available, true),
            car(CarStatus::Available, false),
            car(CarStatus::Rented, true),
            car(CarStatus::Maintenance, true),
        ];
        assert_eq!(available_cars(&cars), 1);
    }

    #[test]
    fn test_stats_are_order_independent() {
        let mut bookings = vec![
            booking(BookingStatus::Completed, 100, Some(at(2024, 3, 15))),
            booking(BookingStatus::Pending, 20, None),
            booking(BookingStatus::Active, 30, None),
            booking(BookingStatus::Completed, 40, Some(at(2024, 4, 1))),
        ];
        let cars = vec![car(CarStatus::Available, true), car(CarStatus::Rented, true)];

        let reference = at(2024, 4, 30);
        let forward = DashboardStats::compute(&Snapshot {
            bookings: &bookings,
            cars: &cars,
            customers: &[],
        });
        let forward_series = revenue_by_month(&bookings, 4, reference);

        bookings.reverse();
        let backward = DashboardStats::compute(&Snapshot {
            bookings: &bookings,
            cars: &cars,
            customers: &[],
        });

        assert_eq!(forward, backward);
        assert_eq!(forward_series, revenue_by_month(&bookings, 4, reference));
        assert_eq!(forward.total_revenue_cents, 140);
        assert_eq!(forward.pending_bookings, 1);
        assert_eq!(forward.active_rentals, 1);
        assert_eq!(forward.available_cars, 1);
    }

    #[test]
    fn test_revenue_saturates_instead_of_overflowing() {
        let returned = Some(at(2024, 3, 15));
        let bookings = vec![
            booking(BookingStatus::Completed, i64::MAX - 1, returned),
            booking(BookingStatus::Completed, i64::MAX - 1, returned),
        ];

        assert_eq!(total_revenue(&bookings), i64::MAX);

        let series = revenue_by_month(&bookings, 1, at(2024, 3, 31));
        assert_eq!(series[0].revenue_cents, i64::MAX);

        let refunds = vec![
            booking(BookingStatus::Completed, i64::MIN + 1, returned),
            booking(BookingStatus::Completed, i64::MIN + 1, returned),
        ];
        assert_eq!(total_revenue(&refunds), i64::MIN);
    }

    #[test]
    fn test_revenue_chart_from_series() {
        let bookings = vec![booking(BookingStatus::Completed, 12_550, Some(at(2024, 2, 1)))];
        let series = revenue_by_month(&bookings, 2, at(2024, 2, 29));
        let chart = RevenueChart::from(series.as_slice());

        assert_eq!(chart.labels, vec!["Jan 2024".to_string(), "Feb 2024".to_string()]);
        assert_eq!(chart.data, vec![0.0, 125.5]);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(12_550, "$"), "$125.50");
        assert_eq!(format_cents(5, "€"), "€0.05");
        assert_eq!(format_cents(-250, "$"), "-$2.50");
    }
}
