//! Human-readable and JSON output for command results

use chrono::{DateTime, Utc};
use serde::Serialize;

use coworking_booking::domain::{
    AvailableRoom, Booking, BookingDetails, Coworking, Equipment, Payment, RevenueReport, Room,
    RoomOccupancy, User, UserStatistics,
};
use coworking_booking::shared::DATETIME_FORMAT;

/// Print `value` as pretty JSON, or through `human` otherwise.
pub fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    human: impl FnOnce(&T),
) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human(value);
    }
    Ok(())
}

fn at(ts: &DateTime<Utc>) -> String {
    ts.format(DATETIME_FORMAT).to_string()
}

pub fn coworkings(list: &[Coworking]) {
    if list.is_empty() {
        println!("No coworkings.");
        return;
    }
    println!("{:>4}  {:<30} {}", "ID", "NAME", "ADDRESS");
    for c in list {
        println!("{:>4}  {:<30} {}", c.id, c.name, c.address);
        if let Some(description) = &c.description {
            println!("      {}", description);
        }
    }
}

pub fn coworking(c: &Coworking) {
    println!("Coworking #{} created: {} ({})", c.id, c.name, c.address);
}

pub fn rooms(list: &[Room]) {
    if list.is_empty() {
        println!("No rooms.");
        return;
    }
    println!(
        "{:>4}  {:<24} {:>8} {:>10} {:>10}",
        "ID", "NAME", "CAPACITY", "AREA, m2", "RATE/H"
    );
    for r in list {
        let area = r
            .area_sqm
            .map(|a| format!("{:.1}", a))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>4}  {:<24} {:>8} {:>10} {:>10}",
            r.id, r.name, r.capacity, area, r.hourly_rate
        );
    }
}

pub fn room(r: &Room) {
    println!(
        "Room #{} created: {} in coworking #{}, {} seats, {}/h",
        r.id, r.name, r.coworking_id, r.capacity, r.hourly_rate
    );
}

pub fn equipment_list(list: &[Equipment]) {
    if list.is_empty() {
        println!("No equipment.");
        return;
    }
    for e in list {
        match &e.description {
            Some(d) => println!("{:>4}  {:<24} {}", e.id, e.name, d),
            None => println!("{:>4}  {}", e.id, e.name),
        }
    }
}

pub fn equipment(e: &Equipment) {
    println!("Equipment #{}: {}", e.id, e.name);
}

pub fn user(u: &User) {
    println!("User #{} created: {} <{}> ({})", u.id, u.full_name, u.email, u.role);
}

pub fn available_rooms(list: &[AvailableRoom]) {
    if list.is_empty() {
        println!("No rooms available for the requested time.");
        return;
    }
    for a in list {
        println!(
            "#{} {}  [{}, {}]",
            a.room.id, a.room.name, a.coworking_name, a.coworking_address
        );
        println!(
            "     capacity {}, {}/h{}",
            a.room.capacity,
            a.room.hourly_rate,
            if a.equipment.is_empty() {
                String::new()
            } else {
                format!(", equipment: {}", a.equipment.join(", "))
            }
        );
    }
}

fn booking_line(b: &Booking) -> String {
    format!(
        "Booking #{}: room #{} {} - {}, {} ({})",
        b.id,
        b.room_id,
        at(&b.starts_at),
        at(&b.ends_at),
        b.total_amount,
        b.status
    )
}

fn payment_line(p: &Payment) -> String {
    let mut line = format!("Payment #{}: {} ({})", p.id, p.amount, p.status);
    if let Some(method) = &p.payment_method {
        line.push_str(&format!(", {}", method));
    }
    if let Some(paid_at) = &p.paid_at {
        line.push_str(&format!(", paid {}", at(paid_at)));
    }
    line
}

#[derive(Serialize)]
pub struct BookingWithPayment<'a> {
    pub booking: &'a Booking,
    pub payment: &'a Payment,
}

pub fn booking_with_payment(v: &BookingWithPayment<'_>) {
    println!("{}", booking_line(v.booking));
    println!("{}", payment_line(v.payment));
}

pub fn history(list: &[BookingDetails]) {
    if list.is_empty() {
        println!("No bookings.");
        return;
    }
    for d in list {
        println!("{}", booking_line(&d.booking));
        println!(
            "     {} / {}, {}; payment: {}{}",
            d.room_name,
            d.coworking_name,
            d.coworking_address,
            d.payment_status,
            d.paid_at
                .map(|t| format!(" at {}", at(&t)))
                .unwrap_or_default()
        );
    }
}

pub fn occupancy(rows: &[RoomOccupancy]) {
    println!(
        "{:>4}  {:<20} {:<20} {:>8} {:>10} {:>10}",
        "ID", "ROOM", "COWORKING", "BOOKINGS", "HOURS", "OCCUPANCY"
    );
    for r in rows {
        println!(
            "{:>4}  {:<20} {:<20} {:>8} {:>10.2} {:>9.2}%",
            r.room_id,
            r.room_name,
            r.coworking_name,
            r.total_bookings,
            r.booked_hours,
            r.occupancy_percentage
        );
    }
}

pub fn revenue(rows: &[RevenueReport]) {
    println!(
        "{:>4}  {:<24} {:>8} {:>12} {:>12} {:>12} {:>12}",
        "ID", "COWORKING", "BOOKINGS", "TOTAL", "PAID", "PENDING", "REFUNDED"
    );
    for r in rows {
        println!(
            "{:>4}  {:<24} {:>8} {:>12} {:>12} {:>12} {:>12}",
            r.coworking_id,
            r.coworking_name,
            r.total_bookings,
            r.total_revenue,
            r.confirmed_revenue,
            r.pending_revenue,
            r.refunded_amount
        );
    }
}

pub fn user_statistics(s: &UserStatistics) {
    println!("{} <{}> (user #{})", s.full_name, s.email, s.user_id);
    println!("  bookings:  {}", s.total_bookings);
    println!("  pending:   {}", s.pending_bookings);
    println!("  confirmed: {}", s.confirmed_bookings);
    println!("  completed: {}", s.completed_bookings);
    println!("  cancelled: {}", s.cancelled_bookings);
    println!("  booked:    {}", s.total_spent);
    println!("  paid:      {}", s.total_paid);
}
