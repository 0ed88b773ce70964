//! Booking aggregate
//!
//! A booking and its payment are persisted separately but always change
//! state together through the transactional operations of [`BookingRepository`].

pub mod model;
pub mod repository;

pub use model::{Booking, BookingDetails, BookingStatus, NewBooking, Payment, PaymentStatus};
pub use repository::BookingRepository;
