//! Consultation bookings: slot allocation, admission and status transitions.

pub mod domain;
pub mod slots;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Booking, BookingStatus, NewBooking};
pub use service::BookingService;
