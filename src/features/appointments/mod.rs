//! Appointment time slots.
//!
//! Generates bookable consultation slots over the coming days. Whether a
//! slot is free comes from an [`AvailabilitySource`], so callers decide
//! between seeded randomness and a fixed booking list.

pub mod slots;

pub use slots::{
    available_on, AvailabilitySource, FixedAvailability, RandomAvailability, SlotGenerator,
    TimeSlot,
};
