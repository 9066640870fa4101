//! Appointment slots command implementation.

use chrono::{Local, NaiveDate};

use super::Context;
use crate::cli::args::SlotsArgs;
use crate::error::MindwellError;
use crate::features::appointments::{
    available_on, AvailabilitySource, RandomAvailability, SlotGenerator, TimeSlot,
};
use crate::output::format_slots;

/// Show appointment slots for a doctor.
///
/// Without `--date` every generated day is shown, booked slots included.
/// With it, only the free slots of that day.
///
/// # Errors
///
/// Returns `MindwellError::Parse` for a malformed date.
pub fn slots(ctx: &Context, args: &SlotsArgs) -> Result<String, MindwellError> {
    let appointments = &ctx.config.appointments;
    let generator = SlotGenerator::from_config(appointments);

    let mut source: Box<dyn AvailabilitySource> = match args.seed {
        Some(seed) => Box::new(RandomAvailability::seeded(seed, appointments.availability)),
        None => Box::new(RandomAvailability::from_entropy(appointments.availability)),
    };

    let date = args
        .date
        .as_deref()
        .map(|d| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d")
                .map_err(|e| MindwellError::Parse(format!("Invalid date '{d}': {e}")))
        })
        .transpose()?;

    let from = date.unwrap_or_else(|| Local::now().date_naive());
    let all = generator.generate(&args.doctor, from, source.as_mut());

    let shown: Vec<&TimeSlot> = match date {
        Some(day) => available_on(&all, &args.doctor, day),
        None => all.iter().collect(),
    };

    format_slots(&args.doctor, &shown, ctx.format)
}
