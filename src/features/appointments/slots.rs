//! Slot generation and availability.

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveTime};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::AppointmentConfig;

/// One consultation slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// `{day}-{hour}-{minute}`, with day counted from the first date
    pub id: String,
    /// Doctor the slot belongs to
    pub doctor_id: String,
    /// Calendar day
    pub date: NaiveDate,
    /// Start time
    #[serde(serialize_with = "hhmm")]
    pub start: NaiveTime,
    /// End time
    #[serde(serialize_with = "hhmm")]
    pub end: NaiveTime,
    /// Whether the slot can be booked
    pub available: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn hhmm<S: serde::Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

/// Decides whether a generated slot is free.
pub trait AvailabilitySource {
    /// Availability of the slot starting at `start` on `date`.
    fn is_available(&mut self, doctor_id: &str, date: NaiveDate, start: NaiveTime) -> bool;
}

/// Marks each slot free with a fixed probability.
#[derive(Debug, Clone)]
pub struct RandomAvailability {
    rng: StdRng,
    probability: f64,
}

impl RandomAvailability {
    /// Reproducible availability from a seed.
    #[must_use]
    pub fn seeded(seed: u64, probability: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Availability seeded from the OS.
    #[must_use]
    pub fn from_entropy(probability: f64) -> Self {
        Self {
            rng: StdRng::from_entropy(),
            probability: probability.clamp(0.0, 1.0),
        }
    }
}

impl AvailabilitySource for RandomAvailability {
    fn is_available(&mut self, _doctor_id: &str, _date: NaiveDate, _start: NaiveTime) -> bool {
        self.rng.gen_bool(self.probability)
    }
}

/// Everything is free except an explicit list of booked slots.
#[derive(Debug, Clone, Default)]
pub struct FixedAvailability {
    booked: HashSet<(String, NaiveDate, NaiveTime)>,
}

impl FixedAvailability {
    /// No bookings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a slot as booked.
    #[must_use]
    pub fn book(mut self, doctor_id: &str, date: NaiveDate, start: NaiveTime) -> Self {
        self.booked.insert((doctor_id.to_string(), date, start));
        self
    }
}

impl AvailabilitySource for FixedAvailability {
    fn is_available(&mut self, doctor_id: &str, date: NaiveDate, start: NaiveTime) -> bool {
        !self.booked.contains(&(doctor_id.to_string(), date, start))
    }
}

/// Lays out slots across working hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotGenerator {
    day_start_hour: u32,
    day_end_hour: u32,
    slot_minutes: u32,
    days_ahead: u32,
}

impl Default for SlotGenerator {
    fn default() -> Self {
        Self::from_config(&AppointmentConfig::default())
    }
}

impl SlotGenerator {
    /// Generator using the configured hours and slot length.
    #[must_use]
    pub fn from_config(config: &AppointmentConfig) -> Self {
        Self {
            day_start_hour: config.day_start_hour,
            day_end_hour: config.day_end_hour.min(24),
            slot_minutes: config.slot_minutes.clamp(1, 60),
            days_ahead: config.days_ahead,
        }
    }

    /// Slots per day.
    #[must_use]
    pub const fn slots_per_day(&self) -> u32 {
        let hours = self.day_end_hour.saturating_sub(self.day_start_hour);
        hours * (60 / self.slot_minutes)
    }

    /// All slots for `doctor_id` over `days_ahead` days starting at `from`.
    pub fn generate(
        &self,
        doctor_id: &str,
        from: NaiveDate,
        source: &mut dyn AvailabilitySource,
    ) -> Vec<TimeSlot> {
        let mut slots = Vec::new();

        for day in 0..self.days_ahead {
            let date = from + Duration::days(i64::from(day));
            for hour in self.day_start_hour..self.day_end_hour {
                let mut minute = 0;
                while minute < 60 {
                    let Some(start) = NaiveTime::from_hms_opt(hour, minute, 0) else {
                        break;
                    };
                    let end = start + Duration::minutes(i64::from(self.slot_minutes));
                    slots.push(TimeSlot {
                        id: format!("{day}-{hour}-{minute}"),
                        doctor_id: doctor_id.to_string(),
                        date,
                        start,
                        end,
                        available: source.is_available(doctor_id, date, start),
                    });
                    minute += self.slot_minutes;
                }
            }
        }

        debug!(
            "generated {} slots for doctor {doctor_id} from {from}",
            slots.len()
        );
        slots
    }
}

/// Free slots for one doctor on one day, in time order.
#[must_use]
pub fn available_on<'a>(slots: &'a [TimeSlot], doctor_id: &str, date: NaiveDate) -> Vec<&'a TimeSlot> {
    let mut free: Vec<&TimeSlot> = slots
        .iter()
        .filter(|s| s.doctor_id == doctor_id && s.date == date && s.available)
        .collect();
    free.sort_by_key(|s| s.start);
    free
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_layout() {
        let generator = SlotGenerator::default();
        let slots = generator.generate("1", day(2), &mut FixedAvailability::new());

        assert_eq!(generator.slots_per_day(), 16);
        assert_eq!(slots.len(), 7 * 16);

        let first = &slots[0];
        assert_eq!(first.id, "0-9-0");
        assert_eq!(first.start, time(9, 0));
        assert_eq!(first.end, time(9, 30));

        let last = slots.last().unwrap();
        assert_eq!(last.id, "6-16-30");
        assert_eq!(last.date, day(8));
        assert_eq!(last.end, time(17, 0));
        assert!(slots.iter().all(|s| s.available));
    }

    #[test]
    fn test_fixed_bookings() {
        let mut source = FixedAvailability::new()
            .book("1", day(2), time(10, 0))
            .book("1", day(2), time(10, 30));
        let slots = SlotGenerator::default().generate("1", day(2), &mut source);

        let free = available_on(&slots, "1", day(2));
        assert_eq!(free.len(), 14);
        assert!(free.iter().all(|s| s.start != time(10, 0)));
        assert!(available_on(&slots, "2", day(2)).is_empty());
    }

    #[test]
    fn test_seeded_availability_is_reproducible() {
        let generator = SlotGenerator::default();
        let a = generator.generate("1", day(2), &mut RandomAvailability::seeded(7, 0.7));
        let b = generator.generate("1", day(2), &mut RandomAvailability::seeded(7, 0.7));
        assert_eq!(a, b);

        let free = a.iter().filter(|s| s.available).count();
        assert!(free > 0 && free < a.len());
    }

    #[test]
    fn test_probability_extremes() {
        let generator = SlotGenerator::default();
        let none = generator.generate("1", day(2), &mut RandomAvailability::seeded(1, 0.0));
        assert!(none.iter().all(|s| !s.available));

        let all = generator.generate("1", day(2), &mut RandomAvailability::seeded(1, 1.0));
        assert!(all.iter().all(|s| s.available));
    }

    #[test]
    fn test_custom_config() {
        let config = AppointmentConfig {
            day_start_hour: 13,
            day_end_hour: 15,
            slot_minutes: 20,
            days_ahead: 1,
            availability: 1.0,
        };
        let slots = SlotGenerator::from_config(&config).generate(
            "3",
            day(5),
            &mut FixedAvailability::new(),
        );
        let ids: Vec<&str> = slots.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["0-13-0", "0-13-20", "0-13-40", "0-14-0", "0-14-20", "0-14-40"]
        );
    }

    #[test]
    fn test_slot_json_times() {
        let slots = SlotGenerator::default().generate("1", day(2), &mut FixedAvailability::new());
        let json = serde_json::to_value(&slots[1]).unwrap();
        assert_eq!(json["start"], "09:30");
        assert_eq!(json["end"], "10:00");
        assert_eq!(json["date"], "2024-09-02");
    }
}
