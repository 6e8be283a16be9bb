//! Doctor profiles and their open slots.
//!
//! A slot is a single date-time point a doctor has opened for booking. Slots
//! are stored unordered and sorted whenever they are listed or serialized.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

use crate::error::{HospitalError, Result};
use crate::models::Specialty;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
    pub doctor_id: String,
    pub name: String,
    pub specialty: Specialty,
    pub consultation_fee: f64,
    #[serde(serialize_with = "serialize_sorted")]
    available_slots: HashSet<NaiveDateTime>,
}

fn serialize_sorted<S>(slots: &HashSet<NaiveDateTime>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut sorted: Vec<&NaiveDateTime> = slots.iter().collect();
    sorted.sort();
    serializer.collect_seq(sorted)
}

impl Doctor {
    /// Create a new doctor with validation.
    pub fn new(
        doctor_id: impl Into<String>,
        name: impl Into<String>,
        specialty: Specialty,
        consultation_fee: f64,
    ) -> Result<Self> {
        let doctor_id = doctor_id.into();
        let name = name.into();

        if doctor_id.trim().is_empty() {
            return Err(HospitalError::ValidationError(
                "Doctor ID cannot be empty".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(HospitalError::ValidationError(
                "Doctor name cannot be empty".to_string(),
            ));
        }
        if !consultation_fee.is_finite() || consultation_fee < 0.0 {
            return Err(HospitalError::ValidationError(format!(
                "Consultation fee must be a non-negative amount, got {}",
                consultation_fee
            )));
        }

        Ok(Doctor {
            doctor_id,
            name,
            specialty,
            consultation_fee,
            available_slots: HashSet::new(),
        })
    }

    /// Open a slot. Returns false if it was already open.
    pub fn add_available_slot(&mut self, slot: NaiveDateTime) -> bool {
        self.available_slots.insert(slot)
    }

    pub fn is_available(&self, slot: &NaiveDateTime) -> bool {
        self.available_slots.contains(slot)
    }

    /// Close a slot. Returns false if it was not open.
    pub fn remove_slot(&mut self, slot: &NaiveDateTime) -> bool {
        self.available_slots.remove(slot)
    }

    /// Get all open slots sorted by time.
    pub fn list_slots(&self) -> Vec<NaiveDateTime> {
        let mut slots: Vec<NaiveDateTime> = self.available_slots.iter().copied().collect();
        slots.sort();
        slots
    }

    pub fn slot_count(&self) -> usize {
        self.available_slots.len()
    }
}

impl std::fmt::Display for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Dr.{} ({}, fee={:.2}, open slots={})",
            self.name,
            self.specialty,
            self.consultation_fee,
            self.slot_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn slot(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn doctor() -> Doctor {
        Doctor::new("D001", "Ayse Demir", Specialty::Cardiology, 350.0).unwrap()
    }

    #[test]
    fn rejects_negative_or_non_finite_fee() {
        assert_matches!(
            Doctor::new("D1", "X", Specialty::General, -1.0),
            Err(HospitalError::ValidationError(_))
        );
        assert!(Doctor::new("D1", "X", Specialty::General, f64::NAN).is_err());
        assert!(Doctor::new("D1", "X", Specialty::General, 0.0).is_ok());
    }

    #[test]
    fn adding_a_duplicate_slot_is_a_no_op() {
        let mut d = doctor();
        assert!(d.add_available_slot(slot(10, 9)));
        assert!(!d.add_available_slot(slot(10, 9)));
        assert_eq!(d.slot_count(), 1);
    }

    #[test]
    fn removing_an_absent_slot_is_a_no_op() {
        let mut d = doctor();
        d.add_available_slot(slot(10, 9));
        assert!(d.remove_slot(&slot(10, 9)));
        assert!(!d.remove_slot(&slot(10, 9)));
        assert!(!d.is_available(&slot(10, 9)));
    }

    #[test]
    fn lists_slots_in_ascending_order() {
        let mut d = doctor();
        d.add_available_slot(slot(11, 9));
        d.add_available_slot(slot(10, 14));
        d.add_available_slot(slot(10, 9));

        assert_eq!(d.list_slots(), vec![slot(10, 9), slot(10, 14), slot(11, 9)]);
    }

    #[test]
    fn serializes_slots_in_ascending_order() {
        let mut d = doctor();
        for (day, hour) in [(12, 8), (10, 16), (11, 9), (10, 9), (12, 7)] {
            d.add_available_slot(slot(day, hour));
        }

        let json = serde_json::to_value(&d).unwrap();
        let expected = serde_json::to_value(d.list_slots()).unwrap();
        assert_eq!(json["available_slots"], expected);
        assert_eq!(json["specialty"], "CARDIOLOGY");
    }

    #[test]
    fn display_summarises_the_doctor() {
        let mut d = doctor();
        d.add_available_slot(slot(10, 9));
        d.add_available_slot(slot(10, 10));
        assert_eq!(
            d.to_string(),
            "Dr.Ayse Demir (CARDIOLOGY, fee=350.00, open slots=2)"
        );
    }
}
