//! Data models for the appointment registry.
//!
//! This module defines the core data structures used throughout the system:
//! - Specialty: Enum for medical departments
//! - AppointmentStatus: Lifecycle states of an appointment
//! - Patient: Patient profile and medical history
//! - Appointment: A booking of one doctor's slot by one patient

use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

use crate::error::{HospitalError, Result};

/// Medical departments a doctor can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialty {
    Cardiology,
    Neurology,
    Orthopedics,
    Dermatology,
    General,
}

impl Specialty {
    pub fn name(&self) -> &str {
        match self {
            Specialty::Cardiology => "CARDIOLOGY",
            Specialty::Neurology => "NEUROLOGY",
            Specialty::Orthopedics => "ORTHOPEDICS",
            Specialty::Dermatology => "DERMATOLOGY",
            Specialty::General => "GENERAL",
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle states of an appointment.
///
/// `Cancelled` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 4] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::Completed,
    ];

    pub fn name(&self) -> &str {
        match self {
            AppointmentStatus::Pending => "PENDING",
            AppointmentStatus::Confirmed => "CONFIRMED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Represents a patient registered with the hospital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patient {
    pub patient_id: String,
    pub name: String,
    pub age: u32,
    pub phone: String,
    pub blood_type: String,
    medical_history: Vec<String>,
}

impl Patient {
    /// Create a new patient with validation.
    pub fn new(
        patient_id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        phone: impl Into<String>,
        blood_type: impl Into<String>,
    ) -> Result<Self> {
        let patient_id = patient_id.into();
        let name = name.into();

        if patient_id.trim().is_empty() {
            return Err(HospitalError::ValidationError(
                "Patient ID cannot be empty".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(HospitalError::ValidationError(
                "Patient name cannot be empty".to_string(),
            ));
        }
        if age == 0 {
            return Err(HospitalError::ValidationError(
                "Patient age must be positive".to_string(),
            ));
        }

        Ok(Patient {
            patient_id,
            name,
            age,
            phone: phone.into(),
            blood_type: blood_type.into(),
            medical_history: Vec::new(),
        })
    }

    /// Append a note to the medical history. Entries are never removed.
    pub fn add_medical_note(&mut self, note: impl Into<String>) {
        self.medical_history.push(note.into());
    }

    /// Medical history in the order it was recorded.
    pub fn history(&self) -> &[String] {
        &self.medical_history
    }
}

/// A booking of one doctor's slot by one patient.
///
/// Doctor and patient are referenced by id; the registry resolves them.
/// Two appointments are equal when their ids are.
#[derive(Debug, Clone, Serialize)]
pub struct Appointment {
    pub appointment_id: Uuid,
    pub doctor_id: String,
    pub patient_id: String,
    pub date_time: NaiveDateTime,
    pub created_at: DateTime<Local>,
    status: AppointmentStatus,
    notes: Option<String>,
}

impl Appointment {
    /// Create a new appointment in `Pending` state.
    pub fn new(
        doctor_id: impl Into<String>,
        patient_id: impl Into<String>,
        date_time: NaiveDateTime,
    ) -> Self {
        Appointment {
            appointment_id: Uuid::new_v4(),
            doctor_id: doctor_id.into(),
            patient_id: patient_id.into(),
            date_time,
            created_at: Local::now(),
            status: AppointmentStatus::Pending,
            notes: None,
        }
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Completion notes, present once the appointment is completed.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// PENDING -> CONFIRMED.
    pub fn confirm(&mut self) -> Result<()> {
        if self.status != AppointmentStatus::Pending {
            return Err(self.rejected("confirm"));
        }
        self.status = AppointmentStatus::Confirmed;
        Ok(())
    }

    /// PENDING or CONFIRMED -> CANCELLED.
    pub fn cancel(&mut self) -> Result<()> {
        if self.status.is_terminal() {
            return Err(self.rejected("cancel"));
        }
        self.status = AppointmentStatus::Cancelled;
        Ok(())
    }

    /// CONFIRMED -> COMPLETED. Notes must not be blank.
    pub fn complete(&mut self, notes: &str) -> Result<()> {
        if self.status != AppointmentStatus::Confirmed {
            return Err(self.rejected("complete"));
        }
        if notes.trim().is_empty() {
            return Err(HospitalError::ValidationError(
                "Completion notes cannot be empty".to_string(),
            ));
        }
        self.status = AppointmentStatus::Completed;
        self.notes = Some(notes.to_string());
        Ok(())
    }

    /// The history entry written to the patient when this visit completes.
    pub fn history_note(&self, doctor_name: &str) -> Option<String> {
        self.notes.as_ref().map(|notes| {
            format!(
                "[{}] Dr.{}: {}",
                self.date_time.date(),
                doctor_name,
                notes
            )
        })
    }

    fn rejected(&self, action: &'static str) -> HospitalError {
        HospitalError::InvalidTransition {
            from: self.status,
            action,
        }
    }
}

impl PartialEq for Appointment {
    fn eq(&self, other: &Self) -> bool {
        self.appointment_id == other.appointment_id
    }
}

impl Eq for Appointment {}

impl PartialOrd for Appointment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Appointment {
    /// Order by booked time; ties fall back to the id.
    fn cmp(&self, other: &Self) -> Ordering {
        self.date_time
            .cmp(&other.date_time)
            .then_with(|| self.appointment_id.cmp(&other.appointment_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn patient_rejects_zero_age_and_blank_name() {
        assert!(Patient::new("P1", "Ann", 0, "555", "A+").is_err());
        assert!(Patient::new("P1", "  ", 30, "555", "A+").is_err());
        assert!(Patient::new("", "Ann", 30, "555", "A+").is_err());
    }

    #[test]
    fn appointment_goes_through_confirm_and_complete() {
        let mut apt = Appointment::new("D1", "P1", at(9));
        assert_eq!(apt.status(), AppointmentStatus::Pending);

        apt.confirm().unwrap();
        assert_eq!(apt.status(), AppointmentStatus::Confirmed);

        apt.complete("Blood pressure normal").unwrap();
        assert_eq!(apt.status(), AppointmentStatus::Completed);
        assert_eq!(apt.notes(), Some("Blood pressure normal"));
        assert_eq!(
            apt.history_note("Ayse Demir").as_deref(),
            Some("[2026-03-10] Dr.Ayse Demir: Blood pressure normal")
        );
    }

    #[test]
    fn terminal_states_reject_further_transitions() {
        let mut done = Appointment::new("D1", "P1", at(9));
        done.confirm().unwrap();
        done.complete("ok").unwrap();
        assert_matches!(
            done.cancel(),
            Err(HospitalError::InvalidTransition { from: AppointmentStatus::Completed, .. })
        );
        assert!(done.complete("again").is_err());

        let mut cancelled = Appointment::new("D1", "P1", at(10));
        cancelled.cancel().unwrap();
        assert!(cancelled.cancel().is_err());
        assert!(cancelled.confirm().is_err());
        assert!(cancelled.complete("late").is_err());
    }

    #[test]
    fn complete_requires_confirmation_and_notes() {
        let mut apt = Appointment::new("D1", "P1", at(9));
        assert_matches!(
            apt.complete("ok"),
            Err(HospitalError::InvalidTransition { from: AppointmentStatus::Pending, .. })
        );

        apt.confirm().unwrap();
        assert_matches!(apt.complete("   "), Err(HospitalError::ValidationError(_)));
        assert_eq!(apt.status(), AppointmentStatus::Confirmed);
        assert!(apt.history_note("X").is_none());
    }

    #[test]
    fn appointments_order_by_time_then_id() {
        let late = Appointment::new("D1", "P1", at(15));
        let early = Appointment::new("D2", "P2", at(8));
        let mut list = vec![late.clone(), early.clone()];
        list.sort();
        assert_eq!(list, vec![early, late]);

        let a = Appointment::new("D1", "P1", at(9));
        let b = Appointment::new("D2", "P2", at(9));
        let expected = a.appointment_id.cmp(&b.appointment_id);
        assert_eq!(a.cmp(&b), expected);
    }

    #[test]
    fn equality_agrees_with_ordering_across_status_changes() {
        let booked = Appointment::new("D1", "P1", at(9));
        let mut confirmed = booked.clone();
        confirmed.confirm().unwrap();

        assert_eq!(booked.cmp(&confirmed), Ordering::Equal);
        assert_eq!(booked, confirmed);

        let other = Appointment::new("D1", "P1", at(9));
        assert_ne!(booked, other);
        assert_ne!(booked.cmp(&other), Ordering::Equal);
    }
}
