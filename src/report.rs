//! Read-only views derived from the registry state.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::calendar::Doctor;
use crate::models::{Appointment, AppointmentStatus, Specialty};

/// A doctor as shown in a specialty listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialtyListing {
    pub doctor_id: String,
    pub name: String,
    pub specialty: Specialty,
    pub consultation_fee: f64,
    pub available_slots: Vec<NaiveDateTime>,
}

impl From<&Doctor> for SpecialtyListing {
    fn from(doctor: &Doctor) -> Self {
        SpecialtyListing {
            doctor_id: doctor.doctor_id.clone(),
            name: doctor.name.clone(),
            specialty: doctor.specialty,
            consultation_fee: doctor.consultation_fee,
            available_slots: doctor.list_slots(),
        }
    }
}

/// Hospital-wide counters and revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub total_doctors: usize,
    pub total_patients: usize,
    pub total_appointments: usize,
    pub by_status: BTreeMap<AppointmentStatus, usize>,
    /// Sum of consultation fees over completed appointments.
    pub revenue: f64,
}

impl Statistics {
    /// Compute statistics in a single pass over the appointments.
    pub fn compute(doctors: &[Doctor], total_patients: usize, appointments: &[Appointment]) -> Self {
        let fees: HashMap<&str, f64> = doctors
            .iter()
            .map(|d| (d.doctor_id.as_str(), d.consultation_fee))
            .collect();

        let mut by_status: BTreeMap<AppointmentStatus, usize> = AppointmentStatus::ALL
            .iter()
            .map(|status| (*status, 0))
            .collect();
        let mut revenue = 0.0;

        for apt in appointments {
            *by_status.entry(apt.status()).or_insert(0) += 1;
            if apt.status() == AppointmentStatus::Completed {
                revenue += fees.get(apt.doctor_id.as_str()).copied().unwrap_or(0.0);
            }
        }

        Statistics {
            total_doctors: doctors.len(),
            total_patients,
            total_appointments: appointments.len(),
            by_status,
            revenue,
        }
    }

    pub fn count(&self, status: AppointmentStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }
}

/// Non-cancelled appointments on `date`, sorted by time.
pub fn daily_schedule(appointments: &[Appointment], date: NaiveDate) -> Vec<Appointment> {
    let mut schedule: Vec<Appointment> = appointments
        .iter()
        .filter(|apt| apt.date_time.date() == date)
        .filter(|apt| apt.status() != AppointmentStatus::Cancelled)
        .cloned()
        .collect();
    schedule.sort();
    schedule
}

/// Doctors of one specialty, in registration order.
pub fn by_specialty(doctors: &[Doctor], specialty: Specialty) -> Vec<SpecialtyListing> {
    doctors
        .iter()
        .filter(|d| d.specialty == specialty)
        .map(SpecialtyListing::from)
        .collect()
}
