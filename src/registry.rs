//! The hospital registry: system of record for doctors, patients and
//! appointments.
//!
//! All state sits behind a single lock. Booking, cancellation and completion
//! check and mutate under the write lock, so two callers can never both take
//! the same slot. Reports take the read lock and return owned snapshots.

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::audit::{AuditRecord, AuditSink, FileAuditLog};
use crate::calendar::Doctor;
use crate::config::RegistryConfig;
use crate::error::{AuditError, HospitalError, Result};
use crate::models::{Appointment, AppointmentStatus, Patient, Specialty};
use crate::report::{self, SpecialtyListing, Statistics};

/// Outcome of a committed booking.
///
/// The appointment is authoritative; `audit` tells whether the audit sink
/// accepted the record.
#[derive(Debug)]
pub struct Booking {
    pub appointment: Appointment,
    pub audit: std::result::Result<(), AuditError>,
}

impl Booking {
    pub fn audit_failed(&self) -> bool {
        self.audit.is_err()
    }
}

#[derive(Debug, Default)]
struct RegistryState {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
}

impl RegistryState {
    fn doctor_index(&self, doctor_id: &str) -> Result<usize> {
        self.doctors
            .iter()
            .position(|d| d.doctor_id == doctor_id)
            .ok_or_else(|| HospitalError::NotFound(format!("doctor {}", doctor_id)))
    }

    fn patient_index(&self, patient_id: &str) -> Result<usize> {
        self.patients
            .iter()
            .position(|p| p.patient_id == patient_id)
            .ok_or_else(|| HospitalError::NotFound(format!("patient {}", patient_id)))
    }

    fn appointment_index(&self, appointment_id: Uuid) -> Result<usize> {
        self.appointments
            .iter()
            .position(|a| a.appointment_id == appointment_id)
            .ok_or_else(|| HospitalError::NotFound(format!("appointment {}", appointment_id)))
    }

    fn slot_is_booked(&self, doctor_id: &str, slot: &NaiveDateTime) -> bool {
        self.appointments.iter().any(|a| {
            a.doctor_id == doctor_id
                && a.date_time == *slot
                && a.status() != AppointmentStatus::Cancelled
        })
    }
}

pub struct Hospital {
    name: String,
    state: RwLock<RegistryState>,
    audit: Arc<dyn AuditSink>,
}

impl Hospital {
    pub fn new(name: impl Into<String>, audit: Arc<dyn AuditSink>) -> Self {
        Hospital {
            name: name.into(),
            state: RwLock::new(RegistryState::default()),
            audit,
        }
    }

    /// Build a registry that appends bookings to the configured log file.
    pub fn from_config(config: &RegistryConfig) -> Self {
        let audit = Arc::new(FileAuditLog::new(config.appointment_log_path.clone()));
        Self::new(config.hospital_name.clone(), audit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // Mutations never leave the state half-applied, so a poisoned lock still
    // guards consistent data.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a doctor. Ids must be unique.
    pub fn add_doctor(&self, doctor: Doctor) -> Result<()> {
        let mut state = self.write();
        if state.doctor_index(&doctor.doctor_id).is_ok() {
            warn!(doctor_id = %doctor.doctor_id, "duplicate doctor registration rejected");
            return Err(HospitalError::ValidationError(format!(
                "Doctor ID already registered: {}",
                doctor.doctor_id
            )));
        }
        info!(doctor_id = %doctor.doctor_id, specialty = %doctor.specialty, "doctor registered");
        state.doctors.push(doctor);
        Ok(())
    }

    /// Register a patient. Ids must be unique.
    pub fn add_patient(&self, patient: Patient) -> Result<()> {
        let mut state = self.write();
        if state.patient_index(&patient.patient_id).is_ok() {
            warn!(patient_id = %patient.patient_id, "duplicate patient registration rejected");
            return Err(HospitalError::ValidationError(format!(
                "Patient ID already registered: {}",
                patient.patient_id
            )));
        }
        info!(patient_id = %patient.patient_id, "patient registered");
        state.patients.push(patient);
        Ok(())
    }

    /// Open a slot on a registered doctor's calendar.
    ///
    /// Returns false if the slot was already open. A slot held by an active
    /// appointment cannot be reopened.
    pub fn open_slot(&self, doctor_id: &str, slot: NaiveDateTime) -> Result<bool> {
        let mut state = self.write();
        let idx = state.doctor_index(doctor_id)?;
        if state.slot_is_booked(doctor_id, &slot) {
            warn!(doctor_id, %slot, "cannot reopen a booked slot");
            return Err(HospitalError::SlotUnavailable {
                doctor_id: doctor_id.to_string(),
                slot,
            });
        }
        Ok(state.doctors[idx].add_available_slot(slot))
    }

    /// Book `slot` with a doctor for a patient.
    ///
    /// The returned appointment is already confirmed. The audit record is
    /// written after the registry lock is released; a sink failure is
    /// reported in the returned `Booking` and does not undo the booking.
    #[instrument(skip(self))]
    pub fn book_appointment(
        &self,
        patient_id: &str,
        doctor_id: &str,
        slot: NaiveDateTime,
    ) -> Result<Booking> {
        let (appointment, record) = {
            let mut state = self.write();
            let doctor_idx = state.doctor_index(doctor_id).map_err(|e| {
                warn!(doctor_id, "booking requested for unknown doctor");
                e
            })?;
            let patient_idx = state.patient_index(patient_id).map_err(|e| {
                warn!(patient_id, "booking requested for unknown patient");
                e
            })?;

            if !state.doctors[doctor_idx].is_available(&slot) {
                warn!(doctor_id, %slot, "slot not available");
                return Err(HospitalError::SlotUnavailable {
                    doctor_id: doctor_id.to_string(),
                    slot,
                });
            }

            let mut appointment = Appointment::new(doctor_id, patient_id, slot);
            appointment.confirm()?;

            // Nothing below can fail, so the booking applies as a whole.
            state.doctors[doctor_idx].remove_slot(&slot);
            state.appointments.push(appointment.clone());

            let record = AuditRecord::new(
                &appointment,
                &state.doctors[doctor_idx],
                &state.patients[patient_idx],
            );
            (appointment, record)
        };

        info!(
            appointment_id = %appointment.appointment_id,
            patient_id,
            doctor_id,
            %slot,
            "appointment booked"
        );

        let audit = self.audit.record(&record);
        if let Err(e) = &audit {
            warn!(appointment_id = %appointment.appointment_id, error = %e, "audit write failed");
        }

        Ok(Booking { appointment, audit })
    }

    /// Cancel an appointment and return its slot to the doctor.
    #[instrument(skip(self))]
    pub fn cancel_appointment(&self, appointment_id: Uuid) -> Result<Appointment> {
        let mut state = self.write();
        let idx = state.appointment_index(appointment_id).map_err(|e| {
            warn!(%appointment_id, "cancel requested for unknown appointment");
            e
        })?;

        let state = &mut *state;
        let appointment = &mut state.appointments[idx];
        if let Err(e) = appointment.cancel() {
            warn!(%appointment_id, status = %appointment.status(), "cancel rejected");
            return Err(e);
        }

        if let Some(doctor) = state
            .doctors
            .iter_mut()
            .find(|d| d.doctor_id == appointment.doctor_id)
        {
            doctor.add_available_slot(appointment.date_time);
        }

        info!(%appointment_id, slot = %appointment.date_time, "appointment cancelled");
        Ok(appointment.clone())
    }

    /// Complete a confirmed appointment and record the visit in the
    /// patient's history.
    #[instrument(skip(self, notes))]
    pub fn complete_appointment(&self, appointment_id: Uuid, notes: &str) -> Result<Appointment> {
        let mut state = self.write();
        let apt_idx = state.appointment_index(appointment_id).map_err(|e| {
            warn!(%appointment_id, "complete requested for unknown appointment");
            e
        })?;
        let doctor_idx = state.doctor_index(&state.appointments[apt_idx].doctor_id)?;
        let patient_idx = state.patient_index(&state.appointments[apt_idx].patient_id)?;

        let state = &mut *state;
        let appointment = &mut state.appointments[apt_idx];
        if let Err(e) = appointment.complete(notes) {
            warn!(%appointment_id, status = %appointment.status(), error = %e, "complete rejected");
            return Err(e);
        }

        if let Some(note) = appointment.history_note(&state.doctors[doctor_idx].name) {
            state.patients[patient_idx].add_medical_note(note);
        }

        info!(%appointment_id, patient_id = %appointment.patient_id, "appointment completed");
        Ok(appointment.clone())
    }

    pub fn doctor(&self, doctor_id: &str) -> Option<Doctor> {
        let state = self.read();
        state
            .doctor_index(doctor_id)
            .ok()
            .map(|idx| state.doctors[idx].clone())
    }

    /// Patient profile including medical history.
    pub fn patient(&self, patient_id: &str) -> Option<Patient> {
        let state = self.read();
        state
            .patient_index(patient_id)
            .ok()
            .map(|idx| state.patients[idx].clone())
    }

    pub fn appointment(&self, appointment_id: Uuid) -> Option<Appointment> {
        let state = self.read();
        state
            .appointment_index(appointment_id)
            .ok()
            .map(|idx| state.appointments[idx].clone())
    }

    /// Doctors in registration order.
    pub fn doctors(&self) -> Vec<Doctor> {
        self.read().doctors.clone()
    }

    /// Patients in registration order.
    pub fn patients(&self) -> Vec<Patient> {
        self.read().patients.clone()
    }

    /// Every appointment ever booked, in booking order.
    pub fn appointments(&self) -> Vec<Appointment> {
        self.read().appointments.clone()
    }

    pub fn available_slots(&self, doctor_id: &str) -> Result<Vec<NaiveDateTime>> {
        let state = self.read();
        let idx = state.doctor_index(doctor_id)?;
        Ok(state.doctors[idx].list_slots())
    }

    pub fn list_by_specialty(&self, specialty: Specialty) -> Vec<SpecialtyListing> {
        debug!(%specialty, "listing doctors by specialty");
        report::by_specialty(&self.read().doctors, specialty)
    }

    pub fn daily_schedule(&self, date: NaiveDate) -> Vec<Appointment> {
        debug!(%date, "building daily schedule");
        report::daily_schedule(&self.read().appointments, date)
    }

    pub fn statistics(&self) -> Statistics {
        let state = self.read();
        Statistics::compute(&state.doctors, state.patients.len(), &state.appointments)
    }
}

impl std::fmt::Display for Hospital {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read();
        write!(
            f,
            "Hospital({}, doctors={}, patients={}, appointments={})",
            self.name,
            state.doctors.len(),
            state.patients.len(),
            state.appointments.len()
        )
    }
}
