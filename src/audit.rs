//! Append-only audit trail of bookings.
//!
//! The registry produces one `AuditRecord` per successful booking and hands
//! it to an `AuditSink`. Where the line ends up is up to the sink.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::calendar::Doctor;
use crate::error::AuditError;
use crate::models::{Appointment, AppointmentStatus, Patient};

/// One booking, as written to the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub appointment_id: Uuid,
    pub date_time: NaiveDateTime,
    pub doctor_name: String,
    pub patient_name: String,
    pub status: AppointmentStatus,
    pub fee: f64,
}

impl AuditRecord {
    pub fn new(appointment: &Appointment, doctor: &Doctor, patient: &Patient) -> Self {
        AuditRecord {
            appointment_id: appointment.appointment_id,
            date_time: appointment.date_time,
            doctor_name: doctor.name.clone(),
            patient_name: patient.name.clone(),
            status: appointment.status(),
            fee: doctor.consultation_fee,
        }
    }
}

impl std::fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} | Dr.{:<15} | Patient: {:<15} | {} | {:.2}",
            self.appointment_id,
            self.date_time.format("%d/%m/%Y %H:%M"),
            self.doctor_name,
            self.patient_name,
            self.status,
            self.fee
        )
    }
}

/// Destination for audit records.
pub trait AuditSink: Send + Sync {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// Appends one line per record to a text file.
#[derive(Debug, Clone)]
pub struct FileAuditLog {
    path: PathBuf,
}

impl FileAuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileAuditLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditSink for FileAuditLog {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", record)?;
        debug!(path = %self.path.display(), appointment_id = %record.appointment_id, "audit line written");
        Ok(())
    }
}

/// Keeps audit lines in memory.
#[derive(Debug, Default)]
pub struct MemoryAuditLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditLog {
    fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut lines = self.lines.lock().map_err(|_| AuditError::Poisoned)?;
        lines.push(record.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Specialty;
    use chrono::NaiveDate;

    fn sample_record() -> AuditRecord {
        let doctor = Doctor::new("D001", "Ayse Demir", Specialty::Cardiology, 350.0).unwrap();
        let patient = Patient::new("P001", "Bengu Gedik", 21, "0555-111-2233", "A+").unwrap();
        let slot = NaiveDate::from_ymd_opt(2026, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut apt = Appointment::new("D001", "P001", slot);
        apt.confirm().unwrap();
        AuditRecord::new(&apt, &doctor, &patient)
    }

    #[test]
    fn formats_a_stable_line() {
        let record = sample_record();
        let expected = format!(
            "[{}] 10/03/2026 09:00 | Dr.Ayse Demir      | Patient: Bengu Gedik     | CONFIRMED | 350.00",
            record.appointment_id
        );
        assert_eq!(record.to_string(), expected);
    }

    #[test]
    fn file_log_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileAuditLog::new(dir.path().join("appointments.txt"));

        let first = sample_record();
        let second = sample_record();
        log.record(&first).unwrap();
        log.record(&second).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec![first.to_string(), second.to_string()]);
    }

    #[test]
    fn file_log_reports_io_failures() {
        let dir = tempfile::tempdir().unwrap();
        let log = FileAuditLog::new(dir.path().join("missing").join("appointments.txt"));
        assert!(matches!(log.record(&sample_record()), Err(AuditError::Io(_))));
    }

    #[test]
    fn memory_log_keeps_lines_in_order() {
        let log = MemoryAuditLog::new();
        let record = sample_record();
        log.record(&record).unwrap();
        assert_eq!(log.lines(), vec![record.to_string()]);
    }
}
