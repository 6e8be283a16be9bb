//! Error types for the appointment registry.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::models::AppointmentStatus;

/// Errors returned by registry operations.
///
/// Every variant is recoverable; a rejected operation leaves the registry
/// unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HospitalError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Slot {slot} is not available for doctor {doctor_id}")]
    SlotUnavailable {
        doctor_id: String,
        slot: NaiveDateTime,
    },

    #[error("Cannot {action} an appointment in status {from}")]
    InvalidTransition {
        from: AppointmentStatus,
        action: &'static str,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Errors raised by an audit sink.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Audit write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audit sink lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, HospitalError>;
