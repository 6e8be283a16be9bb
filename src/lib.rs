//! Clinic appointment registry.
//!
//! Doctors open time slots, patients book them, and appointments move
//! through a small status lifecycle. Schedules, specialty listings and
//! statistics are derived from the registry's current state.

pub mod audit;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod report;

pub use audit::{AuditRecord, AuditSink, FileAuditLog, MemoryAuditLog};
pub use calendar::Doctor;
pub use config::RegistryConfig;
pub use error::{AuditError, HospitalError};
pub use models::{Appointment, AppointmentStatus, Patient, Specialty};
pub use registry::{Booking, Hospital};
pub use report::{SpecialtyListing, Statistics};
