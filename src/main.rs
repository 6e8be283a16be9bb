//! Demo run of the clinic registry.
//!
//! Seeds a small hospital, books, completes and cancels a few appointments,
//! then prints the derived views. Bookings are appended to the configured
//! audit log.

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use clinic_registry::{Doctor, Hospital, Patient, RegistryConfig, Specialty};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

fn at(date: chrono::NaiveDate, hour: u32, minute: u32) -> DemoResult<NaiveDateTime> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or("invalid demo time")?;
    Ok(date.and_time(time))
}

fn seed(hospital: &Hospital, tomorrow: chrono::NaiveDate) -> DemoResult<()> {
    let mut d1 = Doctor::new("D001", "Ayse Demir", Specialty::Cardiology, 350.0)?;
    let mut d2 = Doctor::new("D002", "Mehmet Kaya", Specialty::Neurology, 400.0)?;
    let mut d3 = Doctor::new("D003", "Fatma Yildiz", Specialty::General, 200.0)?;

    for hour in [9, 10, 11] {
        d1.add_available_slot(at(tomorrow, hour, 0)?);
    }
    d2.add_available_slot(at(tomorrow, 14, 0)?);
    d2.add_available_slot(at(tomorrow, 15, 0)?);
    d3.add_available_slot(at(tomorrow, 9, 30)?);

    hospital.add_doctor(d1)?;
    hospital.add_doctor(d2)?;
    hospital.add_doctor(d3)?;

    hospital.add_patient(Patient::new("P001", "Bengu Gedik", 21, "0555-111-2233", "A+")?)?;
    hospital.add_patient(Patient::new("P002", "Ahmet Yilmaz", 35, "0544-222-3344", "B-")?)?;
    hospital.add_patient(Patient::new("P003", "Zeynep Celik", 28, "0533-333-4455", "O+")?)?;
    Ok(())
}

fn print_specialty(hospital: &Hospital, specialty: Specialty) {
    println!("\n--- {} ---", specialty);
    for listing in hospital.list_by_specialty(specialty) {
        if let Some(doctor) = hospital.doctor(&listing.doctor_id) {
            println!("{}:", doctor);
        }
        for slot in &listing.available_slots {
            println!("  -> {}", slot.format("%d/%m/%Y %H:%M"));
        }
        println!("  Fee: {:.2}", listing.consultation_fee);
    }
}

fn print_profile(hospital: &Hospital, patient_id: &str) {
    if let Some(patient) = hospital.patient(patient_id) {
        println!("\n--- PATIENT PROFILE ---");
        println!("Name  : {}", patient.name);
        println!("Age   : {}", patient.age);
        println!("Blood : {}", patient.blood_type);
        println!("Phone : {}", patient.phone);
        if !patient.history().is_empty() {
            println!("History:");
            for note in patient.history() {
                println!("  * {}", note);
            }
        }
    }
}

fn print_schedule(hospital: &Hospital, date: chrono::NaiveDate) {
    println!("\n===== DAILY SCHEDULE {} =====", date);
    for apt in hospital.daily_schedule(date) {
        let doctor = hospital
            .doctor(&apt.doctor_id)
            .map(|d| d.name)
            .unwrap_or_default();
        let patient = hospital
            .patient(&apt.patient_id)
            .map(|p| p.name)
            .unwrap_or_default();
        println!(
            "  {} | Dr.{:<15} | Patient: {:<15} | {}",
            apt.date_time.format("%H:%M"),
            doctor,
            patient,
            apt.status()
        );
    }
}

fn print_statistics(hospital: &Hospital) {
    let stats = hospital.statistics();
    println!("\n===== STATISTICS =====");
    println!("Doctors      : {}", stats.total_doctors);
    println!("Patients     : {}", stats.total_patients);
    println!("Appointments : {}", stats.total_appointments);
    for (status, count) in &stats.by_status {
        println!("  {}: {}", status, count);
    }
    println!("Revenue      : {:.2}", stats.revenue);
}

fn main() -> DemoResult<()> {
    // Loading Env Vars
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RegistryConfig::from_env();
    let hospital = Hospital::from_config(&config);
    info!(hospital = hospital.name(), log = %config.appointment_log_path.display(), "starting demo");

    let tomorrow = (Local::now() + Duration::days(1)).date_naive();
    seed(&hospital, tomorrow)?;
    println!("{}", hospital);

    print_specialty(&hospital, Specialty::Cardiology);

    let apt1 = hospital.book_appointment("P001", "D001", at(tomorrow, 9, 0)?)?;
    let apt2 = hospital.book_appointment("P002", "D002", at(tomorrow, 14, 0)?)?;
    let apt3 = hospital.book_appointment("P003", "D003", at(tomorrow, 9, 30)?)?;
    for booking in [&apt1, &apt2, &apt3] {
        if let Err(e) = &booking.audit {
            println!("Audit log write failed: {}", e);
        }
    }

    hospital.complete_appointment(
        apt1.appointment.appointment_id,
        "Blood pressure normal, follow-up in 6 months.",
    )?;
    hospital.complete_appointment(apt3.appointment.appointment_id, "Mild flu, antibiotics prescribed.")?;
    hospital.cancel_appointment(apt2.appointment.appointment_id)?;

    print_profile(&hospital, "P001");
    print_schedule(&hospital, tomorrow);
    print_statistics(&hospital);
    println!("\n{}", hospital);

    Ok(())
}
