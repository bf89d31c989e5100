//! Appointment lifecycle controller.
//!
//! The authorization and state-transition rules that govern who may
//! move an appointment between states and when a medical record may be
//! attached. Every operation takes the caller identity explicitly and
//! holds no state beyond the duration of a single call.
//!
//! State machine: `pending → accepted`, `pending → rejected`,
//! `accepted → completed` (record creation only). Accepted, rejected
//! and completed never revert; transitions on non-pending appointments
//! are `InvalidState`.

use chrono::Utc;
use rusqlite::Connection;

use crate::auth::{hash_password, verify_password};
use crate::db::repository::{
    find_account_by_handle, find_record_for_appointment, get_account, get_appointment,
    get_provider, insert_account, insert_appointment, insert_record, update_appointment_status,
};
use crate::db::DatabaseError;
use crate::models::*;

/// Errors surfaced by lifecycle operations. All are recoverable and
/// mapped to a notice + redirect at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error("Authentication required")]
    NotAuthenticated,
    #[error("Invalid handle or password")]
    AuthenticationFailed,
    #[error("Not permitted: {0}")]
    AuthorizationDenied(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Handle already taken")]
    DuplicateHandle,
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("A record already exists for this appointment")]
    AlreadyExists,
    #[error("Unrecognized action: {0}")]
    InvalidAction(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Accept/reject tag from the transition route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Accept,
    Reject,
}

impl std::str::FromStr for LifecycleAction {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            other => Err(LifecycleError::InvalidAction(other.to_string())),
        }
    }
}

/// Where the caller lands after a successful transition: doctors go
/// back to their appointment list, admins to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostTransitionView {
    DoctorAppointments,
    AdminConsole,
}

/// Create a role=patient account. Self-registration can never produce
/// a doctor or admin account; those come from seeding only.
pub fn register(
    conn: &Connection,
    handle: &str,
    password: &str,
    display_name: Option<&str>,
) -> Result<Account, LifecycleError> {
    let handle = handle.trim();
    if handle.is_empty() {
        return Err(LifecycleError::Validation("handle is required".into()));
    }
    if password.is_empty() {
        return Err(LifecycleError::Validation("password is required".into()));
    }
    if find_account_by_handle(conn, handle)?.is_some() {
        return Err(LifecycleError::DuplicateHandle);
    }
    let credential_hash = hash_password(password);
    match insert_account(conn, handle, &credential_hash, display_name, Role::Patient) {
        Ok(account) => {
            tracing::info!(handle, "account registered");
            Ok(account)
        }
        // Raced with another registration for the same handle.
        Err(e) if e.is_unique_violation() => Err(LifecycleError::DuplicateHandle),
        Err(e) => Err(e.into()),
    }
}

/// Verify a handle/password pair. The failure is generic: callers
/// cannot tell a missing handle from a wrong password.
pub fn authenticate(
    conn: &Connection,
    handle: &str,
    password: &str,
) -> Result<Account, LifecycleError> {
    let account = find_account_by_handle(conn, handle)?
        .ok_or(LifecycleError::AuthenticationFailed)?;
    if !verify_password(password, &account.credential_hash) {
        return Err(LifecycleError::AuthenticationFailed);
    }
    Ok(account)
}

/// Book an appointment with a provider. Any authenticated caller may
/// book; the booking is owned by the caller's account and starts out
/// pending. No conflict check against existing bookings for the same
/// provider/time.
pub fn book_appointment(
    conn: &Connection,
    caller: Option<&Caller>,
    provider_id: i64,
    time: &str,
    note: Option<&str>,
) -> Result<Appointment, LifecycleError> {
    let caller = caller.ok_or(LifecycleError::NotAuthenticated)?;
    let provider = get_provider(conn, provider_id)?
        .ok_or_else(|| LifecycleError::NotFound(format!("provider {provider_id}")))?;
    if time.trim().is_empty() {
        return Err(LifecycleError::Validation("time is required".into()));
    }
    let note = note.filter(|n| !n.trim().is_empty());
    let appointment = insert_appointment(conn, caller.account_id(), provider.id, time, note)?;
    tracing::info!(
        appointment_id = appointment.id,
        provider_id = provider.id,
        "appointment booked"
    );
    Ok(appointment)
}

/// Accept or reject a pending appointment.
///
/// Doctors may only act on their own appointments; admins may act on
/// any. Patients are always denied. Only `pending` appointments can be
/// transitioned — accepted, rejected and completed are terminal here.
pub fn transition_appointment(
    conn: &Connection,
    caller: &Caller,
    appointment_id: i64,
    action: LifecycleAction,
) -> Result<(Appointment, PostTransitionView), LifecycleError> {
    let view = match caller {
        Caller::Patient { .. } => {
            return Err(LifecycleError::AuthorizationDenied(
                "patients cannot manage appointments".into(),
            ))
        }
        Caller::Doctor { .. } => PostTransitionView::DoctorAppointments,
        Caller::Admin { .. } => PostTransitionView::AdminConsole,
    };

    let mut appointment = get_appointment(conn, appointment_id)?
        .ok_or_else(|| LifecycleError::NotFound(format!("appointment {appointment_id}")))?;

    if let Caller::Doctor { provider_id, .. } = caller {
        if appointment.provider_id != *provider_id {
            return Err(LifecycleError::AuthorizationDenied(
                "appointment belongs to another provider".into(),
            ));
        }
    }

    if appointment.status != AppointmentStatus::Pending {
        return Err(LifecycleError::InvalidState(format!(
            "appointment is already {}",
            appointment.status.as_str()
        )));
    }

    let new_status = match action {
        LifecycleAction::Accept => AppointmentStatus::Accepted,
        LifecycleAction::Reject => AppointmentStatus::Rejected,
    };
    update_appointment_status(conn, appointment.id, new_status)?;
    appointment.status = new_status;
    tracing::info!(
        appointment_id = appointment.id,
        status = new_status.as_str(),
        "appointment transitioned"
    );
    Ok((appointment, view))
}

/// Authorization and state preconditions shared by the record form
/// and record creation: doctor caller, owned appointment, no existing
/// record, accepted status. Returns the appointment and its patient.
pub fn record_context(
    conn: &Connection,
    caller: &Caller,
    appointment_id: i64,
) -> Result<(Appointment, Account), LifecycleError> {
    let Caller::Doctor { provider_id, .. } = caller else {
        return Err(LifecycleError::AuthorizationDenied(
            "only doctors create medical records".into(),
        ));
    };

    let appointment = get_appointment(conn, appointment_id)?
        .ok_or_else(|| LifecycleError::NotFound(format!("appointment {appointment_id}")))?;

    if appointment.provider_id != *provider_id {
        return Err(LifecycleError::AuthorizationDenied(
            "appointment belongs to another provider".into(),
        ));
    }

    // Record existence first: a completed appointment always has one,
    // and the caller should hear AlreadyExists, not a state complaint.
    if find_record_for_appointment(conn, appointment.id)?.is_some() {
        return Err(LifecycleError::AlreadyExists);
    }

    match appointment.status {
        AppointmentStatus::Accepted => {}
        AppointmentStatus::Completed => {
            return Err(LifecycleError::InvalidState(
                "appointment already has a record".into(),
            ))
        }
        AppointmentStatus::Pending | AppointmentStatus::Rejected => {
            return Err(LifecycleError::InvalidState(
                "appointment is not yet accepted".into(),
            ))
        }
    }

    let patient = get_account(conn, appointment.patient_id)?.ok_or_else(|| {
        LifecycleError::NotFound(format!("patient account {}", appointment.patient_id))
    })?;
    Ok((appointment, patient))
}

/// Attach a medical record to an accepted appointment, completing it.
///
/// All preconditions are checked before any mutation; the record
/// insert and the status update commit as one transaction.
pub fn create_record(
    conn: &Connection,
    caller: &Caller,
    appointment_id: i64,
    diagnosis: &str,
    treatment: Option<&str>,
) -> Result<MedicalRecord, LifecycleError> {
    let Caller::Doctor { account_id, .. } = caller else {
        return Err(LifecycleError::AuthorizationDenied(
            "only doctors create medical records".into(),
        ));
    };
    let (appointment, _patient) = record_context(conn, caller, appointment_id)?;

    let diagnosis = diagnosis.trim();
    if diagnosis.is_empty() {
        return Err(LifecycleError::Validation("diagnosis is required".into()));
    }
    let treatment = treatment.map(str::trim).filter(|t| !t.is_empty());

    // Record insert + status flip commit together or not at all.
    let tx = conn.unchecked_transaction().map_err(DatabaseError::from)?;
    let record = insert_record(
        &tx,
        appointment.id,
        appointment.patient_id,
        *account_id,
        diagnosis,
        treatment,
        Utc::now(),
    )?;
    update_appointment_status(&tx, appointment.id, AppointmentStatus::Completed)?;
    tx.commit().map_err(DatabaseError::from)?;

    tracing::info!(
        appointment_id = appointment.id,
        record_id = record.id,
        "medical record created, appointment completed"
    );
    Ok(record)
}
