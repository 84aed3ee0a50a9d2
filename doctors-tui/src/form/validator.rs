use doctors_api::{DoctorsRepository, TimeOfDay};

use crate::notifier::Notifier;

pub const REQUIRED_FIELDS_MESSAGE: &str = "Preencha todos os campos antes de salvar.";
pub const INVALID_TIME_MESSAGE: &str = "Informe os horários no formato HH:mm.";
pub const TIME_ORDER_MESSAGE: &str = "O horário de entrada deve ser menor que o horário de saída.";
pub const NAME_TAKEN_MESSAGE: &str = "Este nome já está sendo utilizado. Por favor, use outro nome.";

/// Values the required check hands on to the remaining gates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Schedule {
    pub check_in: TimeOfDay,
    pub check_out: TimeOfDay,
}

/// Every field is filled in and both times parse.
pub fn check_required(
    name: &str,
    phone: &str,
    check_in: &str,
    check_out: &str,
    notifier: &mut dyn Notifier,
) -> Option<Schedule> {
    if [name, phone, check_in, check_out]
        .iter()
        .any(|value| value.trim().is_empty())
    {
        notifier.announce_error(None, Some(REQUIRED_FIELDS_MESSAGE));
        return None;
    }

    match (check_in.parse::<TimeOfDay>(), check_out.parse::<TimeOfDay>()) {
        (Ok(check_in), Ok(check_out)) => Some(Schedule {
            check_in,
            check_out,
        }),
        _ => {
            notifier.announce_error(None, Some(INVALID_TIME_MESSAGE));
            None
        }
    }
}

/// Check-in must come strictly before check-out.
pub fn check_time_order(schedule: Schedule, notifier: &mut dyn Notifier) -> bool {
    if schedule.check_in >= schedule.check_out {
        notifier.announce_error(None, Some(TIME_ORDER_MESSAGE));
        return false;
    }
    true
}

/// No other doctor uses `name`.
///
/// Skips the lookup when `name` equals the snapshot taken at load time. A
/// failed lookup blocks the submission.
pub async fn check_name_unique(
    name: &str,
    snapshot: Option<&str>,
    repo: &dyn DoctorsRepository,
    notifier: &mut dyn Notifier,
) -> bool {
    if snapshot == Some(name) {
        return true;
    }

    match repo.find_by_name(name).await {
        Ok(Some(matches)) if !matches.is_empty() => {
            tracing::info!(name, count = matches.len(), "doctor name already in use");
            notifier.announce_error(None, Some(NAME_TAKEN_MESSAGE));
            false
        }
        Ok(_) => true,
        Err(e) => {
            tracing::error!(name, error = %e, "failed to check doctor name");
            notifier.announce_error(None, None);
            false
        }
    }
}
