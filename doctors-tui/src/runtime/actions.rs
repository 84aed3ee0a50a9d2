use crate::app::App;
use crate::form::SubmitOutcome;
use anyhow::Result;
use doctors_api::{DoctorId, DoctorsRepository};

use super::action_queue::Action;

/// Work an action has marked as in flight but not yet run.
enum Started {
    Load(DoctorId),
    Reset,
    Submit,
    Busy,
    Reload,
}

/// Runs `action`. `redraw` is called once the pending work shows in `app`
/// and before any remote call is awaited.
pub(super) async fn run_action<F>(
    action: Action,
    app: &mut App,
    repo: &dyn DoctorsRepository,
    mut redraw: F,
) -> Result<()>
where
    F: FnMut(&mut App) -> Result<()>,
{
    let started = begin_action(action, app);
    redraw(app)?;
    finish_action(started, app, repo).await;

    if app.modal.take_reload_request() {
        app.is_loading = true;
        redraw(app)?;
        reload_list(app, repo).await;
    }
    Ok(())
}

fn begin_action(action: Action, app: &mut App) -> Started {
    match action {
        Action::OpenForm { id } => {
            app.open_modal(id);
            match id {
                Some(id) => {
                    app.form.begin_load(id);
                    Started::Load(id)
                }
                None => Started::Reset,
            }
        }
        Action::SubmitForm => {
            if app.form.begin_submit() {
                Started::Submit
            } else {
                Started::Busy
            }
        }
        Action::ReloadList => {
            app.is_loading = true;
            Started::Reload
        }
    }
}

async fn finish_action(started: Started, app: &mut App, repo: &dyn DoctorsRepository) {
    match started {
        Started::Load(id) => app.form.load(id, repo, &mut app.dialogs).await,
        Started::Reset => {
            app.form
                .on_identifier_change(None, repo, &mut app.dialogs, &mut app.modal)
                .await
        }
        Started::Submit => {
            let outcome = app
                .form
                .finish_submit(repo, &mut app.dialogs, &mut app.modal)
                .await;
            report_submit(app, outcome);
        }
        Started::Busy => {
            // Refused by the phase check; nothing is sent.
            let outcome = app
                .form
                .submit(repo, &mut app.dialogs, &mut app.modal)
                .await;
            report_submit(app, outcome);
        }
        Started::Reload => reload_list(app, repo).await,
    }
}

fn report_submit(app: &mut App, outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Saved => app.set_status("Médico salvo".to_string()),
        SubmitOutcome::Busy => app.set_status("Aguarde a operação em andamento".to_string()),
        SubmitOutcome::Rejected | SubmitOutcome::Failed => {}
    }
}

/// Fetch the doctor list. Failures only touch the status line.
pub(crate) async fn reload_list(app: &mut App, repo: &dyn DoctorsRepository) {
    app.is_loading = true;

    match repo.list().await {
        Ok(Some(doctors)) => {
            tracing::debug!(count = doctors.len(), "doctor list loaded");
            app.set_doctors(doctors);
        }
        Ok(None) => {
            tracing::warn!("doctor list answered with status false");
            app.set_status("A API não retornou a lista de médicos".to_string());
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load doctor list");
            app.set_status(format!("Erro ao carregar médicos: {}", e));
        }
    }

    app.is_loading = false;
}
