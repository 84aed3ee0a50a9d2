use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod doctor_form;
mod doctor_list;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // An open dialog swallows every key until acknowledged.
    if app.dialogs.is_blocking() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dialogs.dismiss();
        }
        return;
    }

    if app.modal.show_modal {
        doctor_form::handle_form_key(key, app, action_tx);
    } else {
        doctor_list::handle_list_key(key, app, action_tx);
    }
}
