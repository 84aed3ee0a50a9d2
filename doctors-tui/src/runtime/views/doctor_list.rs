use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.searching {
        handle_search_key(key, app);
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('n') => {
            app.clear_status();
            enqueue_action(action_tx, Action::OpenForm { id: None });
        }
        KeyCode::Enter | KeyCode::Char('e') => {
            if let Some(id) = app.selected_doctor().and_then(|d| d.id) {
                app.clear_status();
                enqueue_action(action_tx, Action::OpenForm { id: Some(id) });
            }
        }
        KeyCode::Char('r') => enqueue_action(action_tx, Action::ReloadList),
        _ => {}
    }
}

fn handle_search_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input_clear();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input_char(c);
        }
        KeyCode::Backspace => app.search_input_backspace(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => app.stop_search(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DoctorsConfig;
    use doctors_api::{DoctorId, DoctorRecord};

    use super::super::super::action_queue::channel;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        let mut app = App::new(&DoctorsConfig::default(), true);
        app.set_doctors(vec![DoctorRecord {
            id: DoctorId::from_raw(7),
            name: "Ana".to_string(),
            phone: "1".to_string(),
            check_in: "08:00".parse().unwrap(),
            check_out: "17:00".parse().unwrap(),
        }]);
        app
    }

    #[test]
    fn n_opens_blank_form() {
        let mut app = test_app();
        let (tx, mut rx) = channel();

        handle_list_key(key(KeyCode::Char('n')), &mut app, &tx);

        assert_eq!(rx.try_recv().ok(), Some(Action::OpenForm { id: None }));
    }

    #[test]
    fn enter_opens_selected_doctor() {
        let mut app = test_app();
        let (tx, mut rx) = channel();

        handle_list_key(key(KeyCode::Enter), &mut app, &tx);

        assert_eq!(
            rx.try_recv().ok(),
            Some(Action::OpenForm {
                id: DoctorId::from_raw(7)
            })
        );
    }

    #[test]
    fn search_mode_captures_letters() {
        let mut app = test_app();
        let (tx, mut rx) = channel();

        handle_list_key(key(KeyCode::Char('/')), &mut app, &tx);
        handle_list_key(key(KeyCode::Char('n')), &mut app, &tx);
        handle_list_key(key(KeyCode::Char('q')), &mut app, &tx);

        assert!(app.running);
        assert_eq!(app.search_input.value, "nq");
        assert!(rx.try_recv().is_err());

        handle_list_key(key(KeyCode::Esc), &mut app, &tx);
        assert!(!app.searching);
    }
}
