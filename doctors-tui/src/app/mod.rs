use crate::config::DoctorsConfig;
use crate::form::{DoctorForm, FormHost, TextInput};
use crate::notifier::DialogQueue;
use doctors_api::{DoctorId, DoctorRecord};

mod list;

/// Modal visibility and the identifier the form was opened with.
///
/// Owned by [`App`] next to the form so both can be borrowed at once.
#[derive(Debug, Default)]
pub struct ModalHost {
    pub show_modal: bool,
    pub selected_id: Option<DoctorId>,
    reload_requested: bool,
}

impl ModalHost {
    /// Returns whether a reload was requested since the last call.
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }
}

impl FormHost for ModalHost {
    fn reload_list(&mut self) {
        self.reload_requested = true;
    }

    fn clear_id(&mut self) {
        self.selected_id = None;
    }

    fn set_show_modal(&mut self, show: bool) {
        self.show_modal = show;
    }
}

pub struct App {
    pub running: bool,
    pub status_message: Option<String>,
    pub api_label: String,

    // Doctor list
    pub doctors: Vec<DoctorRecord>,
    pub filtered_doctors: Vec<DoctorRecord>,
    pub selected_index: usize,
    pub search_input: TextInput,
    pub searching: bool,

    // Form modal
    pub form: DoctorForm,
    pub modal: ModalHost,
    pub dialogs: DialogQueue,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(cfg: &DoctorsConfig, dev_mode: bool) -> Self {
        let api_label = if dev_mode {
            "dev (in-memory)".to_string()
        } else {
            cfg.api_url.clone()
        };

        Self {
            running: true,
            status_message: None,
            api_label,
            doctors: Vec::new(),
            filtered_doctors: Vec::new(),
            selected_index: 0,
            search_input: TextInput::new(),
            searching: false,
            form: DoctorForm::new(),
            modal: ModalHost::default(),
            dialogs: DialogQueue::new(),
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Something is in flight: a list reload or a form load/save.
    pub fn is_busy(&self) -> bool {
        self.is_loading || self.form.is_busy()
    }

    /// Remember which doctor the form is about to show and reveal the modal.
    pub fn open_modal(&mut self, id: Option<DoctorId>) {
        self.modal.selected_id = id;
        self.modal.set_show_modal(true);
    }

    pub fn close_modal(&mut self) {
        self.form.close(&mut self.modal);
    }
}
