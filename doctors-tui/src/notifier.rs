use std::collections::VecDeque;

pub const SUCCESS_TITLE: &str = "Sucesso!";
pub const SUCCESS_MESSAGE: &str = "Operação realizada com sucesso.";
pub const DEFAULT_ERROR_TITLE: &str = "Oops...";
pub const DEFAULT_ERROR_MESSAGE: &str =
    "Houve um problema ao processar sua solicitação. Por favor, tente novamente.";

/// User-facing confirmations and alerts.
pub trait Notifier {
    fn announce_success(&mut self);

    /// Missing parts fall back to the generic error title and message.
    fn announce_error(&mut self, title: Option<&str>, message: Option<&str>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

/// Dialogs waiting to be acknowledged, oldest first.
///
/// While any dialog is pending the UI shows only the front one and routes
/// every key to it.
#[derive(Debug, Default)]
pub struct DialogQueue {
    pending: VecDeque<Dialog>,
}

impl DialogQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Dialog> {
        self.pending.front()
    }

    pub fn is_blocking(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn dismiss(&mut self) -> Option<Dialog> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    fn push(&mut self, kind: DialogKind, title: &str, message: &str) {
        self.pending.push_back(Dialog {
            kind,
            title: title.to_string(),
            message: message.to_string(),
        });
    }
}

impl Notifier for DialogQueue {
    fn announce_success(&mut self) {
        self.push(DialogKind::Success, SUCCESS_TITLE, SUCCESS_MESSAGE);
    }

    fn announce_error(&mut self, title: Option<&str>, message: Option<&str>) {
        self.push(
            DialogKind::Error,
            title.unwrap_or(DEFAULT_ERROR_TITLE),
            message.unwrap_or(DEFAULT_ERROR_MESSAGE),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_defaults_fill_missing_parts() {
        let mut dialogs = DialogQueue::new();
        dialogs.announce_error(None, Some("Nome em uso"));

        let dialog = dialogs.current().unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert_eq!(dialog.title, DEFAULT_ERROR_TITLE);
        assert_eq!(dialog.message, "Nome em uso");
    }

    #[test]
    fn dialogs_are_shown_in_order() {
        let mut dialogs = DialogQueue::new();
        dialogs.announce_error(None, None);
        dialogs.announce_success();
        assert_eq!(dialogs.len(), 2);

        assert_eq!(dialogs.dismiss().unwrap().message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(dialogs.current().unwrap().kind, DialogKind::Success);
        dialogs.dismiss();
        assert!(!dialogs.is_blocking());
    }
}
