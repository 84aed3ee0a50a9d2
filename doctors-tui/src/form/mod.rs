use doctors_api::{DoctorId, DoctorPayload, DoctorRecord, DoctorsRepository, TimeOfDay};

use crate::notifier::Notifier;

mod fields;
pub mod validator;

pub use fields::{TextInput, TimeInput};

pub const LOAD_FAILED_MESSAGE: &str =
    "Houve um problema ao trazer as informações deste médico. Por favor, tente novamente.";

/// What the form needs from whoever displays it.
pub trait FormHost {
    /// The doctor list should be fetched again.
    fn reload_list(&mut self);
    /// Forget the identifier the form was opened with.
    fn clear_id(&mut self);
    fn set_show_modal(&mut self, show: bool);
}

/// Where the form is in its load/save cycle. Only `Idle` accepts a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Loading,
    Validating,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(DoctorId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Phone,
    CheckIn,
    CheckOut,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Phone,
            FormField::Phone => FormField::CheckIn,
            FormField::CheckIn => FormField::CheckOut,
            FormField::CheckOut => FormField::Name,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::CheckOut,
            FormField::Phone => FormField::Name,
            FormField::CheckIn => FormField::Phone,
            FormField::CheckOut => FormField::CheckIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved,
    /// A validation gate failed; the form keeps its values.
    Rejected,
    /// The save request itself failed.
    Failed,
    /// Another load or save is still running.
    Busy,
}

/// The create/edit form for a single doctor.
#[derive(Debug, Clone)]
pub struct DoctorForm {
    mode: FormMode,
    pub name: TextInput,
    pub phone: TextInput,
    pub check_in: TimeInput,
    pub check_out: TimeInput,
    pub focused_field: FormField,
    /// Last name known to be taken by this very record.
    name_snapshot: Option<String>,
    phase: FormPhase,
}

impl Default for DoctorForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorForm {
    pub fn new() -> Self {
        let now = TimeOfDay::now();
        Self {
            mode: FormMode::Create,
            name: TextInput::new(),
            phone: TextInput::new(),
            check_in: TimeInput::from_time(now),
            check_out: TimeInput::from_time(now),
            focused_field: FormField::Name,
            name_snapshot: None,
            phase: FormPhase::Idle,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase != FormPhase::Idle
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Edit(_) => "Editar médico",
            FormMode::Create => "Cadastrar médico",
        }
    }

    /// Loads the doctor behind `id`, or starts a blank form when there is none.
    pub async fn on_identifier_change(
        &mut self,
        id: Option<DoctorId>,
        repo: &dyn DoctorsRepository,
        notifier: &mut dyn Notifier,
        host: &mut dyn FormHost,
    ) {
        match id {
            Some(id) => {
                self.begin_load(id);
                self.load(id, repo, notifier).await;
            }
            None => self.clear_fields(host),
        }
    }

    /// Switches to edit mode and marks the form as loading, so the caller
    /// can redraw before the fetch starts.
    pub fn begin_load(&mut self, id: DoctorId) {
        self.mode = FormMode::Edit(id);
        self.focused_field = FormField::Name;
        self.phase = FormPhase::Loading;
    }

    pub async fn load(
        &mut self,
        id: DoctorId,
        repo: &dyn DoctorsRepository,
        notifier: &mut dyn Notifier,
    ) {
        self.phase = FormPhase::Loading;

        match repo.fetch_by_id(id).await {
            Ok(Some(record)) => self.populate(record),
            Ok(None) => tracing::warn!(%id, "doctor lookup answered with status false"),
            Err(e) => {
                tracing::error!(%id, error = %e, "failed to load doctor");
                notifier.announce_error(None, Some(LOAD_FAILED_MESSAGE));
            }
        }

        self.phase = FormPhase::Idle;
    }

    /// Validates and saves. Success resets the form, asks the host to reload
    /// its list and closes the modal.
    pub async fn submit(
        &mut self,
        repo: &dyn DoctorsRepository,
        notifier: &mut dyn Notifier,
        host: &mut dyn FormHost,
    ) -> SubmitOutcome {
        if !self.begin_submit() {
            return SubmitOutcome::Busy;
        }
        self.finish_submit(repo, notifier, host).await
    }

    /// Claims the form for a submission. Fails while another load or save
    /// is running.
    pub fn begin_submit(&mut self) -> bool {
        if self.is_busy() {
            tracing::warn!(phase = ?self.phase, "submit ignored while form is busy");
            return false;
        }
        self.phase = FormPhase::Validating;
        true
    }

    /// Runs a submission claimed with [`DoctorForm::begin_submit`].
    pub async fn finish_submit(
        &mut self,
        repo: &dyn DoctorsRepository,
        notifier: &mut dyn Notifier,
        host: &mut dyn FormHost,
    ) -> SubmitOutcome {
        let outcome = self.validate_and_save(repo, notifier, host).await;
        self.phase = FormPhase::Idle;
        outcome
    }

    async fn validate_and_save(
        &mut self,
        repo: &dyn DoctorsRepository,
        notifier: &mut dyn Notifier,
        host: &mut dyn FormHost,
    ) -> SubmitOutcome {
        let Some(schedule) = validator::check_required(
            &self.name.value,
            &self.phone.value,
            self.check_in.as_str(),
            self.check_out.as_str(),
            notifier,
        ) else {
            return SubmitOutcome::Rejected;
        };

        if !validator::check_name_unique(
            &self.name.value,
            self.name_snapshot.as_deref(),
            repo,
            notifier,
        )
        .await
        {
            return SubmitOutcome::Rejected;
        }

        if !validator::check_time_order(schedule, notifier) {
            return SubmitOutcome::Rejected;
        }

        self.phase = FormPhase::Submitting;
        let payload = DoctorPayload {
            name: self.name.value.clone(),
            phone: self.phone.value.clone(),
            check_in: schedule.check_in,
            check_out: schedule.check_out,
        };

        let result = match self.mode {
            FormMode::Edit(id) => repo.update_record(id, &payload).await,
            FormMode::Create => repo.create_record(&payload).await,
        };

        match result {
            Ok(()) => {
                tracing::info!(mode = ?self.mode, name = %payload.name, "doctor saved");
                notifier.announce_success();
                self.clear_fields(host);
                host.reload_list();
                self.close(host);
                SubmitOutcome::Saved
            }
            Err(e) => {
                tracing::error!(mode = ?self.mode, error = %e, "failed to save doctor");
                notifier.announce_error(None, None);
                SubmitOutcome::Failed
            }
        }
    }

    /// Hides the form. Field values are kept.
    pub fn close(&self, host: &mut dyn FormHost) {
        host.set_show_modal(false);
    }

    /// Blank name and phone, both times set to now, no snapshot.
    pub fn clear_fields(&mut self, host: &mut dyn FormHost) {
        let now = TimeOfDay::now();
        self.mode = FormMode::Create;
        self.name.clear();
        self.phone.clear();
        self.check_in.set(now);
        self.check_out.set(now);
        self.name_snapshot = None;
        self.focused_field = FormField::Name;
        host.clear_id();
    }

    fn populate(&mut self, record: DoctorRecord) {
        self.name = TextInput::from_str(&record.name);
        self.phone = TextInput::from_str(&record.phone);
        self.check_in.set(record.check_in);
        self.check_out.set(record.check_out);
        self.name_snapshot = Some(record.name);
    }

    pub fn next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    pub fn prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    pub fn input_char(&mut self, c: char) {
        match self.focused_field {
            FormField::Name => self.name.insert(c),
            FormField::Phone if c.is_ascii_digit() => self.phone.insert(c),
            FormField::Phone => {}
            FormField::CheckIn => self.check_in.input_char(c),
            FormField::CheckOut => self.check_out.input_char(c),
        }
    }

    pub fn backspace(&mut self) {
        match self.focused_field {
            FormField::Name => self.name.backspace(),
            FormField::Phone => self.phone.backspace(),
            FormField::CheckIn => self.check_in.backspace(),
            FormField::CheckOut => self.check_out.backspace(),
        }
    }

    pub fn move_left(&mut self) {
        match self.focused_field {
            FormField::Name => self.name.move_left(),
            FormField::Phone => self.phone.move_left(),
            FormField::CheckIn | FormField::CheckOut => {}
        }
    }

    pub fn move_right(&mut self) {
        match self.focused_field {
            FormField::Name => self.name.move_right(),
            FormField::Phone => self.phone.move_right(),
            FormField::CheckIn | FormField::CheckOut => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::{DialogKind, DialogQueue, DEFAULT_ERROR_MESSAGE, SUCCESS_MESSAGE};
    use doctors_api::{CallKind, InMemoryDoctors, RemoteCall};

    #[derive(Debug, Default)]
    struct RecordingHost {
        reloads: usize,
        cleared_ids: usize,
        visibility: Vec<bool>,
    }

    impl FormHost for RecordingHost {
        fn reload_list(&mut self) {
            self.reloads += 1;
        }

        fn clear_id(&mut self) {
            self.cleared_ids += 1;
        }

        fn set_show_modal(&mut self, show: bool) {
            self.visibility.push(show);
        }
    }

    fn ana() -> DoctorPayload {
        DoctorPayload {
            name: "Ana".to_string(),
            phone: "119999".to_string(),
            check_in: "08:00".parse().unwrap(),
            check_out: "17:00".parse().unwrap(),
        }
    }

    fn fill(form: &mut DoctorForm, name: &str, phone: &str, check_in: &str, check_out: &str) {
        form.name = TextInput::from_str(name);
        form.phone = TextInput::from_str(phone);
        form.check_in.set(check_in.parse().unwrap());
        form.check_out.set(check_out.parse().unwrap());
    }

    async fn open(
        id: Option<DoctorId>,
        repo: &InMemoryDoctors,
        dialogs: &mut DialogQueue,
        host: &mut RecordingHost,
    ) -> DoctorForm {
        let mut form = DoctorForm::new();
        form.on_identifier_change(id, repo, dialogs, host).await;
        form
    }

    #[tokio::test]
    async fn no_identifier_resets_to_blank_fields() {
        let repo = InMemoryDoctors::new();
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = DoctorForm::new();
        fill(&mut form, "Old", "1", "01:00", "02:00");

        let before = TimeOfDay::now();
        form.on_identifier_change(None, &repo, &mut dialogs, &mut host)
            .await;
        let after = TimeOfDay::now();

        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.name.value, "");
        assert_eq!(form.phone.value, "");
        let check_in = form.check_in.parse().unwrap();
        assert!(before <= check_in && check_in <= after);
        assert_eq!(form.check_in, form.check_out);
        assert_eq!(form.name_snapshot.as_deref(), None);
        assert_eq!(host.cleared_ids, 1);
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn zero_identifier_is_create_mode() {
        let repo = InMemoryDoctors::seeded();
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(DoctorId::from_raw(1), &repo, &mut dialogs, &mut host).await;
        assert_eq!(form.name.value, "Ana Souza");
        repo.clear_calls();

        form.on_identifier_change(DoctorId::from_raw(0), &repo, &mut dialogs, &mut host)
            .await;

        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.title(), "Cadastrar médico");
        assert_eq!(form.name.value, "");
        assert_eq!(form.phone.value, "");
        assert_eq!(form.check_in, form.check_out);
        assert_eq!(form.name_snapshot.as_deref(), None);
        assert_eq!(host.cleared_ids, 1);
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn positive_identifier_populates_fields() {
        let repo = InMemoryDoctors::new();
        let id = repo.insert(ana());
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();

        let form = open(Some(id), &repo, &mut dialogs, &mut host).await;

        assert_eq!(form.mode(), FormMode::Edit(id));
        assert_eq!(form.title(), "Editar médico");
        assert_eq!(form.name.value, "Ana");
        assert_eq!(form.phone.value, "119999");
        assert_eq!(form.check_in.as_str(), "08:00");
        assert_eq!(form.check_out.as_str(), "17:00");
        assert_eq!(form.name_snapshot.as_deref(), Some("Ana"));
        assert_eq!(form.phase(), FormPhase::Idle);
        assert!(!dialogs.is_blocking());
    }

    #[tokio::test]
    async fn failed_load_shows_error_and_returns_to_idle() {
        let repo = InMemoryDoctors::new().with_failure(CallKind::FetchById);
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();

        let form = open(DoctorId::from_raw(3), &repo, &mut dialogs, &mut host).await;

        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(dialogs.current().unwrap().message, LOAD_FAILED_MESSAGE);
        assert_eq!(repo.count(CallKind::FetchById), 1);
    }

    #[tokio::test]
    async fn rejected_load_leaves_fields_untouched() {
        let repo = InMemoryDoctors::new().with_rejection(CallKind::FetchById);
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();

        let form = open(DoctorId::from_raw(3), &repo, &mut dialogs, &mut host).await;

        assert_eq!(form.name.value, "");
        assert!(!dialogs.is_blocking());
    }

    #[tokio::test]
    async fn unchanged_name_saves_without_lookup() {
        let repo = InMemoryDoctors::new();
        let id = repo.insert(ana());
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(Some(id), &repo, &mut dialogs, &mut host).await;
        form.phone = TextInput::from_str("110000");
        repo.clear_calls();

        let outcome = form.submit(&repo, &mut dialogs, &mut host).await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(repo.count(CallKind::FindByName), 0);
        assert_eq!(
            repo.calls(),
            vec![RemoteCall::Update(
                id,
                DoctorPayload {
                    phone: "110000".to_string(),
                    ..ana()
                }
            )]
        );
    }

    #[tokio::test]
    async fn taken_name_blocks_submission() {
        let repo = InMemoryDoctors::new();
        let id = repo.insert(ana());
        repo.insert(DoctorPayload {
            name: "Bia".to_string(),
            ..ana()
        });
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(Some(id), &repo, &mut dialogs, &mut host).await;
        form.name = TextInput::from_str("Bia");

        let outcome = form.submit(&repo, &mut dialogs, &mut host).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(repo.writes(), 0);
        assert_eq!(host.reloads, 0);
        assert!(host.visibility.is_empty());
        assert_eq!(form.name.value, "Bia");
        assert_eq!(
            dialogs.current().unwrap().message,
            validator::NAME_TAKEN_MESSAGE
        );
    }

    #[tokio::test]
    async fn time_order_is_checked_after_name() {
        let repo = InMemoryDoctors::new();
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(None, &repo, &mut dialogs, &mut host).await;
        fill(&mut form, "Carlos", "1", "12:00", "09:00");

        let outcome = form.submit(&repo, &mut dialogs, &mut host).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(repo.calls(), vec![RemoteCall::FindByName("Carlos".to_string())]);
        assert_eq!(
            dialogs.current().unwrap().message,
            validator::TIME_ORDER_MESSAGE
        );
    }

    #[tokio::test]
    async fn blank_fields_never_reach_the_network() {
        let repo = InMemoryDoctors::new();
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(None, &repo, &mut dialogs, &mut host).await;

        let outcome = form.submit(&repo, &mut dialogs, &mut host).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn create_flow_posts_and_closes() {
        let repo = InMemoryDoctors::new();
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(None, &repo, &mut dialogs, &mut host).await;
        assert_eq!(form.title(), "Cadastrar médico");
        fill(&mut form, "Carlos", "1122223333", "09:00", "12:00");

        let outcome = form.submit(&repo, &mut dialogs, &mut host).await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(
            repo.calls(),
            vec![
                RemoteCall::FindByName("Carlos".to_string()),
                RemoteCall::Create(DoctorPayload {
                    name: "Carlos".to_string(),
                    phone: "1122223333".to_string(),
                    check_in: "09:00".parse().unwrap(),
                    check_out: "12:00".parse().unwrap(),
                }),
            ]
        );
        let dialog = dialogs.current().unwrap();
        assert_eq!(dialog.kind, DialogKind::Success);
        assert_eq!(dialog.message, SUCCESS_MESSAGE);
        assert_eq!(host.reloads, 1);
        assert_eq!(host.visibility, vec![false]);
        assert_eq!(form.name.value, "");
        assert_eq!(form.phone.value, "");
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[tokio::test]
    async fn successful_edit_resets_to_create_mode() {
        let repo = InMemoryDoctors::new();
        let id = repo.insert(ana());
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(Some(id), &repo, &mut dialogs, &mut host).await;

        let outcome = form.submit(&repo, &mut dialogs, &mut host).await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert_eq!(form.mode(), FormMode::Create);
        assert_eq!(form.name_snapshot.as_deref(), None);
        assert_eq!(host.cleared_ids, 1);
        assert_eq!(host.reloads, 1);
        assert_eq!(host.visibility, vec![false]);
    }

    #[tokio::test]
    async fn failed_save_keeps_form_open() {
        let repo = InMemoryDoctors::new().with_failure(CallKind::Create);
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(None, &repo, &mut dialogs, &mut host).await;
        fill(&mut form, "Carlos", "1", "09:00", "12:00");

        let outcome = form.submit(&repo, &mut dialogs, &mut host).await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(dialogs.current().unwrap().message, DEFAULT_ERROR_MESSAGE);
        assert_eq!(host.reloads, 0);
        assert!(host.visibility.is_empty());
        assert_eq!(form.name.value, "Carlos");
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[tokio::test]
    async fn submit_while_busy_is_refused() {
        let repo = InMemoryDoctors::new();
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(None, &repo, &mut dialogs, &mut host).await;
        fill(&mut form, "Carlos", "1", "09:00", "12:00");
        form.phase = FormPhase::Submitting;

        let outcome = form.submit(&repo, &mut dialogs, &mut host).await;

        assert_eq!(outcome, SubmitOutcome::Busy);
        assert!(repo.calls().is_empty());
        assert!(!dialogs.is_blocking());
    }

    #[tokio::test]
    async fn phase_stays_loading_while_fetch_is_pending() {
        let repo = InMemoryDoctors::seeded().with_stall(CallKind::FetchById);
        let mut dialogs = DialogQueue::new();
        let mut form = DoctorForm::new();
        let id = DoctorId::from_raw(2).unwrap();

        form.begin_load(id);
        assert_eq!(form.phase(), FormPhase::Loading);
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            form.load(id, &repo, &mut dialogs),
        )
        .await;

        assert!(pending.is_err());
        assert_eq!(form.phase(), FormPhase::Loading);
        assert!(form.is_busy());
        assert_eq!(repo.count(CallKind::FetchById), 1);
    }

    #[tokio::test]
    async fn phase_reflects_pending_name_lookup_and_blocks_resubmit() {
        let repo = InMemoryDoctors::new().with_stall(CallKind::FindByName);
        let mut dialogs = DialogQueue::new();
        let mut host = RecordingHost::default();
        let mut form = open(None, &repo, &mut dialogs, &mut host).await;
        fill(&mut form, "Carlos", "1122223333", "09:00", "12:00");

        assert!(form.begin_submit());
        assert_eq!(form.phase(), FormPhase::Validating);
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            form.finish_submit(&repo, &mut dialogs, &mut host),
        )
        .await;

        assert!(pending.is_err());
        assert_eq!(form.phase(), FormPhase::Validating);
        assert!(!form.begin_submit());
        let outcome = form.submit(&repo, &mut dialogs, &mut host).await;
        assert_eq!(outcome, SubmitOutcome::Busy);
        assert_eq!(repo.count(CallKind::FindByName), 1);
        assert_eq!(repo.writes(), 0);
    }

    #[test]
    fn phone_accepts_digits_only() {
        let mut form = DoctorForm::new();
        form.focused_field = FormField::Phone;
        for c in "(11) 9-8".chars() {
            form.input_char(c);
        }
        assert_eq!(form.phone.value, "1198");
    }

    #[test]
    fn field_focus_wraps_around() {
        let mut form = DoctorForm::new();
        form.prev_field();
        assert_eq!(form.focused_field, FormField::CheckOut);
        form.next_field();
        form.next_field();
        assert_eq!(form.focused_field, FormField::Phone);
    }
}
