use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use crate::repository::{DoctorsApiError, DoctorsRepository, Result};
use crate::{DoctorId, DoctorPayload, DoctorRecord, TimeOfDay};

/// A request as it would have been issued against the API.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    List,
    FetchById(DoctorId),
    FindByName(String),
    Create(DoctorPayload),
    Update(DoctorId, DoctorPayload),
}

impl RemoteCall {
    pub fn kind(&self) -> CallKind {
        match self {
            RemoteCall::List => CallKind::List,
            RemoteCall::FetchById(_) => CallKind::FetchById,
            RemoteCall::FindByName(_) => CallKind::FindByName,
            RemoteCall::Create(_) => CallKind::Create,
            RemoteCall::Update(_, _) => CallKind::Update,
        }
    }

    pub fn is_write(&self) -> bool {
        matches!(self, RemoteCall::Create(_) | RemoteCall::Update(_, _))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    List,
    FetchById,
    FindByName,
    Create,
    Update,
}

#[derive(Debug, Default)]
struct Store {
    records: Vec<DoctorRecord>,
    next_id: i64,
    calls: Vec<RemoteCall>,
    failing: HashSet<CallKind>,
    rejecting: HashSet<CallKind>,
    stalling: HashSet<CallKind>,
}

/// In-memory [`DoctorsRepository`] used by dev mode and tests.
///
/// Every call is recorded, and individual call kinds can be made to fail
/// at the transport level, to answer with `status: false`, or to never
/// answer at all.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDoctors {
    store: Arc<Mutex<Store>>,
}

impl InMemoryDoctors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-filled with a handful of doctors.
    pub fn seeded() -> Self {
        let repo = Self::new();
        for (name, phone, check_in, check_out) in [
            ("Ana Souza", "11999990000", (8, 0), (17, 0)),
            ("Bruno Lima", "11988887777", (7, 30), (13, 30)),
            ("Carla Mendes", "21977776666", (13, 0), (19, 0)),
            ("Diego Ferreira", "31966665555", (19, 0), (23, 30)),
        ] {
            repo.insert(DoctorPayload {
                name: name.to_string(),
                phone: phone.to_string(),
                check_in: seed_time(check_in),
                check_out: seed_time(check_out),
            });
        }
        repo
    }

    /// Add a record directly, bypassing call recording.
    pub fn insert(&self, payload: DoctorPayload) -> DoctorId {
        let mut store = self.lock();
        store.next_id += 1;
        let id = DoctorId::from_raw(store.next_id).expect("ids start at 1");
        store.records.push(payload.into_record(Some(id)));
        id
    }

    pub fn with_failure(self, kind: CallKind) -> Self {
        self.lock().failing.insert(kind);
        self
    }

    pub fn with_rejection(self, kind: CallKind) -> Self {
        self.lock().rejecting.insert(kind);
        self
    }

    /// Calls of `kind` are recorded and then never complete.
    pub fn with_stall(self, kind: CallKind) -> Self {
        self.lock().stalling.insert(kind);
        self
    }

    pub fn records(&self) -> Vec<DoctorRecord> {
        self.lock().records.clone()
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.lock().calls.clone()
    }

    pub fn count(&self, kind: CallKind) -> usize {
        self.lock().calls.iter().filter(|c| c.kind() == kind).count()
    }

    pub fn writes(&self) -> usize {
        self.lock().calls.iter().filter(|c| c.is_write()).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records `call` and reports whether it should fail or be rejected.
    async fn record(&self, call: RemoteCall) -> Result<bool> {
        let kind = call.kind();
        let stalled = {
            let mut store = self.lock();
            store.calls.push(call);
            store.stalling.contains(&kind)
        };
        if stalled {
            std::future::pending::<()>().await;
        }

        let store = self.lock();
        if store.failing.contains(&kind) {
            return Err(DoctorsApiError::ResponseError(format!(
                "simulated failure for {:?}",
                kind
            )));
        }
        Ok(!store.rejecting.contains(&kind))
    }
}

fn seed_time((hour, minute): (u8, u8)) -> TimeOfDay {
    TimeOfDay::new(hour, minute).expect("seed times are valid")
}

#[async_trait]
impl DoctorsRepository for InMemoryDoctors {
    async fn list(&self) -> Result<Option<Vec<DoctorRecord>>> {
        if !self.record(RemoteCall::List).await? {
            return Ok(None);
        }
        Ok(Some(self.records()))
    }

    async fn fetch_by_id(&self, id: DoctorId) -> Result<Option<DoctorRecord>> {
        if !self.record(RemoteCall::FetchById(id)).await? {
            return Ok(None);
        }
        Ok(self
            .lock()
            .records
            .iter()
            .find(|r| r.id == Some(id))
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Vec<DoctorRecord>>> {
        if !self.record(RemoteCall::FindByName(name.to_string())).await? {
            return Ok(None);
        }
        Ok(Some(
            self.lock()
                .records
                .iter()
                .filter(|r| r.name == name)
                .cloned()
                .collect(),
        ))
    }

    async fn create_record(&self, payload: &DoctorPayload) -> Result<()> {
        if self.record(RemoteCall::Create(payload.clone())).await? {
            self.insert(payload.clone());
        }
        Ok(())
    }

    async fn update_record(&self, id: DoctorId, payload: &DoctorPayload) -> Result<()> {
        if !self.record(RemoteCall::Update(id, payload.clone())).await? {
            return Ok(());
        }
        let mut store = self.lock();
        match store.records.iter_mut().find(|r| r.id == Some(id)) {
            Some(record) => {
                *record = payload.clone().into_record(Some(id));
                Ok(())
            }
            None => Err(DoctorsApiError::ResponseError(format!(
                "PUT /doctors/{id} returned error: 404 Not Found"
            ))),
        }
    }
}
