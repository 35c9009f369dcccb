use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use uuid::Uuid;

use crate::error::ConsoleError;
use crate::model::job::JobRef;
use crate::model::section::SectionRef;
use crate::model::worker::WorkerRecord;
use crate::payroll::overrides::OverrideStore;
use crate::payroll::screen::ScreenKind;

/// What one operator currently has open on one payroll screen.
#[derive(Debug, Default)]
pub struct ScreenState {
    pub section: Option<SectionRef>,
    /// "MONTH, YYYY" as picked by the operator.
    pub month_label: Option<String>,
    /// Bonus screen only.
    pub bonus_type: Option<String>,
    pub jobs: Vec<JobRef>,
    pub rows: Vec<WorkerRecord>,
    pub overrides: OverrideStore,
    pub last_error: Option<String>,
    busy: bool,
}

impl ScreenState {
    pub fn section_id(&self) -> Option<i64> {
        self.section.as_ref().and_then(|s| s.id)
    }

    pub fn section_name(&self) -> &str {
        self.section.as_ref().map(SectionRef::name).unwrap_or_default()
    }

    /// Store freshly fetched rows and seed overrides for any new worker.
    /// Existing overrides are kept.
    pub fn apply_rows(&mut self, kind: ScreenKind, rows: Vec<WorkerRecord>) {
        let seeded = self.overrides.seed(&rows, kind.editable_fields());
        tracing::debug!(%kind, seeded, "overrides seeded");
        self.rows = rows;
        self.last_error = None;
    }

    /// A failed list fetch leaves nothing on screen.
    pub fn clear_rows(&mut self, error: String) {
        self.rows.clear();
        self.last_error = Some(error);
    }
}

/// One operator's console session.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    screens: [Mutex<ScreenState>; 4],
}

impl Session {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            screens: Default::default(),
        }
    }

    /// Run `f` on the screen's state. The lock is released before this
    /// returns, so it is never held across an await.
    pub fn with_screen<R>(&self, kind: ScreenKind, f: impl FnOnce(&mut ScreenState) -> R) -> R {
        let mut state = self.screens[kind as usize]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Mark the screen busy for the lifetime of the returned guard. Fails
    /// while another save or refresh is running on it.
    pub fn begin(self: &Arc<Self>, kind: ScreenKind) -> Result<BusyGuard, ConsoleError> {
        self.with_screen(kind, |state| {
            if state.busy {
                return Err(ConsoleError::Busy(kind));
            }
            state.busy = true;
            Ok(())
        })?;

        Ok(BusyGuard {
            session: Arc::clone(self),
            kind,
        })
    }
}

pub struct BusyGuard {
    session: Arc<Session>,
    kind: ScreenKind,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.session.with_screen(self.kind, |state| state.busy = false);
    }
}

/// All live sessions, expiring `ttl` after creation.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<Session>>,
}

impl SessionStore {
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        Self {
            sessions: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    pub async fn create(&self) -> Arc<Session> {
        let session = Arc::new(Session::new());
        self.sessions.insert(session.id, Arc::clone(&session)).await;
        tracing::info!(session_id = %session.id, "console session opened");
        session
    }

    pub async fn get(&self, id: &Uuid) -> Option<Arc<Session>> {
        self.sessions.get(id).await
    }

    pub async fn remove(&self, id: &Uuid) -> bool {
        match self.sessions.remove(id).await {
            Some(session) => {
                tracing::info!(session_id = %id, opened_at = %session.created_at, "console session closed");
                true
            }
            None => false,
        }
    }
}
