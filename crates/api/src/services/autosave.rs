//! Draft store and autosave scheduling.
//!
//! Each open draft is edited through a [`DraftEditor`]: an in-memory buffer
//! of the latest form state plus an [`AutosaveScheduler`] that persists it.
//! Two triggers exist: a tab change flushes immediately, and a form
//! mutation arms a trailing-edge debounce timer. Writes for one draft are
//! strictly single-flight; a mutation arriving while a save is in flight
//! coalesces into the latest payload instead of issuing a second request,
//! so the draft row never sees interleaved partial writes. Saves for
//! different drafts are independent.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::Notify;
use tracing::{debug, warn};
use uuid::Uuid;

use domain::models::draft::DraftState;
use domain::models::job_number::JobNumberSlot;
use domain::models::snapshot::FormSnapshot;
use persistence::repositories::{DraftInput, JobDraftRepository};

use crate::middleware::metrics::record_draft_saved;

/// A draft save that could not be completed.
#[derive(Debug, Clone, Error)]
#[error("draft save failed: {0}")]
pub struct SaveError(pub String);

/// Persistence seam for the autosave scheduler.
///
/// Production wraps [`JobDraftRepository`]; tests substitute an in-memory
/// recorder.
#[async_trait]
pub trait DraftSaver: Send + Sync + 'static {
    /// Inserts a new draft row, returning the store-generated identifier.
    async fn insert(&self, state: &DraftState) -> Result<Uuid, SaveError>;

    /// Updates an existing draft row in place.
    async fn update(&self, draft_id: Uuid, state: &DraftState) -> Result<(), SaveError>;
}

/// [`DraftSaver`] backed by the job_drafts table.
pub struct DbDraftSaver {
    drafts: JobDraftRepository,
}

impl DbDraftSaver {
    pub fn new(drafts: JobDraftRepository) -> Self {
        Self { drafts }
    }
}

fn draft_input(state: &DraftState) -> DraftInput {
    DraftInput {
        owner_id: state.owner_id,
        location_id: state.location_id,
        current_tab: state.current_tab.clone(),
        form_snapshot: state.form_snapshot.to_value(),
        job_number: state.job_number.as_ref().map(|slot| slot.to_string()),
        needs_reconciliation: state.needs_reconciliation,
    }
}

#[async_trait]
impl DraftSaver for DbDraftSaver {
    async fn insert(&self, state: &DraftState) -> Result<Uuid, SaveError> {
        let id = self
            .drafts
            .insert(&draft_input(state))
            .await
            .map_err(|err| SaveError(err.to_string()))?;
        record_draft_saved(true);
        Ok(id)
    }

    async fn update(&self, draft_id: Uuid, state: &DraftState) -> Result<(), SaveError> {
        let updated = self
            .drafts
            .update(draft_id, &draft_input(state))
            .await
            .map_err(|err| SaveError(err.to_string()))?;
        if !updated {
            return Err(SaveError(format!("draft {draft_id} no longer exists")));
        }
        record_draft_saved(false);
        Ok(())
    }
}

/// Observable persistence status of one scheduler.
#[derive(Debug, Clone, Copy)]
pub struct SaveStatus {
    pub draft_id: Option<Uuid>,
    pub last_saved_at: Option<DateTime<Utc>>,
    pub consecutive_failures: u32,
    pub save_in_flight: bool,
}

#[derive(Debug)]
struct SchedState {
    pending: Option<DraftState>,
    persisted_id: Option<Uuid>,
    in_flight: bool,
    alive: bool,
    last_saved_at: Option<DateTime<Utc>>,
    consecutive_failures: u32,
}

impl SchedState {
    fn new(persisted_id: Option<Uuid>) -> Self {
        Self {
            pending: None,
            persisted_id,
            in_flight: false,
            alive: true,
            last_saved_at: None,
            consecutive_failures: 0,
        }
    }
}

struct Inner {
    state: Mutex<SchedState>,
    settled: Notify,
    /// Debounce generation. Every `schedule` bumps it; a timer task
    /// re-checks its own generation after sleeping and exits when stale.
    /// Timer tasks are invalidated this way, never aborted, so a save
    /// request that is already in flight is always allowed to complete.
    timer_gen: AtomicU64,
}

/// Single-flight debounced persister for one draft.
///
/// Every `schedule` arms a fresh generation-stamped timer task and
/// invalidates the previous one, so only the trailing edge of a mutation
/// burst produces a write.
pub struct AutosaveScheduler {
    saver: Arc<dyn DraftSaver>,
    inner: Arc<Inner>,
    debounce: Duration,
}

impl AutosaveScheduler {
    pub fn new(saver: Arc<dyn DraftSaver>, debounce: Duration) -> Self {
        Self::with_persisted_id(saver, debounce, None)
    }

    /// Scheduler for a resumed draft that already has a persisted row.
    pub fn resumed(saver: Arc<dyn DraftSaver>, debounce: Duration, draft_id: Uuid) -> Self {
        Self::with_persisted_id(saver, debounce, Some(draft_id))
    }

    fn with_persisted_id(
        saver: Arc<dyn DraftSaver>,
        debounce: Duration,
        persisted_id: Option<Uuid>,
    ) -> Self {
        Self {
            saver,
            inner: Arc::new(Inner {
                state: Mutex::new(SchedState::new(persisted_id)),
                settled: Notify::new(),
                timer_gen: AtomicU64::new(0),
            }),
            debounce,
        }
    }

    pub fn status(&self) -> SaveStatus {
        let s = self.inner.state.lock().unwrap();
        SaveStatus {
            draft_id: s.persisted_id,
            last_saved_at: s.last_saved_at,
            consecutive_failures: s.consecutive_failures,
            save_in_flight: s.in_flight,
        }
    }

    pub fn draft_id(&self) -> Option<Uuid> {
        self.inner.state.lock().unwrap().persisted_id
    }

    /// Schedules a debounced write of the given payload.
    ///
    /// Re-arming extends the quiet period, so a burst of mutations
    /// coalesces into exactly one persisted write reflecting the latest
    /// state.
    pub fn schedule(&self, payload: DraftState) {
        {
            let mut s = self.inner.state.lock().unwrap();
            if !s.alive {
                return;
            }
            s.pending = Some(payload);
        }
        self.arm_timer();
    }

    fn arm_timer(&self) {
        let generation = self.inner.timer_gen.fetch_add(1, Ordering::SeqCst) + 1;
        let saver = Arc::clone(&self.saver);
        let inner = Arc::clone(&self.inner);
        let debounce = self.debounce;
        tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            if inner.timer_gen.load(Ordering::SeqCst) != generation {
                // A newer mutation re-armed the debounce; this tick is
                // stale and must not fire early.
                return;
            }
            drain(saver, inner).await;
        });
    }

    /// Invalidates any still-sleeping debounce timer. A timer that has
    /// already started draining is unaffected and runs to completion.
    fn disarm_timer(&self) {
        self.inner.timer_gen.fetch_add(1, Ordering::SeqCst);
    }

    /// Writes the given payload (or any still-pending one) immediately,
    /// waiting out any in-flight save first. Used for tab changes and
    /// finalization.
    pub async fn flush(&self, payload: Option<DraftState>) -> Result<Option<Uuid>, SaveError> {
        self.disarm_timer();
        if let Some(payload) = payload {
            let mut s = self.inner.state.lock().unwrap();
            if !s.alive {
                return Ok(s.persisted_id);
            }
            s.pending = Some(payload);
        }

        loop {
            // Wait for any in-flight save to settle before draining.
            loop {
                let settled = self.inner.settled.notified();
                if !self.inner.state.lock().unwrap().in_flight {
                    break;
                }
                settled.await;
            }

            drain(Arc::clone(&self.saver), Arc::clone(&self.inner)).await;

            let s = self.inner.state.lock().unwrap();
            if s.in_flight {
                // A concurrent timer won the race; wait for it too.
                continue;
            }
            if s.pending.is_some() && s.consecutive_failures > 0 {
                return Err(SaveError(format!(
                    "save failed ({} consecutive failure(s))",
                    s.consecutive_failures
                )));
            }
            return Ok(s.persisted_id);
        }
    }

    /// Tears the scheduler down. The debounce timer is invalidated and
    /// any in-flight request is left to complete or fail silently; its
    /// late result is discarded.
    pub fn cancel(&self) {
        self.disarm_timer();
        let mut s = self.inner.state.lock().unwrap();
        s.alive = false;
        s.pending = None;
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Drains pending payloads, one save at a time.
///
/// Skips the write entirely while the draft has no persisted row and the
/// payload fails the minimum-content predicate, so empty drafts are never
/// stored. On failure the payload is re-installed for the next debounce
/// tick instead of retrying in a loop.
async fn drain(saver: Arc<dyn DraftSaver>, inner: Arc<Inner>) {
    loop {
        let (payload, target) = {
            let mut s = inner.state.lock().unwrap();
            if !s.alive || s.in_flight {
                return;
            }
            let Some(payload) = s.pending.take() else {
                return;
            };
            if s.persisted_id.is_none() && !payload.is_save_worthy() {
                debug!("Skipping autosave: draft has no save-worthy content");
                return;
            }
            s.in_flight = true;
            (payload, s.persisted_id)
        };

        let result = match target {
            Some(id) => saver.update(id, &payload).await.map(|_| id),
            None => saver.insert(&payload).await,
        };

        let mut s = inner.state.lock().unwrap();
        s.in_flight = false;
        inner.settled.notify_waiters();
        if !s.alive {
            // The editor was torn down while the request was in flight;
            // drop the late result.
            return;
        }
        match result {
            Ok(id) => {
                s.persisted_id = Some(id);
                s.last_saved_at = Some(Utc::now());
                s.consecutive_failures = 0;
            }
            Err(err) => {
                s.consecutive_failures += 1;
                if s.pending.is_none() {
                    s.pending = Some(payload);
                }
                warn!(
                    failures = s.consecutive_failures,
                    error = %err,
                    "Draft autosave failed; retrying on next tick"
                );
                return;
            }
        }
        if s.pending.is_none() {
            return;
        }
        // A newer payload arrived during the save; drain it too.
        drop(s);
    }
}

/// One open draft editing session.
pub struct DraftEditor {
    pub editor_id: Uuid,
    pub owner_id: Uuid,
    buffer: Mutex<DraftState>,
    scheduler: AutosaveScheduler,
}

impl DraftEditor {
    /// Opens an editor for a brand-new draft. Nothing is persisted until
    /// the buffer first passes the minimum-content predicate.
    pub fn open(owner_id: Uuid, saver: Arc<dyn DraftSaver>, debounce: Duration) -> Arc<Self> {
        Arc::new(Self {
            editor_id: Uuid::new_v4(),
            owner_id,
            buffer: Mutex::new(DraftState::new(owner_id)),
            scheduler: AutosaveScheduler::new(saver, debounce),
        })
    }

    /// Reopens an editor over a persisted draft row, restoring form
    /// snapshot and active tab verbatim.
    pub fn resume(
        state: DraftState,
        draft_id: Uuid,
        saver: Arc<dyn DraftSaver>,
        debounce: Duration,
    ) -> Arc<Self> {
        let owner_id = state.owner_id;
        Arc::new(Self {
            editor_id: Uuid::new_v4(),
            owner_id,
            buffer: Mutex::new(state),
            scheduler: AutosaveScheduler::resumed(saver, debounce, draft_id),
        })
    }

    /// Applies a form mutation to the buffer and schedules a debounced
    /// save.
    pub fn apply_update(
        &self,
        snapshot: Option<FormSnapshot>,
        location_id: Option<Uuid>,
    ) -> DraftState {
        let state = {
            let mut buffer = self.buffer.lock().unwrap();
            if let Some(snapshot) = snapshot {
                buffer.form_snapshot = snapshot;
            }
            if let Some(location_id) = location_id {
                buffer.location_id = Some(location_id);
            }
            buffer.clone()
        };
        self.scheduler.schedule(state.clone());
        state
    }

    /// Attaches an allocated (or placeholder) job number to the buffer and
    /// schedules a save.
    pub fn set_number(&self, slot: JobNumberSlot, needs_reconciliation: bool) -> DraftState {
        let state = {
            let mut buffer = self.buffer.lock().unwrap();
            buffer.job_number = Some(slot);
            buffer.needs_reconciliation = needs_reconciliation;
            buffer.clone()
        };
        self.scheduler.schedule(state.clone());
        state
    }

    /// Switches the active tab and flushes immediately (no debounce),
    /// provided the draft already exists or the payload is save-worthy.
    pub async fn change_tab(&self, tab: String) -> Result<Option<Uuid>, SaveError> {
        let state = {
            let mut buffer = self.buffer.lock().unwrap();
            buffer.current_tab = tab;
            buffer.clone()
        };
        self.scheduler.flush(Some(state)).await
    }

    /// Forces the current buffer to disk; used by finalization so the
    /// draft row reflects the latest edits.
    pub async fn flush(&self) -> Result<Option<Uuid>, SaveError> {
        let state = self.buffer.lock().unwrap().clone();
        self.scheduler.flush(Some(state)).await
    }

    pub fn state(&self) -> DraftState {
        self.buffer.lock().unwrap().clone()
    }

    pub fn status(&self) -> SaveStatus {
        self.scheduler.status()
    }

    pub fn draft_id(&self) -> Option<Uuid> {
        self.scheduler.draft_id()
    }

    /// Tears the editor down; any in-flight save result is discarded.
    pub fn close(&self) {
        self.scheduler.cancel();
    }
}

/// Registry of open draft editors, keyed by editor id.
#[derive(Clone, Default)]
pub struct DraftEditors {
    editors: Arc<Mutex<HashMap<Uuid, Arc<DraftEditor>>>>,
}

impl DraftEditors {
    pub fn insert(&self, editor: Arc<DraftEditor>) {
        self.editors
            .lock()
            .unwrap()
            .insert(editor.editor_id, editor);
    }

    pub fn get(&self, editor_id: Uuid) -> Option<Arc<DraftEditor>> {
        self.editors.lock().unwrap().get(&editor_id).cloned()
    }

    pub fn remove(&self, editor_id: Uuid) -> Option<Arc<DraftEditor>> {
        self.editors.lock().unwrap().remove(&editor_id)
    }

    /// Finds a live editor already tracking the given persisted draft, so
    /// a resume after reload does not spawn a duplicate editor.
    pub fn find_by_draft_id(&self, draft_id: Uuid) -> Option<Arc<DraftEditor>> {
        self.editors
            .lock()
            .unwrap()
            .values()
            .find(|editor| editor.draft_id() == Some(draft_id))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::snapshot::CustomerInfo;
    use std::sync::atomic::{AtomicU32, Ordering};

    const DEBOUNCE: Duration = Duration::from_millis(2000);

    /// In-memory saver recording every persisted payload.
    struct RecordingSaver {
        saves: Mutex<Vec<(Option<Uuid>, DraftState)>>,
        generated_id: Uuid,
        fail_next: AtomicU32,
        /// Time each save request spends suspended before completing.
        delay: Duration,
    }

    impl RecordingSaver {
        fn new() -> Arc<Self> {
            Self::with_delay(Duration::ZERO)
        }

        fn with_delay(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                saves: Mutex::new(Vec::new()),
                generated_id: Uuid::new_v4(),
                fail_next: AtomicU32::new(0),
                delay,
            })
        }

        fn fail_next_saves(&self, count: u32) {
            self.fail_next.store(count, Ordering::SeqCst);
        }

        fn save_count(&self) -> usize {
            self.saves.lock().unwrap().len()
        }

        fn last_save(&self) -> (Option<Uuid>, DraftState) {
            self.saves.lock().unwrap().last().cloned().unwrap()
        }

        fn take_failure(&self) -> bool {
            self.fail_next
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
        }
    }

    #[async_trait]
    impl DraftSaver for RecordingSaver {
        async fn insert(&self, state: &DraftState) -> Result<Uuid, SaveError> {
            tokio::time::sleep(self.delay).await;
            if self.take_failure() {
                return Err(SaveError("injected failure".into()));
            }
            self.saves.lock().unwrap().push((None, state.clone()));
            Ok(self.generated_id)
        }

        async fn update(&self, draft_id: Uuid, state: &DraftState) -> Result<(), SaveError> {
            tokio::time::sleep(self.delay).await;
            if self.take_failure() {
                return Err(SaveError("injected failure".into()));
            }
            self.saves
                .lock()
                .unwrap()
                .push((Some(draft_id), state.clone()));
            Ok(())
        }
    }

    fn named_snapshot(name: &str) -> FormSnapshot {
        FormSnapshot {
            customer: CustomerInfo {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutations_within_window_coalesce_to_one_save() {
        let saver = RecordingSaver::new();
        let editor = DraftEditor::open(Uuid::new_v4(), saver.clone(), DEBOUNCE);

        editor.apply_update(Some(named_snapshot("Acme")), None);
        tokio::time::sleep(Duration::from_millis(500)).await;
        editor.apply_update(Some(named_snapshot("Acme Industries")), None);

        // Only 1500 ms after the first mutation: nothing persisted yet.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(saver.save_count(), 0);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(saver.save_count(), 1);
        let (target, state) = saver.last_save();
        assert!(target.is_none());
        assert_eq!(
            state.form_snapshot.effective_customer_name(),
            Some("Acme Industries")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_draft_without_minimum_content_is_never_saved() {
        let saver = RecordingSaver::new();
        let editor = DraftEditor::open(Uuid::new_v4(), saver.clone(), DEBOUNCE);

        let mut snapshot = FormSnapshot::default();
        snapshot.emergency_procedures = Some("evacuate via dock B".to_string());
        editor.apply_update(Some(snapshot), None);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(saver.save_count(), 0);
        assert!(editor.draft_id().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_save_captures_id_and_later_saves_update_in_place() {
        let saver = RecordingSaver::new();
        let editor = DraftEditor::open(Uuid::new_v4(), saver.clone(), DEBOUNCE);

        editor.apply_update(Some(named_snapshot("Acme")), None);
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(editor.draft_id(), Some(saver.generated_id));

        editor.apply_update(Some(named_snapshot("Acme v2")), None);
        tokio::time::sleep(Duration::from_millis(2100)).await;

        assert_eq!(saver.save_count(), 2);
        let (target, _) = saver.last_save();
        assert_eq!(target, Some(saver.generated_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_mutation_during_in_flight_save_is_coalesced_and_saved() {
        let saver = RecordingSaver::with_delay(Duration::from_millis(100));
        let editor = DraftEditor::open(Uuid::new_v4(), saver.clone(), DEBOUNCE);

        editor.apply_update(Some(named_snapshot("Acme")), None);

        // Land inside the save request: the debounce has fired and the
        // slow write is suspended but not yet complete.
        tokio::time::sleep(Duration::from_millis(2050)).await;
        assert!(editor.status().save_in_flight);
        editor.apply_update(Some(named_snapshot("Acme Industries")), None);

        tokio::time::sleep(Duration::from_millis(5000)).await;

        // The in-flight save completed and the coalesced mutation was
        // persisted right after it; the scheduler is idle again.
        assert_eq!(saver.save_count(), 2);
        let (_, state) = saver.last_save();
        assert_eq!(
            state.form_snapshot.effective_customer_name(),
            Some("Acme Industries")
        );
        assert!(!editor.status().save_in_flight);
        assert_eq!(editor.status().consecutive_failures, 0);

        // The scheduler is not wedged: a flush still goes through.
        let draft_id = editor.change_tab("part-details".to_string()).await.unwrap();
        assert_eq!(draft_id, Some(saver.generated_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_during_in_flight_save_waits_and_persists() {
        let saver = RecordingSaver::with_delay(Duration::from_millis(100));
        let editor = DraftEditor::open(Uuid::new_v4(), saver.clone(), DEBOUNCE);

        editor.apply_update(Some(named_snapshot("Acme")), None);
        tokio::time::sleep(Duration::from_millis(2050)).await;
        assert!(editor.status().save_in_flight);

        // Tab change while the first write is suspended: it must wait the
        // write out, not cancel it, then persist the new tab.
        let draft_id = editor.change_tab("part-details".to_string()).await.unwrap();
        assert_eq!(draft_id, Some(saver.generated_id));
        assert_eq!(saver.save_count(), 2);
        let (_, state) = saver.last_save();
        assert_eq!(state.current_tab, "part-details");
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_change_flushes_immediately() {
        let saver = RecordingSaver::new();
        let editor = DraftEditor::open(Uuid::new_v4(), saver.clone(), DEBOUNCE);

        editor.apply_update(Some(named_snapshot("Acme")), None);
        let draft_id = editor.change_tab("part-details".to_string()).await.unwrap();

        assert_eq!(draft_id, Some(saver.generated_id));
        assert_eq!(saver.save_count(), 1);
        let (_, state) = saver.last_save();
        assert_eq!(state.current_tab, "part-details");

        // The invalidated debounce timer must not fire a second save.
        tokio::time::sleep(Duration::from_millis(3000)).await;
        assert_eq!(saver.save_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_change_on_empty_new_draft_is_not_persisted() {
        let saver = RecordingSaver::new();
        let editor = DraftEditor::open(Uuid::new_v4(), saver.clone(), DEBOUNCE);

        let draft_id = editor.change_tab("part-details".to_string()).await.unwrap();
        assert!(draft_id.is_none());
        assert_eq!(saver.save_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_retries_on_next_tick() {
        let saver = RecordingSaver::new();
        let editor = DraftEditor::open(Uuid::new_v4(), saver.clone(), DEBOUNCE);
        saver.fail_next_saves(1);

        editor.apply_update(Some(named_snapshot("Acme")), None);
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(saver.save_count(), 0);
        assert_eq!(editor.status().consecutive_failures, 1);

        // The next mutation tick retries and succeeds.
        editor.apply_update(Some(named_snapshot("Acme")), None);
        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert_eq!(saver.save_count(), 1);
        assert_eq!(editor.status().consecutive_failures, 0);
        assert!(editor.status().last_saved_at.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_cancels_pending_save() {
        let saver = RecordingSaver::new();
        let editor = DraftEditor::open(Uuid::new_v4(), saver.clone(), DEBOUNCE);

        editor.apply_update(Some(named_snapshot("Acme")), None);
        editor.close();

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(saver.save_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resumed_editor_updates_existing_row() {
        let saver = RecordingSaver::new();
        let draft_id = Uuid::new_v4();
        let owner = Uuid::new_v4();
        let mut state = DraftState::new(owner);
        state.form_snapshot = named_snapshot("Acme");
        state.current_tab = "summary".to_string();

        let editor = DraftEditor::resume(state, draft_id, saver.clone(), DEBOUNCE);
        assert_eq!(editor.draft_id(), Some(draft_id));
        assert_eq!(editor.state().current_tab, "summary");

        editor.apply_update(Some(named_snapshot("Acme v2")), None);
        tokio::time::sleep(Duration::from_millis(2100)).await;

        let (target, _) = saver.last_save();
        assert_eq!(target, Some(draft_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_registry_finds_editor_by_draft_id() {
        let saver = RecordingSaver::new();
        let editors = DraftEditors::default();
        let draft_id = Uuid::new_v4();
        let editor = DraftEditor::resume(
            DraftState::new(Uuid::new_v4()),
            draft_id,
            saver,
            DEBOUNCE,
        );
        editors.insert(editor.clone());

        let found = editors.find_by_draft_id(draft_id).unwrap();
        assert_eq!(found.editor_id, editor.editor_id);
        assert!(editors.find_by_draft_id(Uuid::new_v4()).is_none());

        editors.remove(editor.editor_id);
        assert!(editors.get(editor.editor_id).is_none());
    }
}
