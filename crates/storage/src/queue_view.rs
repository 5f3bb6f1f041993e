//! `JobTrackingQueue`: a `Queue<JobSpec>` view over the [`TrackingStore`].
//! Keeps an in-memory projection in sync with the on-disk table so
//! callers get `Queue` semantics (identity-aware `add`/`pop`/`merge`)
//! while every mutation is also durably persisted.

use crate::error::StoreError;
use crate::store::{OnConflict, TrackingStore};
use rerun_channel::{CommandChannel, FileMode};
use rerun_core::{JobId, JobSpec, Queue};
use std::io::{Read, Write};
use std::path::Path;

pub struct JobTrackingQueue {
    store: TrackingStore,
    queue: Queue<JobSpec>,
}

impl JobTrackingQueue {
    /// Load the current on-disk rows into an in-memory `Queue` view.
    pub fn load(store: TrackingStore) -> Result<Self, StoreError> {
        let queue = Queue::from_vec(store.all()?);
        Ok(Self { store, queue })
    }

    pub fn queue(&self) -> &Queue<JobSpec> {
        &self.queue
    }

    pub fn into_queue(self) -> Queue<JobSpec> {
        self.queue
    }

    /// Append `spec` in memory and upsert it to disk under
    /// `on_conflict`. On a mismatch between the in-memory entry and what
    /// is already durable — only possible with `on_conflict=update`,
    /// since `skip`/`throw` can't silently diverge — a warning is
    /// surfaced but registration still succeeds.
    pub fn register(&mut self, spec: JobSpec, on_conflict: OnConflict) -> Result<(), StoreError> {
        if on_conflict == OnConflict::Update {
            if let Some(existing) = self.queue.find(&spec) {
                if existing.state != spec.state {
                    tracing::warn!(
                        id = %spec.id,
                        in_memory_state = %existing.state,
                        incoming_state = %spec.state,
                        "in-memory/on-disk state mismatch on register; incoming wins"
                    );
                }
            }
        }
        self.store.upsert(std::slice::from_ref(&spec), on_conflict)?;
        self.queue.add(spec);
        Ok(())
    }

    pub fn update_state(&mut self, id: JobId, state: rerun_core::State, comment: Option<&str>) -> Result<(), StoreError> {
        self.store.update_state(id, state, comment)?;
        if let Some(spec) = self.queue.as_slice().iter().find(|s| s.id == id).cloned() {
            let mut updated = spec;
            updated.state = state;
            if let Some(c) = comment {
                updated.comment = Some(c.to_string());
            }
            self.queue.add(updated);
        }
        Ok(())
    }

    pub fn pop(&mut self, id: JobId) -> Result<Option<JobSpec>, StoreError> {
        let popped = self.store.pop(id)?;
        if popped.is_some() {
            self.queue = Queue::from_vec(
                self.queue.as_slice().iter().filter(|s| s.id != id).cloned().collect(),
            );
        }
        Ok(popped)
    }

    /// Pull the remote tracking database to a local temporary copy and
    /// load it. Stale reads are accepted in exchange for avoiding racy
    /// concurrent writers; the push-back is a separate, explicit step
    /// (see [`Self::push_back`]).
    pub fn pull_from_remote(
        channel: &dyn CommandChannel,
        remote_db_path: &str,
        local_tmp_path: impl AsRef<Path>,
    ) -> Result<Self, StoreError> {
        let mut remote = channel.open_file(remote_db_path, FileMode::Read)?;
        let mut bytes = Vec::new();
        remote.read_to_end(&mut bytes)?;
        drop(remote);

        std::fs::write(&local_tmp_path, &bytes)?;
        let store = TrackingStore::open(local_tmp_path)?;
        Self::load(store)
    }

    /// Push the local temporary copy back to the remote path. Callers
    /// must opt in explicitly.
    pub fn push_back(
        channel: &dyn CommandChannel,
        local_tmp_path: impl AsRef<Path>,
        remote_db_path: &str,
    ) -> Result<(), StoreError> {
        let bytes = std::fs::read(local_tmp_path)?;
        let mut remote = channel.open_file(remote_db_path, FileMode::Write)?;
        remote.write_all(&bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rerun_core::test_support::spec_with_id;
    use rerun_core::State;

    #[test]
    fn register_persists_and_is_visible_in_queue() {
        let store = TrackingStore::open_in_memory().unwrap();
        let mut view = JobTrackingQueue::load(store).unwrap();
        let spec = spec_with_id(JobId::new());
        view.register(spec.clone(), OnConflict::Update).unwrap();

        assert_eq!(view.queue().len(), 1);
        assert!(view.queue().contains(&spec));
    }

    #[test]
    fn update_state_reflects_in_queue_view() {
        let store = TrackingStore::open_in_memory().unwrap();
        let mut view = JobTrackingQueue::load(store).unwrap();
        let spec = spec_with_id(JobId::new());
        view.register(spec.clone(), OnConflict::Update).unwrap();

        view.update_state(spec.id, State::Queued, None).unwrap();
        let updated = view.queue().find(&spec).unwrap();
        assert_eq!(updated.state, State::Queued);
    }

    #[test]
    fn pop_removes_from_both_store_and_queue() {
        let store = TrackingStore::open_in_memory().unwrap();
        let mut view = JobTrackingQueue::load(store).unwrap();
        let spec = spec_with_id(JobId::new());
        view.register(spec.clone(), OnConflict::Update).unwrap();

        view.pop(spec.id).unwrap();
        assert_eq!(view.queue().len(), 0);
    }
}
