//! `Queue<T>`: an insertion-order-preserving collection keyed by the
//! cross-cutting identity rule.
//!
//! Backs both the live-queue view returned by the workload-manager
//! adapter and the in-memory projection of the tracking store.

use crate::job::{identity_match, Identity};
use regex::Regex;

/// An ordered collection of jobs (or job-shaped records) with identity-aware
/// insertion. Two entries that [`identity_match`] are never both present;
/// inserting a match replaces the existing entry in place, preserving its
/// original position.
#[derive(Debug, Clone, Default)]
pub struct Queue<T> {
    items: Vec<T>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: Identity> Queue<T> {
    pub fn from_vec(items: Vec<T>) -> Self {
        let mut queue = Self::new();
        for item in items {
            queue.add(item);
        }
        queue
    }

    /// Replace the first existing entry matching `item`'s identity, or
    /// append it if no entry matches.
    pub fn add(&mut self, item: T) {
        if let Some(slot) = self.items.iter_mut().find(|existing| identity_match(*existing, &item))
        {
            *slot = item;
        } else {
            self.items.push(item);
        }
    }

    /// Fold `other` into `self` via repeated [`Queue::add`]; new identities
    /// are appended in `other`'s order.
    pub fn merge(&mut self, other: Queue<T>) {
        for item in other.items {
            self.add(item);
        }
    }

    /// Remove and return the entry matching `needle`'s identity, if any.
    pub fn pop(&mut self, needle: &impl Identity) -> Option<T> {
        let pos = self.items.iter().position(|existing| identity_match(existing, needle))?;
        Some(self.items.remove(pos))
    }

    pub fn find(&self, needle: &impl Identity) -> Option<&T> {
        self.items.iter().find(|existing| identity_match(*existing, needle))
    }

    pub fn contains(&self, needle: &impl Identity) -> bool {
        self.find(needle).is_some()
    }
}

/// Filter predicates used by the reconciliation engine and CLI listing
/// commands. Kept as free functions rather than methods on `Queue` so they
/// can operate on borrowed slices as well as owned queues.
pub fn filter_state<'a, T>(items: &'a [T], state: crate::State) -> Vec<&'a T>
where
    T: AsRef<crate::JobSpec>,
{
    items.iter().filter(|j| j.as_ref().state == state).collect()
}

pub fn filter_cluster<'a, T>(items: &'a [T], cluster: crate::Cluster) -> Vec<&'a T>
where
    T: AsRef<crate::JobSpec>,
{
    items.iter().filter(|j| j.as_ref().cluster == cluster).collect()
}

pub fn filter_id<'a, T>(items: &'a [T], id: crate::JobId) -> Option<&'a T>
where
    T: AsRef<crate::JobSpec>,
{
    items.iter().find(|j| j.as_ref().id == id)
}

/// Regex substring match on the job name.
pub fn filter_name<'a, T>(items: &'a [T], pattern: &str) -> Result<Vec<&'a T>, regex::Error>
where
    T: AsRef<crate::JobSpec>,
{
    let re = Regex::new(pattern)?;
    Ok(items.iter().filter(|j| re.is_match(&j.as_ref().name)).collect())
}

/// Owner filter: accepts either `user` or `user@host` and matches
/// accordingly.
pub fn filter_owner<'a>(items: &'a [crate::Job], owner: &str) -> Vec<&'a crate::Job> {
    items
        .iter()
        .filter(|j| j.owner == owner || j.owner_name() == owner)
        .collect()
}

impl AsRef<crate::JobSpec> for crate::JobSpec {
    fn as_ref(&self) -> &crate::JobSpec {
        self
    }
}

impl AsRef<crate::JobSpec> for crate::Job {
    fn as_ref(&self) -> &crate::JobSpec {
        &self.spec
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
