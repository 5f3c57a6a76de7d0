//! Test helper module
//!
//! Provides mock collaborators for services tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CoreError, CoreResult, LookupError};
use crate::traits::{AuthorityLookup, LineStore, RunReporter};
use crate::types::{InvalidLine, ReconcileStats, UnverifiedAuthority};

pub const ACTIVE_BODY: &str = "<html><p>Status: <strong> active. </strong></p></html>";
pub const INACTIVE_BODY: &str = "<html><p>Status: <strong> inactive. </strong></p></html>";

// ===== MemoryLineStore =====

pub struct MemoryLineStore {
    lines: Mutex<Vec<String>>,
    writes: AtomicUsize,
    /// If Some, `write_lines` fails with this message
    write_error: Option<String>,
}

impl MemoryLineStore {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: Mutex::new(lines.iter().map(ToString::to_string).collect()),
            writes: AtomicUsize::new(0),
            write_error: None,
        }
    }

    pub fn failing_writes(mut self, message: &str) -> Self {
        self.write_error = Some(message.to_string());
        self
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl LineStore for MemoryLineStore {
    fn read_lines(&self) -> CoreResult<Vec<String>> {
        Ok(self.lines())
    }

    fn write_lines(&self, lines: &[String]) -> CoreResult<()> {
        if let Some(ref msg) = self.write_error {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.lines.lock().unwrap() = lines.to_vec();
        Ok(())
    }
}

// ===== ScriptedLookup =====

/// Lookup answering from per-id scripts, falling back to a default answer.
pub struct ScriptedLookup {
    default: Result<String, LookupError>,
    scripts: Mutex<HashMap<String, VecDeque<Result<String, LookupError>>>>,
    calls: Mutex<HashMap<String, u32>>,
    delay: Duration,
    delay_scripts: Mutex<HashMap<String, VecDeque<Duration>>>,
    no_delay: Mutex<HashSet<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedLookup {
    pub fn new(default: Result<String, LookupError>) -> Self {
        Self {
            default,
            scripts: Mutex::new(HashMap::new()),
            calls: Mutex::new(HashMap::new()),
            delay: Duration::ZERO,
            delay_scripts: Mutex::new(HashMap::new()),
            no_delay: Mutex::new(HashSet::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Answers returned in order for `authority_id` before the default applies
    pub fn script(&self, authority_id: &str, answers: Vec<Result<String, LookupError>>) {
        self.scripts
            .lock()
            .unwrap()
            .insert(authority_id.to_string(), answers.into());
    }

    /// Per-call delays for `authority_id`, used in order before the default delay
    pub fn script_delays(&self, authority_id: &str, delays: Vec<Duration>) {
        self.delay_scripts
            .lock()
            .unwrap()
            .insert(authority_id.to_string(), delays.into());
    }

    pub fn skip_delay_for(&self, authority_id: &str) {
        self.no_delay
            .lock()
            .unwrap()
            .insert(authority_id.to_string());
    }

    pub fn calls(&self, authority_id: &str) -> u32 {
        self.calls
            .lock()
            .unwrap()
            .get(authority_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthorityLookup for ScriptedLookup {
    async fn lookup(&self, authority_id: &str) -> Result<String, LookupError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(authority_id.to_string())
            .or_insert(0) += 1;

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let scripted_delay = self
            .delay_scripts
            .lock()
            .unwrap()
            .get_mut(authority_id)
            .and_then(VecDeque::pop_front);
        let delay = match scripted_delay {
            Some(delay) => delay,
            None if self.no_delay.lock().unwrap().contains(authority_id) => Duration::ZERO,
            None => self.delay,
        };
        if delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(authority_id)
            .and_then(VecDeque::pop_front);
        scripted.unwrap_or_else(|| self.default.clone())
    }
}

// ===== RecordingReporter =====

#[derive(Default)]
pub struct RecordingReporter {
    invalid: Mutex<Vec<InvalidLine>>,
    stats: Mutex<Option<ReconcileStats>>,
    retries: Mutex<Vec<(String, u32)>>,
    verified: Mutex<Vec<String>>,
    unverified: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn invalid(&self) -> Vec<InvalidLine> {
        self.invalid.lock().unwrap().clone()
    }

    pub fn stats(&self) -> Option<ReconcileStats> {
        self.stats.lock().unwrap().clone()
    }

    pub fn retries(&self) -> Vec<(String, u32)> {
        self.retries.lock().unwrap().clone()
    }

    pub fn verified(&self) -> Vec<String> {
        self.verified.lock().unwrap().clone()
    }

    pub fn unverified(&self) -> Vec<String> {
        self.unverified.lock().unwrap().clone()
    }
}

impl RunReporter for RecordingReporter {
    fn invalid_line(&self, line: &InvalidLine) {
        self.invalid.lock().unwrap().push(line.clone());
    }

    fn reconciled(&self, stats: &ReconcileStats) {
        *self.stats.lock().unwrap() = Some(stats.clone());
    }

    fn lookup_retry(&self, authority_id: &str, attempt: u32) {
        self.retries
            .lock()
            .unwrap()
            .push((authority_id.to_string(), attempt));
    }

    fn authority_verified(&self, authority_id: &str) {
        self.verified.lock().unwrap().push(authority_id.to_string());
    }

    fn authority_unverified(&self, authority: &UnverifiedAuthority) {
        self.unverified
            .lock()
            .unwrap()
            .push(authority.authority_id.clone());
    }
}
