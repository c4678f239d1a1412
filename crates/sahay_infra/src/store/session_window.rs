//! Per-session rolling window of recent risk levels.
//!
//! The escalation policy is deliberately stateless; this registry is the
//! caller-side session state it reads from. Each session holds at most
//! `window_size` levels, most-recent-last. The registry itself is
//! bounded: inserting a window for a new session beyond capacity is an
//! error rather than a silent eviction of another user's safety context.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use sahay_core::risk::RiskLevel;

// --- Registry error ------------------------------------------------------

/// Error returned when registry operations fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionRegistryError {
    /// The registry cannot hold another session.
    CapacityFull,
}

impl std::fmt::Display for SessionRegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityFull => write!(f, "session registry at capacity"),
        }
    }
}

impl std::error::Error for SessionRegistryError {}

// --- Metrics -------------------------------------------------------------

/// Observability counters for the session window registry.
#[derive(Debug)]
pub struct SessionWindowMetrics {
    pushes_total: AtomicU64,
    evictions_total: AtomicU64,
    sessions_created_total: AtomicU64,
}

impl SessionWindowMetrics {
    pub fn new() -> Self {
        Self {
            pushes_total: AtomicU64::new(0),
            evictions_total: AtomicU64::new(0),
            sessions_created_total: AtomicU64::new(0),
        }
    }

    /// Levels pushed across all sessions.
    pub fn pushes_total(&self) -> u64 {
        self.pushes_total.load(Ordering::Relaxed)
    }

    /// Oldest-entry evictions caused by full windows.
    pub fn evictions_total(&self) -> u64 {
        self.evictions_total.load(Ordering::Relaxed)
    }

    /// New session windows created.
    pub fn sessions_created_total(&self) -> u64 {
        self.sessions_created_total.load(Ordering::Relaxed)
    }

    fn record_push(&self) {
        self.pushes_total.fetch_add(1, Ordering::Relaxed);
    }

    fn record_eviction(&self) {
        self.evictions_total.fetch_add(1, Ordering::Relaxed);
    }

    fn record_session_created(&self) {
        self.sessions_created_total.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for SessionWindowMetrics {
    fn default() -> Self {
        Self::new()
    }
}

// --- Registry ------------------------------------------------------------

/// Thread-safe bounded registry of per-session level windows.
#[derive(Debug)]
pub struct SessionWindowRegistry {
    windows: Mutex<HashMap<String, VecDeque<RiskLevel>>>,
    window_size: usize,
    capacity: usize,
}

impl SessionWindowRegistry {
    /// Create a registry holding up to `capacity` sessions with up to
    /// `window_size` levels each.
    pub fn new(window_size: usize, capacity: usize) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window_size,
            capacity,
        }
    }

    /// Snapshot of a session's recent levels, most-recent-last.
    ///
    /// Returns an empty vector for unknown sessions. Callers take this
    /// snapshot *before* pushing the current message's level, so the
    /// window always describes prior messages only.
    pub fn recent_levels(&self, session_id: &str) -> Vec<RiskLevel> {
        let windows = self.windows.lock().expect("session registry mutex poisoned");
        windows
            .get(session_id)
            .map(|window| window.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Push a level onto a session's window, evicting the oldest entry
    /// when the window is full.
    pub fn push_level(
        &self,
        session_id: &str,
        level: RiskLevel,
        metrics: &SessionWindowMetrics,
    ) -> Result<(), SessionRegistryError> {
        let mut windows = self.windows.lock().expect("session registry mutex poisoned");

        if !windows.contains_key(session_id) {
            if windows.len() >= self.capacity {
                return Err(SessionRegistryError::CapacityFull);
            }
            windows.insert(
                session_id.to_string(),
                VecDeque::with_capacity(self.window_size),
            );
            metrics.record_session_created();
        }

        let window = windows
            .get_mut(session_id)
            .expect("session window present after insert");
        if window.len() >= self.window_size {
            window.pop_front();
            metrics.record_eviction();
        }
        window.push_back(level);
        metrics.record_push();
        Ok(())
    }

    /// Drop a session's window (end of session).
    pub fn remove_session(&self, session_id: &str) {
        let mut windows = self.windows.lock().expect("session registry mutex poisoned");
        windows.remove(session_id);
    }

    /// Number of tracked sessions.
    pub fn session_count(&self) -> usize {
        self.windows
            .lock()
            .expect("session registry mutex poisoned")
            .len()
    }

    /// Per-session window size.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Maximum number of sessions.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
