//! Append-only crisis-event log with replay.
//!
//! All escalation decisions that log an event, and all follow-up
//! resolution changes, are captured as append-only JSONL events. On
//! startup, replay reduces the event stream into the latest per-key view.
//!
//! Write contract:
//! - Appends are keyed by the core idempotency key; a duplicate key is
//!   reported as `DuplicateEvent` so retried writes stay no-ops.
//! - Capacity is bounded; the log fails closed rather than evicting.
//! - Resolution transitions are forward-only and validated against the
//!   core lifecycle rules before they are persisted.

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sahay_core::escalation::{CrisisEvent, EventSeverity, ResolutionState};
use sahay_core::idempotency::{compute_event_key, format_event_key};

// --- Event record --------------------------------------------------------

/// Persisted form of a crisis event.
///
/// Severity, categories, and resolution are stored as their stable string
/// tokens so the on-disk format does not depend on enum layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 16-hex-digit idempotency key.
    pub event_key: String,
    pub user_id: String,
    /// Timestamp of the triggering assessment (ms).
    pub occurred_at_ms: u64,
    /// Severity token ("moderate", "high", "severe").
    pub severity: String,
    /// Verbatim text of the triggering message.
    pub trigger_message: String,
    /// Distinct category tokens, sorted.
    pub detected_categories: Vec<String>,
    /// Scoring-table revision that produced the assessment.
    pub table_revision: String,
    /// Resolution token ("unresolved", "monitoring", "resolved").
    pub resolution: String,
}

/// Build the persisted record for a core event, computing its key.
pub fn record_from_event(event: &CrisisEvent) -> EventRecord {
    EventRecord {
        event_key: format_event_key(compute_event_key(event)),
        user_id: event.user_id.clone(),
        occurred_at_ms: event.occurred_at_ms,
        severity: event.severity.as_str().to_string(),
        trigger_message: event.trigger_message.clone(),
        detected_categories: event
            .detected_categories
            .iter()
            .map(|c| c.as_str().to_string())
            .collect(),
        table_revision: event.table_revision.to_string(),
        resolution: event.resolution.as_str().to_string(),
    }
}

fn parse_severity(token: &str) -> Option<EventSeverity> {
    match token {
        "moderate" => Some(EventSeverity::Moderate),
        "high" => Some(EventSeverity::High),
        "severe" => Some(EventSeverity::Severe),
        _ => None,
    }
}

fn parse_resolution(token: &str) -> Option<ResolutionState> {
    match token {
        "unresolved" => Some(ResolutionState::Unresolved),
        "monitoring" => Some(ResolutionState::Monitoring),
        "resolved" => Some(ResolutionState::Resolved),
        _ => None,
    }
}

// --- Log event -----------------------------------------------------------

/// Append-only log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum LogEvent {
    EventRecorded {
        record: EventRecord,
    },
    ResolutionTransition {
        event_key: String,
        new_state: String,
    },
}

// --- Errors --------------------------------------------------------------

/// Error returned when an append fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendError {
    /// The log is at capacity.
    CapacityExhausted,
    /// An event with this key is already recorded; retries are no-ops.
    DuplicateEvent { event_key: String },
    /// Durable write failure.
    WriteFailed { reason: String },
}

impl std::fmt::Display for AppendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExhausted => write!(f, "event log at capacity"),
            Self::DuplicateEvent { event_key } => {
                write!(f, "event already recorded: {event_key}")
            }
            Self::WriteFailed { reason } => write!(f, "event log write failed: {reason}"),
        }
    }
}

impl std::error::Error for AppendError {}

/// Error returned when a resolution transition fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// No event with this key is recorded.
    UnknownEvent { event_key: String },
    /// The transition violates the forward-only lifecycle.
    InvalidTransition {
        from: ResolutionState,
        to: ResolutionState,
    },
    /// Durable write failure.
    WriteFailed { reason: String },
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownEvent { event_key } => write!(f, "unknown event: {event_key}"),
            Self::InvalidTransition { from, to } => {
                write!(
                    f,
                    "invalid resolution transition: {} -> {}",
                    from.as_str(),
                    to.as_str()
                )
            }
            Self::WriteFailed { reason } => write!(f, "event log write failed: {reason}"),
        }
    }
}

impl std::error::Error for TransitionError {}

// --- Replay outcome ------------------------------------------------------

/// Outcome of replaying the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Number of event records reconstructed.
    pub records_replayed: usize,
    /// Number of events whose follow-up is still open.
    pub open_count: usize,
    /// Keys of open events (for follow-up reconciliation).
    pub open_keys: Vec<String>,
}

// --- Metrics -------------------------------------------------------------

/// Observability counters for the event log.
#[derive(Debug, Default)]
pub struct EventLogMetrics {
    appends_total: u64,
    write_errors: u64,
    duplicate_appends: u64,
    transitions_total: u64,
}

impl EventLogMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn appends_total(&self) -> u64 {
        self.appends_total
    }

    pub fn write_errors(&self) -> u64 {
        self.write_errors
    }

    pub fn duplicate_appends(&self) -> u64 {
        self.duplicate_appends
    }

    pub fn transitions_total(&self) -> u64 {
        self.transitions_total
    }

    fn record_append(&mut self) {
        self.appends_total += 1;
    }

    fn record_write_error(&mut self) {
        self.write_errors += 1;
    }

    fn record_duplicate(&mut self) {
        self.duplicate_appends += 1;
    }

    fn record_transition(&mut self) {
        self.transitions_total += 1;
    }
}

// --- Crisis event log ----------------------------------------------------

/// Append-only crisis-event log with optional durable storage path.
#[derive(Debug)]
pub struct CrisisEventLog {
    /// Latest state per event key.
    latest_by_key: HashMap<String, EventRecord>,
    /// Maximum number of event records.
    capacity: usize,
    /// Optional JSONL storage path.
    storage_path: Option<PathBuf>,
}

impl CrisisEventLog {
    /// Create a new in-memory log with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            latest_by_key: HashMap::new(),
            capacity,
            storage_path: None,
        }
    }

    /// Create/load a log backed by a JSONL file.
    pub fn with_storage_path(capacity: usize, storage_path: impl AsRef<Path>) -> io::Result<Self> {
        let path = storage_path.as_ref().to_path_buf();
        let events = read_events_from_path(&path)?;
        let latest_by_key = reduce_events(&events)
            .map_err(|reason| io::Error::new(io::ErrorKind::InvalidData, reason))?;
        if latest_by_key.len() > capacity {
            let reason = format!(
                "event log contains {} events but capacity is {}",
                latest_by_key.len(),
                capacity
            );
            return Err(io::Error::new(io::ErrorKind::InvalidInput, reason));
        }

        Ok(Self {
            latest_by_key,
            capacity,
            storage_path: Some(path),
        })
    }

    /// Storage path if this log is durable.
    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }

    /// Append a crisis-event record.
    ///
    /// Duplicate keys surface `DuplicateEvent`; callers treat that as
    /// already-recorded, not as a failure.
    pub fn append(
        &mut self,
        record: EventRecord,
        metrics: &mut EventLogMetrics,
    ) -> Result<(), AppendError> {
        if self.latest_by_key.contains_key(&record.event_key) {
            metrics.record_duplicate();
            return Err(AppendError::DuplicateEvent {
                event_key: record.event_key,
            });
        }
        if self.latest_by_key.len() >= self.capacity {
            metrics.record_write_error();
            return Err(AppendError::CapacityExhausted);
        }

        let event = LogEvent::EventRecorded { record };
        self.persist_and_apply(event, metrics)
            .map_err(|reason| AppendError::WriteFailed { reason })?;
        metrics.record_append();
        Ok(())
    }

    /// Append a resolution transition for a recorded event.
    pub fn update_resolution(
        &mut self,
        event_key: &str,
        new_state: ResolutionState,
        metrics: &mut EventLogMetrics,
    ) -> Result<(), TransitionError> {
        let record = self
            .latest_by_key
            .get(event_key)
            .ok_or_else(|| TransitionError::UnknownEvent {
                event_key: event_key.to_string(),
            })?;
        let current = parse_resolution(&record.resolution).ok_or_else(|| {
            TransitionError::WriteFailed {
                reason: format!("corrupt resolution token: {}", record.resolution),
            }
        })?;
        if !current.can_transition_to(new_state) {
            return Err(TransitionError::InvalidTransition {
                from: current,
                to: new_state,
            });
        }

        let event = LogEvent::ResolutionTransition {
            event_key: event_key.to_string(),
            new_state: new_state.as_str().to_string(),
        };
        self.persist_and_apply(event, metrics)
            .map_err(|reason| TransitionError::WriteFailed { reason })?;
        metrics.record_transition();
        Ok(())
    }

    /// Reduce the latest view for startup reconciliation and analytics.
    pub fn replay(&self) -> ReplayOutcome {
        let mut open_keys = Vec::new();
        for record in self.latest_by_key.values() {
            let open = parse_resolution(&record.resolution)
                .map(|state| state.is_open())
                .unwrap_or(true);
            if open {
                open_keys.push(record.event_key.clone());
            }
        }
        open_keys.sort();

        ReplayOutcome {
            records_replayed: self.latest_by_key.len(),
            open_count: open_keys.len(),
            open_keys,
        }
    }

    /// Look up an event by key.
    pub fn get(&self, event_key: &str) -> Option<&EventRecord> {
        self.latest_by_key.get(event_key)
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.latest_by_key.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.latest_by_key.is_empty()
    }

    /// Log capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn persist_and_apply(
        &mut self,
        event: LogEvent,
        metrics: &mut EventLogMetrics,
    ) -> Result<(), String> {
        if let Some(path) = &self.storage_path {
            write_event_to_path(path, &event).map_err(|reason| {
                metrics.record_write_error();
                reason
            })?;
        }

        apply_event(&mut self.latest_by_key, &event).map_err(|reason| {
            metrics.record_write_error();
            reason
        })
    }
}

// --- Event reduction -----------------------------------------------------

fn apply_event(
    latest_by_key: &mut HashMap<String, EventRecord>,
    event: &LogEvent,
) -> Result<(), String> {
    match event {
        LogEvent::EventRecorded { record } => {
            if parse_severity(&record.severity).is_none() {
                return Err(format!(
                    "invalid severity '{}' for event {}",
                    record.severity, record.event_key
                ));
            }
            if parse_resolution(&record.resolution).is_none() {
                return Err(format!(
                    "invalid resolution '{}' for event {}",
                    record.resolution, record.event_key
                ));
            }
            if latest_by_key.contains_key(&record.event_key) {
                return Err(format!("duplicate event_key: {}", record.event_key));
            }
            latest_by_key.insert(record.event_key.clone(), record.clone());
            Ok(())
        }
        LogEvent::ResolutionTransition {
            event_key,
            new_state,
        } => {
            let record = latest_by_key
                .get_mut(event_key)
                .ok_or_else(|| format!("transition for unknown event_key: {event_key}"))?;
            let current = parse_resolution(&record.resolution)
                .ok_or_else(|| format!("corrupt resolution token: {}", record.resolution))?;
            let next = parse_resolution(new_state)
                .ok_or_else(|| format!("invalid resolution token: {new_state}"))?;
            if !current.can_transition_to(next) {
                return Err(format!(
                    "invalid transition {} -> {} for event {event_key}",
                    current.as_str(),
                    next.as_str()
                ));
            }
            record.resolution = next.as_str().to_string();
            Ok(())
        }
    }
}

fn reduce_events(events: &[LogEvent]) -> Result<HashMap<String, EventRecord>, String> {
    let mut latest_by_key = HashMap::new();
    for event in events {
        apply_event(&mut latest_by_key, event)?;
    }
    Ok(latest_by_key)
}

// --- Durable JSONL I/O ---------------------------------------------------

fn write_event_to_path(path: &Path, event: &LogEvent) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            format!(
                "failed to create event log parent directory {}: {e}",
                parent.display()
            )
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("failed to open event log {}: {e}", path.display()))?;
    let line =
        serde_json::to_string(event).map_err(|e| format!("failed to encode log event: {e}"))?;
    file.write_all(line.as_bytes())
        .map_err(|e| format!("failed to write log event {}: {e}", path.display()))?;
    file.write_all(b"\n")
        .map_err(|e| format!("failed to write log newline {}: {e}", path.display()))?;
    file.flush()
        .map_err(|e| format!("failed to flush event log {}: {e}", path.display()))
}

fn read_events_from_path(path: &Path) -> io::Result<Vec<LogEvent>> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)?;
    let reader = BufReader::new(file);

    let mut events = Vec::new();
    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let event: LogEvent = serde_json::from_str(trimmed).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "invalid log event at line {} in {}: {e}",
                    index + 1,
                    path.display()
                ),
            )
        })?;
        events.push(event);
    }

    Ok(events)
}
