//! Metrics collection module
//!
//! Tracks command invocations, outcomes and response times.

use crate::error::{CommandError, Result};
use crate::matrix::Message;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Number of response times kept per command
const RESPONSE_TIME_WINDOW: usize = 100;

/// How a command invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Image,
    Notice,
    SearchError,
    UploadError,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [
        Outcome::Image,
        Outcome::Notice,
        Outcome::SearchError,
        Outcome::UploadError,
    ];

    pub fn of(result: &Result<Message>) -> Self {
        match result {
            Ok(Message::Image(_)) => Outcome::Image,
            Ok(Message::Notice { .. }) => Outcome::Notice,
            Err(CommandError::Search(_)) => Outcome::SearchError,
            Err(CommandError::Upload(_)) => Outcome::UploadError,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Image => "image",
            Outcome::Notice => "notice",
            Outcome::SearchError => "search_error",
            Outcome::UploadError => "upload_error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::SearchError | Outcome::UploadError)
    }
}

/// Global metrics collector
pub struct Metrics {
    /// Total command count
    pub total_commands: AtomicU64,
    /// Outcome counts per command
    outcomes: RwLock<HashMap<String, HashMap<&'static str, u64>>>,
    /// Command response times (rolling window in ms)
    response_times: RwLock<HashMap<String, Vec<u64>>>,
}

impl Metrics {
    /// Create a new metrics instance
    pub fn new() -> Self {
        Self {
            total_commands: AtomicU64::new(0),
            outcomes: RwLock::new(HashMap::new()),
            response_times: RwLock::new(HashMap::new()),
        }
    }

    /// Record one finished invocation
    pub fn record(&self, command: &str, outcome: Outcome, time_ms: u64) {
        self.total_commands.fetch_add(1, Ordering::Relaxed);

        {
            let mut outcomes = self
                .outcomes
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            *outcomes
                .entry(command.to_string())
                .or_default()
                .entry(outcome.label())
                .or_insert(0) += 1;
        }

        let mut times = self
            .response_times
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let entry = times.entry(command.to_string()).or_default();
        if entry.len() >= RESPONSE_TIME_WINDOW {
            entry.remove(0);
        }
        entry.push(time_ms);
    }

    /// Get total commands
    pub fn get_total_commands(&self) -> u64 {
        self.total_commands.load(Ordering::Relaxed)
    }

    /// Get average response time for a command
    pub fn get_avg_response_time(&self, command: &str) -> Option<u64> {
        let times = self
            .response_times
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        times.get(command).and_then(|t| {
            if t.is_empty() {
                None
            } else {
                Some(t.iter().sum::<u64>() / t.len() as u64)
            }
        })
    }

    /// Get all command statistics
    pub fn get_command_stats(&self) -> HashMap<String, CommandStats> {
        let outcomes = self.outcomes.read().unwrap_or_else(PoisonError::into_inner);

        outcomes
            .iter()
            .map(|(command, counts)| {
                let invocations = counts.values().sum::<u64>();
                let errors = Outcome::ALL
                    .iter()
                    .filter(|outcome| outcome.is_error())
                    .filter_map(|outcome| counts.get(outcome.label()))
                    .sum::<u64>();
                let reliability = if invocations == 0 {
                    100.0
                } else {
                    ((invocations - errors) as f64 / invocations as f64) * 100.0
                };

                (
                    command.clone(),
                    CommandStats {
                        invocations,
                        outcomes: counts.clone(),
                        avg_response_time: self.get_avg_response_time(command),
                        reliability,
                    },
                )
            })
            .collect()
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics for a single command
#[derive(Debug, Clone, Serialize)]
pub struct CommandStats {
    pub invocations: u64,
    pub outcomes: HashMap<&'static str, u64>,
    pub avg_response_time: Option<u64>,
    pub reliability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;

    #[test]
    fn test_metrics() {
        let metrics = Metrics::new();

        metrics.record("google", Outcome::Image, 100);
        metrics.record("google", Outcome::Notice, 300);
        metrics.record("google", Outcome::SearchError, 200);
        metrics.record("google", Outcome::Image, 200);

        assert_eq!(metrics.get_total_commands(), 4);
        assert_eq!(metrics.get_avg_response_time("google"), Some(200));

        let stats = metrics.get_command_stats();
        let google = &stats["google"];
        assert_eq!(google.invocations, 4);
        assert_eq!(google.outcomes["image"], 2);
        assert_eq!(google.outcomes["search_error"], 1);
        assert_eq!(google.reliability, 75.0);
    }

    #[test]
    fn test_response_time_window() {
        let metrics = Metrics::new();
        for _ in 0..RESPONSE_TIME_WINDOW {
            metrics.record("google", Outcome::Image, 10);
        }
        metrics.record("google", Outcome::Image, 10 + RESPONSE_TIME_WINDOW as u64 * 10);
        assert_eq!(metrics.get_avg_response_time("google"), Some(20));
    }

    #[test]
    fn test_upload_errors_lower_reliability() {
        let metrics = Metrics::new();
        metrics.record("google", Outcome::UploadError, 50);
        metrics.record("google", Outcome::SearchError, 50);
        metrics.record("google", Outcome::Notice, 50);
        metrics.record("google", Outcome::Image, 50);
        metrics.record("google", Outcome::Image, 50);

        let stats = metrics.get_command_stats();
        assert_eq!(stats["google"].reliability, 60.0);
    }

    #[test]
    fn test_outcome_of() {
        assert_eq!(Outcome::of(&Ok(Message::notice("x"))), Outcome::Notice);
        let err = Err(CommandError::Search(SearchError::NoItems));
        assert_eq!(Outcome::of(&err), Outcome::SearchError);
        assert!(Outcome::of(&err).is_error());
    }
}
