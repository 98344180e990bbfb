//! Startup loading-state gate.
//!
//! The gate and the initial fetch are started together and never wait on each
//! other. Under [`LoadingPolicy::Timer`] a slow network can end the loading
//! state before any data arrived; that is the accepted behavior.

use std::time::{Duration, Instant};

use crate::config::LoadingPolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingGate {
    started: Instant,
    min_display: Duration,
    policy: LoadingPolicy,
    fetch_settled: bool,
}

impl LoadingGate {
    pub fn new(started: Instant, min_display: Duration, policy: LoadingPolicy) -> Self {
        Self {
            started,
            min_display,
            policy,
            fetch_settled: false,
        }
    }

    /// Record that the initial fetch finished, successfully or not.
    pub fn mark_fetch_settled(&mut self) {
        self.fetch_settled = true;
    }

    pub fn fetch_settled(&self) -> bool {
        self.fetch_settled
    }

    pub fn is_loading(&self, now: Instant) -> bool {
        let timer_running = now.saturating_duration_since(self.started) < self.min_display;
        match self.policy {
            LoadingPolicy::Timer => timer_running,
            LoadingPolicy::TimerAndFetch => timer_running || !self.fetch_settled,
        }
    }
}
