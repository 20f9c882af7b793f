//! Performance monitoring utilities.
//!
//! Every pointer handler must finish well inside a frame so drags and pinches
//! track the finger. This module times handlers and scene updates and warns
//! through `tracing` when one runs long.
//!
//! Enable hierarchical scope tracing with the `profiling` feature flag:
//! ```toml
//! [dependencies]
//! linkboard = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn rebuild() {
//!     profile_scope!("Scene::build");
//!     // ... work ...
//! }
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::{debug, warn};

/// Budget for one input handler (a quarter of a 60 FPS frame)
pub const HANDLER_BUDGET_MS: f64 = 4.0;

/// Number of samples to keep per operation
const STATS_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Operation Statistics
// ============================================================================

/// Rolling timing statistics for one operation.
#[derive(Debug, Clone)]
pub struct OperationStats {
    samples: VecDeque<f64>,
    count: u64,
    min_ms: f64,
    max_ms: f64,
    sum_ms: f64,
}

impl Default for OperationStats {
    fn default() -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            min_ms: f64::MAX,
            max_ms: 0.0,
            sum_ms: 0.0,
        }
    }
}

impl OperationStats {
    pub fn record(&mut self, ms: f64) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.min_ms = self.min_ms.min(ms);
        self.max_ms = self.max_ms.max(ms);
    }

    /// Average over the retained samples.
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted[idx.min(sorted.len() - 1)]
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn max_ms(&self) -> f64 {
        self.max_ms
    }
}

/// Per-handler timing collected by the editor.
#[derive(Debug, Default)]
pub struct InteractionStats {
    operations: HashMap<&'static str, OperationStats>,
    over_budget: u64,
}

impl InteractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one handler run, warning when it blew the budget.
    pub fn record(&mut self, name: &'static str, elapsed_ms: f64) {
        self.operations.entry(name).or_default().record(elapsed_ms);
        if elapsed_ms > HANDLER_BUDGET_MS {
            self.over_budget += 1;
            warn!(
                handler = name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                budget_ms = HANDLER_BUDGET_MS,
                "Slow input handler"
            );
        }
    }

    pub fn get(&self, name: &str) -> Option<&OperationStats> {
        self.operations.get(name)
    }

    pub fn over_budget_count(&self) -> u64 {
        self.over_budget
    }

    /// Log the slowest handlers at debug level.
    pub fn log_summary(&self) {
        let mut ops: Vec<_> = self.operations.iter().collect();
        ops.sort_by(|a, b| b.1.average().total_cmp(&a.1.average()));
        for (name, stats) in ops.iter().take(5) {
            debug!(
                "{}: avg={:.2}ms, p95={:.2}ms, max={:.2}ms, count={}",
                name,
                stats.average(),
                stats.p95(),
                stats.max_ms,
                stats.count
            );
        }
    }

    pub fn reset(&mut self) {
        self.operations.clear();
        self.over_budget = 0;
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// Logs its lifetime on drop when it exceeds the threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    /// Timer with a 1ms threshold
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            if elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Run `f` and return its result with the elapsed milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}
