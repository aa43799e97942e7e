//! Process resource sampling for the CPU and memory gauges.
//!
//! A scrape of `/metrics` refreshes two gauges with the current process's
//! CPU and memory usage before exporting. Sampling is strictly best-effort:
//! any failure to query the OS is logged and swallowed, the gauges keep
//! their previous values, and the scrape succeeds regardless.

use std::sync::Mutex;

use sysinfo::{Pid, System};

/// One reading of this process's resource usage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceUsage {
    /// CPU usage as a percentage of one core.
    pub cpu_percent: f64,
    /// Resident set size as a percentage of total system memory.
    pub memory_percent: f64,
}

/// Samples CPU and memory usage of the current process.
///
/// Holds one `sysinfo::System` behind a mutex so consecutive samples share
/// refresh state; CPU usage is computed from the delta since the previous
/// refresh, so the first sample after startup reads 0 CPU.
pub struct ResourceSampler {
    pid: Pid,
    system: Mutex<System>,
}

impl ResourceSampler {
    pub fn new() -> Self {
        Self {
            pid: Pid::from(std::process::id() as usize),
            system: Mutex::new(System::new()),
        }
    }

    /// Read current CPU and memory usage for this process.
    ///
    /// Returns `None` (after logging a warning) when the process cannot be
    /// queried or total system memory reads as zero; callers leave the
    /// gauges at their previous values in that case.
    pub fn sample(&self) -> Option<ResourceUsage> {
        let mut system = match self.system.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Resource sampler lock poisoned; reusing inner state");
                poisoned.into_inner()
            }
        };

        system.refresh_memory();
        if !system.refresh_process(self.pid) {
            tracing::warn!(
                pid = %self.pid,
                "Failed to refresh process info; leaving resource gauges unchanged"
            );
            return None;
        }

        let Some(process) = system.process(self.pid) else {
            tracing::warn!(
                pid = %self.pid,
                "Process missing from system table; leaving resource gauges unchanged"
            );
            return None;
        };

        let total_memory = system.total_memory();
        if total_memory == 0 {
            tracing::warn!("Total system memory reported as zero; leaving resource gauges unchanged");
            return None;
        }

        let cpu_percent = f64::from(process.cpu_usage());
        let memory_percent = process.memory() as f64 / total_memory as f64 * 100.0;

        Some(ResourceUsage {
            cpu_percent,
            memory_percent,
        })
    }
}

impl Default for ResourceSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_reads_current_process() {
        let sampler = ResourceSampler::new();
        let usage = sampler
            .sample()
            .expect("sampling the test process should succeed");

        assert!(usage.cpu_percent >= 0.0);
        assert!(usage.memory_percent >= 0.0);
        assert!(usage.memory_percent <= 100.0);
    }

    #[test]
    fn test_consecutive_samples_reuse_state() {
        let sampler = ResourceSampler::new();

        let first = sampler.sample().expect("first sample should succeed");
        let second = sampler.sample().expect("second sample should succeed");

        // Memory stays a valid percentage across refreshes of the shared
        // System state.
        assert!(first.memory_percent <= 100.0);
        assert!(second.memory_percent <= 100.0);
    }
}
