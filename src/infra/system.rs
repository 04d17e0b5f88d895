//! Process and host memory readings for the status endpoint.

use sysinfo::{ProcessesToUpdate, System};

/// Memory figures in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemorySnapshot {
    /// Resident set size of this process
    pub rss: u64,
    /// Virtual memory of this process
    pub virtual_memory: u64,
    pub system_total: u64,
    pub system_used: u64,
}

/// Sample memory usage of the current process and host.
///
/// Figures the platform cannot report are zero.
pub fn memory_snapshot() -> MemorySnapshot {
    let mut system = System::new();
    system.refresh_memory();

    let (rss, virtual_memory) = match sysinfo::get_current_pid() {
        Ok(pid) => {
            system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
            system
                .process(pid)
                .map(|process| (process.memory(), process.virtual_memory()))
                .unwrap_or_default()
        }
        Err(e) => {
            tracing::debug!(error = e, "Current pid unavailable");
            (0, 0)
        }
    };

    MemorySnapshot {
        rss,
        virtual_memory,
        system_total: system.total_memory(),
        system_used: system.used_memory(),
    }
}
