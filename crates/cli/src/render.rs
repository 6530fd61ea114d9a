//! Text rendering of snapshots.
//!
//! Draws the same panels an interactive front-end shows: a memory bar, the CPU
//! occupant, both queues with per-process rows, and the finished tail.

use std::fmt::Write;

use memsched_core::{Pid, Simulator, Snapshot};

const BAR_WIDTH: u64 = 30;

/// Renders a memory usage bar such as `[#####-----]`.
pub fn memory_bar(used: u64, capacity: u64) -> String {
    let filled = if capacity == 0 {
        0
    } else {
        // Widened so capacities near u64::MAX cannot overflow.
        let scaled = (u128::from(used) * u128::from(BAR_WIDTH)).div_ceil(u128::from(capacity));
        u64::try_from(scaled).map_or(BAR_WIDTH, |n| n.min(BAR_WIDTH))
    };
    let mut bar = String::with_capacity(BAR_WIDTH as usize + 2);
    bar.push('[');
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '-' });
    }
    bar.push(']');
    bar
}

fn queue_rows(out: &mut String, label: &str, sim: &Simulator, pids: &[Pid]) {
    let _ = writeln!(out, "{label:<9}({})", pids.len());
    for &pid in pids {
        if let Some(p) = sim.process(pid) {
            let _ = writeln!(
                out,
                "  {:>4}  {:<16} {:>6} MB  {:>3}/{:<3} ticks",
                p.pid(),
                p.name(),
                p.memory_mb(),
                p.remaining(),
                p.duration()
            );
        }
    }
}

/// Formats a snapshot as a multi-line panel.
///
/// The simulator is only read to fill in queue rows, which the snapshot
/// carries as bare pids.
pub fn render(sim: &Simulator, snap: &Snapshot) -> String {
    let mut out = String::new();
    let ram = &snap.ram;
    let _ = writeln!(
        out,
        "tick {:<5} RAM {} {} / {} MB (free {} MB)",
        snap.tick,
        memory_bar(ram.used_mb, ram.capacity_mb),
        ram.used_mb,
        ram.capacity_mb,
        ram.available_mb
    );
    match &snap.cpu {
        Some(cpu) => {
            let _ = writeln!(
                out,
                "CPU      {:>4}  {:<16} remaining {}",
                cpu.pid, cpu.name, cpu.remaining
            );
        }
        None => {
            let _ = writeln!(out, "CPU      idle");
        }
    }
    queue_rows(&mut out, "READY", sim, &snap.ready);
    queue_rows(&mut out, "WAITING", sim, &snap.waiting);
    let _ = writeln!(out, "FINISHED ({})", sim.finished().len());
    for f in &snap.finished {
        let _ = writeln!(out, "  {:>4}  {:<16} {} ticks", f.pid, f.name, f.duration);
    }
    out
}
