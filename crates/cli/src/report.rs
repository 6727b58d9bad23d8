//! Console progress reporting, driven by the core's status events.

use mazegen_core::{StatusEvent, StatusSink};

/// Prints phase progress to standard output unless silenced. The core never
/// writes to the console itself; this sink is the only place that happens.
pub struct ConsoleReport {
    silent: bool,
}

impl ConsoleReport {
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }
}

impl StatusSink for ConsoleReport {
    fn event(&mut self, event: &StatusEvent) {
        if self.silent {
            return;
        }
        match event {
            StatusEvent::LayoutComputed { nx, ny, cell_mm } => {
                println!("Room count: {nx} x {ny}, cell side {cell_mm:.2} mm");
            }
            StatusEvent::AttemptStarted(attempt) => {
                println!("{attempt}. attempt to find a solution...");
            }
            StatusEvent::PathsCarved => println!("Paths carved."),
            StatusEvent::IslandsFilled(count) => {
                if *count > 0 {
                    println!("Filled {count} isolated areas with decoy paths.");
                }
            }
            StatusEvent::Joined(a, b) => println!("  - joined paths {a} and {b}"),
            StatusEvent::VerifyOk => println!("Verification passed."),
            StatusEvent::VerifyFailed(reason) => println!("Verification failed: {reason}"),
            StatusEvent::Aborted(reason) => println!("Aborted: {reason}"),
            StatusEvent::Completed => println!("Done."),
        }
    }
}
