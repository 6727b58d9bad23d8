//! Status events pushed to the caller at generation phase boundaries.
//! The core never writes to standard output; reporting lives behind the sink.

/// A progress event. Emitted inline, so sink implementations must not block.
#[derive(Clone, Debug, PartialEq)]
pub enum StatusEvent {
    /// The room grid has been committed: room counts and the cell side in mm.
    LayoutComputed { nx: u32, ny: u32, cell_mm: f64 },
    AttemptStarted(u32),
    PathsCarved,
    IslandsFilled(usize),
    /// Two path components were united by carving a joining wall.
    Joined(u32, u32),
    VerifyOk,
    VerifyFailed(String),
    Aborted(String),
    Completed,
}

pub trait StatusSink {
    fn event(&mut self, event: &StatusEvent);
}

/// A sink that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullStatusSink;

impl StatusSink for NullStatusSink {
    fn event(&mut self, _event: &StatusEvent) {}
}

/// A sink that records events, used by tests to assert phase boundaries.
#[derive(Clone, Debug, Default)]
pub struct RecordingStatusSink {
    pub events: Vec<StatusEvent>,
}

impl StatusSink for RecordingStatusSink {
    fn event(&mut self, event: &StatusEvent) {
        self.events.push(event.clone());
    }
}
