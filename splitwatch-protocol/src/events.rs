//! Timing events reported by the lap timer

/// Kind of timing event reported by the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RemoteEventKind {
    /// Run started (or already running when the client attached)
    Started,
    /// First intermediate mark
    LapOne,
    /// Second intermediate mark
    LapTwo,
    /// Goal line crossed
    Finished,
    /// Run stopped by the device or by a `stop` command
    Stopped,
    /// Device cleared its run
    Reset,
}

// Wire format values
const EVENT_STARTED: i64 = 1;
const EVENT_LAP_ONE: i64 = 2;
const EVENT_LAP_TWO: i64 = 3;
const EVENT_FINISHED: i64 = 4;
const EVENT_STOPPED: i64 = 5;
const EVENT_RESET: i64 = 6;

impl RemoteEventKind {
    /// Parse an event kind from its wire code
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            EVENT_STARTED => Some(RemoteEventKind::Started),
            EVENT_LAP_ONE => Some(RemoteEventKind::LapOne),
            EVENT_LAP_TWO => Some(RemoteEventKind::LapTwo),
            EVENT_FINISHED => Some(RemoteEventKind::Finished),
            EVENT_STOPPED => Some(RemoteEventKind::Stopped),
            EVENT_RESET => Some(RemoteEventKind::Reset),
            _ => None,
        }
    }

    /// Convert to wire code
    pub fn code(self) -> i64 {
        match self {
            RemoteEventKind::Started => EVENT_STARTED,
            RemoteEventKind::LapOne => EVENT_LAP_ONE,
            RemoteEventKind::LapTwo => EVENT_LAP_TWO,
            RemoteEventKind::Finished => EVENT_FINISHED,
            RemoteEventKind::Stopped => EVENT_STOPPED,
            RemoteEventKind::Reset => EVENT_RESET,
        }
    }
}

/// One decoded notification
///
/// `time_ms` is the device's own elapsed reading when the event happened,
/// not a wall-clock timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventRecord {
    pub kind: RemoteEventKind,
    pub time_ms: u64,
}

impl EventRecord {
    pub const fn new(kind: RemoteEventKind, time_ms: u64) -> Self {
        Self { kind, time_ms }
    }
}
