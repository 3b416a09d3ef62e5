//! Scripted lap timer
//!
//! Stands in for the radio link and the timer at the other end. Commands
//! written through [`SimLink`] reach [`device_task`], which keeps its own
//! elapsed time and pushes JSON notifications through the real decode path.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Timer};
use log::{debug, info, warn};

use splitwatch_client::channels::{push, push_payload};
use splitwatch_client::{Inbox, Transport, TransportError};
use splitwatch_core::ConnectionStatus;
use splitwatch_protocol::{Command, RemoteEventKind};

/// Marks the timer produces by itself once started (ms into the run)
const MARKS: [(u64, RemoteEventKind); 3] = [
    (1_200, RemoteEventKind::LapOne),
    (2_500, RemoteEventKind::LapTwo),
    (3_800, RemoteEventKind::Finished),
];

/// Simulated radio link
pub struct SimLink {
    up: AtomicBool,
    commands: Channel<CriticalSectionRawMutex, Command, 4>,
}

impl SimLink {
    pub const fn new() -> Self {
        Self {
            up: AtomicBool::new(false),
            commands: Channel::new(),
        }
    }

    /// Bring the link up or down, reporting the change to the client
    pub async fn set_up(&self, up: bool, inbox: &Inbox<CriticalSectionRawMutex>) {
        self.up.store(up, Ordering::Release);
        let status = if up {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        };
        push(inbox, status.into()).await;
    }

    pub fn is_up(&self) -> bool {
        self.up.load(Ordering::Acquire)
    }
}

impl Transport for SimLink {
    async fn write(&self, payload: &[u8]) -> Result<(), TransportError> {
        if !self.is_up() {
            return Err(TransportError::Disconnected);
        }
        let command = core::str::from_utf8(payload)
            .ok()
            .and_then(|text| text.parse::<Command>().ok())
            .ok_or(TransportError::Rejected)?;

        // Radio latency
        Timer::after_millis(15).await;
        self.commands.send(command).await;
        Ok(())
    }
}

/// The timer's own view of the run
struct FakeTimer {
    started: Option<Instant>,
    frozen_ms: u64,
    next_mark: usize,
}

impl FakeTimer {
    const fn new() -> Self {
        Self {
            started: None,
            frozen_ms: 0,
            next_mark: MARKS.len(),
        }
    }

    fn elapsed_ms(&self) -> u64 {
        match self.started {
            Some(start) => start.elapsed().as_millis(),
            None => self.frozen_ms,
        }
    }

    /// When the next self-generated mark is due
    fn next_mark_at(&self) -> Option<(Instant, RemoteEventKind)> {
        let start = self.started?;
        let (offset, kind) = MARKS.get(self.next_mark)?;
        Some((start + Duration::from_millis(*offset), *kind))
    }

    fn freeze(&mut self) -> u64 {
        self.frozen_ms = self.elapsed_ms();
        self.started = None;
        self.frozen_ms
    }

    /// Apply a command, returning the event to announce
    fn apply(&mut self, command: Command) -> Option<(RemoteEventKind, u64)> {
        match command {
            Command::Start => {
                self.started = Some(Instant::now());
                self.frozen_ms = 0;
                self.next_mark = 0;
                Some((RemoteEventKind::Started, 0))
            }
            Command::Stop if self.started.is_some() => {
                Some((RemoteEventKind::Stopped, self.freeze()))
            }
            Command::Stop => None,
            Command::Reset => {
                self.started = None;
                self.frozen_ms = 0;
                self.next_mark = MARKS.len();
                Some((RemoteEventKind::Reset, 0))
            }
        }
    }

    /// Produce the mark that just fell due
    fn fire_mark(&mut self, kind: RemoteEventKind) -> (RemoteEventKind, u64) {
        self.next_mark += 1;
        let time_ms = if kind == RemoteEventKind::Finished {
            self.freeze()
        } else {
            self.elapsed_ms()
        };
        (kind, time_ms)
    }
}

/// Push one notification the way the radio would deliver it
async fn notify(
    link: &SimLink,
    inbox: &Inbox<CriticalSectionRawMutex>,
    kind: RemoteEventKind,
    time_ms: u64,
) {
    if !link.is_up() {
        debug!("Link down, {:?} never reaches the client", kind);
        return;
    }
    let payload = format!("{{\"event\":{},\"time_ms\":{}}}", kind.code(), time_ms);
    debug!("Device -> {}", payload);
    push_payload(inbox, payload.as_bytes()).await;
}

/// Fake timer task
#[embassy_executor::task]
pub async fn device_task(link: &'static SimLink, inbox: &'static Inbox<CriticalSectionRawMutex>) {
    info!("Device task started");

    let mut timer = FakeTimer::new();

    loop {
        let due = timer.next_mark_at();
        let wait_mark = async {
            match due {
                Some((at, _)) => Timer::at(at).await,
                None => core::future::pending::<()>().await,
            }
        };

        match select(link.commands.receive(), wait_mark).await {
            Either::First(command) => {
                info!("Device <- {}", command);
                match timer.apply(command) {
                    Some((kind, time_ms)) => notify(link, inbox, kind, time_ms).await,
                    None => warn!("Device ignored {}", command),
                }
            }
            Either::Second(()) => {
                if let Some((_, kind)) = due {
                    let (kind, time_ms) = timer.fire_mark(kind);
                    notify(link, inbox, kind, time_ms).await;
                    if kind == RemoteEventKind::LapOne && link.is_up() {
                        // A garbled notification right after the first lap
                        push_payload(inbox, b"{\"event\":2,\"time_").await;
                    }
                }
            }
        }
    }
}
