//! Splitwatch simulator
//!
//! Runs the client against a scripted lap timer on the host and prints each
//! redrawn screen through `log`. Pass a TOML file to override the embedded
//! configuration:
//!
//! ```text
//! RUST_LOG=debug cargo run -p splitwatch-sim -- my-config.toml
//! ```

use embassy_executor::Spawner;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;
use log::{error, info, warn};
use static_cell::StaticCell;

use splitwatch_client::channels::push;
use splitwatch_client::config::{ClientConfig, DisplayConfig, RefreshConfig};
use splitwatch_client::{
    load_config, parse_config, run_dispatch, run_refresh, EmbassyClock, Inbox, ScreenSink,
    Session, TickerFrames,
};
use splitwatch_core::ConnectionStatus;
use splitwatch_protocol::Command;

mod device;
mod terminal;

use device::{device_task, SimLink};
use terminal::TerminalBackend;

/// Embedded default configuration
const EMBEDDED_CONFIG: &str = include_str!("../splitwatch.toml");

type SimSession = Session<CriticalSectionRawMutex, EmbassyClock, &'static SimLink>;

static INBOX: Inbox<CriticalSectionRawMutex> = Channel::new();
static LINK: SimLink = SimLink::new();
static SESSION: StaticCell<SimSession> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    info!("Splitwatch simulator starting...");

    let config = load();
    let session = SESSION.init(Session::new(EmbassyClock::new(), &LINK));

    spawner.spawn(dispatch_task(session)).unwrap();
    spawner
        .spawn(refresh_task(session, config.refresh.clone(), config.display.clone()))
        .unwrap();
    spawner.spawn(device_task(&LINK, &INBOX)).unwrap();
    spawner.spawn(operator_task(session)).unwrap();

    info!("All tasks spawned");
}

/// Load configuration from the first argument, or the embedded defaults
fn load() -> ClientConfig {
    let loaded = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            match std::fs::read(&path) {
                Ok(bytes) => load_config(&bytes),
                Err(e) => {
                    error!("Cannot read {}: {}", path, e);
                    parse_config(EMBEDDED_CONFIG)
                }
            }
        }
        None => parse_config(EMBEDDED_CONFIG),
    };

    loaded.unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        ClientConfig::default()
    })
}

#[embassy_executor::task]
async fn dispatch_task(session: &'static SimSession) {
    run_dispatch(session, &INBOX).await;
}

#[embassy_executor::task]
async fn refresh_task(session: &'static SimSession, refresh: RefreshConfig, display: DisplayConfig) {
    let mut frames = TickerFrames::new(&refresh);
    let mut sink = ScreenSink::new(display, TerminalBackend::new());
    run_refresh(session, &mut frames, &mut sink).await;
}

/// Scripted button presses and link changes
#[embassy_executor::task]
async fn operator_task(session: &'static SimSession) {
    Timer::after_millis(200).await;
    press(session, Command::Start).await;

    push(&INBOX, ConnectionStatus::Connecting.into()).await;
    Timer::after_millis(300).await;
    LINK.set_up(true, &INBOX).await;

    // Full run: laps and goal arrive from the device on their own
    Timer::after_millis(500).await;
    press(session, Command::Start).await;
    Timer::after_millis(5_000).await;
    press(session, Command::Stop).await;
    Timer::after_millis(1_000).await;
    press(session, Command::Reset).await;

    // Second run, cut short by a dropped link
    Timer::after_millis(500).await;
    press(session, Command::Start).await;
    Timer::after_millis(1_500).await;
    LINK.set_up(false, &INBOX).await;
    Timer::after_millis(500).await;
    press(session, Command::Stop).await;

    Timer::after_millis(500).await;
    info!("Simulation finished");
    std::process::exit(0);
}

async fn press(session: &SimSession, command: Command) {
    info!("Operator presses {}", command);
    if let Err(e) = session.send(command).await {
        warn!("{}: {}", command, e);
    }
}
