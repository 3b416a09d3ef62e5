//! Display adapters
//!
//! A [`DisplaySink`] receives snapshots from the refresh task. [`ScreenSink`]
//! is the stock one: it lays the snapshot out with a [`Renderer`] and pushes
//! changed screens to any [`DisplayBackend`].

use splitwatch_core::config::DisplayConfig;
use splitwatch_core::Snapshot;
use splitwatch_display::{present, DisplayBackend, DisplayError, Renderer, Screen};

/// Consumer of display snapshots
pub trait DisplaySink {
    /// Show a snapshot
    fn show(&mut self, snapshot: &Snapshot) -> Result<(), DisplayError>;
}

impl<S: DisplaySink + ?Sized> DisplaySink for &mut S {
    fn show(&mut self, snapshot: &Snapshot) -> Result<(), DisplayError> {
        (**self).show(snapshot)
    }
}

/// Renders snapshots onto a text display backend
pub struct ScreenSink<B: DisplayBackend> {
    renderer: Renderer,
    backend: B,
}

impl<B: DisplayBackend> ScreenSink<B> {
    pub fn new(config: DisplayConfig, backend: B) -> Self {
        Self {
            renderer: Renderer::new(config),
            backend,
        }
    }

    /// Get the last rendered screen
    pub fn screen(&self) -> &Screen {
        self.renderer.screen()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: DisplayBackend> DisplaySink for ScreenSink<B> {
    fn show(&mut self, snapshot: &Snapshot) -> Result<(), DisplayError> {
        self.renderer.render(snapshot);
        if present(self.renderer.screen_mut(), &mut self.backend)? {
            trace!("Screen redrawn");
        }
        Ok(())
    }
}
