//! Dark/light theme flag.

use tokio::sync::watch;
use tracing::debug;

/// Single boolean read by the presentation layer. Dark by default.
#[derive(Debug)]
pub struct ThemeStore {
    tx: watch::Sender<bool>,
}

impl ThemeStore {
    pub fn new(dark: bool) -> Self {
        let (tx, _) = watch::channel(dark);
        Self { tx }
    }

    pub fn is_dark(&self) -> bool {
        *self.tx.borrow()
    }

    /// Flip the theme. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        let dark = !self.is_dark();
        self.set_dark(dark);
        dark
    }

    pub fn set_dark(&mut self, dark: bool) {
        debug!(dark, "theme set");
        self.tx.send_replace(dark);
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(true)
    }
}
