//! A host that draws nothing and logs everything.

use std::sync::Mutex;

use accordion::{AccordionState, Host};
use log::info;

/// Fixed-size host for one panel.
pub struct LogHost {
    name: String,
    lines: u16,
    max_height: Mutex<Option<u16>>,
}

impl LogHost {
    pub fn new(name: impl Into<String>, lines: u16) -> Self {
        Self {
            name: name.into(),
            lines,
            max_height: Mutex::new(None),
        }
    }

    /// The max-height override currently applied, if any.
    pub fn max_height(&self) -> Option<u16> {
        *self
            .max_height
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Host for LogHost {
    fn wrapper_height(&self) -> u16 {
        self.lines
    }

    fn content_height(&self) -> u16 {
        self.lines
    }

    fn set_content_max_height(&self, height: Option<u16>) {
        info!("[{}] max-height {:?}", self.name, height);
        *self
            .max_height
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = height;
    }

    fn render_requested(&self, state: AccordionState) {
        info!("[{}] render {}", self.name, state);
    }
}
