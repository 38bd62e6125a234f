//! Panel identity.

use std::borrow::Borrow;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_AUTO_VALUE: AtomicUsize = AtomicUsize::new(0);

/// Identity a group matches against its open-set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccordionValue(String);

impl AccordionValue {
    /// Create a value from caller-supplied text.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a process-unique value (`accordion-0`, `accordion-1`, ...).
    pub fn auto() -> Self {
        let n = NEXT_AUTO_VALUE.fetch_add(1, Ordering::SeqCst);
        Self(format!("accordion-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Reset the auto-value counter back to zero.
///
/// Only meant for isolating tests; values generated before the reset may
/// collide with values generated after it.
pub fn reset_auto_values() {
    NEXT_AUTO_VALUE.store(0, Ordering::SeqCst);
}

impl fmt::Display for AccordionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AccordionValue {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AccordionValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccordionValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for AccordionValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for AccordionValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AccordionValue {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
