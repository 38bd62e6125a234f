//! Rendering host interface.
//!
//! A host is whatever draws the panel: it owns the content region and its
//! inner wrapper, answers measurement queries, applies the max-height
//! override that drives the height transition, and tells the panel when that
//! transition has finished (via [`Accordion::transition_ended`]).
//!
//! A panel created without a host is treated as headless: it never animates.
//!
//! During an animation step the panel holds its sequence lock while calling
//! `set_content_max_height` and `render_requested`. Those callbacks must not
//! issue commands to the same panel.
//!
//! [`Accordion::transition_ended`]: crate::Accordion::transition_ended

use std::sync::Arc;

use crate::state::AccordionState;

/// Rendering surface for a single panel.
pub trait Host: Send + Sync + 'static {
    /// Natural (unconstrained) height of the inner content wrapper.
    fn wrapper_height(&self) -> u16;

    /// Current rendered height of the content region.
    fn content_height(&self) -> u16;

    /// Set or remove (`None`) the explicit max-height on the content region.
    fn set_content_max_height(&self, height: Option<u16>);

    /// Platform-level reduced-motion preference.
    fn prefers_reduced_motion(&self) -> bool {
        false
    }

    /// Focusable control inside the slotted header item, if there is one.
    fn header_control(&self) -> Option<Arc<dyn HeaderControl>> {
        None
    }

    /// Called after every state change so the host can re-render.
    fn render_requested(&self, _state: AccordionState) {}
}

/// An element that accepts attributes (the header's focusable control).
pub trait HeaderControl: Send + Sync {
    fn set_attribute(&self, name: &str, value: &str);
}
