//! Expand/collapse state machine.

use std::fmt;

/// Visual state of an accordion panel.
///
/// Exactly one variant holds at any time. `Collapsing` and `Expanding` are
/// transient and resolve to their terminal counterpart unless a newer
/// command pre-empts them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AccordionState {
    /// Content hidden.
    #[default]
    Collapsed,
    /// Content animating towards hidden.
    Collapsing,
    /// Content fully shown.
    Expanded,
    /// Content animating towards shown.
    Expanding,
}

impl AccordionState {
    /// Whether the panel presents as open (`Expanded` or `Expanding`).
    pub fn is_expanded(self) -> bool {
        matches!(self, AccordionState::Expanded | AccordionState::Expanding)
    }

    /// Whether this is an in-flight animation state.
    pub fn is_transient(self) -> bool {
        matches!(self, AccordionState::Collapsing | AccordionState::Expanding)
    }

    /// The terminal state this one resolves to.
    pub fn resolved(self) -> Self {
        match self {
            AccordionState::Collapsed | AccordionState::Collapsing => AccordionState::Collapsed,
            AccordionState::Expanded | AccordionState::Expanding => AccordionState::Expanded,
        }
    }

    /// Direction a user toggle should request from this state.
    ///
    /// Returns `true` (expand) for `Collapsed` and `Collapsing`.
    pub fn toggle_target(self) -> bool {
        matches!(self, AccordionState::Collapsed | AccordionState::Collapsing)
    }

    /// Root class name for this state.
    pub fn class_name(self) -> &'static str {
        match self {
            AccordionState::Collapsed => "accordion-collapsed",
            AccordionState::Collapsing => "accordion-collapsing",
            AccordionState::Expanded => "accordion-expanded",
            AccordionState::Expanding => "accordion-expanding",
        }
    }
}

impl fmt::Display for AccordionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccordionState::Collapsed => "collapsed",
            AccordionState::Collapsing => "collapsing",
            AccordionState::Expanded => "expanded",
            AccordionState::Expanding => "expanding",
        };
        f.write_str(name)
    }
}

/// Full mutable state of one panel.
///
/// `is_next` is true when the structurally *previous* sibling is open and
/// `is_previous` when the structurally *next* sibling is open. Styling rules
/// key off these exact names, so the mapping stays as it is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub state: AccordionState,
    pub is_next: bool,
    pub is_previous: bool,
}

impl PanelState {
    /// Set the machine state. Returns `true` if it changed.
    pub(crate) fn transition(&mut self, to: AccordionState) -> bool {
        if self.state == to {
            return false;
        }
        self.state = to;
        true
    }

    /// Clear both neighbour flags.
    pub(crate) fn clear_neighbors(&mut self) {
        self.is_next = false;
        self.is_previous = false;
    }
}
