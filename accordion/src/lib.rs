//! Accordion panel core.
//!
//! An [`Accordion`] is one collapsible panel inside a group of siblings. The
//! group ([`AccordionGroup`]) owns which panels are open; the panel follows
//! it, animating its content height on a [`Host`] across frame boundaries and
//! asking the group to toggle when the user activates the header.

pub mod accordion;
pub mod animation;
pub mod config;
pub mod frame;
pub mod group;
pub mod host;
pub mod render;
pub mod state;
pub mod value;

pub use accordion::{Accordion, AccordionBuilder, ToggleIconSlot};
pub use animation::TRANSITION_TIMEOUT;
pub use config::{Config, ConfigError, Mode};
pub use frame::FrameClock;
pub use group::{AccordionGroup, GroupMember, MemberKey, MemoryGroup, Neighbors, OpenSet};
pub use host::{HeaderControl, Host};
pub use render::{AccordionView, Region};
pub use state::{AccordionState, PanelState};
pub use value::{AccordionValue, reset_auto_values};

pub mod prelude {
    pub use crate::accordion::{Accordion, ToggleIconSlot};
    pub use crate::group::{AccordionGroup, MemoryGroup, OpenSet};
    pub use crate::host::{HeaderControl, Host};
    pub use crate::state::AccordionState;
    pub use crate::value::AccordionValue;
}
