//! Attribute projection.
//!
//! Turns panel state into the flags and region attributes a host applies to
//! its elements. Names here are matched by external stylesheets and must not
//! change.

use log::trace;
use tokio::runtime::Handle;

use crate::accordion::{Accordion, Inner, ToggleIconSlot};
use crate::config;

pub const HEADER_ID: &str = "header";
pub const CONTENT_ID: &str = "content";
pub const CONTENT_WRAPPER_ID: &str = "content-wrapper";

/// Attributes of one labelled region (header or content).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: &'static str,
    /// Styling part, with an `expanded` modifier while open.
    pub part: String,
    pub role: Option<&'static str>,
    pub aria_controls: Option<&'static str>,
    pub aria_labelledby: Option<&'static str>,
}

/// Everything a host needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionView {
    /// Active root classes, in a stable order.
    pub classes: Vec<&'static str>,
    pub expanded: bool,
    pub header: Region,
    pub content: Region,
    pub content_wrapper_id: &'static str,
    pub toggle_icon_slot: ToggleIconSlot,
}

impl AccordionView {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    /// Classes as a single space-separated string.
    pub fn class_list(&self) -> String {
        self.classes.join(" ")
    }
}

impl Accordion {
    /// Project the current state into render attributes.
    ///
    /// Also pushes `aria-expanded` onto the header control, when the host has
    /// one.
    pub fn view(&self) -> AccordionView {
        let panel = self.panel_state();
        let expanded = panel.state.is_expanded();
        let mode = config::global().mode;

        let mut classes = vec![mode.class_name(), panel.state.class_name()];
        let flags = [
            (panel.is_next, "accordion-next"),
            (panel.is_previous, "accordion-previous"),
            (self.is_disabled(), "accordion-disabled"),
            (self.is_readonly(), "accordion-readonly"),
            (self.should_animate(), "accordion-animated"),
        ];
        classes.extend(flags.iter().filter(|(on, _)| *on).map(|(_, class)| *class));

        self.inner.project_aria(expanded);

        AccordionView {
            classes,
            expanded,
            header: Region {
                id: HEADER_ID,
                part: part_name("header", expanded),
                role: None,
                aria_controls: Some(CONTENT_ID),
                aria_labelledby: None,
            },
            content: Region {
                id: CONTENT_ID,
                part: part_name("content", expanded),
                role: Some("region"),
                aria_controls: None,
                aria_labelledby: Some(HEADER_ID),
            },
            content_wrapper_id: CONTENT_WRAPPER_ID,
            toggle_icon_slot: self.toggle_icon_slot(),
        }
    }
}

fn part_name(base: &str, expanded: bool) -> String {
    if expanded {
        format!("{base} expanded")
    } else {
        base.to_string()
    }
}

impl Inner {
    /// Set `aria-expanded` on the header control. No-op without one.
    pub(crate) fn project_aria(&self, expanded: bool) {
        let Some(control) = self.host.as_ref().and_then(|host| host.header_control()) else {
            return;
        };
        trace!("Accordion '{}': aria-expanded={}", self.value(), expanded);
        control.set_attribute("aria-expanded", if expanded { "true" } else { "false" });
    }

    /// Project ARIA once the first frame after attach has been painted.
    pub(crate) fn schedule_first_paint(&self) {
        let (Ok(runtime), Some(inner)) = (Handle::try_current(), self.strong()) else {
            self.project_aria(self.state().is_expanded());
            return;
        };
        runtime.spawn(async move {
            inner.clock.next_frame().await;
            inner.project_aria(inner.state().is_expanded());
        });
    }
}
