//! The accordion panel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use log::{debug, trace};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use crate::config;
use crate::frame::FrameClock;
use crate::group::{AccordionGroup, GroupMember, MemberKey};
use crate::host::Host;
use crate::state::{AccordionState, PanelState};
use crate::value::AccordionValue;

/// Where the header's toggle icon is slotted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleIconSlot {
    Start,
    #[default]
    End,
}

impl ToggleIconSlot {
    pub fn slot_name(self) -> &'static str {
        match self {
            ToggleIconSlot::Start => "start",
            ToggleIconSlot::End => "end",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Props {
    disabled: bool,
    readonly: bool,
    toggle_icon_slot: ToggleIconSlot,
}

/// Non-owning link to the group this panel is registered with.
struct Attachment {
    group: Weak<dyn AccordionGroup>,
    key: MemberKey,
}

/// The currently live animation sequence.
pub(crate) struct Sequence {
    pub(crate) generation: u64,
    pub(crate) token: CancellationToken,
}

pub(crate) struct Inner {
    this: Weak<Inner>,
    value: RwLock<AccordionValue>,
    props: RwLock<Props>,
    panel: RwLock<PanelState>,
    attachment: RwLock<Option<Attachment>>,
    pub(crate) host: Option<Arc<dyn Host>>,
    pub(crate) clock: FrameClock,
    pub(crate) sequence: Mutex<Option<Sequence>>,
    pub(crate) animating: AtomicBool,
    pub(crate) next_generation: AtomicU64,
    pub(crate) transition_end: Notify,
    dirty: AtomicBool,
}

/// An accordion panel.
///
/// Cheap to clone: clones share the same panel. The panel follows the
/// open-set of the group it is attached to and animates between
/// [`AccordionState`]s on the host it was built with.
///
/// # Example
///
/// ```ignore
/// let group = Arc::new(MemoryGroup::new().with_value(OpenSet::single("a")));
/// let panel = Accordion::builder().value("a").host(host).build();
/// panel.attach(group.clone());
/// assert_eq!(panel.state(), AccordionState::Expanded);
/// ```
#[derive(Clone)]
pub struct Accordion {
    pub(crate) inner: Arc<Inner>,
}

impl std::fmt::Debug for Accordion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accordion")
            .field("value", &self.value())
            .field("panel", &self.panel_state())
            .field("attached", &self.is_attached())
            .finish_non_exhaustive()
    }
}

impl Default for Accordion {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Accordion`].
#[derive(Default)]
pub struct AccordionBuilder {
    value: Option<AccordionValue>,
    host: Option<Arc<dyn Host>>,
    clock: FrameClock,
    props: Props,
}

impl AccordionBuilder {
    /// Set the panel value. Defaults to an auto-generated one.
    pub fn value(mut self, value: impl Into<AccordionValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the rendering host. Without one the panel is headless.
    pub fn host(mut self, host: Arc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    /// Set the frame clock used for animation steps.
    pub fn clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.props.disabled = disabled;
        self
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.props.readonly = readonly;
        self
    }

    pub fn toggle_icon_slot(mut self, slot: ToggleIconSlot) -> Self {
        self.props.toggle_icon_slot = slot;
        self
    }

    pub fn build(self) -> Accordion {
        let value = self.value.unwrap_or_else(AccordionValue::auto);
        let inner = Arc::new_cyclic(|this| Inner {
            this: this.clone(),
            value: RwLock::new(value),
            props: RwLock::new(self.props),
            panel: RwLock::new(PanelState::default()),
            attachment: RwLock::new(None),
            host: self.host,
            clock: self.clock,
            sequence: Mutex::new(None),
            animating: AtomicBool::new(false),
            next_generation: AtomicU64::new(0),
            transition_end: Notify::new(),
            dirty: AtomicBool::new(false),
        });
        Accordion { inner }
    }
}

impl Accordion {
    /// Create a headless panel with an auto-generated value.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> AccordionBuilder {
        AccordionBuilder::default()
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn value(&self) -> AccordionValue {
        read(&self.inner.value).clone()
    }

    pub fn state(&self) -> AccordionState {
        read(&self.inner.panel).state
    }

    pub fn panel_state(&self) -> PanelState {
        *read(&self.inner.panel)
    }

    /// True when the structurally previous panel is open.
    pub fn is_next(&self) -> bool {
        read(&self.inner.panel).is_next
    }

    /// True when the structurally next panel is open.
    pub fn is_previous(&self) -> bool {
        read(&self.inner.panel).is_previous
    }

    pub fn is_disabled(&self) -> bool {
        read(&self.inner.props).disabled
    }

    pub fn is_readonly(&self) -> bool {
        read(&self.inner.props).readonly
    }

    pub fn toggle_icon_slot(&self) -> ToggleIconSlot {
        read(&self.inner.props).toggle_icon_slot
    }

    /// Whether an expand/collapse sequence is in flight.
    pub fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }

    /// Whether a command issued now would animate.
    pub fn should_animate(&self) -> bool {
        self.inner.should_animate()
    }

    /// Whether the panel is registered with a group that is still alive.
    pub fn is_attached(&self) -> bool {
        self.inner.group().is_some()
    }

    /// The group this panel is attached to, if it is still alive.
    pub fn group(&self) -> Option<Arc<dyn AccordionGroup>> {
        self.inner.group().map(|(group, _)| group)
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Change the panel value and re-sync with the group.
    pub fn set_value(&self, value: impl Into<AccordionValue>) {
        let value = value.into();
        {
            let mut guard = write(&self.inner.value);
            if *guard == value {
                return;
            }
            *guard = value;
        }
        self.inner.mark_dirty();
        self.inner.update_state(false);
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.inner.update_props(|props| props.disabled = disabled);
    }

    pub fn set_readonly(&self, readonly: bool) {
        self.inner.update_props(|props| props.readonly = readonly);
    }

    pub fn set_toggle_icon_slot(&self, slot: ToggleIconSlot) {
        self.inner.update_props(|props| props.toggle_icon_slot = slot);
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Register with `group` and take on its current open-set without
    /// animating. Attaching an attached panel moves it to the new group.
    pub fn attach(&self, group: Arc<dyn AccordionGroup>) {
        self.detach();

        let member: Weak<dyn GroupMember> = self.inner.this.clone();
        let key = group.attach(member);
        *write(&self.inner.attachment) = Some(Attachment {
            group: Arc::downgrade(&group),
            key,
        });
        debug!("Accordion '{}': attached as {:?}", self.value(), key);

        self.inner.update_state(true);
        self.inner.schedule_first_paint();
    }

    /// Drop the group registration. In-flight animation is left to finish.
    pub fn detach(&self) {
        let Some(attachment) = write(&self.inner.attachment).take() else {
            return;
        };
        if let Some(group) = attachment.group.upgrade() {
            group.detach(attachment.key);
        }
        debug!("Accordion '{}': detached", self.value());
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Header activated (click, tap, Enter/Space on the header item).
    ///
    /// Asks the group to toggle this panel. Ignored when disabled, readonly,
    /// or not attached.
    pub fn activate(&self) {
        let props = *read(&self.inner.props);
        if props.disabled || props.readonly {
            trace!("Accordion '{}': activation ignored", self.value());
            return;
        }
        let Some((group, _)) = self.inner.group() else {
            return;
        };
        let expand = self.state().toggle_target();
        group.request_toggle(&self.value(), expand);
    }

    /// The host's content transition finished.
    pub fn transition_ended(&self) {
        self.inner.transition_end.notify_waiters();
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check if the panel changed since the last render.
    pub fn is_dirty(&self) -> bool {
        self.inner.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.inner.dirty.store(false, Ordering::SeqCst);
    }
}

impl Inner {
    pub(crate) fn strong(&self) -> Option<Arc<Inner>> {
        self.this.upgrade()
    }

    pub(crate) fn state(&self) -> AccordionState {
        read(&self.panel).state
    }

    pub(crate) fn value(&self) -> AccordionValue {
        read(&self.value).clone()
    }

    pub(crate) fn group(&self) -> Option<(Arc<dyn AccordionGroup>, MemberKey)> {
        let guard = read(&self.attachment);
        let attachment = guard.as_ref()?;
        attachment
            .group
            .upgrade()
            .map(|group| (group, attachment.key))
    }

    pub(crate) fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Move the state machine. Requests a render if anything changed.
    pub(crate) fn set_state(&self, state: AccordionState) {
        let changed = write(&self.panel).transition(state);
        if changed {
            trace!("Accordion '{}': -> {}", self.value(), state);
            self.changed(state);
        }
    }

    fn update_panel(&self, f: impl FnOnce(&mut PanelState)) {
        let (changed, state) = {
            let mut guard = write(&self.panel);
            let before = *guard;
            f(&mut guard);
            (before != *guard, guard.state)
        };
        if changed {
            self.changed(state);
        }
    }

    fn update_props(&self, f: impl FnOnce(&mut Props)) {
        f(&mut write(&self.props));
        self.mark_dirty();
        if let Some(host) = &self.host {
            host.render_requested(self.state());
        }
    }

    fn changed(&self, state: AccordionState) {
        self.mark_dirty();
        if let Some(host) = &self.host {
            host.render_requested(state);
        }
    }

    /// Re-read the group's open-set and move towards it.
    pub(crate) fn update_state(&self, initial_update: bool) {
        let Some((group, key)) = self.group() else {
            return;
        };
        let open = group.value();
        let value = self.value();

        if open.contains(value.as_str()) {
            self.expand(initial_update);
            self.update_panel(PanelState::clear_neighbors);
        } else {
            self.collapse(initial_update);
            let neighbors = group.neighbors(key);
            self.update_panel(|panel| {
                if let Some(next) = &neighbors.next {
                    panel.is_previous = open.contains(next.as_str());
                }
                if let Some(previous) = &neighbors.previous {
                    panel.is_next = open.contains(previous.as_str());
                }
            });
        }
    }

    /// Whether an expand/collapse would animate right now.
    pub(crate) fn should_animate(&self) -> bool {
        let Some(host) = &self.host else {
            return false;
        };
        if host.prefers_reduced_motion() {
            return false;
        }
        if !config::global().animated {
            return false;
        }
        if let Some((group, _)) = self.group()
            && !group.animated()
        {
            return false;
        }
        true
    }
}

impl GroupMember for Inner {
    fn value(&self) -> AccordionValue {
        Inner::value(self)
    }

    fn group_changed(&self) {
        self.update_state(false);
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}
