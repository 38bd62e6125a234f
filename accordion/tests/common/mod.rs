//! Shared test fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use accordion::{
    Accordion, AccordionGroup, AccordionState, AccordionValue, FrameClock, GroupMember,
    HeaderControl, Host, MemberKey, MemoryGroup, Neighbors, OpenSet,
};

pub const FRAME_MS: u64 = 16;
pub const WRAPPER_HEIGHT: u16 = 12;
pub const CONTENT_HEIGHT: u16 = 9;

/// Something the host was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    State(AccordionState),
    MaxHeight(Option<u16>),
}

/// Host that records every render request and style write.
#[derive(Default)]
pub struct RecordingHost {
    events: Mutex<Vec<HostEvent>>,
    reduced_motion: AtomicBool,
    control: Option<Arc<RecordingControl>>,
}

impl RecordingHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reduced_motion() -> Arc<Self> {
        let host = Self::default();
        host.reduced_motion.store(true, Ordering::SeqCst);
        Arc::new(host)
    }

    pub fn with_control(control: Arc<RecordingControl>) -> Arc<Self> {
        Arc::new(Self {
            control: Some(control),
            ..Default::default()
        })
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn states(&self) -> Vec<AccordionState> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::State(state) => Some(state),
                HostEvent::MaxHeight(_) => None,
            })
            .collect()
    }

    /// The max-height override left in place by the last write.
    pub fn max_height(&self) -> Option<u16> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                HostEvent::MaxHeight(height) => Some(height),
                HostEvent::State(_) => None,
            })
            .flatten()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl Host for RecordingHost {
    fn wrapper_height(&self) -> u16 {
        WRAPPER_HEIGHT
    }

    fn content_height(&self) -> u16 {
        CONTENT_HEIGHT
    }

    fn set_content_max_height(&self, height: Option<u16>) {
        self.events.lock().unwrap().push(HostEvent::MaxHeight(height));
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion.load(Ordering::SeqCst)
    }

    fn header_control(&self) -> Option<Arc<dyn HeaderControl>> {
        self.control
            .clone()
            .map(|control| control as Arc<dyn HeaderControl>)
    }

    fn render_requested(&self, state: AccordionState) {
        self.events.lock().unwrap().push(HostEvent::State(state));
    }
}

/// Header control that remembers its attributes.
#[derive(Default)]
pub struct RecordingControl {
    attributes: Mutex<HashMap<String, String>>,
}

impl RecordingControl {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.lock().unwrap().get(name).cloned()
    }
}

impl HeaderControl for RecordingControl {
    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
    }
}

/// Group wrapper that counts toggle requests.
pub struct CountingGroup {
    pub inner: MemoryGroup,
    requests: AtomicUsize,
}

impl CountingGroup {
    pub fn new(inner: MemoryGroup) -> Arc<Self> {
        Arc::new(Self {
            inner,
            requests: AtomicUsize::new(0),
        })
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl AccordionGroup for CountingGroup {
    fn value(&self) -> OpenSet {
        self.inner.value()
    }

    fn animated(&self) -> bool {
        self.inner.animated()
    }

    fn attach(&self, member: Weak<dyn GroupMember>) -> MemberKey {
        self.inner.attach(member)
    }

    fn detach(&self, key: MemberKey) {
        self.inner.detach(key)
    }

    fn neighbors(&self, key: MemberKey) -> Neighbors {
        self.inner.neighbors(key)
    }

    fn request_toggle(&self, value: &AccordionValue, expand: bool) {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.inner.request_toggle(value, expand);
    }
}

pub fn clock() -> FrameClock {
    FrameClock::new(Duration::from_millis(FRAME_MS))
}

/// Panel with a recording host.
pub fn hosted(value: &str, host: &Arc<RecordingHost>) -> Accordion {
    Accordion::builder()
        .value(value)
        .host(host.clone())
        .clock(clock())
        .build()
}

/// Panel without a host.
pub fn headless(value: &str) -> Accordion {
    Accordion::builder().value(value).build()
}

/// Let virtual time pass (tests run with a paused clock).
pub async fn advance(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}
