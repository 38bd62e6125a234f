//! In-memory accordion group.

use std::sync::{RwLock, Weak};

use log::debug;
use tokio::sync::broadcast;

use super::{AccordionGroup, GroupMember, MemberKey, Neighbors, OpenSet};
use crate::value::AccordionValue;

/// Capacity of the change broadcast channel.
const CHANGE_CAPACITY: usize = 64;

#[derive(Debug, Default)]
struct GroupInner {
    value: OpenSet,
    multiple: bool,
    disabled: bool,
    readonly: bool,
    animated: bool,
    members: Vec<(MemberKey, Weak<dyn GroupMember>)>,
    next_key: u64,
}

/// A self-contained accordion group.
///
/// Applies the usual policy: in single mode opening a panel replaces the
/// open value, in multiple mode it is appended. Every change is delivered
/// synchronously to all live members and published on a broadcast channel
/// for outside observers.
#[derive(Debug)]
pub struct MemoryGroup {
    inner: RwLock<GroupInner>,
    changes: broadcast::Sender<OpenSet>,
}

impl Default for MemoryGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGroup {
    /// Create a single-open, animated group with nothing open.
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self {
            inner: RwLock::new(GroupInner {
                animated: true,
                ..Default::default()
            }),
            changes,
        }
    }

    /// Create a multiple-open group.
    pub fn multiple() -> Self {
        let group = Self::new();
        group.write(|inner| inner.multiple = true);
        group
    }

    /// Set the initial open-set without notifying anyone.
    pub fn with_value(self, value: OpenSet) -> Self {
        self.write(|inner| inner.value = value);
        self
    }

    /// Set the animation switch.
    pub fn with_animated(self, animated: bool) -> Self {
        self.set_animated(animated);
        self
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn is_multiple(&self) -> bool {
        self.read(|inner| inner.multiple)
    }

    pub fn is_disabled(&self) -> bool {
        self.read(|inner| inner.disabled)
    }

    pub fn is_readonly(&self) -> bool {
        self.read(|inner| inner.readonly)
    }

    /// Number of live members.
    pub fn member_count(&self) -> usize {
        self.read(|inner| {
            inner
                .members
                .iter()
                .filter(|(_, member)| member.strong_count() > 0)
                .count()
        })
    }

    /// Subscribe to open-set changes.
    pub fn subscribe(&self) -> broadcast::Receiver<OpenSet> {
        self.changes.subscribe()
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Replace the open-set and notify every member.
    pub fn set_value(&self, value: OpenSet) {
        debug!("MemoryGroup: open-set -> {:?}", value.values());
        let members = self.write(|inner| {
            inner.value = value.clone();
            inner.members.retain(|(_, member)| member.strong_count() > 0);
            inner
                .members
                .iter()
                .map(|(_, member)| member.clone())
                .collect::<Vec<_>>()
        });

        // Receivers may all be gone; that's fine.
        let _ = self.changes.send(value);

        for member in members {
            if let Some(member) = member.upgrade() {
                member.group_changed();
            }
        }
    }

    pub fn set_multiple(&self, multiple: bool) {
        self.write(|inner| inner.multiple = multiple);
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.write(|inner| inner.disabled = disabled);
    }

    pub fn set_readonly(&self, readonly: bool) {
        self.write(|inner| inner.readonly = readonly);
    }

    pub fn set_animated(&self, animated: bool) {
        self.write(|inner| inner.animated = animated);
    }

    fn read<R>(&self, f: impl FnOnce(&GroupInner) -> R) -> R {
        match self.inner.read() {
            Ok(guard) => f(&*guard),
            Err(poisoned) => f(&*poisoned.into_inner()),
        }
    }

    fn write<R>(&self, f: impl FnOnce(&mut GroupInner) -> R) -> R {
        match self.inner.write() {
            Ok(mut guard) => f(&mut *guard),
            Err(poisoned) => f(&mut *poisoned.into_inner()),
        }
    }
}

impl AccordionGroup for MemoryGroup {
    fn value(&self) -> OpenSet {
        self.read(|inner| inner.value.clone())
    }

    fn animated(&self) -> bool {
        self.read(|inner| inner.animated)
    }

    fn attach(&self, member: Weak<dyn GroupMember>) -> MemberKey {
        self.write(|inner| {
            let key = MemberKey(inner.next_key);
            inner.next_key += 1;
            inner.members.push((key, member));
            key
        })
    }

    fn detach(&self, key: MemberKey) {
        self.write(|inner| inner.members.retain(|(k, _)| *k != key));
    }

    fn neighbors(&self, key: MemberKey) -> Neighbors {
        let live: Vec<(MemberKey, Weak<dyn GroupMember>)> = self.read(|inner| {
            inner
                .members
                .iter()
                .filter(|(_, member)| member.strong_count() > 0)
                .cloned()
                .collect()
        });

        let Some(pos) = live.iter().position(|(k, _)| *k == key) else {
            return Neighbors::default();
        };
        let value_at = |index: usize| {
            live.get(index)
                .and_then(|(_, member)| member.upgrade())
                .map(|member| member.value())
        };

        Neighbors {
            previous: pos.checked_sub(1).and_then(value_at),
            next: value_at(pos + 1),
        }
    }

    fn request_toggle(&self, value: &AccordionValue, expand: bool) {
        let (blocked, multiple, current) =
            self.read(|inner| (inner.disabled || inner.readonly, inner.multiple, inner.value.clone()));
        if blocked {
            debug!("MemoryGroup: toggle of '{}' ignored (disabled/readonly)", value);
            return;
        }

        let next = match (expand, multiple) {
            (true, true) => {
                let mut open = current.values();
                if open.contains(value) {
                    return;
                }
                open.push(value.clone());
                OpenSet::Multiple(open)
            }
            (true, false) => OpenSet::Single(Some(value.clone())),
            (false, true) => {
                let open = current.values().into_iter().filter(|v| v != value).collect();
                OpenSet::Multiple(open)
            }
            (false, false) => OpenSet::Single(None),
        };
        self.set_value(next);
    }
}
