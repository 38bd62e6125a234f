//! Group collaborator interfaces.
//!
//! A group owns the open/closed policy for its panels. Panels register with
//! it on attach (instead of searching the tree for an ancestor), read its
//! open-set, and ask it to toggle. The group calls back into every live
//! member whenever its open-set changes.

mod memory;

pub use memory::MemoryGroup;

use std::sync::Weak;

use crate::value::AccordionValue;

/// The value(s) a group currently designates as open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenSet {
    /// Single-open groups hold at most one value.
    Single(Option<AccordionValue>),
    /// Multiple-open groups hold an ordered collection.
    Multiple(Vec<AccordionValue>),
}

impl Default for OpenSet {
    fn default() -> Self {
        OpenSet::Single(None)
    }
}

impl OpenSet {
    /// An empty single-value open-set.
    pub fn none() -> Self {
        OpenSet::Single(None)
    }

    /// A single open value.
    pub fn single(value: impl Into<AccordionValue>) -> Self {
        OpenSet::Single(Some(value.into()))
    }

    /// A collection of open values.
    pub fn multiple<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AccordionValue>,
    {
        OpenSet::Multiple(values.into_iter().map(Into::into).collect())
    }

    /// Whether `value` is open.
    pub fn contains(&self, value: &str) -> bool {
        match self {
            OpenSet::Single(open) => open.as_ref().is_some_and(|v| v == value),
            OpenSet::Multiple(open) => open.iter().any(|v| v == value),
        }
    }

    /// The open values as a list.
    pub fn values(&self) -> Vec<AccordionValue> {
        match self {
            OpenSet::Single(open) => open.iter().cloned().collect(),
            OpenSet::Multiple(open) => open.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            OpenSet::Single(open) => open.is_none(),
            OpenSet::Multiple(open) => open.is_empty(),
        }
    }
}

/// Registration handle returned by [`AccordionGroup::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberKey(pub(crate) u64);

/// Values of the structurally adjacent panels.
///
/// `None` means there is no adjacent panel on that side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub previous: Option<AccordionValue>,
    pub next: Option<AccordionValue>,
}

/// A panel as seen by its group.
pub trait GroupMember: Send + Sync {
    /// Identity matched against the open-set.
    fn value(&self) -> AccordionValue;

    /// The group's open-set changed.
    fn group_changed(&self);
}

/// The accordion group collaborator.
///
/// Implementations must not hold internal locks while calling
/// [`GroupMember::group_changed`]: members read the group back from inside
/// that callback.
pub trait AccordionGroup: Send + Sync + 'static {
    /// Current open-set.
    fn value(&self) -> OpenSet;

    /// Group-level animation switch.
    fn animated(&self) -> bool;

    /// Register a member. Registration order is structural order.
    fn attach(&self, member: Weak<dyn GroupMember>) -> MemberKey;

    /// Remove a member registration. Unknown keys are ignored.
    fn detach(&self, key: MemberKey);

    /// Adjacent members of a registered member.
    fn neighbors(&self, key: MemberKey) -> Neighbors;

    /// Ask the group to open or close `value`. The group decides.
    fn request_toggle(&self, value: &AccordionValue, expand: bool);
}
