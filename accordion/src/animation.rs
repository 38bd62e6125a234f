//! Expand/collapse animation driver.
//!
//! A height transition cannot start from `auto`, so each direction is split
//! across two frames: one to establish an explicit max-height, one to flip
//! the state that the host's transition keys off. Completion is signalled by
//! the host through [`Accordion::transition_ended`], with
//! [`TRANSITION_TIMEOUT`] as a fallback for transitions that never report.
//!
//! Each panel has at most one live sequence. Starting a new one cancels the
//! previous token; a cancelled sequence runs no further steps, and a
//! transition-end or timeout that resolves after cancellation is ignored.
//!
//! Every step a sequence takes (state or max-height writes) runs under the
//! `sequence` lock and only while its generation still owns the slot. Host
//! callbacks made from a step therefore must not issue commands to the same
//! panel.
//!
//! [`Accordion::transition_ended`]: crate::Accordion::transition_ended

use std::pin::{Pin, pin};
use std::sync::MutexGuard;
use std::sync::atomic::Ordering;
use std::time::Duration;

use log::{debug, trace};
use tokio::runtime::Handle;
use tokio::sync::futures::Notified;
use tokio_util::sync::CancellationToken;

use crate::accordion::{Inner, Sequence};
use crate::host::Host;
use crate::state::AccordionState;

/// Upper bound on waiting for the host's transition-end signal.
pub const TRANSITION_TIMEOUT: Duration = Duration::from_millis(2000);

/// Which way a sequence moves the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Expand,
    Collapse,
}

impl Direction {
    fn terminal(self) -> AccordionState {
        match self {
            Direction::Expand => AccordionState::Expanded,
            Direction::Collapse => AccordionState::Collapsed,
        }
    }
}

impl Inner {
    /// Move towards `Expanded`.
    pub(crate) fn expand(&self, initial_update: bool) {
        self.command(Direction::Expand, initial_update);
    }

    /// Move towards `Collapsed`.
    pub(crate) fn collapse(&self, initial_update: bool) {
        self.command(Direction::Collapse, initial_update);
    }

    fn command(&self, direction: Direction, initial_update: bool) {
        let terminal = direction.terminal();

        if initial_update || self.host.is_none() {
            self.interrupt();
            self.set_state(terminal);
            return;
        }
        {
            // Steps write state under this lock. A sequence heading the other
            // way may not have moved the state yet.
            let mut slot = self.slot();
            if self.state() == terminal {
                self.interrupt_locked(&mut slot);
                return;
            }
        }

        let runtime = Handle::try_current().ok();
        let (Some(runtime), true) = (runtime, self.should_animate()) else {
            debug!("Accordion '{}': {:?} without animation", self.value(), direction);
            self.interrupt();
            self.set_state(terminal);
            return;
        };
        let (Some(inner), Some(host)) = (self.strong(), self.host.clone()) else {
            return;
        };

        let (generation, token) = self.begin_sequence();
        debug!("Accordion '{}': {:?} sequence {}", self.value(), direction, generation);

        runtime.spawn(async move {
            let run = Run {
                inner: &inner,
                host: host.as_ref(),
                generation,
                token: &token,
            };
            match direction {
                Direction::Expand => run.expand().await,
                Direction::Collapse => run.collapse().await,
            }
            inner.finish_sequence(generation);
        });
    }

    fn slot(&self) -> MutexGuard<'_, Option<Sequence>> {
        self.sequence
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cancel the live sequence and drop any max-height it left behind.
    fn interrupt(&self) {
        self.interrupt_locked(&mut self.slot());
    }

    fn interrupt_locked(&self, slot: &mut Option<Sequence>) {
        let Some(sequence) = slot.take() else {
            return;
        };
        self.animating.store(false, Ordering::SeqCst);
        trace!("Accordion '{}': cancel sequence {}", self.value(), sequence.generation);
        sequence.token.cancel();
        if let Some(host) = &self.host {
            host.set_content_max_height(None);
        }
    }

    /// Install a fresh token as the live sequence.
    fn begin_sequence(&self) -> (u64, CancellationToken) {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();
        let mut slot = self.slot();
        if let Some(stale) = slot.replace(Sequence {
            generation,
            token: token.clone(),
        }) {
            stale.token.cancel();
        }
        self.animating.store(true, Ordering::SeqCst);
        (generation, token)
    }

    /// Clear the live slot if it still belongs to `generation`.
    fn finish_sequence(&self, generation: u64) {
        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|s| s.generation == generation) {
            *slot = None;
            self.animating.store(false, Ordering::SeqCst);
        }
    }

    /// Run `f` under the sequence lock if `generation` still owns the slot.
    fn step(&self, generation: u64, f: impl FnOnce()) -> bool {
        let slot = self.slot();
        if !slot.as_ref().is_some_and(|s| s.generation == generation) {
            return false;
        }
        f();
        true
    }

    /// Whether a sequence is currently live.
    pub(crate) fn is_animating(&self) -> bool {
        self.animating.load(Ordering::SeqCst)
    }

    /// Wait one frame. Returns `false` if the sequence was cancelled.
    async fn next_frame(&self, token: &CancellationToken) -> bool {
        tokio::select! {
            biased;
            _ = token.cancelled() => false,
            _ = self.clock.next_frame() => !token.is_cancelled(),
        }
    }
}

/// One spawned expand or collapse sequence.
struct Run<'a> {
    inner: &'a Inner,
    host: &'a dyn Host,
    generation: u64,
    token: &'a CancellationToken,
}

impl Run<'_> {
    async fn frame(&self) -> bool {
        self.inner.next_frame(self.token).await
    }

    fn step(&self, f: impl FnOnce()) -> bool {
        self.inner.step(self.generation, f)
    }

    async fn expand(&self) {
        if !self.frame().await || !self.step(|| self.inner.set_state(AccordionState::Expanding)) {
            return;
        }

        if !self.frame().await {
            return;
        }
        let mut ended = pin!(self.inner.transition_end.notified());
        ended.as_mut().enable();
        let revealed = self.step(|| {
            let height = self.host.wrapper_height();
            trace!("Accordion '{}': reveal to {}", self.inner.value(), height);
            self.host.set_content_max_height(Some(height));
        });
        if !revealed || !self.transition(ended).await {
            return;
        }
        self.complete(AccordionState::Expanded);
    }

    async fn collapse(&self) {
        if !self.frame().await {
            return;
        }
        let pinned = self.step(|| {
            let height = self.host.content_height();
            trace!("Accordion '{}': pin height at {}", self.inner.value(), height);
            self.host.set_content_max_height(Some(height));
        });
        if !pinned || !self.frame().await {
            return;
        }

        let mut ended = pin!(self.inner.transition_end.notified());
        ended.as_mut().enable();
        if !self.step(|| self.inner.set_state(AccordionState::Collapsing))
            || !self.transition(ended).await
        {
            return;
        }
        self.complete(AccordionState::Collapsed);
    }

    /// Wait for the host's transition end, or the timeout.
    /// Returns `false` if the sequence was cancelled first.
    async fn transition(&self, ended: Pin<&mut Notified<'_>>) -> bool {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => false,
            _ = ended => true,
            _ = tokio::time::sleep(TRANSITION_TIMEOUT) => true,
        }
    }

    fn complete(&self, terminal: AccordionState) {
        self.step(|| {
            self.inner.set_state(terminal);
            self.host.set_content_max_height(None);
        });
    }
}
