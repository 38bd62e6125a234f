mod common;

use std::sync::Arc;
use std::time::Duration;

use accordion::{Accordion, AccordionState, FrameClock, MemoryGroup, OpenSet};

use common::{CONTENT_HEIGHT, HostEvent, RecordingHost, WRAPPER_HEIGHT, advance, headless, hosted};

// =============================================================================
// Initial Update
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_initial_attach_expands_without_animation() {
    let group = Arc::new(MemoryGroup::new().with_value(OpenSet::single("a")));
    let host = RecordingHost::new();
    let panel = hosted("a", &host);

    panel.attach(group.clone());

    assert_eq!(panel.state(), AccordionState::Expanded);
    assert_eq!(host.events(), vec![HostEvent::State(AccordionState::Expanded)]);
    assert!(!panel.is_animating());

    advance(100).await;
    assert_eq!(host.states(), vec![AccordionState::Expanded]);
}

#[tokio::test(start_paused = true)]
async fn test_initial_attach_collapsed_has_no_transient() {
    let group = Arc::new(MemoryGroup::new().with_value(OpenSet::single("b")));
    let host = RecordingHost::new();
    let panel = hosted("a", &host);

    panel.attach(group.clone());
    advance(100).await;

    assert_eq!(panel.state(), AccordionState::Collapsed);
    assert!(host.events().is_empty());
}

// =============================================================================
// Sequences
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_collapse_sequence() {
    let group = Arc::new(MemoryGroup::new().with_value(OpenSet::single("a")));
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());
    host.clear();

    group.set_value(OpenSet::single("b"));
    assert_eq!(panel.state(), AccordionState::Expanded);
    assert!(panel.is_animating());

    // First frame pins the current height.
    advance(20).await;
    assert_eq!(host.events(), vec![HostEvent::MaxHeight(Some(CONTENT_HEIGHT))]);
    assert_eq!(panel.state(), AccordionState::Expanded);

    // Second frame flips the state.
    advance(16).await;
    assert_eq!(panel.state(), AccordionState::Collapsing);

    panel.transition_ended();
    advance(1).await;

    assert_eq!(panel.state(), AccordionState::Collapsed);
    assert_eq!(
        host.events(),
        vec![
            HostEvent::MaxHeight(Some(CONTENT_HEIGHT)),
            HostEvent::State(AccordionState::Collapsing),
            HostEvent::State(AccordionState::Collapsed),
            HostEvent::MaxHeight(None),
        ]
    );
    assert!(!panel.is_animating());
}

#[tokio::test(start_paused = true)]
async fn test_expand_sequence() {
    let group = Arc::new(MemoryGroup::new());
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    assert_eq!(panel.state(), AccordionState::Collapsed);

    advance(20).await;
    assert_eq!(panel.state(), AccordionState::Expanding);
    assert_eq!(host.events(), vec![HostEvent::State(AccordionState::Expanding)]);

    advance(16).await;
    assert_eq!(
        host.events().last(),
        Some(&HostEvent::MaxHeight(Some(WRAPPER_HEIGHT)))
    );

    panel.transition_ended();
    advance(1).await;

    assert_eq!(panel.state(), AccordionState::Expanded);
    assert_eq!(
        host.events(),
        vec![
            HostEvent::State(AccordionState::Expanding),
            HostEvent::MaxHeight(Some(WRAPPER_HEIGHT)),
            HostEvent::State(AccordionState::Expanded),
            HostEvent::MaxHeight(None),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_transition_timeout_fallback() {
    let group = Arc::new(MemoryGroup::new());
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    advance(1000).await;
    assert_eq!(panel.state(), AccordionState::Expanding);

    // Nobody reports the transition end; the timeout resolves it.
    advance(1100).await;
    assert_eq!(panel.state(), AccordionState::Expanded);
    assert_eq!(host.events().last(), Some(&HostEvent::MaxHeight(None)));
}

#[tokio::test(start_paused = true)]
async fn test_transition_end_before_listening_is_ignored() {
    let group = Arc::new(MemoryGroup::new());
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    panel.transition_ended();
    advance(100).await;

    assert_eq!(panel.state(), AccordionState::Expanding);
}

// =============================================================================
// No-ops and Cancellation
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_expand_while_expanded_is_noop() {
    let group = Arc::new(MemoryGroup::new().with_value(OpenSet::single("a")));
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());
    host.clear();

    group.set_value(OpenSet::single("a"));
    assert!(!panel.is_animating());

    advance(100).await;
    assert!(host.events().is_empty());
    assert_eq!(panel.state(), AccordionState::Expanded);
}

#[tokio::test(start_paused = true)]
async fn test_collapse_during_expand_runs_one_sequence() {
    let group = Arc::new(MemoryGroup::new());
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    advance(20).await;
    assert_eq!(panel.state(), AccordionState::Expanding);

    group.set_value(OpenSet::none());
    advance(40).await;
    assert_eq!(panel.state(), AccordionState::Collapsing);

    panel.transition_ended();
    advance(1).await;
    assert_eq!(panel.state(), AccordionState::Collapsed);

    // The expand sequence never reached its measuring frame.
    assert!(
        !host
            .events()
            .contains(&HostEvent::MaxHeight(Some(WRAPPER_HEIGHT)))
    );
    assert_eq!(
        host.events(),
        vec![
            HostEvent::State(AccordionState::Expanding),
            HostEvent::MaxHeight(Some(CONTENT_HEIGHT)),
            HostEvent::State(AccordionState::Collapsing),
            HostEvent::State(AccordionState::Collapsed),
            HostEvent::MaxHeight(None),
        ]
    );

    advance(3000).await;
    assert_eq!(panel.state(), AccordionState::Collapsed);
}

#[tokio::test(start_paused = true)]
async fn test_reverse_before_first_frame_cancels() {
    let group = Arc::new(MemoryGroup::new());
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    group.set_value(OpenSet::none());
    assert!(!panel.is_animating());

    advance(3000).await;
    assert_eq!(panel.state(), AccordionState::Collapsed);
    assert!(!host.states().contains(&AccordionState::Expanding));
}

#[tokio::test(start_paused = true)]
async fn test_reexpand_after_pin_clears_max_height() {
    let group = Arc::new(MemoryGroup::new().with_value(OpenSet::single("a")));
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());
    host.clear();

    // Collapse far enough to pin the height, then reopen.
    group.set_value(OpenSet::none());
    advance(20).await;
    assert_eq!(host.events(), vec![HostEvent::MaxHeight(Some(CONTENT_HEIGHT))]);

    group.set_value(OpenSet::single("a"));
    assert!(!panel.is_animating());

    advance(3000).await;
    assert_eq!(panel.state(), AccordionState::Expanded);
    assert_eq!(
        host.events(),
        vec![
            HostEvent::MaxHeight(Some(CONTENT_HEIGHT)),
            HostEvent::MaxHeight(None),
        ]
    );
    assert_eq!(host.max_height(), None);
}

#[tokio::test(start_paused = true)]
async fn test_late_transition_end_after_cancel_has_no_effect() {
    let group = Arc::new(MemoryGroup::new());
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());

    // Expand up to the point where it is listening.
    group.set_value(OpenSet::single("a"));
    advance(40).await;
    assert_eq!(panel.state(), AccordionState::Expanding);

    group.set_value(OpenSet::none());
    panel.transition_ended();
    advance(1).await;

    assert_ne!(panel.state(), AccordionState::Expanded);
}

// =============================================================================
// Suppression
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_reduced_motion_is_synchronous() {
    let group = Arc::new(MemoryGroup::new());
    let host = RecordingHost::reduced_motion();
    let panel = hosted("a", &host);
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    assert_eq!(panel.state(), AccordionState::Expanded);

    group.set_value(OpenSet::none());
    assert_eq!(panel.state(), AccordionState::Collapsed);

    assert_eq!(
        host.states(),
        vec![AccordionState::Expanded, AccordionState::Collapsed]
    );
}

#[tokio::test(start_paused = true)]
async fn test_group_animation_override() {
    let group = Arc::new(MemoryGroup::new().with_animated(false));
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    assert_eq!(panel.state(), AccordionState::Expanded);
    assert!(!panel.should_animate());

    group.set_animated(true);
    assert!(panel.should_animate());
}

#[tokio::test(start_paused = true)]
async fn test_headless_panel_never_animates() {
    let group = Arc::new(MemoryGroup::new());
    let panel = headless("a");
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    assert_eq!(panel.state(), AccordionState::Expanded);
    assert!(!panel.should_animate());
}

#[test]
fn test_without_runtime_state_jumps() {
    let group = Arc::new(MemoryGroup::new());
    let host = RecordingHost::new();
    let panel = hosted("a", &host);
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    assert_eq!(panel.state(), AccordionState::Expanded);
    assert_eq!(host.states(), vec![AccordionState::Expanded]);
}

// =============================================================================
// Independence
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_panels_animate_independently() {
    let group = Arc::new(MemoryGroup::new().with_value(OpenSet::single("a")));
    let host_a = RecordingHost::new();
    let host_b = RecordingHost::new();
    let a = hosted("a", &host_a);
    let b = hosted("b", &host_b);
    a.attach(group.clone());
    b.attach(group.clone());

    group.set_value(OpenSet::single("b"));
    advance(40).await;
    assert_eq!(a.state(), AccordionState::Collapsing);
    assert_eq!(b.state(), AccordionState::Expanding);

    b.transition_ended();
    advance(1).await;
    assert_eq!(b.state(), AccordionState::Expanded);
    assert_eq!(a.state(), AccordionState::Collapsing);

    a.transition_ended();
    advance(1).await;
    assert_eq!(a.state(), AccordionState::Collapsed);
}

#[tokio::test(start_paused = true)]
async fn test_frame_clock_controls_timing() {
    let group = Arc::new(MemoryGroup::new());
    let host = RecordingHost::new();
    let panel = Accordion::builder()
        .value("a")
        .host(host.clone())
        .clock(FrameClock::from_fps(10))
        .build();
    panel.attach(group.clone());

    group.set_value(OpenSet::single("a"));
    advance(50).await;
    assert_eq!(panel.state(), AccordionState::Collapsed);

    advance(60).await;
    assert_eq!(panel.state(), AccordionState::Expanding);
}

// =============================================================================
// Threads
// =============================================================================

/// Keep reporting transition ends until the panel has no live sequence.
async fn settle(panel: &Accordion) {
    for _ in 0..5000 {
        if !panel.is_animating() {
            return;
        }
        panel.transition_ended();
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reopen_across_threads_never_strands_transient() {
    let clock = FrameClock::new(Duration::ZERO);

    for round in 0..200u32 {
        let group = Arc::new(MemoryGroup::new().with_value(OpenSet::single("a")));
        let host = RecordingHost::new();
        let panel = Accordion::builder()
            .value("a")
            .host(host.clone())
            .clock(clock)
            .build();
        panel.attach(group.clone());

        group.set_value(OpenSet::none());
        // Give the collapse task a varying head start on another worker.
        for _ in 0..(round % 20) {
            std::hint::spin_loop();
        }
        group.set_value(OpenSet::single("a"));

        settle(&panel).await;
        assert!(!panel.is_animating(), "round {round}: sequence never settled");
        assert!(
            !panel.state().is_transient(),
            "round {round}: stranded in {}",
            panel.state()
        );
        assert_eq!(panel.state(), AccordionState::Expanded, "round {round}");
        assert_eq!(host.max_height(), None, "round {round}");
    }
}
