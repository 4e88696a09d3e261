// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios driven through the public API only: config file on
//! disk, dispatcher built from it, producers submitting, host ticking.

use std::time::Duration;

use notideck::config::{self, Config};
use notideck::diagnostics::{BufferCapacity, DiagnosticEventKind, DiagnosticsRecorder};
use notideck::domain::{ChannelKey, DisplayDuration, Kind, Request};
use notideck::engine::{Dispatcher, EngineEvent, Settings, VisualResource};
use tempfile::tempdir;

const DELTA: Duration = Duration::from_millis(16);

fn dispatcher_from(settings: Settings) -> Dispatcher {
    let mut dispatcher = Dispatcher::new(settings);
    for kind in Kind::ALL {
        dispatcher.register_visual(kind, VisualResource::new(format!("cards/{}", kind), 64.0));
    }
    dispatcher
}

/// Steps the dispatcher in frame-sized deltas until `total` has elapsed.
fn run_for(dispatcher: &mut Dispatcher, total: Duration) {
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        dispatcher.tick(DELTA);
        elapsed += DELTA;
    }
}

fn persistent(message: &str) -> Request {
    Request::new(Kind::Standard, message).with_duration(DisplayDuration::persistent())
}

#[test]
fn config_file_drives_channel_capacities() {
    let dir = tempdir().expect("failed to create temp dir");
    let path = dir.path().join("engine.toml");

    let mut config = Config::default();
    config.capacities.top_right = Some(1);
    config::save_to_path(&config, &path).expect("failed to save config");

    let loaded = config::load_from_path(&path).expect("failed to load config");
    let mut dispatcher = dispatcher_from(Settings::from_config(&loaded));

    dispatcher.submit(persistent("first"));
    dispatcher.submit(persistent("second"));

    assert_eq!(dispatcher.visible_count(ChannelKey::TopRight), 1);
    assert_eq!(dispatcher.pending_count(ChannelKey::TopRight), 1);
}

#[test]
fn capacity_invariant_holds_through_a_full_lifecycle() {
    let mut dispatcher = dispatcher_from(Settings::default().with_capacity(ChannelKey::TopRight, 2));

    // Burst of short-lived and persistent requests mixed together
    for i in 0..8 {
        let request = if i % 2 == 0 {
            Request::new(Kind::Standard, format!("short-{}", i))
                .with_duration(DisplayDuration::from_secs(1.0))
        } else {
            persistent(&format!("long-{}", i))
        };
        dispatcher.submit(request);
    }

    // Step well past several expiry/promotion rounds, checking the
    // invariant every frame.
    let mut elapsed = Duration::ZERO;
    while elapsed < Duration::from_secs(12) {
        dispatcher.tick(DELTA);
        elapsed += DELTA;
        assert!(dispatcher.visible_count(ChannelKey::TopRight) <= 2);
    }

    // The short-lived pair admitted first has expired and promoted
    // replacements until two persistent cards hold the channel; everything
    // behind them is still queued, nothing was dropped.
    assert_eq!(dispatcher.visible_count(ChannelKey::TopRight), 2);
    assert_eq!(dispatcher.pending_count(ChannelKey::TopRight), 4);
}

#[test]
fn five_submissions_two_slots_promotes_one_per_dismissal() {
    let mut dispatcher = dispatcher_from(Settings::default().with_capacity(ChannelKey::TopRight, 2));

    let requests: Vec<Request> = (0..5).map(|i| persistent(&format!("r{}", i))).collect();
    let ids: Vec<_> = requests.iter().map(Request::id).collect();
    for request in requests {
        dispatcher.submit(request);
    }

    assert_eq!(dispatcher.visible_count(ChannelKey::TopRight), 2);
    assert_eq!(dispatcher.pending_count(ChannelKey::TopRight), 3);

    dispatcher.dismiss(ids[1]);
    run_for(&mut dispatcher, Duration::from_secs(1));

    assert_eq!(dispatcher.visible_count(ChannelKey::TopRight), 2);
    assert_eq!(dispatcher.pending_count(ChannelKey::TopRight), 2);

    // Promotion order is submission order: r2 was the oldest queued
    let visible = dispatcher.visible_requests(ChannelKey::TopRight);
    assert!(visible.contains(&ids[0]));
    assert!(visible.contains(&ids[2]));
}

#[test]
fn pool_reuses_one_instance_across_sequential_toasts() {
    let mut dispatcher = dispatcher_from(Settings::default());

    let first = Request::info("first");
    let first_id = first.id();
    dispatcher.submit(first);
    let slot = dispatcher.instance_for(first_id).expect("admitted");

    dispatcher.dismiss(first_id);
    run_for(&mut dispatcher, Duration::from_secs(1));
    assert_eq!(dispatcher.pool().free_count(Kind::Standard), 1);

    let second = Request::info("second");
    let second_id = second.id();
    dispatcher.submit(second);

    // Same slot, rebound to the new request, no residue from the first
    let reused = dispatcher.instance_for(second_id).expect("admitted");
    assert_eq!(slot, reused);
    let instance = dispatcher.pool().get(reused);
    assert_eq!(instance.request().map(Request::message), Some("second"));
    assert!(!instance.is_bound_to(first_id));
    assert_eq!(dispatcher.pool().total_count(), 1);
}

#[test]
fn kinds_route_to_their_default_channels() {
    let mut dispatcher = dispatcher_from(Settings::default());

    dispatcher.submit(Request::info("standard"));
    dispatcher.submit(Request::combat_result("combat"));
    dispatcher.submit(Request::resource_gain("Gold", 5));
    dispatcher.submit(Request::achievement("achievement"));

    assert_eq!(dispatcher.visible_count(ChannelKey::TopRight), 1);
    assert_eq!(dispatcher.visible_count(ChannelKey::TopLeft), 1);
    assert_eq!(dispatcher.visible_count(ChannelKey::BottomRight), 1);
    assert_eq!(dispatcher.visible_count(ChannelKey::TopCenter), 1);
}

#[test]
fn shown_and_dismissed_events_pair_up_over_a_session() {
    let mut dispatcher = dispatcher_from(Settings::default().with_capacity(ChannelKey::TopRight, 2));

    for i in 0..6 {
        dispatcher.submit(
            Request::new(Kind::Standard, format!("n{}", i))
                .with_duration(DisplayDuration::from_secs(1.0)),
        );
    }

    let mut shown = 0;
    let mut dismissed = 0;
    let mut elapsed = Duration::ZERO;
    while elapsed < Duration::from_secs(15) {
        dispatcher.tick(DELTA);
        elapsed += DELTA;
        for event in dispatcher.drain_events() {
            match event {
                EngineEvent::Shown { .. } => shown += 1,
                EngineEvent::Dismissed { .. } => dismissed += 1,
                EngineEvent::SoundCue { .. } => {}
            }
        }
    }

    assert_eq!(shown, 6);
    assert_eq!(dismissed, 6);
    assert_eq!(dispatcher.visible_count(ChannelKey::TopRight), 0);
}

#[test]
fn diagnostics_trace_queueing_and_drops() {
    let recorder = DiagnosticsRecorder::new(BufferCapacity::default());
    let mut dispatcher = dispatcher_from(
        Settings::default()
            .with_capacity(ChannelKey::TopRight, 1)
            .without_channel(ChannelKey::BottomLeft),
    );
    dispatcher.set_diagnostics(recorder.handle());

    dispatcher.submit(persistent("visible"));
    dispatcher.submit(persistent("queued"));
    dispatcher.submit(Request::info("dropped").with_channel(ChannelKey::BottomLeft));

    let events = recorder.events();
    assert!(events
        .iter()
        .any(|event| matches!(event.kind, DiagnosticEventKind::RequestQueued { .. })));
    assert!(events
        .iter()
        .any(|event| matches!(event.kind, DiagnosticEventKind::RequestDropped { .. })));
}

#[test]
fn dismiss_all_flushes_every_channel_and_backlog() {
    let mut dispatcher = dispatcher_from(Settings::default().with_capacity(ChannelKey::TopRight, 1));

    dispatcher.submit(persistent("standard"));
    dispatcher.submit(persistent("queued"));
    dispatcher.submit(Request::combat_result("combat"));
    dispatcher.submit(Request::alliance_message("Lord", "msg"));

    dispatcher.dismiss_all();
    run_for(&mut dispatcher, Duration::from_secs(1));

    for key in ChannelKey::ALL {
        assert_eq!(dispatcher.visible_count(key), 0);
    }
    assert_eq!(dispatcher.total_pending(), 0);
}
