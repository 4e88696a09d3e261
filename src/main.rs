// SPDX-License-Identifier: MPL-2.0
//! Headless demo driver: submits a scripted set of notifications and steps
//! the engine with a fixed frame delta, printing events as they fire.

use std::time::Duration;

use notideck::config;
use notideck::diagnostics::{export, BufferCapacity, DiagnosticsRecorder};
use notideck::domain::{Kind, Request};
use notideck::engine::{Dispatcher, Settings, VisualResource};

struct Flags {
    ticks: u32,
    delta_ms: u64,
    report: bool,
}

fn main() {
    let mut args = pico_args::Arguments::from_env();

    let flags = Flags {
        ticks: args
            .opt_value_from_str("--ticks")
            .unwrap()
            .unwrap_or(400),
        delta_ms: args
            .opt_value_from_str("--delta-ms")
            .unwrap()
            .unwrap_or(16),
        report: args.contains("--report"),
    };

    let config = config::load().unwrap_or_default();
    let recorder = DiagnosticsRecorder::new(BufferCapacity::new(
        config
            .diagnostics_capacity
            .unwrap_or(config::defaults::DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY),
    ));

    let mut dispatcher = Dispatcher::new(Settings::from_config(&config));
    dispatcher.set_diagnostics(recorder.handle());
    for kind in Kind::ALL {
        dispatcher.register_visual(kind, VisualResource::new(format!("cards/{}", kind), 72.0));
    }

    // Opening burst: more standard toasts than the channel can show at once,
    // so the backlog path is exercised too.
    dispatcher.submit(Request::success("Settlement upgraded to level 4"));
    dispatcher.submit(Request::resource_gain("Gold", 250));
    dispatcher.submit(Request::resource_spent("Wood", 80));
    dispatcher.submit(Request::info("Scout report ready"));
    dispatcher.submit(Request::info("Caravan arrived"));
    dispatcher.submit(Request::warning("Storage almost full"));
    dispatcher.submit(Request::alliance_message("WarLord", "Rally at dawn"));

    let delta = Duration::from_millis(flags.delta_ms);
    for tick in 0..flags.ticks {
        match tick {
            40 => dispatcher.submit(Request::combat_result("Victory at the northern pass")),
            80 => dispatcher.submit(Request::achievement("First Conquest")),
            120 => dispatcher.submit(Request::level_up(12)),
            200 => dispatcher.dismiss_kind(Kind::System),
            _ => {}
        }

        dispatcher.tick(delta);

        for event in dispatcher.drain_events() {
            println!("[tick {:>4}] {:?}", tick, event);
        }
    }

    println!(
        "\nengine time {:.1}s, {} queued, {} diagnostic events",
        dispatcher.now().as_secs_f64(),
        dispatcher.total_pending(),
        recorder.len(),
    );

    if flags.report {
        match export::export_json(&recorder, dispatcher.now()) {
            Ok(json) => println!("{}", json),
            Err(err) => eprintln!("report export failed: {}", err),
        }
    }
}
