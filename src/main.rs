//! Chatballs headless driver
//!
//! Stands in for the renderer and the chat connection: a producer thread
//! emits synthetic chat messages, and the main loop delivers 60 Hz frame
//! signals with synthetic monotonic timestamps.
//!
//! Usage: `chatballs [config.json]`. Set `CHATBALLS_EVENTS=1` to print every
//! outbound event as a JSON line.

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use chatballs::{ChatMessage, FrameSignal, SimConfig, Simulation, tick};

/// Milliseconds per frame at 60 Hz
const FRAME_MS: u64 = 16;
/// Two minutes of simulated time, long enough to see evictions
const FRAMES: u64 = 60 * 120;

const CHATTERS: &[(&str, Option<&str>)] = &[
    ("Alice", Some("#FF69B4")),
    ("bob_the_builder", None),
    ("Carol", Some("#1E90FF")),
    ("dave", Some("not-a-colour")),
    ("Eve", Some("#9ACD32")),
];

fn main() -> ExitCode {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };
    let print_events = std::env::var("CHATBALLS_EVENTS").is_ok_and(|v| v == "1");

    log::info!("Chatballs starting...");
    let mut sim = Simulation::new(config, 0);

    // Chat connection stand-in: bursts of messages, then silence so entities time out
    let sender = sim.impulse_sender();
    let producer = thread::spawn(move || {
        for round in 0..40usize {
            let (name, tag) = CHATTERS[round % CHATTERS.len()];
            let message = ChatMessage {
                display_name: name.to_string(),
                color_tag: tag.map(str::to_string),
                is_self: round % 13 == 0,
            };
            match message.to_impulse() {
                Some(event) => {
                    if !sender.send(event) {
                        break;
                    }
                }
                None => log::debug!("Skipping own message from '{}'", name),
            }
            thread::sleep(Duration::from_millis(2));
        }
    });

    let mut total_contacts = 0;
    let mut total_bounces = 0;
    let mut evicted = Vec::new();
    for frame in 1..=FRAMES {
        let summary = tick(&mut sim, FrameSignal::new(frame * FRAME_MS));
        total_contacts += summary.contacts;
        total_bounces += summary.bounces;
        evicted.extend(summary.evicted);

        let events = sim.drain_events();
        if print_events {
            for event in &events {
                match serde_json::to_string(event) {
                    Ok(line) => println!("{}", line),
                    Err(e) => log::warn!("Failed to encode event: {}", e),
                }
            }
        }

        if frame % 600 == 0 {
            log::info!(
                "Frame {}: {} entities, {} particles",
                frame,
                sim.entities().len(),
                sim.particles().len()
            );
        }
    }

    if producer.join().is_err() {
        log::error!("Chat producer thread panicked");
    }

    log::info!(
        "Done after {} ticks: {} bounces, {} collisions, {} evicted ({:?}), {} still active",
        sim.time_ticks(),
        total_bounces,
        total_contacts,
        evicted.len(),
        evicted,
        sim.entities().len()
    );
    ExitCode::SUCCESS
}
