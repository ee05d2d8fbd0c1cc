//! Send a few timestamped notes through the process-wide virtual source.
//!
//! Attach a listener first (GarageBand, a softsynth, `receivemidi`), then:
//! `cargo run --example virtual_note`

use std::thread;
use std::time::Duration;

use host_midi::{now, send_midi_event, MidiError, NOTE_OFF, NOTE_ON};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), MidiError> {
    println!("Sending a C major arpeggio on channel 0…");

    let mut t = now();
    for pitch in [60u8, 64, 67, 72] {
        send_midi_event(t, NOTE_ON, 0, pitch, 100)?;
        // End the note just before the next one starts.
        send_midi_event(t + 450_000_000, NOTE_OFF, 0, pitch, 0)?;
        t += 500_000_000;
    }

    // The events above are timestamped into the future; give the MIDI
    // service time to play them out before the process exits.
    thread::sleep(Duration::from_millis(2500));
    println!("Done.");
    Ok(())
}
