//! Play "Twinkle Twinkle Little Star", to the console or over virtual MIDI.
//!
//! Usage: `cargo run --example twinkle -- stdout|midi`
//!
//! In midi mode, attach a listener (GarageBand, a softsynth) before
//! continuing past the prompts.

use std::io::{self, BufRead, Write};

use score::{Channel, ChannelError, ConsoleChannel, MidiChannel, Sequence};
use tonality::{Note, Rhythm, Tone};

fn usage() {
    eprintln!("usage: twinkle stdout|midi");
}

fn wait_for(prompt: &str) {
    println!("{}", prompt);
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

/// Build a note from a compact spec like `c4` or `gg4`: the trailing digit
/// is the octave, the glyph names the pitch, and a doubled glyph doubles
/// the duration.
fn parse_note(spec: &str) -> Note {
    let octave: u8 = spec[spec.len() - 1..].parse().expect("octave digit");
    let glyph = &spec[..1];
    let duration = (spec.len() - 1) as f64;
    Note::new(Tone::from_glyph(glyph, octave).expect("glyph"), duration)
}

fn main() {
    let mode = match std::env::args().nth(1).as_deref() {
        Some("stdout") => "stdout",
        Some("midi")   => "midi",
        _ => {
            usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(mode) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(mode: &str) -> Result<(), ChannelError> {
    let mut chn: Box<dyn Channel> = if mode == "midi" {
        wait_for("Make sure a MIDI listener is running, then hit return.");
        let chn = MidiChannel::new(0)?;
        wait_for("The listener should report a new midi device. Hit return to play.");
        Box::new(chn)
    } else {
        Box::new(ConsoleChannel::new())
    };

    // The melody, phrase by phrase.
    let phrases = [
        "c4 c4 g4 g4 a4 a4 gg4",
        "f4 f4 e4 e4 d4 d4 cc4",
        "g4 g4 f4 f4 e4 e4 dd4",
        "g4 g4 f4 f4 e4 e4 dd4",
        "c4 c4 g4 g4 a4 a4 gg4",
        "f4 f4 e4 e4 d4 d4 cc4",
    ];

    let mut seq = Sequence::new(Rhythm::new(144.0));
    for phrase in phrases {
        for spec in phrase.split_whitespace() {
            seq.push(parse_note(spec));
        }
    }

    seq.play_and_wait(chn.now(), &mut *chn)
}
