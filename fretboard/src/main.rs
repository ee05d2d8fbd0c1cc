//! strummer — strum a chord progression to the console or over virtual MIDI.

use std::io::{self, BufRead, Write};

use env_logger::Env;
use fretboard::{voicing, FretboardError, Guitar, StrumDirection};
use score::{Channel, ConsoleChannel, MidiChannel};

fn usage() {
    eprintln!("usage: strummer stdout|midi [voicing…]");
    eprintln!("       e.g. strummer stdout E A D");
}

fn wait_for(prompt: &str) {
    println!("{}", prompt);
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let mode = match args.next().as_deref() {
        Some("stdout") => "stdout",
        Some("midi")   => "midi",
        _ => {
            usage();
            std::process::exit(1);
        }
    };

    let mut progression: Vec<String> = args.collect();
    if progression.is_empty() {
        progression = vec!["E".into(), "A".into(), "D".into()];
    }
    if let Some(bad) = progression.iter().find(|n| voicing(n.as_str()).is_none()) {
        eprintln!("unknown voicing `{}`", bad);
        std::process::exit(1);
    }

    if let Err(e) = run(mode, &progression) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(mode: &str, progression: &[String]) -> Result<(), FretboardError> {
    let chn: Box<dyn Channel> = if mode == "midi" {
        wait_for("Make sure a MIDI listener is running, then hit return.");
        let chn = MidiChannel::new(0)?;
        wait_for("The listener should report a new midi device. Hit return to play.");
        Box::new(chn)
    } else {
        Box::new(ConsoleChannel::new())
    };

    log::info!("strumming {} voicings", progression.len());

    let mut gtr = Guitar::new(chn);
    let mut t = gtr.channel().now();
    for (i, name) in progression.iter().enumerate() {
        gtr.press_voicing(t, name)?;

        // Alternate down- and up-strokes through the progression.
        let (direction, start) = if i % 2 == 0 {
            (StrumDirection::Down, 0)
        } else {
            (StrumDirection::Up, 5)
        };
        gtr.strum(t, 1.0 / 16.0, direction, start, 6, 0.8)?;
        t += 1.0;
    }
    gtr.silence(t)?;

    if mode == "midi" {
        wait_for("Hit return once the progression has finished sounding.");
    }
    Ok(())
}
