//! # fretboard
//!
//! A six-string guitar model that plays through any [`score::Channel`]:
//! press a voicing, strum, and the strings translate frets into timed
//! note events.
//!
//! ```rust
//! use fretboard::{Guitar, StrumDirection};
//! use score::ConsoleChannel;
//!
//! let mut gtr = Guitar::new(ConsoleChannel::new());
//! gtr.press_voicing(0.0, "Em").unwrap();
//! gtr.strum(0.0, 1.0 / 16.0, StrumDirection::Down, 0, 6, 0.8).unwrap();
//! ```

use thiserror::Error;
use tonality::Tone;

use score::{Channel, ChannelError};

/// Strings on the instrument.
pub const STRING_COUNT: usize = 6;

/// Errors from driving the guitar.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FretboardError {
    #[error("unknown voicing `{0}`")]
    UnknownVoicing(String),
    #[error("string index {0} out of range (0-5)")]
    StringOutOfRange(usize),
    #[error(transparent)]
    Channel(#[from] ChannelError),
}

/// Direction of travel across the strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrumDirection {
    /// Low string first.
    Down,
    /// High string first.
    Up,
}

// ════════════════════════════════════════════════════════════════════════════
// Voicings — named fret shapes
// ════════════════════════════════════════════════════════════════════════════

/// Fret positions for a named chord voicing, low string first.
/// `-1` mutes the string, `0` plays it open.
pub fn voicing(name: &str) -> Option<[i8; STRING_COUNT]> {
    Some(match name {
        "none" => [-1, -1, -1, -1, -1, -1],

        // ── majors ────────────────────────────────────────────────────────
        "C"   => [-1,  3,  2,  0,  1,  0],
        "F"   => [-1, -1,  3,  2,  1,  1],
        "G"   => [ 3,  2,  0,  0,  0,  3],
        "G'"  => [ 3,  5,  5,  4,  3,  3],
        "D"   => [-1, -1,  0,  2,  3,  2],
        "A"   => [ 0,  0,  2,  2,  2,  0],
        "A''" => [ 5,  7,  7,  6,  5,  5],
        "E"   => [ 0,  2,  2,  1,  0,  0],
        "Bb"  => [-1, -1,  3,  3,  3,  1],
        "Eb"  => [-1, -1,  5,  3,  4,  3],
        "Ab"  => [-1, -1,  6,  5,  4,  4],
        "Db"  => [-1, -1,  3,  1,  2,  1],
        "Gb"  => [-1, -1,  4,  2,  1,  1],
        "B"   => [-1, -1,  4,  4,  4,  2],

        // ── minors ────────────────────────────────────────────────────────
        "Cm"  => [-1, -1,  5,  5,  4,  3],
        "Fm"  => [-1, -1,  3,  1,  1,  1],
        "Gm"  => [-1, -1,  5,  3,  3,  3],
        "Dm"  => [-1,  0,  0,  2,  3,  1],
        "Am"  => [ 0,  0,  2,  2,  1,  0],
        "Em"  => [ 0,  2,  2,  0,  0,  0],
        "Bbm" => [-1, -1,  3,  3,  2,  1],
        "Ebm" => [-1, -1,  4,  3,  4,  2],
        "Abm" => [-1, -1,  6,  4,  4,  4],
        "Dbm" => [-1, -1,  2,  1,  2,  0],
        "Gbm" => [-1, -1,  4,  2,  2,  2],
        "Bm"  => [-1, -1,  4,  4,  3,  2],

        // ── sevenths ──────────────────────────────────────────────────────
        "C7"  => [-1,  3,  2,  3,  1, -1],
        "F7"  => [-1, -1,  1,  2,  1,  1],
        "G7"  => [ 3,  2,  0,  0,  0,  1],
        "D7"  => [-1, -1,  0,  2,  1,  2],
        "A7"  => [-1, -1,  2,  2,  2,  3],
        "E7"  => [ 0,  2,  0,  1,  0,  0],
        "Bb7" => [-1, -1,  3,  3,  3,  4],
        "Eb7" => [-1, -1,  1,  3,  2,  3],
        "Ab7" => [-1, -1,  1,  1,  1,  2],
        "Db7" => [-1, -1,  3,  4,  2,  4],
        "Gb7" => [-1, -1,  4,  3,  2,  0],
        "B7"  => [-1,  2,  1,  2,  0,  2],

        // ── diminished and augmented ──────────────────────────────────────
        "Ddim"  => [-1, -1,  0,  1,  0,  1],
        "Ebdim" => [-1, -1,  1,  2,  1,  2],
        "Edim"  => [-1, -1,  2,  3,  2,  3],
        "Eaug"  => [-1, -1,  2,  1,  1,  0],
        "Faug"  => [-1, -1,  3,  2,  2,  1],
        "Gaug"  => [-1, -1,  5,  4,  4,  3],

        // ── ninths ────────────────────────────────────────────────────────
        "C9"  => [ 3, -1,  2,  3,  3,  3],
        "F9"  => [-1,  3, -1,  2,  4,  3],
        "G9"  => [-1, -1,  0,  2,  0,  1],
        "D9"  => [-1, -1,  4,  2,  1,  0],
        "A9"  => [ 0,  0,  2,  4,  2,  3],
        "E9"  => [ 0,  2,  0,  1,  3,  2],
        "Bb9" => [-1, -1,  0,  1,  1,  1],
        "Eb9" => [-1, -1,  1,  0,  2,  1],
        "Ab9" => [-1, -1,  1,  3,  1,  2],
        "Db9" => [ 4, -1,  3,  4,  4,  4],
        "Gb9" => [-1,  4, -1,  3,  5,  4],
        "B9"  => [ 2, -1,  1,  2,  2,  2],

        _ => return None,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// GuitarString — press, pluck, silence
// ════════════════════════════════════════════════════════════════════════════

/// One fretted string: an open tone, the currently pressed fret, and
/// whether it is ringing.
#[derive(Debug)]
struct GuitarString {
    open:    Tone,
    fret:    i8,
    ringing: bool,
}

impl GuitarString {
    fn new(open: Tone) -> GuitarString {
        GuitarString { open, fret: 0, ringing: false }
    }

    fn sounding_tone(&self) -> Tone {
        self.open.transposed(self.fret as i32)
    }

    /// Press a fret, stopping whatever the string was playing.
    fn press(
        &mut self,
        channel: &mut dyn Channel,
        time:    f64,
        fret:    i8,
    ) -> Result<(), ChannelError> {
        self.silence(channel, time)?;
        self.fret = fret;
        Ok(())
    }

    /// Stop the current note, if the string is ringing.
    fn silence(&mut self, channel: &mut dyn Channel, time: f64) -> Result<(), ChannelError> {
        if self.ringing {
            channel.note_off(time, self.sounding_tone(), 0.0)?;
            self.ringing = false;
        }
        Ok(())
    }

    /// Pluck: end the previous note and sound the pressed fret.
    /// A muted pluck makes no sound and leaves the string open.
    fn pluck(
        &mut self,
        channel:  &mut dyn Channel,
        time:     f64,
        strength: f64,
    ) -> Result<(), ChannelError> {
        self.silence(channel, time)?;
        if self.fret >= 0 {
            channel.note_on(time, self.sounding_tone(), strength)?;
            self.ringing = true;
        } else {
            self.fret = 0;
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Guitar — six strings over one channel
// ════════════════════════════════════════════════════════════════════════════

/// A guitar in standard tuning playing into a [`Channel`].
pub struct Guitar<C: Channel> {
    channel: C,
    strings: [GuitarString; STRING_COUNT],
}

impl<C: Channel> Guitar<C> {
    /// Standard tuning: E3 A3 D4 G4 B4 E5 (octave 5 holds middle C).
    pub fn new(channel: C) -> Guitar<C> {
        let open = [40u8, 45, 50, 55, 59, 64];
        Guitar {
            channel,
            strings: open.map(|idx| GuitarString::new(Tone::new(idx))),
        }
    }

    /// The channel the guitar plays into.
    pub fn channel(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Press one fret. A negative fret mutes the string.
    pub fn press_fret(
        &mut self,
        time:   f64,
        string: usize,
        fret:   i8,
    ) -> Result<(), FretboardError> {
        let s = self
            .strings
            .get_mut(string)
            .ok_or(FretboardError::StringOutOfRange(string))?;
        s.press(&mut self.channel, time, fret)?;
        Ok(())
    }

    /// Press all six frets at once, low string first.
    pub fn press_frets(
        &mut self,
        time:  f64,
        frets: &[i8; STRING_COUNT],
    ) -> Result<(), FretboardError> {
        for (i, &fret) in frets.iter().enumerate() {
            self.press_fret(time, i, fret)?;
        }
        Ok(())
    }

    /// Press the frets of a named voicing.
    pub fn press_voicing(&mut self, time: f64, name: &str) -> Result<(), FretboardError> {
        let frets = voicing(name)
            .ok_or_else(|| FretboardError::UnknownVoicing(name.to_string()))?;
        self.press_frets(time, &frets)
    }

    /// Stop every string and mute the instrument.
    pub fn silence(&mut self, time: f64) -> Result<(), FretboardError> {
        self.press_frets(time, &[-1; STRING_COUNT])
    }

    /// Strum across the strings.
    ///
    /// Starting at `start_string`, travel `num_strings` strings in
    /// `direction`, plucking each with `strength` and advancing time by
    /// `seconds_per_string` between plucks.
    pub fn strum(
        &mut self,
        time:               f64,
        seconds_per_string: f64,
        direction:          StrumDirection,
        start_string:       usize,
        num_strings:        usize,
        strength:           f64,
    ) -> Result<(), FretboardError> {
        let start = start_string.min(STRING_COUNT - 1);
        let mut t = time;
        match direction {
            StrumDirection::Down => {
                let end = (start + num_strings).min(STRING_COUNT);
                for i in start..end {
                    self.strings[i].pluck(&mut self.channel, t, strength)?;
                    t += seconds_per_string;
                }
            }
            StrumDirection::Up => {
                let end = start as isize - num_strings as isize;
                let mut i = start as isize;
                while i > end.max(-1) {
                    self.strings[i as usize].pluck(&mut self.channel, t, strength)?;
                    t += seconds_per_string;
                    i -= 1;
                }
            }
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Channel recording the on/off stream.
    #[derive(Default)]
    struct RecordingChannel {
        events: Vec<(&'static str, f64, u8)>,
    }

    impl Channel for RecordingChannel {
        fn note_on(&mut self, time: f64, tone: Tone, _s: f64) -> Result<(), ChannelError> {
            self.events.push(("on", time, tone.index()));
            Ok(())
        }

        fn note_off(&mut self, time: f64, tone: Tone, _s: f64) -> Result<(), ChannelError> {
            self.events.push(("off", time, tone.index()));
            Ok(())
        }

        fn now(&self) -> f64 {
            0.0
        }
    }

    fn note_ons(gtr: &mut Guitar<RecordingChannel>) -> Vec<(f64, u8)> {
        gtr.channel()
            .events
            .iter()
            .filter(|(kind, _, _)| *kind == "on")
            .map(|&(_, t, idx)| (t, idx))
            .collect()
    }

    // ── voicings ──────────────────────────────────────────────────────────
    #[test]
    fn voicing_lookup() {
        assert_eq!(voicing("C"), Some([-1, 3, 2, 0, 1, 0]));
        assert_eq!(voicing("Em"), Some([0, 2, 2, 0, 0, 0]));
        assert_eq!(voicing("H7"), None);
    }

    #[test]
    fn unknown_voicing_is_an_error() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        assert_eq!(
            gtr.press_voicing(0.0, "H7"),
            Err(FretboardError::UnknownVoicing("H7".to_string()))
        );
    }

    // ── tuning ────────────────────────────────────────────────────────────
    #[test]
    fn open_strum_plays_standard_tuning() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        gtr.strum(0.0, 0.0, StrumDirection::Down, 0, 6, 0.8).unwrap();

        let pitches: Vec<u8> = note_ons(&mut gtr).iter().map(|&(_, p)| p).collect();
        assert_eq!(pitches, [40, 45, 50, 55, 59, 64]); // E A D G B E
    }

    // ── strumming ─────────────────────────────────────────────────────────
    #[test]
    fn c_voicing_sounds_five_strings() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        gtr.press_voicing(0.0, "C").unwrap();
        gtr.strum(0.0, 0.0, StrumDirection::Down, 0, 6, 0.8).unwrap();

        let pitches: Vec<u8> = note_ons(&mut gtr).iter().map(|&(_, p)| p).collect();
        // The low E is muted; the rest spell C major.
        assert_eq!(pitches, [48, 52, 55, 60, 64]);
    }

    #[test]
    fn strum_down_spaces_plucks_in_time() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        gtr.strum(1.0, 0.1, StrumDirection::Down, 0, 3, 0.8).unwrap();

        let times: Vec<f64> = note_ons(&mut gtr).iter().map(|&(t, _)| t).collect();
        assert_eq!(times.len(), 3);
        assert!((times[0] - 1.0).abs() < 1e-12);
        assert!((times[1] - 1.1).abs() < 1e-12);
        assert!((times[2] - 1.2).abs() < 1e-12);
    }

    #[test]
    fn strum_up_starts_at_the_high_string() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        gtr.strum(0.0, 0.0, StrumDirection::Up, 5, 6, 0.8).unwrap();

        let pitches: Vec<u8> = note_ons(&mut gtr).iter().map(|&(_, p)| p).collect();
        assert_eq!(pitches, [64, 59, 55, 50, 45, 40]);
    }

    #[test]
    fn restrum_ends_the_previous_note_first() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        gtr.strum(0.0, 0.0, StrumDirection::Down, 0, 1, 0.8).unwrap();
        gtr.strum(1.0, 0.0, StrumDirection::Down, 0, 1, 0.8).unwrap();

        assert_eq!(
            gtr.channel().events,
            [("on", 0.0, 40), ("off", 1.0, 40), ("on", 1.0, 40)]
        );
    }

    #[test]
    fn pressing_a_new_fret_silences_the_ringing_string() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        gtr.strum(0.0, 0.0, StrumDirection::Down, 0, 1, 0.8).unwrap();
        gtr.press_fret(0.5, 0, 3).unwrap();

        assert_eq!(gtr.channel().events[1], ("off", 0.5, 40));
    }

    #[test]
    fn muted_pluck_is_silent_and_reopens_the_string() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        gtr.press_fret(0.0, 0, -1).unwrap();

        gtr.strum(0.0, 0.0, StrumDirection::Down, 0, 1, 0.8).unwrap();
        assert!(note_ons(&mut gtr).is_empty());

        // The silent pluck left the string open again.
        gtr.strum(1.0, 0.0, StrumDirection::Down, 0, 1, 0.8).unwrap();
        assert_eq!(note_ons(&mut gtr), [(1.0, 40)]);
    }

    #[test]
    fn silence_stops_everything() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        gtr.press_voicing(0.0, "Em").unwrap();
        gtr.strum(0.0, 0.0, StrumDirection::Down, 0, 6, 0.8).unwrap();
        gtr.silence(2.0).unwrap();

        let offs_at_2: usize = gtr
            .channel()
            .events
            .iter()
            .filter(|(kind, t, _)| *kind == "off" && *t == 2.0)
            .count();
        assert_eq!(offs_at_2, 6);

        // Nothing is ringing any more, and every string is muted.
        let before = gtr.channel().events.len();
        gtr.silence(3.0).unwrap();
        assert_eq!(gtr.channel().events.len(), before);
    }

    #[test]
    fn string_index_out_of_range() {
        let mut gtr = Guitar::new(RecordingChannel::default());
        assert_eq!(
            gtr.press_fret(0.0, 6, 0),
            Err(FretboardError::StringOutOfRange(6))
        );
    }
}
