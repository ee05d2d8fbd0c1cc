//! Sequences: beat-positioned notes against a rhythm.

use std::thread;
use std::time::Duration;

use thiserror::Error;
use tonality::{Note, Rhythm, Scale, Tone};

use crate::channel::{Channel, ChannelError};

/// Errors from reshaping a sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
    /// `flip` only works when every tone lies in the mirror scale.
    #[error("tone {0} is not in the flip scale")]
    ToneOutsideScale(Tone),
}

/// A [`Note`] fixed at a beat position from the start of its sequence.
/// Both the beat and the note's duration are measured in beats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SequenceNote {
    pub beat: f64,
    pub note: Note,
}

// ════════════════════════════════════════════════════════════════════════════
// Sequence — ordered notes plus a tempo
// ════════════════════════════════════════════════════════════════════════════

/// An ordered collection of notes with the tempo that paces them.
///
/// ```rust
/// use score::Sequence;
/// use tonality::{Note, Rhythm, Tone};
///
/// let mut seq = Sequence::new(Rhythm::new(120.0));
/// seq.push(Note::new(Tone::new(60), 1.0));
/// seq.push(Note::new(Tone::new(62), 0.5));
/// assert_eq!(seq.notes()[1].beat, 1.0);      // starts where the first ended
/// ```
#[derive(Clone, Debug)]
pub struct Sequence {
    rhythm: Rhythm,
    notes:  Vec<SequenceNote>,
}

impl Sequence {
    pub fn new(rhythm: Rhythm) -> Sequence {
        Sequence { rhythm, notes: Vec::new() }
    }

    pub fn rhythm(&self) -> Rhythm {
        self.rhythm
    }

    /// The notes in beat order.
    pub fn notes(&self) -> &[SequenceNote] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Beat at which the last note ends.
    pub fn end_beat(&self) -> f64 {
        self.notes
            .last()
            .map(|sn| sn.beat + sn.note.duration)
            .unwrap_or(0.0)
    }

    /// Append a note at the running end of the sequence.
    pub fn push(&mut self, note: Note) {
        let beat = self.end_beat();
        self.notes.push(SequenceNote { beat, note });
    }

    /// Append another sequence's notes at the running end, scaling their
    /// durations by the tempo ratio so their wall-clock length is kept.
    pub fn append(&mut self, other: &Sequence) {
        let ratio =
            self.rhythm.beats_per_second() / other.rhythm.beats_per_second();
        let mut beat = self.end_beat();
        for sn in &other.notes {
            let note = Note::with_strength(
                sn.note.tone,
                sn.note.duration * ratio,
                sn.note.strength,
            );
            self.notes.push(SequenceNote { beat, note });
            beat += note.duration;
        }
    }

    /// Insert a note at its proper beat position.
    pub fn insert(&mut self, sn: SequenceNote) {
        self.notes.push(sn);
        self.sort_by_beat();
    }

    fn sort_by_beat(&mut self) {
        self.notes.sort_by(|a, b| a.beat.total_cmp(&b.beat));
    }

    // ── playback ──────────────────────────────────────────────────────────

    /// Fire every note's on/off pair into the channel, timestamped relative
    /// to `start_time` seconds, and return without waiting.
    pub fn play(
        &self,
        start_time: f64,
        channel:    &mut dyn Channel,
    ) -> Result<(), ChannelError> {
        let bps = self.rhythm.beats_per_second();
        for sn in &self.notes {
            let start = start_time + sn.beat / bps;
            let end   = start_time + (sn.beat + sn.note.duration) / bps;
            channel.play_note(start, end, sn.note.tone, sn.note.strength)?;
        }
        Ok(())
    }

    /// Like [`play`](Sequence::play), but paced: events are released about a
    /// second ahead of the channel clock, and the call returns only once the
    /// final note has ended.
    pub fn play_and_wait(
        &self,
        start_time: f64,
        channel:    &mut dyn Channel,
    ) -> Result<(), ChannelError> {
        // How far ahead of the channel clock events may be queued, and the
        // margin reserved for our own processing.
        const LOOKAHEAD: f64 = 1.0;
        const MARGIN:    f64 = 0.1;

        let bps = self.rhythm.beats_per_second();
        let mut horizon = channel.now() + LOOKAHEAD - MARGIN;
        let mut end = start_time;
        for sn in &self.notes {
            let start = start_time + sn.beat / bps;
            end = start_time + (sn.beat + sn.note.duration) / bps;
            channel.play_note(start, end, sn.note.tone, sn.note.strength)?;

            if end > horizon {
                let pause = horizon - channel.now();
                if pause > 0.0 {
                    thread::sleep(Duration::from_secs_f64(pause));
                }
                horizon = channel.now() + LOOKAHEAD - MARGIN;
            }
        }

        // Stay until the final note has actually finished sounding.
        let tail = end - channel.now();
        if tail > 0.0 {
            thread::sleep(Duration::from_secs_f64(tail));
        }
        Ok(())
    }

    // ── reshaping ─────────────────────────────────────────────────────────

    /// Mirror the sequence in time: the last note's beat becomes the first.
    pub fn reverse(&mut self) {
        let Some(last) = self.notes.last() else { return };
        let t_max = last.beat;
        for sn in &mut self.notes {
            sn.beat = t_max - sn.beat;
        }
        self.sort_by_beat();
    }

    /// Mirror the sequence in pitch within `scale`: the highest tone maps to
    /// the lowest and vice versa.  Every tone must lie in the scale.
    pub fn flip(&mut self, scale: &Scale) -> Result<(), SequenceError> {
        if self.notes.is_empty() {
            return Ok(());
        }

        let degree = |tone: Tone| {
            scale
                .degree_of(tone)
                .ok_or(SequenceError::ToneOutsideScale(tone))
        };

        let mut lowest = usize::MAX;
        let mut highest = 0usize;
        for sn in &self.notes {
            let d = degree(sn.note.tone)?;
            lowest = lowest.min(d);
            highest = highest.max(d);
        }

        for sn in &mut self.notes {
            let d = degree(sn.note.tone)?;
            sn.note.tone = scale.tones()[highest - d + lowest];
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
