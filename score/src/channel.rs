//! Output channels: where notes go to be heard.
//!
//! Times at this layer are seconds (`1.0 == 1 s`); strengths are `0.0-1.0`.
//! [`MidiChannel`] converts both into what the bridge wants (nanoseconds
//! and velocity 0-127).

use thiserror::Error;
use tonality::Tone;

use host_midi::{
    MidiError, CONTROL_ALL_NOTES_OFF, CONTROL_CHANGE, NOTE_OFF, NOTE_ON,
};

/// Errors while pushing notes into a channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    #[error(transparent)]
    Midi(#[from] MidiError),
}

// ════════════════════════════════════════════════════════════════════════════
// Channel — the playback trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can sound notes at given times.
pub trait Channel {
    /// Begin sounding `tone` at `time` seconds with `strength` in `[0, 1]`.
    fn note_on(&mut self, time: f64, tone: Tone, strength: f64) -> Result<(), ChannelError>;

    /// Stop sounding `tone` at `time` seconds.
    fn note_off(&mut self, time: f64, tone: Tone, strength: f64) -> Result<(), ChannelError>;

    /// Sound `tone` from `start` until `end`.
    fn play_note(
        &mut self,
        start:    f64,
        end:      f64,
        tone:     Tone,
        strength: f64,
    ) -> Result<(), ChannelError> {
        self.note_on(start, tone, strength)?;
        self.note_off(end, tone, strength)
    }

    /// The channel's current time in seconds.
    fn now(&self) -> f64;
}

impl<C: Channel + ?Sized> Channel for Box<C> {
    fn note_on(&mut self, time: f64, tone: Tone, strength: f64) -> Result<(), ChannelError> {
        (**self).note_on(time, tone, strength)
    }

    fn note_off(&mut self, time: f64, tone: Tone, strength: f64) -> Result<(), ChannelError> {
        (**self).note_off(time, tone, strength)
    }

    fn play_note(
        &mut self,
        start:    f64,
        end:      f64,
        tone:     Tone,
        strength: f64,
    ) -> Result<(), ChannelError> {
        (**self).play_note(start, end, tone, strength)
    }

    fn now(&self) -> f64 {
        (**self).now()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ConsoleChannel — the simple-stupid way to see notes
// ════════════════════════════════════════════════════════════════════════════

/// Prints events instead of sounding them.
///
/// Its clock is a paper clock: `now()` reports the time of the most recent
/// event, so sequenced playback through it never waits on real time.
#[derive(Debug, Default)]
pub struct ConsoleChannel {
    clock: f64,
}

impl ConsoleChannel {
    pub fn new() -> ConsoleChannel {
        ConsoleChannel { clock: 0.0 }
    }
}

impl Channel for ConsoleChannel {
    fn note_on(&mut self, time: f64, tone: Tone, strength: f64) -> Result<(), ChannelError> {
        println!("{:.6} note_on  {} {:.2}", time, tone, strength);
        self.clock = time;
        Ok(())
    }

    fn note_off(&mut self, time: f64, tone: Tone, strength: f64) -> Result<(), ChannelError> {
        println!("{:.6} note_off {} {:.2}", time, tone, strength);
        self.clock = time;
        Ok(())
    }

    fn now(&self) -> f64 {
        self.clock
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MidiChannel — notes onto the virtual MIDI source
// ════════════════════════════════════════════════════════════════════════════

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Nanoseconds shaved off every note-off so back-to-back notes on the same
/// pitch stay distinct for the listener.
const NOTE_OFF_GUARD_NS: u64 = 1;

/// Emits raw bridge events; tests substitute a recorder.
trait EventSink {
    fn emit(
        &mut self,
        time_ns: u64,
        event:   u8,
        channel: u8,
        data0:   u8,
        data1:   u8,
    ) -> Result<(), MidiError>;

    fn now_ns(&self) -> u64;
}

/// The process-wide `host_midi` bridge.
struct BridgeSink;

impl EventSink for BridgeSink {
    fn emit(
        &mut self,
        time_ns: u64,
        event:   u8,
        channel: u8,
        data0:   u8,
        data1:   u8,
    ) -> Result<(), MidiError> {
        host_midi::send_midi_event(time_ns, event, channel, data0, data1)
    }

    fn now_ns(&self) -> u64 {
        host_midi::now()
    }
}

fn seconds_to_nanos(time: f64) -> u64 {
    (time * NANOS_PER_SECOND) as u64
}

fn strength_to_velocity(strength: f64) -> u8 {
    assert!(
        (0.0..=1.0).contains(&strength),
        "strength must be within 0.0-1.0"
    );
    (127.0 * strength) as u8
}

/// Sounds notes on one MIDI channel of the process-wide virtual source.
///
/// Construction sends an innocuous note-off so that endpoint registration
/// problems surface immediately rather than mid-performance.
pub struct MidiChannel {
    sink:    Box<dyn EventSink>,
    channel: u8,
}

impl MidiChannel {
    /// Channel on the shared virtual source; `channel` is the MIDI channel
    /// id 0-14.
    pub fn new(channel: u8) -> Result<MidiChannel, ChannelError> {
        MidiChannel::over(Box::new(BridgeSink), channel)
    }

    fn over(sink: Box<dyn EventSink>, channel: u8) -> Result<MidiChannel, ChannelError> {
        let mut chn = MidiChannel { sink, channel };
        let t = chn.sink.now_ns();
        chn.sink.emit(t, NOTE_OFF, chn.channel, 0, 0)?;
        log::debug!("midi channel {} ready", channel);
        Ok(chn)
    }

    /// The MIDI channel id this channel plays on.
    pub fn channel_id(&self) -> u8 {
        self.channel
    }

    /// Silence every sounding note on this channel, effective immediately.
    pub fn all_notes_off(&mut self) -> Result<(), ChannelError> {
        let t = self.sink.now_ns();
        self.sink
            .emit(t, CONTROL_CHANGE, self.channel, CONTROL_ALL_NOTES_OFF, 0)?;
        Ok(())
    }
}

impl Channel for MidiChannel {
    fn note_on(&mut self, time: f64, tone: Tone, strength: f64) -> Result<(), ChannelError> {
        self.sink.emit(
            seconds_to_nanos(time),
            NOTE_ON,
            self.channel,
            tone.index(),
            strength_to_velocity(strength),
        )?;
        Ok(())
    }

    fn note_off(&mut self, time: f64, tone: Tone, strength: f64) -> Result<(), ChannelError> {
        let t = seconds_to_nanos(time).saturating_sub(NOTE_OFF_GUARD_NS);
        self.sink.emit(
            t,
            NOTE_OFF,
            self.channel,
            tone.index(),
            strength_to_velocity(strength),
        )?;
        Ok(())
    }

    fn now(&self) -> f64 {
        self.sink.now_ns() as f64 / NANOS_PER_SECOND
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
