//! # host_midi
//!
//! A thin bridge to the host platform's MIDI and timing services.  Two
//! operations make up the whole surface:
//!
//! * [`send_midi_event`] — deliver one timestamped 3-byte MIDI message
//!   through a process-wide virtual source endpoint, created lazily on the
//!   first send and reused for the life of the process.
//! * [`now`] — read the host's monotonic hardware clock in nanoseconds.
//!   Divide by 1e9 for seconds; only differences between two readings are
//!   meaningful.
//!
//! On macOS the virtual source is a CoreMIDI endpoint that other
//! applications (GarageBand, Logic, a softsynth) can attach to as if it were
//! hardware, and timestamps are CoreAudio host time.  On other platforms
//! [`now`] still works from a process-local monotonic epoch, but opening an
//! endpoint reports [`MidiError::PlatformUnavailable`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use host_midi::{now, send_midi_event, NOTE_ON, NOTE_OFF};
//!
//! let t = now();
//! send_midi_event(t, NOTE_ON, 0, 60, 100)?;                      // middle C down
//! send_midi_event(t + 500_000_000, NOTE_OFF, 0, 60, 0)?;         // up half a second later
//! # Ok::<(), host_midi::MidiError>(())
//! ```
//!
//! For explicit ownership (several sources, custom names) use [`MidiOut`]
//! directly instead of the module-level functions.

use once_cell::sync::OnceCell;
use thiserror::Error;

#[cfg(not(target_os = "macos"))]
use once_cell::sync::Lazy;
#[cfg(not(target_os = "macos"))]
use std::time::Instant;

// ════════════════════════════════════════════════════════════════════════════
// Status bytes and channel-mode controllers
// ════════════════════════════════════════════════════════════════════════════

pub const NOTE_OFF: u8           = 0x80;
pub const NOTE_ON: u8            = 0x90;
pub const POLY_AFTERTOUCH: u8    = 0xA0;
pub const CONTROL_CHANGE: u8     = 0xB0;
pub const PROGRAM_CHANGE: u8     = 0xC0;
pub const CHANNEL_AFTERTOUCH: u8 = 0xD0;
pub const PITCH_WHEEL: u8        = 0xE0;

/// Controller number of the All Notes Off channel-mode message.
pub const CONTROL_ALL_NOTES_OFF: u8 = 0x7B;

/// Highest accepted channel. 15 and above never reach packet construction.
pub const MAX_CHANNEL: u8 = 14;

/// Name the CoreMIDI client registers under.
pub const DEFAULT_CLIENT_NAME: &str = "host_midi";

/// Name other applications see for the virtual source.
pub const DEFAULT_SOURCE_NAME: &str = "host_midi output";

// ════════════════════════════════════════════════════════════════════════════
// MidiError
// ════════════════════════════════════════════════════════════════════════════

/// Everything that can go wrong between composing a message and handing it
/// to the platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MidiError {
    /// Channel was 15 or more; the event was dropped before any platform
    /// call, and no endpoint was created on its account.
    #[error("midi channel {0} out of range (0-14); event dropped")]
    ChannelOutOfRange(u8),
    /// Registering the client or the virtual source with the MIDI service
    /// failed.
    #[error("virtual midi source registration failed (status {0})")]
    EndpointInit(i32),
    /// The platform rejected packet delivery.
    #[error("midi packet delivery failed (status {0})")]
    Send(i32),
    /// This platform has no MIDI service to bind to.
    #[error("no midi service available on this platform")]
    PlatformUnavailable,
}

// ════════════════════════════════════════════════════════════════════════════
// now — the host clock
// ════════════════════════════════════════════════════════════════════════════

#[cfg(target_os = "macos")]
mod host_time {
    #[link(name = "CoreAudio", kind = "framework")]
    extern "C" {
        pub fn AudioGetCurrentHostTime() -> u64;
        pub fn AudioConvertHostTimeToNanos(host_time: u64) -> u64;
    }
}

/// Current host time in nanoseconds.
///
/// Monotonic and non-decreasing within a process run.  The epoch is
/// arbitrary (tied to system boot on macOS), so treat only the difference
/// between two readings as meaningful.
#[cfg(target_os = "macos")]
pub fn now() -> u64 {
    unsafe { host_time::AudioConvertHostTimeToNanos(host_time::AudioGetCurrentHostTime()) }
}

/// Current host time in nanoseconds, counted from a process-local monotonic
/// epoch.  Only differences between two readings are meaningful.
#[cfg(not(target_os = "macos"))]
pub fn now() -> u64 {
    static EPOCH: Lazy<Instant> = Lazy::new(Instant::now);
    EPOCH.elapsed().as_nanos() as u64
}

// ════════════════════════════════════════════════════════════════════════════
// Message composition
// ════════════════════════════════════════════════════════════════════════════

/// Compose a 3-byte short message from a pre-shifted event nibble (`0x90`,
/// `0xB0`, …), a channel, and two data bytes.
///
/// The status byte is `event | channel`.  Channels above [`MAX_CHANNEL`]
/// are rejected before any packet is built.
pub fn compose_message(
    event:   u8,
    channel: u8,
    data0:   u8,
    data1:   u8,
) -> Result<[u8; 3], MidiError> {
    if channel > MAX_CHANNEL {
        return Err(MidiError::ChannelOutOfRange(channel));
    }
    Ok([event | channel, data0, data1])
}

// ════════════════════════════════════════════════════════════════════════════
// PacketSink — delivery seam between packaging and the platform endpoint
// ════════════════════════════════════════════════════════════════════════════

/// Delivers one composed message with its timestamp.  The real sink wraps a
/// CoreMIDI virtual source; tests substitute a recording sink.
trait PacketSink {
    fn deliver(&self, time: u64, data: &[u8; 3]) -> Result<(), MidiError>;
}

// ── CoreMIDI virtual source ───────────────────────────────────────────────

#[cfg(target_os = "macos")]
struct VirtualSourceSink {
    // The client must outlive the source it registered.
    _client: coremidi::Client,
    source:  coremidi::VirtualSource,
}

// MIDIClientRef and MIDIEndpointRef are plain integer object handles;
// CoreMIDI serialises access to them internally.
#[cfg(target_os = "macos")]
unsafe impl Send for VirtualSourceSink {}
#[cfg(target_os = "macos")]
unsafe impl Sync for VirtualSourceSink {}

#[cfg(target_os = "macos")]
impl PacketSink for VirtualSourceSink {
    fn deliver(&self, time: u64, data: &[u8; 3]) -> Result<(), MidiError> {
        // A single short message always fits the packet buffer's inline
        // storage; no dynamic allocation on the send path.
        let packets = coremidi::PacketBuffer::new(time, data);
        self.source.received(&packets).map_err(MidiError::Send)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MidiOut — an owned virtual source endpoint
// ════════════════════════════════════════════════════════════════════════════

/// An explicitly owned virtual MIDI source.
///
/// The process-wide functions ([`send_midi_event`]) manage one of these
/// behind a once-init slot; construct your own when you want a second
/// source or a custom name.  There is no close operation: the endpoint
/// stays registered until the handle is dropped or the process exits.
pub struct MidiOut {
    sink: Box<dyn PacketSink + Send + Sync>,
}

impl MidiOut {
    /// Register a MIDI client and a virtual source under the given names.
    #[cfg(target_os = "macos")]
    pub fn open(client_name: &str, source_name: &str) -> Result<MidiOut, MidiError> {
        let client = coremidi::Client::new(client_name).map_err(MidiError::EndpointInit)?;
        let source = client
            .virtual_source(source_name)
            .map_err(MidiError::EndpointInit)?;
        log::debug!("registered virtual midi source `{}`", source_name);
        Ok(MidiOut {
            sink: Box::new(VirtualSourceSink { _client: client, source }),
        })
    }

    /// Always [`MidiError::PlatformUnavailable`] off macOS.
    #[cfg(not(target_os = "macos"))]
    pub fn open(_client_name: &str, _source_name: &str) -> Result<MidiOut, MidiError> {
        Err(MidiError::PlatformUnavailable)
    }

    #[cfg(test)]
    fn with_sink(sink: Box<dyn PacketSink + Send + Sync>) -> MidiOut {
        MidiOut { sink }
    }

    /// Validate, compose, and deliver one timestamped event.
    ///
    /// `time` is in host nanoseconds as returned by [`now`]; `0` means
    /// "deliver immediately".
    pub fn send(
        &self,
        time:    u64,
        event:   u8,
        channel: u8,
        data0:   u8,
        data1:   u8,
    ) -> Result<(), MidiError> {
        let data = compose_message(event, channel, data0, data1)?;
        self.sink.deliver(time, &data)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// EndpointSlot — guarded one-time initialisation of the shared endpoint
// ════════════════════════════════════════════════════════════════════════════

/// One-way `Uninitialized -> Initialized` slot for the process-wide
/// endpoint.  Concurrent first use runs the factory exactly once; a failed
/// factory leaves the slot empty so a later send retries.
struct EndpointSlot {
    cell: OnceCell<MidiOut>,
}

impl EndpointSlot {
    const fn new() -> EndpointSlot {
        EndpointSlot { cell: OnceCell::new() }
    }

    fn get_or_open<F>(&self, open: F) -> Result<&MidiOut, MidiError>
    where
        F: FnOnce() -> Result<MidiOut, MidiError>,
    {
        self.cell.get_or_try_init(open)
    }
}

static OUTPUT: EndpointSlot = EndpointSlot::new();

fn default_output() -> Result<MidiOut, MidiError> {
    MidiOut::open(DEFAULT_CLIENT_NAME, DEFAULT_SOURCE_NAME)
}

/// Shared send path: validate first, so a bad channel can never leave a
/// freshly created endpoint behind, then ensure the endpoint and deliver.
fn send_through<F>(
    slot:    &EndpointSlot,
    open:    F,
    time:    u64,
    event:   u8,
    channel: u8,
    data0:   u8,
    data1:   u8,
) -> Result<(), MidiError>
where
    F: FnOnce() -> Result<MidiOut, MidiError>,
{
    let data = compose_message(event, channel, data0, data1).map_err(|e| {
        log::warn!("{}", e);
        e
    })?;
    let out = slot.get_or_open(open)?;
    out.sink.deliver(time, &data)
}

// ════════════════════════════════════════════════════════════════════════════
// Public surface
// ════════════════════════════════════════════════════════════════════════════

/// Send one 3-byte MIDI event over the process-wide virtual source,
/// timestamped with `time` host nanoseconds.
///
/// The endpoint is created on the first successful call and reused
/// afterwards.  The event nibble arrives pre-shifted ([`NOTE_ON`],
/// [`CONTROL_CHANGE`], …) and is OR-ed with `channel` (0–14) to form the
/// status byte; `data0` and `data1` pass through unchanged.
pub fn send_midi_event(
    time:    u64,
    event:   u8,
    channel: u8,
    data0:   u8,
    data1:   u8,
) -> Result<(), MidiError> {
    send_through(&OUTPUT, default_output, time, event, channel, data0, data1)
}

/// Silence every sounding note on `channel`, effective immediately.
pub fn all_notes_off(channel: u8) -> Result<(), MidiError> {
    send_midi_event(now(), CONTROL_CHANGE, channel, CONTROL_ALL_NOTES_OFF, 0)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier, Mutex};
    use std::thread;
    use std::time::Duration;

    /// Records every delivered packet for inspection.
    #[derive(Clone, Default)]
    struct RecordingSink {
        sent: Arc<Mutex<Vec<(u64, [u8; 3])>>>,
    }

    impl PacketSink for RecordingSink {
        fn deliver(&self, time: u64, data: &[u8; 3]) -> Result<(), MidiError> {
            self.sent.lock().unwrap().push((time, *data));
            Ok(())
        }
    }

    // ── message composition ──────────────────────────────────────────────
    #[test]
    fn compose_status_byte_for_all_valid_channels() {
        for ch in 0..=MAX_CHANNEL {
            let msg = compose_message(NOTE_ON, ch, 60, 100).unwrap();
            assert_eq!(msg, [NOTE_ON | ch, 60, 100]);
        }
    }

    #[test]
    fn compose_rejects_channel_15_and_above() {
        for ch in [15, 16, 200, 255] {
            assert_eq!(
                compose_message(NOTE_ON, ch, 60, 100),
                Err(MidiError::ChannelOutOfRange(ch))
            );
        }
    }

    #[test]
    fn compose_round_trips_event_and_channel() {
        for ch in 0..=MAX_CHANNEL {
            for event in [NOTE_OFF, NOTE_ON, CONTROL_CHANGE, PITCH_WHEEL] {
                let msg = compose_message(event, ch, 1, 2).unwrap();
                assert_eq!(msg[0] & 0xF0, event);
                assert_eq!(msg[0] & 0x0F, ch);
            }
        }
    }

    // ── clock ────────────────────────────────────────────────────────────
    #[test]
    fn now_is_non_decreasing() {
        let a = now();
        let b = now();
        assert!(b >= a);
    }

    #[test]
    fn now_advances_across_a_sleep() {
        let a = now();
        thread::sleep(Duration::from_millis(20));
        let elapsed = now() - a;
        // At least the sleep, and well under a second on any sane scheduler.
        assert!(elapsed >= 20_000_000);
        assert!(elapsed < 1_000_000_000);
    }

    // ── endpoint slot ────────────────────────────────────────────────────
    #[test]
    fn slot_initialises_exactly_once() {
        let slot = EndpointSlot::new();
        let registrations = AtomicUsize::new(0);
        for _ in 0..5 {
            slot.get_or_open(|| {
                registrations.fetch_add(1, Ordering::SeqCst);
                Ok(MidiOut::with_sink(Box::new(RecordingSink::default())))
            })
            .unwrap();
        }
        assert_eq!(registrations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn slot_returns_the_same_handle() {
        let slot = EndpointSlot::new();
        let mk = || Ok(MidiOut::with_sink(Box::new(RecordingSink::default())));
        let a = slot.get_or_open(mk).unwrap() as *const MidiOut;
        let b = slot.get_or_open(mk).unwrap() as *const MidiOut;
        assert_eq!(a, b);
    }

    #[test]
    fn slot_concurrent_first_use_registers_once() {
        let slot = EndpointSlot::new();
        let registrations = AtomicUsize::new(0);
        let barrier = Barrier::new(8);

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    barrier.wait();
                    slot.get_or_open(|| {
                        registrations.fetch_add(1, Ordering::SeqCst);
                        Ok(MidiOut::with_sink(Box::new(RecordingSink::default())))
                    })
                    .unwrap();
                });
            }
        });

        assert_eq!(registrations.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn slot_retries_after_failed_initialisation() {
        let slot = EndpointSlot::new();
        let err = slot.get_or_open(|| Err(MidiError::EndpointInit(-50)));
        assert_eq!(err.err(), Some(MidiError::EndpointInit(-50)));

        // The slot stayed empty, so the next attempt runs a fresh factory.
        slot.get_or_open(|| Ok(MidiOut::with_sink(Box::new(RecordingSink::default()))))
            .unwrap();
    }

    // ── send path ────────────────────────────────────────────────────────
    #[test]
    fn send_delivers_one_timestamped_packet() {
        let slot = EndpointSlot::new();
        let sink = RecordingSink::default();
        let out = MidiOut::with_sink(Box::new(sink.clone()));

        send_through(&slot, || Ok(out), 1000, NOTE_ON, 0, 60, 100).unwrap();

        let sent = sink.sent.lock().unwrap();
        assert_eq!(*sent, [(1000, [0x90, 60, 100])]);
    }

    #[test]
    fn invalid_channel_never_touches_the_platform() {
        let slot = EndpointSlot::new();
        let sink = RecordingSink::default();
        let opens = AtomicUsize::new(0);

        let result = send_through(
            &slot,
            || {
                opens.fetch_add(1, Ordering::SeqCst);
                Ok(MidiOut::with_sink(Box::new(sink.clone())))
            },
            2000,
            NOTE_ON,
            16,
            60,
            100,
        );

        assert_eq!(result, Err(MidiError::ChannelOutOfRange(16)));
        // No endpoint was created and nothing was dispatched.
        assert_eq!(opens.load(Ordering::SeqCst), 0);
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn midi_out_send_composes_and_delivers() {
        let sink = RecordingSink::default();
        let out = MidiOut::with_sink(Box::new(sink.clone()));

        out.send(500, NOTE_OFF, 3, 64, 0).unwrap();
        out.send(900, CONTROL_CHANGE, 3, CONTROL_ALL_NOTES_OFF, 0).unwrap();

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent[0], (500, [0x83, 64, 0]));
        assert_eq!(sent[1], (900, [0xB3, 0x7B, 0]));
    }

    #[test]
    fn initialisation_failure_surfaces_and_later_sends_retry() {
        let slot = EndpointSlot::new();
        let sink = RecordingSink::default();

        let first = send_through(
            &slot,
            || Err(MidiError::EndpointInit(-10830)),
            0,
            NOTE_ON,
            0,
            60,
            100,
        );
        assert_eq!(first, Err(MidiError::EndpointInit(-10830)));

        let second = send_through(
            &slot,
            || Ok(MidiOut::with_sink(Box::new(sink.clone()))),
            0,
            NOTE_ON,
            0,
            60,
            100,
        );
        assert!(second.is_ok());
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }
}
