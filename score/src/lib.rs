//! # score
//!
//! Channels and note sequencing for live playback.
//!
//! A [`Channel`] is where notes go to be heard: [`ConsoleChannel`] prints
//! them, [`MidiChannel`] drives the `host_midi` virtual source.  A
//! [`Sequence`] is an ordered list of beat-positioned notes against a
//! [`tonality::Rhythm`], played through any channel.
//!
//! ```rust
//! use score::{Channel, ConsoleChannel, Sequence};
//! use tonality::{Note, Rhythm, Tone};
//!
//! let mut seq = Sequence::new(Rhythm::new(144.0));
//! for glyph in ["c", "e", "g"] {
//!     seq.push(Note::new(Tone::from_glyph(glyph, 5).unwrap(), 1.0));
//! }
//!
//! let mut chn = ConsoleChannel::new();
//! seq.play(chn.now(), &mut chn).unwrap();
//! ```

pub mod channel;
pub mod sequence;

pub use channel::{Channel, ChannelError, ConsoleChannel, MidiChannel};
pub use sequence::{Sequence, SequenceError, SequenceNote};
