//! # tonality
//!
//! Chromatic tones, scales, and chords for live performance.
//!
//! Music is built in a small hierarchy:
//!
//! * [`Tone`] names a pitch on the chromatic lattice (index 60 = middle C)
//! * [`Scale`] is a tonic plus a [`ScaleKind`] interval pattern
//! * [`Chord`] stacks diatonic degrees of a scale
//! * [`Note`] is a tone plus a duration in beats and a strength
//! * [`Rhythm`] converts beats to seconds
//!
//! ## Quick start
//!
//! ```rust
//! use tonality::{Tone, Scale, ScaleKind, Chord, ChordKind};
//!
//! let c = Tone::from_glyph("c", 5).unwrap();   // middle C
//! assert_eq!(c.index(), 60);
//!
//! let c_major = Scale::new(c, ScaleKind::Major);
//! let triad   = Chord::new(c_major, ChordKind::Fifth);
//! let indices: Vec<u8> = triad.tones().iter().map(|t| t.index()).collect();
//! assert_eq!(indices, [60, 64, 67]);            // C E G
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Semitones per chromatic octave.
pub const TONES_PER_OCTAVE: u8 = 12;

/// Key centers ordered by ascending fifths.
pub const CIRCLE_OF_FIFTHS: [&str; 12] = [
    "c", "g", "d", "a", "e", "b", "g-", "d-", "a-", "e-", "b-", "f",
];

/// Errors from parsing glyphs, scale names, and chord names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TheoryError {
    #[error("unknown glyph `{0}`")]
    UnknownGlyph(String),
    #[error("unknown scale `{0}`")]
    UnknownScale(String),
    #[error("unknown chord `{0}`")]
    UnknownChord(String),
}

// ════════════════════════════════════════════════════════════════════════════
// Tone — a pitch on the chromatic lattice
// ════════════════════════════════════════════════════════════════════════════

/// A chromatic pitch, stored as an index where
///
/// * `0`  is the lowest C (glyph `c`, octave 0)
/// * `60` is middle C     (glyph `c`, octave 5)
/// * `69` is A440         (glyph `a`, octave 5)
///
/// The index doubles as the MIDI note number, so tones are clamped to 0–127.
///
/// ```rust
/// use tonality::Tone;
///
/// let a = Tone::new(69);
/// assert_eq!(a.glyph(), "a");
/// assert_eq!(a.octave(), 5);
/// assert!((a.frequency() - 440.0).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tone {
    index: u8,
}

/// Middle C.
pub const MIDDLE_C: Tone = Tone { index: 60 };

/// Concert A (440 Hz).
pub const A440: Tone = Tone { index: 69 };

/// Sharp spellings used when printing a tone.
const PRINT_GLYPHS: [&str; 12] = [
    "c", "c+", "d", "d+", "e", "f", "f+", "g", "g+", "a", "a+", "b",
];

/// Resolve one glyph spelling to its pitch class.
///
/// All four accidental spellings are accepted: `c+`, `c#`, `d-`, `db`
/// name the same class.
fn glyph_class(glyph: &str) -> Option<u8> {
    Some(match glyph {
        "c"                        => 0,
        "c+" | "c#" | "d-" | "db"  => 1,
        "d"                        => 2,
        "d+" | "d#" | "e-" | "eb"  => 3,
        "e"                        => 4,
        "f"                        => 5,
        "f+" | "f#" | "g-" | "gb"  => 6,
        "g"                        => 7,
        "g+" | "g#" | "a-" | "ab"  => 8,
        "a"                        => 9,
        "a+" | "a#" | "b-" | "bb"  => 10,
        "b"                        => 11,
        _ => return None,
    })
}

impl Tone {
    /// Tone from a raw chromatic index, clamped to 0–127.
    pub fn new(index: u8) -> Tone {
        Tone { index: index.min(127) }
    }

    /// Tone from a glyph spelling and an octave (middle C is `("c", 5)`).
    pub fn from_glyph(glyph: &str, octave: u8) -> Result<Tone, TheoryError> {
        let class = glyph_class(&glyph.to_lowercase())
            .ok_or_else(|| TheoryError::UnknownGlyph(glyph.to_string()))?;
        Ok(Tone::new(octave * TONES_PER_OCTAVE + class))
    }

    /// Chromatic index, also the MIDI note number.
    pub fn index(self) -> u8 {
        self.index
    }

    /// Pitch class 0–11 (0 = C).
    pub fn class(self) -> u8 {
        self.index % TONES_PER_OCTAVE
    }

    /// Octave number (middle C is octave 5).
    pub fn octave(self) -> u8 {
        self.index / TONES_PER_OCTAVE
    }

    /// Glyph of the pitch class, in sharp spelling (`c`, `c+`, `d`, …).
    pub fn glyph(self) -> &'static str {
        PRINT_GLYPHS[self.class() as usize]
    }

    /// Equal-temperament frequency in Hz, tuned to A440.
    pub fn frequency(self) -> f64 {
        440.0 * 2f64.powf((self.index as f64 - 69.0) / TONES_PER_OCTAVE as f64)
    }

    /// Whether two tones share a pitch class, ignoring octave.
    pub fn same_class(self, other: Tone) -> bool {
        self.class() == other.class()
    }

    /// Transpose by a signed number of semitones, clamped to 0–127.
    pub fn transposed(self, semitones: i32) -> Tone {
        let idx = (self.index as i32 + semitones).clamp(0, 127);
        Tone { index: idx as u8 }
    }
}

impl fmt::Display for Tone {
    /// Glyph plus octave, e.g. `c5` or `f+3`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.glyph(), self.octave())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ScaleKind — interval patterns
// ════════════════════════════════════════════════════════════════════════════

/// Named interval patterns for [`Scale`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    Chromatic,
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Pentatonic,
}

impl ScaleKind {
    /// Semitone offsets from the tonic, one octave's worth.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleKind::Chromatic  => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            ScaleKind::Major      => &[0, 2, 4, 5, 7, 9, 11],
            ScaleKind::Minor      => &[0, 2, 3, 5, 7, 8, 10],
            ScaleKind::Dorian     => &[0, 2, 3, 5, 7, 9, 10],
            ScaleKind::Phrygian   => &[0, 1, 3, 5, 7, 8, 10],
            ScaleKind::Lydian     => &[0, 2, 4, 6, 7, 9, 11],
            ScaleKind::Mixolydian => &[0, 2, 4, 5, 7, 9, 10],
            ScaleKind::Pentatonic => &[0, 2, 5, 7, 9],
        }
    }

    /// Lower-case name as used in scale display strings.
    pub fn name(self) -> &'static str {
        match self {
            ScaleKind::Chromatic  => "chromatic",
            ScaleKind::Major      => "major",
            ScaleKind::Minor      => "minor",
            ScaleKind::Dorian     => "dorian",
            ScaleKind::Phrygian   => "phrygian",
            ScaleKind::Lydian     => "lydian",
            ScaleKind::Mixolydian => "mixolydian",
            ScaleKind::Pentatonic => "pentatonic",
        }
    }

    /// Every kind, for exhaustive searches.
    pub fn all() -> &'static [ScaleKind] {
        &[
            ScaleKind::Chromatic,
            ScaleKind::Major,
            ScaleKind::Minor,
            ScaleKind::Dorian,
            ScaleKind::Phrygian,
            ScaleKind::Lydian,
            ScaleKind::Mixolydian,
            ScaleKind::Pentatonic,
        ]
    }
}

impl FromStr for ScaleKind {
    type Err = TheoryError;

    /// Parse a scale name; `ionian` and `aeolian` alias the major and
    /// natural-minor patterns.
    fn from_str(s: &str) -> Result<ScaleKind, TheoryError> {
        Ok(match s.to_lowercase().as_str() {
            "chromatic"          => ScaleKind::Chromatic,
            "major" | "ionian"   => ScaleKind::Major,
            "minor" | "aeolian"  => ScaleKind::Minor,
            "dorian"             => ScaleKind::Dorian,
            "phrygian"           => ScaleKind::Phrygian,
            "lydian"             => ScaleKind::Lydian,
            "mixolydian"         => ScaleKind::Mixolydian,
            "pentatonic"         => ScaleKind::Pentatonic,
            _ => return Err(TheoryError::UnknownScale(s.to_string())),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Scale — a tonic, a kind, and the tones they generate
// ════════════════════════════════════════════════════════════════════════════

/// A scale: tonic plus interval pattern, with its tone list materialised.
#[derive(Clone, Debug)]
pub struct Scale {
    tonic: Tone,
    kind:  ScaleKind,
    tones: Vec<Tone>,
}

impl Scale {
    /// One octave of the scale starting at `tonic`.
    pub fn new(tonic: Tone, kind: ScaleKind) -> Scale {
        Scale::spanning(tonic, kind, 1)
    }

    /// `octaves` consecutive octaves of the scale starting at `tonic`.
    pub fn spanning(tonic: Tone, kind: ScaleKind, octaves: u8) -> Scale {
        let mut tones = Vec::new();
        for octave in 0..octaves {
            for &step in kind.intervals() {
                tones.push(tonic.transposed(
                    octave as i32 * TONES_PER_OCTAVE as i32 + step as i32,
                ));
            }
        }
        Scale { tonic, kind, tones }
    }

    pub fn tonic(&self) -> Tone {
        self.tonic
    }

    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// The scale's tones in ascending order.
    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }

    /// Position of `tone` within the scale, if present.
    pub fn degree_of(&self, tone: Tone) -> Option<usize> {
        self.tones.iter().position(|&t| t == tone)
    }

    /// Whether any tone of the scale shares `tone`'s pitch class.
    pub fn contains_class(&self, tone: Tone) -> bool {
        self.tones.iter().any(|t| t.same_class(tone))
    }

    /// Tones of `self` whose pitch class also appears in `other`.
    pub fn intersect(&self, other: &Scale) -> Vec<Tone> {
        self.tones
            .iter()
            .copied()
            .filter(|&t| other.contains_class(t))
            .collect()
    }
}

impl PartialEq for Scale {
    /// Scales compare by tonic and kind; the octave span is presentation.
    fn eq(&self, other: &Scale) -> bool {
        self.tonic == other.tonic && self.kind == other.kind
    }
}

impl Eq for Scale {}

impl fmt::Display for Scale {
    /// Tonic glyph plus kind, e.g. `c_major`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.tonic.glyph(), self.kind.name())
    }
}

/// All scales of the given kinds, across the 12 tonics of octave 0, whose
/// pitch classes cover every tone in `tones`.
///
/// Comparison is by pitch class, so the octaves of the input do not matter.
pub fn scales_containing(tones: &[Tone], kinds: &[ScaleKind]) -> Vec<Scale> {
    let mut found = Vec::new();
    for &kind in kinds {
        for class in 0..TONES_PER_OCTAVE {
            let scale = Scale::new(Tone::new(class), kind);
            if tones.iter().all(|&t| scale.contains_class(t)) {
                found.push(scale);
            }
        }
    }
    found
}

// ════════════════════════════════════════════════════════════════════════════
// Chord — stacked diatonic degrees of a scale
// ════════════════════════════════════════════════════════════════════════════

/// Named degree stacks for [`Chord`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChordKind {
    Third,
    Diminished,
    Fifth,
    Augmented,
    DiminishedSeventh,
    Seventh,
    AugmentedSeventh,
    Ninth,
    Eleventh,
}

impl ChordKind {
    /// Diatonic degree offsets into the parent scale.
    pub fn degrees(self) -> &'static [u8] {
        match self {
            ChordKind::Third             => &[0, 2],
            ChordKind::Diminished        => &[0, 2, 3],
            ChordKind::Fifth             => &[0, 2, 4],
            ChordKind::Augmented         => &[0, 2, 5],
            ChordKind::DiminishedSeventh => &[0, 2, 3, 5],
            ChordKind::Seventh           => &[0, 2, 4, 6],
            ChordKind::AugmentedSeventh  => &[0, 2, 5, 7],
            ChordKind::Ninth             => &[0, 2, 4, 6, 8],
            ChordKind::Eleventh          => &[0, 2, 4, 6, 8, 10],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordKind::Third             => "3rd",
            ChordKind::Diminished        => "dim",
            ChordKind::Fifth             => "5th",
            ChordKind::Augmented         => "aug",
            ChordKind::DiminishedSeventh => "dim7th",
            ChordKind::Seventh           => "7th",
            ChordKind::AugmentedSeventh  => "aug7th",
            ChordKind::Ninth             => "9th",
            ChordKind::Eleventh          => "11th",
        }
    }
}

impl FromStr for ChordKind {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<ChordKind, TheoryError> {
        Ok(match s.to_lowercase().as_str() {
            "3rd"    => ChordKind::Third,
            "dim"    => ChordKind::Diminished,
            "5th"    => ChordKind::Fifth,
            "aug"    => ChordKind::Augmented,
            "dim7th" => ChordKind::DiminishedSeventh,
            "7th"    => ChordKind::Seventh,
            "aug7th" => ChordKind::AugmentedSeventh,
            "9th"    => ChordKind::Ninth,
            "11th"   => ChordKind::Eleventh,
            _ => return Err(TheoryError::UnknownChord(s.to_string())),
        })
    }
}

/// A chord built from a scale by stacking diatonic degrees.
///
/// Degree offsets wrap across octaves, so extended chords (9th, 11th) reach
/// above a one-octave scale:
///
/// ```rust
/// use tonality::{Tone, Scale, ScaleKind, Chord, ChordKind};
///
/// let ninth = Chord::new(
///     Scale::new(Tone::new(60), ScaleKind::Major),
///     ChordKind::Ninth,
/// );
/// let idx: Vec<u8> = ninth.tones().iter().map(|t| t.index()).collect();
/// assert_eq!(idx, [60, 64, 67, 71, 74]);   // C E G B D5
/// ```
#[derive(Clone, Debug)]
pub struct Chord {
    scale: Scale,
    kind:  ChordKind,
    tones: Vec<Tone>,
}

impl Chord {
    pub fn new(scale: Scale, kind: ChordKind) -> Chord {
        let span = scale.tones().len();
        let tones = kind
            .degrees()
            .iter()
            .map(|&d| {
                let wrap   = d as usize / span;
                let degree = d as usize % span;
                scale.tones()[degree]
                    .transposed(wrap as i32 * TONES_PER_OCTAVE as i32)
            })
            .collect();
        Chord { scale, kind, tones }
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn kind(&self) -> ChordKind {
        self.kind
    }

    /// The chord's tones, lowest first.
    pub fn tones(&self) -> &[Tone] {
        &self.tones
    }
}

impl PartialEq for Chord {
    fn eq(&self, other: &Chord) -> bool {
        self.scale == other.scale && self.kind == other.kind
    }
}

impl Eq for Chord {}

impl fmt::Display for Chord {
    /// Scale plus chord kind, e.g. `c_major_5th`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.scale, self.kind.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Note — a tone with duration and strength
// ════════════════════════════════════════════════════════════════════════════

/// A tone paired with a duration in beats and a strength in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Note {
    pub tone:     Tone,
    pub duration: f64,
    pub strength: f64,
}

/// Default strength when none is given.
pub const DEFAULT_STRENGTH: f64 = 0.75;

impl Note {
    /// Note with the default strength.
    pub fn new(tone: Tone, duration: f64) -> Note {
        Note::with_strength(tone, duration, DEFAULT_STRENGTH)
    }

    /// Note with an explicit strength.
    pub fn with_strength(tone: Tone, duration: f64, strength: f64) -> Note {
        assert!(
            (0.0..=1.0).contains(&strength),
            "strength must be within 0.0-1.0"
        );
        Note { tone, duration, strength }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rhythm — tempo
// ════════════════════════════════════════════════════════════════════════════

/// A tempo, in beats per minute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rhythm {
    bpm: f64,
}

impl Rhythm {
    pub fn new(bpm: f64) -> Rhythm {
        assert!(bpm > 0.0, "tempo must be positive");
        Rhythm { bpm }
    }

    pub fn beats_per_minute(self) -> f64 {
        self.bpm
    }

    pub fn beats_per_second(self) -> f64 {
        self.bpm / 60.0
    }
}

/// Seconds per beat at the given tempo.
pub fn bpm_to_seconds(bpm: f64) -> f64 {
    60.0 / bpm
}

/// Seconds per `1/divisor` note at the given tempo.
pub fn bpm_note_divisor_to_seconds(bpm: f64, divisor: f64) -> f64 {
    bpm_to_seconds(bpm) / divisor
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    // ── Tone ─────────────────────────────────────────────────────────────
    #[test]
    fn tone_glyph_octave_of_middle_c() {
        assert_eq!(MIDDLE_C.glyph(), "c");
        assert_eq!(MIDDLE_C.octave(), 5);
        assert_eq!(MIDDLE_C.to_string(), "c5");
    }

    #[test]
    fn tone_from_glyph_spellings() {
        // All four accidental spellings resolve to the same index.
        for g in ["c+", "c#", "d-", "db"] {
            assert_eq!(Tone::from_glyph(g, 5).unwrap().index(), 61);
        }
    }

    #[test]
    fn tone_from_glyph_case_insensitive() {
        assert_eq!(
            Tone::from_glyph("A", 5).unwrap(),
            Tone::from_glyph("a", 5).unwrap()
        );
    }

    #[test]
    fn tone_unknown_glyph_is_error() {
        assert_eq!(
            Tone::from_glyph("h", 5),
            Err(TheoryError::UnknownGlyph("h".to_string()))
        );
    }

    #[test]
    fn tone_frequency_a440() {
        assert!((A440.frequency() - 440.0).abs() < 1e-9);
        // Middle C in equal temperament
        assert!((MIDDLE_C.frequency() - 261.625_565).abs() < 1e-3);
    }

    #[test]
    fn tone_transpose_and_clamp() {
        assert_eq!(MIDDLE_C.transposed(12).index(), 72);
        assert_eq!(MIDDLE_C.transposed(-12).index(), 48);
        assert_eq!(Tone::new(120).transposed(100).index(), 127);
        assert_eq!(Tone::new(5).transposed(-100).index(), 0);
    }

    #[test]
    fn tone_ordering() {
        assert!(Tone::new(60) < Tone::new(61));
        assert!(Tone::new(69) >= A440);
    }

    #[test]
    fn tone_same_class_across_octaves() {
        assert!(Tone::new(0).same_class(MIDDLE_C));
        assert!(!Tone::new(1).same_class(MIDDLE_C));
    }

    // ── Scale ─────────────────────────────────────────────────────────────
    #[test]
    fn scale_c_major_tones() {
        let s = Scale::new(MIDDLE_C, ScaleKind::Major);
        let idx: Vec<u8> = s.tones().iter().map(|t| t.index()).collect();
        assert_eq!(idx, [60, 62, 64, 65, 67, 69, 71]);
    }

    #[test]
    fn scale_pentatonic_has_five_tones() {
        let s = Scale::new(MIDDLE_C, ScaleKind::Pentatonic);
        assert_eq!(s.tones().len(), 5);
    }

    #[test]
    fn scale_spanning_two_octaves() {
        let s = Scale::spanning(MIDDLE_C, ScaleKind::Major, 2);
        assert_eq!(s.tones().len(), 14);
        assert_eq!(s.tones()[7].index(), 72); // C6 starts the second octave
    }

    #[test]
    fn scale_equality_ignores_span() {
        let a = Scale::new(MIDDLE_C, ScaleKind::Minor);
        let b = Scale::spanning(MIDDLE_C, ScaleKind::Minor, 3);
        assert_eq!(a, b);
        assert_ne!(a, Scale::new(MIDDLE_C, ScaleKind::Major));
    }

    #[test]
    fn scale_display() {
        let s = Scale::new(Tone::from_glyph("a", 5).unwrap(), ScaleKind::Minor);
        assert_eq!(s.to_string(), "a_minor");
    }

    #[test]
    fn scale_intersect_shares_six_classes() {
        // C major and G major differ only at F vs F#.
        let c = Scale::new(MIDDLE_C, ScaleKind::Major);
        let g = Scale::new(Tone::from_glyph("g", 5).unwrap(), ScaleKind::Major);
        assert_eq!(c.intersect(&g).len(), 6);
    }

    #[test]
    fn scale_kind_aliases_parse() {
        assert_eq!("ionian".parse::<ScaleKind>().unwrap(), ScaleKind::Major);
        assert_eq!("aeolian".parse::<ScaleKind>().unwrap(), ScaleKind::Minor);
        assert!("klingon".parse::<ScaleKind>().is_err());
    }

    #[test]
    fn scales_containing_c_e_g() {
        let tones = [
            Tone::from_glyph("c", 5).unwrap(),
            Tone::from_glyph("e", 5).unwrap(),
            Tone::from_glyph("g", 5).unwrap(),
        ];
        let found = scales_containing(&tones, &[ScaleKind::Major]);
        // C, F and G major all contain the C major triad.
        assert_eq!(found.len(), 3);
        assert!(found.iter().any(|s| s.to_string() == "c_major"));
    }

    // ── Chord ─────────────────────────────────────────────────────────────
    #[test]
    fn chord_c_major_triad() {
        let c = Chord::new(Scale::new(MIDDLE_C, ScaleKind::Major), ChordKind::Fifth);
        let idx: Vec<u8> = c.tones().iter().map(|t| t.index()).collect();
        assert_eq!(idx, [60, 64, 67]); // C E G
    }

    #[test]
    fn chord_c_major_seventh() {
        let c = Chord::new(Scale::new(MIDDLE_C, ScaleKind::Major), ChordKind::Seventh);
        let idx: Vec<u8> = c.tones().iter().map(|t| t.index()).collect();
        assert_eq!(idx, [60, 64, 67, 71]); // C E G B
    }

    #[test]
    fn chord_ninth_wraps_octave() {
        let c = Chord::new(Scale::new(MIDDLE_C, ScaleKind::Major), ChordKind::Ninth);
        assert_eq!(c.tones().last().unwrap().index(), 74); // D6
    }

    #[test]
    fn chord_equality() {
        let a = Chord::new(
            Scale::new(Tone::from_glyph("a", 5).unwrap(), ScaleKind::Minor),
            ChordKind::Seventh,
        );
        let b = Chord::new(
            Scale::new(Tone::from_glyph("A", 5).unwrap(), ScaleKind::Minor),
            ChordKind::Seventh,
        );
        assert_eq!(a, b);
        let c = Chord::new(
            Scale::new(Tone::from_glyph("b", 5).unwrap(), ScaleKind::Minor),
            ChordKind::Seventh,
        );
        assert_ne!(a, c);
    }

    #[test]
    fn chord_display() {
        let c = Chord::new(Scale::new(MIDDLE_C, ScaleKind::Major), ChordKind::Seventh);
        assert_eq!(c.to_string(), "c_major_7th");
    }

    // ── Note and Rhythm ───────────────────────────────────────────────────
    #[test]
    fn note_default_strength() {
        let n = Note::new(MIDDLE_C, 0.25);
        assert_eq!(n.strength, DEFAULT_STRENGTH);
    }

    #[test]
    fn rhythm_conversions() {
        let r = Rhythm::new(120.0);
        assert_eq!(r.beats_per_second(), 2.0);
        assert_eq!(bpm_to_seconds(120.0), 0.5);
        assert_eq!(bpm_note_divisor_to_seconds(60.0, 4.0), 0.25);
    }
}
