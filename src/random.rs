/// Pluggable random sources for the data generators.
///
/// Generators never reach for an ambient RNG. They take a `&mut dyn
/// RandomSource` so sessions can be seeded and tests can replay an exact
/// sequence of draws.
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Pick an element uniformly from a non-empty slice.
///
/// Panics if `items` is empty; every caller passes a fixed vocabulary.
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    let idx = (rng.next_f64() * items.len() as f64) as usize;
    &items[idx.min(items.len() - 1)]
}

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A random lowercase base-36 token of exactly `len` characters.
pub fn base36_token(rng: &mut dyn RandomSource, len: usize) -> String {
    (0..len).map(|_| *pick(rng, BASE36) as char).collect()
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Thread-local OS-seeded RNG.
pub struct ThreadRandom(ThreadRng);

impl ThreadRandom {
    pub fn new() -> Self {
        Self(rand::thread_rng())
    }
}

impl Default for ThreadRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Seeded RNG; the same seed always yields the same session.
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
///
/// Values are clamped into `[0, 1)` so a test cannot feed a draw the real
/// sources would never produce.
#[derive(Debug, Clone)]
pub struct ReplayRandom {
    draws: Vec<f64>,
    pos: usize,
}

impl ReplayRandom {
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws: Vec<f64> = draws.into();
        assert!(!draws.is_empty(), "replay source needs at least one draw");
        Self { draws, pos: 0 }
    }

    /// A source that always returns the same draw.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

impl RandomSource for ReplayRandom {
    fn next_f64(&mut self) -> f64 {
        let v = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Build the session random source: seeded when a seed is configured,
/// thread RNG otherwise.
pub fn session_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom::new()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
