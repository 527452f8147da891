//! Random outcome selection.
//!
//! RULE: Game rules never call a platform RNG directly.
//! Every draw goes through a RandomSource owned by the engine, so a
//! session can be replayed from a seed or scripted in tests.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use std::collections::VecDeque;

/// Picks an index into a fixed outcome table.
pub trait RandomSource: Send {
    /// Return an index in [0, len). `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

/// Seeded PCG stream used by real sessions.
pub struct GameRng {
    inner: Pcg64Mcg,
}

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// Roll a u64 in [0, n).
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        use rand::Rng;
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }
}

impl RandomSource for GameRng {
    fn pick(&mut self, len: usize) -> usize {
        self.next_u64_below(len as u64) as usize
    }
}

/// Replays a fixed list of indices. Each index is reduced modulo `len`.
/// Panics when exhausted, which surfaces a test that draws more than it scripted.
#[derive(Debug, Default)]
pub struct ScriptedRng {
    picks: VecDeque<usize>,
}

impl ScriptedRng {
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl RandomSource for ScriptedRng {
    fn pick(&mut self, len: usize) -> usize {
        let next = self
            .picks
            .pop_front()
            .expect("ScriptedRng exhausted: script more picks for this test");
        next % len
    }
}

/// Draw one element of `table` uniformly.
pub fn choose<'a, T>(rng: &mut dyn RandomSource, table: &'a [T]) -> Option<&'a T> {
    if table.is_empty() {
        return None;
    }
    table.get(rng.pick(table.len()))
}
