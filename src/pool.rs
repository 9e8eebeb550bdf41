//! The pool of undrawn numbers and the sources that pick from it.
//!
//! Drawing is the only nondeterministic step of a game. It goes through the
//! [`DrawSource`] trait so sessions can run on a seeded RNG or a fixed script.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeSet, VecDeque};
use tracing::warn;

/// Numbers in `1..=max` not yet drawn, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    numbers: Vec<u16>,
}

impl Pool {
    /// ```
    /// use roskis::pool::Pool;
    /// use std::collections::BTreeSet;
    ///
    /// let used: BTreeSet<u16> = [2, 4].into_iter().collect();
    /// let pool = Pool::remaining(5, &used);
    /// assert_eq!(pool.as_slice(), &[1, 3, 5]);
    /// ```
    pub fn remaining(max: u16, used: &BTreeSet<u16>) -> Self {
        let numbers = (1..=max).filter(|n| !used.contains(n)).collect();
        Self { numbers }
    }

    /// Pool left after `extra` is drawn as well.
    pub fn remaining_without(max: u16, used: &BTreeSet<u16>, extra: u16) -> Self {
        let numbers = (1..=max).filter(|&n| n != extra && !used.contains(&n)).collect();
        Self { numbers }
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.numbers
    }

    pub fn contains(&self, number: u16) -> bool {
        self.numbers.binary_search(&number).is_ok()
    }

    /// Draw one number using `source`. `None` only when the pool is empty.
    ///
    /// A pick that is missing or not in the pool is replaced by the smallest
    /// remaining number.
    pub fn draw_with<S: DrawSource + ?Sized>(&self, source: &mut S) -> Option<u16> {
        let first = *self.numbers.first()?;
        match source.pick(&self.numbers) {
            Some(n) if self.contains(n) => Some(n),
            other => {
                warn!(pick = ?other, fallback = first, "draw source offered no pool member");
                Some(first)
            }
        }
    }
}

/// Picks the next number from a non-empty, ascending pool.
pub trait DrawSource {
    /// Return one member of `pool`.
    fn pick(&mut self, pool: &[u16]) -> Option<u16>;
}

/// Uniform draws backed by any [`Rng`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<ChaCha8Rng> {
    /// Reproducible draws from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Fresh seed taken from the thread RNG.
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        Self::seeded(seed)
    }
}

impl<R: Rng> DrawSource for RngSource<R> {
    fn pick(&mut self, pool: &[u16]) -> Option<u16> {
        if pool.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..pool.len());
        pool.get(idx).copied()
    }
}

/// Replays a fixed sequence of draws.
///
/// Scripted numbers that are no longer in the pool are skipped. Once the
/// script is exhausted the smallest remaining number is drawn.
///
/// ```
/// use roskis::pool::{DrawSource, Scripted};
///
/// let mut src = Scripted::new([4, 9, 2]);
/// assert_eq!(src.pick(&[1, 2, 3, 4]), Some(4));
/// assert_eq!(src.pick(&[1, 2, 3]), Some(2));
/// assert_eq!(src.pick(&[1, 3]), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    queue: VecDeque<u16>,
}

impl Scripted {
    pub fn new<I>(numbers: I) -> Self
    where
        I: IntoIterator<Item = u16>,
    {
        Self { queue: numbers.into_iter().collect() }
    }

    /// Scripted numbers not yet consumed.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl DrawSource for Scripted {
    fn pick(&mut self, pool: &[u16]) -> Option<u16> {
        while let Some(n) = self.queue.pop_front() {
            if pool.binary_search(&n).is_ok() {
                return Some(n);
            }
        }
        pool.first().copied()
    }
}
