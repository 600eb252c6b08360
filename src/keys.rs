//! Short opaque keys for text blocks and table cells.
//!
//! Keys are base-32 renderings of a random number below 2^24, so at most
//! five characters long. A generator remembers every key it handed out and
//! never repeats one, which makes keys unique within a single conversion.
//! Once half the random space is used, keys continue from a counter above
//! it and grow longer. Nothing is guaranteed across generators.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Upper bound (exclusive) of the random key space.
const KEY_SPACE: u32 = 1 << 24;

/// Random draws per key before falling back to the counter.
const MAX_DRAWS: usize = 16;

const DIGITS: &[u8; 32] = b"0123456789abcdefghijklmnopqrstuv";

/// Per-conversion key source.
#[derive(Debug)]
pub struct KeyGenerator {
    rng: StdRng,
    space: u32,
    drawn: HashSet<u32>,
    counted: u64,
}

impl KeyGenerator {
    /// Create a generator seeded from the operating system.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy(), KEY_SPACE)
    }

    /// Create a reproducible generator.
    ///
    /// Two generators with the same seed produce the same key sequence,
    /// which makes whole conversions comparable byte for byte.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed), KEY_SPACE)
    }

    fn from_rng(rng: StdRng, space: u32) -> Self {
        Self {
            rng,
            space,
            drawn: HashSet::new(),
            counted: 0,
        }
    }

    /// Produce a key not yet returned by this generator.
    pub fn next_key(&mut self) -> String {
        if self.drawn.len() < (self.space / 2) as usize {
            for _ in 0..MAX_DRAWS {
                let n = self.rng.gen_range(0..self.space);
                if self.drawn.insert(n) {
                    return to_base32(u64::from(n));
                }
            }
        }
        // counter keys start above the random range and cannot collide with it
        let n = u64::from(self.space) + self.counted;
        self.counted += 1;
        to_base32(n)
    }

    /// Number of keys handed out so far.
    pub fn issued(&self) -> usize {
        self.drawn.len() + self.counted as usize
    }
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn to_base32(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::with_capacity(13);
    while n > 0 {
        buf.push(DIGITS[(n % 32) as usize]);
        n /= 32;
    }
    buf.reverse();
    // DIGITS is ASCII
    String::from_utf8_lossy(&buf).into_owned()
}
