//! Stochastic input delivery for test variations
//!
//! Uses seeded RNG for reproducibility. Print seed on failure for replay.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, Read};

/// Seeded generator for reproducible stochastic tests
pub struct Gen {
    pub rng: StdRng,
    pub seed: u64,
}

impl Gen {
    /// Create with specific seed (for reproduction)
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create from environment or random seed
    pub fn from_env_or_random() -> Self {
        let seed = std::env::var("STREAM_TEST_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(rand::random);
        Self::new(seed)
    }

    /// Geometric distribution: count until rand > alpha
    /// Returns 0, 1, 2, ... with decreasing probability
    pub fn geometric(&mut self, alpha: f64) -> usize {
        let mut n = 0;
        while self.rng.gen::<f64>() < alpha {
            n += 1;
        }
        n
    }

    /// Poisson-like count (simplified)
    pub fn poisson(&mut self, lambda: f64) -> usize {
        let l = (-lambda).exp();
        let mut k = 0;
        let mut p = 1.0;
        loop {
            k += 1;
            p *= self.rng.gen::<f64>();
            if p <= l {
                break;
            }
        }
        k - 1
    }

    /// Random boolean with probability p
    pub fn chance(&mut self, p: f64) -> bool {
        self.rng.gen::<f64>() < p
    }

    /// Reader over `data` that hands it out in random-sized pieces
    pub fn chunked(&mut self, data: &[u8]) -> ChunkedReader {
        let mut sizes = Vec::new();
        let mut left = data.len();
        while left > 0 {
            let n = (1 + self.geometric(0.8)).min(left);
            sizes.push(n);
            left -= n;
        }
        let interrupts = self.chance(0.3);
        ChunkedReader {
            data: data.to_vec(),
            pos: 0,
            sizes,
            interrupts,
            pending: interrupts,
        }
    }
}

/// Reader that returns at most one planned chunk per `read` call, and
/// optionally an `Interrupted` error before every chunk.
#[derive(Debug)]
pub struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    sizes: Vec<usize>,
    interrupts: bool,
    pending: bool,
}

impl ChunkedReader {
    /// Chunk sizes still to be delivered (for failure reports)
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sizes.is_empty() || buf.is_empty() {
            return Ok(0);
        }
        if self.pending {
            self.pending = false;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        self.pending = self.interrupts;
        let planned = self.sizes[0];
        let n = planned.min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        if n == planned {
            self.sizes.remove(0);
        } else {
            self.sizes[0] -= n;
        }
        Ok(n)
    }
}
