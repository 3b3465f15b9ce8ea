//! Attack pipeline: composable byte-level message transforms.
//!
//! Each stage simulates one channel or adversary effect on the transmitted
//! bytes. Stages mutate or substitute message bytes but never reorder or
//! drop messages, so the measurement sequence stays aligned with the input
//! sequence.
//!
//! Every randomized stage owns a seedable RNG; a chain built with fixed
//! seeds replays the same perturbations over the same input sequence.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// One byte-level transform in the attack pipeline.
///
/// Stages may hold private mutable state (RNG position, replay history)
/// scoped to one benchmark run. Never share a stage across runs.
pub trait AttackStage {
    /// Transform one message, consuming it.
    fn transform(&mut self, message: Vec<u8>) -> Vec<u8>;
}

/// Pass-through stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl AttackStage for Identity {
    fn transform(&mut self, message: Vec<u8>) -> Vec<u8> {
        message
    }
}

/// Probabilistic single-bit corruption.
///
/// Each byte is independently corrupted with probability `flip_rate` by
/// XORing one uniformly chosen bit. At `flip_rate = 1.0` every byte ends up
/// at Hamming distance exactly 1 from the input; at `0.0` the stage is a
/// no-op.
pub struct BitFlip {
    flip_rate: f64,
    rng: SmallRng,
}

impl BitFlip {
    /// Create a stage with an OS-seeded RNG.
    #[must_use]
    pub fn new(flip_rate: f64) -> Self {
        Self {
            // gen_bool panics outside [0, 1]
            flip_rate: flip_rate.clamp(0.0, 1.0),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a stage with a fixed seed for reproducible runs.
    #[must_use]
    pub fn with_seed(flip_rate: f64, seed: u64) -> Self {
        Self {
            flip_rate: flip_rate.clamp(0.0, 1.0),
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl AttackStage for BitFlip {
    fn transform(&mut self, mut message: Vec<u8>) -> Vec<u8> {
        for byte in &mut message {
            if self.rng.gen_bool(self.flip_rate) {
                *byte ^= 1 << self.rng.gen_range(0..8);
            }
        }
        message
    }
}

/// Probabilistic substitution with a previously seen message.
///
/// Keeps an append-only history of every message that passed through, in
/// arrival order. Each call first appends the incoming message, then with
/// probability `probability` emits a uniform draw from the entire history
/// (the current message included); otherwise the current message passes
/// unmodified.
///
/// History grows for the whole run, so memory is proportional to the
/// iteration count times the message size.
pub struct Replay {
    probability: f64,
    history: Vec<Vec<u8>>,
    rng: SmallRng,
}

impl Replay {
    /// Create a stage with an OS-seeded RNG.
    #[must_use]
    pub fn new(probability: f64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            history: Vec::new(),
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create a stage with a fixed seed for reproducible runs.
    #[must_use]
    pub fn with_seed(probability: f64, seed: u64) -> Self {
        Self {
            probability: probability.clamp(0.0, 1.0),
            history: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Number of messages seen so far.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

impl AttackStage for Replay {
    fn transform(&mut self, message: Vec<u8>) -> Vec<u8> {
        self.history.push(message.clone());
        if self.rng.gen_bool(self.probability) {
            // History is non-empty: the current message was just pushed.
            if let Some(stale) = self.history.choose(&mut self.rng) {
                return stale.clone();
            }
        }
        message
    }
}

/// Ordered composition of attack stages, applied left to right.
///
/// The empty chain behaves as [`Identity`].
#[derive(Default)]
pub struct AttackChain {
    stages: Vec<Box<dyn AttackStage>>,
}

impl AttackChain {
    /// Create an empty (pass-through) chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain from an ordered stage list.
    #[must_use]
    pub fn from_stages(stages: Vec<Box<dyn AttackStage>>) -> Self {
        Self { stages }
    }

    /// Append a stage to the end of the chain.
    pub fn push(&mut self, stage: Box<dyn AttackStage>) {
        self.stages.push(stage);
    }

    /// Number of stages in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain is a pass-through.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl AttackStage for AttackChain {
    fn transform(&mut self, message: Vec<u8>) -> Vec<u8> {
        self.stages
            .iter_mut()
            .fold(message, |m, stage| stage.transform(m))
    }
}
