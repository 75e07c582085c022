//! Built-in backend: a per-call-keyed, counter-mode keystream transform.

use rand::Rng;
use rayon::prelude::*;

use crate::{
    engine::{Engine, EngineConfig, ParameterStrategy, Transform},
    error::Error,
};

/// Number of slots between progress lines when progress reporting is on.
const PROGRESS_STRIDE: usize = 256;

/// Constructs [`KeystreamTransform`]s with fresh key material per call.
pub struct KeystreamEngine;

impl Engine for KeystreamEngine {
    fn construct(
        &self,
        buffer_length: usize,
        config: &EngineConfig,
    ) -> Result<Box<dyn Transform>, Error> {
        if buffer_length == 0 && !config.unsafe_mode {
            return Err(Error::SealFailed(
                "zero-length buffers require unsafe_mode".to_string(),
            ));
        }

        let lanes = match config.parameter_strategy {
            ParameterStrategy::Single => 1,
            ParameterStrategy::Multi => 4,
        };
        let mut rng = rand::thread_rng();
        let key = (0..lanes).map(|_| rng.gen::<u64>()).collect();

        Ok(Box::new(KeystreamTransform {
            key,
            buffer_length,
            progress: config.progress_reporting,
        }))
    }
}

/// Masks each slot with a word derived from the key and the slot index. The
/// mask depends only on `(key, index)`, so sealing and opening are the same
/// slot-wise operation and can run in parallel.
pub struct KeystreamTransform {
    key: Vec<u64>,
    buffer_length: usize,
    progress: bool,
}

impl KeystreamTransform {
    fn mask(&self, i: usize) -> u32 {
        let lane = self.key[i % self.key.len()];
        splitmix64(lane ^ i as u64) as u32
    }

    fn apply(&self, words: &[u32]) -> Vec<u32> {
        words
            .par_iter()
            .enumerate()
            .map(|(i, &w)| {
                if self.progress && i % PROGRESS_STRIDE == 0 {
                    log::debug!("keystream: at slot {i} of {}", self.buffer_length);
                }
                w ^ self.mask(i)
            })
            .collect()
    }
}

impl Transform for KeystreamTransform {
    fn seal(&self, words: &[u32]) -> Result<Vec<u32>, Error> {
        if words.len() != self.buffer_length {
            return Err(Error::SealFailed(format!(
                "transform is bound to {} words, got {}",
                self.buffer_length,
                words.len()
            )));
        }
        Ok(self.apply(words))
    }

    fn open(&self, sealed: &[u32]) -> Result<Vec<u32>, Error> {
        if sealed.len() != self.buffer_length {
            return Err(Error::OpenFailed(format!(
                "transform is bound to {} words, got {}",
                self.buffer_length,
                sealed.len()
            )));
        }
        Ok(self.apply(sealed))
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e3779b97f4a7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
    x ^ (x >> 31)
}
