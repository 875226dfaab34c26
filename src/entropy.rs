// This file is part of Strongpass.
//
// Copyright (c) 2025  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Cryptographically secure byte sources and uniform index sampling.

use crate::error::{Error, Result};
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20;
use rand_core::{OsRng, RngCore};
use zeroize::Zeroizing;

pub const MAX_INDEX_BOUND: usize = 256;

const KEYSTREAM_BLOCK: usize = 1024;

/// A source of cryptographically secure random bytes.
pub trait EntropySource {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<S: EntropySource + ?Sized> EntropySource for &mut S {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill(dest)
    }
}

/// The operating system CSPRNG.
///
/// Every call goes straight to the OS; a failure is reported as
/// [`Error::EntropyUnavailable`] and never replaced by another generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng.try_fill_bytes(dest)?;
        Ok(())
    }
}

/// ChaCha20 keystream under a fixed 256-bit key.
///
/// Reproducible for a given key, which makes it the source of choice for
/// tests that need stable output.
pub struct KeystreamEntropy {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl KeystreamEntropy {
    pub fn new(key: &[u8; 32]) -> Self {
        let mut cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        let mut buffer = Zeroizing::new(vec![0u8; KEYSTREAM_BLOCK]);
        cipher.apply_keystream(&mut buffer);

        Self {
            cipher,
            buffer,
            pos: 0,
        }
    }
}

impl EntropySource for KeystreamEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        let mut written = 0;

        while written < dest.len() {
            if self.pos >= self.buffer.len() {
                self.buffer.fill(0);
                self.cipher.apply_keystream(&mut self.buffer);
                self.pos = 0;
            }

            let take = (dest.len() - written).min(self.buffer.len() - self.pos);
            dest[written..written + take].copy_from_slice(&self.buffer[self.pos..self.pos + take]);
            self.pos += take;
            written += take;
        }

        Ok(())
    }
}

/// Uniform integer in `[0, max)` for `1 <= max <= 256`.
///
/// Each attempt consumes one fresh byte. Bytes at or above the largest
/// multiple of `max` are rejected, so every index is exactly equally likely.
pub fn random_index<S: EntropySource + ?Sized>(source: &mut S, max: usize) -> Result<usize> {
    if !(1..=MAX_INDEX_BOUND).contains(&max) {
        return Err(Error::ConstraintViolation(format!(
            "Random index bound must be between 1 and {}, got {}",
            MAX_INDEX_BOUND, max
        )));
    }

    let rejection_threshold = MAX_INDEX_BOUND - (MAX_INDEX_BOUND % max);
    let mut byte = [0u8; 1];

    loop {
        source.fill(&mut byte)?;

        if (byte[0] as usize) < rejection_threshold {
            return Ok((byte[0] as usize) % max);
        }
    }
}
