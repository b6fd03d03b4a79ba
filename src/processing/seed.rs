//! Seed derivation from file metadata

use crate::input::descriptor::UploadedFile;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SEED_MODULUS: u64 = 1000;

/// Bounded integer in `[0, 1000)` that drives every selection in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seed(u32);

impl Seed {
    /// Wraps any value into the seed range
    pub fn new(value: u64) -> Self {
        Seed((value % SEED_MODULUS) as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn as_u64(self) -> u64 {
        self.0 as u64
    }

    /// `self % modulus`, the building block of every table lookup
    pub fn pick(self, modulus: u64) -> u64 {
        if modulus == 0 {
            0
        } else {
            self.as_u64() % modulus
        }
    }

    /// Seed shifted by `offset`, not wrapped back into range
    pub fn offset(self, offset: u64) -> u64 {
        self.as_u64() + offset
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `(name length + byte size + last modified) mod 1000`
pub fn derive_seed(file: &UploadedFile) -> Seed {
    let total = file.name_units() as u128 + file.byte_size as u128 + file.last_modified_millis as u128;
    Seed((total % SEED_MODULUS as u128) as u32)
}
