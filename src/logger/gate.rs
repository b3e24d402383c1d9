//! The configured minimum level and its seven guard flags, packed into one atomic word.
//!
//! Layout: bits 8..16 hold the level, bits 0..7 hold one flag per level
//! (bit `n` set means level `n` is enabled). `set` replaces the whole word in a
//! single store, so a reader sees either the old guard set or the new one.

use crate::level::Level;
use std::sync::atomic::{AtomicU16, Ordering};

#[derive(Debug)]
pub struct Gate(AtomicU16);

impl Gate {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self(AtomicU16::new(Self::pack(level)))
    }

    const fn pack(level: Level) -> u16 {
        let min = level as u16;
        let mut mask = 0u16;
        let mut n = min;
        while n <= Level::Panic as u16 {
            mask |= 1 << n;
            n += 1;
        }
        (min << 8) | mask
    }

    pub fn set(&self, level: Level) {
        self.0.store(Self::pack(level), Ordering::Release);
    }

    #[must_use]
    pub fn level(&self) -> Level {
        let min = self.0.load(Ordering::Acquire) >> 8;
        u8::try_from(min)
            .ok()
            .and_then(Level::from_u8)
            .unwrap_or(Level::Panic)
    }

    /// Whether a record at `level` passes.
    #[must_use]
    pub fn allows(&self, level: Level) -> bool {
        self.0.load(Ordering::Acquire) & (1 << level as u16) != 0
    }
}
