//! Hex nibble expansion into the twelve digit slots addressable by the vocabulary.
//!
//! Nibbles 0-9 keep their own slot. Nibbles A-F are written as an escape prefix
//! followed by a payload slot:
//!
//! | prefix | payload      | nibble        |
//! |--------|--------------|---------------|
//! | 10     | `v - 10`     | 0..=5 -> A..F |
//! | 11     | `v - 6`      | 4..=9 -> A..F |
//!
//! The prefix is picked at random for every high nibble, so one hash has many
//! valid expansions. [`compress`] accepts all of them.

use crate::error::{CodecError, Result};
use rand::Rng;

/// One unit of the restricted digit space, 0 through 11
pub type DigitSlot = u8;

/// Number of distinct digit slots
pub const SLOT_COUNT: usize = 12;

/// Escape prefixes for nibbles A-F
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    /// Slot 10, payload is `nibble - 10`
    Low,
    /// Slot 11, payload is `nibble - 6`
    High,
}

impl Escape {
    const LOW_SLOT: DigitSlot = 10;
    const HIGH_SLOT: DigitSlot = 11;

    /// Digit slot that announces this escape
    pub fn slot(&self) -> DigitSlot {
        match self {
            Escape::Low => Self::LOW_SLOT,
            Escape::High => Self::HIGH_SLOT,
        }
    }

    /// Escape announced by a digit slot, if it is one
    pub fn from_slot(slot: DigitSlot) -> Option<Self> {
        match slot {
            Self::LOW_SLOT => Some(Escape::Low),
            Self::HIGH_SLOT => Some(Escape::High),
            _ => None,
        }
    }

    fn offset(&self) -> u8 {
        match self {
            Escape::Low => 10,
            Escape::High => 6,
        }
    }

    /// Pick one escape uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Escape::Low
        } else {
            Escape::High
        }
    }
}

/// Expand a single nibble value (0-15) with a fixed escape choice
pub fn expand_nibble(value: u8, escape: Escape, out: &mut Vec<DigitSlot>) {
    debug_assert!(value < 16);
    if value < 10 {
        out.push(value);
    } else {
        out.push(escape.slot());
        out.push(value - escape.offset());
    }
}

/// Expand hex digits into digit slots, choosing each escape prefix from `rng`
pub fn expand<R: Rng + ?Sized>(hex_digits: &str, rng: &mut R) -> Result<Vec<DigitSlot>> {
    let mut slots = Vec::with_capacity(hex_digits.len() * 2);
    for c in hex_digits.chars() {
        let value = c.to_digit(16).ok_or(CodecError::InvalidHexDigit(c))? as u8;
        let escape = Escape::random(rng);
        expand_nibble(value, escape, &mut slots);
    }
    Ok(slots)
}

/// Compress digit slots back to uppercase hex digits
pub fn compress(slots: &[DigitSlot]) -> Result<String> {
    let mut hex_digits = String::with_capacity(slots.len());
    let mut i = 0;
    while i < slots.len() {
        let slot = slots[i];
        let value = if slot < 10 {
            slot
        } else if let Some(escape) = Escape::from_slot(slot) {
            i += 1;
            let payload = *slots.get(i).ok_or(CodecError::DanglingEscape(slot))?;
            if payload >= 10 || payload + escape.offset() > 15 {
                return Err(CodecError::InvalidDigitSlot {
                    slot: payload,
                    position: i,
                });
            }
            payload + escape.offset()
        } else {
            return Err(CodecError::InvalidDigitSlot { slot, position: i });
        };
        // value is at most 15 here
        if let Some(digit) = std::char::from_digit(u32::from(value), 16) {
            hex_digits.push(digit.to_ascii_uppercase());
        }
        i += 1;
    }
    Ok(hex_digits)
}
