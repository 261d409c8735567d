//! Phrase rendering of digit slots over a fixed twelve token vocabulary.

use crate::error::{CodecError, Result};
use crate::hex_bridge::{text_to_hex, try_hex_to_text};
use crate::nibble::{self, DigitSlot, SLOT_COUNT};
use once_cell::sync::Lazy;
use rand::Rng;

/// The twelve core values, index = digit slot
pub const CORE_VALUES: [&str; SLOT_COUNT] = [
    "富强", "民主", "文明", "和谐", "自由", "平等", "公正", "法治", "爱国", "敬业", "诚信", "友善",
];

static DEFAULT_VOCABULARY: Lazy<Vocabulary> =
    Lazy::new(|| Vocabulary::new(&CORE_VALUES).expect("core values vocabulary is prefix free"));

/// Ordered set of tokens used as both digit alphabet and codebook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    tokens: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary, checking it can be tokenized greedily.
    ///
    /// Requires exactly [`SLOT_COUNT`] non-empty, distinct tokens where no token
    /// is a prefix of another.
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        if tokens.len() != SLOT_COUNT {
            return Err(CodecError::InvalidVocabulary(format!(
                "expected {} tokens, got {}",
                SLOT_COUNT,
                tokens.len()
            )));
        }
        let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        for (i, token) in tokens.iter().enumerate() {
            if token.is_empty() {
                return Err(CodecError::InvalidVocabulary(format!("token {} is empty", i)));
            }
            for (j, other) in tokens.iter().enumerate() {
                if i != j && other.starts_with(token.as_str()) {
                    return Err(CodecError::InvalidVocabulary(format!(
                        "token {:?} is a prefix of {:?}",
                        token, other
                    )));
                }
            }
        }
        Ok(Self { tokens })
    }

    /// The built-in core values vocabulary
    pub fn core_values() -> &'static Vocabulary {
        &DEFAULT_VOCABULARY
    }

    /// Token for a digit slot
    pub fn token(&self, slot: DigitSlot) -> Option<&str> {
        self.tokens.get(slot as usize).map(String::as_str)
    }

    /// Digit slot of an exact token
    pub fn index_of(&self, candidate: &str) -> Option<DigitSlot> {
        self.tokens
            .iter()
            .position(|t| t == candidate)
            .map(|i| i as DigitSlot)
    }

    /// Whether some token starts with `prefix`
    pub fn is_prefix(&self, prefix: &str) -> bool {
        self.tokens.iter().any(|t| t.starts_with(prefix))
    }

    /// Whether `text` contains any token verbatim
    pub fn occurs_in(&self, text: &str) -> bool {
        self.tokens.iter().any(|t| text.contains(t.as_str()))
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Render digit slots as a phrase, tokens joined without separator
    pub fn digits_to_phrase(&self, slots: &[DigitSlot]) -> Result<String> {
        let mut phrase = String::with_capacity(slots.len() * 6);
        for (position, &slot) in slots.iter().enumerate() {
            let token = self
                .token(slot)
                .ok_or(CodecError::InvalidDigitSlot { slot, position })?;
            phrase.push_str(token);
        }
        Ok(phrase)
    }

    /// Split a phrase back into digit slots.
    ///
    /// Greedy tokenizer with one character of lookahead. Characters that cannot
    /// start or continue a token are dropped, so this never fails.
    pub fn phrase_to_digits(&self, phrase: &str) -> Vec<DigitSlot> {
        let mut slots = Vec::new();
        let mut current = String::new();

        for c in phrase.chars() {
            current.push(c);
            if let Some(slot) = self.index_of(&current) {
                slots.push(slot);
                current.clear();
            } else if current.chars().count() >= 2 && !self.is_prefix(&current) {
                tracing::trace!(dropped = %current, "resynchronizing phrase tokenizer");
                current.clear();
                current.push(c);
            }
        }

        slots
    }

    /// Encode arbitrary text as a phrase
    pub fn encode_text<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Result<String> {
        let slots = nibble::expand(&text_to_hex(text), rng)?;
        self.digits_to_phrase(&slots)
    }

    /// Decode a phrase back to text
    pub fn decode_text(&self, phrase: &str) -> Result<String> {
        let slots = self.phrase_to_digits(phrase);
        if slots.is_empty() {
            return Err(CodecError::EmptyPhrase);
        }
        let hex_digits = nibble::compress(&slots)?;
        try_hex_to_text(&hex_digits)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::core_values().clone()
    }
}

/// Render digit slots with the core values vocabulary
pub fn digits_to_phrase(slots: &[DigitSlot]) -> Result<String> {
    Vocabulary::core_values().digits_to_phrase(slots)
}

/// Tokenize a phrase with the core values vocabulary
pub fn phrase_to_digits(phrase: &str) -> Vec<DigitSlot> {
    Vocabulary::core_values().phrase_to_digits(phrase)
}

/// Encode text as a core values phrase
pub fn encode_text<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Result<String> {
    Vocabulary::core_values().encode_text(text, rng)
}

/// Decode a core values phrase to text, empty on any failure
pub fn decode_text(phrase: &str) -> String {
    Vocabulary::core_values()
        .decode_text(phrase)
        .unwrap_or_default()
}
