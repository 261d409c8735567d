use crate::error::{CodecError, ConversionStage, Result};
use crate::hex_bridge::try_hex_to_text;
use crate::magnet::{is_magnet, InfoHash, INFO_HASH_LEN};
use crate::nibble;
use crate::phrase::Vocabulary;
use crate::surname;
use lazy_static::lazy_static;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::str::FromStr;
use tracing::debug;

lazy_static! {
    // Two adjacent CJK unified ideographs
    static ref CJK_PAIR: Regex = Regex::new(r"[\x{4e00}-\x{9fa5}]{2}").unwrap();
}

/// Which of the three renderings an input is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Magnet,
    Cipher,
    Phrase,
    #[default]
    Unknown,
}

impl InputKind {
    pub fn name(&self) -> &'static str {
        match self {
            InputKind::Magnet => "magnet",
            InputKind::Cipher => "cipher",
            InputKind::Phrase => "phrase",
            InputKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The three renderings of one info hash
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub kind: InputKind,
    pub magnet: String,
    pub cipher: String,
    pub phrase: String,
}

impl Conversion {
    /// Result with every field empty
    pub fn empty(kind: InputKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.magnet.is_empty() && self.cipher.is_empty() && self.phrase.is_empty()
    }
}

/// Cipher and phrase renderings of free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRendering {
    pub cipher: String,
    pub phrase: String,
}

/// Detect the kind of `raw` against a vocabulary
fn detect_with(vocabulary: &Vocabulary, raw: &str) -> InputKind {
    let text = raw.trim();
    if text.is_empty() {
        return InputKind::Unknown;
    }
    if is_magnet(text) {
        return InputKind::Magnet;
    }
    if CJK_PAIR.is_match(text) {
        if vocabulary.occurs_in(text) {
            return InputKind::Phrase;
        }
        return InputKind::Cipher;
    }
    InputKind::Unknown
}

/// Converter between magnet links, surname ciphers and core values phrases
pub struct Converter<R = ChaCha20Rng> {
    rng: R,
    vocabulary: Vocabulary,
}

impl Converter<ChaCha20Rng> {
    /// Create a converter seeded from system entropy
    pub fn new() -> Self {
        Self::with_rng(ChaCha20Rng::from_entropy())
    }

    /// Create a converter whose escape choices are reproducible
    pub fn from_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl Default for Converter<ChaCha20Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Converter<R> {
    /// Create a converter drawing escape choices from `rng`
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            vocabulary: Vocabulary::default(),
        }
    }

    /// Replace the phrase vocabulary
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Detect which rendering `raw` is
    pub fn detect_type(&self, raw: &str) -> InputKind {
        detect_with(&self.vocabulary, raw)
    }

    /// Convert `raw` to all three renderings, or an empty result if it cannot be converted
    pub fn convert(&mut self, raw: &str) -> Conversion {
        match self.try_convert(raw) {
            Ok(conversion) => conversion,
            Err(e) => {
                debug!(error = %e, "conversion degraded to empty result");
                Conversion::empty(self.detect_type(raw))
            }
        }
    }

    /// Convert `raw` to all three renderings, reporting why conversion failed
    pub fn try_convert(&mut self, raw: &str) -> Result<Conversion> {
        let text = raw.trim();
        let kind = self.detect_type(text);
        debug!(%kind, "detected input kind");

        let conversion = match kind {
            InputKind::Magnet => {
                let hash = InfoHash::from_magnet(text)
                    .map_err(|e| e.at(ConversionStage::MagnetExtraction))?;
                Conversion {
                    kind,
                    magnet: text.to_string(),
                    cipher: self.cipher_of(&hash),
                    phrase: self.phrase_of(&hash)?,
                }
            }
            InputKind::Cipher => {
                let hash = self.hash_from_cipher(text)?;
                Conversion {
                    kind,
                    magnet: hash.to_magnet(),
                    cipher: text.to_string(),
                    phrase: self.phrase_of(&hash)?,
                }
            }
            InputKind::Phrase => {
                let hash = self.hash_from_phrase(text)?;
                Conversion {
                    kind,
                    magnet: hash.to_magnet(),
                    cipher: self.cipher_of(&hash),
                    phrase: text.to_string(),
                }
            }
            InputKind::Unknown => {
                return Err(CodecError::UnrecognizedInput(text.to_string())
                    .at(ConversionStage::FormatDetection))
            }
        };

        Ok(conversion)
    }

    /// Build all three renderings from a known hash
    pub fn encode_hash(&mut self, hash: &InfoHash) -> Result<Conversion> {
        Ok(Conversion {
            kind: InputKind::Magnet,
            magnet: hash.to_magnet(),
            cipher: self.cipher_of(hash),
            phrase: self.phrase_of(hash)?,
        })
    }

    /// Surname rendering of a hash
    pub fn cipher_of(&self, hash: &InfoHash) -> String {
        surname::encode_text(hash.as_str())
    }

    /// Phrase rendering of a hash, one or two tokens per nibble
    pub fn phrase_of(&mut self, hash: &InfoHash) -> Result<String> {
        nibble::expand(hash.as_str(), &mut self.rng)
            .and_then(|slots| self.vocabulary.digits_to_phrase(&slots))
            .map_err(|e| e.at(ConversionStage::PhraseEncoding))
    }

    /// Recover the hash from its surname rendering
    pub fn hash_from_cipher(&self, cipher: &str) -> Result<InfoHash> {
        let plain = surname::decode_text(cipher);
        InfoHash::from_str(&plain).map_err(|e| e.at(ConversionStage::SurnameDecoding))
    }

    /// Recover the hash from its phrase rendering
    pub fn hash_from_phrase(&self, phrase: &str) -> Result<InfoHash> {
        let slots = self.vocabulary.phrase_to_digits(phrase);
        if slots.is_empty() {
            return Err(CodecError::EmptyPhrase.at(ConversionStage::PhraseTokenizing));
        }
        let hex_digits =
            nibble::compress(&slots).map_err(|e| e.at(ConversionStage::DigitCompression))?;
        if hex_digits.len() == INFO_HASH_LEN {
            return InfoHash::from_str(&hex_digits)
                .map_err(|e| e.at(ConversionStage::HashValidation));
        }
        // Phrases that carry the hash text as bytes
        let text =
            try_hex_to_text(&hex_digits).map_err(|e| e.at(ConversionStage::HexDecoding))?;
        InfoHash::from_str(&text).map_err(|e| e.at(ConversionStage::HashValidation))
    }

    /// Render free text in both cipher forms
    pub fn encode_text(&mut self, text: &str) -> Result<TextRendering> {
        Ok(TextRendering {
            cipher: surname::encode_text(text),
            phrase: self
                .vocabulary
                .encode_text(text, &mut self.rng)
                .map_err(|e| e.at(ConversionStage::PhraseEncoding))?,
        })
    }

    /// Recover free text from either cipher form
    pub fn decode_text(&self, raw: &str) -> Result<String> {
        let text = raw.trim();
        match self.detect_type(text) {
            InputKind::Cipher => Ok(surname::decode_text(text)),
            InputKind::Phrase => self
                .vocabulary
                .decode_text(text)
                .map_err(|e| e.at(ConversionStage::HexDecoding)),
            _ => Err(CodecError::UnrecognizedInput(text.to_string())
                .at(ConversionStage::FormatDetection)),
        }
    }
}

thread_local! {
    static CONVERTER: RefCell<Converter> = RefCell::new(Converter::new());
}

/// Detect which rendering `raw` is, using the core values vocabulary
pub fn detect_type(raw: &str) -> InputKind {
    detect_with(Vocabulary::core_values(), raw)
}

/// Convert `raw` with a per-thread default converter
pub fn convert(raw: &str) -> Conversion {
    CONVERTER.with(|c| c.borrow_mut().convert(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "A1B2C3D4E5F60718293A4B5C6D7E8F9012345678";

    fn magnet_of(hash: &str) -> String {
        format!("magnet:?xt=urn:btih:{}", hash)
    }

    #[test]
    fn test_detect_type() {
        assert_eq!(detect_type(&magnet_of(HASH)), InputKind::Magnet);
        assert_eq!(detect_type("赵钱孙李"), InputKind::Cipher);
        assert_eq!(detect_type("富强民主"), InputKind::Phrase);
        assert_eq!(detect_type(""), InputKind::Unknown);
        assert_eq!(detect_type("   "), InputKind::Unknown);
        assert_eq!(detect_type("not a recognized form!!"), InputKind::Unknown);
        // A single ideograph is not enough
        assert_eq!(detect_type("赵"), InputKind::Unknown);
    }

    #[test]
    fn test_magnet_conversion() {
        let mut converter = Converter::from_seed(11);
        let result = converter.convert(&magnet_of(HASH));
        assert_eq!(result.kind, InputKind::Magnet);
        assert_eq!(result.magnet, magnet_of(HASH));
        assert_eq!(result.cipher.chars().count(), 40);
        assert!(result.cipher.starts_with("福钱水孙"));
        assert_eq!(
            converter.hash_from_phrase(&result.phrase).unwrap().as_str(),
            HASH
        );
    }

    #[test]
    fn test_lowercase_magnet_is_canonicalized() {
        let mut converter = Converter::from_seed(5);
        let input = format!("{}&dn=example", magnet_of(&HASH.to_lowercase()));
        let result = converter.convert(&input);
        assert_eq!(result.magnet, input);
        assert_eq!(surname::decode_text(&result.cipher), HASH);

        let back = converter.convert(&result.cipher);
        assert_eq!(back.magnet, magnet_of(HASH));
    }

    #[test]
    fn test_cipher_conversion() {
        let mut converter = Converter::from_seed(2);
        let cipher = surname::encode_text(HASH);
        let result = converter.convert(&cipher);
        assert_eq!(result.kind, InputKind::Cipher);
        assert_eq!(result.magnet, magnet_of(HASH));
        assert_eq!(result.cipher, cipher);
        assert_eq!(converter.convert(&result.phrase).magnet, magnet_of(HASH));
    }

    #[test]
    fn test_phrase_conversion() {
        let mut converter = Converter::from_seed(9);
        let phrase = converter.convert(&magnet_of(HASH)).phrase;
        let result = converter.convert(&phrase);
        assert_eq!(result.kind, InputKind::Phrase);
        assert_eq!(result.magnet, magnet_of(HASH));
        assert_eq!(result.cipher, surname::encode_text(HASH));
        assert_eq!(result.phrase, phrase);
    }

    #[test]
    fn test_phrase_of_byte_encoded_hash() {
        let mut converter = Converter::from_seed(21);
        let phrase = crate::phrase::encode_text(HASH, &mut ChaCha20Rng::seed_from_u64(1)).unwrap();
        assert_eq!(converter.convert(&phrase).magnet, magnet_of(HASH));
    }

    #[test]
    fn test_detection_of_outputs() {
        let mut converter = Converter::from_seed(4);
        let result = converter.convert(&magnet_of(HASH));
        assert_eq!(converter.detect_type(&result.magnet), InputKind::Magnet);
        assert_eq!(converter.detect_type(&result.cipher), InputKind::Cipher);
        assert_eq!(converter.detect_type(&result.phrase), InputKind::Phrase);
    }

    #[test]
    fn test_garbage_yields_empty_fields() {
        let mut converter = Converter::from_seed(0);
        assert!(converter.convert("").is_empty());
        assert!(converter.convert("not a recognized form!!").is_empty());
        // Looks like a magnet but carries no hash
        assert!(converter.convert("magnet:?dn=nothing").is_empty());
        // Surnames that do not spell a hash
        assert!(converter.convert("赵钱孙李").is_empty());
        // Tokens that do not spell a hash
        assert!(converter.convert("富强民主文明").is_empty());
    }

    #[test]
    fn test_try_convert_reports_stage() {
        let mut converter = Converter::from_seed(0);
        let err = converter.try_convert("hello").unwrap_err();
        assert_eq!(err.stage(), Some(ConversionStage::FormatDetection));

        let err = converter.try_convert("magnet:?xt=urn:btih:123").unwrap_err();
        assert_eq!(err.stage(), Some(ConversionStage::MagnetExtraction));
        assert!(matches!(err.root(), CodecError::MissingHash));

        let err = converter.try_convert("赵钱孙李").unwrap_err();
        assert_eq!(err.stage(), Some(ConversionStage::SurnameDecoding));

        let err = converter.try_convert("富强友善").unwrap_err();
        assert_eq!(err.stage(), Some(ConversionStage::DigitCompression));

        // Three nibbles cannot form whole bytes
        let err = converter.try_convert("富强民主文明").unwrap_err();
        assert_eq!(err.stage(), Some(ConversionStage::HexDecoding));
        assert!(matches!(
            err.root(),
            CodecError::HexError(hex::FromHexError::OddLength)
        ));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let mut converter = Converter::from_seed(8);
        let result = converter.convert(&format!("  {}\n", magnet_of(HASH)));
        assert_eq!(result.magnet, magnet_of(HASH));
    }

    #[test]
    fn test_text_roundtrip() {
        let mut converter = Converter::from_seed(6);
        let rendering = converter.encode_text("hello world").unwrap();
        assert_eq!(rendering.cipher, "秦韩吕吕孔 戚孔华吕沈");
        assert_eq!(converter.decode_text(&rendering.cipher).unwrap(), "hello world");
        assert_eq!(converter.decode_text(&rendering.phrase).unwrap(), "hello world");
        assert!(converter.decode_text("plain ascii").is_err());
    }

    #[test]
    fn test_free_functions() {
        let result = convert(&magnet_of(HASH));
        assert_eq!(result.kind, InputKind::Magnet);
        assert_eq!(convert(&result.phrase).magnet, magnet_of(HASH));
    }

    #[test]
    fn test_conversion_serializes_kind_lowercase() {
        let json = serde_json::to_string(&Conversion::empty(InputKind::Cipher)).unwrap();
        assert_eq!(json, r#"{"kind":"cipher","magnet":"","cipher":"","phrase":""}"#);
    }
}
