use thiserror::Error;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Conversion stage where a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage {
    FormatDetection,
    MagnetExtraction,
    SurnameDecoding,
    PhraseTokenizing,
    DigitCompression,
    HexDecoding,
    HashValidation,
    PhraseEncoding,
}

impl std::fmt::Display for ConversionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionStage::FormatDetection => write!(f, "format detection"),
            ConversionStage::MagnetExtraction => write!(f, "magnet extraction"),
            ConversionStage::SurnameDecoding => write!(f, "surname decoding"),
            ConversionStage::PhraseTokenizing => write!(f, "phrase tokenizing"),
            ConversionStage::DigitCompression => write!(f, "digit compression"),
            ConversionStage::HexDecoding => write!(f, "hex decoding"),
            ConversionStage::HashValidation => write!(f, "hash validation"),
            ConversionStage::PhraseEncoding => write!(f, "phrase encoding"),
        }
    }
}

/// Error types for the magnet codec
#[derive(Error, Debug)]
pub enum CodecError {
    /// Input is empty or matches none of the supported forms
    #[error("Unrecognized input: {0}")]
    UnrecognizedInput(String),

    /// Magnet link carries no 40 character btih hash
    #[error("No info hash found in magnet link")]
    MissingHash,

    /// Recovered payload is not a 40 character hex hash
    #[error("Invalid info hash: {0}")]
    InvalidHash(String),

    /// Character outside the hex alphabet fed to the expander
    #[error("Invalid hex digit: {0:?}")]
    InvalidHexDigit(char),

    /// Escape prefix at the end of a digit sequence
    #[error("Escape prefix {0} has no payload")]
    DanglingEscape(u8),

    /// Digit slot or reconstructed nibble out of range
    #[error("Invalid digit slot {slot} at position {position}")]
    InvalidDigitSlot { slot: u8, position: usize },

    /// Phrase contained no vocabulary token at all
    #[error("Phrase contains no vocabulary tokens")]
    EmptyPhrase,

    /// Hex payload did not decode to UTF-8 text
    #[error("Payload is not valid text")]
    InvalidText,

    /// Vocabulary failed validation
    #[error("Invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// Hex decoding error
    #[error("Hex decode error: {0}")]
    HexError(#[from] hex::FromHexError),

    /// Failure annotated with the stage of the conversion chain it came from
    #[error("Conversion failed at {stage}: {source}")]
    Stage {
        stage: ConversionStage,
        #[source]
        source: Box<CodecError>,
    },
}

impl CodecError {
    /// Attach the conversion stage to an error
    pub fn at(self, stage: ConversionStage) -> Self {
        match self {
            already @ CodecError::Stage { .. } => already,
            other => CodecError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage the error was raised in, if known
    pub fn stage(&self) -> Option<ConversionStage> {
        match self {
            CodecError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// Innermost error, stripped of stage annotations
    pub fn root(&self) -> &CodecError {
        match self {
            CodecError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}
