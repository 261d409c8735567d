//! Magnet link cipher
//!
//! Converts a BitTorrent magnet link into two reversible renderings and back:
//! a substitution cipher over Hundred Family Surnames, and a phrase built from
//! the twelve core values. The input kind is detected automatically.
//!
//! ```
//! use magnet_cipher::Converter;
//!
//! let mut converter = Converter::from_seed(1);
//! let magnet = "magnet:?xt=urn:btih:A1B2C3D4E5F60718293A4B5C6D7E8F9012345678";
//! let result = converter.convert(magnet);
//! assert_eq!(converter.convert(&result.cipher).magnet, magnet);
//! assert_eq!(converter.convert(&result.phrase).magnet, magnet);
//! ```

pub mod converter;
pub mod error;
pub mod hex_bridge;
pub mod magnet;
pub mod nibble;
pub mod phrase;
pub mod surname;

#[cfg(feature = "wasm-bindgen")]
pub mod wasm;


pub use converter::{convert, detect_type, Conversion, Converter, InputKind, TextRendering};
pub use error::{CodecError, ConversionStage, Result};
pub use magnet::InfoHash;
pub use phrase::Vocabulary;
