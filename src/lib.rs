//! # huffcipher
//!
//! Deterministic Huffman coding of text phrases.
//!
//! Encoding a phrase yields a '0'/'1' bitstring and the codebook used to
//! produce it. Decoding needs the bitstring and the original phrase: the
//! tree is never stored, it is rebuilt from the phrase and comes out
//! identical every time because ties between equal weights are broken by
//! insertion order.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffcipher::{decode_with_original, encode_phrase};
//!
//! let encoded = encode_phrase("go go gophers")?;
//! let bits = encoded.encoded_message.to_string();
//! assert_eq!(encoded.codebook.get('g'), Some("00"));
//!
//! let decoded = decode_with_original(&bits, "go go gophers")?;
//! assert_eq!(decoded, "go go gophers");
//! # Ok::<(), huffcipher::HuffmanError>(())
//! ```

pub mod codebook;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod messages;

// Internal modules - not part of public API
mod bit_vec;
mod min_heap;

// Re-export main types for convenience
pub use bit_vec::BitVec;
pub use codebook::Codebook;
pub use error::{BitstreamFault, HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{decode_with_original, encode_phrase, Encoded, HuffmanCodec};
pub use hufftree::{HuffNode, HuffmanTree, SnapshotNode, TreeSnapshot};
