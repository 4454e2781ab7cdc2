//! JSON request and response bodies for the encode and decode operations.
//!
//! Field names match what the web front end sends and reads.

use serde::{Deserialize, Serialize};

use crate::codebook::Codebook;
use crate::error::{HuffmanError, Result};
use crate::huffman_codec::{decode_with_original, encode_phrase};
use crate::hufftree::TreeSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeRequest {
    pub phrase: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeResponse {
    pub encoded_message: String,
    pub codebook: Codebook,
    pub tree: TreeSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeRequest {
    pub binary: String,
    pub original: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeResponse {
    pub decrypted_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
}

impl EncodeRequest {
    pub fn handle(&self) -> Result<EncodeResponse> {
        let encoded = encode_phrase(&self.phrase)?;
        Ok(EncodeResponse {
            encoded_message: encoded.encoded_message.to_string(),
            tree: encoded.tree.snapshot(),
            codebook: encoded.codebook,
        })
    }
}

impl DecodeRequest {
    pub fn handle(&self) -> Result<DecodeResponse> {
        Ok(DecodeResponse {
            decrypted_message: decode_with_original(&self.binary, &self.original)?,
        })
    }
}

impl From<&HuffmanError> for ErrorResponse {
    fn from(err: &HuffmanError) -> Self {
        ErrorResponse {
            error: err.to_string(),
            kind: err.kind().to_string(),
            position: err.position(),
        }
    }
}
