use tracing::debug;

use crate::bit_vec::BitVec;
use crate::codebook::Codebook;
use crate::error::{BitstreamFault, HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// A tree together with the codebook derived from it.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    codebook: Codebook,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let codebook = Codebook::from_tree(&tree);
        HuffmanCodec { tree, codebook }
    }

    pub fn from_phrase(phrase: &str) -> Result<Self> {
        Ok(Self::new(HuffmanTree::from_phrase(phrase)?))
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    pub fn into_parts(self) -> (HuffmanTree, Codebook) {
        (self.tree, self.codebook)
    }

    pub fn encode(&self, phrase: &str) -> Result<BitVec> {
        let mut bit_vec = BitVec::new();
        for (position, symbol) in phrase.chars().enumerate() {
            let code = self
                .codebook
                .get(symbol)
                .ok_or_else(|| HuffmanError::unknown_symbol(symbol, position))?;
            bit_vec.push_code(code);
        }
        debug!(
            symbols = phrase.chars().count(),
            bits = bit_vec.len(),
            "encoded message"
        );
        Ok(bit_vec)
    }

    /// Walks the tree one bit at a time, emitting a symbol at each leaf and
    /// restarting from the root. The bits must end exactly on a leaf.
    pub fn decode(&self, bits: &BitVec) -> Result<String> {
        let root = self.tree.root();
        let mut current = root;
        let mut result = String::new();

        for (position, bit) in bits.iter().enumerate() {
            let next: &HuffNode = match current {
                HuffNode::Internal { left, right, .. } => {
                    if bit {
                        &**right
                    } else {
                        &**left
                    }
                }
                // the root of a built tree is always internal
                _ => return Err(HuffmanError::malformed(position, BitstreamFault::NoSuchPath)),
            };

            match next {
                HuffNode::Leaf { symbol, .. } => {
                    result.push(*symbol);
                    current = root;
                }
                HuffNode::Internal { .. } => current = next,
                HuffNode::Vacant => {
                    return Err(HuffmanError::malformed(position, BitstreamFault::NoSuchPath))
                }
            }
        }

        if !std::ptr::eq(current, root) {
            return Err(HuffmanError::malformed(bits.len(), BitstreamFault::Truncated));
        }

        debug!(bits = bits.len(), symbols = result.chars().count(), "decoded message");
        Ok(result)
    }

    pub fn decode_str(&self, bits: &str) -> Result<String> {
        self.decode(&bits.parse()?)
    }
}

/// Output of [`encode_phrase`].
#[derive(Debug, Clone)]
pub struct Encoded {
    pub encoded_message: BitVec,
    pub codebook: Codebook,
    pub tree: HuffmanTree,
}

/// Builds a codec from `phrase` and encodes the phrase with it.
pub fn encode_phrase(phrase: &str) -> Result<Encoded> {
    let codec = HuffmanCodec::from_phrase(phrase)?;
    let encoded_message = codec.encode(phrase)?;
    let (tree, codebook) = codec.into_parts();
    Ok(Encoded {
        encoded_message,
        codebook,
        tree,
    })
}

/// Decodes `binary` with the tree rebuilt from `original`.
///
/// `original` must be the phrase that was encoded; nothing else identifies
/// the tree.
pub fn decode_with_original(binary: &str, original: &str) -> Result<String> {
    let bits: BitVec = binary.parse()?;
    HuffmanCodec::from_phrase(original)?.decode(&bits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use proptest::prelude::*;

    const GOPHERS_BITS: &str = "0001101000110100011100110111101111100";

    #[test]
    fn test_go_go_gophers() {
        let encoded = encode_phrase("go go gophers").unwrap();
        assert_eq!(encoded.encoded_message.to_string(), GOPHERS_BITS);
        assert_eq!(encoded.codebook.get('g'), Some("00"));
        assert_eq!(encoded.codebook.get('o'), Some("01"));
        assert_eq!(encoded.codebook.get(' '), Some("101"));

        let again = encode_phrase("go go gophers").unwrap();
        assert_eq!(again.encoded_message, encoded.encoded_message);
        assert_eq!(again.codebook, encoded.codebook);

        assert_eq!(
            decode_with_original(GOPHERS_BITS, "go go gophers").unwrap(),
            "go go gophers"
        );
    }

    #[test]
    fn test_single_symbol_phrase() {
        let encoded = encode_phrase("aaaa").unwrap();
        assert_eq!(encoded.codebook.len(), 1);
        assert_eq!(encoded.codebook.get('a'), Some("0"));
        assert_eq!(encoded.encoded_message.to_string(), "0000");
        assert_eq!(decode_with_original("0000", "aaaa").unwrap(), "aaaa");
        assert_eq!(decode_with_original("00", "aaaa").unwrap(), "aa");
    }

    #[test]
    fn test_single_symbol_rejects_one_bits() {
        assert_eq!(
            decode_with_original("01", "aaaa"),
            Err(HuffmanError::malformed(1, BitstreamFault::NoSuchPath))
        );
    }

    #[test]
    fn test_truncated_code() {
        // a=10, b=11, c=0: "101" is 'a' followed by half of 'b'
        assert_eq!(
            decode_with_original("101", "abc"),
            Err(HuffmanError::malformed(3, BitstreamFault::Truncated))
        );
    }

    #[test]
    fn test_non_binary_digit() {
        assert_eq!(
            decode_with_original("1a1", "ab"),
            Err(HuffmanError::malformed(1, BitstreamFault::InvalidDigit('a')))
        );
    }

    #[test]
    fn test_two_symbol_codes() {
        let codec = HuffmanCodec::from_phrase("ab").unwrap();
        assert_eq!(codec.codebook().get('a'), Some("0"));
        assert_eq!(codec.codebook().get('b'), Some("1"));
        assert_eq!(codec.decode_str("101").unwrap(), "bab");
    }

    #[test]
    fn test_empty_bitstring_decodes_to_empty_phrase() {
        assert_eq!(decode_with_original("", "abc").unwrap(), "");
    }

    #[test]
    fn test_empty_phrase() {
        assert_eq!(encode_phrase("").unwrap_err(), HuffmanError::EmptyInput);
        assert_eq!(
            decode_with_original("0", "").unwrap_err(),
            HuffmanError::EmptyInput
        );
    }

    #[test]
    fn test_unknown_symbol() {
        let codec = HuffmanCodec::from_phrase("hello").unwrap();
        assert_eq!(
            codec.encode("help"),
            Err(HuffmanError::unknown_symbol('p', 3))
        );
    }

    #[test]
    fn test_codec_reused_for_other_phrase() {
        let codec = HuffmanCodec::from_phrase("abracadabra").unwrap();
        let bits = codec.encode("cab").unwrap();
        assert_eq!(bits.to_string(), "1000110");
        assert_eq!(codec.decode(&bits).unwrap(), "cab");
    }

    #[test]
    fn test_whitespace_and_non_latin() {
        let phrase = "héllo\twörld\n日本語 🦀🦀";
        let encoded = encode_phrase(phrase).unwrap();
        let decoded =
            decode_with_original(&encoded.encoded_message.to_string(), phrase).unwrap();
        assert_eq!(decoded, phrase);
    }

    #[test]
    fn test_mismatched_original_does_not_round_trip() {
        let encoded = encode_phrase("abc").unwrap();
        let bits = encoded.encoded_message.to_string();
        match decode_with_original(&bits, "aab") {
            Ok(text) => assert_ne!(text, "abc"),
            Err(err) => assert_eq!(err.kind(), "malformed_bitstream"),
        }
    }

    fn phrase() -> impl Strategy<Value = String> {
        prop::collection::vec(any::<char>(), 1..96).prop_map(|chars| chars.into_iter().collect())
    }

    fn small_alphabet_phrase() -> impl Strategy<Value = String> {
        prop::collection::vec(prop::sample::select(vec!['a', 'b', 'c', 'd', ' ']), 1..200)
            .prop_map(|chars| chars.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_round_trip(phrase in phrase()) {
            let codec = HuffmanCodec::from_phrase(&phrase).unwrap();
            let bits = codec.encode(&phrase).unwrap();
            prop_assert_eq!(codec.decode(&bits).unwrap(), phrase.clone());

            let text = bits.to_string();
            prop_assert_eq!(decode_with_original(&text, &phrase).unwrap(), phrase);
        }

        #[test]
        fn prop_round_trip_with_ties(phrase in small_alphabet_phrase()) {
            let encoded = encode_phrase(&phrase).unwrap();
            let text = encoded.encoded_message.to_string();
            prop_assert_eq!(decode_with_original(&text, &phrase).unwrap(), phrase);
        }

        #[test]
        fn prop_prefix_free(phrase in phrase()) {
            let encoded = encode_phrase(&phrase).unwrap();
            prop_assert!(encoded.codebook.is_prefix_free());
        }

        #[test]
        fn prop_deterministic(phrase in small_alphabet_phrase()) {
            let frequencies = FrequencyTable::from_phrase(&phrase).unwrap();
            let a = HuffmanTree::from_frequencies(&frequencies).unwrap();
            let b = HuffmanTree::from_frequencies(&frequencies).unwrap();
            prop_assert_eq!(Codebook::from_tree(&a), Codebook::from_tree(&b));
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_bit_length(phrase in phrase()) {
            let encoded = encode_phrase(&phrase).unwrap();
            let expected: usize = phrase
                .chars()
                .map(|symbol| encoded.codebook.get(symbol).unwrap().len())
                .sum();
            prop_assert_eq!(encoded.encoded_message.len(), expected);
            prop_assert!(encoded.codebook.iter().all(|(_, code)| !code.is_empty()));

            let frequencies = FrequencyTable::from_phrase(&phrase).unwrap();
            prop_assert_eq!(encoded.codebook.encoded_len(&frequencies), expected);
        }
    }
}
