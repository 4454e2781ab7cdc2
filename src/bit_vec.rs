use std::fmt;
use std::str::FromStr;

use crate::error::{BitstreamFault, HuffmanError};

/// Packed bit sequence, MSB first within each byte.
///
/// Text form is a string of '0' and '1'.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Appends a codeword given as '0'/'1' text. Codewords come from a
    /// codebook, so any character other than '1' is taken as 0.
    pub(crate) fn push_code(&mut self, code: &str) {
        for digit in code.bytes() {
            self.push_bit(digit == b'1');
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).filter_map(move |i| self.get(i))
    }
}

impl FromStr for BitVec {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bit_vec = BitVec::new();
        for (position, digit) in s.chars().enumerate() {
            match digit {
                '0' => bit_vec.push_bit(false),
                '1' => bit_vec.push_bit(true),
                other => {
                    return Err(HuffmanError::malformed(
                        position,
                        BitstreamFault::InvalidDigit(other),
                    ))
                }
            }
        }
        Ok(bit_vec)
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.iter().map(|bit| if bit { '1' } else { '0' }).collect();
        f.write_str(&text)
    }
}
