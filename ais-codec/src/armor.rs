use crate::error::{DecodeError, decode_error::ArmorSnafu};

/// Accumulates message fields most significant bit first and armors them into the six-bit
/// ASCII alphabet used by AIS payloads.
#[derive(Debug, Default)]
pub(crate) struct BitWriter {
    bits: Vec<bool>,
}

/// Random access view over an unarmored payload.
#[derive(Debug)]
pub(crate) struct BitReader {
    bits: Vec<bool>,
}

impl BitWriter {
    pub fn with_capacity(capacity: usize) -> BitWriter {
        BitWriter {
            bits: Vec::with_capacity(capacity),
        }
    }

    pub fn push_unsigned(&mut self, value: u64, width: usize) {
        for i in (0..width).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn push_signed(&mut self, value: i64, width: usize) {
        let mask = (1u64 << width) - 1;
        self.push_unsigned(value as u64 & mask, width);
    }

    /// Returns the armored payload and the number of fill bits padding the last character.
    pub fn armor(&self) -> (String, usize) {
        let fill_bits = (6 - self.bits.len() % 6) % 6;
        let payload = self
            .bits
            .chunks(6)
            .map(|chunk| {
                let value = (0..6).fold(0u8, |acc, i| {
                    (acc << 1) | u8::from(chunk.get(i).copied().unwrap_or(false))
                });
                armor_char(value)
            })
            .collect();

        (payload, fill_bits)
    }
}

impl BitReader {
    pub fn unarmor(payload: &str, fill_bits: usize) -> Result<BitReader, DecodeError> {
        let mut bits = Vec::with_capacity(payload.len() * 6);
        for character in payload.chars() {
            let value = unarmor_char(character)?;
            for i in (0..6).rev() {
                bits.push((value >> i) & 1 == 1);
            }
        }

        bits.truncate(bits.len().saturating_sub(fill_bits));

        Ok(BitReader { bits })
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Callers must check `len` before reading, out of bounds reads panic.
    pub fn unsigned(&self, offset: usize, width: usize) -> u64 {
        self.bits[offset..offset + width]
            .iter()
            .fold(0, |acc, bit| (acc << 1) | u64::from(*bit))
    }

    pub fn signed(&self, offset: usize, width: usize) -> i64 {
        let raw = self.unsigned(offset, width);
        if raw & (1 << (width - 1)) != 0 {
            raw as i64 - (1i64 << width)
        } else {
            raw as i64
        }
    }
}

fn armor_char(value: u8) -> char {
    if value < 40 {
        (value + 48) as char
    } else {
        (value + 56) as char
    }
}

fn unarmor_char(character: char) -> Result<u8, DecodeError> {
    match character {
        '0'..='W' => Ok(character as u8 - 48),
        '`'..='w' => Ok(character as u8 - 56),
        _ => ArmorSnafu { character }.fail(),
    }
}
