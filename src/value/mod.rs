//! Typed leaf values and their canonical word encoding.
//!
//! A leaf is described by a row of [`Value`]s matching a declared row shape
//! (a slice of [`ValueKind`]s). Encoding turns each value into one or two
//! 32-byte big-endian words and concatenates them into the byte payload that
//! a leaf hash consumes. Width checks that the source language performed at
//! runtime are static here; only the felt-range bound survives as a runtime
//! check.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Largest value accepted by the felt-range kinds, `2^251 + 17 * 2^192`.
pub const FELT_MAX: [u8; 32] = [
    0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00,
];

/// Declared type of one column of a leaf row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    #[serde(rename = "felt252")]
    Felt,
    ContractAddress,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Felt => "felt252",
            ValueKind::ContractAddress => "contract_address",
            ValueKind::U8 => "u8",
            ValueKind::U16 => "u16",
            ValueKind::U32 => "u32",
            ValueKind::U64 => "u64",
            ValueKind::U128 => "u128",
            ValueKind::U256 => "u256",
            ValueKind::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// One typed cell of a leaf row.
///
/// Felt-range variants hold a 32-byte big-endian word and are range-checked
/// against [`FELT_MAX`] during encoding; `u256` is carried as two 128-bit
/// halves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    #[serde(rename = "felt252")]
    Felt([u8; 32]),
    ContractAddress([u8; 32]),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    U256 { low: u128, high: u128 },
    Bool(bool),
}

impl Value {
    /// The declared kind this value satisfies.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Felt(_) => ValueKind::Felt,
            Value::ContractAddress(_) => ValueKind::ContractAddress,
            Value::U8(_) => ValueKind::U8,
            Value::U16(_) => ValueKind::U16,
            Value::U32(_) => ValueKind::U32,
            Value::U64(_) => ValueKind::U64,
            Value::U128(_) => ValueKind::U128,
            Value::U256 { .. } => ValueKind::U256,
            Value::Bool(_) => ValueKind::Bool,
        }
    }
}

/// Errors surfaced while encoding a leaf row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// The row has a different number of cells than the declared shape.
    LengthMismatch { expected: usize, got: usize },
    /// A cell does not satisfy the kind declared for its column.
    KindMismatch { expected: ValueKind, got: ValueKind },
    /// A felt-range value exceeds [`FELT_MAX`].
    Overflow { kind: ValueKind },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::LengthMismatch { expected, got } => {
                write!(f, "kinds/values length mismatch: expected {}, got {}", expected, got)
            }
            ValueError::KindMismatch { expected, got } => {
                write!(f, "expected {} value, got {}", expected, got)
            }
            ValueError::Overflow { kind } => {
                write!(f, "value is too large for type {}", kind)
            }
        }
    }
}

impl std::error::Error for ValueError {}

/// Encodes an unsigned value as a 32-byte big-endian word.
pub fn u128_word(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Encodes a leaf row into the byte payload consumed by a leaf hash.
///
/// Every cell contributes one big-endian word, except `u256`, which
/// contributes its low half followed by its high half.
pub fn encode_values(kinds: &[ValueKind], values: &[Value]) -> Result<Vec<u8>, ValueError> {
    if kinds.len() != values.len() {
        return Err(ValueError::LengthMismatch {
            expected: kinds.len(),
            got: values.len(),
        });
    }

    let mut payload = Vec::with_capacity(values.len() * 32);
    for (&kind, value) in kinds.iter().zip(values) {
        encode_single(kind, value, &mut payload)?;
    }
    Ok(payload)
}

fn encode_single(kind: ValueKind, value: &Value, out: &mut Vec<u8>) -> Result<(), ValueError> {
    if value.kind() != kind {
        return Err(ValueError::KindMismatch {
            expected: kind,
            got: value.kind(),
        });
    }

    match *value {
        Value::Felt(word) | Value::ContractAddress(word) => {
            if word > FELT_MAX {
                return Err(ValueError::Overflow { kind });
            }
            out.extend_from_slice(&word);
        }
        Value::U8(v) => out.extend_from_slice(&u128_word(v as u128)),
        Value::U16(v) => out.extend_from_slice(&u128_word(v as u128)),
        Value::U32(v) => out.extend_from_slice(&u128_word(v as u128)),
        Value::U64(v) => out.extend_from_slice(&u128_word(v as u128)),
        Value::U128(v) => out.extend_from_slice(&u128_word(v)),
        Value::U256 { low, high } => {
            out.extend_from_slice(&u128_word(low));
            out.extend_from_slice(&u128_word(high));
        }
        Value::Bool(v) => out.extend_from_slice(&u128_word(v as u128)),
    }
    Ok(())
}
