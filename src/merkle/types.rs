use core::fmt;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Width in bytes of every node hash stored in a tree.
pub const NODE_HASH_SIZE: usize = 32;

/// Canonical fixed-width hash stored at every position of a tree array.
///
/// Equality is byte-exact and the derived ordering is byte-lexicographic,
/// which is the ordering canonical pairing relies on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHash([u8; NODE_HASH_SIZE]);

impl NodeHash {
    /// Creates a node hash from raw bytes.
    pub const fn new(bytes: [u8; NODE_HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the all-zero node hash.
    pub const fn zero() -> Self {
        Self([0u8; NODE_HASH_SIZE])
    }

    /// Returns a reference to the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; NODE_HASH_SIZE] {
        &self.0
    }

    /// Creates a node hash from a slice, refusing any width other than 32.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok().map(Self)
    }

    /// Renders the hash as a `0x`-prefixed lowercase hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parses a hex string, with or without the `0x` prefix.
    pub fn from_hex(text: &str) -> Result<Self, MerkleError> {
        let digits = text.strip_prefix("0x").unwrap_or(text);
        let bytes = hex::decode(digits).map_err(|_| MerkleError::InvalidNodeHash {
            reason: "not a hex string",
        })?;
        Self::from_slice(&bytes).ok_or(MerkleError::InvalidNodeHash {
            reason: "expected exactly 32 bytes",
        })
    }
}

impl fmt::Display for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for NodeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHash({})", self)
    }
}

impl AsRef<[u8]> for NodeHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for NodeHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for NodeHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl de::Visitor<'_> for HexVisitor {
            type Value = NodeHash;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a 0x-prefixed 32-byte hex string")
            }

            fn visit_str<E: de::Error>(self, text: &str) -> Result<NodeHash, E> {
                NodeHash::from_hex(text).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// Compact proof covering several leaves of one tree at once.
///
/// `leaves` carries the proven entries in descending tree-index order, `proof`
/// the sibling hashes that cannot be derived from them, and `proof_flags` one
/// boolean per combination step: `true` pulls the second operand from the
/// working queue of intermediate results, `false` consumes the next `proof`
/// entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiProof<L = NodeHash> {
    pub leaves: Vec<L>,
    pub proof: Vec<NodeHash>,
    pub proof_flags: Vec<bool>,
}

/// Errors emitted by the tree engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    /// A tree cannot be built from zero leaves.
    EmptyLeaves,
    /// The index does not refer to a leaf slot of the tree array.
    NotALeaf { index: usize },
    /// The same leaf index was requested twice in one multiproof.
    DuplicateIndex { index: usize },
    /// An empty array was passed where a tree is required.
    EmptyTree,
    /// The multiproof is structurally unusable (caller misuse).
    MalformedMultiProof { reason: &'static str },
    /// The multiproof violates an internal invariant; no proof produced by
    /// this engine can trip this, so it signals corrupted or forged input.
    Invariant { reason: &'static str },
    /// A byte or hex payload could not be interpreted as a node hash.
    InvalidNodeHash { reason: &'static str },
}

impl fmt::Display for MerkleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerkleError::EmptyLeaves => write!(f, "expected non-zero number of leaves"),
            MerkleError::NotALeaf { index } => write!(f, "index {} is not a leaf", index),
            MerkleError::DuplicateIndex { index } => {
                write!(f, "cannot prove duplicated index {}", index)
            }
            MerkleError::EmptyTree => write!(f, "expected non-zero number of nodes"),
            MerkleError::MalformedMultiProof { reason } => {
                write!(f, "malformed multiproof: {}", reason)
            }
            MerkleError::Invariant { reason } => {
                write!(f, "multiproof invariant violated: {}", reason)
            }
            MerkleError::InvalidNodeHash { reason } => {
                write!(f, "invalid node hash: {}", reason)
            }
        }
    }
}

impl std::error::Error for MerkleError {}
