//! Binary artifact file format.
//!
//! Every artifact file is a fixed header followed by a bincode payload:
//!
//! ```text
//! +-------+---------+------+-------------+-------------+----------------+
//! | magic | version | kind | payload len | payload crc |    payload     |
//! | 4 B   | u16 LE  | u8   | u32 LE      | u32 LE      | len bytes      |
//! +-------+---------+------+-------------+-------------+----------------+
//! ```
//!
//! The reader rejects files with a foreign magic, an unsupported format
//! version, a different artifact kind, a truncated or oversized payload, a
//! checksum mismatch, or trailing bytes.

use std::fmt;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpamSiftError};

/// File magic.
pub const MAGIC: [u8; 4] = *b"SSFT";

/// Current artifact format version.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the fixed header in bytes.
pub const HEADER_LEN: usize = 4 + 2 + 1 + 4 + 4;

/// Identity of an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Vectorizer,
    NaiveBayes,
    LogisticRegression,
}

impl ArtifactKind {
    /// Every artifact the store loads, in load order.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Vectorizer,
        ArtifactKind::NaiveBayes,
        ArtifactKind::LogisticRegression,
    ];

    /// Tag byte written in the header.
    pub fn tag(self) -> u8 {
        match self {
            ArtifactKind::Vectorizer => 1,
            ArtifactKind::NaiveBayes => 2,
            ArtifactKind::LogisticRegression => 3,
        }
    }

    /// Parse a header tag byte.
    pub fn from_tag(tag: u8) -> Option<Self> {
        ArtifactKind::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    /// File name of this artifact inside the artifact directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ArtifactKind::Vectorizer => "tfidf_vectorizer.bin",
            ArtifactKind::NaiveBayes => "naive_bayes_classifier.bin",
            ArtifactKind::LogisticRegression => "logistic_regression_classifier.bin",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Vectorizer => "vectorizer",
            ArtifactKind::NaiveBayes => "naive bayes",
            ArtifactKind::LogisticRegression => "logistic regression",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A value that can be stored as an artifact file.
pub trait Artifact: Sized {
    /// Kind written to and expected in the header.
    const KIND: ArtifactKind;

    /// Serialize the payload.
    fn encode_body(&self) -> Result<Vec<u8>>;

    /// Deserialize and validate the payload.
    fn decode_body(bytes: &[u8]) -> Result<Self>;
}

/// Encode a serde value with the crate's bincode configuration.
pub fn encode_serde<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(value, bincode::config::standard())
        .map_err(|e| SpamSiftError::serialization(format!("Failed to encode artifact: {e}")))
}

/// Decode a serde value, rejecting trailing bytes.
pub fn decode_serde<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (value, read) =
        bincode::serde::decode_from_slice::<T, _>(bytes, bincode::config::standard())
            .map_err(|e| SpamSiftError::serialization(format!("Failed to decode artifact: {e}")))?;

    if read != bytes.len() {
        return Err(SpamSiftError::serialization(format!(
            "artifact payload has {} unread bytes",
            bytes.len() - read
        )));
    }

    Ok(value)
}

/// Encode an artifact with its header.
pub fn encode_artifact<A: Artifact>(artifact: &A) -> Result<Vec<u8>> {
    let payload = artifact.encode_body()?;
    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        SpamSiftError::artifact(format!(
            "{} payload of {} bytes is too large",
            A::KIND,
            payload.len()
        ))
    })?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.write_u16::<LittleEndian>(FORMAT_VERSION)?;
    bytes.write_u8(A::KIND.tag())?;
    bytes.write_u32::<LittleEndian>(payload_len)?;
    bytes.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
    bytes.extend_from_slice(&payload);

    Ok(bytes)
}

/// Decode an artifact, checking its header and checksum.
pub fn decode_artifact<A: Artifact>(bytes: &[u8]) -> Result<A> {
    if bytes.len() < HEADER_LEN {
        return Err(SpamSiftError::artifact(format!(
            "file is {} bytes, shorter than the {HEADER_LEN}-byte header",
            bytes.len()
        )));
    }

    let mut cursor = Cursor::new(bytes);

    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(SpamSiftError::artifact("not a spamsift artifact (bad magic)"));
    }

    let version = cursor.read_u16::<LittleEndian>()?;
    if version != FORMAT_VERSION {
        return Err(SpamSiftError::artifact(format!(
            "unsupported artifact format version {version} (expected {FORMAT_VERSION})"
        )));
    }

    let tag = cursor.read_u8()?;
    match ArtifactKind::from_tag(tag) {
        Some(kind) if kind == A::KIND => {}
        Some(kind) => {
            return Err(SpamSiftError::artifact(format!(
                "expected a {} artifact, found a {kind} artifact",
                A::KIND
            )));
        }
        None => {
            return Err(SpamSiftError::artifact(format!(
                "unknown artifact kind tag {tag}"
            )));
        }
    }

    let payload_len = cursor.read_u32::<LittleEndian>()? as usize;
    let checksum = cursor.read_u32::<LittleEndian>()?;

    let payload = &bytes[HEADER_LEN..];
    if payload.len() != payload_len {
        return Err(SpamSiftError::artifact(format!(
            "header declares a {payload_len}-byte payload but {} bytes follow",
            payload.len()
        )));
    }
    if crc32fast::hash(payload) != checksum {
        return Err(SpamSiftError::artifact("payload checksum mismatch"));
    }

    A::decode_body(payload)
}

/// Write an artifact file.
pub fn save_artifact<A: Artifact, P: AsRef<Path>>(artifact: &A, path: P) -> Result<()> {
    let bytes = encode_artifact(artifact)?;
    fs::write(path.as_ref(), bytes)?;
    log::debug!("Wrote {} artifact to {}", A::KIND, path.as_ref().display());
    Ok(())
}

/// Read an artifact file.
pub fn load_artifact<A: Artifact, P: AsRef<Path>>(path: P) -> Result<A> {
    let bytes = fs::read(path.as_ref())?;
    decode_artifact(&bytes)
}
