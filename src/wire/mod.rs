//! Jupyter wire protocol parsing.
//!
//! A wire message is a list of multipart frames:
//! ```text
//! [
//!     b'u-u-i-d',         # zmq identity(ies)
//!     b'<IDS|MSG>',       # delimiter
//!     b'baddad42',        # HMAC signature
//!     b'{header}',        # serialized header dict
//!     b'{parent_header}', # serialized parent header dict
//!     b'{metadata}',      # serialized metadata dict
//!     b'{content}',       # serialized content dict
//!     b'blob',            # extra raw data buffer(s)
//!     ...
//! ]
//! ```
//! <http://jupyter-client.readthedocs.org/en/latest/messaging.html#the-wire-protocol>
//!
//! Transport is not this crate's business: callers hand frames in however
//! they received them.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::trace;

use crate::message::{Message, MessageHeader};

/// Frame separating zmq identities from the signed message body.
pub const DELIMITER: &str = "<IDS|MSG>";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("no {DELIMITER} delimiter in wire message")]
    MissingDelimiter,

    #[error("wire message truncated: expected signature + 4 frames after delimiter, got {0}")]
    TruncatedMessage(usize),

    #[error("signature frame is not valid hex: {0}")]
    MalformedSignature(#[from] hex::FromHexError),

    #[error("HMAC signature mismatch")]
    BadSignature,

    #[error("malformed message frame: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hex HMAC-SHA256 over `parts`, in order.
///
/// The signature scheme is fixed at hmac-sha256, the only scheme Jupyter
/// front ends ship by default.
pub fn sign<P: AsRef<[u8]>>(parts: &[P], key: &[u8]) -> String {
    // HMAC accepts keys of any length, so construction cannot fail
    let mut mac = HmacSha256::new_from_slice(key).expect("hmac key");
    for part in parts {
        mac.update(part.as_ref());
    }
    hex::encode(mac.finalize().into_bytes())
}

/// Parse a multipart wire message into a [`Message`].
///
/// With a non-empty `key`, the hex signature frame is verified over the four
/// JSON frames before anything is deserialized; an empty `key` means the
/// session is unsigned and verification is skipped. Raw data buffers after
/// the content frame are ignored.
pub fn parse_message<F: AsRef<[u8]>>(frames: &[F], key: &[u8]) -> Result<Message, WireError> {
    let delim = frames
        .iter()
        .position(|f| f.as_ref() == DELIMITER.as_bytes())
        .ok_or(WireError::MissingDelimiter)?;

    // signature + header + parent_header + metadata + content
    let body = &frames[delim + 1..];
    if body.len() < 5 {
        return Err(WireError::TruncatedMessage(body.len()));
    }
    let (signature, parts) = (body[0].as_ref(), &body[1..5]);

    if !key.is_empty() {
        let mut mac = HmacSha256::new_from_slice(key).expect("hmac key");
        for part in parts {
            mac.update(part.as_ref());
        }
        let expected = hex::decode(signature)?;
        mac.verify_slice(&expected)
            .map_err(|_| WireError::BadSignature)?;
    }

    let header: MessageHeader = serde_json::from_slice(parts[0].as_ref())?;
    let parent_header: MessageHeader = serde_json::from_slice(parts[1].as_ref())?;
    let metadata = serde_json::from_slice(parts[2].as_ref())?;
    let content = serde_json::from_slice(parts[3].as_ref())?;

    trace!(msg_type = %header.msg_type, "parsed wire message");

    Ok(Message {
        header: Some(header),
        parent_header: Some(parent_header),
        metadata,
        content,
    })
}
