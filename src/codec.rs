//! Built-in base64 codecs.
//!
//! Each [`Codec`] is a pure byte-to-byte transform. Decoding is strict:
//! standard and URL-safe alphabets are never mixed, and non-canonical padding
//! or trailing bits are rejected. The URL-safe pair additionally tolerates
//! producers that truncate trailing `=` padding.

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine as _;
use std::fmt;
use thiserror::Error;

/// Base64 padding is never longer than this.
const MAX_PADDING: usize = 2;

/// Error raised by a single codec invocation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input is not valid for the codec (alphabet, length, or padding)
    #[error("{codec}: {source}")]
    Decode {
        codec: Codec,
        #[source]
        source: base64::DecodeError,
    },

    /// Field value is neither text nor bytes
    #[error("{codec}: unsupported value type '{kind}'")]
    UnsupportedValue { codec: Codec, kind: &'static str },
}

/// One of the built-in codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codec {
    /// Strict standard-alphabet decode.
    Base64Decode,
    /// Standard-alphabet encode with `=` padding.
    Base64Encode,
    /// URL-safe decode, restoring up to two missing `=` first.
    Urlsafe64Decode,
    /// URL-safe encode with up to two trailing `=` stripped.
    Urlsafe64Encode,
}

impl Codec {
    /// All built-in codecs, in registration order.
    pub const ALL: [Codec; 4] = [
        Codec::Base64Decode,
        Codec::Base64Encode,
        Codec::Urlsafe64Decode,
        Codec::Urlsafe64Encode,
    ];

    /// Configuration name of this codec.
    pub fn name(&self) -> &'static str {
        match self {
            Codec::Base64Decode => "base64-decode",
            Codec::Base64Encode => "base64-encode",
            Codec::Urlsafe64Decode => "urlsafe64-decode",
            Codec::Urlsafe64Encode => "urlsafe64-encode",
        }
    }

    /// Apply the codec to `input`.
    ///
    /// # Errors
    /// Returns [`CodecError::Decode`] when a decode codec is given malformed
    /// input. Encode codecs never fail.
    pub fn apply(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        match self {
            Codec::Base64Decode => STANDARD.decode(input).map_err(|source| CodecError::Decode {
                codec: *self,
                source,
            }),
            Codec::Base64Encode => Ok(STANDARD.encode(input).into_bytes()),
            Codec::Urlsafe64Decode => URL_SAFE
                .decode(restore_padding(input))
                .map_err(|source| CodecError::Decode {
                    codec: *self,
                    source,
                }),
            Codec::Urlsafe64Encode => {
                let mut encoded = URL_SAFE.encode(input).into_bytes();
                let stripped = strip_padding(&encoded).len();
                encoded.truncate(stripped);
                Ok(encoded)
            }
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Append `=` while the length is not a multiple of 4, at most twice.
///
/// Input that is still misaligned afterwards is left for the decoder to
/// reject.
pub fn restore_padding(input: &[u8]) -> Vec<u8> {
    let mut padded = Vec::with_capacity(input.len() + MAX_PADDING);
    padded.extend_from_slice(input);
    for _ in 0..MAX_PADDING {
        if padded.len() % 4 != 0 {
            padded.push(b'=');
        }
    }
    padded
}

/// Strip up to two trailing `=` characters.
pub fn strip_padding(input: &[u8]) -> &[u8] {
    let mut end = input.len();
    for _ in 0..MAX_PADDING {
        if end > 0 && input[end - 1] == b'=' {
            end -= 1;
        }
    }
    &input[..end]
}
