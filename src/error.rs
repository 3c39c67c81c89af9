//
// Copyright 2022-Present (c) Raja Lehtihet & Wael El Oraiby
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice,
// this list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors
// may be used to endorse or promote products derived from this software without
// specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE
// ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE
// LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR
// CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF
// SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS
// INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN
// CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE)
// ARISING IN ANY WAY OUT OF THE USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE
// POSSIBILITY OF SUCH DAMAGE.
//
use thiserror::Error;

/// Configuration errors raised by the style property store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StyleError {
    /// The control kind index is outside the style table.
    #[error("invalid control kind {0}")]
    InvalidControl(u16),
    /// The property index is outside the slots of the control kind.
    #[error("invalid property {property} for control kind {control}")]
    InvalidProperty {
        /// Control kind index.
        control: u16,
        /// Property index.
        property: u16,
    },
}

/// Errors raised while decoding style and icon assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The file does not start with the expected signature.
    #[error("bad signature, expected {expected:?}")]
    BadSignature {
        /// The four signature bytes that were expected.
        expected: &'static str,
    },
    /// The file version is not understood.
    #[error("unsupported version {0}")]
    UnsupportedVersion(u16),
    /// The payload ended before all announced records were read.
    #[error("truncated asset: needed {needed} bytes at offset {offset}")]
    Truncated {
        /// Byte offset of the failed read.
        offset: usize,
        /// Number of bytes requested.
        needed: usize,
    },
    /// A text record could not be parsed.
    #[error("line {line}: {reason}")]
    Malformed {
        /// One based line number of a text asset, byte offset of a binary one.
        line: usize,
        /// What went wrong.
        reason: String,
    },
    /// A record referenced a style slot that does not exist.
    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Errors raised while baking a font atlas.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be parsed.
    #[error("cannot parse font: {0}")]
    Parse(String),
    /// The requested atlas texture is too small for the glyph set.
    #[error("atlas of {width}x{height} is not enough to hold the glyphs")]
    AtlasFull {
        /// Texture width in pixels.
        width: usize,
        /// Texture height in pixels.
        height: usize,
    },
}

/// Result alias used by the fallible asset and style APIs.
pub type Result<T, E = AssetError> = std::result::Result<T, E>;
