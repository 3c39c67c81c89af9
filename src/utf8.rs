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
/// Codepoint reported for malformed input.
pub const REPLACEMENT_CODEPOINT: u32 = 0x3F;

fn is_continuation(b: Option<&u8>) -> bool { matches!(b, Some(b) if b & 0xC0 == 0x80) }

/// Decodes the codepoint at the start of `bytes`.
///
/// Returns the codepoint and the number of bytes it used. A malformed or truncated sequence
/// yields [`REPLACEMENT_CODEPOINT`] and a size of one so the caller resynchronizes on the next byte.
/// An empty slice yields `(0, 0)`.
pub fn decode_codepoint(bytes: &[u8]) -> (u32, usize) {
    let lead = match bytes.first() {
        Some(b) => *b,
        None => return (0, 0),
    };

    let size = if lead & 0x80 == 0 {
        return (lead as u32, 1);
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        return (REPLACEMENT_CODEPOINT, 1);
    };

    if !(1..size).all(|i| is_continuation(bytes.get(i))) {
        return (REPLACEMENT_CODEPOINT, 1);
    }

    let cp = match size {
        2 => ((lead as u32 & 0x1F) << 6) | (bytes[1] as u32 & 0x3F),
        3 => ((lead as u32 & 0x0F) << 12) | ((bytes[1] as u32 & 0x3F) << 6) | (bytes[2] as u32 & 0x3F),
        _ => ((lead as u32 & 0x07) << 18) | ((bytes[1] as u32 & 0x3F) << 12) | ((bytes[2] as u32 & 0x3F) << 6) | (bytes[3] as u32 & 0x3F),
    };
    (cp, size)
}

/// Number of bytes the UTF-8 encoding of `cp` takes, `0` above `0x10FFFF`.
pub fn codepoint_size(cp: u32) -> usize {
    match cp {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        0x10000..=0x10FFFF => 4,
        _ => 0,
    }
}

/// Encodes `cp`, returning the buffer and the number of bytes used.
pub fn encode_codepoint(cp: u32) -> ([u8; 4], usize) {
    let mut out = [0u8; 4];
    let size = codepoint_size(cp);
    match size {
        1 => out[0] = cp as u8,
        2 => {
            out[0] = 0xC0 | ((cp >> 6) & 0x1F) as u8;
            out[1] = 0x80 | (cp & 0x3F) as u8;
        }
        3 => {
            out[0] = 0xE0 | ((cp >> 12) & 0x0F) as u8;
            out[1] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            out[2] = 0x80 | (cp & 0x3F) as u8;
        }
        4 => {
            out[0] = 0xF0 | ((cp >> 18) & 0x07) as u8;
            out[1] = 0x80 | ((cp >> 12) & 0x3F) as u8;
            out[2] = 0x80 | ((cp >> 6) & 0x3F) as u8;
            out[3] = 0x80 | (cp & 0x3F) as u8;
        }
        _ => (),
    }
    (out, size)
}

/// Iterator over `(byte offset, codepoint, byte size)` of a possibly malformed UTF-8 slice.
pub struct Codepoints<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Codepoints<'a> {
    /// Starts decoding at the beginning of `bytes`.
    pub fn new(bytes: &'a [u8]) -> Self { Self { bytes, pos: 0 } }
}

impl<'a> Iterator for Codepoints<'a> {
    type Item = (usize, u32, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.bytes.len() {
            return None;
        }
        let (cp, size) = decode_codepoint(&self.bytes[self.pos..]);
        let at = self.pos;
        self.pos += size;
        Some((at, cp, size))
    }
}

/// Maps a decoded codepoint to a `char`, substituting `?` for invalid scalar values.
pub fn codepoint_char(cp: u32) -> char { char::from_u32(cp).unwrap_or('?') }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_over_reference_ranges() {
        let ranges = (0x20u32..=0x7E).chain(0x00A0..=0x04FF).chain(std::iter::once(0x1F600));
        for cp in ranges {
            let (buf, size) = encode_codepoint(cp);
            assert_eq!(size, codepoint_size(cp));
            let expected = codepoint_char(cp).len_utf8();
            assert_eq!(size, expected, "size of {:#x}", cp);
            assert_eq!(&buf[..size], codepoint_char(cp).to_string().as_bytes());
            assert_eq!(decode_codepoint(&buf[..size]), (cp, size), "decode of {:#x}", cp);
        }
    }

    #[test]
    fn malformed_lead_byte_advances_one_byte() {
        assert_eq!(decode_codepoint(&[0xFF, b'a']), (REPLACEMENT_CODEPOINT, 1));
        assert_eq!(decode_codepoint(&[0x80]), (REPLACEMENT_CODEPOINT, 1));
    }

    #[test]
    fn truncated_sequence_is_replaced() {
        // lead of a 3 byte sequence followed by ASCII
        assert_eq!(decode_codepoint(&[0xE2, 0x82, b'x']), (REPLACEMENT_CODEPOINT, 1));
        assert_eq!(decode_codepoint(&[0xF0, 0x9F]), (REPLACEMENT_CODEPOINT, 1));
        assert_eq!(decode_codepoint(&[]), (0, 0));
    }

    #[test]
    fn iterator_resynchronizes_after_garbage() {
        let bytes = [b'a', 0xC3, b'b', 0xC3, 0xA9];
        let decoded: Vec<(usize, u32, usize)> = Codepoints::new(&bytes).collect();
        assert_eq!(decoded, vec![(0, 'a' as u32, 1), (1, REPLACEMENT_CODEPOINT, 1), (2, 'b' as u32, 1), (3, 0xE9, 2)]);
    }
}
