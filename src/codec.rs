//! Fixed-width, sentinel-delimited framing of text into integer buffers.

use crate::error::Error;

/// Frame width used when the caller does not specify one.
pub const DEFAULT_PADDING_LENGTH: usize = 1000;

/// Value marking end-of-content within a frame.
pub const SENTINEL: u32 = 0;

/// A fixed-width frame of code points. The first `n` slots hold the framed
/// text's code points in order; every remaining slot is [`SENTINEL`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PaddedBuffer(pub(crate) Vec<u32>);

impl PaddedBuffer {
    /// Returns the frame width.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn words(&self) -> &[u32] {
        &self.0
    }
}

/// Frames `text` into a buffer of exactly `padding_length` code points,
/// filling the tail with [`SENTINEL`]. The input must not contain U+0000 and
/// must fit the frame.
///
/// # Arguments
///
/// * `text` - The text to be framed.
/// * `padding_length` - The frame width to pad to.
pub fn encode(text: &str, padding_length: usize) -> Result<PaddedBuffer, Error> {
    let len = text.chars().count();
    if len > padding_length {
        return Err(Error::TextTooLong {
            len,
            padding_length,
        });
    }

    let mut words = Vec::with_capacity(padding_length);
    for c in text.chars() {
        if c as u32 == SENTINEL {
            return Err(Error::SentinelInText);
        }
        words.push(c as u32);
    }

    // Fill the tail with the sentinel.
    words.resize(padding_length, SENTINEL);

    Ok(PaddedBuffer(words))
}

/// Recovers the framed text, stopping at the first sentinel or the end of the
/// buffer. Words after the first sentinel are ignored.
pub fn decode(buffer: &PaddedBuffer) -> Result<String, Error> {
    let mut text = String::new();
    for (slot, &word) in buffer.0.iter().enumerate() {
        if word == SENTINEL {
            break;
        }
        let c = char::from_u32(word).ok_or(Error::InvalidCodePoint { slot, word })?;
        text.push(c);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_pads_to_width() {
        let b = encode("Hi", 8).unwrap();
        assert_eq!(b.words(), &[72, 105, 0, 0, 0, 0, 0, 0]);
        assert_eq!(b.len(), 8);
    }

    #[test]
    fn encode_length_boundary() {
        assert!(encode("abcd", 4).is_ok());
        let r = encode("abcde", 4);
        assert!(matches!(
            r,
            Err(Error::TextTooLong {
                len: 5,
                padding_length: 4
            })
        ));
    }

    #[test]
    fn encode_counts_code_points_not_bytes() {
        // 4 code points, 8 utf-8 bytes.
        assert!(encode("日本語字", 4).is_ok());
    }

    #[test]
    fn encode_rejects_nul() {
        assert!(matches!(encode("a\0b", 8), Err(Error::SentinelInText)));
    }

    #[test]
    fn decode_stops_at_first_sentinel() {
        let b = PaddedBuffer(vec![72, 105, 0, 99, 0, 0]);
        assert_eq!(decode(&b).unwrap(), "Hi");
    }

    #[test]
    fn decode_rejects_surrogate_word() {
        let b = PaddedBuffer(vec![72, 0xD800, 0, 0]);
        assert!(matches!(
            decode(&b),
            Err(Error::InvalidCodePoint {
                slot: 1,
                word: 0xD800
            })
        ));
    }

    #[test]
    fn empty_text_round_trips() {
        let b = encode("", 16).unwrap();
        assert_eq!(decode(&b).unwrap(), "");
    }

    #[test]
    fn round_trip() {
        let b = encode("padded frame", DEFAULT_PADDING_LENGTH).unwrap();
        assert_eq!(b.len(), DEFAULT_PADDING_LENGTH);
        assert_eq!(decode(&b).unwrap(), "padded frame");
    }
}
