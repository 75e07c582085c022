//! Errors surfaced by the codec and the cipher engine.

/// The error type returned by all fallible operations in this crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The input text has more code points than the configured frame width.
    #[error("text of {len} code points exceeds padding length {padding_length}")]
    TextTooLong { len: usize, padding_length: usize },

    /// The input text contains U+0000, which is indistinguishable from
    /// padding inside a frame.
    #[error("text contains the sentinel character U+0000")]
    SentinelInText,

    /// A word before the first sentinel is not a Unicode scalar value.
    #[error("word {word:#x} at slot {slot} is not a Unicode scalar value")]
    InvalidCodePoint { slot: usize, word: u32 },

    /// The underlying transform could not be constructed or applied.
    #[error("seal failed: {0}")]
    SealFailed(String),

    /// The ciphertext could not be opened with the supplied context.
    #[error("open failed: {0}")]
    OpenFailed(String),
}
