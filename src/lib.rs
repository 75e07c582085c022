use error::Error;

pub mod codec;
pub mod engine;
pub mod error;

pub use codec::{decode, encode, PaddedBuffer, DEFAULT_PADDING_LENGTH};
pub use engine::{
    keystream::KeystreamEngine, open, seal, seal_with, CipherContext, CipherText, Engine,
    EngineConfig, ParameterStrategy, Transform,
};

/// Frames `text` to `padding_length` code points and seals it with the
/// built-in backend. Returns the ciphertext and the context needed to open
/// it; the pair must be kept together.
pub fn seal_text(
    text: &str,
    padding_length: usize,
    config: &EngineConfig,
) -> Result<(CipherText, CipherContext), Error> {
    let buffer = codec::encode(text, padding_length)?;
    engine::seal(&buffer, config)
}

/// Opens `ciphertext` with its context and recovers the framed text.
pub fn open_text(ciphertext: &CipherText, context: &mut CipherContext) -> Result<String, Error> {
    let buffer = engine::open(ciphertext, context)?;
    codec::decode(&buffer)
}

#[cfg(test)]
mod tests {
    use crate::{open_text, seal_text, EngineConfig, Error, DEFAULT_PADDING_LENGTH};

    fn setup() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn round_trip(text: &str, padding_length: usize) -> String {
        let config = EngineConfig::default();
        let (ct, mut ctx) = seal_text(text, padding_length, &config).unwrap();
        open_text(&ct, &mut ctx).unwrap()
    }

    #[test]
    fn round_trip_default_frame() {
        setup();
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(round_trip(text, DEFAULT_PADDING_LENGTH), text);
    }

    #[test]
    fn round_trip_non_ascii() {
        setup();
        let text = "héllo, 世界";
        assert_eq!(round_trip(text, 64), text);
    }

    #[test]
    fn round_trip_empty_text() {
        setup();
        assert_eq!(round_trip("", DEFAULT_PADDING_LENGTH), "");
    }

    #[test]
    fn round_trip_exact_frame_width() {
        setup();
        let text = "x".repeat(10);
        assert_eq!(round_trip(&text, 10), text);
    }

    #[test]
    fn seal_text_rejects_overlong_input() {
        setup();
        let text = "x".repeat(11);
        let r = seal_text(&text, 10, &EngineConfig::default());
        assert!(matches!(
            r,
            Err(Error::TextTooLong {
                len: 11,
                padding_length: 10
            })
        ));
    }
}
