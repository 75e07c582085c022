//! The cipher engine: seals a padded buffer into an opaque ciphertext under a
//! freshly constructed context and reverses the operation.

use std::fmt::Debug;

use rand::Rng;

use crate::{codec::PaddedBuffer, error::Error};

pub mod keystream;

/// Selects how the backend derives its internal parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ParameterStrategy {
    Single,
    Multi,
}

/// Operating-mode knobs passed through to the underlying transform.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Relaxes backend guarantees, e.g. permits zero-length buffers.
    pub unsafe_mode: bool,
    pub parameter_strategy: ParameterStrategy,
    /// Emits periodic progress lines to the log while sealing and opening.
    pub progress_reporting: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            unsafe_mode: true,
            parameter_strategy: ParameterStrategy::Multi,
            progress_reporting: true,
        }
    }
}

/// A sealing transform fixed to one buffer length. Owns whatever key or
/// parameter material it needs; `open` must exactly invert `seal`.
pub trait Transform {
    fn seal(&self, words: &[u32]) -> Result<Vec<u32>, Error>;
    fn open(&self, sealed: &[u32]) -> Result<Vec<u32>, Error>;
}

/// A capability for constructing transforms. The engine behind this trait is
/// opaque to the rest of the crate; tests drive the sealing flow through
/// trivial stub engines.
pub trait Engine {
    /// Builds a transform for buffers of exactly `buffer_length` words.
    fn construct(
        &self,
        buffer_length: usize,
        config: &EngineConfig,
    ) -> Result<Box<dyn Transform>, Error>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ContextState {
    Ready,
    Poisoned,
}

/// The per-call state produced by [`seal`] and required by [`open`].
///
/// A context starts out `Ready` and stays reusable as long as every open
/// succeeds. Any failed open poisons it permanently.
pub struct CipherContext {
    transform: Box<dyn Transform>,
    tag: u64,
    buffer_length: usize,
    state: ContextState,
}

impl Debug for CipherContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherContext")
            .field("tag", &self.tag)
            .field("buffer_length", &self.buffer_length)
            .field("state", &self.state)
            .finish()
    }
}

/// An opaque sealed buffer. Only meaningful together with the context
/// returned by the same [`seal`] call.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CipherText {
    pub(crate) words: Vec<u32>,
    pub(crate) tag: u64,
}

/// Seals `buffer` using a transform constructed by `engine`. Returns the
/// ciphertext together with the context needed to open it; the caller must
/// keep the pair together.
///
/// Context construction may be expensive and happens once per call. Contexts
/// are never cached or shared across calls.
pub fn seal_with(
    engine: &dyn Engine,
    buffer: &PaddedBuffer,
    config: &EngineConfig,
) -> Result<(CipherText, CipherContext), Error> {
    log::info!("sealing a buffer of {} words", buffer.len());
    let transform = engine.construct(buffer.len(), config)?;
    let words = transform.seal(buffer.words())?;

    let tag = rand::thread_rng().gen::<u64>();
    let ciphertext = CipherText { words, tag };
    let context = CipherContext {
        transform,
        tag,
        buffer_length: buffer.len(),
        state: ContextState::Ready,
    };
    Ok((ciphertext, context))
}

/// Seals `buffer` with the built-in keystream backend. See [`seal_with`].
pub fn seal(
    buffer: &PaddedBuffer,
    config: &EngineConfig,
) -> Result<(CipherText, CipherContext), Error> {
    seal_with(&keystream::KeystreamEngine, buffer, config)
}

/// Opens `ciphertext` with the context returned alongside it.
///
/// Fails with [`Error::OpenFailed`] if the context is poisoned, was produced
/// by a different seal call, or the transform cannot invert the words. Any
/// failure poisons the context; it never silently returns a corrupt buffer.
pub fn open(ciphertext: &CipherText, context: &mut CipherContext) -> Result<PaddedBuffer, Error> {
    let r = open_inner(ciphertext, context);
    if r.is_err() {
        context.state = ContextState::Poisoned;
    }
    r
}

fn open_inner(
    ciphertext: &CipherText,
    context: &CipherContext,
) -> Result<PaddedBuffer, Error> {
    if context.state == ContextState::Poisoned {
        return Err(Error::OpenFailed("context is poisoned".to_string()));
    }
    if ciphertext.tag != context.tag {
        return Err(Error::OpenFailed(
            "ciphertext was not produced under this context".to_string(),
        ));
    }
    if ciphertext.words.len() != context.buffer_length {
        return Err(Error::OpenFailed(format!(
            "ciphertext holds {} words, context is bound to {}",
            ciphertext.words.len(),
            context.buffer_length
        )));
    }

    log::info!("opening a ciphertext of {} words", ciphertext.words.len());
    let words = context.transform.open(&ciphertext.words)?;
    Ok(PaddedBuffer(words))
}
