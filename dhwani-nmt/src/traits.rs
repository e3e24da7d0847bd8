//! Core traits for translation backends.

use crate::error::Result;

/// A translation backend: text in, target-language text out.
///
/// Implementations must be side-effect free per call so independent
/// translation requests can run concurrently on shared backends.
pub trait Translator: Send + Sync {
    /// Translate a sentence into the target language.
    fn translate(&self, text: &str) -> Result<String>;
}
