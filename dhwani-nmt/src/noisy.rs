//! Rule-based noisy translation backend.
//!
//! Wraps another backend and degrades its output to beginner-grade target
//! language: a fixed table of common mistakes plus occasional word swaps,
//! filler insertions, and dropped words. Exists alongside the neural
//! backend behind the same [`Translator`] seam.

use crate::error::Result;
use crate::normalize::{END_TOKEN, START_TOKEN};
use crate::traits::Translator;
use rand::Rng;

/// Common beginner substitutions, applied to every matching word.
const BEGINNER_ERRORS: &[(&str, &str)] = &[
    ("हूँ", "ह"),
    ("मैं", "मझ"),
    ("है", "था"),
    ("हैं", "ह"),
    ("अब", "अभी"),
    ("बाजार", "घार"),
    ("यह", "वह"),
    ("घर", "घार"),
    ("कहाँ", "कहा"),
];

/// Filler words occasionally inserted mid-sentence.
const FILLERS: &[&str] = &[
    "ठीक", "बस", "कभी", "देखो", "यहां", "अभी", "शायद", "जल्दी", "फिर", "मौसम", "हां", "कहाँ",
    "बिलकुल", "क्यों", "अच्छा", "जाने", "काम", "बात", "सुबह", "रात", "दिन", "खुश", "पानी", "सड़क",
    "डर", "प्यार", "आशा", "खुशी", "मन", "शांत",
];

/// Degrades translations from an inner backend into noisy beginner output.
pub struct NoisyTranslator {
    inner: Box<dyn Translator>,
    swap_prob: f64,
    filler_prob: f64,
    drop_prob: f64,
}

impl NoisyTranslator {
    /// Wrap a backend with the default error rates: 15% adjacent-word swap,
    /// 20% filler insertion, 10% word drop.
    pub fn new(inner: Box<dyn Translator>) -> Self {
        Self::with_probabilities(inner, 0.15, 0.20, 0.10)
    }

    /// Wrap a backend with explicit error rates.
    pub fn with_probabilities(
        inner: Box<dyn Translator>,
        swap_prob: f64,
        filler_prob: f64,
        drop_prob: f64,
    ) -> Self {
        Self {
            inner,
            swap_prob,
            filler_prob,
            drop_prob,
        }
    }

    fn corrupt(&self, translation: &str) -> String {
        let mut rng = rand::rng();

        let mut words: Vec<String> = translation
            .split_whitespace()
            .map(substitute_beginner_error)
            .collect();

        if words.len() >= 2 && rng.random::<f64>() < self.swap_prob {
            let i = rng.random_range(0..words.len() - 1);
            words.swap(i, i + 1);
        }

        if rng.random::<f64>() < self.filler_prob {
            let i = rng.random_range(0..=words.len());
            let filler = FILLERS[rng.random_range(0..FILLERS.len())];
            words.insert(i, filler.to_string());
        }

        if words.len() > 1 && rng.random::<f64>() < self.drop_prob {
            let i = rng.random_range(0..words.len());
            words.remove(i);
        }

        words.join(" ")
    }
}

fn substitute_beginner_error(word: &str) -> String {
    BEGINNER_ERRORS
        .iter()
        .find(|(from, _)| *from == word)
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| word.to_string())
}

impl Translator for NoisyTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        let translation = self.inner.translate(text)?;

        // The inner backend should never leak markers, but strip them the
        // same way the upstream interface did
        let translation = translation
            .replace(START_TOKEN, "")
            .replace(END_TOKEN, "");

        Ok(self.corrupt(translation.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Translator for Echo {
        fn translate(&self, text: &str) -> Result<String> {
            Ok(text.to_string())
        }
    }

    fn quiet(inner: Box<dyn Translator>) -> NoisyTranslator {
        NoisyTranslator::with_probabilities(inner, 0.0, 0.0, 0.0)
    }

    #[test]
    fn applies_substitution_table_only_when_probabilities_are_zero() {
        let t = quiet(Box::new(Echo));
        let out = t.translate("मैं घर जा रहा हूँ").unwrap();
        assert_eq!(out, "मझ घार जा रहा ह");
    }

    #[test]
    fn strips_sequence_markers() {
        let t = quiet(Box::new(Echo));
        let out = t.translate("<start> घर <end>").unwrap();
        assert_eq!(out, "घार");
    }

    #[test]
    fn always_inserts_filler_at_probability_one() {
        let t = NoisyTranslator::with_probabilities(Box::new(Echo), 0.0, 1.0, 0.0);
        let out = t.translate("बात").unwrap();
        assert_eq!(out.split_whitespace().count(), 2);
    }

    #[test]
    fn never_drops_the_last_word() {
        let t = NoisyTranslator::with_probabilities(Box::new(Echo), 0.0, 0.0, 1.0);
        let out = t.translate("बात").unwrap();
        assert_eq!(out, "बात");
    }
}
