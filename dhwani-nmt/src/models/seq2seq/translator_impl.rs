//! Translator trait implementation for the seq2seq model.

use crate::error::Result;
use crate::models::seq2seq::Seq2SeqModel;
use crate::traits::Translator;

impl Translator for Seq2SeqModel {
    fn translate(&self, text: &str) -> Result<String> {
        self.translate_sentence(text)
    }
}
