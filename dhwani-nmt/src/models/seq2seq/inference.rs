//! Encoding and the greedy decoding loop.

use crate::error::Result;
use crate::models::seq2seq::core::{MAX_LENGTH_INP, MAX_LENGTH_TARG, Seq2SeqModel};
use crate::normalize::{END_TOKEN, START_TOKEN, normalize};
use crate::vocab::pad_sequence;
use ndarray::{Array1, Array2};
use ndarray_stats::QuantileExt;

/// Loop-carried decoder state, rebuilt functionally every step.
struct DecodeState {
    hidden: Array1<f32>,
    input_id: usize,
}

impl Seq2SeqModel {
    /// Encode a padded source sequence from a zero initial hidden state.
    pub(crate) fn encode(&self, ids: &[usize]) -> (Array2<f32>, Array1<f32>) {
        self.encoder.forward(ids, self.encoder.initial_hidden())
    }

    /// Greedy arg-max decoding over the target vocabulary.
    ///
    /// Starts from the encoder's final hidden state and the `<start>` id,
    /// emits the best-scoring token each step, and stops on `<end>`
    /// (discarding it) or after [`MAX_LENGTH_TARG`] steps. Always
    /// terminates; the result may be empty.
    pub(crate) fn greedy_decode(
        &self,
        enc_output: &Array2<f32>,
        enc_hidden: Array1<f32>,
    ) -> Result<String> {
        let end_id = self.targ_vocab.token_to_id(END_TOKEN);

        let mut state = DecodeState {
            hidden: enc_hidden,
            input_id: self.targ_vocab.token_to_id(START_TOKEN),
        };
        let mut words: Vec<&str> = Vec::new();

        for step in 0..MAX_LENGTH_TARG {
            let (logits, hidden, _weights) =
                self.decoder.forward(state.input_id, &state.hidden, enc_output);

            let predicted = logits.argmax()?;
            tracing::trace!(step, predicted, "decode step");

            if predicted == end_id {
                break;
            }

            words.push(self.targ_vocab.id_to_token(predicted));
            state = DecodeState {
                hidden,
                input_id: predicted,
            };
        }

        Ok(words.join(" ").trim().to_string())
    }

    /// Translate a raw sentence.
    ///
    /// Synchronous and side-effect free: normalize, map to a padded id
    /// sequence, encode, then greedy-decode back to target-language text.
    pub fn translate_sentence(&self, text: &str) -> Result<String> {
        let normalized = normalize(text);
        let ids = pad_sequence(self.inp_vocab.encode(&normalized), MAX_LENGTH_INP);

        let (enc_output, enc_hidden) = self.encode(&ids);
        self.greedy_decode(&enc_output, enc_hidden)
    }
}
