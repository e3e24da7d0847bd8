//! Seq2seq model definition, construction, and checkpoint restore.

use crate::checkpoint::{self, TensorMap};
use crate::error::Result;
use crate::models::seq2seq::attention::BahdanauAttention;
use crate::models::seq2seq::layers::{Dense, Embedding, GruCell};
use crate::vocab::Vocabulary;
use ndarray::{Array1, Array2};
use std::path::Path;

/// Width of token embedding vectors.
pub const EMBEDDING_DIM: usize = 256;

/// Width of the recurrent hidden state.
pub const UNITS: usize = 1024;

/// Fixed padded length of source sequences.
pub const MAX_LENGTH_INP: usize = 50;

/// Hard cap on decoding steps per translation.
pub const MAX_LENGTH_TARG: usize = 50;

/// GRU encoder over a padded source sequence.
#[derive(Debug)]
pub struct Encoder {
    pub embedding: Embedding,
    pub gru: GruCell,
}

impl Encoder {
    /// Construct with zero-valued parameters at their exact shapes.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            embedding: Embedding::new(vocab_size, EMBEDDING_DIM),
            gru: GruCell::new(EMBEDDING_DIM, UNITS),
        }
    }

    /// Zero hidden state to start encoding from.
    pub fn initial_hidden(&self) -> Array1<f32> {
        Array1::zeros(self.gru.units)
    }

    /// Run the sequence forward, returning the per-timestep output matrix
    /// (`len × units`) and the final hidden state.
    pub fn forward(&self, ids: &[usize], hidden: Array1<f32>) -> (Array2<f32>, Array1<f32>) {
        let mut outputs = Array2::zeros((ids.len(), self.gru.units));
        let mut state = hidden;

        for (t, &id) in ids.iter().enumerate() {
            let x = self.embedding.lookup(id);
            state = self.gru.step(&x, &state);
            outputs.row_mut(t).assign(&state);
        }

        (outputs, state)
    }

    pub(crate) fn restore(&mut self, tensors: &TensorMap) -> Result<()> {
        checkpoint::restore2(tensors, "embedding/weight", &mut self.embedding.weight)?;
        checkpoint::restore2(tensors, "gru/kernel", &mut self.gru.kernel)?;
        checkpoint::restore2(
            tensors,
            "gru/recurrent_kernel",
            &mut self.gru.recurrent_kernel,
        )?;
        checkpoint::restore1(tensors, "gru/bias", &mut self.gru.bias)?;
        Ok(())
    }
}

/// Attention decoder producing target-vocabulary logits one step at a time.
#[derive(Debug)]
pub struct Decoder {
    pub embedding: Embedding,
    pub gru: GruCell,
    pub fc: Dense,
    pub attention: BahdanauAttention,
}

impl Decoder {
    /// Construct with zero-valued parameters at their exact shapes.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            embedding: Embedding::new(vocab_size, EMBEDDING_DIM),
            // Step input is [attention context | token embedding]
            gru: GruCell::new(UNITS + EMBEDDING_DIM, UNITS),
            fc: Dense::new(UNITS, vocab_size),
            attention: BahdanauAttention::new(UNITS),
        }
    }

    /// One decode step.
    ///
    /// Returns logits over the target vocabulary, the next hidden state,
    /// and the attention weight distribution over encoder timesteps.
    pub fn forward(
        &self,
        input_id: usize,
        hidden: &Array1<f32>,
        enc_output: &Array2<f32>,
    ) -> (Array1<f32>, Array1<f32>, Array1<f32>) {
        let (context, weights) = self.attention.forward(hidden, enc_output);
        let embedded = self.embedding.lookup(input_id);

        let step_input = Array1::from_iter(context.iter().chain(embedded.iter()).copied());
        let next_hidden = self.gru.step(&step_input, hidden);

        let logits = self.fc.forward(&next_hidden);

        (logits, next_hidden, weights)
    }

    pub(crate) fn restore(&mut self, tensors: &TensorMap) -> Result<()> {
        checkpoint::restore2(tensors, "embedding/weight", &mut self.embedding.weight)?;
        checkpoint::restore2(tensors, "gru/kernel", &mut self.gru.kernel)?;
        checkpoint::restore2(
            tensors,
            "gru/recurrent_kernel",
            &mut self.gru.recurrent_kernel,
        )?;
        checkpoint::restore1(tensors, "gru/bias", &mut self.gru.bias)?;
        checkpoint::restore2(tensors, "fc/weight", &mut self.fc.weight)?;
        checkpoint::restore1(tensors, "fc/bias", &mut self.fc.bias)?;
        checkpoint::restore2(
            tensors,
            "attention/w_query/weight",
            &mut self.attention.w_query.weight,
        )?;
        checkpoint::restore1(
            tensors,
            "attention/w_query/bias",
            &mut self.attention.w_query.bias,
        )?;
        checkpoint::restore2(
            tensors,
            "attention/w_values/weight",
            &mut self.attention.w_values.weight,
        )?;
        checkpoint::restore1(
            tensors,
            "attention/w_values/bias",
            &mut self.attention.w_values.bias,
        )?;
        checkpoint::restore2(tensors, "attention/v/weight", &mut self.attention.v.weight)?;
        checkpoint::restore1(tensors, "attention/v/bias", &mut self.attention.v.bias)?;
        Ok(())
    }
}

/// Complete translation model: vocabularies plus encoder and decoder.
///
/// Parameters are restored once at construction and treated as read-only
/// for the lifetime of the process.
#[derive(Debug)]
pub struct Seq2SeqModel {
    pub(crate) encoder: Encoder,
    pub(crate) decoder: Decoder,
    pub(crate) inp_vocab: Vocabulary,
    pub(crate) targ_vocab: Vocabulary,
}

impl Seq2SeqModel {
    /// Assemble a model from loaded vocabularies with zero parameters.
    ///
    /// Parameter tensors are allocated at their final shapes here, so a
    /// later restore only ever writes values, never reallocates.
    pub fn new(inp_vocab: Vocabulary, targ_vocab: Vocabulary) -> Self {
        Self {
            encoder: Encoder::new(inp_vocab.size()),
            decoder: Decoder::new(targ_vocab.size()),
            inp_vocab,
            targ_vocab,
        }
    }

    /// Load vocabularies and restore trained parameters from a model
    /// directory.
    ///
    /// Expects `inp_vocab.json`, `targ_vocab.json`, and a `checkpoints/`
    /// directory of numbered `ckpt-<N>` snapshots; the highest `N` wins.
    /// Names missing from the snapshot keep their initialized values;
    /// a missing checkpoint entirely is a fatal startup error.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let inp_vocab = Vocabulary::from_file(dir.join("inp_vocab.json"))?;
        let targ_vocab = Vocabulary::from_file(dir.join("targ_vocab.json"))?;

        let mut model = Self::new(inp_vocab, targ_vocab);

        let ckpt = checkpoint::latest_checkpoint(&dir.join("checkpoints"))?;
        tracing::info!(checkpoint = %ckpt.display(), "restoring model parameters");

        let encoder_tensors = checkpoint::load_tensors(&ckpt.join("encoder.json"))?;
        let decoder_tensors = checkpoint::load_tensors(&ckpt.join("decoder.json"))?;

        model.encoder.restore(&encoder_tensors)?;
        model.decoder.restore(&decoder_tensors)?;

        Ok(model)
    }
}
