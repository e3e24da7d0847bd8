//! Bahdanau additive attention.

use crate::models::seq2seq::layers::{Dense, softmax};
use ndarray::{Array1, Array2, Axis};

/// Additive attention over encoder timesteps.
///
/// Scores each encoder position against the current decoder hidden state
/// with `v · tanh(W1·query + W2·values_t)`, normalizes the scores with
/// softmax, and sums the encoder outputs under those weights.
#[derive(Debug)]
pub struct BahdanauAttention {
    pub w_query: Dense,
    pub w_values: Dense,
    pub v: Dense,
}

impl BahdanauAttention {
    pub fn new(units: usize) -> Self {
        Self {
            w_query: Dense::new(units, units),
            w_values: Dense::new(units, units),
            v: Dense::new(units, 1),
        }
    }

    /// Compute the context vector and attention weights.
    ///
    /// `query` is the decoder hidden state (`units`), `values` the encoder
    /// output matrix (`timesteps × units`). The returned weights are
    /// non-negative and sum to 1 across timesteps.
    pub fn forward(&self, query: &Array1<f32>, values: &Array2<f32>) -> (Array1<f32>, Array1<f32>) {
        let projected_query = self.w_query.forward(query);
        let projected_values = self.w_values.forward_rows(values);

        // tanh(W1·q + W2·v_t), broadcasting the query across timesteps
        let activated = (&projected_values + &projected_query).mapv(f32::tanh);

        let scores = self.v.forward_rows(&activated).index_axis_move(Axis(1), 0);
        let weights = softmax(&scores);

        let context = values.t().dot(&weights);

        (context, weights)
    }
}
