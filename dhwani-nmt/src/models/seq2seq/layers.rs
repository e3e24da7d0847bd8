//! Neural network layers as explicit parameter structs.
//!
//! Each layer owns its weight tensors and exposes a forward method taking
//! inputs by reference. There is no hidden parameter registry; checkpoint
//! restore writes directly into these fields.

use ndarray::{Array1, Array2};

/// Token embedding table of shape `(vocab_size, embedding_dim)`.
#[derive(Debug)]
pub struct Embedding {
    pub weight: Array2<f32>,
}

impl Embedding {
    pub fn new(vocab_size: usize, embedding_dim: usize) -> Self {
        Self {
            weight: Array2::zeros((vocab_size, embedding_dim)),
        }
    }

    /// Look up the dense vector for a token id.
    pub fn lookup(&self, id: usize) -> Array1<f32> {
        self.weight.row(id).to_owned()
    }
}

/// Fully connected layer: `y = x · W + b` with `W` of shape `(in, out)`.
#[derive(Debug)]
pub struct Dense {
    pub weight: Array2<f32>,
    pub bias: Array1<f32>,
}

impl Dense {
    pub fn new(input_dim: usize, output_dim: usize) -> Self {
        Self {
            weight: Array2::zeros((input_dim, output_dim)),
            bias: Array1::zeros(output_dim),
        }
    }

    pub fn forward(&self, x: &Array1<f32>) -> Array1<f32> {
        x.dot(&self.weight) + &self.bias
    }

    /// Apply the layer to each row of a matrix.
    pub fn forward_rows(&self, x: &Array2<f32>) -> Array2<f32> {
        x.dot(&self.weight) + &self.bias
    }
}

/// Single GRU cell in the Keras `reset_after = false` convention.
///
/// Gate columns of `kernel`/`recurrent_kernel` are laid out `[z | r | h]`;
/// the single bias applies to the input projection. The update rule is
/// `h' = z ⊙ h + (1 − z) ⊙ h̃`.
#[derive(Debug)]
pub struct GruCell {
    /// Input projection, shape `(input_dim, 3 * units)`
    pub kernel: Array2<f32>,
    /// Hidden projection, shape `(units, 3 * units)`
    pub recurrent_kernel: Array2<f32>,
    /// Input-side bias, shape `(3 * units,)`
    pub bias: Array1<f32>,
    pub units: usize,
}

impl GruCell {
    pub fn new(input_dim: usize, units: usize) -> Self {
        Self {
            kernel: Array2::zeros((input_dim, 3 * units)),
            recurrent_kernel: Array2::zeros((units, 3 * units)),
            bias: Array1::zeros(3 * units),
            units,
        }
    }

    /// One recurrent update: consume input `x` and state `h`, return the
    /// next state.
    pub fn step(&self, x: &Array1<f32>, h: &Array1<f32>) -> Array1<f32> {
        let u = self.units;

        let xp = x.dot(&self.kernel) + &self.bias;
        let hp = h.dot(&self.recurrent_kernel);

        let z: Array1<f32> = (0..u).map(|i| sigmoid(xp[i] + hp[i])).collect();
        let r: Array1<f32> = (0..u).map(|i| sigmoid(xp[u + i] + hp[u + i])).collect();
        let candidate: Array1<f32> = (0..u)
            .map(|i| (xp[2 * u + i] + r[i] * hp[2 * u + i]).tanh())
            .collect();

        (0..u)
            .map(|i| z[i] * h[i] + (1.0 - z[i]) * candidate[i])
            .collect()
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Numerically stable softmax over a vector.
pub(crate) fn softmax(scores: &Array1<f32>) -> Array1<f32> {
    let max = scores.fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));
    let exp = scores.mapv(|v| (v - max).exp());
    let sum = exp.sum();
    exp / sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_lookup_returns_row() {
        let mut e = Embedding::new(4, 3);
        e.weight.row_mut(2).fill(0.5);
        assert_eq!(e.lookup(2), Array1::from_elem(3, 0.5));
        assert_eq!(e.lookup(0), Array1::<f32>::zeros(3));
    }

    #[test]
    fn dense_applies_bias() {
        let mut d = Dense::new(2, 2);
        d.bias[1] = 1.0;
        let y = d.forward(&Array1::from_vec(vec![3.0, 4.0]));
        assert_eq!(y, Array1::from_vec(vec![0.0, 1.0]));
    }

    #[test]
    fn gru_zero_parameters_decay_state() {
        // z = sigmoid(0) = 0.5, candidate = tanh(0) = 0, so h' = 0.5 * h
        let g = GruCell::new(2, 3);
        let h = Array1::from_elem(3, 1.0);
        let x = Array1::zeros(2);
        let next = g.step(&x, &h);
        for &v in next.iter() {
            assert!((v - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn softmax_sums_to_one() {
        let w = softmax(&Array1::from_vec(vec![1.0, 2.0, 3.0]));
        assert!((w.sum() - 1.0).abs() < 1e-6);
        assert!(w.iter().all(|&v| v >= 0.0));
        assert!(w[2] > w[1] && w[1] > w[0]);
    }

    #[test]
    fn softmax_is_shift_invariant() {
        let a = softmax(&Array1::from_vec(vec![1.0, 2.0]));
        let b = softmax(&Array1::from_vec(vec![1001.0, 1002.0]));
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-6);
        }
    }
}
