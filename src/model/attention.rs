//! Self-attention block over node features.

use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};

/// Single-head scaled dot-product self-attention with a tanh output
/// squash, applied after graph convolution and before pooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfAttention {
    /// Query projection [dim, dim]
    pub w_query: Array2<f32>,
    /// Key projection [dim, dim]
    pub w_key: Array2<f32>,
    /// Value projection [dim, dim]
    pub w_value: Array2<f32>,
    /// Output projection [dim, dim]
    pub w_out: Array2<f32>,
    /// Attention score scale, 1/sqrt(dim)
    scale: f32,
}

impl SelfAttention {
    /// Create a block with Xavier-initialized projections.
    pub fn new(dim: usize) -> Self {
        let limit = (6.0 / (2 * dim) as f32).sqrt();
        let init = || Array2::random((dim, dim), Uniform::new(-limit, limit));
        Self {
            w_query: init(),
            w_key: init(),
            w_value: init(),
            w_out: init(),
            scale: 1.0 / (dim as f32).sqrt(),
        }
    }

    /// Feature dimension.
    pub fn dim(&self) -> usize {
        self.w_query.nrows()
    }

    /// Forward pass over node features [num_nodes, dim].
    pub fn forward(&self, x: &Array2<f32>) -> Array2<f32> {
        let queries = x.dot(&self.w_query);
        let keys = x.dot(&self.w_key);
        let values = x.dot(&self.w_value);

        let mut scores = queries.dot(&keys.t());
        scores *= self.scale;
        softmax_rows(&mut scores);

        let attended = scores.dot(&values).dot(&self.w_out);
        attended.mapv(f32::tanh)
    }
}

/// In-place row-wise softmax, shifted by the row max for stability.
fn softmax_rows(scores: &mut Array2<f32>) {
    for mut row in scores.rows_mut() {
        let max = row.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        row.mapv_inplace(|v| (v - max).exp());
        let sum: f32 = row.sum();
        if sum > 0.0 {
            row /= sum;
        }
    }
}

/// Mean-pool node features [num_nodes, dim] to a single vector [dim].
pub fn mean_pool(x: &Array2<f32>) -> Array1<f32> {
    let n = x.nrows().max(1) as f32;
    x.sum_axis(ndarray::Axis(0)) / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_softmax_rows_sum_to_one() {
        let mut scores = array![[1.0_f32, 2.0, 3.0], [0.0, 0.0, 0.0]];
        softmax_rows(&mut scores);
        for row in scores.rows() {
            assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-5);
        }
        // Uniform scores give uniform weights.
        assert_relative_eq!(scores[[1, 0]], 1.0 / 3.0, epsilon = 1e-5);
    }

    #[test]
    fn test_forward_shape_and_range() {
        let block = SelfAttention::new(4);
        let x = Array2::<f32>::ones((3, 4));
        let out = block.forward(&x);
        assert_eq!(out.dim(), (3, 4));
        // tanh output stays in (-1, 1)
        assert!(out.iter().all(|v| v.abs() <= 1.0 && v.is_finite()));
    }

    #[test]
    fn test_mean_pool() {
        let x = array![[1.0_f32, 2.0], [3.0, 4.0]];
        let pooled = mean_pool(&x);
        assert_relative_eq!(pooled[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(pooled[1], 3.0, epsilon = 1e-6);
    }
}
