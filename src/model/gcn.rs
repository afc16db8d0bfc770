//! Graph convolution layer.

use ndarray::{Array1, Array2, Axis};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};

/// Mean-aggregation graph convolution over a self-loop-inclusive
/// neighborhood.
///
/// Per layer: `hidden = x · W`, then each output row is
/// `(adj · hidden)[i] / (rowsum(adj)[i] + 1)` plus an optional bias. The
/// `+1` is a deliberate Laplacian-like smoothing term on top of the
/// self-loop already present in the adjacency; it must stay exactly as is
/// for compatibility with any model trained against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConvolution {
    /// Weight matrix (in_features x out_features)
    pub weight: Array2<f32>,
    /// Optional bias vector (out_features)
    pub bias: Option<Array1<f32>>,
}

impl GraphConvolution {
    /// Create a layer with Xavier-initialized weights and a zero bias.
    pub fn new(in_features: usize, out_features: usize) -> Self {
        let limit = (6.0 / (in_features + out_features) as f32).sqrt();
        let weight = Array2::random((in_features, out_features), Uniform::new(-limit, limit));
        Self {
            weight,
            bias: Some(Array1::zeros(out_features)),
        }
    }

    /// Create a layer without a bias term.
    pub fn without_bias(in_features: usize, out_features: usize) -> Self {
        let mut layer = Self::new(in_features, out_features);
        layer.bias = None;
        layer
    }

    /// Create a layer from explicit parameters.
    pub fn from_parameters(weight: Array2<f32>, bias: Option<Array1<f32>>) -> Self {
        Self { weight, bias }
    }

    /// Input feature dimension.
    pub fn in_features(&self) -> usize {
        self.weight.nrows()
    }

    /// Output feature dimension.
    pub fn out_features(&self) -> usize {
        self.weight.ncols()
    }

    /// Forward pass.
    ///
    /// # Arguments
    /// * `x` - Node features [num_nodes, in_features]
    /// * `adj` - Adjacency matrix [num_nodes, num_nodes]
    pub fn forward(&self, x: &Array2<f32>, adj: &Array2<f32>) -> Array2<f32> {
        let hidden = x.dot(&self.weight);
        let denom = adj.sum_axis(Axis(1)) + 1.0;
        let mut output = adj.dot(&hidden);
        for (mut row, d) in output.rows_mut().into_iter().zip(denom.iter()) {
            row /= *d;
        }
        if let Some(bias) = &self.bias {
            for mut row in output.rows_mut() {
                row += bias;
            }
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_single_node_denominator_is_two() {
        // Identity projection, no bias: output must be x / (1 + 1).
        let layer = GraphConvolution::from_parameters(Array2::eye(2), None);
        let x = array![[4.0_f32, 6.0]];
        let adj = array![[1.0_f32]];
        let out = layer.forward(&x, &adj);
        assert_relative_eq!(out[[0, 0]], 2.0, epsilon = 1e-6);
        assert_relative_eq!(out[[0, 1]], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_single_node_bias_added_after_division() {
        let layer =
            GraphConvolution::from_parameters(Array2::eye(1), Some(array![0.5_f32]));
        let x = array![[4.0_f32]];
        let adj = array![[1.0_f32]];
        let out = layer.forward(&x, &adj);
        assert_relative_eq!(out[[0, 0]], 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_aggregation_over_neighborhood() {
        // Two connected self-looped nodes: rowsum = 2, denom = 3.
        let layer = GraphConvolution::from_parameters(Array2::eye(1), None);
        let x = array![[3.0_f32], [6.0]];
        let adj = array![[1.0_f32, 1.0], [1.0, 1.0]];
        let out = layer.forward(&x, &adj);
        assert_relative_eq!(out[[0, 0]], 3.0, epsilon = 1e-6);
        assert_relative_eq!(out[[1, 0]], 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_isolated_padded_node_stays_isolated() {
        // Node 2 is self-loop-only padding; its output depends only on
        // itself and it never leaks into nodes 0 and 1.
        let layer = GraphConvolution::from_parameters(Array2::eye(1), None);
        let x = array![[1.0_f32], [2.0], [100.0]];
        let adj = array![
            [1.0_f32, 1.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 0.0, 1.0]
        ];
        let out = layer.forward(&x, &adj);
        assert_relative_eq!(out[[0, 0]], 1.0, epsilon = 1e-6);
        assert_relative_eq!(out[[1, 0]], 1.0, epsilon = 1e-6);
        assert_relative_eq!(out[[2, 0]], 50.0, epsilon = 1e-6);
    }

    #[test]
    fn test_output_shape() {
        let layer = GraphConvolution::new(8, 4);
        let x = Array2::<f32>::ones((5, 8));
        let adj = Array2::<f32>::eye(5);
        let out = layer.forward(&x, &adj);
        assert_eq!(out.dim(), (5, 4));
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
