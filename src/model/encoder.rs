//! Graph-convolution encoder: the numeric consumer of sub-word adjacency
//! matrices.

use ndarray::{concatenate, Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

use super::attention::{mean_pool, SelfAttention};
use super::gcn::GraphConvolution;

/// Encoder hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Transformer hidden size consumed and produced per node
    pub hidden_dim: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self { hidden_dim: 768 }
    }
}

/// Two-layer GCN over transformer hidden states, followed by self-attention
/// and mean pooling, whose result is fused with an externally pooled
/// representation. The classifier head on top of the fused vector is the
/// caller's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GcnEncoder {
    /// Configuration
    pub config: EncoderConfig,
    gcn1: GraphConvolution,
    gcn2: GraphConvolution,
    attention: SelfAttention,
}

impl GcnEncoder {
    /// Create an encoder with freshly initialized parameters.
    pub fn new(config: EncoderConfig) -> Self {
        let d = config.hidden_dim;
        Self {
            config,
            gcn1: GraphConvolution::new(d, d),
            gcn2: GraphConvolution::new(d, d),
            attention: SelfAttention::new(d),
        }
    }

    /// Node features after gcn1 → relu → gcn2 → relu → self-attention.
    ///
    /// `hidden_states` is [num_nodes, hidden_dim]; `adj` is the sub-word
    /// adjacency, [num_nodes, num_nodes]. Padded positions must be
    /// self-loop-only in `adj` so they cannot influence real nodes.
    pub fn encode_nodes(&self, hidden_states: &Array2<f32>, adj: &Array2<f32>) -> Array2<f32> {
        let x1 = relu(self.gcn1.forward(hidden_states, adj));
        let x2 = relu(self.gcn2.forward(&x1, adj));
        self.attention.forward(&x2)
    }

    /// Pooled graph feature fused with an external pooled representation.
    ///
    /// Returns the concatenation [pooled, graph_pooled] of length
    /// 2 × hidden_dim.
    pub fn forward(
        &self,
        hidden_states: &Array2<f32>,
        adj: &Array2<f32>,
        pooled: &Array1<f32>,
    ) -> Array1<f32> {
        let nodes = self.encode_nodes(hidden_states, adj);
        let graph_pooled = mean_pool(&nodes);
        concatenate(Axis(0), &[pooled.view(), graph_pooled.view()])
            .expect("pooled vectors have matching layout")
    }
}

fn relu(mut x: Array2<f32>) -> Array2<f32> {
    x.mapv_inplace(|v| v.max(0.0));
    x
}
