//! Graph convolution model components.

mod attention;
mod encoder;
mod gcn;

pub use attention::{mean_pool, SelfAttention};
pub use encoder::{EncoderConfig, GcnEncoder};
pub use gcn::GraphConvolution;
