//! Sum-product belief propagation over chain-structured binary Markov random fields.

// NB declare the public modules.
pub mod chain;
pub mod config;
pub mod errors;
pub mod messages;
pub mod utils;

pub use chain::{ChainMRF, Inference, InferenceStatus, Node, Pairwise};
pub use config::{InferenceConfig, DEFAULT_MAX_ITERS, DEFAULT_TOLERANCE};
pub use errors::{MrfError, Result};
pub use messages::{Message, Messages, UNIFORM_MESSAGE};
