//! Error types for chain belief propagation.

use thiserror::Error;

/// Errors raised while building a chain or running inference over it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MrfError {
    /// A node index outside `[0, n)`, a message between non-adjacent nodes, or a
    /// state outside `{0, 1}`.
    #[error("invalid {what} index: source={source_idx}, dest={dest_idx:?}, bound={bound}")]
    InvalidIndex {
        what: &'static str,
        source_idx: usize,
        dest_idx: Option<usize>,
        bound: usize,
    },

    /// Construction-time validation failure.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A message or belief whose entries sum to zero (or to a non-finite value).
    #[error("degenerate normalization at {context}: sum={sum}")]
    DegenerateNormalization { context: String, sum: f64 },
}

pub type Result<T> = std::result::Result<T, MrfError>;

impl MrfError {
    pub(crate) fn node(idx: usize, num_nodes: usize) -> Self {
        MrfError::InvalidIndex {
            what: "node",
            source_idx: idx,
            dest_idx: None,
            bound: num_nodes,
        }
    }

    pub(crate) fn edge(source: usize, dest: usize, num_nodes: usize) -> Self {
        MrfError::InvalidIndex {
            what: "edge",
            source_idx: source,
            dest_idx: Some(dest),
            bound: num_nodes,
        }
    }

    pub(crate) fn state(a: usize, b: Option<usize>) -> Self {
        MrfError::InvalidIndex {
            what: "state",
            source_idx: a,
            dest_idx: b,
            bound: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = MrfError::edge(0, 2, 3);
        assert_eq!(
            err.to_string(),
            "invalid edge index: source=0, dest=Some(2), bound=3"
        );

        let err = MrfError::state(3, None);
        assert_eq!(err.to_string(), "invalid state index: source=3, dest=None, bound=2");

        let err = MrfError::InvalidInput("empty chain".to_string());
        assert_eq!(err.to_string(), "invalid input: empty chain");
    }
}
