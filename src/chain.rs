use log::{debug, info, warn};

use crate::config::InferenceConfig;
use crate::errors::{MrfError, Result};
use crate::messages::{Message, Messages};
use crate::utils::l1_normalize;

/// Shared 2x2 compatibility table, `table[a][b]` for source state `a` and target state `b`.
pub type Pairwise = [[f64; 2]; 2];

/// A binary latent variable; `prior` is the probability of state 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub label: String,
    pub prior: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferenceStatus {
    /// Summed message change fell to the tolerance.
    Converged,
    /// Iteration cap reached first; the messages are an accepted approximation.
    MaxIterReached,
}

/// Outcome of one run of the message-passing loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Inference {
    pub messages: Messages,
    pub iterations: usize,
    pub distance: f64,
    pub status: InferenceStatus,
}

/// Pairwise Markov random field over a chain of binary variables, with one
/// potential shared by every edge.
#[derive(Debug, Clone)]
pub struct ChainMRF {
    nodes: Vec<Node>,
    pairwise: Pairwise,
    config: InferenceConfig,
}

impl ChainMRF {
    /// Builds a chain from parallel label and prior sequences.
    pub fn new<S: Into<String>>(labels: Vec<S>, priors: &[f64], pairwise: Pairwise) -> Result<Self> {
        if labels.len() != priors.len() {
            return Err(MrfError::InvalidInput(format!(
                "{} labels but {} priors",
                labels.len(),
                priors.len()
            )));
        }

        let nodes = labels
            .into_iter()
            .zip(priors.iter())
            .map(|(label, &prior)| Node {
                label: label.into(),
                prior,
            })
            .collect();

        Self::from_nodes(nodes, pairwise)
    }

    pub fn from_nodes(nodes: Vec<Node>, pairwise: Pairwise) -> Result<Self> {
        if nodes.is_empty() {
            return Err(MrfError::InvalidInput("chain has no nodes".to_string()));
        }

        for (idx, node) in nodes.iter().enumerate() {
            if !(0.0..=1.0).contains(&node.prior) {
                return Err(MrfError::InvalidInput(format!(
                    "prior {} of node {} ({}) is outside [0, 1]",
                    node.prior, idx, node.label
                )));
            }
        }

        for row in &pairwise {
            for &value in row {
                if !value.is_finite() || value < 0.0 {
                    return Err(MrfError::InvalidInput(format!(
                        "pairwise potential entry {value} is not a non-negative number"
                    )));
                }
            }
        }

        Ok(Self {
            nodes,
            pairwise,
            config: InferenceConfig::default(),
        })
    }

    /// Builds a chain from a nested pairwise table, rejecting anything but 2x2.
    pub fn from_table<S: Into<String>>(labels: Vec<S>, priors: &[f64], table: &[Vec<f64>]) -> Result<Self> {
        if table.len() != 2 || table.iter().any(|row| row.len() != 2) {
            return Err(MrfError::InvalidInput(
                "pairwise potential must be a 2x2 matrix".to_string(),
            ));
        }

        Self::new(labels, priors, [[table[0][0], table[0][1]], [table[1][0], table[1][1]]])
    }

    pub fn with_config(mut self, config: InferenceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.label.as_str())
    }

    fn node(&self, idx: usize) -> Result<&Node> {
        self.nodes.get(idx).ok_or(MrfError::node(idx, self.nodes.len()))
    }

    pub fn label(&self, idx: usize) -> Result<&str> {
        Ok(self.node(idx)?.label.as_str())
    }

    pub fn prior(&self, idx: usize) -> Result<f64> {
        Ok(self.node(idx)?.prior)
    }

    /// Univariate potential `[1 - prior, prior]` of node `idx`.
    pub fn univariate(&self, idx: usize) -> Result<[f64; 2]> {
        let prior = self.node(idx)?.prior;
        Ok([1.0 - prior, prior])
    }

    /// Univariate potential of node `idx` evaluated at a single state.
    pub fn univariate_value(&self, idx: usize, state: usize) -> Result<f64> {
        let potential = self.univariate(idx)?;

        potential
            .get(state)
            .copied()
            .ok_or(MrfError::state(state, None))
    }

    /// The pairwise potential; every edge shares it.
    pub fn pairwise(&self) -> &Pairwise {
        &self.pairwise
    }

    /// Pairwise potential of edge `source -> dest` at source state `a`, target state `b`.
    pub fn pairwise_value(&self, source: usize, dest: usize, a: usize, b: usize) -> Result<f64> {
        self.check_edge(source, dest)?;

        if a > 1 || b > 1 {
            return Err(MrfError::state(a, Some(b)));
        }

        Ok(self.pairwise[a][b])
    }

    fn check_edge(&self, source: usize, dest: usize) -> Result<()> {
        let n = self.nodes.len();

        if source >= n || dest >= n || source.abs_diff(dest) != 1 {
            return Err(MrfError::edge(source, dest, n));
        }
        Ok(())
    }

    fn check_messages(&self, messages: &Messages) -> Result<()> {
        if messages.num_nodes() != self.nodes.len() {
            return Err(MrfError::InvalidInput(format!(
                "message map covers {} nodes, chain has {}",
                messages.num_nodes(),
                self.nodes.len()
            )));
        }
        Ok(())
    }

    /// Both directions of every edge at `[0.5, 0.5]`.
    pub fn initial_messages(&self) -> Messages {
        Messages::uniform(self.nodes.len())
    }

    /// Prior of `idx` multiplied by the messages it receives from its neighbours.
    fn gather(&self, idx: usize, messages: &Messages) -> Result<[f64; 2]> {
        let mut acc = self.univariate(idx)?;

        for incoming in [messages.from_left(idx), messages.from_right(idx)].into_iter().flatten() {
            acc[0] *= incoming[0];
            acc[1] *= incoming[1];
        }
        Ok(acc)
    }

    /// Message from `source` to the adjacent node `dest`, computed from `messages`.
    ///
    /// NB every message arriving at `source` is folded in, including the one from `dest`
    ///    itself.  Canonical sum-product would leave that one out; this flooding variant
    ///    keeps it, so beliefs on a chain are approximate rather than exact.
    pub fn compute_message(&self, source: usize, dest: usize, messages: &Messages) -> Result<Message> {
        self.check_edge(source, dest)?;
        self.check_messages(messages)?;

        let incoming = self.gather(source, messages)?;
        let mut out = [0.0; 2];

        for (t, sum) in out.iter_mut().enumerate() {
            for (s, &weight) in incoming.iter().enumerate() {
                *sum += weight * self.pairwise[s][t];
            }
        }

        l1_normalize(out, || format!("message {source} -> {dest}"))
    }

    /// Runs synchronous message passing and returns the final messages.
    pub fn run_inference(&self, messages: Option<Messages>) -> Result<Messages> {
        Ok(self.infer(messages)?.messages)
    }

    /// Runs synchronous message passing, reporting how the loop terminated.
    ///
    /// Every message of an iteration is computed from the previous iteration's map;
    /// the loop stops once the summed L2 change is at most `tolerance` or after
    /// `max_iters` iterations, whichever comes first.
    pub fn infer(&self, messages: Option<Messages>) -> Result<Inference> {
        let InferenceConfig { max_iters, tolerance } = self.config;
        let mut old = messages.unwrap_or_else(|| self.initial_messages());
        self.check_messages(&old)?;

        info!(
            "Solving belief propagation on {}-chain (max_iters={max_iters}, tol={tolerance:.1e})",
            self.nodes.len()
        );

        let mut distance = f64::INFINITY;
        let mut iterations = 0;

        while iterations < max_iters && distance > tolerance {
            let mut new = old.clone();

            for (source, dest, _) in old.iter() {
                new.set(source, dest, self.compute_message(source, dest, &old)?)?;
            }

            distance = new.distance(&old)?;
            old = new;
            iterations += 1;

            debug!("Belief propagation iteration {iterations}: distance={distance:.3e}");
        }

        let status = if distance <= tolerance {
            info!("Converged at iteration {iterations} with distance {distance:.3e}");
            InferenceStatus::Converged
        } else {
            warn!("Belief propagation terminated at max iterations ({iterations}), distance={distance:.3e}");
            InferenceStatus::MaxIterReached
        };

        Ok(Inference {
            messages: old,
            iterations,
            distance,
            status,
        })
    }

    /// Normalized belief of node `idx` given a message map.
    pub fn belief(&self, idx: usize, messages: &Messages) -> Result<[f64; 2]> {
        self.check_messages(messages)?;

        let acc = self.gather(idx, messages)?;
        l1_normalize(acc, || format!("belief of node {idx}"))
    }

    /// Normalized beliefs of every node, in node order, given a message map.
    pub fn beliefs_from(&self, messages: &Messages) -> Result<Vec<[f64; 2]>> {
        self.check_messages(messages)?;

        (0..self.nodes.len())
            .map(|idx| self.belief(idx, messages))
            .collect()
    }

    /// Runs inference from uniform messages and returns one belief per node.
    pub fn beliefs(&self) -> Result<Vec<[f64; 2]>> {
        let messages = self.run_inference(None)?;
        self.beliefs_from(&messages)
    }
}
