use crate::errors::{MrfError, Result};
use crate::utils::l2_distance;

/// Relative weight a source node assigns to the destination being in state 0 or 1.
pub type Message = [f64; 2];

/// Uniform message every edge starts from.
pub const UNIFORM_MESSAGE: Message = [0.5, 0.5];

/// Directional messages along a chain of `num_nodes` nodes.
///
/// NB edge `i` joins node `i` and node `i + 1`; `rightward[i]` holds the message
///    `i -> i + 1` and `leftward[i]` holds `i + 1 -> i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Messages {
    num_nodes: usize,
    rightward: Vec<Message>,
    leftward: Vec<Message>,
}

impl Messages {
    /// Every directional message set to `[0.5, 0.5]`.
    pub fn uniform(num_nodes: usize) -> Self {
        let num_edges = num_nodes.saturating_sub(1);

        Self {
            num_nodes,
            rightward: vec![UNIFORM_MESSAGE; num_edges],
            leftward: vec![UNIFORM_MESSAGE; num_edges],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of directional messages, two per edge.
    pub fn len(&self) -> usize {
        self.rightward.len() + self.leftward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, source: usize, dest: usize) -> Result<(bool, usize)> {
        if source >= self.num_nodes || dest >= self.num_nodes {
            return Err(MrfError::edge(source, dest, self.num_nodes));
        }

        if dest == source + 1 {
            Ok((true, source))
        } else if source == dest + 1 {
            Ok((false, dest))
        } else {
            Err(MrfError::edge(source, dest, self.num_nodes))
        }
    }

    /// Message sent from `source` to the adjacent node `dest`.
    pub fn get(&self, source: usize, dest: usize) -> Result<Message> {
        let (rightward, edge) = self.slot(source, dest)?;

        Ok(if rightward {
            self.rightward[edge]
        } else {
            self.leftward[edge]
        })
    }

    pub fn set(&mut self, source: usize, dest: usize, message: Message) -> Result<()> {
        let (rightward, edge) = self.slot(source, dest)?;

        if rightward {
            self.rightward[edge] = message;
        } else {
            self.leftward[edge] = message;
        }
        Ok(())
    }

    /// Message arriving at `node` from its left neighbour, if it has one.
    pub fn from_left(&self, node: usize) -> Option<Message> {
        node.checked_sub(1).and_then(|edge| self.rightward.get(edge).copied())
    }

    /// Message arriving at `node` from its right neighbour, if it has one.
    pub fn from_right(&self, node: usize) -> Option<Message> {
        self.leftward.get(node).copied()
    }

    /// All `(source, dest, message)` triples, edge by edge, rightward first.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Message)> + '_ {
        self.rightward
            .iter()
            .zip(self.leftward.iter())
            .enumerate()
            .flat_map(|(i, (&right, &left))| [(i, i + 1, right), (i + 1, i, left)])
    }

    /// Sum over every directional message of the L2 distance to its counterpart.
    pub fn distance(&self, other: &Messages) -> Result<f64> {
        if self.num_nodes != other.num_nodes {
            return Err(MrfError::InvalidInput(format!(
                "message maps cover {} and {} nodes",
                self.num_nodes, other.num_nodes
            )));
        }

        let right: f64 = self
            .rightward
            .iter()
            .zip(other.rightward.iter())
            .map(|(a, b)| l2_distance(a, b))
            .sum();

        let left: f64 = self
            .leftward
            .iter()
            .zip(other.leftward.iter())
            .map(|(a, b)| l2_distance(a, b))
            .sum();

        Ok(right + left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        let messages = Messages::uniform(4);

        assert_eq!(messages.len(), 6);
        assert!(messages.iter().all(|(_, _, m)| m == UNIFORM_MESSAGE));

        let keys: Vec<(usize, usize)> = messages.iter().map(|(s, d, _)| (s, d)).collect();
        assert_eq!(keys, vec![(0, 1), (1, 0), (1, 2), (2, 1), (2, 3), (3, 2)]);
    }

    #[test]
    fn test_single_node_has_no_messages() {
        let messages = Messages::uniform(1);

        assert!(messages.is_empty());
        assert_eq!(messages.from_left(0), None);
        assert_eq!(messages.from_right(0), None);
    }

    #[test]
    fn test_get_set_direction() {
        let mut messages = Messages::uniform(3);
        messages.set(1, 2, [0.2, 0.8]).unwrap();
        messages.set(2, 1, [0.7, 0.3]).unwrap();

        assert_eq!(messages.get(1, 2).unwrap(), [0.2, 0.8]);
        assert_eq!(messages.get(2, 1).unwrap(), [0.7, 0.3]);
        assert_eq!(messages.get(0, 1).unwrap(), UNIFORM_MESSAGE);

        // NB node 2 hears from node 1 on its left, node 1 hears from node 2 on its right.
        assert_eq!(messages.from_left(2), Some([0.2, 0.8]));
        assert_eq!(messages.from_right(1), Some([0.7, 0.3]));
        assert_eq!(messages.from_right(2), None);
    }

    #[test]
    fn test_non_adjacent() {
        let messages = Messages::uniform(3);

        assert!(matches!(messages.get(0, 2), Err(MrfError::InvalidIndex { .. })));
        assert!(matches!(messages.get(1, 1), Err(MrfError::InvalidIndex { .. })));
        assert!(matches!(messages.get(2, 3), Err(MrfError::InvalidIndex { .. })));
    }

    #[test]
    fn test_distance() {
        let a = Messages::uniform(3);
        let mut b = Messages::uniform(3);
        assert_eq!(a.distance(&b).unwrap(), 0.0);

        b.set(0, 1, [0.5, 0.5 + 0.3]).unwrap();
        b.set(2, 1, [0.5 - 0.4, 0.5]).unwrap();
        assert!((a.distance(&b).unwrap() - 0.7).abs() < 1e-12);

        assert!(a.distance(&Messages::uniform(4)).is_err());
    }
}
