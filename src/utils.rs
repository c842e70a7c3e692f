use crate::errors::{MrfError, Result};

/// Divides a two-state vector by its L1 norm.  Entries are non-negative here,
/// so the norm is the plain sum; a zero or non-finite sum cannot be normalized.
pub fn l1_normalize(v: [f64; 2], context: impl FnOnce() -> String) -> Result<[f64; 2]> {
    let norm = v[0].abs() + v[1].abs();

    if norm == 0.0 || !norm.is_finite() {
        return Err(MrfError::DegenerateNormalization {
            context: context(),
            sum: norm,
        });
    }

    Ok([v[0] / norm, v[1] / norm])
}

/// Euclidean distance between two messages.
pub fn l2_distance(a: &[f64; 2], b: &[f64; 2]) -> f64 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];

    (d0 * d0 + d1 * d1).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_l1_normalize() {
        let v = l1_normalize([1.0, 3.0], || "test".to_string()).unwrap();
        assert_eq!(v, [0.25, 0.75]);
    }

    #[test]
    fn test_l1_normalize_zero() {
        let err = l1_normalize([0.0, 0.0], || "edge 0->1".to_string()).unwrap_err();
        assert!(matches!(err, MrfError::DegenerateNormalization { .. }));
    }

    #[test]
    fn test_l2_distance() {
        assert_eq!(l2_distance(&[0.5, 0.5], &[0.5, 0.5]), 0.0);
        assert!((l2_distance(&[1.0, 0.0], &[0.0, 1.0]) - 2f64.sqrt()).abs() < 1e-12);
    }
}
