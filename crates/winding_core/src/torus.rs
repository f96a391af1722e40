use crate::traits::Scalar;
use serde::{Deserialize, Serialize};

/// Floor-based remainder into [0,1).
///
/// `v - v.floor()` lands in the closed interval [0,1]: for a tiny negative
/// input the subtraction rounds to exactly 1.0, which must re-wrap to 0.0
/// so the half-open invariant holds. 0.0 is the canonical representative
/// of the wrap class.
pub fn wrap_unit<T: Scalar>(value: T) -> T {
    let wrapped = value - value.floor();
    if wrapped >= T::one() {
        wrapped - T::one()
    } else {
        wrapped
    }
}

/// Advances `state` by `velocity` under modulo-1 arithmetic, in place.
///
/// Coordinates with an exactly-zero velocity component are skipped, so a
/// frozen coordinate can never pick up representable drift. The wrap from
/// near 1 back to near 0 is the deliberate discontinuity of the torus
/// topology and is never smoothed.
///
/// Callers are responsible for `state` and `velocity` having equal length.
pub fn step_in_place<T: Scalar>(state: &mut [T], velocity: &[T]) {
    for i in 0..state.len() {
        if velocity[i] != T::zero() {
            state[i] = wrap_unit(state[i] + velocity[i]);
        }
    }
}

/// A point on the unit torus. Every coordinate lies in [0,1); coordinates
/// are wrapped at construction and after every step, never allowed to
/// drift outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TorusPoint {
    coords: Vec<f64>,
}

impl TorusPoint {
    /// Wraps the supplied coordinates onto the torus.
    pub fn new(coords: Vec<f64>) -> Self {
        let coords = coords.into_iter().map(wrap_unit).collect();
        Self { coords }
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// The point one tick ahead under `velocity`, leaving `self` untouched.
    pub fn stepped(&self, velocity: &[f64]) -> TorusPoint {
        let mut coords = self.coords.clone();
        step_in_place(&mut coords, velocity);
        TorusPoint { coords }
    }
}

#[cfg(test)]
mod tests {
    use super::{step_in_place, wrap_unit, TorusPoint};

    #[test]
    fn wrap_unit_handles_negative_and_overshoot() {
        assert!((wrap_unit(1.25_f64) - 0.25).abs() < 1e-12);
        assert!((wrap_unit(-0.25_f64) - 0.75).abs() < 1e-12);
        assert_eq!(wrap_unit(0.0_f64), 0.0);
        assert_eq!(wrap_unit(1.0_f64), 0.0);
        assert_eq!(wrap_unit(-3.0_f64), 0.0);
    }

    #[test]
    fn wrap_unit_rewraps_rounding_at_the_seam() {
        // -1e-18 - floor(-1e-18) rounds to exactly 1.0 in f64.
        let wrapped = wrap_unit(-1e-18_f64);
        assert_eq!(wrapped, 0.0);
        assert!((0.0..1.0).contains(&wrapped));
    }

    #[test]
    fn step_stays_on_the_torus() {
        let mut state = vec![0.9, 0.1, 0.5];
        let velocity = vec![0.3, -0.4, 2.7];
        for _ in 0..1000 {
            step_in_place(&mut state, &velocity);
            assert!(state.iter().all(|x| (0.0..1.0).contains(x)));
        }
    }

    #[test]
    fn step_wraps_across_the_seam() {
        let mut state = vec![0.98_f64, 0.0];
        step_in_place(&mut state, &[0.05, 0.0]);
        assert!((state[0] - 0.03).abs() < 1e-9);
        assert!(state[1].abs() < 1e-9);
    }

    #[test]
    fn zero_velocity_is_the_identity() {
        let mut state = vec![0.3, 0.707_106_781_186_547_6];
        let before = state.clone();
        step_in_place(&mut state, &[0.0, 0.0]);
        assert_eq!(state, before);
    }

    #[test]
    fn stepped_leaves_the_original_point_unchanged() {
        let point = TorusPoint::new(vec![0.98, 0.0]);
        let next = point.stepped(&[0.05, 0.0]);
        assert!((next.coords()[0] - 0.03).abs() < 1e-9);
        assert_eq!(point.coords(), &[0.98, 0.0]);
    }

    #[test]
    fn torus_point_wraps_at_construction() {
        let point = TorusPoint::new(vec![1.5, -0.25]);
        assert!((point.coords()[0] - 0.5).abs() < 1e-12);
        assert!((point.coords()[1] - 0.75).abs() < 1e-12);
        assert_eq!(point.dimension(), 2);
    }
}
