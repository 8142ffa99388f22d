//! Bounding functions that map candidates back into feasible space.
//!
//! The engine applies the configured bounder to every offspring candidate
//! after the variator chain has run, so built-in variators can make only
//! minimal assumptions about candidate constraints.

use crate::args::Args;

/// Maps an out-of-range candidate back into feasible space.
pub trait Bounder<C> {
    /// Returns the bounded candidate.
    fn bound(&self, candidate: C, args: &Args) -> C;
}

/// Leaves candidates unchanged (the default).
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityBounder;

impl<C> Bounder<C> for IdentityBounder {
    fn bound(&self, candidate: C, _args: &Args) -> C {
        candidate
    }
}

/// Clamps each component of a real-vector candidate into `[lower, upper]`.
///
/// Bounds may be scalar (applied to every component) or per-component.
/// Components beyond the length of a per-component bound list are left
/// unclamped on that side.
///
/// # Examples
///
/// ```
/// use evoflow::args::Args;
/// use evoflow::ec::{Bounder, Bounds};
///
/// let bounds = Bounds::uniform(0.0, 1.0);
/// let bounded = bounds.bound(vec![0.2, -0.1, 1.3], &Args::new());
/// assert_eq!(bounded, vec![0.2, 0.0, 1.0]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
    scalar: bool,
}

impl Bounds {
    /// Applies the same `[lower, upper]` range to every component.
    pub fn uniform(lower: f64, upper: f64) -> Self {
        Self { lower: vec![lower], upper: vec![upper], scalar: true }
    }

    /// Applies per-component ranges.
    pub fn per_component(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        Self { lower, upper, scalar: false }
    }

    fn lower_at(&self, i: usize) -> Option<f64> {
        if self.scalar {
            Some(self.lower[0])
        } else {
            self.lower.get(i).copied()
        }
    }

    fn upper_at(&self, i: usize) -> Option<f64> {
        if self.scalar {
            Some(self.upper[0])
        } else {
            self.upper.get(i).copied()
        }
    }
}

impl Bounder<Vec<f64>> for Bounds {
    fn bound(&self, mut candidate: Vec<f64>, _args: &Args) -> Vec<f64> {
        for (i, c) in candidate.iter_mut().enumerate() {
            if let Some(lo) = self.lower_at(i) {
                *c = c.max(lo);
            }
            if let Some(hi) = self.upper_at(i) {
                *c = c.min(hi);
            }
        }
        candidate
    }
}

/// Resolves each component to the nearest value from a discrete legal set.
///
/// Ties go to the value appearing earliest in the list.
///
/// # Examples
///
/// ```
/// use evoflow::args::Args;
/// use evoflow::ec::{Bounder, DiscreteBounder};
///
/// let bounder = DiscreteBounder::new(vec![1.0, 4.0, 8.0, 16.0]);
/// let bounded = bounder.bound(vec![6.0, 0.0, 13.0], &Args::new());
/// assert_eq!(bounded, vec![4.0, 1.0, 16.0]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteBounder {
    values: Vec<f64>,
}

impl DiscreteBounder {
    /// Creates a bounder over the given legal values.
    ///
    /// # Panics
    /// Panics if `values` is empty.
    pub fn new(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "discrete bounder needs at least one legal value");
        Self { values }
    }

    fn closest(&self, target: f64) -> f64 {
        let mut best = self.values[0];
        let mut best_dist = (best - target).abs();
        for &v in &self.values[1..] {
            let d = (v - target).abs();
            if d < best_dist {
                best = v;
                best_dist = d;
            }
        }
        best
    }
}

impl Bounder<Vec<f64>> for DiscreteBounder {
    fn bound(&self, mut candidate: Vec<f64>, _args: &Args) -> Vec<f64> {
        for c in candidate.iter_mut() {
            *c = self.closest(*c);
        }
        candidate
    }
}
