use std::fmt;

use crate::{
    constants::{Degree, DEFAULT_INITIAL_CAPACITY, DEFAULT_RATIO, MIN_CAPACITY},
    squish_errors::SquishError,
};

/// Configuration of a SQUISH-E reduction run.
///
/// Fields
/// -----------------
/// * `initial_capacity` – working-set capacity before any growth (≥ 3).
/// * `ratio` – number of ingested points per unit of capacity growth (> 0).
///   After `k` points have been ingested the capacity is at least
///   `initial_capacity + ⌊k / ratio⌋`.
/// * `epsilon` – post-pass error budget, in the coordinate units of the input (degrees).
///   Interior points whose priority does not exceed it are removed once the input is consumed.
///
/// Defaults
/// -----------------
/// * `initial_capacity`: 4
/// * `ratio`: 1.0
/// * `epsilon`: 0.0
///
/// ```rust
/// use trajsquish::squish_e::SquishParams;
///
/// let params = SquishParams::builder()
///     .initial_capacity(8)
///     .ratio(5.0)
///     .epsilon(1e-5)
///     .build()
///     .unwrap();
/// assert_eq!(params.initial_capacity, 8);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SquishParams {
    pub initial_capacity: usize,
    pub ratio: f64,
    pub epsilon: Degree,
}

impl SquishParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a [`SquishParamsBuilder`] initialised with the defaults.
    pub fn builder() -> SquishParamsBuilder {
        SquishParamsBuilder::new()
    }

    /// Check the run preconditions: `initial_capacity ≥ 3`, `ratio` finite and `> 0`,
    /// `epsilon` finite and `≥ 0`.
    pub fn validate(&self) -> Result<(), SquishError> {
        if self.initial_capacity < MIN_CAPACITY {
            return Err(SquishError::InvalidParameter(format!(
                "initial_capacity must be >= {MIN_CAPACITY}"
            )));
        }
        if !(self.ratio.is_finite() && self.ratio > 0.0) {
            return Err(SquishError::InvalidParameter(
                "ratio must be finite and > 0".into(),
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(SquishError::InvalidParameter(
                "epsilon must be finite and >= 0".into(),
            ));
        }
        Ok(())
    }

    /// Capacity floor once `ingested` points have been consumed.
    pub(crate) fn capacity_after(&self, ingested: usize) -> usize {
        let growth = (ingested as f64 / self.ratio).floor() as usize;
        self.initial_capacity.saturating_add(growth)
    }
}

impl Default for SquishParams {
    fn default() -> Self {
        SquishParams {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            ratio: DEFAULT_RATIO,
            epsilon: 0.0,
        }
    }
}

/// Builder for [`SquishParams`], with validation.
#[derive(Debug, Clone)]
pub struct SquishParamsBuilder {
    params: SquishParams,
}

impl Default for SquishParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SquishParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: SquishParams::default(),
        }
    }

    pub fn initial_capacity(mut self, v: usize) -> Self {
        self.params.initial_capacity = v;
        self
    }

    pub fn ratio(mut self, v: f64) -> Self {
        self.params.ratio = v;
        self
    }

    pub fn epsilon(mut self, v: Degree) -> Self {
        self.params.epsilon = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Return
    /// ----------
    /// * `Ok(SquishParams)` when `initial_capacity ≥ 3`, `ratio` is finite and `> 0`,
    ///   and `epsilon` is finite and `≥ 0`.
    /// * `Err(SquishError::InvalidParameter)` otherwise.
    pub fn build(self) -> Result<SquishParams, SquishError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

impl fmt::Display for SquishParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            writeln!(f, "SQUISH-E parameters")?;
            writeln!(
                f,
                "  initial_capacity = {:<12} Working-set size before growth",
                self.initial_capacity
            )?;
            writeln!(
                f,
                "  ratio            = {:<12} Ingested points per capacity step",
                self.ratio
            )?;
            write!(
                f,
                "  epsilon          = {:<12.3e} Post-pass error budget (deg)",
                self.epsilon
            )
        } else {
            write!(
                f,
                "SquishParams(initial_capacity={}, ratio={}, epsilon={:.3e})",
                self.initial_capacity, self.ratio, self.epsilon
            )
        }
    }
}
