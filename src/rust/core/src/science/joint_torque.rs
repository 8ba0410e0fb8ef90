// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// JointTorqueSolver: recovers the maximum isometric joint torque by inverting
// the joint endurance model T_met = τ_max · exp(-λF · A / τ_max).

use log::{debug, trace};

use super::motions::MotionCatalog;
use crate::config::CalibrationConfig;
use crate::error::{CalibrationError, Result};
use crate::formulas::{endurance_residual, endurance_residual_derivative};

#[derive(Clone, Debug)]
pub struct JointTorqueSolver {
    initial_guess: f64,
    tolerance: f64,
    max_iterations: usize,
}

impl Default for JointTorqueSolver {
    fn default() -> Self {
        Self::new(&CalibrationConfig::default())
    }
}

impl JointTorqueSolver {
    pub fn new(config: &CalibrationConfig) -> JointTorqueSolver {
        JointTorqueSolver {
            initial_guess: config.initial_guess,
            tolerance: config.tolerance,
            max_iterations: config.max_iterations,
        }
    }

    /// Newton-Raphson root of f(x) = ln(T/x) + λF·A/x.
    ///
    /// Converged when |x_{n+1} - x_n| / |x_n| drops below the tolerance.
    /// A vanishing derivative or a non-finite iterate is reported as
    /// `NumericDomain` instead of being iterated on.
    pub fn solve_max_torque(
        &self,
        fatigue_ratio: f64,
        torque_at_endurance: f64,
        area_under_torque_curve: f64,
    ) -> Result<f64> {
        let mut x = self.initial_guess;

        for iteration in 1..=self.max_iterations {
            let slope = endurance_residual_derivative(x, area_under_torque_curve, fatigue_ratio);
            if slope == 0.0 || !slope.is_finite() {
                return Err(CalibrationError::NumericDomain {
                    quantity: "endurance residual derivative",
                    value: slope,
                });
            }

            let residual =
                endurance_residual(x, torque_at_endurance, area_under_torque_curve, fatigue_ratio);
            let next = x - residual / slope;
            if !next.is_finite() {
                return Err(CalibrationError::NumericDomain {
                    quantity: "joint torque iterate",
                    value: next,
                });
            }
            trace!("newton step {}: {} -> {}", iteration, x, next);

            if (next - x).abs() / x.abs() < self.tolerance {
                debug!(
                    "max joint torque converged to {:.4} after {} iterations",
                    next, iteration
                );
                return Ok(next);
            }
            x = next;
        }

        Err(CalibrationError::ConvergenceFailure {
            iterations: self.max_iterations,
            last_estimate: x,
        })
    }

    /// Solve using the fatigue ratio of a catalogued motion.
    pub fn solve_for_motion(
        &self,
        catalog: &MotionCatalog,
        motion_name: &str,
        torque_at_endurance: f64,
        area_under_torque_curve: f64,
    ) -> Result<f64> {
        let motion = catalog.lookup(motion_name)?;
        self.solve_max_torque(motion.fatigue_ratio, torque_at_endurance, area_under_torque_curve)
    }
}
