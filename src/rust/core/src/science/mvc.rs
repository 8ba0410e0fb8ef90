// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
use std::collections::HashMap;

use super::motions::Motion;
use super::records::project_onto;
use crate::error::{CalibrationError, MuscleTable, Result};
use crate::formulas::reference_mvc;

pub struct MuscleMvcDistributor;

impl MuscleMvcDistributor {
    /// Σ proportion_i · moment_arm_i over the motion's muscles, in motion order.
    ///
    /// Fails with `InvalidMotion` when `motion` was built by hand with
    /// mismatched muscle and proportion lists.
    pub fn weighted_lever_sum(motion: &Motion, moment_arms: &HashMap<String, f64>) -> Result<f64> {
        motion.validate()?;
        let arms = project_onto(motion, moment_arms, MuscleTable::MomentArms)?;
        let mut sum = 0.0;
        for (proportion, arm) in motion.proportions.iter().zip(&arms) {
            sum += proportion * arm;
        }
        Ok(sum)
    }

    /// Splits the maximum joint torque into per-muscle MVC (N), parallel to
    /// `motion.muscles`.
    ///
    /// The reference muscle (proportion 1.0) gets τ_max / Σ(p_i · r_i); every
    /// other muscle gets that value scaled by its proportion.
    pub fn distribute(
        motion: &Motion,
        max_joint_torque: f64,
        moment_arms: &HashMap<String, f64>,
    ) -> Result<Vec<f64>> {
        let weighted_sum = Self::weighted_lever_sum(motion, moment_arms)?;
        if weighted_sum == 0.0 || !weighted_sum.is_finite() {
            return Err(CalibrationError::NumericDomain {
                quantity: "weighted moment-arm sum",
                value: weighted_sum,
            });
        }

        let reference = reference_mvc(max_joint_torque, weighted_sum);
        if !reference.is_finite() {
            return Err(CalibrationError::NumericDomain {
                quantity: "reference muscle MVC",
                value: reference,
            });
        }

        Ok(motion.proportions.iter().map(|p| reference * p).collect())
    }
}
