// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What a run does when one motion fails after its motion was resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Any failure aborts the whole run.
    #[default]
    Abort,
    /// Drop the failing motion's candidates and continue with the next record.
    /// An unknown motion still aborts.
    SkipMotion,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Starting point of the Newton-Raphson search (N·m).
    pub initial_guess: f64,
    /// Relative step size below which the torque is considered converged.
    pub tolerance: f64,
    /// Hard cap on Newton-Raphson iterations.
    pub max_iterations: usize,
    pub failure_policy: FailurePolicy,
    /// Fatigue coefficients above this (or not positive) raise a range warning.
    pub max_typical_fatigue_coefficient: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.1,
            tolerance: 1e-9,
            max_iterations: 100,
            failure_policy: FailurePolicy::Abort,
            max_typical_fatigue_coefficient: 5.0,
        }
    }
}

impl CalibrationConfig {
    /// Parse a config, filling omitted fields with defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
