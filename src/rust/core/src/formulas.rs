// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//! Fatigue-Endurance Formulas for Isometric Calibration
//!
//! These are pure mathematical functions operating on scalar values.
//! The calibration engines in `science` compose them and add the domain
//! guards; nothing here checks its inputs.
//!
//! Model:
//! - Joint endurance: T_met = τ_max · exp(-λF · A / τ_max)
//! - Muscle endurance: F_met = MVC · exp(-λF_m · A_m / MVC)

use wasm_bindgen::prelude::*;

// ============================================================================
// JOINT ENDURANCE MODEL
// ============================================================================

/// Endurance residual whose root is the maximum joint torque
///
/// f(x) = ln(T / x) + λF · A / x
///
/// # Arguments
/// * `x` - Candidate maximum joint torque (N·m)
/// * `torque_at_endurance` - Joint torque measured at the endurance limit (N·m)
/// * `area_under_torque` - Accumulated torque × time until the endurance limit (N·m·s)
/// * `fatigue_ratio` - Joint fatigue ratio λF
#[wasm_bindgen]
pub fn endurance_residual(
    x: f64,
    torque_at_endurance: f64,
    area_under_torque: f64,
    fatigue_ratio: f64,
) -> f64 {
    (torque_at_endurance / x).ln() + fatigue_ratio * area_under_torque / x
}

/// Analytic derivative of [`endurance_residual`] with respect to `x`
///
/// f'(x) = -(1/x + λF · A / x²)
#[wasm_bindgen]
pub fn endurance_residual_derivative(x: f64, area_under_torque: f64, fatigue_ratio: f64) -> f64 {
    -(1.0 / x + fatigue_ratio * area_under_torque / (x * x))
}

// ============================================================================
// MUSCLE DISTRIBUTION
// ============================================================================

/// MVC of the reference muscle (proportion 1.0)
///
/// MVC_ref = τ_max / Σ(p_i · r_i)
#[wasm_bindgen]
pub fn reference_mvc(max_joint_torque: f64, weighted_lever_sum: f64) -> f64 {
    max_joint_torque / weighted_lever_sum
}

/// Fatigue-rate coefficient of a single muscle
///
/// λF_m = -ln(F_met / MVC) · MVC / A_m
///
/// # Arguments
/// * `force_at_endurance` - Muscle force at the endurance limit (N)
/// * `mvc` - Maximum voluntary contraction of the muscle (N)
/// * `area_under_force` - Accumulated force × time until the endurance limit (N·s)
#[wasm_bindgen]
pub fn muscle_fatigue_ratio(force_at_endurance: f64, mvc: f64, area_under_force: f64) -> f64 {
    -(force_at_endurance / mvc).ln() * mvc / area_under_force
}

// ============================================================================
// TESTS
// ============================================================================
