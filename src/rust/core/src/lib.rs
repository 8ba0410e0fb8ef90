// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Muscle Fatigue Calibration Core
// Per-muscle MVC and fatigue-rate estimation from isometric joint trials
//

pub mod calibration_kernel;
pub mod config;
pub mod error;
pub mod formulas;
pub mod science;
#[cfg(test)]
pub mod tests_calibration;

// Re-export core types
pub use calibration_kernel::{CalibrationKernel, CalibrationResponse, ValidationEvent};
pub use config::{CalibrationConfig, FailurePolicy};
pub use error::{CalibrationError, MuscleTable, Result};
pub use science::{
    CalibrationAggregator, CalibrationRecord, CalibrationRun, JointTorqueSolver, Motion,
    MotionCatalog, MuscleFatigueRatioCalculator, MuscleMvcDistributor, MuscleParameter,
    MuscleParameterSet,
};
