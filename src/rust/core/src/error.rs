// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT

//! Calibration error types.
//!
//! Every stage of the pipeline reports failure through [`CalibrationError`]
//! instead of sentinel values, so a computed torque or MVC can never be
//! mistaken for an error code.

use std::fmt;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CalibrationError>;

/// Per-muscle table of a calibration record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MuscleTable {
    MomentArms,
    ForceAtEndurance,
    AreaUnderForceCurve,
}

impl fmt::Display for MuscleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MomentArms => write!(f, "moment arms"),
            Self::ForceAtEndurance => write!(f, "forces at endurance"),
            Self::AreaUnderForceCurve => write!(f, "areas under force curve"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error("motion \"{motion}\" does not exist in the motion catalog")]
    UnknownMotion { motion: String },

    #[error("muscle \"{muscle}\" of motion \"{motion}\" is missing from the {table}")]
    UnknownMuscle {
        motion: String,
        muscle: String,
        table: MuscleTable,
    },

    #[error("max joint torque did not converge in {iterations} iterations (last estimate {last_estimate})")]
    ConvergenceFailure { iterations: usize, last_estimate: f64 },

    #[error(
        "force at endurance {force} and MVC {mvc} of muscle {} violate force < MVC",
        muscle_label(.index, .muscle)
    )]
    InvalidForceMvcRelation {
        index: usize,
        /// Filled in once the muscle ordering is known.
        muscle: Option<String>,
        force: f64,
        mvc: f64,
    },

    #[error("non-finite or undefined {quantity}: {value}")]
    NumericDomain { quantity: &'static str, value: f64 },

    #[error("invalid motion \"{motion}\": {reason}")]
    InvalidMotion { motion: String, reason: String },

    #[error("misaligned muscle sequences: {mvc} MVCs, {forces} forces, {areas} areas")]
    SequenceMismatch {
        mvc: usize,
        forces: usize,
        areas: usize,
    },

    #[error("calibration of motion \"{motion}\" failed: {source}")]
    Motion {
        motion: String,
        #[source]
        source: Box<CalibrationError>,
    },

    #[error("failed to parse calibration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn muscle_label(index: &usize, muscle: &Option<String>) -> String {
    match muscle {
        Some(name) => format!("\"{}\" (index {})", name, index),
        None => format!("index {}", index),
    }
}

impl CalibrationError {
    /// Tag a stage failure with the motion being calibrated.
    pub fn in_motion(self, motion: &str) -> Self {
        match self {
            // Already names its motion.
            Self::UnknownMotion { .. } | Self::UnknownMuscle { .. } | Self::Motion { .. } => self,
            other => Self::Motion {
                motion: motion.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying stage failure, with any motion tag peeled off.
    pub fn cause(&self) -> &CalibrationError {
        match self {
            Self::Motion { source, .. } => source.cause(),
            other => other,
        }
    }

    /// Short error code for events and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownMotion { .. } => "UNKNOWN_MOTION",
            Self::UnknownMuscle { .. } => "UNKNOWN_MUSCLE",
            Self::ConvergenceFailure { .. } => "CONVERGENCE_FAILURE",
            Self::InvalidForceMvcRelation { .. } => "INVALID_FORCE_MVC",
            Self::NumericDomain { .. } => "NUMERIC_DOMAIN",
            Self::InvalidMotion { .. } => "INVALID_MOTION",
            Self::SequenceMismatch { .. } => "SEQUENCE_MISMATCH",
            Self::Motion { source, .. } => source.code(),
            Self::Json(_) => "JSON",
        }
    }
}
