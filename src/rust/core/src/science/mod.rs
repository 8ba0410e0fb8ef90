// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
pub mod aggregator;
pub mod fatigue;
pub mod joint_torque;
pub mod motions;
pub mod mvc;
pub mod records;

pub use aggregator::{
    CalibrationAggregator, CalibrationRun, MergeOutcome, MotionCalibration, MuscleParameter,
    MuscleParameterSet, MuscleRow, SkippedMotion,
};
pub use fatigue::MuscleFatigueRatioCalculator;
pub use joint_torque::JointTorqueSolver;
pub use motions::{Motion, MotionCatalog};
pub use mvc::MuscleMvcDistributor;
pub use records::CalibrationRecord;
