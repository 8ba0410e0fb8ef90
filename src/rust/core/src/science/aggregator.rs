// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// CalibrationAggregator: runs torque inversion, MVC distribution and fatigue
// ratio computation for every calibration record, then merges the per-muscle
// candidates into one parameter set.

use std::collections::BTreeMap;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};

use super::fatigue::MuscleFatigueRatioCalculator;
use super::joint_torque::JointTorqueSolver;
use super::motions::MotionCatalog;
use super::mvc::MuscleMvcDistributor;
use super::records::CalibrationRecord;
use crate::config::{CalibrationConfig, FailurePolicy};
use crate::error::{CalibrationError, MuscleTable, Result};

/// Calibrated parameters of one muscle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleParameter {
    /// Maximum voluntary contraction (N).
    pub mvc: f64,
    pub fatigue_coefficient: f64,
    /// Motion whose trial produced this estimate.
    pub motion: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    Replaced,
    Kept,
}

/// Muscle name → parameters, keeping the highest-MVC estimate per muscle.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MuscleParameterSet {
    entries: BTreeMap<String, MuscleParameter>,
}

impl MuscleParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a candidate, or replace the existing entry when the candidate's
    /// MVC is strictly higher. MVC and fatigue coefficient are always swapped
    /// together.
    pub fn merge(&mut self, muscle: &str, candidate: MuscleParameter) -> MergeOutcome {
        match self.entries.get_mut(muscle) {
            None => {
                self.entries.insert(muscle.to_string(), candidate);
                MergeOutcome::Inserted
            }
            Some(existing) if candidate.mvc > existing.mvc => {
                *existing = candidate;
                MergeOutcome::Replaced
            }
            Some(_) => MergeOutcome::Kept,
        }
    }

    pub fn get(&self, muscle: &str) -> Option<&MuscleParameter> {
        self.entries.get(muscle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MuscleParameter)> {
        self.entries.iter()
    }

    pub fn into_map(self) -> BTreeMap<String, MuscleParameter> {
        self.entries
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuscleRow {
    pub muscle: String,
    pub mvc: f64,
    pub fatigue_coefficient: f64,
}

/// Everything one calibration trial yields before merging.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionCalibration {
    pub motion: String,
    pub max_joint_torque: f64,
    pub muscles: Vec<MuscleRow>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedMotion {
    pub motion: String,
    pub code: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationRun {
    pub parameters: MuscleParameterSet,
    pub motions: Vec<MotionCalibration>,
    pub skipped: Vec<SkippedMotion>,
}

pub struct CalibrationAggregator {
    solver: JointTorqueSolver,
    failure_policy: FailurePolicy,
}

impl Default for CalibrationAggregator {
    fn default() -> Self {
        Self::new(&CalibrationConfig::default())
    }
}

impl CalibrationAggregator {
    pub fn new(config: &CalibrationConfig) -> CalibrationAggregator {
        CalibrationAggregator {
            solver: JointTorqueSolver::new(config),
            failure_policy: config.failure_policy,
        }
    }

    /// Pipeline for a single record: solve torque, distribute MVC, compute
    /// fatigue ratios. Shares no state with other records.
    pub fn calibrate_motion(
        &self,
        catalog: &MotionCatalog,
        record: &CalibrationRecord,
    ) -> Result<MotionCalibration> {
        let motion = catalog.lookup(&record.motion_name)?;
        let name = motion.name.as_str();

        let max_joint_torque = self
            .solver
            .solve_max_torque(
                motion.fatigue_ratio,
                record.torque_at_endurance,
                record.area_under_torque_curve,
            )
            .map_err(|e| e.in_motion(name))?;

        let mvc = MuscleMvcDistributor::distribute(motion, max_joint_torque, &record.moment_arms)
            .map_err(|e| e.in_motion(name))?;
        let forces = record.project(motion, MuscleTable::ForceAtEndurance)?;
        let areas = record.project(motion, MuscleTable::AreaUnderForceCurve)?;

        let ratios = MuscleFatigueRatioCalculator::compute_ratios(&mvc, &forces, &areas)
            .map_err(|e| match e {
                CalibrationError::InvalidForceMvcRelation {
                    index, force, mvc, ..
                } => CalibrationError::InvalidForceMvcRelation {
                    index,
                    muscle: motion.muscles.get(index).cloned(),
                    force,
                    mvc,
                },
                other => other,
            })
            .map_err(|e| e.in_motion(name))?;

        info!(
            "{}: max joint torque {:.3} N·m, muscles {:?}, MVC {:?}, λF {:?}",
            name, max_joint_torque, motion.muscles, mvc, ratios
        );

        let muscles = motion
            .muscles
            .iter()
            .zip(mvc.iter().zip(&ratios))
            .map(|(muscle, (&mvc, &fatigue_coefficient))| MuscleRow {
                muscle: muscle.clone(),
                mvc,
                fatigue_coefficient,
            })
            .collect();

        Ok(MotionCalibration {
            motion: motion.name.clone(),
            max_joint_torque,
            muscles,
        })
    }

    /// Calibrate every record in order and merge the per-muscle candidates.
    ///
    /// An unknown motion always aborts the run. Other failures abort or skip
    /// the motion according to the configured [`FailurePolicy`]; a skipped
    /// motion contributes nothing to the parameter set.
    pub fn run(
        &self,
        catalog: &MotionCatalog,
        records: &[CalibrationRecord],
    ) -> Result<CalibrationRun> {
        let mut parameters = MuscleParameterSet::new();
        let mut motions = Vec::with_capacity(records.len());
        let mut skipped = Vec::new();

        for record in records {
            let calibration = match self.calibrate_motion(catalog, record) {
                Ok(calibration) => calibration,
                Err(e @ CalibrationError::UnknownMotion { .. }) => {
                    error!("aborting calibration run: {}", e);
                    return Err(e);
                }
                Err(e) => match self.failure_policy {
                    FailurePolicy::Abort => {
                        error!("aborting calibration run: {}", e);
                        return Err(e);
                    }
                    FailurePolicy::SkipMotion => {
                        warn!("skipping motion {}: {}", record.motion_name, e);
                        skipped.push(SkippedMotion {
                            motion: record.motion_name.clone(),
                            code: e.code().to_string(),
                            message: e.to_string(),
                        });
                        continue;
                    }
                },
            };

            for row in &calibration.muscles {
                let outcome = parameters.merge(
                    &row.muscle,
                    MuscleParameter {
                        mvc: row.mvc,
                        fatigue_coefficient: row.fatigue_coefficient,
                        motion: calibration.motion.clone(),
                    },
                );
                debug!("{} from {}: {:?}", row.muscle, calibration.motion, outcome);
            }
            motions.push(calibration);
        }

        info!(
            "calibrated {} muscles from {} motions ({} skipped)",
            parameters.len(),
            motions.len(),
            skipped.len()
        );

        Ok(CalibrationRun {
            parameters,
            motions,
            skipped,
        })
    }
}
