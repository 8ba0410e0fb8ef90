// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::motions::Motion;
use crate::error::{CalibrationError, MuscleTable, Result};

/// Measurements from one isometric calibration exercise.
///
/// The per-muscle tables come from model simulations and may list muscles
/// that do not take part in the motion; only the motion's own muscles are read.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationRecord {
    pub motion_name: String,
    /// Joint torque at the maximum endurance time (N·m).
    pub torque_at_endurance: f64,
    /// Area under the joint torque curve until the endurance limit (N·m·s).
    pub area_under_torque_curve: f64,
    #[serde(default)]
    pub force_at_endurance: HashMap<String, f64>,
    #[serde(default)]
    pub area_under_force_curve: HashMap<String, f64>,
    #[serde(default)]
    pub moment_arms: HashMap<String, f64>,
}

impl CalibrationRecord {
    pub fn new(motion_name: &str, torque_at_endurance: f64, area_under_torque_curve: f64) -> Self {
        CalibrationRecord {
            motion_name: motion_name.to_string(),
            torque_at_endurance,
            area_under_torque_curve,
            force_at_endurance: HashMap::new(),
            area_under_force_curve: HashMap::new(),
            moment_arms: HashMap::new(),
        }
    }

    /// Add one muscle's force, force area and moment arm.
    pub fn with_muscle(mut self, muscle: &str, force: f64, area: f64, moment_arm: f64) -> Self {
        self.force_at_endurance.insert(muscle.to_string(), force);
        self.area_under_force_curve.insert(muscle.to_string(), area);
        self.moment_arms.insert(muscle.to_string(), moment_arm);
        self
    }

    pub fn table(&self, table: MuscleTable) -> &HashMap<String, f64> {
        match table {
            MuscleTable::MomentArms => &self.moment_arms,
            MuscleTable::ForceAtEndurance => &self.force_at_endurance,
            MuscleTable::AreaUnderForceCurve => &self.area_under_force_curve,
        }
    }

    /// Read a per-muscle table in the motion's muscle order.
    pub fn project(&self, motion: &Motion, table: MuscleTable) -> Result<Vec<f64>> {
        project_onto(motion, self.table(table), table)
    }

    /// Elbow flexion trial of the reference calibration protocol.
    pub fn reference_elbow_flexion() -> CalibrationRecord {
        let mut record = CalibrationRecord::new("elbow_flexion", 20.0, 700.0)
            .with_muscle("BICLong", 200.0, 1800.0, 0.05)
            .with_muscle("BICShort", 100.0, 1200.0, 0.05)
            .with_muscle("BRA", 400.0, 3600.0, 0.02)
            .with_muscle("BRD", 100.0, 1200.0, 0.08);
        // Antagonists are silent during flexion
        for muscle in ["TRILong", "TRILat", "TRIMed"] {
            record.force_at_endurance.insert(muscle.to_string(), 0.0);
            record.area_under_force_curve.insert(muscle.to_string(), 0.0);
        }
        record
    }
}

pub(crate) fn project_onto(
    motion: &Motion,
    values: &HashMap<String, f64>,
    table: MuscleTable,
) -> Result<Vec<f64>> {
    motion
        .muscles
        .iter()
        .map(|muscle| {
            values
                .get(muscle)
                .copied()
                .ok_or_else(|| CalibrationError::UnknownMuscle {
                    motion: motion.name.clone(),
                    muscle: muscle.clone(),
                    table,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::science::motions::MotionCatalog;

    #[test]
    fn test_projection_follows_motion_order() {
        let catalog = MotionCatalog::standard();
        let motion = catalog.lookup("elbow_flexion").unwrap();
        let record = CalibrationRecord::reference_elbow_flexion();

        let forces = record.project(motion, MuscleTable::ForceAtEndurance).unwrap();
        let areas = record.project(motion, MuscleTable::AreaUnderForceCurve).unwrap();
        assert_eq!(forces, vec![200.0, 100.0, 400.0, 100.0]);
        assert_eq!(areas, vec![1800.0, 1200.0, 3600.0, 1200.0]);
    }

    #[test]
    fn test_projection_ignores_extra_muscles() {
        let catalog = MotionCatalog::standard();
        let motion = catalog.lookup("elbow_flexion").unwrap();
        let record = CalibrationRecord::reference_elbow_flexion();
        assert_eq!(
            record.project(motion, MuscleTable::MomentArms).unwrap().len(),
            4
        );
    }

    #[test]
    fn test_projection_missing_muscle() {
        let catalog = MotionCatalog::standard();
        let motion = catalog.lookup("elbow_flexion").unwrap();
        let mut record = CalibrationRecord::reference_elbow_flexion();
        record.area_under_force_curve.remove("BRD");

        match record.project(motion, MuscleTable::AreaUnderForceCurve) {
            Err(CalibrationError::UnknownMuscle { muscle, table, .. }) => {
                assert_eq!(muscle, "BRD");
                assert_eq!(table, MuscleTable::AreaUnderForceCurve);
            }
            other => panic!("expected UnknownMuscle, got {:?}", other),
        }
    }

    #[test]
    fn test_record_json_camel_case() {
        let json = r#"{
            "motionName": "hand_grip",
            "torqueAtEndurance": 12.0,
            "areaUnderTorqueCurve": 300.0,
            "forceAtEndurance": { "CC": 50.0, "DD": 30.0 },
            "areaUnderForceCurve": { "CC": 900.0, "DD": 600.0 },
            "momentArms": { "CC": 0.02, "DD": 0.015 }
        }"#;
        let record: CalibrationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.motion_name, "hand_grip");
        assert_eq!(record.moment_arms["DD"], 0.015);
    }
}
