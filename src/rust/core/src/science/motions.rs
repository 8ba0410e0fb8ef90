// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Joint motion reference data: which muscles take part in a motion and how
// much force each contributes relative to the reference muscle.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motion {
    pub name: String,
    /// Joint fatigue ratio λF (dimensionless).
    pub fatigue_ratio: f64,
    /// Participating muscles, reference muscle first.
    pub muscles: Vec<String>,
    /// Force proportions parallel to `muscles`.
    pub proportions: Vec<f64>,
}

impl Motion {
    pub fn new(name: &str, fatigue_ratio: f64, muscles: &[&str], proportions: &[f64]) -> Motion {
        Motion {
            name: name.to_string(),
            fatigue_ratio,
            muscles: muscles.iter().map(|m| m.to_string()).collect(),
            proportions: proportions.to_vec(),
        }
    }

    /// Check the structural invariants: at least one muscle, one positive
    /// proportion per muscle, no repeated muscle, positive fatigue ratio.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: String| CalibrationError::InvalidMotion {
            motion: self.name.clone(),
            reason,
        };

        if self.muscles.is_empty() {
            return Err(invalid("no participating muscles".to_string()));
        }
        if self.muscles.len() != self.proportions.len() {
            return Err(invalid(format!(
                "{} muscles but {} proportions",
                self.muscles.len(),
                self.proportions.len()
            )));
        }
        if !(self.fatigue_ratio.is_finite() && self.fatigue_ratio > 0.0) {
            return Err(invalid(format!("fatigue ratio {}", self.fatigue_ratio)));
        }

        let mut seen = HashSet::new();
        for (muscle, &proportion) in self.muscles.iter().zip(&self.proportions) {
            if !seen.insert(muscle.as_str()) {
                return Err(invalid(format!("muscle \"{}\" listed twice", muscle)));
            }
            if !(proportion.is_finite() && proportion > 0.0) {
                return Err(invalid(format!(
                    "proportion {} for muscle \"{}\"",
                    proportion, muscle
                )));
            }
        }
        Ok(())
    }
}

/// Immutable lookup table of joint motions, built once before a run.
#[derive(Clone, Debug)]
pub struct MotionCatalog {
    motions: HashMap<String, Motion>,
}

impl MotionCatalog {
    /// Build a catalog, rejecting malformed or duplicate motions.
    pub fn new(motions: Vec<Motion>) -> Result<MotionCatalog> {
        let mut table = HashMap::with_capacity(motions.len());
        for motion in motions {
            motion.validate()?;
            if table.contains_key(&motion.name) {
                return Err(CalibrationError::InvalidMotion {
                    motion: motion.name,
                    reason: "defined twice in the catalog".to_string(),
                });
            }
            table.insert(motion.name.clone(), motion);
        }
        Ok(MotionCatalog { motions: table })
    }

    /// Parse a JSON array of motions.
    pub fn from_json(json: &str) -> Result<MotionCatalog> {
        let motions: Vec<Motion> = serde_json::from_str(json)?;
        Self::new(motions)
    }

    /// Reference table for the upper-limb isometric calibration protocol.
    pub fn standard() -> MotionCatalog {
        let motions = standard_motions();
        MotionCatalog {
            motions: motions.into_iter().map(|m| (m.name.clone(), m)).collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Result<&Motion> {
        self.motions
            .get(name)
            .ok_or_else(|| CalibrationError::UnknownMotion {
                motion: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.motions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.motions.is_empty()
    }

    /// Motion names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.motions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn standard_motions() -> Vec<Motion> {
    vec![
        Motion::new(
            "elbow_flexion",
            1.1616,
            &["BICLong", "BICShort", "BRA", "BRD"],
            &[1.0, 0.603, 2.24, 0.525],
        ),
        Motion::new(
            "elbow_extension",
            1.0,
            &["TRILong", "TRILat", "TRIMed"],
            &[1.0, 0.929, 0.929],
        ),
        // Finger flexors
        Motion::new("hand_grip", 1.1227, &["CC", "DD"], &[1.0, 0.7]),
    ]
}
