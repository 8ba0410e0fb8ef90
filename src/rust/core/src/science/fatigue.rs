// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
use crate::error::{CalibrationError, Result};
use crate::formulas::muscle_fatigue_ratio;

pub struct MuscleFatigueRatioCalculator;

impl MuscleFatigueRatioCalculator {
    /// Per-muscle fatigue-rate coefficients, index-aligned with the inputs.
    ///
    /// Every force at endurance must lie strictly below its muscle's MVC.
    /// The first violation fails the whole call; no partial output is returned.
    pub fn compute_ratios(mvc: &[f64], forces: &[f64], areas: &[f64]) -> Result<Vec<f64>> {
        if mvc.len() != forces.len() || mvc.len() != areas.len() {
            return Err(CalibrationError::SequenceMismatch {
                mvc: mvc.len(),
                forces: forces.len(),
                areas: areas.len(),
            });
        }

        let mut ratios = Vec::with_capacity(mvc.len());
        for (index, ((&muscle_mvc, &force), &area)) in mvc.iter().zip(forces).zip(areas).enumerate() {
            // Negated so NaN inputs are rejected as well
            if !(force < muscle_mvc) {
                return Err(CalibrationError::InvalidForceMvcRelation {
                    index,
                    muscle: None,
                    force,
                    mvc: muscle_mvc,
                });
            }
            let ratio = muscle_fatigue_ratio(force, muscle_mvc, area);
            if !ratio.is_finite() {
                return Err(CalibrationError::NumericDomain {
                    quantity: "muscle fatigue ratio",
                    value: ratio,
                });
            }
            ratios.push(ratio);
        }
        Ok(ratios)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratios_positive_below_mvc() {
        let ratios = MuscleFatigueRatioCalculator::compute_ratios(
            &[1800.0, 1080.0, 4030.0, 945.0],
            &[200.0, 100.0, 400.0, 100.0],
            &[1800.0, 1200.0, 3600.0, 1200.0],
        )
        .unwrap();
        assert_eq!(ratios.len(), 4);
        assert!(ratios.iter().all(|&r| r > 0.0), "Expected positive ratios, got {:?}", ratios);
    }

    #[test]
    fn test_ratio_value() {
        // -ln(200/1800) · 1800 / 1800 = ln 9
        let ratios =
            MuscleFatigueRatioCalculator::compute_ratios(&[1800.0], &[200.0], &[1800.0]).unwrap();
        assert!((ratios[0] - 9f64.ln()).abs() < 1e-12, "Expected ln 9, got {}", ratios[0]);
    }

    #[test]
    fn test_force_equal_to_mvc_is_rejected() {
        match MuscleFatigueRatioCalculator::compute_ratios(&[500.0, 300.0], &[100.0, 300.0], &[10.0, 10.0]) {
            Err(CalibrationError::InvalidForceMvcRelation {
                index, force, mvc, ..
            }) => {
                assert_eq!(index, 1);
                assert_eq!(force, 300.0);
                assert_eq!(mvc, 300.0);
            }
            other => panic!("expected InvalidForceMvcRelation, got {:?}", other),
        }
    }

    #[test]
    fn test_force_above_mvc_is_rejected() {
        assert!(matches!(
            MuscleFatigueRatioCalculator::compute_ratios(&[100.0], &[150.0], &[10.0]),
            Err(CalibrationError::InvalidForceMvcRelation { index: 0, .. })
        ));
    }

    #[test]
    fn test_zero_area_is_numeric_domain_error() {
        assert!(matches!(
            MuscleFatigueRatioCalculator::compute_ratios(&[100.0], &[50.0], &[0.0]),
            Err(CalibrationError::NumericDomain { .. })
        ));
    }

    #[test]
    fn test_misaligned_inputs() {
        assert!(matches!(
            MuscleFatigueRatioCalculator::compute_ratios(&[100.0, 90.0], &[50.0], &[10.0, 10.0]),
            Err(CalibrationError::SequenceMismatch { mvc: 2, forces: 1, areas: 2 })
        ));
    }

    #[test]
    fn test_empty_inputs_give_empty_output() {
        let ratios = MuscleFatigueRatioCalculator::compute_ratios(&[], &[], &[]).unwrap();
        assert!(ratios.is_empty());
    }
}
