// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto

//! Calibration Pipeline Tests
//!
//! End-to-end checks of the reference protocol and properties that must hold
//! across the whole pipeline.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use crate::config::CalibrationConfig;
use crate::error::CalibrationError;
use crate::science::{
    CalibrationAggregator, CalibrationRecord, JointTorqueSolver, Motion, MotionCatalog,
    MuscleFatigueRatioCalculator, MuscleMvcDistributor, MuscleParameter, MuscleParameterSet,
};

#[test]
fn test_elbow_flexion_reference_protocol() {
    println!(" Checking elbow flexion reference trial");

    let catalog = MotionCatalog::standard();
    let motion = catalog.lookup("elbow_flexion").unwrap();
    let record = CalibrationRecord::reference_elbow_flexion();

    // 1. Max joint torque
    let torque = JointTorqueSolver::default()
        .solve_max_torque(motion.fatigue_ratio, 20.0, 700.0)
        .unwrap();
    assert!(torque > 0.0, "Torque must be positive: {}", torque);
    println!(" Max joint torque: {:.3} N·m", torque);

    // 2. MVC distribution
    let mvc = MuscleMvcDistributor::distribute(motion, torque, &record.moment_arms).unwrap();
    assert_eq!(mvc.len(), 4);
    assert!(mvc.iter().all(|&m| m > 0.0));
    let weighted = MuscleMvcDistributor::weighted_lever_sum(motion, &record.moment_arms).unwrap();
    assert_eq!(mvc[0], torque / weighted);
    println!(" MVC: {:?}", mvc);

    // 3. Fatigue ratios: every force is below its MVC in this trial
    let forces = [200.0, 100.0, 400.0, 100.0];
    let areas = [1800.0, 1200.0, 3600.0, 1200.0];
    assert!(forces.iter().zip(&mvc).all(|(f, m)| f < m));
    let ratios = MuscleFatigueRatioCalculator::compute_ratios(&mvc, &forces, &areas).unwrap();
    assert_eq!(ratios.len(), 4);
    assert!(ratios.iter().all(|&r| r > 0.0), "Ratios: {:?}", ratios);
    println!(" λF: {:?}", ratios);

    // 4. Aggregated run agrees with the stage-by-stage result
    let run = CalibrationAggregator::default().run(&catalog, &[record]).unwrap();
    assert_eq!(run.parameters.len(), 4);
    for (i, muscle) in motion.muscles.iter().enumerate() {
        let param = run.parameters.get(muscle).unwrap();
        assert_eq!(param.mvc, mvc[i]);
        assert_eq!(param.fatigue_coefficient, ratios[i]);
    }
}

#[test]
fn test_unknown_motion_never_returns_a_value() {
    let catalog = MotionCatalog::standard();
    for name in ["", "Elbow_Flexion", "wrist_extension"] {
        assert!(matches!(
            catalog.lookup(name),
            Err(CalibrationError::UnknownMotion { .. })
        ));
        let record = CalibrationRecord::new(name, 20.0, 700.0);
        assert!(matches!(
            CalibrationAggregator::default().run(&catalog, &[record]),
            Err(CalibrationError::UnknownMotion { .. })
        ));
    }
}

#[test]
fn test_failed_motion_leaves_no_partial_rows() {
    // BRA force raised above any plausible MVC
    let catalog = MotionCatalog::standard();
    let mut record = CalibrationRecord::reference_elbow_flexion();
    record.force_at_endurance.insert("BRA".to_string(), 1e7);

    let err = CalibrationAggregator::default()
        .run(&catalog, &[record])
        .unwrap_err();
    assert!(matches!(
        err.cause(),
        CalibrationError::InvalidForceMvcRelation { index: 2, .. }
    ));
    assert!(err.to_string().contains("elbow_flexion"));
}

#[test]
fn test_distribution_invariant_randomized() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..200 {
        let n = rng.gen_range(1..6);
        let names: Vec<String> = (0..n).map(|i| format!("M{}", i)).collect();
        let mut proportions = vec![1.0];
        proportions.extend((1..n).map(|_| rng.gen_range(0.05..3.0)));

        let motion = Motion {
            name: "random".to_string(),
            fatigue_ratio: rng.gen_range(0.5..2.0),
            muscles: names.clone(),
            proportions,
        };
        let arms = names
            .iter()
            .map(|m| (m.clone(), rng.gen_range(0.005..0.1)))
            .collect();
        let torque = rng.gen_range(1.0..500.0);

        let mvc = MuscleMvcDistributor::distribute(&motion, torque, &arms).unwrap();
        let weighted = MuscleMvcDistributor::weighted_lever_sum(&motion, &arms).unwrap();
        assert_eq!(mvc[0], torque / weighted);
        assert_eq!(mvc.len(), n);
    }
}

#[test]
fn test_merge_is_order_independent_randomized() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..50 {
        let mut candidates: Vec<MuscleParameter> = (0..8)
            .map(|i| MuscleParameter {
                mvc: rng.gen_range(1.0..1000.0),
                fatigue_coefficient: rng.gen_range(0.01..5.0),
                motion: format!("motion_{}", i),
            })
            .collect();
        let best = candidates
            .iter()
            .cloned()
            .fold(None::<MuscleParameter>, |acc, c| match acc {
                Some(a) if a.mvc >= c.mvc => Some(a),
                _ => Some(c),
            })
            .unwrap();

        for _ in 0..4 {
            // Fisher-Yates
            for i in (1..candidates.len()).rev() {
                let j = rng.gen_range(0..=i);
                candidates.swap(i, j);
            }
            let mut set = MuscleParameterSet::new();
            for c in &candidates {
                set.merge("BRD", c.clone());
            }
            let kept = set.get("BRD").unwrap();
            assert_eq!(kept.mvc, best.mvc);
            assert_eq!(kept.fatigue_coefficient, best.fatigue_coefficient);
            assert_eq!(kept.motion, best.motion);
        }
    }
}

#[test]
fn test_shared_muscle_across_json_catalog() {
    // BRD also acts in a forearm rotation trial with a weaker torque
    let catalog = MotionCatalog::from_json(
        &json!([
            { "name": "elbow_flexion", "fatigueRatio": 1.1616,
              "muscles": ["BICLong", "BICShort", "BRA", "BRD"],
              "proportions": [1.0, 0.603, 2.24, 0.525] },
            { "name": "forearm_pronation", "fatigueRatio": 1.0,
              "muscles": ["BRD"], "proportions": [1.0] }
        ])
        .to_string(),
    )
    .unwrap();
    let pronation = CalibrationRecord::new("forearm_pronation", 2.0, 40.0)
        .with_muscle("BRD", 10.0, 300.0, 0.08);

    let aggregator = CalibrationAggregator::new(&CalibrationConfig::default());
    let flexion = aggregator
        .calibrate_motion(&catalog, &CalibrationRecord::reference_elbow_flexion())
        .unwrap();
    let brd_flexion = flexion.muscles.iter().find(|r| r.muscle == "BRD").unwrap();

    let run = aggregator
        .run(
            &catalog,
            &[pronation, CalibrationRecord::reference_elbow_flexion()],
        )
        .unwrap();
    let brd = run.parameters.get("BRD").unwrap();
    assert_eq!(brd.motion, "elbow_flexion");
    assert_eq!(brd.mvc, brd_flexion.mvc);
    assert_eq!(brd.fatigue_coefficient, brd_flexion.fatigue_coefficient);
    assert_eq!(run.motions.len(), 2);
}
