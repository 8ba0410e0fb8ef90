// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// CalibrationKernel: JSON bridge over the calibration pipeline
//
// Callers hand over raw JSON (records, optional catalog, optional config) and
// get back a single JSON document. All parsing and validation happens in Rust.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::config::CalibrationConfig;
use crate::error::{CalibrationError, Result};
use crate::science::{CalibrationAggregator, CalibrationRecord, CalibrationRun, MotionCatalog};

/// Returned verbatim if a response cannot be serialized.
const SERIALIZATION_FAILURE_JSON: &str =
    r#"{"error":"failed to serialize calibration response","code":"SERIALIZATION"}"#;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ValidationEvent {
    pub topic: String,
    pub message: String,
    pub severity: String, // 'INFO', 'WARNING', 'CRITICAL'
}

#[derive(Serialize, Deserialize)]
pub struct CalibrationResponse {
    pub result: CalibrationRun,
    pub events: Vec<ValidationEvent>,
    pub compute_time_ms: f32,
}

#[wasm_bindgen]
pub struct CalibrationKernel;

#[wasm_bindgen]
impl CalibrationKernel {
    /// Calibrate records against the built-in upper-limb motion catalog.
    ///
    /// # Arguments
    /// * `records_json` - JSON array of calibration records (camelCase keys)
    ///
    /// # Returns
    /// `{"result": ..., "events": [...], "compute_time_ms": ...}` or `{"error": ...}`
    pub fn compute_standard(records_json: &str) -> String {
        Self::respond(Self::parse_records(records_json).and_then(|records| {
            Self::calibrate(
                &records,
                &MotionCatalog::standard(),
                &CalibrationConfig::default(),
            )
        }))
    }

    /// Calibrate records against a caller-supplied motion catalog.
    pub fn compute_calibration(records_json: &str, catalog_json: &str) -> String {
        Self::compute_with_config(records_json, catalog_json, "{}")
    }

    /// As [`Self::compute_calibration`], with solver and failure-policy overrides.
    pub fn compute_with_config(records_json: &str, catalog_json: &str, config_json: &str) -> String {
        Self::respond(Self::calibrate_json(records_json, catalog_json, config_json))
    }
}

impl CalibrationKernel {
    fn calibrate_json(
        records_json: &str,
        catalog_json: &str,
        config_json: &str,
    ) -> Result<CalibrationResponse> {
        let records = Self::parse_records(records_json)?;
        let catalog = MotionCatalog::from_json(catalog_json)?;
        let config = CalibrationConfig::from_json(config_json)?;
        Self::calibrate(&records, &catalog, &config)
    }

    pub fn parse_records(records_json: &str) -> Result<Vec<CalibrationRecord>> {
        Ok(serde_json::from_str(records_json)?)
    }

    /// Run the pipeline and attach validation events.
    pub fn calibrate(
        records: &[CalibrationRecord],
        catalog: &MotionCatalog,
        config: &CalibrationConfig,
    ) -> Result<CalibrationResponse> {
        let start = instant::Instant::now();
        let run = CalibrationAggregator::new(config).run(catalog, records)?;
        let compute_time_ms = start.elapsed().as_secs_f32() * 1000.0;

        let events = Self::events(&run, config);
        Ok(CalibrationResponse {
            result: run,
            events,
            compute_time_ms,
        })
    }

    fn events(run: &CalibrationRun, config: &CalibrationConfig) -> Vec<ValidationEvent> {
        let mut events = Vec::new();

        for skipped in &run.skipped {
            events.push(ValidationEvent {
                topic: "CALIBRATION.SKIPPED".to_string(),
                message: format!("{} skipped: {}", skipped.motion, skipped.message),
                severity: "CRITICAL".to_string(),
            });
        }

        // Muscles estimated by more than one motion
        let mut sources: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for calibration in &run.motions {
            for row in &calibration.muscles {
                sources
                    .entry(row.muscle.as_str())
                    .or_default()
                    .push(calibration.motion.as_str());
            }
        }
        for (muscle, motions) in sources.into_iter().filter(|(_, m)| m.len() > 1) {
            if let Some(kept) = run.parameters.get(muscle) {
                events.push(ValidationEvent {
                    topic: "CALIBRATION.MERGE".to_string(),
                    message: format!(
                        "{} calibrated by {}; kept MVC {:.1} N from {}",
                        muscle,
                        motions.join(", "),
                        kept.mvc,
                        kept.motion
                    ),
                    severity: "INFO".to_string(),
                });
            }
        }

        let max_typical = config.max_typical_fatigue_coefficient;
        for (muscle, parameter) in run.parameters.iter() {
            let coefficient = parameter.fatigue_coefficient;
            if coefficient <= 0.0 || coefficient > max_typical {
                events.push(ValidationEvent {
                    topic: "CALIBRATION.RANGE".to_string(),
                    message: format!(
                        "{} fatigue coefficient {:.3} from {} is outside (0, {}]",
                        muscle, coefficient, parameter.motion, max_typical
                    ),
                    severity: "WARNING".to_string(),
                });
            }
        }

        if run.parameters.is_empty() {
            events.push(ValidationEvent {
                topic: "CALIBRATION.EMPTY".to_string(),
                message: "No muscle parameters were produced".to_string(),
                severity: "WARNING".to_string(),
            });
        }

        events
    }

    fn respond(outcome: Result<CalibrationResponse>) -> String {
        match outcome {
            Ok(response) => serde_json::to_string(&response)
                .unwrap_or_else(|_| SERIALIZATION_FAILURE_JSON.to_string()),
            Err(e) => Self::error_json(&e),
        }
    }

    fn error_json(e: &CalibrationError) -> String {
        serde_json::to_string(&serde_json::json!({
            "error": e.to_string(),
            "code": e.code(),
        }))
        .unwrap_or_else(|_| SERIALIZATION_FAILURE_JSON.to_string())
    }
}
