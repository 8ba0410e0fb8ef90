// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto

//! Muscle Calibrator
//!
//! Native binary for per-muscle MVC and fatigue-rate calibration.
//!
//! Usage: muscle_calibrator (--records <json> | --demo) [--catalog <json>]
//!                          [--config <json>] [--output <json>]
//!
//! This binary:
//! 1. Loads calibration records (or the reference elbow flexion trial)
//! 2. Runs the calibration pipeline over every record
//! 3. Prints per-motion results and the merged parameter table
//! 4. Writes the muscle parameters as JSON

use log::error;
use serde_json::json;
use std::env;
use std::fs;

use fatigue_core::{
    CalibrationConfig, CalibrationKernel, CalibrationRecord, CalibrationResponse, MotionCatalog,
};

struct Args {
    records_path: Option<String>,
    catalog_path: Option<String>,
    config_path: Option<String>,
    output_path: String,
    demo: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args {
        records_path: None,
        catalog_path: None,
        config_path: None,
        output_path: "muscles_parameters.json".to_string(),
        demo: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--records" => {
                i += 1;
                parsed.records_path = args.get(i).cloned();
            }
            "--catalog" => {
                i += 1;
                parsed.catalog_path = args.get(i).cloned();
            }
            "--config" => {
                i += 1;
                parsed.config_path = args.get(i).cloned();
            }
            "--output" => {
                i += 1;
                if let Some(path) = args.get(i) {
                    parsed.output_path = path.clone();
                }
            }
            "--demo" => parsed.demo = true,
            _ => {}
        }
        i += 1;
    }
    parsed
}

fn read(path: &str) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))
}

fn load_inputs(
    args: &Args,
) -> Result<(Vec<CalibrationRecord>, MotionCatalog, CalibrationConfig), String> {
    let records = match (&args.records_path, args.demo) {
        (Some(path), _) => {
            CalibrationKernel::parse_records(&read(path)?).map_err(|e| e.to_string())?
        }
        (None, true) => vec![CalibrationRecord::reference_elbow_flexion()],
        (None, false) => {
            return Err("No records provided. Use --records <path> or --demo".to_string())
        }
    };

    let catalog = match &args.catalog_path {
        Some(path) => MotionCatalog::from_json(&read(path)?).map_err(|e| e.to_string())?,
        None => MotionCatalog::standard(),
    };

    let config = match &args.config_path {
        Some(path) => CalibrationConfig::from_json(&read(path)?).map_err(|e| e.to_string())?,
        None => CalibrationConfig::default(),
    };

    Ok((records, catalog, config))
}

fn print_report(response: &CalibrationResponse) {
    for calibration in &response.result.motions {
        println!("\n  Motion: {}", calibration.motion);
        println!("  Max joint torque: {:.3} N·m", calibration.max_joint_torque);
        println!(
            "  {:>10} | {:>12} | {:>10}",
            "Muscle", "MVC (N)", "λF"
        );
        println!("  {}", "-".repeat(40));
        for row in &calibration.muscles {
            println!(
                "  {:>10} | {:>12.2} | {:>10.5}",
                row.muscle, row.mvc, row.fatigue_coefficient
            );
        }
    }

    for skipped in &response.result.skipped {
        println!("\n  Skipped {}: {}", skipped.motion, skipped.message);
    }

    println!("\n  Muscle Parameters:");
    for (muscle, param) in response.result.parameters.iter() {
        println!(
            "  {:>10}: MVC {:>10.2} N, λF {:>8.5} ({})",
            muscle, param.mvc, param.fatigue_coefficient, param.motion
        );
    }

    for event in &response.events {
        println!("  [{}] {}: {}", event.severity, event.topic, event.message);
    }
}

fn main() {
    env_logger::init();
    let args = parse_args();

    let (records, catalog, config) = match load_inputs(&args) {
        Ok(inputs) => inputs,
        Err(e) => {
            println!("{}", json!({ "error": e }));
            return;
        }
    };

    println!("==================================================");
    println!("Muscle Calibrator (Native Rust)");
    println!(
        "Motions: {} catalogued, {} records",
        catalog.len(),
        records.len()
    );
    println!("==================================================");

    let response = match CalibrationKernel::calibrate(&records, &catalog, &config) {
        Ok(response) => response,
        Err(e) => {
            error!("calibration failed: {}", e);
            println!("{}", json!({ "error": e.to_string(), "code": e.code() }));
            std::process::exit(1);
        }
    };

    print_report(&response);

    let output = match serde_json::to_string_pretty(&response.result.parameters) {
        Ok(output) => output,
        Err(e) => {
            println!("{}", json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
    };
    if let Err(e) = fs::write(&args.output_path, output) {
        println!(
            "{}",
            json!({ "error": format!("Failed to write {}: {}", args.output_path, e) })
        );
        std::process::exit(1);
    }

    println!(
        "\n{}",
        json!({
            "output": args.output_path,
            "muscles": response.result.parameters.len(),
            "skipped": response.result.skipped.len(),
            "compute_time_ms": response.compute_time_ms
        })
    );
}
