//! Constitution ("Prakriti") scoring and the patient assessment contract built around it.

pub mod config;
pub mod constitution;
pub mod error;
pub mod patients;
pub mod telemetry;
