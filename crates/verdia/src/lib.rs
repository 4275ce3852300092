//! Core library for the Verdia plant-care backend.
//!
//! The interesting part of the service lives in [`survey`]: survey intake with
//! cross-language normalization, the administrator-authored rule matcher, and
//! the plant/partner recommendation selectors. Configuration, telemetry, and
//! application-level error plumbing sit alongside it.

pub mod config;
pub mod error;
pub mod survey;
pub mod telemetry;
