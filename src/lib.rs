//! Modernity Survey - Worldview survey scoring and storage
//!
//! This crate scores a short multiple-choice survey on three axes
//! (PreModern, Modern, PostModern), places the result on a ternary plot,
//! classifies the respondent's perspective and stores one row per
//! submission with bounded retry on transient storage failures.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
