//! TalentLens Core - Domain layer for the AI recruitment questionnaire platform
//!
//! This crate implements the business rules for per-IP session quotas,
//! analytics event tracking, and incentive payouts. Storage, transport,
//! and payment processing are supplied by the hosting service through
//! the port interfaces.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
