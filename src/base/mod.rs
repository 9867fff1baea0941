//! Core components, types, and utilities for the clinic portal.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The keyword triage rules.
//! - Static demo content used when no backend answers.
//! - Common types and result handling.

pub mod config;
pub mod demo;
pub mod triage;
pub mod types;
