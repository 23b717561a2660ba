//! Foundation types for termfolio.
//!
//! This crate contains the platform-agnostic types shared by the terminal
//! core and its front ends: key events, terminal configuration, and the
//! error type.

pub mod config;
pub mod error;
pub mod input;
