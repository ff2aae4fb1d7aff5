//! CLI infrastructure for gridlearn
//!
//! This module provides the command-line interface for training agents on
//! grid worlds and inspecting the boards they train on.

pub mod commands;
pub mod config;
pub mod output;
