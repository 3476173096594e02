//! Core application modules
//!
//! This module contains configuration, constants, logging, the HTTP
//! transport and the provider clients.

pub mod client;
pub mod config;
pub mod constants;
pub mod logging;
pub mod model_manager;
pub mod provider;
pub mod providers;
