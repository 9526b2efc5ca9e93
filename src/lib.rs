//! Edge Wizard - Conversational setup for edge routing workers
//!
//! This crate walks an operator through a chat dialogue that collects a
//! worker configuration, renders the worker script, and publishes it to the
//! edge platform's control plane.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
