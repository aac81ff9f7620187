//! Deskflow - Multi-Tenant Customer-Support Conversation Engine
//!
//! This crate implements a turn-based dialogue engine that answers support
//! questions from a tenant-scoped knowledge base and walks a deterministic,
//! at-most-once escalation funnel to human support.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
