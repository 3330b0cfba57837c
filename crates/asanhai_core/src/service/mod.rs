//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate state mutations, clock reads and persistence into
//!   use-case level APIs for the presentation layer.
//! - Keep UI callers decoupled from storage details.

pub mod tracker_service;
