//! Core types and definitions for TEMPEST chain abilities.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identities, policies, events, components, and the ability table.
//! It has no dependency on any host engine.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod ids;
pub mod policy;
