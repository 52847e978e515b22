//! The conformance rule set.
//!
//! Stateless rules are free functions over (`RuleContext`, event); each
//! inspects a single site and emits at most one diagnostic per violation.
//! The two aggregator modules ([`cycles`], [`hash_registry`]) carry
//! per-compilation state populated concurrently and finalized once.
//!
//! Rules never call each other; shared queries live in
//! [`crate::classify`].

pub mod cycles;
pub mod encapsulation;
pub mod hash_registry;
pub mod hot_reload;
pub mod hygiene;
pub mod lifecycle;
pub mod ownership;
pub mod unique_id;
