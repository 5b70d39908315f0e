//! # mkgen - Thrust Build-Manifest Generator
//!
//! mkgen regenerates the declarative build description the Thrust Makefile
//! driver consumes. It scans the unit-test and example trees, writes one
//! `.mk` descriptor per compilable target, and serializes the aggregate
//! `testing.mk`, `dependencies.mk`, and `examples.mk` manifests. A second
//! subcommand emits an "uber header" that includes every public header for
//! compile/warning-sanity checks.
//!
//! Runs are one-shot batch passes invoked by the top-level Makefile before a
//! build; nothing is compiled here and nothing is regenerated incrementally.
//!
//! ## Module Organization
//!
//! - [`generate`] - Source discovery, descriptor emission, manifest writing
//! - [`uber`] - Uber-header generation over the public header tree
//! - [`config`] - Optional `mkgen.toml` overrides (zero-config defaults)
//! - [`paths`] - Lexical path relativization

/// Optional configuration file parsing (`mkgen.toml`).
pub mod config;

/// Build-manifest generation pipeline.
pub mod generate;

/// Path relativization helpers.
pub mod paths;

/// Uber-header generation.
pub mod uber;
