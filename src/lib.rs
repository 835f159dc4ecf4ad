//! # testnet-topology - Topology descriptions for ledger integration tests
//!
//! This library builds in-memory descriptions of permissioned-ledger
//! consortium networks for integration tests: organizations and their CAs,
//! the consortium, consensus settings, orderers, peers, channels and the
//! genesis/channel profiles that bootstrap them.
//!
//! ## Overview
//!
//! Downstream tooling reads a [`Config`](config::Config) to generate crypto
//! material, genesis blocks and the process layout of a test run. This crate
//! only produces and checks the description; it never touches the disk or
//! the network on its own.
//!
//! ## Key Features
//!
//! - **Standard networks**: a two-organization base network plus Raft, BFT,
//!   multi-node, multi-channel, three-organization and Idemix variants
//! - **Derivation**: every variant is the base network plus a few edits that
//!   keep cross references consistent
//! - **Validation**: a single pass reports every dangling reference,
//!   duplicate name and consensus/orderer mismatch
//! - **Independence**: each constructor call returns a configuration that
//!   shares nothing with any other
//!
//! ## Architecture
//!
//! - `config`: the topology model
//! - `networks`: standard network constructors and the variant catalog
//! - `utils`: validation and naming helpers
//! - `config_loader`: reading and rendering topologies as YAML or JSON
//!
//! ## Example Usage
//!
//! ```rust
//! use testnet_topology::config::ConsensusType;
//! use testnet_topology::networks::{multi_node_bft, Variant};
//!
//! let config = multi_node_bft();
//! assert_eq!(config.consensus.kind, ConsensusType::Bft);
//! assert_eq!(config.orderers.len(), 3);
//! config.validate()?;
//!
//! // Look a network up by name
//! let variant: Variant = "minimal_raft".parse()?;
//! assert_eq!(variant.build().channels.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Constructors cannot fail. Broken invariants are reported by
//! [`utils::validation::validate`] as `Violation` values, and file handling
//! in `config_loader` returns `LoadError`. The command-line tool wraps these
//! with `color_eyre` for reporting.

pub mod config;
pub mod config_loader;
pub mod networks;
pub mod utils;
