//! Variant factory for the standard test networks.
//!
//! Constructors are plain functions returning a fresh [`Config`](crate::config::Config).
//! The edit vocabulary they are written in lives on `Config` itself (see
//! `edits.rs`) and [`Variant`] names them for lookup by string.

pub mod catalog;
mod edits;
pub mod standard;

pub use catalog::{validate_all, UnknownVariant, Variant};
pub use standard::{
    basic_config, basic_etcd_raft, basic_etcd_raft_with_idemix, full_etcd_raft, minimal_raft,
    multi_channel_etcd_raft, multi_node_bft, multi_node_etcd_raft, three_org_etcd_raft,
};
