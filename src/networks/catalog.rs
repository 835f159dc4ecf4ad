//! Catalog of the named standard networks.

use crate::config::Config;
use crate::networks::standard;
use crate::utils::validation::{validate, Violation};
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;

/// Every standard network, identified by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    BasicConfig,
    BasicEtcdRaft,
    ThreeOrgEtcdRaft,
    FullEtcdRaft,
    BasicEtcdRaftWithIdemix,
    MinimalRaft,
    MultiChannelEtcdRaft,
    MultiNodeEtcdRaft,
    MultiNodeBft,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown network variant '{0}'")]
pub struct UnknownVariant(pub String);

impl Variant {
    pub const ALL: [Variant; 9] = [
        Variant::BasicConfig,
        Variant::BasicEtcdRaft,
        Variant::ThreeOrgEtcdRaft,
        Variant::FullEtcdRaft,
        Variant::BasicEtcdRaftWithIdemix,
        Variant::MinimalRaft,
        Variant::MultiChannelEtcdRaft,
        Variant::MultiNodeEtcdRaft,
        Variant::MultiNodeBft,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::BasicConfig => "BasicConfig",
            Variant::BasicEtcdRaft => "BasicEtcdRaft",
            Variant::ThreeOrgEtcdRaft => "ThreeOrgEtcdRaft",
            Variant::FullEtcdRaft => "FullEtcdRaft",
            Variant::BasicEtcdRaftWithIdemix => "BasicEtcdRaftWithIdemix",
            Variant::MinimalRaft => "MinimalRaft",
            Variant::MultiChannelEtcdRaft => "MultiChannelEtcdRaft",
            Variant::MultiNodeEtcdRaft => "MultiNodeEtcdRaft",
            Variant::MultiNodeBft => "MultiNodeBFT",
        }
    }

    /// The network this one is derived from; `None` for the base network
    pub fn parent(&self) -> Option<Variant> {
        match self {
            Variant::BasicConfig => None,
            Variant::BasicEtcdRaft | Variant::MultiChannelEtcdRaft | Variant::MultiNodeBft => {
                Some(Variant::BasicConfig)
            }
            Variant::ThreeOrgEtcdRaft
            | Variant::FullEtcdRaft
            | Variant::BasicEtcdRaftWithIdemix
            | Variant::MinimalRaft
            | Variant::MultiNodeEtcdRaft => Some(Variant::BasicEtcdRaft),
        }
    }

    pub fn build(&self) -> Config {
        log::debug!("Building {} network", self.name());
        match self {
            Variant::BasicConfig => standard::basic_config(),
            Variant::BasicEtcdRaft => standard::basic_etcd_raft(),
            Variant::ThreeOrgEtcdRaft => standard::three_org_etcd_raft(),
            Variant::FullEtcdRaft => standard::full_etcd_raft(),
            Variant::BasicEtcdRaftWithIdemix => standard::basic_etcd_raft_with_idemix(),
            Variant::MinimalRaft => standard::minimal_raft(),
            Variant::MultiChannelEtcdRaft => standard::multi_channel_etcd_raft(),
            Variant::MultiNodeEtcdRaft => standard::multi_node_etcd_raft(),
            Variant::MultiNodeBft => standard::multi_node_bft(),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lowercase with `_` and `-` removed, so `multi_node_bft`, `multi-node-bft`
/// and `MultiNodeBFT` all match
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s.trim());
        Variant::ALL
            .into_iter()
            .find(|variant| normalize(variant.name()) == wanted)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// Build and validate every variant in parallel
///
/// Results come back in catalog order.
pub fn validate_all() -> Vec<(Variant, Vec<Violation>)> {
    Variant::ALL[..]
        .par_iter()
        .map(|variant| (*variant, validate(&variant.build())))
        .collect()
}
