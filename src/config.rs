//! Topology model for test networks.
//!
//! A [`Config`] is the aggregate root describing a consortium network:
//! organizations and their CAs, the consortium, consensus settings, the
//! system channel, orderers, application channels, peers and the genesis and
//! channel profiles used to bootstrap them. Every collection is owned by the
//! configuration, so two configurations never share storage.

use serde::{Deserialize, Serialize};

/// Identity scheme used by an organization's membership service provider
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MspType {
    /// Standard certificate-based MSP
    #[default]
    Bccsp,
    /// Privacy-preserving identity mixer MSP
    Idemix,
}

impl MspType {
    /// True for the certificate-based MSP, which is left out when serialized
    pub fn is_default(&self) -> bool {
        *self == MspType::Bccsp
    }
}

/// Consensus implementation run by the ordering service
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsensusType {
    /// No consensus type specified; the network boots from a genesis file only
    #[default]
    #[serde(rename = "unset")]
    Unset,
    /// Crash-fault-tolerant Raft
    #[serde(rename = "etcdraft")]
    EtcdRaft,
    /// Byzantine-fault-tolerant ordering
    #[serde(rename = "BFT")]
    Bft,
}

impl ConsensusType {
    /// Raft and BFT both need at least one orderer node
    pub fn requires_orderers(&self) -> bool {
        matches!(self, ConsensusType::EtcdRaft | ConsensusType::Bft)
    }

    /// True when no consensus type was chosen; the `type` key is then omitted
    pub fn is_unset(&self) -> bool {
        *self == ConsensusType::Unset
    }
}

impl std::fmt::Display for ConsensusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsensusType::Unset => write!(f, "unset"),
            ConsensusType::EtcdRaft => write!(f, "etcdraft"),
            ConsensusType::Bft => write!(f, "BFT"),
        }
    }
}

/// How orderers obtain the system channel genesis block
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BootstrapMethod {
    /// Genesis block is written to disk before the orderer starts
    #[default]
    File,
    /// Orderer starts without a system channel. No standard network uses
    /// it; it exists for topologies loaded from files.
    None,
}

/// Certificate authority owned by a single organization
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Ca {
    pub hostname: String,
}

impl Default for Ca {
    fn default() -> Self {
        Self {
            hostname: "ca".to_string(),
        }
    }
}

/// Network member with its own identity provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    pub msp_id: String,
    #[serde(default, skip_serializing_if = "MspType::is_default")]
    pub msp_type: MspType,
    pub domain: String,
    #[serde(default)]
    pub enable_node_ous: bool,
    /// Ordinary user identities to provision in addition to the admin
    #[serde(default)]
    pub users: u32,
    #[serde(default)]
    pub ca: Ca,
}

/// Named group of organizations allowed to form channels together
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Consortium {
    pub name: String,
    pub organizations: Vec<String>,
}

/// Consensus settings of the ordering service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Consensus {
    #[serde(rename = "type", default, skip_serializing_if = "ConsensusType::is_unset")]
    pub kind: ConsensusType,
    #[serde(default)]
    pub bootstrap_method: BootstrapMethod,
}

/// Orderer system channel and the profile used to build its genesis block
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SystemChannel {
    pub name: String,
    pub profile: String,
}

/// Ordering node
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Orderer {
    pub name: String,
    pub organization: String,
}

impl Orderer {
    /// Orderer `name` owned by `organization`
    pub fn new(name: &str, organization: &str) -> Self {
        Self {
            name: name.to_string(),
            organization: organization.to_string(),
        }
    }
}

/// Application channel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub profile: String,
}

impl Channel {
    /// Channel `name` created from profile `profile`
    pub fn new(name: &str, profile: &str) -> Self {
        Self {
            name: name.to_string(),
            profile: profile.to_string(),
        }
    }
}

/// Membership of a peer in an application channel
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PeerChannel {
    pub name: String,
    /// Whether the peer is advertised as an anchor peer on this channel
    #[serde(default)]
    pub anchor: bool,
}

impl PeerChannel {
    /// Membership as an anchor peer
    pub fn anchor(name: &str) -> Self {
        Self {
            name: name.to_string(),
            anchor: true,
        }
    }

    /// Membership as an ordinary, non-anchor peer
    pub fn member(name: &str) -> Self {
        Self {
            name: name.to_string(),
            anchor: false,
        }
    }
}

/// Endorsing/committing node
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Peer {
    pub name: String,
    pub organization: String,
    #[serde(default)]
    pub channels: Vec<PeerChannel>,
}

impl Peer {
    /// Peer `name` of `organization` joined to `channels`
    pub fn new(name: &str, organization: &str, channels: Vec<PeerChannel>) -> Self {
        Self {
            name: name.to_string(),
            organization: organization.to_string(),
            channels,
        }
    }

    /// Returns `organization.name`, the identifier used in diagnostics
    pub fn id(&self) -> String {
        format!("{}.{}", self.organization, self.name)
    }
}

/// What a profile generates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ProfileKind {
    /// Channel-creation profile for an application channel
    Channel {
        consortium: String,
        organizations: Vec<String>,
    },
    /// Genesis profile of the orderer system channel
    OrdererGenesis { orderers: Vec<String> },
}

/// Named genesis or channel template
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    #[serde(flatten)]
    pub kind: ProfileKind,
}

impl Profile {
    pub fn orderer_genesis(name: &str, orderers: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: ProfileKind::OrdererGenesis {
                orderers: to_owned_names(orderers),
            },
        }
    }

    pub fn channel(name: &str, consortium: &str, organizations: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: ProfileKind::Channel {
                consortium: consortium.to_string(),
                organizations: to_owned_names(organizations),
            },
        }
    }

    pub fn is_orderer_genesis(&self) -> bool {
        matches!(self.kind, ProfileKind::OrdererGenesis { .. })
    }

    pub fn is_channel(&self) -> bool {
        matches!(self.kind, ProfileKind::Channel { .. })
    }

    /// Orderer names of a genesis profile, empty for channel profiles
    pub fn orderers(&self) -> &[String] {
        match &self.kind {
            ProfileKind::OrdererGenesis { orderers } => orderers,
            ProfileKind::Channel { .. } => &[],
        }
    }

    /// Member organizations of a channel profile, empty for genesis profiles
    pub fn organizations(&self) -> &[String] {
        match &self.kind {
            ProfileKind::Channel { organizations, .. } => organizations,
            ProfileKind::OrdererGenesis { .. } => &[],
        }
    }
}

fn to_owned_names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Declarative description of a whole test network
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub consortiums: Vec<Consortium>,
    #[serde(default)]
    pub consensus: Consensus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_channel: Option<SystemChannel>,
    #[serde(default)]
    pub orderers: Vec<Orderer>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub peers: Vec<Peer>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl Config {
    pub fn organization(&self, name: &str) -> Option<&Organization> {
        self.organizations.iter().find(|org| org.name == name)
    }

    pub fn consortium(&self, name: &str) -> Option<&Consortium> {
        self.consortiums.iter().find(|c| c.name == name)
    }

    pub fn orderer(&self, name: &str) -> Option<&Orderer> {
        self.orderers.iter().find(|o| o.name == name)
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.channels.iter().find(|c| c.name == name)
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// Peers are only unique per organization, so both parts are needed
    pub fn peer(&self, organization: &str, name: &str) -> Option<&Peer> {
        self.peers
            .iter()
            .find(|p| p.organization == organization && p.name == name)
    }

    pub fn peers_in_org(&self, organization: &str) -> Vec<&Peer> {
        self.peers
            .iter()
            .filter(|p| p.organization == organization)
            .collect()
    }

    /// Organizations hosting at least one orderer, in declaration order
    pub fn orderer_orgs(&self) -> Vec<&Organization> {
        self.organizations
            .iter()
            .filter(|org| self.orderers.iter().any(|o| o.organization == org.name))
            .collect()
    }

    /// Organizations hosting at least one peer, in declaration order
    pub fn peer_orgs(&self) -> Vec<&Organization> {
        self.organizations
            .iter()
            .filter(|org| self.peers.iter().any(|p| p.organization == org.name))
            .collect()
    }

    pub fn peers_on_channel(&self, channel: &str) -> Vec<&Peer> {
        self.peers
            .iter()
            .filter(|p| p.channels.iter().any(|pc| pc.name == channel))
            .collect()
    }

    /// Peers flagged as anchors on `channel`
    pub fn anchors_for_channel(&self, channel: &str) -> Vec<&Peer> {
        self.peers
            .iter()
            .filter(|p| p.channels.iter().any(|pc| pc.name == channel && pc.anchor))
            .collect()
    }
}
