//! Standard test networks.
//!
//! [`basic_config`] is the only network built from literal values. Every
//! other constructor starts from the network it derives from and applies a
//! few edits, so the variants stay in step with the base:
//!
//! ```text
//! basic_config <- basic_etcd_raft <- three_org_etcd_raft
//!                                 <- full_etcd_raft
//!                                 <- basic_etcd_raft_with_idemix
//!                                 <- minimal_raft
//!                                 <- multi_node_etcd_raft
//! basic_config <- multi_channel_etcd_raft
//! basic_config <- multi_node_bft
//! ```
//!
//! Each call returns a configuration that owns all of its data.

use crate::config::{
    BootstrapMethod, Ca, Channel, Config, Consensus, ConsensusType, Consortium, MspType, Orderer,
    Organization, Peer, PeerChannel, Profile, SystemChannel,
};
use crate::utils::naming::numbered_names;

pub const ORDERER_ORG: &str = "OrdererOrg";
pub const SAMPLE_CONSORTIUM: &str = "SampleConsortium";
pub const TEST_CHANNEL: &str = "testchannel";
pub const SYSTEM_CHANNEL: &str = "systemchannel";

const RAFT_GENESIS_PROFILE: &str = "SampleDevModeEtcdRaft";
const BFT_GENESIS_PROFILE: &str = "SampleDevModeBFT";
const TWO_ORGS_CHANNEL_PROFILE: &str = "TwoOrgsChannel";

/// Orderer nodes in the multi-node networks
const CLUSTER_SIZE: usize = 3;

fn peer_org(index: u32, enable_node_ous: bool, users: u32) -> Organization {
    Organization {
        name: format!("Org{}", index),
        msp_id: format!("Org{}MSP", index),
        msp_type: MspType::Bccsp,
        domain: format!("org{}.example.com", index),
        enable_node_ous,
        users,
        ca: Ca::default(),
    }
}

fn orderer_cluster() -> Vec<Orderer> {
    numbered_names("orderer", CLUSTER_SIZE)
        .iter()
        .map(|name| Orderer::new(name, ORDERER_ORG))
        .collect()
}

/// Two organizations with one peer each; no consensus type is specified
pub fn basic_config() -> Config {
    Config {
        organizations: vec![
            Organization {
                name: ORDERER_ORG.to_string(),
                msp_id: "OrdererMSP".to_string(),
                msp_type: MspType::Bccsp,
                domain: "example.com".to_string(),
                enable_node_ous: false,
                users: 0,
                ca: Ca::default(),
            },
            peer_org(1, true, 2),
            peer_org(2, true, 2),
        ],
        consortiums: vec![Consortium {
            name: SAMPLE_CONSORTIUM.to_string(),
            organizations: vec!["Org1".to_string(), "Org2".to_string()],
        }],
        consensus: Consensus {
            kind: ConsensusType::Unset,
            bootstrap_method: BootstrapMethod::File,
        },
        system_channel: Some(SystemChannel {
            name: SYSTEM_CHANNEL.to_string(),
            profile: "TwoOrgsOrdererGenesis".to_string(),
        }),
        orderers: vec![Orderer::new("orderer", ORDERER_ORG)],
        channels: vec![Channel::new(TEST_CHANNEL, TWO_ORGS_CHANNEL_PROFILE)],
        peers: vec![
            Peer::new("peer0", "Org1", vec![PeerChannel::anchor(TEST_CHANNEL)]),
            Peer::new("peer0", "Org2", vec![PeerChannel::anchor(TEST_CHANNEL)]),
        ],
        profiles: vec![
            Profile::orderer_genesis("TwoOrgsOrdererGenesis", &["orderer"]),
            Profile::channel(TWO_ORGS_CHANNEL_PROFILE, SAMPLE_CONSORTIUM, &["Org1", "Org2"]),
        ],
    }
}

/// The basic network ordered by a single Raft node
pub fn basic_etcd_raft() -> Config {
    let mut config = basic_config();
    config.set_consensus(ConsensusType::EtcdRaft, RAFT_GENESIS_PROFILE);
    config
}

/// Raft network with a third peer organization on the test channel
pub fn three_org_etcd_raft() -> Config {
    let mut config = basic_etcd_raft();

    config.add_organization(
        peer_org(3, false, 2),
        SAMPLE_CONSORTIUM,
        Some(TWO_ORGS_CHANNEL_PROFILE),
    );
    config.add_peer(Peer::new("peer0", "Org3", vec![PeerChannel::anchor(TEST_CHANNEL)]));
    config.rename_profile(RAFT_GENESIS_PROFILE, "ThreeOrgsOrdererGenesis");
    config.rename_profile(TWO_ORGS_CHANNEL_PROFILE, "ThreeOrgsChannel");

    config
}

/// Raft network with two peers per organization
pub fn full_etcd_raft() -> Config {
    let mut config = basic_etcd_raft();

    for org in ["Org1", "Org2"] {
        config.add_peer(Peer::new("peer1", org, vec![PeerChannel::member(TEST_CHANNEL)]));
    }

    config
}

/// Raft network with an extra Idemix organization in the consortium and
/// channel profile; the Idemix organization runs no peers
pub fn basic_etcd_raft_with_idemix() -> Config {
    let mut config = basic_etcd_raft();

    let mut idemix_org = peer_org(3, false, 0);
    idemix_org.msp_type = MspType::Idemix;
    config.add_organization(idemix_org, SAMPLE_CONSORTIUM, Some(TWO_ORGS_CHANNEL_PROFILE));

    config
}

/// Raft network whose only channel is created by Org1 alone; Org2's peer
/// joins no channel
pub fn minimal_raft() -> Config {
    let mut config = basic_etcd_raft();

    config.leave_all_channels("Org2", "peer0");
    config.replace_profiles(vec![
        Profile::orderer_genesis(RAFT_GENESIS_PROFILE, &["orderer"]),
        Profile::channel("OneOrgChannel", SAMPLE_CONSORTIUM, &["Org1"]),
    ]);
    config.replace_channels(vec![Channel::new(TEST_CHANNEL, "OneOrgChannel")]);

    config
}

/// Raft network with two channels; every peer is an anchor on both
pub fn multi_channel_etcd_raft() -> Config {
    let mut config = basic_config();

    config.set_consensus(ConsensusType::EtcdRaft, RAFT_GENESIS_PROFILE);
    config.replace_channels(vec![
        Channel::new(TEST_CHANNEL, TWO_ORGS_CHANNEL_PROFILE),
        Channel::new("testchannel2", TWO_ORGS_CHANNEL_PROFILE),
    ]);
    config.join_all_channels(true);

    config
}

/// Raft network ordered by a three-node cluster
pub fn multi_node_etcd_raft() -> Config {
    let mut config = basic_etcd_raft();
    config.replace_orderers(orderer_cluster());
    config
}

/// BFT network ordered by a three-node cluster
pub fn multi_node_bft() -> Config {
    let mut config = basic_config();

    config.set_consensus(ConsensusType::Bft, BFT_GENESIS_PROFILE);
    config.replace_orderers(orderer_cluster());

    config
}
