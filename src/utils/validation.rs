//! Topology validation.
//!
//! Constructors never check their own output, so this module is the single
//! place where the structural invariants of a [`Config`] are spelled out:
//!
//! - every cross reference resolves inside the same configuration
//! - organization, peer (per organization), channel, profile, orderer and
//!   consortium names are unique
//! - consortium members and profile member lists hold no repeats
//! - Raft and BFT networks have at least one orderer
//! - profiles are referenced by the right kind of channel
//! - domains and CA hostnames are usable DNS names
//!
//! [`validate`] collects every violation instead of stopping at the first
//! one, so a broken constructor can be diagnosed in a single test run.

use crate::config::{Config, ConsensusType, ProfileKind};
use crate::utils::naming::is_valid_dns_name;
use std::collections::HashSet;

/// A single broken invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("{referrer} references unknown organization '{organization}'")]
    UnknownOrganization { referrer: String, organization: String },

    #[error("{referrer} references unknown profile '{profile}'")]
    UnknownProfile { referrer: String, profile: String },

    #[error("peer {peer} joins unknown channel '{channel}'")]
    UnknownChannel { peer: String, channel: String },

    #[error("profile '{profile}' references unknown consortium '{consortium}'")]
    UnknownConsortium { profile: String, consortium: String },

    #[error("profile '{profile}' references unknown orderer '{orderer}'")]
    UnknownOrderer { profile: String, orderer: String },

    #[error("profile '{profile}' lists '{organization}' outside consortium '{consortium}'")]
    NotConsortiumMember {
        profile: String,
        consortium: String,
        organization: String,
    },

    #[error("{referrer} expects a {expected} profile but '{profile}' is not one")]
    WrongProfileKind {
        referrer: String,
        profile: String,
        expected: &'static str,
    },

    #[error("duplicate {collection} name '{name}'")]
    DuplicateName { collection: &'static str, name: String },

    #[error("duplicate peer '{name}' in organization '{organization}'")]
    DuplicatePeer { name: String, organization: String },

    #[error("{owner} lists '{name}' more than once")]
    DuplicateMember { owner: String, name: String },

    #[error("peer {peer} joins channel '{channel}' more than once")]
    DuplicateMembership { peer: String, channel: String },

    #[error("consensus type {consensus} requires at least one orderer")]
    MissingOrderers { consensus: ConsensusType },

    #[error("organization '{organization}' has invalid {field} '{value}'")]
    InvalidHostname {
        organization: String,
        field: &'static str,
        value: String,
    },
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", describe_violations(.0))]
    Invariants(Vec<Violation>),
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        match self {
            ValidationError::Invariants(violations) => violations,
        }
    }
}

fn describe_violations(violations: &[Violation]) -> String {
    let joined = violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    format!("configuration violates {} invariant(s): {}", violations.len(), joined)
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let violations = validate(self);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invariants(violations))
        }
    }
}

/// Check every invariant of `config` and return all violations found
///
/// An empty result means the configuration is safe to hand to the crypto,
/// genesis and process generators.
///
/// # Examples
/// ```
/// use testnet_topology::networks::basic_config;
/// use testnet_topology::utils::validation::validate;
///
/// assert!(validate(&basic_config()).is_empty());
/// ```
pub fn validate(config: &Config) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_unique_names(config, &mut violations);
    check_organizations(config, &mut violations);
    check_consortiums(config, &mut violations);
    check_orderers(config, &mut violations);
    check_channels(config, &mut violations);
    check_peers(config, &mut violations);
    check_profiles(config, &mut violations);

    if !violations.is_empty() {
        log::debug!("Found {} violation(s) in configuration", violations.len());
    }
    violations
}

fn duplicates<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut dups = Vec::new();
    for name in names {
        if !seen.insert(name) && reported.insert(name) {
            dups.push(name.to_string());
        }
    }
    dups
}

fn check_unique_names(config: &Config, violations: &mut Vec<Violation>) {
    let collections: [(&'static str, Vec<String>); 5] = [
        (
            "organization",
            duplicates(config.organizations.iter().map(|o| o.name.as_str())),
        ),
        (
            "consortium",
            duplicates(config.consortiums.iter().map(|c| c.name.as_str())),
        ),
        ("orderer", duplicates(config.orderers.iter().map(|o| o.name.as_str()))),
        ("channel", duplicates(config.channels.iter().map(|c| c.name.as_str()))),
        ("profile", duplicates(config.profiles.iter().map(|p| p.name.as_str()))),
    ];
    for (collection, names) in collections {
        for name in names {
            violations.push(Violation::DuplicateName { collection, name });
        }
    }

    let mut seen = HashSet::new();
    for peer in &config.peers {
        if !seen.insert((peer.organization.as_str(), peer.name.as_str())) {
            violations.push(Violation::DuplicatePeer {
                name: peer.name.clone(),
                organization: peer.organization.clone(),
            });
        }
    }
}

fn check_organizations(config: &Config, violations: &mut Vec<Violation>) {
    for org in &config.organizations {
        if !is_valid_dns_name(&org.domain) {
            violations.push(Violation::InvalidHostname {
                organization: org.name.clone(),
                field: "domain",
                value: org.domain.clone(),
            });
        }
        if !is_valid_dns_name(&org.ca.hostname) {
            violations.push(Violation::InvalidHostname {
                organization: org.name.clone(),
                field: "CA hostname",
                value: org.ca.hostname.clone(),
            });
        }
    }
}

fn check_organization_ref(
    config: &Config,
    referrer: impl FnOnce() -> String,
    organization: &str,
    violations: &mut Vec<Violation>,
) {
    if config.organization(organization).is_none() {
        violations.push(Violation::UnknownOrganization {
            referrer: referrer(),
            organization: organization.to_string(),
        });
    }
}

fn check_members(owner: impl Fn() -> String, members: &[String], violations: &mut Vec<Violation>) {
    for name in duplicates(members.iter().map(String::as_str)) {
        violations.push(Violation::DuplicateMember {
            owner: owner(),
            name,
        });
    }
}

fn check_consortiums(config: &Config, violations: &mut Vec<Violation>) {
    for consortium in &config.consortiums {
        let owner = || format!("consortium '{}'", consortium.name);
        for member in &consortium.organizations {
            check_organization_ref(config, owner, member, violations);
        }
        check_members(owner, &consortium.organizations, violations);
    }
}

fn check_orderers(config: &Config, violations: &mut Vec<Violation>) {
    if config.consensus.kind.requires_orderers() && config.orderers.is_empty() {
        violations.push(Violation::MissingOrderers {
            consensus: config.consensus.kind,
        });
    }

    for orderer in &config.orderers {
        let referrer = || format!("orderer '{}'", orderer.name);
        check_organization_ref(config, referrer, &orderer.organization, violations);
    }
}

/// Resolve a profile reference and check that it has the expected kind
fn check_profile_ref(
    config: &Config,
    referrer: String,
    profile: &str,
    want_genesis: bool,
    violations: &mut Vec<Violation>,
) {
    match config.profile(profile) {
        None => violations.push(Violation::UnknownProfile {
            referrer,
            profile: profile.to_string(),
        }),
        Some(p) if p.is_orderer_genesis() != want_genesis => {
            violations.push(Violation::WrongProfileKind {
                referrer,
                profile: profile.to_string(),
                expected: if want_genesis { "orderer genesis" } else { "channel" },
            })
        }
        Some(_) => {}
    }
}

fn check_channels(config: &Config, violations: &mut Vec<Violation>) {
    if let Some(system_channel) = &config.system_channel {
        check_profile_ref(
            config,
            format!("system channel '{}'", system_channel.name),
            &system_channel.profile,
            true,
            violations,
        );
    }

    for channel in &config.channels {
        let referrer = format!("channel '{}'", channel.name);
        check_profile_ref(config, referrer, &channel.profile, false, violations);
    }
}

fn check_peers(config: &Config, violations: &mut Vec<Violation>) {
    for peer in &config.peers {
        check_organization_ref(
            config,
            || format!("peer {}", peer.id()),
            &peer.organization,
            violations,
        );

        let mut joined = HashSet::new();
        for membership in &peer.channels {
            if config.channel(&membership.name).is_none() {
                violations.push(Violation::UnknownChannel {
                    peer: peer.id(),
                    channel: membership.name.clone(),
                });
            }
            if !joined.insert(membership.name.as_str()) {
                violations.push(Violation::DuplicateMembership {
                    peer: peer.id(),
                    channel: membership.name.clone(),
                });
            }
        }
    }
}

fn check_profiles(config: &Config, violations: &mut Vec<Violation>) {
    for profile in &config.profiles {
        let owner = || format!("profile '{}'", profile.name);
        match &profile.kind {
            ProfileKind::OrdererGenesis { orderers } => {
                check_members(owner, orderers, violations);
                for orderer in orderers {
                    if config.orderer(orderer).is_none() {
                        violations.push(Violation::UnknownOrderer {
                            profile: profile.name.clone(),
                            orderer: orderer.clone(),
                        });
                    }
                }
            }
            ProfileKind::Channel {
                consortium,
                organizations,
            } => {
                check_members(owner, organizations, violations);
                for org in organizations {
                    check_organization_ref(config, owner, org, violations);
                }

                let Some(members) = config.consortium(consortium) else {
                    violations.push(Violation::UnknownConsortium {
                        profile: profile.name.clone(),
                        consortium: consortium.clone(),
                    });
                    continue;
                };
                for org in organizations {
                    if !members.organizations.contains(org) {
                        violations.push(Violation::NotConsortiumMember {
                            profile: profile.name.clone(),
                            consortium: consortium.clone(),
                            organization: org.clone(),
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Channel, Orderer, Peer, PeerChannel, Profile};
    use crate::networks::{basic_config, basic_etcd_raft};

    #[test]
    fn test_basic_config_is_valid() {
        assert!(validate(&basic_config()).is_empty());
        assert!(basic_config().validate().is_ok());
    }

    #[test]
    fn test_dangling_references() {
        let mut config = basic_config();
        config.consortiums[0].organizations.push("Org9".to_string());
        config.orderers.push(Orderer::new("orderer2", "Nowhere"));
        config.channels.push(Channel::new("lostchannel", "MissingProfile"));
        config.peers[0].channels.push(PeerChannel::anchor("ghostchannel"));

        let violations = validate(&config);
        assert!(violations.contains(&Violation::UnknownOrganization {
            referrer: "consortium 'SampleConsortium'".to_string(),
            organization: "Org9".to_string(),
        }));
        assert!(violations.contains(&Violation::UnknownOrganization {
            referrer: "orderer 'orderer2'".to_string(),
            organization: "Nowhere".to_string(),
        }));
        assert!(violations.contains(&Violation::UnknownProfile {
            referrer: "channel 'lostchannel'".to_string(),
            profile: "MissingProfile".to_string(),
        }));
        assert!(violations.contains(&Violation::UnknownChannel {
            peer: "Org1.peer0".to_string(),
            channel: "ghostchannel".to_string(),
        }));
        assert_eq!(violations.len(), 4);
    }

    #[test]
    fn test_profile_references() {
        let mut config = basic_config();
        config.profiles.push(Profile::orderer_genesis("Broken", &["orderer", "orderer7"]));
        config.profiles.push(Profile::channel(
            "Outsider",
            "SampleConsortium",
            &["Org1", "OrdererOrg"],
        ));
        config.profiles.push(Profile::channel("Orphan", "OtherConsortium", &["Org1"]));

        let violations = validate(&config);
        assert!(violations.contains(&Violation::UnknownOrderer {
            profile: "Broken".to_string(),
            orderer: "orderer7".to_string(),
        }));
        assert!(violations.contains(&Violation::NotConsortiumMember {
            profile: "Outsider".to_string(),
            consortium: "SampleConsortium".to_string(),
            organization: "OrdererOrg".to_string(),
        }));
        assert!(violations.contains(&Violation::UnknownConsortium {
            profile: "Orphan".to_string(),
            consortium: "OtherConsortium".to_string(),
        }));
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_wrong_profile_kind() {
        let mut config = basic_config();
        config.channels[0].profile = "TwoOrgsOrdererGenesis".to_string();
        if let Some(system_channel) = config.system_channel.as_mut() {
            system_channel.profile = "TwoOrgsChannel".to_string();
        }

        let violations = validate(&config);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| matches!(v, Violation::WrongProfileKind { .. })));
    }

    #[test]
    fn test_duplicates() {
        let mut config = basic_config();
        let org1 = config.organizations[1].clone();
        config.organizations.push(org1.clone());
        config.organizations.push(org1);
        config.peers.push(Peer::new("peer0", "Org1", vec![]));
        config.peers.push(Peer::new("peer0", "OrdererOrg", vec![]));
        config.channels.push(config.channels[0].clone());
        config.profiles.push(config.profiles[1].clone());
        config.peers[1].channels.push(PeerChannel::member("testchannel"));

        let violations = validate(&config);
        // A name repeated three times is reported once
        assert!(violations.contains(&Violation::DuplicateName {
            collection: "organization",
            name: "Org1".to_string(),
        }));
        assert!(violations.contains(&Violation::DuplicateName {
            collection: "channel",
            name: "testchannel".to_string(),
        }));
        assert!(violations.contains(&Violation::DuplicateName {
            collection: "profile",
            name: "TwoOrgsChannel".to_string(),
        }));
        assert!(violations.contains(&Violation::DuplicatePeer {
            name: "peer0".to_string(),
            organization: "Org1".to_string(),
        }));
        assert!(violations.contains(&Violation::DuplicateMembership {
            peer: "Org2.peer0".to_string(),
            channel: "testchannel".to_string(),
        }));
        assert_eq!(violations.len(), 5);
    }

    #[test]
    fn test_duplicate_set_members() {
        let mut config = basic_config();
        config.consortiums[0].organizations.push("Org1".to_string());
        config.profiles[0] =
            Profile::orderer_genesis("TwoOrgsOrdererGenesis", &["orderer", "orderer"]);
        config.profiles[1] =
            Profile::channel("TwoOrgsChannel", "SampleConsortium", &["Org1", "Org2", "Org2"]);

        let violations = validate(&config);
        assert_eq!(
            violations,
            vec![
                Violation::DuplicateMember {
                    owner: "consortium 'SampleConsortium'".to_string(),
                    name: "Org1".to_string(),
                },
                Violation::DuplicateMember {
                    owner: "profile 'TwoOrgsOrdererGenesis'".to_string(),
                    name: "orderer".to_string(),
                },
                Violation::DuplicateMember {
                    owner: "profile 'TwoOrgsChannel'".to_string(),
                    name: "Org2".to_string(),
                },
            ]
        );
        assert!(violations[0].to_string().contains("lists 'Org1' more than once"));
    }

    #[test]
    fn test_missing_orderers() {
        let mut config = basic_etcd_raft();
        config.orderers.clear();
        config.profiles[0] = Profile::orderer_genesis("SampleDevModeEtcdRaft", &[]);

        let violations = validate(&config);
        assert_eq!(
            violations,
            vec![Violation::MissingOrderers {
                consensus: ConsensusType::EtcdRaft
            }]
        );

        // Unset consensus tolerates an empty ordering service
        let mut config = basic_config();
        config.orderers.clear();
        config.profiles[0] = Profile::orderer_genesis("TwoOrgsOrdererGenesis", &[]);
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn test_invalid_hostnames() {
        let mut config = basic_config();
        config.organizations[1].domain = "org 1.example.com".to_string();
        config.organizations[2].ca.hostname = "ca_".to_string();

        let err = config.validate().unwrap_err();
        assert_eq!(err.violations().len(), 2);
        let message = err.to_string();
        assert!(message.contains("violates 2 invariant(s)"));
        assert!(message.contains("organization 'Org1' has invalid domain 'org 1.example.com'"));
        assert!(message.contains("organization 'Org2' has invalid CA hostname 'ca_'"));
    }
}
