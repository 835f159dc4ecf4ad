//! Structural edits used to derive one network from another.
//!
//! Each edit keeps the configuration's cross references consistent: renaming
//! a profile rewrites every channel that uses it, replacing orderers rewrites
//! the genesis profiles, replacing channels prunes peer memberships. Edits
//! that target an entity which does not exist, or that would add a name
//! which is already taken, panic: that can only be a mistake in the calling
//! constructor.

use crate::config::{
    Channel, Config, Consortium, ConsensusType, Orderer, Organization, Peer, PeerChannel, Profile,
    ProfileKind, SystemChannel,
};

impl Config {
    fn consortium_mut(&mut self, name: &str) -> &mut Consortium {
        self.consortiums
            .iter_mut()
            .find(|c| c.name == name)
            .unwrap_or_else(|| panic!("no consortium named '{}' in configuration", name))
    }

    fn profile_mut(&mut self, name: &str) -> &mut Profile {
        self.profiles
            .iter_mut()
            .find(|p| p.name == name)
            .unwrap_or_else(|| panic!("no profile named '{}' in configuration", name))
    }

    fn peer_mut(&mut self, organization: &str, name: &str) -> &mut Peer {
        self.peers
            .iter_mut()
            .find(|p| p.organization == organization && p.name == name)
            .unwrap_or_else(|| panic!("no peer '{}' in organization '{}'", name, organization))
    }

    fn system_channel_mut(&mut self) -> &mut SystemChannel {
        self.system_channel
            .as_mut()
            .unwrap_or_else(|| panic!("configuration has no system channel"))
    }

    /// Append `organization`, enroll it in `consortium` and, when given, in
    /// the member list of `channel_profile`
    pub fn add_organization(
        &mut self,
        organization: Organization,
        consortium: &str,
        channel_profile: Option<&str>,
    ) {
        let name = organization.name.clone();
        if self.organization(&name).is_some() {
            panic!("organization '{}' already exists in configuration", name);
        }
        self.consortium_mut(consortium).organizations.push(name.clone());

        if let Some(profile_name) = channel_profile {
            match &mut self.profile_mut(profile_name).kind {
                ProfileKind::Channel {
                    consortium: owner,
                    organizations,
                } => {
                    if owner.as_str() != consortium {
                        panic!(
                            "profile '{}' belongs to consortium '{}', not '{}'",
                            profile_name, owner, consortium
                        );
                    }
                    organizations.push(name);
                }
                ProfileKind::OrdererGenesis { .. } => {
                    panic!("profile '{}' is not a channel profile", profile_name)
                }
            }
        }

        self.organizations.push(organization);
    }

    /// Switch the consensus type and rename the system channel's genesis
    /// profile to the one that type implies
    pub fn set_consensus(&mut self, kind: ConsensusType, genesis_profile: &str) {
        self.consensus.kind = kind;
        let current = self.system_channel_mut().profile.clone();
        self.rename_profile(&current, genesis_profile);
    }

    /// Rename a profile along with every reference to it
    pub fn rename_profile(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        if self.profile(to).is_some() {
            panic!("profile '{}' already exists in configuration", to);
        }
        self.profile_mut(from).name = to.to_string();

        if let Some(system_channel) = self.system_channel.as_mut() {
            if system_channel.profile == from {
                system_channel.profile = to.to_string();
            }
        }
        for channel in self.channels.iter_mut().filter(|c| c.profile == from) {
            channel.profile = to.to_string();
        }
    }

    /// Append a peer; its name must be new within its organization
    pub fn add_peer(&mut self, peer: Peer) {
        if self.peer(&peer.organization, &peer.name).is_some() {
            panic!("peer '{}' already exists in organization '{}'", peer.name, peer.organization);
        }
        self.peers.push(peer);
    }

    /// Drop every channel membership of one peer
    pub fn leave_all_channels(&mut self, organization: &str, name: &str) {
        self.peer_mut(organization, name).channels.clear();
    }

    /// Replace the ordering service; genesis profiles now list the new nodes
    pub fn replace_orderers(&mut self, orderers: Vec<Orderer>) {
        let names: Vec<String> = orderers.iter().map(|o| o.name.clone()).collect();
        for profile in &mut self.profiles {
            if let ProfileKind::OrdererGenesis { orderers } = &mut profile.kind {
                *orderers = names.clone();
            }
        }
        self.orderers = orderers;
    }

    /// Replace the application channels, pruning memberships in channels
    /// that no longer exist
    pub fn replace_channels(&mut self, channels: Vec<Channel>) {
        self.channels = channels;
        let channels = &self.channels;
        for peer in &mut self.peers {
            peer.channels
                .retain(|membership| channels.iter().any(|c| c.name == membership.name));
        }
    }

    /// Make every peer a member of every channel
    pub fn join_all_channels(&mut self, anchor: bool) {
        let memberships: Vec<PeerChannel> = self
            .channels
            .iter()
            .map(|c| PeerChannel {
                name: c.name.clone(),
                anchor,
            })
            .collect();
        for peer in &mut self.peers {
            peer.channels = memberships.clone();
        }
    }

    /// Replace the profile set wholesale; channels are not rewritten
    pub fn replace_profiles(&mut self, profiles: Vec<Profile>) {
        self.profiles = profiles;
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{
        Channel, ConsensusType, Consortium, Orderer, Organization, Peer, PeerChannel, Profile,
    };
    use crate::networks::basic_config;
    use crate::utils::validation::validate;

    #[test]
    fn test_rename_profile_updates_references() {
        let mut config = basic_config();
        config.rename_profile("TwoOrgsChannel", "RenamedChannel");
        config.rename_profile("TwoOrgsOrdererGenesis", "RenamedGenesis");

        assert_eq!(config.channels[0].profile, "RenamedChannel");
        assert_eq!(config.system_channel.as_ref().unwrap().profile, "RenamedGenesis");
        assert!(config.profile("TwoOrgsChannel").is_none());
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn test_set_consensus() {
        let mut config = basic_config();
        config.set_consensus(ConsensusType::Bft, "SampleDevModeBFT");

        assert_eq!(config.consensus.kind, ConsensusType::Bft);
        assert_eq!(config.profiles[0].name, "SampleDevModeBFT");
        assert_eq!(config.system_channel.as_ref().unwrap().profile, "SampleDevModeBFT");
        assert!(validate(&config).is_empty());
    }

    fn org3() -> Organization {
        Organization {
            name: "Org3".to_string(),
            msp_id: "Org3MSP".to_string(),
            msp_type: Default::default(),
            domain: "org3.example.com".to_string(),
            enable_node_ous: true,
            users: 1,
            ca: Default::default(),
        }
    }

    #[test]
    fn test_add_organization_to_consortium_and_profile() {
        let mut config = basic_config();
        config.add_organization(org3(), "SampleConsortium", Some("TwoOrgsChannel"));

        assert_eq!(config.organizations.len(), 4);
        assert_eq!(config.consortiums[0].organizations, vec!["Org1", "Org2", "Org3"]);
        assert_eq!(config.profile("TwoOrgsChannel").unwrap().organizations().len(), 3);
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn test_replace_orderers_rewrites_genesis_profiles() {
        let mut config = basic_config();
        config.replace_orderers(vec![
            Orderer::new("orderer1", "OrdererOrg"),
            Orderer::new("orderer2", "OrdererOrg"),
        ]);

        assert_eq!(config.profiles[0].orderers(), ["orderer1", "orderer2"].map(String::from));
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn test_replace_channels_prunes_memberships() {
        let mut config = basic_config();
        config.peers[0].channels.push(PeerChannel::member("otherchannel"));
        config.replace_channels(vec![Channel::new("otherchannel", "TwoOrgsChannel")]);

        assert_eq!(config.peers[0].channels, vec![PeerChannel::member("otherchannel")]);
        assert!(config.peers[1].channels.is_empty());
        assert!(validate(&config).is_empty());

        config.join_all_channels(true);
        assert!(config
            .peers
            .iter()
            .all(|p| p.channels == vec![PeerChannel::anchor("otherchannel")]));
    }

    #[test]
    fn test_add_peer_and_leave_channels() {
        let mut config = basic_config();
        config.add_peer(Peer::new("peer1", "Org1", vec![PeerChannel::member("testchannel")]));
        config.leave_all_channels("Org1", "peer1");

        assert!(config.peer("Org1", "peer1").unwrap().channels.is_empty());
        assert_eq!(config.peers_in_org("Org1").len(), 2);
    }

    #[test]
    fn test_replace_profiles() {
        let mut config = basic_config();
        config.replace_profiles(vec![Profile::orderer_genesis(
            "TwoOrgsOrdererGenesis",
            &["orderer"],
        )]);

        // Channel now points at a profile that is gone
        assert_eq!(validate(&config).len(), 1);
    }

    #[test]
    #[should_panic(expected = "no profile named 'Missing'")]
    fn test_rename_missing_profile_panics() {
        basic_config().rename_profile("Missing", "Other");
    }

    #[test]
    #[should_panic(expected = "no peer 'peer7' in organization 'Org1'")]
    fn test_missing_peer_panics() {
        basic_config().leave_all_channels("Org1", "peer7");
    }

    #[test]
    #[should_panic(expected = "is not a channel profile")]
    fn test_add_organization_to_genesis_profile_panics() {
        basic_config().add_organization(org3(), "SampleConsortium", Some("TwoOrgsOrdererGenesis"));
    }

    #[test]
    #[should_panic(expected = "no consortium named 'Nope'")]
    fn test_missing_consortium_panics() {
        basic_config().add_organization(org3(), "Nope", None);
    }

    #[test]
    #[should_panic(expected = "organization 'Org1' already exists")]
    fn test_add_existing_organization_panics() {
        let mut config = basic_config();
        let org1 = config.organizations[1].clone();
        config.add_organization(org1, "SampleConsortium", Some("TwoOrgsChannel"));
    }

    #[test]
    #[should_panic(expected = "belongs to consortium 'SampleConsortium', not 'OtherConsortium'")]
    fn test_add_organization_with_foreign_profile_panics() {
        let mut config = basic_config();
        config.consortiums.push(Consortium {
            name: "OtherConsortium".to_string(),
            organizations: vec![],
        });
        config.add_organization(org3(), "OtherConsortium", Some("TwoOrgsChannel"));
    }

    #[test]
    #[should_panic(expected = "profile 'TwoOrgsChannel' already exists")]
    fn test_rename_onto_existing_profile_panics() {
        basic_config().rename_profile("TwoOrgsOrdererGenesis", "TwoOrgsChannel");
    }

    #[test]
    #[should_panic(expected = "peer 'peer0' already exists in organization 'Org2'")]
    fn test_add_existing_peer_panics() {
        basic_config().add_peer(Peer::new("peer0", "Org2", vec![]));
    }
}
