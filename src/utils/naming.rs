//! Naming helpers shared by the network constructors and the validator.

use regex::Regex;
use std::sync::LazyLock;

/// One DNS label per dot-separated segment, RFC 1123 style
static DNS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i)[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*$")
        .expect("DNS name pattern is valid")
});

const MAX_DNS_NAME_LEN: usize = 253;

/// Check whether `name` can be used as a host or domain name
///
/// # Examples
/// ```
/// use testnet_topology::utils::naming::is_valid_dns_name;
///
/// assert!(is_valid_dns_name("org1.example.com"));
/// assert!(is_valid_dns_name("ca"));
/// assert!(!is_valid_dns_name("org_1.example.com"));
/// assert!(!is_valid_dns_name(""));
/// ```
pub fn is_valid_dns_name(name: &str) -> bool {
    name.len() <= MAX_DNS_NAME_LEN && DNS_NAME.is_match(name)
}

/// Generate `prefix1`, `prefix2`, ... `prefixN`
///
/// # Examples
/// ```
/// use testnet_topology::utils::naming::numbered_names;
///
/// assert_eq!(numbered_names("orderer", 3), vec!["orderer1", "orderer2", "orderer3"]);
/// assert!(numbered_names("orderer", 0).is_empty());
/// ```
pub fn numbered_names(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{}{}", prefix, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_names() {
        assert!(is_valid_dns_name("example.com"));
        assert!(is_valid_dns_name("Org2.Example.COM"));
        assert!(is_valid_dns_name("a-b.c"));

        assert!(!is_valid_dns_name("-leading.example.com"));
        assert!(!is_valid_dns_name("trailing-.example.com"));
        assert!(!is_valid_dns_name("double..dot"));
        assert!(!is_valid_dns_name("space here"));
        assert!(!is_valid_dns_name(&"a".repeat(64)));
        assert!(!is_valid_dns_name(&format!("{}com", "a.".repeat(130))));
    }
}
