//! IP address and hostname list matching

use std::net::{Ipv4Addr, Ipv6Addr};
use typoscript_core::types::trim_explode;

/// Whether `base_ip` matches any entry of the comma-separated `list`
///
/// IPv4 entries may be full addresses, prefixes (`192.168`), wildcard
/// patterns (`192.168.*.1`) or CIDR ranges (`10.0.0.0/8`). IPv6 entries may
/// be full addresses or CIDR ranges. `*` alone matches any address.
pub fn cmp_ip(base_ip: &str, list: &str) -> bool {
    let base_ip = base_ip.trim();
    let list = list.trim();
    if list.is_empty() {
        return false;
    }
    if list == "*" {
        return true;
    }

    if base_ip.contains(':') {
        match base_ip.parse::<Ipv6Addr>() {
            Ok(address) => cmp_ipv6(address, list),
            Err(_) => false,
        }
    } else {
        cmp_ipv4(base_ip, list)
    }
}

fn cmp_ipv4(base_ip: &str, list: &str) -> bool {
    let request_parts: Vec<&str> = base_ip.split('.').collect();
    if request_parts.len() != 4 {
        return false;
    }

    trim_explode(',', list, true).iter().any(|test| {
        let (address, mask) = match test.split_once('/') {
            Some((address, mask)) => (address.trim(), mask.trim().parse::<u32>().unwrap_or(0)),
            None => (test.as_str(), 0),
        };

        if mask > 0 {
            match (address.parse::<Ipv4Addr>(), base_ip.parse::<Ipv4Addr>()) {
                (Ok(network), Ok(ip)) => prefix_matches_u32(u32::from(network), u32::from(ip), mask.min(32)),
                _ => false,
            }
        } else {
            let test_parts: Vec<&str> = address.split('.').collect();
            test_parts.len() <= 4
                && test_parts
                    .iter()
                    .zip(&request_parts)
                    .all(|(part, request)| part.trim() == "*" || part.trim() == *request)
        }
    })
}

fn cmp_ipv6(address: Ipv6Addr, list: &str) -> bool {
    let ip = u128::from(address);
    trim_explode(',', list, true).iter().any(|test| {
        let (network, mask) = match test.split_once('/') {
            Some((network, mask)) => (network.trim(), mask.trim().parse::<u32>().unwrap_or(128)),
            None => (test.as_str(), 128),
        };
        match network.parse::<Ipv6Addr>() {
            Ok(network) => prefix_matches_u128(u128::from(network), ip, mask.min(128)),
            Err(_) => false,
        }
    })
}

fn prefix_matches_u32(network: u32, ip: u32, bits: u32) -> bool {
    if bits == 0 {
        return true;
    }
    let shift = 32 - bits;
    network.checked_shr(shift).unwrap_or(0) == ip.checked_shr(shift).unwrap_or(0)
}

fn prefix_matches_u128(network: u128, ip: u128, bits: u32) -> bool {
    if bits == 0 {
        return true;
    }
    let shift = 128 - bits;
    network.checked_shr(shift).unwrap_or(0) == ip.checked_shr(shift).unwrap_or(0)
}

/// Whether `base_host` matches any entry of the comma-separated `list`
///
/// Entries are compared label by label from the left. `*` matches one or
/// more labels; an entry shorter than the hostname matches its leading
/// labels.
pub fn cmp_fqdn(base_host: &str, list: &str) -> bool {
    let base_host = base_host.trim();
    if base_host.is_empty() {
        return false;
    }
    let base_labels: Vec<&str> = base_host.split('.').collect();

    trim_explode(',', list, true).iter().any(|test| {
        let test_labels: Vec<&str> = test.split('.').map(str::trim).collect();
        labels_match(&base_labels, &test_labels)
    })
}

fn labels_match(base: &[&str], test: &[&str]) -> bool {
    if test.len() > base.len() {
        return false;
    }

    for (index, label) in test.iter().enumerate() {
        if *label == "*" {
            let rest = &test[index + 1..];
            if rest.is_empty() {
                return true;
            }
            return (index + 1..base.len()).any(|start| labels_match(&base[start..], rest));
        }
        if base[index] != *label {
            return false;
        }
    }
    true
}
