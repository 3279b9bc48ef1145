//! Conditions on the remote address

use crate::context::PredicateContext;
use crate::network::{cmp_fqdn, cmp_ip};
use std::net::IpAddr;

pub(super) fn ip(context: &PredicateContext, value: &str) -> bool {
    let list = if value == "devIP" {
        context.dev_ip_mask.as_str()
    } else {
        value
    };
    cmp_ip(context.remote_addr(), list)
}

/// The remote hostname, or the remote address when it is not a plain IP
pub(super) fn hostname(context: &PredicateContext, value: &str) -> bool {
    let host = match &context.remote_hostname {
        Some(hostname) => hostname.as_str(),
        None => {
            let address = context.remote_addr();
            if address.parse::<IpAddr>().is_ok() {
                tracing::debug!("No hostname known for remote address {}", address);
                return false;
            }
            address
        }
    };
    cmp_fqdn(host, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ip() {
        let context = PredicateContext::new().with_remote_addr("192.168.1.20");
        assert!(ip(&context, "192.168.*.*"));
        assert!(ip(&context, "10.0.0.1, 192.168.1.0/24"));
        assert!(!ip(&context, "10.*"));
    }

    #[test]
    fn test_dev_ip() {
        let context = PredicateContext::new().with_remote_addr("127.0.0.1");
        assert!(ip(&context, "devIP"));

        let context = context.with_dev_ip_mask("10.0.0.1");
        assert!(!ip(&context, "devIP"));
    }

    #[test]
    fn test_hostname() {
        let context = PredicateContext::new()
            .with_remote_addr("203.0.113.7")
            .with_remote_hostname("proxy.example.com");
        assert!(hostname(&context, "*.example.com"));
        assert!(!hostname(&context, "*.example.org"));

        let unresolved = PredicateContext::new().with_remote_addr("203.0.113.7");
        assert!(!hostname(&unresolved, "*"));
    }
}
