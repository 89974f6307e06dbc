use passdns_domain::{DnsProtocol, UpstreamAddr};

#[test]
fn test_parse_udp() {
    let protocol: DnsProtocol = "udp://8.8.8.8:53".parse().unwrap();
    assert_eq!(
        protocol,
        DnsProtocol::Udp {
            addr: UpstreamAddr::Resolved("8.8.8.8:53".parse().unwrap())
        }
    );
}

#[test]
fn test_parse_udp_default() {
    let protocol: DnsProtocol = "8.8.8.8:53".parse().unwrap();
    assert!(matches!(protocol, DnsProtocol::Udp { .. }));
}

#[test]
fn test_parse_tcp() {
    let protocol: DnsProtocol = "tcp://8.8.8.8:53".parse().unwrap();
    assert!(matches!(protocol, DnsProtocol::Tcp { .. }));
}

#[test]
fn test_parse_tcp_tls() {
    let protocol: DnsProtocol = "tcp-tls://1.1.1.1:853".parse().unwrap();
    if let DnsProtocol::Tls { hostname, addr } = protocol {
        assert_eq!(&*hostname, "1.1.1.1");
        assert_eq!(addr, UpstreamAddr::Resolved("1.1.1.1:853".parse().unwrap()));
    } else {
        panic!("Expected Tls variant");
    }
}

#[test]
fn test_parse_tls_alias_with_hostname() {
    let protocol: DnsProtocol = "tls://dns.google:853".parse().unwrap();
    if let DnsProtocol::Tls { hostname, addr } = protocol {
        assert_eq!(&*hostname, "dns.google");
        assert_eq!(
            addr,
            UpstreamAddr::Unresolved {
                hostname: "dns.google".into(),
                port: 853
            }
        );
    } else {
        panic!("Expected Tls variant");
    }
}

#[test]
fn test_parse_ipv6_bracketed() {
    let protocol: DnsProtocol = "udp://[2606:4700:4700::1111]:53".parse().unwrap();
    assert_eq!(
        protocol,
        DnsProtocol::Udp {
            addr: UpstreamAddr::Resolved("[2606:4700:4700::1111]:53".parse().unwrap())
        }
    );
}

#[test]
fn test_parse_hostname_udp_is_unresolved() {
    let protocol: DnsProtocol = "resolver.lan:5353".parse().unwrap();
    assert_eq!(
        protocol,
        DnsProtocol::Udp {
            addr: UpstreamAddr::Unresolved {
                hostname: "resolver.lan".into(),
                port: 5353
            }
        }
    );
}

#[test]
fn test_parse_rejects_unknown_scheme() {
    let result: Result<DnsProtocol, _> = "https://dns.google/dns-query".parse();
    assert!(result.is_err());
}

#[test]
fn test_parse_rejects_missing_port() {
    let result: Result<DnsProtocol, _> = "udp://8.8.8.8".parse();
    assert!(result.is_err());
}

#[test]
fn test_display_round_trips_scheme() {
    let protocol: DnsProtocol = "tcp-tls://9.9.9.9:853".parse().unwrap();
    assert_eq!(protocol.to_string(), "tcp-tls://9.9.9.9:853");

    let protocol: DnsProtocol = "8.8.4.4:53".parse().unwrap();
    assert_eq!(protocol.to_string(), "udp://8.8.4.4:53");
}
