use std::fmt::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Canonical reverse-lookup name for `addr`, fully qualified.
///
/// IPv4-mapped IPv6 addresses are written in the `in-addr.arpa.` form,
/// so an AAAA answer of `::ffff:1.2.3.4` lands on the same key as an A
/// answer of `1.2.3.4`.
pub fn reverse_name(addr: IpAddr) -> String {
    match addr {
        IpAddr::V4(v4) => reverse_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => reverse_v4(v4),
            None => reverse_v6(v6),
        },
    }
}

fn reverse_v4(addr: Ipv4Addr) -> String {
    let [a, b, c, d] = addr.octets();
    format!("{}.{}.{}.{}.in-addr.arpa.", d, c, b, a)
}

fn reverse_v6(addr: Ipv6Addr) -> String {
    let mut name = String::with_capacity(73);
    for byte in addr.octets().iter().rev() {
        let _ = write!(name, "{:x}.{:x}.", byte & 0x0f, byte >> 4);
    }
    name.push_str("ip6.arpa.");
    name
}
