use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct DebounceEntry {
    last_reply: Instant,
    remaining: u32,
}

/// Per-source-IP reply limiter for connectionless clients.
///
/// A reply to an IP opens a window. Inside it, each further reply spends
/// one unit of the burst allowance and pushes the window forward; once the
/// allowance is gone the IP gets nothing until a full window passes
/// without an allowed reply. Keys are IPs, not IP+port: a spoofed victim
/// is the same victim on every port.
///
/// Entries are never evicted; the table grows with the number of distinct
/// sources seen over the process lifetime.
pub struct DebounceGate {
    window: Duration,
    burst: u32,
    entries: DashMap<IpAddr, DebounceEntry, FxBuildHasher>,
}

impl DebounceGate {
    pub fn new(window: Duration, burst: u32) -> Self {
        Self {
            window,
            burst,
            entries: DashMap::with_hasher(FxBuildHasher),
        }
    }

    pub fn allow(&self, ip: IpAddr) -> bool {
        self.allow_at(ip, Instant::now())
    }

    /// Decides whether a reply to `ip` at `now` may be sent, updating the
    /// entry under the shard lock.
    pub fn allow_at(&self, ip: IpAddr, now: Instant) -> bool {
        match self.entries.entry(ip) {
            Entry::Vacant(vacant) => {
                vacant.insert(DebounceEntry {
                    last_reply: now,
                    remaining: self.burst,
                });
                true
            }
            Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();

                if now.saturating_duration_since(entry.last_reply) >= self.window {
                    entry.last_reply = now;
                    entry.remaining = self.burst;
                    return true;
                }

                debug!(
                    client = %ip,
                    window = ?self.window,
                    remaining = entry.remaining,
                    burst = self.burst,
                    "Debounce window since last reply not passed"
                );

                if entry.remaining == 0 {
                    return false;
                }

                entry.remaining -= 1;
                entry.last_reply = now;
                true
            }
        }
    }

    pub fn tracked_sources(&self) -> usize {
        self.entries.len()
    }
}
