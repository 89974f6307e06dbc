mod debounce_gate;
mod passive_cache;

pub use debounce_gate::DebounceGate;
pub use passive_cache::PassiveCache;
