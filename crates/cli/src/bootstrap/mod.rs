mod logging;
mod privileges;

pub use logging::init_logging;
pub use privileges::drop_privileges;

/// Logged next to permission errors on privileged operations.
pub const PRIVILEGE_HINT: &str = "grant the binary cap_net_bind_service,cap_sys_chroot \
(setcap cap_net_bind_service,cap_sys_chroot=ep), listen on a port above 1024, \
or disable the chroot with --chroot \"\"";
