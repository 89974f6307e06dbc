use passdns_domain::config::PrivilegeConfig;
use passdns_domain::ConfigError;

#[cfg(unix)]
pub fn drop_privileges(config: &PrivilegeConfig) -> Result<(), ConfigError> {
    use std::io::ErrorKind;
    use tracing::{error, info};

    if config.chroot.is_empty() {
        return Ok(());
    }

    std::os::unix::fs::chroot(&config.chroot)
        .and_then(|_| std::env::set_current_dir("/"))
        .map_err(|e| {
            if e.kind() == ErrorKind::PermissionDenied {
                error!(hint = super::PRIVILEGE_HINT, "Not permitted to chroot");
            }
            ConfigError::PrivilegeDrop {
                path: config.chroot.clone(),
                reason: e.to_string(),
            }
        })?;

    info!(path = %config.chroot, "Chrooted");
    Ok(())
}

#[cfg(not(unix))]
pub fn drop_privileges(config: &PrivilegeConfig) -> Result<(), ConfigError> {
    if !config.chroot.is_empty() {
        tracing::warn!(path = %config.chroot, "chroot is not supported on this platform, ignoring");
    }
    Ok(())
}
