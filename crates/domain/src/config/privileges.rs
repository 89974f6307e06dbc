use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrivilegeConfig {
    /// Directory to chroot into once TLS material is loaded. The store path
    /// is resolved inside it.
    /// Empty disables the chroot.
    #[serde(default = "default_chroot")]
    pub chroot: String,
}

impl Default for PrivilegeConfig {
    fn default() -> Self {
        Self {
            chroot: default_chroot(),
        }
    }
}

fn default_chroot() -> String {
    if cfg!(unix) {
        "/var/tmp".to_string()
    } else {
        String::new()
    }
}
