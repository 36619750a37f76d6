use crate::error::{LifetimeError, Result};
use nix::sys::stat::{stat, SFlag};
use std::path::{Path, PathBuf};

/// Path to stat when checking `device`.
///
/// An NVMe controller node (`/dev/nvme0`) is a character device; its first
/// namespace (`/dev/nvme0n1`) is the block device smartctl ends up reading.
pub fn probe_path(device: &str) -> PathBuf {
    if is_nvme_controller(device) {
        PathBuf::from(format!("{}n1", device))
    } else {
        PathBuf::from(device)
    }
}

fn is_nvme_controller(device: &str) -> bool {
    let name = match Path::new(device).file_name().and_then(|n| n.to_str()) {
        Some(n) => n,
        None    => return false,
    };
    match name.strip_prefix("nvme") {
        Some(idx) => !idx.is_empty() && idx.bytes().all(|b| b.is_ascii_digit()),
        None      => false,
    }
}

/// True if `path` (following symlinks) is a block special file.
pub fn is_block_device(path: &Path) -> bool {
    match stat(path) {
        Ok(st) => SFlag::from_bits_truncate(st.st_mode) & SFlag::S_IFMT == SFlag::S_IFBLK,
        Err(_) => false,
    }
}

/// Reject anything that is not a drive before spending a subprocess on it.
pub fn validate(device: &str) -> Result<()> {
    let probe = probe_path(device);
    tracing::debug!("checking {} for block device", probe.display());
    if is_block_device(&probe) {
        Ok(())
    } else {
        Err(LifetimeError::NotBlockDevice { device: device.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nvme_controller_maps_to_first_namespace() {
        assert_eq!(probe_path("/dev/nvme0"), PathBuf::from("/dev/nvme0n1"));
        assert_eq!(probe_path("/dev/nvme12"), PathBuf::from("/dev/nvme12n1"));
    }

    #[test]
    fn namespaces_and_sata_paths_are_left_alone() {
        assert_eq!(probe_path("/dev/nvme0n1"), PathBuf::from("/dev/nvme0n1"));
        assert_eq!(probe_path("/dev/sda"), PathBuf::from("/dev/sda"));
        assert_eq!(probe_path("/dev/nvme"), PathBuf::from("/dev/nvme"));
    }

    #[test]
    fn character_devices_and_files_are_not_drives() {
        assert!(!is_block_device(Path::new("/dev/null")));
        assert!(!is_block_device(Path::new("/definitely/not/here")));
        assert!(!is_block_device(Path::new("/")));
    }

    #[test]
    fn validate_reports_the_path_given() {
        match validate("/dev/null") {
            Err(LifetimeError::NotBlockDevice { device }) => assert_eq!(device, "/dev/null"),
            other => panic!("expected NotBlockDevice, got {:?}", other),
        }
    }
}
