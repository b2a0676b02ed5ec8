//! Exposes information about the build.

/// The version of bitcore.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The board name.
///
/// The board name is read from the `CONFIG_BOARD` environment variable, which is expected to be
/// provided by the build system.
pub const BOARD: &str = bitcore_utils::str_from_env_or!(
    "CONFIG_BOARD",
    "unknown",
    "board name provided by the build system"
);

#[cfg(test)]
mod tests {
    #[test]
    fn version_is_the_crate_version() {
        assert_eq!(super::VERSION, "0.1.0");
        assert!(!super::BOARD.is_empty());
    }
}
