//! Default binds and layered keymap loading
//!
//! The default keymap ships inside the binary. User files are applied on top
//! of it and can replace or remove any default bind.

use std::path::Path;

use super::config::{load_keymap_file, parse_keymap_yaml, ModeBind};
use super::registry::Registry;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap source
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Bind definitions from the embedded keymap
pub fn default_binds() -> Vec<ModeBind> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(binds) => binds,
        Err(e) => {
            tracing::warn!("Failed to parse embedded keymap: {}", e);
            Vec::new()
        }
    }
}

/// Install bind definitions, logging and skipping any that are rejected
///
/// Returns how many were installed.
pub fn install_binds(registry: &mut Registry, binds: &[ModeBind]) -> usize {
    let mut installed = 0;
    for bind in binds {
        match bind.apply(registry) {
            Ok(()) => installed += 1,
            Err(e) => tracing::warn!("Rejected bind {:?}: {}", bind.pattern, e),
        }
    }
    installed
}

/// Build a registry from the default keymap and user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. User keymap at ~/.config/keystack/keymap.yaml
/// 3. `extra`, typically a `--keymap` argument
pub fn load_default_keymap(extra: Option<&Path>) -> Registry {
    let mut registry = Registry::new();

    let installed = install_binds(&mut registry, &default_binds());
    tracing::info!("Loaded embedded default keymap ({} binds)", installed);

    if let Some(user_path) = crate::config_paths::keymap_file() {
        if user_path.exists() {
            merge_file(&mut registry, &user_path);
        }
    }

    if let Some(path) = extra {
        merge_file(&mut registry, path);
    }

    registry
}

fn merge_file(registry: &mut Registry, path: &Path) {
    match load_keymap_file(path) {
        Ok(binds) => {
            let installed = install_binds(registry, &binds);
            tracing::info!(
                "Merged keymap from {} ({} of {} binds)",
                path.display(),
                installed,
                binds.len()
            );
        }
        Err(e) => {
            tracing::warn!("Failed to load keymap from {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_install_skips_rejected() {
        let mut registry = Registry::new();
        let binds = vec![
            ModeBind::new("global", "ZZ", ["exit"]),
            ModeBind::new("global", "a<x:><y:>_", ["bad"]),
            ModeBind::new("no good", "q", ["bad"]),
            ModeBind::new("insert", "q", ["quit"]),
        ];
        assert_eq!(install_binds(&mut registry, &binds), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_extra_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "bindings:\n  - bind: ZZ\n    modes: [command]\n  - bind: QQ\n    command: quit\n    modes: [command]"
        )
        .unwrap();

        let registry = load_default_keymap(Some(file.path()));
        assert!(registry.get("command", "ZZ").is_none());
        assert!(registry.get("command", "QQ").is_some());
    }

    #[test]
    fn test_missing_extra_file_keeps_defaults() {
        let registry = load_default_keymap(Some(Path::new("/nonexistent/keymap.yaml")));
        assert!(!registry.is_empty());
    }
}
