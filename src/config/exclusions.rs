use std::path::Path;

/// Markers skipped by default: scratch copies and vendored trees.
pub fn default_exclusions() -> Vec<&'static str> {
    vec!["tmp", "node_modules", ".git"]
}

/// Returns true if the workspace-relative `path` contains any exclusion marker.
///
/// Matching is on the relative path only, so the location of the workspace
/// itself (for example under the system temp directory) never excludes it.
pub fn is_excluded(relative: &Path, markers: &[String]) -> bool {
    let path = relative.to_string_lossy().replace('\\', "/");
    markers
        .iter()
        .filter(|marker| !marker.is_empty())
        .any(|marker| path.contains(marker.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        default_exclusions().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_exclusions() {
        let exclusions = default_exclusions();
        assert!(exclusions.contains(&"tmp"));
        assert!(exclusions.contains(&"node_modules"));
    }

    #[test]
    fn test_is_excluded() {
        assert!(is_excluded(Path::new("tmp/cache/en.yml"), &markers()));
        assert!(is_excluded(
            Path::new("frontend/node_modules/pkg/en.json"),
            &markers()
        ));
        assert!(!is_excluded(Path::new("config/locales/en.yml"), &markers()));
    }

    #[test]
    fn test_windows_separators() {
        let markers = vec!["config/old".to_string()];
        assert!(is_excluded(Path::new("config\\old\\en.yml"), &markers));
    }

    #[test]
    fn test_empty_marker_never_matches() {
        assert!(!is_excluded(Path::new("config/locales/en.yml"), &[String::new()]));
    }
}
