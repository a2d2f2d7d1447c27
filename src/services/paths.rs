//! Translation of Windows-style registry paths into host paths.

use camino::{Utf8Path, Utf8PathBuf};

/// Convert a Windows path from a registry value into a host path under the
/// prefix's `drive_c`.
///
/// `None` propagates to `None` so callers can chain this directly onto a
/// registry lookup. The conversion drops the two-character drive prefix,
/// strips the `\"` artifact some values embed, and turns each doubled
/// backslash into a single forward slash.
///
/// Input is assumed to come from a registry scan; anything else (no drive
/// prefix, single backslashes) yields best-effort output, not an error.
pub fn windows_to_host(windows_path: Option<&str>, prefix: &Utf8Path) -> Option<Utf8PathBuf> {
    let raw = windows_path?;
    let cleaned = raw.replace("\\\"", "");

    let mut chars = cleaned.chars();
    chars.next();
    chars.next();
    let rest = chars.as_str().replace("\\\\", "/");

    Some(Utf8PathBuf::from(format!("{}/drive_c{}", prefix, rest)))
}

/// The user's home directory as seen from inside the prefix.
pub fn prefix_home(prefix: &Utf8Path, user: &str) -> Utf8PathBuf {
    prefix.join("drive_c/users").join(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_propagates() {
        assert_eq!(windows_to_host(None, Utf8Path::new("/pfx")), None);
    }

    #[test]
    fn test_basic_translation() {
        let host = windows_to_host(
            Some("C:\\\\Program Files\\\\Foo"),
            Utf8Path::new("/pfx"),
        );
        assert_eq!(
            host,
            Some(Utf8PathBuf::from("/pfx/drive_c/Program Files/Foo"))
        );
    }

    #[test]
    fn test_trailing_separator_is_kept() {
        let host = windows_to_host(
            Some("C:\\\\Games\\\\TmForever\\\\"),
            Utf8Path::new("/home/user/.wine"),
        );
        assert_eq!(
            host,
            Some(Utf8PathBuf::from("/home/user/.wine/drive_c/Games/TmForever/"))
        );
    }

    #[test]
    fn test_escaped_quote_artifact_is_stripped() {
        let host = windows_to_host(Some("C:\\\"\\\\Games"), Utf8Path::new("/pfx"));
        assert_eq!(host, Some(Utf8PathBuf::from("/pfx/drive_c/Games")));
    }

    #[test]
    fn test_prefix_home() {
        assert_eq!(
            prefix_home(Utf8Path::new("/pfx"), "alice"),
            Utf8PathBuf::from("/pfx/drive_c/users/alice")
        );
    }
}
