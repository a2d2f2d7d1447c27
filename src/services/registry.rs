//! Registry hive parsing for Wine prefixes.
//!
//! Wine persists the Windows registry as plain-text hive files inside the
//! prefix (`system.reg`, `user.reg`). A hive is a flat sequence of bracketed
//! key sections followed by `"Name"="Value"` lines:
//!
//! ```text
//! [Software\\Wow6432Node\\...\\Uninstall\\TmUnitedForever_is1] 1699999999
//! "InstallLocation"="C:\\Program Files (x86)\\TmUnitedForever\\"
//! ```
//!
//! Key paths are stored with doubled backslashes; callers passing raw Windows
//! key paths go through [`find_system_value`], which doubles them before
//! matching. A value that is not present is a normal outcome, not an error.

use anyhow::{Context, Result};
use camino::Utf8Path;
use regex::Regex;
use std::fs;

/// Parent key of every application uninstall entry in a 64-bit prefix.
const UNINSTALL_KEY_PATH: &str =
    "Software\\Wow6432Node\\Microsoft\\Windows\\CurrentVersion\\Uninstall\\";

/// Scan a registry hive for a single value under a single key section.
///
/// The scan keeps a flag for "inside the target section": the section header
/// line sets it, any other `[` line clears it (the format has no nesting),
/// and the first matching value line inside the section wins. Reaching the
/// end of the document without a match returns `Ok(None)`.
///
/// `key_pattern` must already use the hive's on-disk escaping (doubled
/// backslashes).
pub fn find_registry_value(
    reg_file: &Utf8Path,
    key_pattern: &str,
    value_name: &str,
) -> Result<Option<String>> {
    let key_regex = Regex::new(&format!(r"^\[{}\]", regex::escape(key_pattern)))
        .context("Failed to compile registry key pattern")?;
    let value_regex = Regex::new(&format!(r#"^"{}"="(.+)""#, regex::escape(value_name)))
        .context("Failed to compile registry value pattern")?;

    // Hives occasionally carry stray non-UTF-8 bytes; a lossy read keeps the
    // scan going instead of failing the whole lookup.
    let raw = fs::read(reg_file)
        .with_context(|| format!("Failed to read registry hive: {}", reg_file))?;
    let contents = String::from_utf8_lossy(&raw);

    let mut in_target_key = false;
    for line in contents.lines() {
        let line = line.trim();

        if key_regex.is_match(line) {
            in_target_key = true;
            continue;
        }

        if in_target_key {
            if line.starts_with('[') {
                in_target_key = false;
                continue;
            }
            if let Some(captures) = value_regex.captures(line) {
                return Ok(Some(captures[1].to_string()));
            }
        }
    }

    Ok(None)
}

/// Look up a value in the prefix's `system.reg`, doubling the backslashes of
/// a raw Windows key path to match the hive's escaping.
pub fn find_system_value(
    prefix: &Utf8Path,
    key_path: &str,
    value_name: &str,
) -> Result<Option<String>> {
    let hive = prefix.join("system.reg");
    find_registry_value(&hive, &key_path.replace('\\', "\\\\"), value_name)
}

/// Look up a value of an application's uninstall entry, e.g.
/// `InstallLocation` or `UninstallString`.
pub fn find_uninstall_value(
    prefix: &Utf8Path,
    key_name: &str,
    value_name: &str,
) -> Result<Option<String>> {
    find_system_value(
        prefix,
        &format!("{UNINSTALL_KEY_PATH}{key_name}"),
        value_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_hive(contents: &str) -> (NamedTempFile, Utf8PathBuf) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        let path = Utf8PathBuf::try_from(file.path().to_path_buf()).unwrap();
        (file, path)
    }

    #[test]
    fn test_value_found_in_section() {
        let (_file, path) = write_hive(
            "[Software\\\\Acme] 123456\n\"Location\"=\"C:\\\\Acme\\\\\"\n",
        );

        let value = find_registry_value(&path, "Software\\\\Acme", "Location").unwrap();
        assert_eq!(value, Some("C:\\\\Acme\\\\".to_string()));
    }

    #[test]
    fn test_missing_value_is_not_an_error() {
        let (_file, path) = write_hive("[Software\\\\Acme]\n\"Other\"=\"x\"\n");

        let value = find_registry_value(&path, "Software\\\\Acme", "Location").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_section_header_with_trailing_timestamp_matches() {
        let (_file, path) = write_hive("[Key] 1699999999 12345\n\"V\"=\"1\"\n");

        let value = find_registry_value(&path, "Key", "V").unwrap();
        assert_eq!(value, Some("1".to_string()));
    }

    #[test]
    fn test_regex_metacharacters_in_names_are_literal() {
        let (_file, path) = write_hive(
            "[Uninstall\\\\App (x86)]\n\"Path.Value\"=\"ok\"\n",
        );

        let value =
            find_registry_value(&path, "Uninstall\\\\App (x86)", "Path.Value").unwrap();
        assert_eq!(value, Some("ok".to_string()));
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[Key]\n\xff\xfe garbage\n\"V\"=\"1\"\n").unwrap();
        file.flush().unwrap();
        let path = Utf8PathBuf::try_from(file.path().to_path_buf()).unwrap();

        let value = find_registry_value(&path, "Key", "V").unwrap();
        assert_eq!(value, Some("1".to_string()));
    }
}
