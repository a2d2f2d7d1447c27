//! HTTP downloads and archive extraction.

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::{self, File};
use std::io;
use zip::ZipArchive;

/// HTTP download helper shared by all content operations.
#[derive(Debug, Clone, Default)]
pub struct DownloadClient {
    http: reqwest::Client,
}

impl DownloadClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Download `url` into `dest_dir`, returning the path of the written file.
    ///
    /// The file name comes from the `Content-Disposition` header when the
    /// server sends one, otherwise from the last URL path segment. The
    /// destination directory is created if needed. Non-success statuses are
    /// errors.
    pub async fn fetch_to_dir(&self, url: &str, dest_dir: &Utf8Path) -> Result<Utf8PathBuf> {
        let parsed =
            reqwest::Url::parse(url).with_context(|| format!("Invalid download URL: {url}"))?;

        tracing::info!("Downloading {}", parsed);
        let response = self
            .http
            .get(parsed.clone())
            .send()
            .await
            .with_context(|| format!("Request failed: {url}"))?;

        if !response.status().is_success() {
            bail!("Download of {} failed with status {}", url, response.status());
        }

        let file_name = disposition_file_name(&response)
            .or_else(|| last_path_segment(&parsed))
            .unwrap_or_else(|| "download.bin".to_string());

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {url}"))?;

        fs::create_dir_all(dest_dir)
            .with_context(|| format!("Failed to create download directory: {}", dest_dir))?;
        let dest = dest_dir.join(&file_name);
        tokio::fs::write(&dest, &body)
            .await
            .with_context(|| format!("Failed to write download: {}", dest))?;

        tracing::info!("Saved {} ({} bytes)", dest, body.len());
        Ok(dest)
    }
}

fn disposition_file_name(response: &reqwest::Response) -> Option<String> {
    let header = response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)?
        .to_str()
        .ok()?;
    let (_, rest) = header.split_once("filename=")?;
    let name = rest.split(';').next().unwrap_or(rest).trim().trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn last_path_segment(url: &reqwest::Url) -> Option<String> {
    url.path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Extract every entry of a zip archive into `dest_dir`, creating parent
/// directories as needed. Entries with unsafe names are skipped. Returns the
/// number of files written.
pub fn extract_zip(archive_path: &Utf8Path, dest_dir: &Utf8Path) -> Result<usize> {
    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive: {}", archive_path))?;
    let mut archive =
        ZipArchive::new(file).with_context(|| format!("Invalid zip archive: {}", archive_path))?;

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create extraction directory: {}", dest_dir))?;

    let mut extracted = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .with_context(|| format!("Failed to read entry {} of {}", index, archive_path))?;

        let Some(relative) = entry
            .enclosed_name()
            .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        else {
            tracing::warn!("Skipping zip entry with unsafe name: {}", entry.name());
            continue;
        };
        let out_path = dest_dir.join(&relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)
                .with_context(|| format!("Failed to create directory: {}", out_path))?;
        } else {
            if let Some(parent) = out_path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent))?;
            }
            let mut out_file = File::create(&out_path)
                .with_context(|| format!("Failed to create file: {}", out_path))?;
            io::copy(&mut entry, &mut out_file)
                .with_context(|| format!("Failed to extract: {}", out_path))?;
            extracted += 1;
        }
    }

    tracing::info!(
        "Extracted {} files from {} into {}",
        extracted,
        archive_path,
        dest_dir
    );
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    #[test]
    fn test_last_path_segment() {
        let url = reqwest::Url::parse("https://example.com/a/b/Track.Challenge.Gbx").unwrap();
        assert_eq!(
            last_path_segment(&url),
            Some("Track.Challenge.Gbx".to_string())
        );

        let url = reqwest::Url::parse("https://example.com/a/b/").unwrap();
        assert_eq!(last_path_segment(&url), Some("b".to_string()));
    }

    #[test]
    fn test_url_parsing_encodes_spaces() {
        let url = reqwest::Url::parse("https://example.com/skins/My Skin.zip").unwrap();
        assert_eq!(url.path(), "/skins/My%20Skin.zip");
    }

    #[test]
    fn test_extract_zip_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        let archive_path = root.join("bundle.zip");
        let file = File::create(&archive_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("TMLoader.exe", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"binary").unwrap();
        writer
            .start_file("database/readme.txt", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"docs").unwrap();
        writer.finish().unwrap();

        let dest = root.join("out");
        let count = extract_zip(&archive_path, &dest).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read(dest.join("TMLoader.exe")).unwrap(), b"binary");
        assert_eq!(fs::read(dest.join("database/readme.txt")).unwrap(), b"docs");
    }
}
