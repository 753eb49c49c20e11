use reqwest::Url;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A single image entry from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub file: String,
}

impl GalleryItem {
    /// Title text, empty when the manifest omits it.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Title if present and non-empty, otherwise the category.
    pub fn label(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.category,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    #[serde(default)]
    items: Option<Vec<GalleryItem>>,
}

/// The loaded, ordered item list. Never mutated after load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    items: Vec<GalleryItem>,
}

impl Manifest {
    #[cfg(test)]
    pub fn from_items(items: Vec<GalleryItem>) -> Self {
        Self { items }
    }

    /// Parse a `{ "items": [...] }` document. A missing or null `items` is an empty manifest.
    pub fn from_json(body: &str) -> Result<Self, ManifestError> {
        let doc: ManifestDocument = serde_json::from_str(body)?;
        Ok(Self {
            items: doc.items.unwrap_or_default(),
        })
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&GalleryItem> {
        self.items.get(position)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Errors that can occur while loading the manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} fetching {url}")]
    Status { status: u16, url: String },

    #[error("Invalid manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid manifest URL: {0}")]
    InvalidUrl(String),
}

impl ManifestError {
    /// Short description used for the log line accompanying the load-failure notice.
    pub fn user_message(&self) -> String {
        match self {
            ManifestError::Io { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            ManifestError::Http(e) => format!("Network error: {}", e),
            ManifestError::Status { status, url } => {
                format!("Server answered {} for {}", status, url)
            }
            ManifestError::Parse(e) => format!("Data format error: {}", e),
            ManifestError::InvalidUrl(msg) => format!("Invalid URL: {}", msg),
        }
    }
}

/// Where the manifest comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestSource {
    Url(Url),
    Path(PathBuf),
}

impl ManifestSource {
    /// `http://` and `https://` strings are URLs, anything else is a filesystem path.
    pub fn parse(source: &str) -> Result<Self, ManifestError> {
        let trimmed = source.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            let url = Url::parse(trimmed).map_err(|e| ManifestError::InvalidUrl(format!("{trimmed}: {e}")))?;
            Ok(Self::Url(url))
        } else {
            Ok(Self::Path(PathBuf::from(trimmed)))
        }
    }

    /// Root that `images/...` paths are resolved against.
    ///
    /// The manifest conventionally lives at `<root>/data/gallery.json`, so the
    /// root is two levels above it.
    pub fn site_root(&self) -> SiteRoot {
        match self {
            ManifestSource::Url(url) => {
                SiteRoot::Url(url.join("../").unwrap_or_else(|_| url.clone()))
            }
            ManifestSource::Path(path) => {
                let root = path
                    .parent()
                    .and_then(Path::parent)
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("."));
                SiteRoot::Dir(root)
            }
        }
    }
}

impl std::fmt::Display for ManifestSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestSource::Url(url) => write!(f, "{url}"),
            ManifestSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Base location for image assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteRoot {
    Url(Url),
    Dir(PathBuf),
}

impl SiteRoot {
    /// `http://` and `https://` strings are base URLs, anything else a directory.
    pub fn parse(root: &str) -> Result<Self, ManifestError> {
        match ManifestSource::parse(root)? {
            ManifestSource::Url(url) => Ok(Self::Url(url)),
            ManifestSource::Path(dir) => Ok(Self::Dir(dir)),
        }
    }

    /// Resolve a relative asset path (`images/full/<file>`) to something a viewer can open.
    pub fn resolve(&self, relative: &str) -> String {
        match self {
            SiteRoot::Url(base) => base
                .join(relative)
                .map(|u| u.to_string())
                .unwrap_or_else(|_| format!("{base}{relative}")),
            SiteRoot::Dir(dir) => dir.join(relative).to_string_lossy().to_string(),
        }
    }
}

/// Fetch and parse the manifest. Performs exactly one read or request.
pub async fn load(source: &ManifestSource) -> Result<Manifest, ManifestError> {
    let body = match source {
        ManifestSource::Url(url) => fetch(url).await?,
        ManifestSource::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ManifestError::Io {
                    path: path.clone(),
                    source,
                })?
        }
    };
    let manifest = Manifest::from_json(&body)?;
    if manifest.is_empty() {
        tracing::warn!(source = %source, "manifest has no items");
    }
    tracing::info!(source = %source, items = manifest.len(), "manifest loaded");
    Ok(manifest)
}

/// Resolve the configured source and site root, then load.
///
/// Every failure, including an unparsable URL, comes back as a [`ManifestError`].
pub async fn open(
    source: &str,
    site_root: Option<&str>,
) -> Result<(Manifest, SiteRoot), ManifestError> {
    let source = ManifestSource::parse(source)?;
    let site = match site_root {
        Some(root) => SiteRoot::parse(root)?,
        None => source.site_root(),
    };
    let manifest = load(&source).await?;
    Ok((manifest, site))
}

async fn fetch(url: &Url) -> Result<String, ManifestError> {
    tracing::debug!(%url, "fetching manifest");
    let response = reqwest::Client::new()
        .get(url.clone())
        .header(CACHE_CONTROL, "no-cache, no-store")
        .header(PRAGMA, "no-cache")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ManifestError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "items": [
            {"category": "A", "file": "1.jpg", "title": "One"},
            {"category": "B", "file": "2.jpg", "extra": 42}
        ]
    }"#;

    #[test]
    fn test_from_json_reads_items_in_order() {
        let manifest = Manifest::from_json(SAMPLE).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest.items()[0].file, "1.jpg");
        assert_eq!(manifest.items()[0].title(), "One");
        assert_eq!(manifest.items()[1].category, "B");
        assert_eq!(manifest.items()[1].title, None);
        assert_eq!(manifest.items()[1].title(), "");
    }

    #[test]
    fn test_from_json_missing_items_is_empty() {
        assert!(Manifest::from_json("{}").unwrap().is_empty());
        assert!(Manifest::from_json(r#"{"items": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_from_json_rejects_invalid_body() {
        let err = Manifest::from_json("<html>not json</html>").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
        assert!(err.user_message().contains("Data format error"));
    }

    #[test]
    fn test_label_falls_back_to_category() {
        let item = GalleryItem {
            category: "Dock".to_string(),
            title: Some(String::new()),
            file: "a.jpg".to_string(),
        };
        assert_eq!(item.label(), "Dock");
        let titled = GalleryItem {
            title: Some("Front".to_string()),
            ..item
        };
        assert_eq!(titled.label(), "Front");
    }

    #[test]
    fn test_source_parse() {
        assert!(matches!(
            ManifestSource::parse("https://example.com/data/gallery.json").unwrap(),
            ManifestSource::Url(_)
        ));
        assert_eq!(
            ManifestSource::parse("data/gallery.json").unwrap(),
            ManifestSource::Path(PathBuf::from("data/gallery.json"))
        );
        assert!(matches!(
            ManifestSource::parse("https://"),
            Err(ManifestError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_site_root_for_url_and_path() {
        let source = ManifestSource::parse("https://example.com/site/data/gallery.json").unwrap();
        let root = source.site_root();
        assert_eq!(
            root.resolve("images/full/1.jpg"),
            "https://example.com/site/images/full/1.jpg"
        );

        let source = ManifestSource::parse("/srv/www/data/gallery.json").unwrap();
        assert_eq!(source.site_root(), SiteRoot::Dir(PathBuf::from("/srv/www")));

        let source = ManifestSource::parse("gallery.json").unwrap();
        assert_eq!(source.site_root(), SiteRoot::Dir(PathBuf::from(".")));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = ManifestSource::Path(file.path().to_path_buf());
        let manifest = load(&source).await.expect("load manifest");
        assert_eq!(manifest.len(), 2);
    }

    #[tokio::test]
    async fn test_open_with_site_root_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let (manifest, site) = open(&path, Some("https://cdn.example.com/gallery/"))
            .await
            .expect("open manifest");
        assert_eq!(manifest.len(), 2);
        assert_eq!(
            site.resolve("images/full/1.jpg"),
            "https://cdn.example.com/gallery/images/full/1.jpg"
        );

        let (_, site) = open(&path, Some("/srv/www")).await.expect("open manifest");
        assert_eq!(site, SiteRoot::Dir(PathBuf::from("/srv/www")));
    }

    #[tokio::test]
    async fn test_open_rejects_unparsable_urls() {
        let err = open("https://", None).await.unwrap_err();
        assert!(matches!(err, ManifestError::InvalidUrl(_)));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let path = file.path().to_string_lossy().to_string();
        let err = open(&path, Some("http://")).await.unwrap_err();
        assert!(matches!(err, ManifestError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = ManifestSource::Path(dir.path().join("data/gallery.json"));
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[tokio::test]
    async fn test_load_over_http_bypasses_cache() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/data/gallery.json"))
            .and(wiremock::matchers::header_exists("cache-control"))
            .and(wiremock::matchers::header("pragma", "no-cache"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_raw(SAMPLE, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let source = ManifestSource::parse(&format!("{}/data/gallery.json", server.uri())).unwrap();
        let manifest = load(&source).await.expect("fetch manifest");
        assert_eq!(manifest.len(), 2);
    }

    #[tokio::test]
    async fn test_load_over_http_error_status() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = ManifestSource::parse(&format!("{}/data/gallery.json", server.uri())).unwrap();
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, ManifestError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_load_over_http_non_json_body() {
        let server = wiremock::MockServer::start().await;
        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("<!doctype html>"))
            .mount(&server)
            .await;

        let source = ManifestSource::parse(&format!("{}/data/gallery.json", server.uri())).unwrap();
        let err = load(&source).await.unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
    }
}
