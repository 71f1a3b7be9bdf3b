use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// Asynchronous byte source for artwork URLs.
///
/// Implementations only fetch; decoding happens in the renderer.
pub trait ArtworkSource {
    fn fetch(&self, url: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send;
}

/// Fetches `http(s)` URLs.
#[derive(Clone, Debug)]
pub struct HttpArtworkSource {
    client: reqwest::Client,
}

impl HttpArtworkSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("songcard/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build http client")?;
        Ok(Self { client })
    }
}

impl ArtworkSource for HttpArtworkSource {
    fn fetch(&self, url: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send {
        let request = self.client.get(url);
        let url = url.to_owned();
        async move {
            let response = request
                .send()
                .await
                .with_context(|| format!("request artwork '{url}'"))?;
            let status = response.status();
            if !status.is_success() {
                anyhow::bail!("artwork '{url}' answered with HTTP {}", status.as_u16());
            }
            let body = response
                .bytes()
                .await
                .with_context(|| format!("read artwork body '{url}'"))?;
            tracing::debug!(url = %url, bytes = body.len(), "fetched artwork");
            Ok(body.to_vec())
        }
    }
}

/// Reads `file://` URLs and plain filesystem paths.
///
/// Relative paths are joined onto `root` when one is set.
#[derive(Clone, Debug, Default)]
pub struct FileArtworkSource {
    root: Option<PathBuf>,
}

impl FileArtworkSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve_path(&self, url: &str) -> anyhow::Result<PathBuf> {
        if url.starts_with("file:") {
            let parsed = reqwest::Url::parse(url).with_context(|| format!("parse '{url}'"))?;
            return parsed
                .to_file_path()
                .map_err(|()| anyhow::anyhow!("'{url}' is not a local file URL"));
        }
        let path = PathBuf::from(url);
        Ok(match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path,
        })
    }
}

impl ArtworkSource for FileArtworkSource {
    fn fetch(&self, url: &str) -> impl Future<Output = anyhow::Result<Vec<u8>>> + Send {
        let path = self.resolve_path(url);
        async move {
            let path = path?;
            tokio::fs::read(&path)
                .await
                .with_context(|| format!("read artwork file '{}'", path.display()))
        }
    }
}

/// Dispatches on the URL scheme: `http`/`https` go to the network, everything without a scheme
/// or with `file:` is read from disk.
#[derive(Clone, Debug)]
pub struct DefaultArtworkSource {
    http: HttpArtworkSource,
    file: FileArtworkSource,
}

impl DefaultArtworkSource {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpArtworkSource::new(timeout)?,
            file: FileArtworkSource::new(),
        })
    }

    /// Resolve relative artwork paths against `root` instead of the working directory.
    pub fn with_file_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.file = FileArtworkSource::with_root(root);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UrlKind {
    Http,
    File,
    Unsupported,
}

pub(crate) fn classify_url(url: &str) -> UrlKind {
    let lower = url.trim().to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return UrlKind::Http;
    }
    if lower.starts_with("file:") {
        return UrlKind::File;
    }
    match lower.split_once("://") {
        Some(_) => UrlKind::Unsupported,
        None => UrlKind::File,
    }
}

impl ArtworkSource for DefaultArtworkSource {
    async fn fetch(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        match classify_url(url) {
            UrlKind::Http => self.http.fetch(url).await,
            UrlKind::File => self.file.fetch(url).await,
            UrlKind::Unsupported => anyhow::bail!("unsupported artwork URL scheme in '{url}'"),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/artwork.rs"]
mod tests;
