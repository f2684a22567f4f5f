//! Cloud-disk REST adapter used by the listing and confirmation stages.
//!
//! Only three provider calls are consumed: folder listing, temporary
//! download-link resolution, and the plain download of that link.

use std::future::Future;
use std::pin::Pin;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use thiserror::Error;

use crate::config::DiskConfig;
use crate::domain::entry::{DirectoryEntry, EntryKind};

/// Provider path of the disk root folder.
pub const ROOT_PATH: &str = "/";

const DIRECTORY_KIND: &str = "dir";

/// Boxed async result used by [`DiskClient`] trait methods.
pub type DiskFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Failure of one cloud-disk call.
#[derive(Debug, Error)]
pub enum DiskError {
    /// The request never produced an HTTP response or the body was cut off.
    #[error("disk request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The provider rejected the token.
    #[error("disk rejected the token with HTTP {status}")]
    Unauthorized { status: u16 },
    /// Any other non-success status.
    #[error("disk answered HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body did not match the expected JSON shape.
    #[error("unexpected disk response: {0}")]
    Payload(#[from] serde_json::Error),
}

impl DiskError {
    /// Returns whether this failure comes from a missing or rejected token.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }
}

/// Async boundary to the cloud-disk provider.
///
/// Production uses [`YandexDiskClient`], while tests inject
/// `MockDiskClient` to script listings and downloads.
#[cfg_attr(test, mockall::automock)]
pub trait DiskClient: Send + Sync {
    /// Lists the entries immediately contained in the folder at `path`, in
    /// provider order.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// unreadable payload.
    fn list_folder(&self, path: String) -> DiskFuture<Result<Vec<DirectoryEntry>, DiskError>>;

    /// Resolves a temporary direct-download URL for the file at `path`.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or an
    /// unreadable payload.
    fn download_link(&self, path: String) -> DiskFuture<Result<String, DiskError>>;

    /// Downloads the bytes behind a link returned by
    /// [`DiskClient::download_link`].
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    fn fetch(&self, url: String) -> DiskFuture<Result<Vec<u8>, DiskError>>;
}

#[derive(Debug, Deserialize)]
struct ResourcePayload {
    #[serde(rename = "_embedded")]
    embedded: Option<ResourceListPayload>,
}

#[derive(Debug, Deserialize)]
struct ResourceListPayload {
    items: Vec<ResourceItemPayload>,
    offset: Option<usize>,
    total: Option<usize>,
}

/// One page of a folder listing.
#[derive(Debug, Default, PartialEq, Eq)]
struct ListingPage {
    entries: Vec<DirectoryEntry>,
    /// Offset the provider served this page from.
    offset: Option<usize>,
    /// Number of entries in the whole folder, when reported.
    total: Option<usize>,
}

impl ListingPage {
    /// Returns the offset of the page after this one, or `None` when the
    /// folder is exhausted.
    fn next_offset(&self, requested_offset: usize) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }

        let next_offset = self.offset.unwrap_or(requested_offset) + self.entries.len();
        let total = self.total?;

        (next_offset < total).then_some(next_offset)
    }
}

#[derive(Debug, Deserialize)]
struct ResourceItemPayload {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct LinkPayload {
    href: String,
}

/// [`DiskClient`] backed by the Yandex Disk REST API.
#[derive(Clone)]
pub struct YandexDiskClient {
    api_base: String,
    http: reqwest::Client,
    list_limit: u32,
    token: String,
}

impl YandexDiskClient {
    /// Creates a client for the API described by `config`.
    ///
    /// The token is used as-is; a missing token surfaces as the first
    /// [`DiskError::Unauthorized`].
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be initialized.
    pub fn new(config: &DiskConfig) -> Result<Self, DiskError> {
        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            http,
            list_limit: config.list_limit,
            token: config.token.clone(),
        })
    }

    async fn get_api(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String, DiskError> {
        let response = self
            .http
            .get(format!("{}/{endpoint}", self.api_base))
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(query)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status.as_u16(), body));
        }

        Ok(body)
    }

    /// Lists every entry of `path`, one page of `list_limit` entries at a
    /// time, in provider order. A failed page fails the whole listing.
    async fn list_all(&self, path: &str) -> Result<Vec<DirectoryEntry>, DiskError> {
        let limit = self.list_limit.to_string();
        let mut entries = Vec::new();
        let mut offset = 0;

        loop {
            let offset_param = offset.to_string();
            let body = self
                .get_api(
                    "resources",
                    &[
                        ("path", path),
                        ("limit", limit.as_str()),
                        ("offset", offset_param.as_str()),
                    ],
                )
                .await?;
            let mut page = parse_listing(&body)?;
            let next_offset = page.next_offset(offset);
            entries.append(&mut page.entries);

            match next_offset {
                Some(next_offset) => offset = next_offset,
                None => return Ok(entries),
            }
        }
    }
}

impl DiskClient for YandexDiskClient {
    fn list_folder(&self, path: String) -> DiskFuture<Result<Vec<DirectoryEntry>, DiskError>> {
        let client = self.clone();

        Box::pin(async move { client.list_all(&path).await })
    }

    fn download_link(&self, path: String) -> DiskFuture<Result<String, DiskError>> {
        let client = self.clone();

        Box::pin(async move {
            let body = client
                .get_api("resources/download", &[("path", path.as_str())])
                .await?;

            parse_download_link(&body)
        })
    }

    fn fetch(&self, url: String) -> DiskFuture<Result<Vec<u8>, DiskError>> {
        let http = self.http.clone();

        Box::pin(async move {
            let response = http.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();

                return Err(status_error(status.as_u16(), body));
            }

            Ok(response.bytes().await?.to_vec())
        })
    }
}

fn status_error(status: u16, body: String) -> DiskError {
    match status {
        401 | 403 => DiskError::Unauthorized { status },
        _ => DiskError::Status { status, body },
    }
}

/// Parses one listing page. A resource without `_embedded` (a file) lists as
/// empty.
fn parse_listing(body: &str) -> Result<ListingPage, DiskError> {
    let payload: ResourcePayload = serde_json::from_str(body)?;
    let Some(embedded) = payload.embedded else {
        return Ok(ListingPage::default());
    };

    let entries = embedded
        .items
        .into_iter()
        .map(|item| DirectoryEntry {
            kind: if item.kind == DIRECTORY_KIND {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            name: item.name,
            path: item.path,
        })
        .collect();

    Ok(ListingPage {
        entries,
        offset: embedded.offset,
        total: embedded.total,
    })
}

fn parse_download_link(body: &str) -> Result<String, DiskError> {
    let payload: LinkPayload = serde_json::from_str(body)?;

    Ok(payload.href)
}
