//! Listing stage: name matching over the root folder and its direct
//! subfolders.

use tracing::debug;

use crate::domain::entry::DirectoryEntry;
use crate::domain::query::Query;
use crate::failure::{FailureLog, SearchFailure};
use crate::infra::disk::{DiskClient, ROOT_PATH};

/// Collects paths of image files whose name contains `query`.
///
/// The root folder is listed first, then each of its direct subfolders in
/// provider order; deeper folders are never visited. Root matches come
/// first, followed by each subfolder's matches. A failed listing is logged
/// and only removes that folder's matches.
pub async fn list_candidates(
    disk: &dyn DiskClient,
    log: &dyn FailureLog,
    query: &Query,
) -> Vec<String> {
    let root_entries = list_or_empty(disk, log, ROOT_PATH).await;
    let mut candidates = matching_paths(&root_entries, query);

    for directory in root_entries.iter().filter(|entry| entry.is_dir()) {
        let entries = list_or_empty(disk, log, &directory.path).await;
        candidates.extend(matching_paths(&entries, query));
    }
    debug!(candidates = candidates.len(), "listing stage finished");

    candidates
}

/// Lists `path`, recording any failure and answering it with no entries.
pub async fn list_or_empty(
    disk: &dyn DiskClient,
    log: &dyn FailureLog,
    path: &str,
) -> Vec<DirectoryEntry> {
    match disk.list_folder(path.to_string()).await {
        Ok(entries) => entries,
        Err(source) => {
            log.record(&SearchFailure::Listing {
                path: path.to_string(),
                source,
            });

            Vec::new()
        }
    }
}

fn matching_paths(entries: &[DirectoryEntry], query: &Query) -> Vec<String> {
    entries
        .iter()
        .filter(|entry| !entry.is_dir() && query.matches_image_name(&entry.name))
        .map(|entry| entry.path.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::testing::RecordingFailureLog;
    use crate::infra::disk::{DiskError, MockDiskClient};

    fn expect_listing(disk: &mut MockDiskClient, path: &'static str, entries: Vec<DirectoryEntry>) {
        disk.expect_list_folder()
            .withf(move |requested| requested.as_str() == path)
            .times(1)
            .returning(move |_| {
                let entries = entries.clone();
                Box::pin(async move { Ok(entries) })
            });
    }

    #[tokio::test]
    async fn test_list_candidates_orders_root_matches_before_subfolder_matches() {
        // Arrange
        let mut disk = MockDiskClient::new();
        expect_listing(
            &mut disk,
            "/",
            vec![
                DirectoryEntry::directory("pics", "/pics"),
                DirectoryEntry::file("dog.jpg", "/dog.jpg"),
                DirectoryEntry::file("dog_notes.txt", "/dog_notes.txt"),
            ],
        );
        expect_listing(
            &mut disk,
            "/pics",
            vec![
                DirectoryEntry::file("mydog.png", "/pics/mydog.png"),
                DirectoryEntry::file("cat.png", "/pics/cat.png"),
            ],
        );
        let log = RecordingFailureLog::default();

        // Act
        let candidates = list_candidates(&disk, &log, &Query::new("dog")).await;

        // Assert
        assert_eq!(candidates, vec!["/dog.jpg", "/pics/mydog.png"]);
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_list_candidates_never_descends_below_direct_subfolders() {
        // Arrange
        let mut disk = MockDiskClient::new();
        expect_listing(&mut disk, "/", vec![DirectoryEntry::directory("a", "/a")]);
        expect_listing(
            &mut disk,
            "/a",
            vec![
                DirectoryEntry::directory("deep", "/a/deep"),
                DirectoryEntry::file("cat_top.png", "/a/cat_top.png"),
            ],
        );
        let log = RecordingFailureLog::default();

        // Act
        let candidates = list_candidates(&disk, &log, &Query::new("cat")).await;

        // Assert
        assert_eq!(candidates, vec!["/a/cat_top.png"]);
    }

    #[tokio::test]
    async fn test_list_candidates_keeps_other_folders_when_one_sublisting_fails() {
        // Arrange
        let mut disk = MockDiskClient::new();
        expect_listing(
            &mut disk,
            "/",
            vec![
                DirectoryEntry::directory("broken", "/broken"),
                DirectoryEntry::directory("ok", "/ok"),
            ],
        );
        disk.expect_list_folder()
            .withf(|requested| requested.as_str() == "/broken")
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Err(DiskError::Status {
                        status: 500,
                        body: "internal".to_string(),
                    })
                })
            });
        expect_listing(
            &mut disk,
            "/ok",
            vec![DirectoryEntry::file("Cat.JPEG", "/ok/Cat.JPEG")],
        );
        let log = RecordingFailureLog::default();

        // Act
        let candidates = list_candidates(&disk, &log, &Query::new("cat")).await;

        // Assert
        assert_eq!(candidates, vec!["/ok/Cat.JPEG"]);
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "/broken");
        assert!(!entries[0].auth);
    }

    #[tokio::test]
    async fn test_list_or_empty_logs_unauthorized_root() {
        // Arrange
        let mut disk = MockDiskClient::new();
        disk.expect_list_folder()
            .times(1)
            .returning(|_| Box::pin(async { Err(DiskError::Unauthorized { status: 401 }) }));
        let log = RecordingFailureLog::default();

        // Act
        let entries = list_or_empty(&disk, &log, "/").await;

        // Assert
        assert!(entries.is_empty());
        let logged = log.entries();
        assert_eq!(logged.len(), 1);
        assert!(logged[0].auth);
        assert!(logged[0].message.contains("401"));
    }

    #[test]
    fn test_matching_paths_skips_directories_named_like_images() {
        // Arrange
        let entries = vec![
            DirectoryEntry::directory("cat.png", "/cat.png"),
            DirectoryEntry::file("CAT_photo.PNG", "/CAT_photo.PNG"),
        ];

        // Act
        let paths = matching_paths(&entries, &Query::new("cat"));

        // Assert
        assert_eq!(paths, vec!["/CAT_photo.PNG"]);
    }
}
