use pix_bucket::contract::{ListPage, MockStorageClient, RemoteEntry};
use pix_bucket::error::StorageError;
use pix_bucket::snapshot::build_snapshot;

fn page(paths: &[&str], cursor: &str, has_more: bool) -> ListPage {
    ListPage {
        entries: paths
            .iter()
            .map(|p| RemoteEntry { path_lower: p.to_string() })
            .collect(),
        cursor: cursor.to_string(),
        has_more,
    }
}

#[tokio::test]
async fn snapshot_is_the_union_of_all_listing_pages() {
    let mut client = MockStorageClient::new();

    client
        .expect_list_folder()
        .withf(|path, recursive| path == "/photos" && *recursive)
        .return_once(|_, _| Ok(page(&["/photos/a.jpg", "/photos/b.jpg"], "c1", true)));
    client
        .expect_list_folder_continue()
        .withf(|cursor| cursor == "c1")
        .return_once(|_| Ok(page(&["/photos/c.jpg", "/photos/d.jpg"], "c2", true)));
    client
        .expect_list_folder_continue()
        .withf(|cursor| cursor == "c2")
        .return_once(|_| Ok(page(&["/photos/e.jpg", "/photos/f.jpg"], "c3", false)));

    let snapshot = build_snapshot(&client, "/photos")
        .await
        .expect("three clean pages should build a snapshot");

    assert_eq!(snapshot.len(), 6, "snapshot should hold every entry of every page");
    assert!(snapshot.contains("/photos/d.jpg"));
    assert!(
        snapshot.contains("/Photos/D.JPG"),
        "membership must be case-insensitive"
    );
    assert!(!snapshot.contains("/photos/zzz.jpg"));
}

#[tokio::test]
async fn single_page_listing_needs_no_continuation() {
    let mut client = MockStorageClient::new();
    client
        .expect_list_folder()
        .return_once(|_, _| Ok(page(&["/photos/only.jpg"], "c1", false)));

    let snapshot = build_snapshot(&client, "/photos")
        .await
        .expect("single page should build a snapshot");

    assert_eq!(snapshot.len(), 1);
    assert!(!snapshot.is_empty());
}

#[tokio::test]
async fn first_page_failure_aborts_the_snapshot() {
    let mut client = MockStorageClient::new();
    client.expect_list_folder().return_once(|_, _| {
        Err(StorageError::Api { status: 409, body: "path/not_found".to_string() })
    });

    let err = build_snapshot(&client, "/photos")
        .await
        .expect_err("a failed page makes the snapshot unusable");
    assert_eq!(err.path, "/photos");
}

#[tokio::test]
async fn continuation_failure_aborts_the_snapshot() {
    let mut client = MockStorageClient::new();
    client
        .expect_list_folder()
        .return_once(|_, _| Ok(page(&["/photos/a.jpg"], "c1", true)));
    client.expect_list_folder_continue().return_once(|_| {
        Err(StorageError::Api { status: 500, body: "server error".to_string() })
    });

    build_snapshot(&client, "/photos")
        .await
        .expect_err("a failed continuation page makes the snapshot unusable");
}
