//! Many completions racing on a multi-threaded runtime.

mod common;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use common::snapshot;
use common::stub_downloader::StubDownloader;
use sysinst_core::installer::ArtifactInstaller;
use sysinst_core::storage;

const ARTIFACTS: usize = 100;
const ARTIFACT_SIZE: usize = 256 * 1024;

fn content(index: usize) -> Vec<u8> {
    (0..ARTIFACT_SIZE).map(|i| ((i + index) % 251) as u8).collect()
}

fn locator(index: usize) -> String {
    format!("mvn:org.load/artifact{index}/1.{index}")
}

fn destination(root: &std::path::Path, index: usize) -> PathBuf {
    root.join(format!(
        "org/load/artifact{index}/1.{index}/artifact{index}-1.{index}.jar"
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 20)]
async fn hundred_concurrent_installs_are_complete_and_never_partial() {
    let root = tempfile::tempdir().unwrap();
    let mut downloader = StubDownloader::new();
    for i in 0..ARTIFACTS {
        let delay = Duration::from_millis((i * 7 % 20) as u64);
        downloader = downloader.serve_after(&locator(i), &locator(i), &content(i), delay);
    }
    let downloader = Arc::new(downloader);
    let installer =
        ArtifactInstaller::with_rules(root.path(), downloader.clone(), Vec::<String>::new())
            .unwrap();

    // Any destination visible while installs are running must already be complete.
    let done = Arc::new(AtomicBool::new(false));
    let observed = Arc::new(AtomicUsize::new(0));
    let watcher = {
        let root = root.path().to_path_buf();
        let done = Arc::clone(&done);
        let observed = Arc::clone(&observed);
        std::thread::spawn(move || {
            let expected: Vec<Vec<u8>> = (0..ARTIFACTS).map(content).collect();
            while !done.load(Ordering::SeqCst) {
                for (i, bytes) in expected.iter().enumerate() {
                    if let Ok(seen) = std::fs::read(destination(&root, i)) {
                        assert_eq!(seen.len(), bytes.len(), "partial file for artifact {i}");
                        assert!(seen == *bytes, "corrupt file for artifact {i}");
                        observed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        })
    };

    let locators: Vec<String> = (0..ARTIFACTS).map(locator).collect();
    let report = installer.install_all(&locators).await.unwrap();
    done.store(true, Ordering::SeqCst);
    watcher.join().unwrap();

    assert_eq!(report.len(), ARTIFACTS);
    assert_eq!(report.installed().count(), ARTIFACTS);
    assert_eq!(downloader.calls(), ARTIFACTS);
    for i in 0..ARTIFACTS {
        assert_eq!(std::fs::read(destination(root.path(), i)).unwrap(), content(i));
    }
    let files = snapshot(root.path());
    assert_eq!(files.len(), ARTIFACTS);
    assert!(files.keys().all(|p| !storage::is_temp_file(p)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 20)]
async fn duplicate_requests_converge_on_one_complete_file() {
    let root = tempfile::tempdir().unwrap();
    let uri = "mvn:org.load/shared/2.0";
    let bytes = content(7);
    let downloader = Arc::new(StubDownloader::new().serve(uri, uri, &bytes));
    let installer =
        ArtifactInstaller::with_rules(root.path(), downloader.clone(), Vec::<String>::new())
            .unwrap();

    let report = installer.install_all(vec![uri; 20]).await.unwrap();

    assert_eq!(report.installed().count(), 20);
    let files = snapshot(root.path());
    assert_eq!(files.len(), 1);
    let (path, seen) = files.into_iter().next().unwrap();
    assert_eq!(path, root.path().join("org/load/shared/2.0/shared-2.0.jar"));
    assert!(seen == bytes);
}
