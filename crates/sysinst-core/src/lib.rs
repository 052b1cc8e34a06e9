//! sysinst core: install Maven artifacts into a provisioning system directory.
//!
//! Pipeline per locator: normalize → fetch (via a [`downloader::Downloader`])
//! → blacklist check → resolve repository-layout path → atomic placement.

pub mod blacklist;
pub mod config;
pub mod downloader;
pub mod installer;
pub mod locator;
pub mod logging;
pub mod storage;
