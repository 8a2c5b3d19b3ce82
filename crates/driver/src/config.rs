//! Driver configuration

use std::path::PathBuf;

/// Browser engine used for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// Configuration shared by every browser session in a run
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Base URL of the environment under test
    pub base_url: String,
    pub browser: Browser,
    pub headless: bool,
    pub viewport: Viewport,
    /// Default bound for element actions and expectations
    pub step_timeout_ms: u64,
    /// Default bound for navigations and URL waits
    pub navigation_timeout_ms: u64,
    /// Hard ceiling for one whole browser session
    pub session_deadline_secs: u64,
    /// Screenshots and result files land under this directory
    pub artifact_dir: PathBuf,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            base_url: "https://app-moccona.letsweel.com".to_string(),
            browser: Browser::Chromium,
            headless: true,
            viewport: Viewport::default(),
            step_timeout_ms: 5_000,
            navigation_timeout_ms: 15_000,
            session_deadline_secs: 120,
            artifact_dir: PathBuf::from("test-results"),
        }
    }
}

impl DriverConfig {
    pub fn screenshot_dir(&self) -> PathBuf {
        self.artifact_dir.join("screenshots")
    }
}
