//! Browser lifecycle for headless scenario runs.
//!
//! With the `browser` feature enabled this launches a real Chromium over CDP
//! and hands out [`Page`]s backed by [`CdpDriver`](crate::CdpDriver). The
//! configuration type is always available so the CLI and tests can share it.

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<String>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

#[cfg(feature = "browser")]
mod cdp {
    use super::BrowserConfig;
    use crate::driver::CdpDriver;
    use crate::page::Page;
    use crate::result::{EscaparateError, EscaparateResult};
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use futures::StreamExt;

    /// Browser instance with a live CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: CdpBrowser,
        #[allow(dead_code)]
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch a new browser instance
        ///
        /// # Errors
        ///
        /// Returns error if the browser cannot be launched
        pub async fn launch(config: BrowserConfig) -> EscaparateResult<Self> {
            let mut builder =
                CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder
                .build()
                .map_err(|e| EscaparateError::BrowserLaunch { message: e })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                EscaparateError::BrowserLaunch {
                    message: e.to_string(),
                }
            })?;

            // Drive the CDP event loop until the browser goes away.
            let handle = tokio::spawn(async move {
                while let Some(h) = handler.next().await {
                    if h.is_err() {
                        break;
                    }
                }
            });

            Ok(Self {
                config,
                inner: browser,
                handle,
            })
        }

        /// Open a fresh page (one per scenario; never shared)
        ///
        /// # Errors
        ///
        /// Returns error if the page cannot be created
        pub async fn new_page(&self) -> EscaparateResult<Page> {
            let cdp_page = self.inner.new_page("about:blank").await.map_err(|e| {
                EscaparateError::BrowserLaunch {
                    message: e.to_string(),
                }
            })?;
            Ok(Page::new(Box::new(CdpDriver::new(cdp_page))))
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser
        pub async fn close(mut self) -> EscaparateResult<()> {
            self.inner
                .close()
                .await
                .map_err(|e| EscaparateError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::Browser;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config_defaults() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.viewport_height, 720);
    }

    #[test]
    fn test_browser_config_builder() {
        let config = BrowserConfig::default()
            .with_viewport(1920, 1080)
            .with_headless(false)
            .with_no_sandbox()
            .with_chromium_path("/usr/bin/chromium");
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.viewport_width, 1920);
        assert_eq!(config.chromium_path.as_deref(), Some("/usr/bin/chromium"));
    }
}
