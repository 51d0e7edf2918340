/// Raw display numbers as the host platform reports them: the viewport in
/// device pixels plus the render scale as a percentage (100 = no scaling).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMetrics {
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub scale_percent: u32,
}

/// Read-only snapshot of the host environment, captured once at construction.
/// Screen dimensions are derived from the viewport and scale factor.
#[derive(Debug, Clone)]
pub struct EnvironmentSnapshot {
    language_code: String,
    screen_width: u32,
    screen_height: u32,
    viewport_width: u32,
    viewport_height: u32,
}

impl EnvironmentSnapshot {
    pub fn capture(metrics: DisplayMetrics, language_code: impl Into<String>) -> Self {
        EnvironmentSnapshot {
            language_code: language_code.into(),
            screen_width: metrics.viewport_width * metrics.scale_percent / 100,
            screen_height: metrics.viewport_height * metrics.scale_percent / 100,
            viewport_width: metrics.viewport_width,
            viewport_height: metrics.viewport_height,
        }
    }

    /// Capture using the locale tag from the host's `LANG` variable
    /// ("en_US.UTF-8" becomes "en-US"), falling back to "en" when unset.
    pub fn capture_with_host_locale(metrics: DisplayMetrics) -> Self {
        Self::capture(metrics, host_language_tag())
    }

    pub fn character_set(&self) -> &'static str {
        "UTF-8"
    }

    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    // Flash and Java do not apply on this platform.
    pub fn flash_version(&self) -> Option<&str> {
        None
    }

    pub fn java_enabled(&self) -> Option<bool> {
        None
    }

    pub fn screen_color_depth(&self) -> u32 {
        32
    }

    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }

    pub fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }
}

fn host_language_tag() -> String {
    match std::env::var("LANG") {
        Ok(lang) if !lang.is_empty() => {
            let tag = lang.split('.').next().unwrap_or(&lang);
            tag.replace('_', "-")
        }
        _ => "en".to_string(),
    }
}
