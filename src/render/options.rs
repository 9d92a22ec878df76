//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Options for rendering documents.
///
/// None of these change the HTML markup of a render without a visitor.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Collect node statistics during rendering
    pub collect_stats: bool,

    /// Text cleanup applied to plain-text output
    pub cleanup: Option<CleanupOptions>,

    /// Render batches on multiple threads
    pub parallel: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }

    /// Enable or disable parallel batch rendering.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Render batches on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            collect_stats: false,
            cleanup: None,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_stats(true)
            .with_cleanup_preset(CleanupPreset::Aggressive)
            .sequential();

        assert!(options.collect_stats);
        assert!(options.cleanup.is_some_and(|c| c.single_line));
        assert!(!options.parallel);
    }

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert!(!options.collect_stats);
        assert!(options.cleanup.is_none());
        assert!(options.parallel);
    }
}
