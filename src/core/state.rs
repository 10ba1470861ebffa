//! # Session State
//!
//! Everything the launcher knows at runtime, in one place.
//!
//! ```text
//! Session
//! ├── grid / style / behavior / apps   // resolved config, fixed for the run
//! ├── term_width, term_height          // terminal size in cells (0x0 until reported)
//! ├── cell_px: CellDim                 // pixels per cell
//! ├── ready: bool                      // cell_px has been measured
//! ├── needs_full_redraw: bool          // icons must be repainted, not just borders
//! ├── selected: Option<Flash>          // cell flashing after a click
//! ├── error_flash: Vec<Option<Token>>  // per-app launch failure flash
//! ├── icons: Vec<Option<IconImage>>    // decoded icons, None until loaded
//! └── cache: RenderCache               // rendered icons for the current geometry
//! ```
//!
//! State changes only happen through `update(session, action)` in action.rs.

use crate::core::cache::{CacheKey, RenderCache, RenderedIcon};
use crate::core::config::{AppEntry, Behavior, GridSpec, ResolvedConfig, StyleSpec};
use crate::core::geometry::{CellDim, GridLayout, icon_scale};
use crate::graphics::{Fit, IconImage, IconRenderer};

/// Identifies one flash, so a timer can tell whether the flash it was
/// scheduled for is still the one showing.
pub type FlashToken = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub index: usize,
    pub token: FlashToken,
}

#[derive(Debug)]
pub struct Session {
    pub grid: GridSpec,
    pub style: StyleSpec,
    pub behavior: Behavior,
    pub apps: Vec<AppEntry>,
    pub term_width: u16,
    pub term_height: u16,
    pub cell_px: CellDim,
    pub ready: bool,
    pub needs_full_redraw: bool,
    pub selected: Option<Flash>,
    pub error_flash: Vec<Option<FlashToken>>,
    pub icons: Vec<Option<IconImage>>,
    pub cache: RenderCache,
    next_token: FlashToken,
}

impl Session {
    pub fn new(config: ResolvedConfig) -> Self {
        let app_count = config.apps.len();
        Self {
            grid: config.grid,
            style: config.style,
            behavior: config.behavior,
            apps: config.apps,
            term_width: 0,
            term_height: 0,
            cell_px: CellDim::FALLBACK,
            ready: false,
            needs_full_redraw: true,
            selected: None,
            error_flash: vec![None; app_count],
            icons: vec![None; app_count],
            cache: RenderCache::new(),
            next_token: 0,
        }
    }

    /// Grid layout for the current terminal size.
    pub fn layout(&self) -> GridLayout {
        GridLayout::new(
            self.term_width,
            self.term_height,
            self.grid,
            self.style,
            self.apps.len(),
        )
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected.map(|flash| flash.index)
    }

    pub fn has_error(&self, index: usize) -> bool {
        matches!(self.error_flash.get(index), Some(Some(_)))
    }

    pub fn icons_loaded(&self) -> bool {
        self.icons.iter().any(Option::is_some)
    }

    pub(crate) fn next_token(&mut self) -> FlashToken {
        self.next_token += 1;
        self.next_token
    }

    /// The rendered icon for app `index` at the current geometry, rendering
    /// it on first use. `None` until the icon has been loaded.
    pub fn rendered_icon(
        &mut self,
        index: usize,
        renderer: &dyn IconRenderer,
    ) -> Option<&RenderedIcon> {
        let layout = self.layout();
        let icon_cells = layout.icon_cell_size();
        let target = layout.icon_pixel_box(self.cell_px, icon_scale(&self.apps, index));
        let key = CacheKey::new(index, icon_cells.width, icon_cells.height);

        let image = self.icons.get(index)?.as_ref()?;
        Some(
            self.cache
                .get_or_render(key, || renderer.render(image, target, Fit::Contain)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::PixelBox;
    use crate::graphics::placeholder;
    use crate::test_support::{test_config, test_session};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRenderer(AtomicUsize);

    impl IconRenderer for CountingRenderer {
        fn render(&self, _image: &IconImage, target: PixelBox, _fit: Fit) -> RenderedIcon {
            self.0.fetch_add(1, Ordering::SeqCst);
            RenderedIcon {
                payload: format!("{}x{}", target.width, target.height),
                width_px: target.width,
                height_px: target.height,
            }
        }
    }

    #[test]
    fn test_session_new_defaults() {
        let session = Session::new(test_config(5));
        assert!(!session.ready);
        assert!(session.needs_full_redraw);
        assert_eq!(session.selected_index(), None);
        assert_eq!(session.error_flash, vec![None; 5]);
        assert_eq!(session.icons.len(), 5);
        assert!(!session.icons_loaded());
        assert!(session.cache.is_empty());
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut session = Session::new(test_config(1));
        let a = session.next_token();
        let b = session.next_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_rendered_icon_needs_loaded_image() {
        let mut session = test_session(3);
        let renderer = CountingRenderer(AtomicUsize::new(0));
        assert!(session.rendered_icon(0, &renderer).is_none());
        assert!(session.rendered_icon(99, &renderer).is_none());
        assert_eq!(renderer.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_rendered_icon_is_cached() {
        let mut session = test_session(3);
        session.icons[1] = Some(placeholder(64, 64));
        let renderer = CountingRenderer(AtomicUsize::new(0));

        let first = session.rendered_icon(1, &renderer).cloned();
        let second = session.rendered_icon(1, &renderer).cloned();

        assert_eq!(renderer.0.load(Ordering::SeqCst), 1);
        assert_eq!(first, second);
        assert_eq!(session.cache.len(), 1);
        // 100x40, 1x5, no border/padding: 20x10 cells at 10x20 px.
        assert_eq!(first.map(|r| r.payload), Some("200x200".to_string()));
    }
}
