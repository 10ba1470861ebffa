//! # Render Cache
//!
//! Memoizes rendered icon payloads by `(app index, width cells, height cells)`.
//!
//! The key only makes sense for one pixels-per-cell measurement: the same
//! `width_cells` is a different number of pixels once the font or terminal
//! changes. So the cache is never evicted piecemeal, it is cleared whole on
//! every geometry change.

use std::collections::HashMap;

/// An icon rendered for the terminal, plus the pixel size it actually came out at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedIcon {
    pub payload: String,
    pub width_px: u32,
    pub height_px: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub app_index: usize,
    pub width_cells: u16,
    pub height_cells: u16,
}

impl CacheKey {
    pub fn new(app_index: usize, width_cells: u16, height_cells: u16) -> Self {
        Self {
            app_index,
            width_cells,
            height_cells,
        }
    }
}

#[derive(Debug, Default)]
pub struct RenderCache {
    entries: HashMap<CacheKey, RenderedIcon>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&RenderedIcon> {
        self.entries.get(key)
    }

    pub fn put(&mut self, key: CacheKey, icon: RenderedIcon) {
        self.entries.insert(key, icon);
    }

    /// Returns the cached icon for `key`, rendering and storing it on a miss.
    pub fn get_or_render<F>(&mut self, key: CacheKey, render: F) -> &RenderedIcon
    where
        F: FnOnce() -> RenderedIcon,
    {
        self.entries.entry(key).or_insert_with(render)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn icon(payload: &str) -> RenderedIcon {
        RenderedIcon {
            payload: payload.to_string(),
            width_px: 8,
            height_px: 8,
        }
    }

    #[test]
    fn test_put_then_get() {
        let mut cache = RenderCache::new();
        let key = CacheKey::new(0, 16, 6);
        assert!(cache.get(&key).is_none());
        cache.put(key, icon("a"));
        assert_eq!(cache.get(&key), Some(&icon("a")));
        assert!(cache.get(&CacheKey::new(0, 16, 7)).is_none());
        assert!(cache.get(&CacheKey::new(1, 16, 6)).is_none());
    }

    #[test]
    fn test_get_or_render_only_renders_on_miss() {
        let mut cache = RenderCache::new();
        let key = CacheKey::new(2, 10, 5);
        let mut calls = 0;

        let first = cache
            .get_or_render(key, || {
                calls += 1;
                icon("first")
            })
            .clone();
        let second = cache
            .get_or_render(key, || {
                calls += 1;
                icon("second")
            })
            .clone();

        assert_eq!(calls, 1);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut cache = RenderCache::new();
        for i in 0..5 {
            cache.put(CacheKey::new(i, 10, 5), icon("x"));
        }
        assert_eq!(cache.len(), 5);
        cache.clear();
        assert!(cache.is_empty());
    }
}
