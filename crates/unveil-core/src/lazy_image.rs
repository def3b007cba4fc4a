//! Lazy image loading with a fallback for hosts lacking native support

use std::collections::HashMap;

use tracing::debug;

use crate::reveal::{ElementId, IntersectionEvent};

/// Source attributes of an `img[loading="lazy"]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LazyImage {
    pub src: String,
    pub data_src: Option<String>,
}

/// `data-src` when present and non-empty, else `src`
pub fn resolve_src(image: &LazyImage) -> &str {
    match image.data_src.as_deref() {
        Some(data_src) if !data_src.is_empty() => data_src,
        _ => &image.src,
    }
}

/// Decides when each lazy image gets its final `src`.
///
/// With native lazy loading the source is assigned at once and the browser
/// defers the fetch. Otherwise images wait for their first intersection and
/// are unobserved after loading.
#[derive(Debug, Clone)]
pub struct LazyImageLoader {
    native_supported: bool,
    observed: HashMap<ElementId, LazyImage>,
}

impl LazyImageLoader {
    pub fn new(native_supported: bool) -> Self {
        Self {
            native_supported,
            observed: HashMap::new(),
        }
    }

    /// Start tracking an image. Returns the source to assign immediately when
    /// the host lazy-loads natively.
    pub fn observe(&mut self, id: ElementId, image: LazyImage) -> Option<String> {
        if self.native_supported {
            return Some(resolve_src(&image).to_string());
        }
        self.observed.insert(id, image);
        None
    }

    /// Returns the source to load when an observed image first intersects
    pub fn on_intersection(&mut self, event: &IntersectionEvent) -> Option<String> {
        if !event.is_intersecting {
            return None;
        }
        let Some(image) = self.observed.remove(&event.id) else {
            debug!("Intersection for unobserved image '{}', ignoring", event.id);
            return None;
        };
        Some(resolve_src(&image).to_string())
    }

    /// Images still waiting for their first intersection
    pub fn pending(&self) -> usize {
        self.observed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(src: &str, data_src: Option<&str>) -> LazyImage {
        LazyImage {
            src: src.to_string(),
            data_src: data_src.map(str::to_string),
        }
    }

    #[test]
    fn test_resolve_prefers_data_src() {
        assert_eq!(resolve_src(&image("low.jpg", Some("full.jpg"))), "full.jpg");
        assert_eq!(resolve_src(&image("low.jpg", Some(""))), "low.jpg");
        assert_eq!(resolve_src(&image("low.jpg", None)), "low.jpg");
    }

    #[test]
    fn test_native_assigns_immediately() {
        let mut loader = LazyImageLoader::new(true);
        let src = loader.observe("dish".into(), image("a.jpg", Some("b.jpg")));
        assert_eq!(src.as_deref(), Some("b.jpg"));
        assert_eq!(loader.pending(), 0);
    }

    #[test]
    fn test_fallback_loads_once_on_intersection() {
        let mut loader = LazyImageLoader::new(false);
        assert_eq!(loader.observe("dish".into(), image("a.jpg", Some("b.jpg"))), None);

        assert_eq!(loader.on_intersection(&IntersectionEvent::leaving("dish")), None);
        assert_eq!(
            loader.on_intersection(&IntersectionEvent::entering("dish", 0.1)).as_deref(),
            Some("b.jpg")
        );
        assert_eq!(loader.on_intersection(&IntersectionEvent::entering("dish", 0.1)), None);
        assert_eq!(loader.pending(), 0);
    }
}
