//! Simulated lazily-rendered list over a saved page
//!
//! Renders only the rows intersecting the viewport (plus overscan), the
//! way virtualized track lists on streaming sites do, so the capture
//! engine can be driven offline.

use super::page::PageDocument;
use crate::capture::{ExtractedRow, RowExtractor, ScrollSurface};
use anyhow::Result;
use std::cell::Cell;

/// Geometry of the simulated scroll container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListGeometry {
    pub row_height: f64,
    pub viewport_height: f64,

    /// Extra rows rendered above and below the viewport
    pub overscan: usize,
}

impl Default for ListGeometry {
    fn default() -> Self {
        Self {
            row_height: 56.0,
            viewport_height: 720.0,
            overscan: 2,
        }
    }
}

/// Scrollable list that renders a window of rows at a time
#[derive(Debug, Clone)]
pub struct VirtualList {
    rows: Vec<ExtractedRow>,
    geometry: ListGeometry,
    offset: Cell<f64>,
}

impl VirtualList {
    pub fn new(rows: Vec<ExtractedRow>, geometry: ListGeometry) -> Self {
        Self {
            rows,
            geometry,
            offset: Cell::new(0.0),
        }
    }

    pub fn from_document(document: &PageDocument, geometry: ListGeometry) -> Self {
        Self::new(document.rows.clone(), geometry)
    }

    /// Index range of the rows rendered at the current offset
    pub fn rendered_range(&self) -> std::ops::Range<usize> {
        if self.rows.is_empty() || self.geometry.row_height <= 0.0 {
            return 0..0;
        }
        let offset = self.offset.get();
        let first = (offset / self.geometry.row_height).floor() as usize;
        let last = ((offset + self.geometry.viewport_height) / self.geometry.row_height).ceil()
            as usize;

        let start = first.saturating_sub(self.geometry.overscan);
        let end = last.saturating_add(self.geometry.overscan).min(self.rows.len());
        start.min(end)..end
    }

    fn max_offset(&self) -> f64 {
        (self.total_height() - self.geometry.viewport_height).max(0.0)
    }

    fn total_height(&self) -> f64 {
        (self.rows.len() as f64 * self.geometry.row_height).max(self.geometry.viewport_height)
    }
}

impl RowExtractor for VirtualList {
    type Row = usize;

    fn list_rows(&self) -> Result<Vec<usize>> {
        Ok(self.rendered_range().collect())
    }

    fn extract_fields(&self, row: &usize) -> ExtractedRow {
        self.rows.get(*row).cloned().unwrap_or_default()
    }
}

impl ScrollSurface for VirtualList {
    fn offset(&self) -> Result<f64> {
        Ok(self.offset.get())
    }

    fn content_height(&self) -> Result<f64> {
        Ok(self.total_height())
    }

    fn viewport_height(&self) -> Result<f64> {
        Ok(self.geometry.viewport_height)
    }

    fn set_offset(&self, offset: f64) -> Result<()> {
        self.offset.set(offset.clamp(0.0, self.max_offset()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<ExtractedRow> {
        (0..n)
            .map(|i| ExtractedRow::new(format!("Song {}", i), Vec::new()))
            .collect()
    }

    fn geometry() -> ListGeometry {
        ListGeometry {
            row_height: 50.0,
            viewport_height: 200.0,
            overscan: 1,
        }
    }

    #[test]
    fn test_renders_window_around_viewport() {
        let list = VirtualList::new(rows(20), geometry());
        assert_eq!(list.rendered_range(), 0..5);

        list.set_offset(300.0).unwrap();
        assert_eq!(list.rendered_range(), 5..11);
    }

    #[test]
    fn test_offset_is_clamped() {
        let list = VirtualList::new(rows(20), geometry());

        list.set_offset(10_000.0).unwrap();
        assert_eq!(list.offset().unwrap(), 800.0);
        assert_eq!(list.rendered_range(), 15..20);

        list.set_offset(-5.0).unwrap();
        assert_eq!(list.offset().unwrap(), 0.0);
    }

    #[test]
    fn test_degenerate_geometry_does_not_overflow() {
        let tiny_rows = VirtualList::new(
            rows(1),
            ListGeometry {
                row_height: 1e-300,
                ..geometry()
            },
        );
        assert_eq!(tiny_rows.list_rows().unwrap(), vec![0]);

        let endless_viewport = VirtualList::new(
            rows(3),
            ListGeometry {
                viewport_height: f64::INFINITY,
                ..geometry()
            },
        );
        assert_eq!(endless_viewport.list_rows().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_short_list_cannot_scroll() {
        let list = VirtualList::new(rows(2), geometry());

        assert_eq!(list.content_height().unwrap(), 200.0);
        list.set_offset(350.0).unwrap();
        assert_eq!(list.offset().unwrap(), 0.0);
        assert_eq!(list.list_rows().unwrap(), vec![0, 1]);
    }
}
