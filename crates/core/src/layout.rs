use crate::{CardSize, GridRule};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Cell geometry for a fixed grid. Every card gets the same scale so the
/// artwork keeps its aspect ratio; leftover cell space stays as margin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridLayout {
    pub viewport: Viewport,
    pub cols: u16,
    pub rows: u16,
    pub cell_width: f32,
    pub cell_height: f32,
    pub scale: f32,
    pub card_width: f32,
    pub card_height: f32,
    pub centers: Vec<Point>,
}

impl GridLayout {
    pub fn compute(viewport: Viewport, grid: &GridRule, card: CardSize) -> Self {
        let cols = grid.cols.max(1);
        let rows = grid.rows.max(1);
        let cell_width = viewport.width / f32::from(cols);
        let cell_height = viewport.height / f32::from(rows);
        let scale = (cell_width / card.width).min(cell_height / card.height);

        let mut centers = Vec::with_capacity(grid.cells());
        for y in 0..rows {
            for x in 0..cols {
                centers.push(Point {
                    x: f32::from(x) * cell_width + cell_width / 2.0,
                    y: f32::from(y) * cell_height + cell_height / 2.0,
                });
            }
        }

        Self {
            viewport,
            cols,
            rows,
            cell_width,
            cell_height,
            scale,
            card_width: card.width * scale,
            card_height: card.height * scale,
            centers,
        }
    }

    pub fn center(&self, index: usize) -> Option<Point> {
        self.centers.get(index).copied()
    }

    /// Cell index whose scaled card contains the point. Margins hit nothing.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        if !(self.cell_width > 0.0 && self.cell_height > 0.0) || x < 0.0 || y < 0.0 {
            return None;
        }
        let col = (x / self.cell_width) as usize;
        let row = (y / self.cell_height) as usize;
        if col >= usize::from(self.cols) || row >= usize::from(self.rows) {
            return None;
        }
        let index = row * usize::from(self.cols) + col;
        let center = self.centers[index];
        let inside = (x - center.x).abs() <= self.card_width / 2.0
            && (y - center.y).abs() <= self.card_height / 2.0;
        inside.then_some(index)
    }
}
