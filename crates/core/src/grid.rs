//! Authoritative cell occupancy for the battle board.
//! Pure data and queries; turn logic never originates here.

use crate::types::{CellKind, Pos};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub occupied: bool,
    pub kind: CellKind,
}

#[derive(Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cell_size: f32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize, cell_size: f32) -> Self {
        Self { width, height, cell_size, cells: vec![Cell::default(); width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_valid(&self, x: i32, z: i32) -> bool {
        x >= 0 && z >= 0 && (x as usize) < self.width && (z as usize) < self.height
    }

    /// Invalid coordinates are never free.
    pub fn is_free(&self, x: i32, z: i32) -> bool {
        self.is_valid(x, z) && !self.cells[self.index(x, z)].occupied
    }

    pub fn cell(&self, x: i32, z: i32) -> Option<Cell> {
        if !self.is_valid(x, z) {
            return None;
        }
        Some(self.cells[self.index(x, z)])
    }

    /// Sets occupancy for one cell. Out-of-bounds coordinates are silently
    /// ignored. A vacated cell always reads back as `CellKind::Empty`
    /// regardless of the kind passed in.
    pub fn set_occupied(&mut self, x: i32, z: i32, occupied: bool, kind: CellKind) {
        if !self.is_valid(x, z) {
            return;
        }
        let idx = self.index(x, z);
        self.cells[idx] =
            Cell { occupied, kind: if occupied { kind } else { CellKind::Empty } };
    }

    /// Centered world-space transform for one cell. Presentation concern;
    /// included only as a dependency signature for renderers.
    pub fn world_position(&self, x: i32, z: i32) -> Option<(f32, f32)> {
        if !self.is_valid(x, z) {
            return None;
        }
        let offset_x = (self.width as f32 - 1.0) * self.cell_size * 0.5;
        let offset_z = (self.height as f32 - 1.0) * self.cell_size * 0.5;
        Some((x as f32 * self.cell_size - offset_x, z as f32 * self.cell_size - offset_z))
    }

    pub fn occupied_cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.cells.iter().enumerate().filter(|(_, cell)| cell.occupied).map(|(idx, cell)| {
            (Pos { x: (idx % self.width) as i32, z: (idx / self.width) as i32 }, *cell)
        })
    }

    fn index(&self, x: i32, z: i32) -> usize {
        (z as usize) * self.width + (x as usize)
    }
}
