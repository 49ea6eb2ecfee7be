use flee_core::{CellCoord, Direction, GridQuery, Vec2};

use crate::GridError;

/// Dense row-major grid of tile capacities.
///
/// Tile `(x, y)` covers world space `[x * tile_size, (x + 1) * tile_size)` on each axis.
/// Capacities are stored as-is; zero and negative values are legal.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    width: i32,
    height: i32,
    tile_size: f32,
    capacity: Vec<i32>,
}

impl TileMap {
    pub const DEFAULT_TILE_SIZE: f32 = 16.0;

    /// A `width` x `height` map with every capacity set to `capacity`.
    pub fn filled(width: u32, height: u32, tile_size: f32, capacity: i32) -> Result<Self, GridError> {
        let invalid = || GridError::InvalidDimensions {
            width: width as usize,
            height: height as usize,
        };
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        let w = i32::try_from(width).map_err(|_| invalid())?;
        let h = i32::try_from(height).map_err(|_| invalid())?;
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(invalid)?;
        Self::check_tile_size(tile_size)?;

        Ok(Self {
            width: w,
            height: h,
            tile_size,
            capacity: vec![capacity; len],
        })
    }

    pub fn new(width: u32, height: u32, tile_size: f32) -> Result<Self, GridError> {
        Self::filled(width, height, tile_size, 0)
    }

    /// Build from capacity rows; `rows[y][x]` is the capacity of tile `(x, y)`.
    pub fn from_rows(rows: &[Vec<i32>], tile_size: f32) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let invalid = GridError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let w = i32::try_from(width).map_err(|_| invalid.clone())?;
        let h = i32::try_from(height).map_err(|_| invalid)?;
        Self::check_tile_size(tile_size)?;

        let mut capacity = Vec::with_capacity(width * height);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
            capacity.extend_from_slice(cells);
        }

        Ok(Self {
            width: w,
            height: h,
            tile_size,
            capacity,
        })
    }

    fn check_tile_size(tile_size: f32) -> Result<(), GridError> {
        if tile_size.is_finite() && tile_size > 0.0 {
            Ok(())
        } else {
            Err(GridError::InvalidTileSize(tile_size))
        }
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn idx(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        Some((cell.y as usize) * (self.width as usize) + cell.x as usize)
    }

    pub fn capacity_at(&self, cell: CellCoord) -> Option<i32> {
        self.idx(cell).map(|idx| self.capacity[idx])
    }

    pub fn set_capacity(&mut self, cell: CellCoord, capacity: i32) -> Result<(), GridError> {
        let idx = self.idx(cell).ok_or(GridError::OutOfBounds(cell))?;
        self.capacity[idx] = capacity;
        Ok(())
    }

    /// World-space center of `cell`.
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            (cell.x as f32 + 0.5) * self.tile_size,
            (cell.y as f32 + 0.5) * self.tile_size,
        )
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| CellCoord::new(x, y)))
    }
}

impl GridQuery for TileMap {
    fn resolve_cell(&self, world: Vec2) -> Option<CellCoord> {
        if !world.x.is_finite() || !world.y.is_finite() {
            return None;
        }
        let x = (world.x / self.tile_size).floor();
        let y = (world.y / self.tile_size).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some(CellCoord::new(x as i32, y as i32))
    }

    fn neighbor(&self, cell: CellCoord, direction: Direction) -> Option<CellCoord> {
        if !self.contains(cell) {
            return None;
        }
        cell.step(direction).filter(|n| self.contains(*n))
    }

    /// Cells outside the map report zero capacity.
    fn capacity(&self, cell: CellCoord) -> i32 {
        self.capacity_at(cell).unwrap_or(0)
    }
}
