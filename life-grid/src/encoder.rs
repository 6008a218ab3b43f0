use crate::{CellGrid, GridSize};

/// Low 24 bits of every live pixel, laid out as `0xAARRGGBB`: pure green.
pub const LIVE_CELL_COLOR: u32 = 0x0000_ff00;

/// One `0xAARRGGBB` color per cell, indexed like the grid it was encoded from.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    size: GridSize,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            pixels: vec![0; size.num_cells()],
        }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.pixels
    }

    pub fn row_stride_bytes(&self) -> usize {
        self.size.width as usize * size_of::<u32>()
    }
}

/// Age goes in the alpha byte, so long-lived cells come out more opaque.
pub fn encode_cell(age: u8) -> u32 {
    if age == 0 {
        0
    } else {
        ((age as u32) << 24) | LIVE_CELL_COLOR
    }
}

pub fn encode(grid: &CellGrid, buffer: &mut PixelBuffer) {
    assert_eq!(grid.size(), buffer.size());
    for (age, pixel) in grid.cells_iter().zip(buffer.pixels.iter_mut()) {
        *pixel = encode_cell(*age);
    }
}
