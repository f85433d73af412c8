use crate::grid::{ColorGrid, Rgb};

/// Packed 24-bit RGB pixels, row-major, first row at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    data: Vec<u8>,
}

impl Raster {
    pub const BYTES_PER_PIXEL: usize = 3;

    #[inline]
    pub fn pixel(&self, row: usize, col: usize) -> Rgb {
        let i = (row * self.width + col) * Self::BYTES_PER_PIXEL;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Pack a color grid into a raster.
pub fn assemble(colors: &ColorGrid) -> Raster {
    let mut data = Vec::with_capacity(colors.len() * Raster::BYTES_PER_PIXEL);
    for rgb in colors.data() {
        data.extend_from_slice(rgb);
    }
    Raster { width: colors.width(), height: colors.height(), data }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn bytes_are_row_major_rgb() {
        let colors = Grid::from_rows(&[
            vec![[1, 2, 3], [4, 5, 6]],
            vec![[7, 8, 9], [10, 11, 12]],
        ])
        .unwrap();
        let raster = assemble(&colors);
        assert_eq!(raster.as_bytes(), &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
        assert_eq!(raster.pixel(1, 0), [7, 8, 9]);
        assert_eq!(raster.pixel(0, 1), [4, 5, 6]);
    }

    #[test]
    fn byte_length_is_three_per_cell() {
        let colors = Grid::new(13, 5, [200u8, 100, 50]);
        let raster = assemble(&colors);
        assert_eq!((raster.width, raster.height), (13, 5));
        assert_eq!(raster.clone().into_bytes().len(), 13 * 5 * 3);
        assert_eq!(raster.pixel(4, 12), [200, 100, 50]);
    }
}
