use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// RGB triple, one byte per channel.
pub type Rgb = [u8; 3];

/// Quantized noise samples, one per cell, in `[0, 255]`.
pub type ScalarGrid = Grid<u8>;

/// One color per cell, produced by classification.
pub type ColorGrid = Grid<Rgb>;

/// A 2D grid stored row-major, `height` rows of `width` cells.
///
/// Fields are private so `data.len() == width * height` always holds;
/// deserialization checks it too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Grid<T> {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw<T> {
            data: Vec<T>,
            width: usize,
            height: usize,
        }
        let raw = Raw::<T>::deserialize(d)?;
        Grid::from_vec(raw.data, raw.width, raw.height).map_err(serde::de::Error::custom)
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid filled with the given value.
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Self { data: vec![fill; width * height], width, height }
    }

    /// Build a grid from nested rows. All rows must have the length of the first.
    pub fn from_rows(rows: &[Vec<T>]) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(width * rows.len());
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(GridError::RaggedRow { row, found: cells.len(), expected: width });
            }
            data.extend_from_slice(cells);
        }
        Ok(Self { data, width, height: rows.len() })
    }

    /// Nested-row view, mostly for fixtures and debugging output.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }
}

impl<T> Grid<T> {
    /// Wrap row-major `data`, which must hold exactly `width * height` cells.
    pub fn from_vec(data: Vec<T>, width: usize, height: usize) -> Result<Self, GridError> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(GridError::ShapeMismatch { width, height, len: data.len() });
        }
        Ok(Self { data, width, height })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major cells.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> &T {
        &self.data[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, val: T) {
        self.data[row * self.width + col] = val;
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics; an empty grid simply has no rows.
        self.data.chunks(self.width.max(1))
    }

    /// Apply `f` cell by cell, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid { data: self.data.iter().map(f).collect(), width: self.width, height: self.height }
    }
}

impl<T: Send> Grid<T> {
    /// Fill the grid row by row with `f(row_index, row)`, stopping at the
    /// first error. Rows are disjoint, so with the `threading` feature they
    /// are filled in parallel.
    pub fn try_fill_rows<E, F>(&mut self, f: F) -> Result<(), E>
    where
        E: Send,
        F: Fn(usize, &mut [T]) -> Result<(), E> + Sync + Send,
    {
        let width = self.width.max(1);
        #[cfg(feature = "threading")]
        {
            use rayon::prelude::*;
            self.data.par_chunks_mut(width).enumerate().try_for_each(|(r, row)| f(r, row))
        }
        #[cfg(not(feature = "threading"))]
        {
            self.data.chunks_mut(width).enumerate().try_for_each(|(r, row)| f(r, row))
        }
    }
}
