//! Precomputed pairwise similarity matrix, loaded from a binary artifact.
//!
//! The artifact is a flat binary file: a little-endian header
//! `[rows: u32][cols: u32][crc32: u32]` followed by `rows * cols` f32 values
//! in row-major order. The crc32 covers the payload bytes. Reads go through a
//! memory map when available and fall back to regular file I/O.

use crate::error::{RecError, Result};
use ndarray::{Array2, ArrayView1};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Header written at the start of the file.
/// [rows: u32][cols: u32][crc32: u32]
const HEADER_SIZE: usize = 12;

/// Dense N x N similarity matrix aligned by row index to the catalog.
///
/// Symmetry is not assumed; only row `i` is ever read. `matrix[i][i]` holds
/// the self-similarity score and is excluded from results by the ranker.
#[derive(Debug)]
pub struct SimilarityIndex {
    matrix: Array2<f32>,
}

impl SimilarityIndex {
    /// Build an index from an in-memory matrix (used by tests and embedders).
    pub fn from_matrix(matrix: Array2<f32>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(RecError::DimensionMismatch {
                expected: rows,
                actual: cols,
            });
        }
        if rows == 0 {
            return Err(RecError::Load(
                "similarity matrix has zero dimension".to_string(),
            ));
        }
        Ok(Self { matrix })
    }

    /// Open a similarity matrix artifact.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;

        // Prefer a memory map; fall back to buffered I/O if mmap fails.
        match unsafe { memmap2::Mmap::map(&file) } {
            Ok(mmap) => Self::from_bytes(&mmap),
            Err(_) => {
                let mut bytes = Vec::new();
                let mut file = file;
                file.read_to_end(&mut bytes)?;
                Self::from_bytes(&bytes)
            }
        }
    }

    /// Write the matrix in the artifact format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let (rows, cols) = self.matrix.dim();

        let mut payload = Vec::with_capacity(rows * cols * 4);
        for &value in self.matrix.iter() {
            payload.extend_from_slice(&value.to_le_bytes());
        }
        let crc = crc32fast::hash(&payload);

        let mut file = File::create(path)?;
        file.write_all(&(rows as u32).to_le_bytes())?;
        file.write_all(&(cols as u32).to_le_bytes())?;
        file.write_all(&crc.to_le_bytes())?;
        file.write_all(&payload)?;
        file.sync_all()?;
        Ok(())
    }

    /// Parse the artifact format from raw bytes.
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(RecError::Load(
                "similarity matrix file too small for header".to_string(),
            ));
        }

        let rows = u32::from_le_bytes(bytes[0..4].try_into().expect("header slice")) as usize;
        let cols = u32::from_le_bytes(bytes[4..8].try_into().expect("header slice")) as usize;
        let crc = u32::from_le_bytes(bytes[8..12].try_into().expect("header slice"));

        let payload = &bytes[HEADER_SIZE..];
        let expected = rows * cols * 4;
        if payload.len() != expected {
            return Err(RecError::Load(format!(
                "similarity matrix payload is {} bytes, expected {}",
                payload.len(),
                expected
            )));
        }
        if crc32fast::hash(payload) != crc {
            return Err(RecError::Load(
                "similarity matrix checksum mismatch".to_string(),
            ));
        }

        let values: Vec<f32> = payload
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes(chunk.try_into().expect("4-byte chunk")))
            .collect();

        let matrix = Array2::from_shape_vec((rows, cols), values)
            .map_err(|e| RecError::Load(e.to_string()))?;
        Self::from_matrix(matrix)
    }

    /// The similarity vector for row `i`.
    pub fn row(&self, i: usize) -> Result<ArrayView1<'_, f32>> {
        let n = self.dimension();
        if i >= n {
            return Err(RecError::IndexOutOfRange { index: i, len: n });
        }
        Ok(self.matrix.row(i))
    }

    /// The matrix dimension (rows == cols).
    pub fn dimension(&self) -> usize {
        self.matrix.nrows()
    }
}
