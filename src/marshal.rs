//! Conversion of host feature rows into the layouts `CalcModelPrediction*` expect.
//!
//! A [`BatchLayout`] is the arena for one batch call: it owns the contiguous
//! float buffer, every categorical `CString`, and the pointer tables into
//! them. Dropping it frees all of it at once, on success and error paths alike.

use crate::error::{CatBoostError, CatBoostResult};
use serde::Deserialize;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;
use tracing::warn;

/// An owned batch of samples, each split into float and categorical features.
///
/// Deserializes from `{"float_features": [[..]], "cat_features": [[..]]}`;
/// either field may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FeatureBatch {
    #[serde(default)]
    pub float_features: Vec<Vec<f32>>,
    #[serde(default)]
    pub cat_features: Vec<Vec<String>>,
}

impl FeatureBatch {
    pub fn new(float_features: Vec<Vec<f32>>, cat_features: Vec<Vec<String>>) -> Self {
        FeatureBatch {
            float_features,
            cat_features,
        }
    }

    /// Number of samples a prediction over this batch returns.
    pub fn sample_count(&self) -> usize {
        sample_count(self.float_features.len(), self.cat_features.len())
    }
}

/// Effective sample count: the shorter input when both are present, else whichever is.
fn sample_count(float_rows: usize, cat_rows: usize) -> usize {
    match (float_rows, cat_rows) {
        (0, n) | (n, 0) => n,
        (f, c) => f.min(c),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchShape {
    pub(crate) samples: usize,
    pub(crate) float_width: usize,
    pub(crate) cat_width: usize,
}

impl BatchShape {
    fn of<F, C, S>(floats: &[F], cats: &[C]) -> CatBoostResult<Self>
    where
        F: AsRef<[f32]>,
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        let shape = BatchShape {
            samples: sample_count(floats.len(), cats.len()),
            float_width: floats.first().map_or(0, |row| row.as_ref().len()),
            cat_width: cats.first().map_or(0, |row| row.as_ref().len()),
        };
        if shape.samples == 0 || shape.float_width + shape.cat_width == 0 {
            return Err(CatBoostError::EmptySamples);
        }
        Ok(shape)
    }
}

/// NUL-terminated copies of one sample's categorical values plus their pointer table.
#[derive(Debug)]
pub(crate) struct CatRow {
    values: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl CatRow {
    /// Copy exactly `width` values from `row`, padding missing ones with "".
    fn with_width<S: AsRef<str>>(row: &[S], width: usize) -> CatBoostResult<Self> {
        let values = (0..width)
            .map(|i| CString::new(row.get(i).map_or("", |s| s.as_ref())))
            .collect::<Result<Vec<_>, _>>()?;
        let ptrs = values.iter().map(|s| s.as_ptr()).collect();
        Ok(CatRow { values, ptrs })
    }

    pub(crate) fn new<S: AsRef<str>>(row: &[S]) -> CatBoostResult<Self> {
        Self::with_width(row, row.len())
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    /// Pointer to the first value pointer, or null for an empty row.
    pub(crate) fn as_mut_ptr(&mut self) -> *mut *const c_char {
        if self.ptrs.is_empty() {
            ptr::null_mut()
        } else {
            self.ptrs.as_mut_ptr()
        }
    }
}

/// Arena holding every transient buffer for one `CalcModelPrediction` call.
#[derive(Debug)]
pub(crate) struct BatchLayout {
    shape: BatchShape,
    float_values: Vec<f32>,
    float_rows: Vec<*const f32>,
    // Owns the strings behind cat_row_ptrs; only read through those pointers
    #[allow(dead_code)]
    cat_rows: Vec<CatRow>,
    cat_row_ptrs: Vec<*mut *const c_char>,
}

impl BatchLayout {
    pub(crate) fn new<F, C, S>(floats: &[F], cats: &[C]) -> CatBoostResult<Self>
    where
        F: AsRef<[f32]>,
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        let shape = BatchShape::of(floats, cats)?;
        let mut ragged = 0usize;

        let mut float_values = vec![0.0f32; shape.samples * shape.float_width];
        if shape.float_width > 0 {
            for (dst, row) in float_values
                .chunks_exact_mut(shape.float_width)
                .zip(floats.iter().take(shape.samples))
            {
                let row = row.as_ref();
                if row.len() != shape.float_width {
                    ragged += 1;
                }
                let n = row.len().min(shape.float_width);
                dst[..n].copy_from_slice(&row[..n]);
            }
        }

        // The buffer is never resized after this point, so the row pointers stay valid
        let float_rows = (0..shape.samples)
            .map(|i| {
                if shape.float_width > 0 {
                    float_values[i * shape.float_width..].as_ptr()
                } else {
                    ptr::null()
                }
            })
            .collect();

        let mut cat_rows = Vec::with_capacity(shape.samples);
        if shape.cat_width > 0 {
            for row in cats.iter().take(shape.samples) {
                let row = row.as_ref();
                if row.len() != shape.cat_width {
                    ragged += 1;
                }
                cat_rows.push(CatRow::with_width(row, shape.cat_width)?);
            }
        }
        let mut cat_row_ptrs: Vec<*mut *const c_char> =
            cat_rows.iter_mut().map(CatRow::as_mut_ptr).collect();
        // Categorical input absent: one null row per sample with zero width
        cat_row_ptrs.resize(shape.samples, ptr::null_mut());

        if ragged > 0 {
            warn!(
                ragged_rows = ragged,
                float_width = shape.float_width,
                cat_width = shape.cat_width,
                "padding or truncating rows to the width of the first row"
            );
        }

        Ok(BatchLayout {
            shape,
            float_values,
            float_rows,
            cat_rows,
            cat_row_ptrs,
        })
    }

    pub(crate) fn shape(&self) -> BatchShape {
        self.shape
    }

    pub(crate) fn float_rows_ptr(&mut self) -> *mut *const f32 {
        self.float_rows.as_mut_ptr()
    }

    pub(crate) fn cat_rows_ptr(&mut self) -> *mut *mut *const c_char {
        self.cat_row_ptrs.as_mut_ptr()
    }
}

/// One sample for `CalcModelPredictionSingle`: borrowed floats, owned categorical copies.
#[derive(Debug)]
pub(crate) struct SampleLayout<'a> {
    floats: &'a [f32],
    cats: CatRow,
}

impl<'a> SampleLayout<'a> {
    pub(crate) fn new<S: AsRef<str>>(floats: &'a [f32], cats: &[S]) -> CatBoostResult<Self> {
        if floats.is_empty() && cats.is_empty() {
            return Err(CatBoostError::EmptySample);
        }
        Ok(SampleLayout {
            floats,
            cats: CatRow::new(cats)?,
        })
    }

    pub(crate) fn float_width(&self) -> usize {
        self.floats.len()
    }

    pub(crate) fn cat_width(&self) -> usize {
        self.cats.len()
    }

    /// Pointer to the first float, or null when the sample has none.
    pub(crate) fn float_ptr(&self) -> *const f32 {
        if self.floats.is_empty() {
            ptr::null()
        } else {
            self.floats.as_ptr()
        }
    }

    pub(crate) fn cat_ptr(&mut self) -> *mut *const c_char {
        self.cats.as_mut_ptr()
    }
}
