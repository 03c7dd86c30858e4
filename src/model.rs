use crate::calcer::{engine, CalcerHandle};
use crate::error::{CatBoostError, CatBoostResult};
use crate::marshal::{BatchLayout, SampleLayout};
use crate::sys;
use crate::transform::{sigmoid, PredictionKind};
use std::ffi::CString;
use std::os::raw::c_void;
use std::path::Path;
use tracing::{debug, trace};

/// A loaded CatBoost model.
///
/// # Lifecycle
///
/// A `Model` is created by [`Model::load`] or [`Model::load_from_buffer`] and
/// owns its native calcer until it is released, either explicitly with
/// [`Model::close`] or when it is dropped. Release consumes the model, so any
/// query after release is rejected by the compiler:
///
/// ```compile_fail
/// # use catboost_rust::Model;
/// let model = Model::load("model.cbm").unwrap();
/// model.close();
/// model.float_features_count();
/// ```
///
/// # Thread Safety
///
/// Every call into the native engine, including the read of its last-error
/// string after a failure, runs inside one process-wide critical section.
/// A `Model` can therefore be shared across threads (e.g. in an `Arc`), but
/// predictions are serialized rather than run in parallel. For parallel
/// throughput, split batches into larger calls instead of more threads.
#[derive(Debug)]
pub struct Model {
    handle: CalcerHandle,
}

impl Model {
    /// Load a model from a file
    pub fn load<P: AsRef<Path>>(path: P) -> CatBoostResult<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| CatBoostError::InvalidPath(path.to_string_lossy().into_owned()))?;
        let path_c_str = CString::new(path_str)?;

        // Own the calcer before loading so it is deleted if the load fails
        let handle = CalcerHandle::create()?;
        engine(|| {
            CatBoostError::check_return_value(unsafe {
                sys::LoadFullModelFromFile(handle.as_ptr(), path_c_str.as_ptr())
            })
        })?;

        let model = Model { handle };
        debug!(
            path = %path.display(),
            float_features = model.float_features_count(),
            cat_features = model.cat_features_count(),
            "loaded CatBoost model"
        );
        Ok(model)
    }

    /// Load a model from a byte buffer
    ///
    /// # Arguments
    /// * `buffer` - Model content in CatBoost binary (`.cbm`) format
    ///
    /// # Example
    /// ```no_run
    /// use catboost_rust::Model;
    /// use std::fs;
    ///
    /// let model_bytes = fs::read("model.cbm").unwrap();
    /// let model = Model::load_from_buffer(&model_bytes).unwrap();
    /// ```
    pub fn load_from_buffer(buffer: &[u8]) -> CatBoostResult<Self> {
        let handle = CalcerHandle::create()?;
        engine(|| {
            CatBoostError::check_return_value(unsafe {
                sys::LoadFullModelFromBuffer(
                    handle.as_ptr(),
                    buffer.as_ptr() as *const c_void,
                    buffer.len(),
                )
            })
        })?;

        let model = Model { handle };
        debug!(
            bytes = buffer.len(),
            float_features = model.float_features_count(),
            cat_features = model.cat_features_count(),
            "loaded CatBoost model from buffer"
        );
        Ok(model)
    }

    /// Number of float features the model expects per sample
    pub fn float_features_count(&self) -> usize {
        engine(|| unsafe { sys::GetFloatFeaturesCount(self.handle.as_ptr()) })
    }

    /// Number of categorical features the model expects per sample
    pub fn cat_features_count(&self) -> usize {
        engine(|| unsafe { sys::GetCatFeaturesCount(self.handle.as_ptr()) })
    }

    /// Number of trees in the ensemble
    pub fn tree_count(&self) -> usize {
        engine(|| unsafe { sys::GetTreeCount(self.handle.as_ptr()) })
    }

    /// Number of values the model produces per sample (1 unless multiclass)
    pub fn dimensions_count(&self) -> usize {
        engine(|| unsafe { sys::GetDimensionsCount(self.handle.as_ptr()) })
    }

    /// Predict raw margins for a batch of samples
    ///
    /// # Arguments
    /// * `floats` - Float features, one row per sample
    /// * `cats` - Categorical features, one row per sample
    ///
    /// Every row is read with the width of the first row of its input. When
    /// both inputs are given, the shorter one determines the sample count and
    /// extra rows of the longer one are ignored.
    ///
    /// # Returns
    /// One raw margin per sample, in input order
    ///
    /// # Example
    /// ```no_run
    /// use catboost_rust::Model;
    ///
    /// let model = Model::load("model.cbm").unwrap();
    /// let predictions = model
    ///     .predict_batch(&[vec![1.0f32, 2.0, 3.0]], &[vec!["red"]])
    ///     .unwrap();
    /// assert_eq!(predictions.len(), 1);
    /// ```
    pub fn predict_batch<F, C, S>(&self, floats: &[F], cats: &[C]) -> CatBoostResult<Vec<f64>>
    where
        F: AsRef<[f32]>,
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut layout = BatchLayout::new(floats, cats)?;
        let shape = layout.shape();
        trace!(
            samples = shape.samples,
            float_width = shape.float_width,
            cat_width = shape.cat_width,
            "batch prediction"
        );

        let mut out_result = vec![0.0f64; shape.samples];
        engine(|| {
            CatBoostError::check_return_value(unsafe {
                sys::CalcModelPrediction(
                    self.handle.as_ptr(),
                    shape.samples,
                    layout.float_rows_ptr(),
                    shape.float_width,
                    layout.cat_rows_ptr(),
                    shape.cat_width,
                    out_result.as_mut_ptr(),
                    out_result.len(),
                )
            })
        })?;

        Ok(out_result)
    }

    /// Predict the raw margin for a single sample
    pub fn predict_single<S: AsRef<str>>(&self, floats: &[f32], cats: &[S]) -> CatBoostResult<f64> {
        let mut sample = SampleLayout::new(floats, cats)?;
        trace!(
            float_width = sample.float_width(),
            cat_width = sample.cat_width(),
            "single prediction"
        );

        let mut out_result = 0.0f64;
        engine(|| {
            CatBoostError::check_return_value(unsafe {
                sys::CalcModelPredictionSingle(
                    self.handle.as_ptr(),
                    sample.float_ptr(),
                    sample.float_width(),
                    sample.cat_ptr(),
                    sample.cat_width(),
                    &mut out_result,
                    1,
                )
            })
        })?;

        Ok(out_result)
    }

    /// Predict probabilities for a batch: [`Model::predict_batch`] passed through the sigmoid
    pub fn predict_batch_proba<F, C, S>(&self, floats: &[F], cats: &[C]) -> CatBoostResult<Vec<f64>>
    where
        F: AsRef<[f32]>,
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut results = self.predict_batch(floats, cats)?;
        for value in results.iter_mut() {
            *value = sigmoid(*value);
        }
        Ok(results)
    }

    /// Predict the probability for a single sample
    pub fn predict_single_proba<S: AsRef<str>>(
        &self,
        floats: &[f32],
        cats: &[S],
    ) -> CatBoostResult<f64> {
        self.predict_single(floats, cats).map(sigmoid)
    }

    /// Predict a batch, returning either raw margins or probabilities
    pub fn predict_batch_as<F, C, S>(
        &self,
        kind: PredictionKind,
        floats: &[F],
        cats: &[C],
    ) -> CatBoostResult<Vec<f64>>
    where
        F: AsRef<[f32]>,
        C: AsRef<[S]>,
        S: AsRef<str>,
    {
        let results = self.predict_batch(floats, cats)?;
        Ok(results.into_iter().map(|raw| kind.apply(raw)).collect())
    }

    /// Release the native model now instead of at the end of scope
    pub fn close(self) {
        debug!("releasing CatBoost model");
        drop(self);
    }
}
