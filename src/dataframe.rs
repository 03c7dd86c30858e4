//! Building feature batches from polars DataFrames.

use crate::error::CatBoostResult;
use crate::marshal::FeatureBatch;
use crate::model::Model;
use polars::prelude::*;

impl FeatureBatch {
    /// Collect the named columns of `df` into a batch, one sample per row.
    ///
    /// Float columns are cast to `Float32` with nulls read as NaN, which the
    /// model treats as a missing value. Categorical columns are cast to
    /// `String` with nulls read as the empty string.
    pub fn from_dataframe(
        df: &DataFrame,
        float_columns: &[&str],
        cat_columns: &[&str],
    ) -> CatBoostResult<Self> {
        let height = df.height();

        let mut float_features = if float_columns.is_empty() {
            Vec::new()
        } else {
            vec![Vec::with_capacity(float_columns.len()); height]
        };
        for name in float_columns {
            let series = df
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::Float32)?;
            for (row, value) in float_features.iter_mut().zip(series.f32()?.into_iter()) {
                row.push(value.unwrap_or(f32::NAN));
            }
        }

        let mut cat_features = if cat_columns.is_empty() {
            Vec::new()
        } else {
            vec![Vec::with_capacity(cat_columns.len()); height]
        };
        for name in cat_columns {
            let series = df
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::String)?;
            for (row, value) in cat_features.iter_mut().zip(series.str()?.into_iter()) {
                row.push(value.unwrap_or_default().to_string());
            }
        }

        Ok(FeatureBatch::new(float_features, cat_features))
    }
}

impl Model {
    /// Predict raw margins for every row of `df`
    ///
    /// # Example
    /// ```no_run
    /// use catboost_rust::Model;
    /// use polars::prelude::*;
    ///
    /// let df = df!(
    ///     "age" => [31.0f32, 45.0],
    ///     "income" => [52_000.0f32, 71_500.0],
    ///     "city" => ["Berlin", "Oslo"],
    /// ).unwrap();
    /// let model = Model::load("model.cbm").unwrap();
    /// let predictions = model.predict_dataframe(&df, &["age", "income"], &["city"]).unwrap();
    /// ```
    pub fn predict_dataframe(
        &self,
        df: &DataFrame,
        float_columns: &[&str],
        cat_columns: &[&str],
    ) -> CatBoostResult<Vec<f64>> {
        let batch = FeatureBatch::from_dataframe(df, float_columns, cat_columns)?;
        self.predict_batch(&batch.float_features, &batch.cat_features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dataframe_row_major() {
        let df = df!(
            "a" => [Some(1.0f32), None],
            "b" => [3i32, 4],
            "city" => [Some("Berlin"), None],
        )
        .unwrap();

        let batch = FeatureBatch::from_dataframe(&df, &["a", "b"], &["city"]).unwrap();
        assert_eq!(batch.sample_count(), 2);
        assert_eq!(batch.float_features[0], vec![1.0, 3.0]);
        assert!(batch.float_features[1][0].is_nan());
        assert_eq!(batch.float_features[1][1], 4.0);
        assert_eq!(batch.cat_features, vec![vec!["Berlin".to_string()], vec![String::new()]]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let df = df!("a" => [1.0f32]).unwrap();
        assert!(FeatureBatch::from_dataframe(&df, &["missing"], &[]).is_err());
    }
}
