//! Prediction tests against a real model.
//!
//! Uses `CATBOOST_TEST_MODEL` or `tests/fixtures/model.cbm`. These tests are
//! ignored by default; run them with `cargo test -- --ignored` once a model
//! fixture is in place.

use anyhow::{bail, Context, Result};
use approx::assert_abs_diff_eq;
use catboost_rust::{sigmoid, CatBoostError, FeatureBatch, Model, PredictionKind};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

fn fixture_model() -> Result<Model> {
    let path = std::env::var_os("CATBOOST_TEST_MODEL")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/model.cbm"));
    if !path.exists() {
        bail!(
            "Missing test fixture at {}. Place a trained model there or set CATBOOST_TEST_MODEL.",
            path.display()
        );
    }
    Model::load(&path).with_context(|| format!("Failed to load model fixture {}", path.display()))
}

/// Deterministic rows shaped for `model`.
fn sample_batch(model: &Model, rows: usize) -> FeatureBatch {
    let float_width = model.float_features_count();
    let cat_width = model.cat_features_count();
    let floats: Vec<Vec<f32>> = (0..rows)
        .map(|i| (0..float_width).map(|j| (i * float_width + j) as f32 * 0.25).collect())
        .collect();
    let cats: Vec<Vec<String>> = (0..rows)
        .map(|i| (0..cat_width).map(|j| ["red", "green", "blue"][(i + j) % 3].to_string()).collect())
        .collect();
    FeatureBatch::new(floats, cats)
}

#[test]
#[ignore = "needs tests/fixtures/model.cbm or CATBOOST_TEST_MODEL"]
fn batch_returns_one_value_per_sample() -> Result<()> {
    let model = fixture_model()?;

    let mut batch = sample_batch(&model, 4);
    let predictions = model.predict_batch(&batch.float_features, &batch.cat_features)?;
    assert_eq!(predictions.len(), 4);
    assert!(predictions.iter().all(|p| p.is_finite()));

    // The shorter input bounds the sample count
    batch.cat_features.truncate(2);
    let predictions = model.predict_batch(&batch.float_features, &batch.cat_features)?;
    assert_eq!(predictions.len(), batch.sample_count());
    Ok(())
}

#[test]
#[ignore = "needs tests/fixtures/model.cbm or CATBOOST_TEST_MODEL"]
fn proba_is_sigmoid_of_raw() -> Result<()> {
    let model = fixture_model()?;

    let batch = sample_batch(&model, 5);
    let raw = model.predict_batch(&batch.float_features, &batch.cat_features)?;
    let proba = model.predict_batch_proba(&batch.float_features, &batch.cat_features)?;
    assert_eq!(raw.len(), proba.len());
    for (r, p) in raw.iter().zip(proba.iter()) {
        assert_abs_diff_eq!(*p, sigmoid(*r), epsilon = 1e-12);
    }

    let selected =
        model.predict_batch_as(PredictionKind::Probability, &batch.float_features, &batch.cat_features)?;
    assert_eq!(selected, proba);
    let selected = model.predict_batch_as(PredictionKind::Raw, &batch.float_features, &batch.cat_features)?;
    assert_eq!(selected, raw);
    Ok(())
}

#[test]
#[ignore = "needs tests/fixtures/model.cbm or CATBOOST_TEST_MODEL"]
fn single_matches_batch() -> Result<()> {
    let model = fixture_model()?;

    let batch = sample_batch(&model, 3);
    let predictions = model.predict_batch(&batch.float_features, &batch.cat_features)?;
    for (i, expected) in predictions.iter().enumerate() {
        let single = model.predict_single(&batch.float_features[i], &batch.cat_features[i])?;
        assert_abs_diff_eq!(single, *expected, epsilon = 1e-9);

        let proba = model.predict_single_proba(&batch.float_features[i], &batch.cat_features[i])?;
        assert_abs_diff_eq!(proba, sigmoid(*expected), epsilon = 1e-9);
    }
    Ok(())
}

#[test]
#[ignore = "needs tests/fixtures/model.cbm or CATBOOST_TEST_MODEL"]
fn empty_inputs_are_rejected() -> Result<()> {
    let model = fixture_model()?;

    let no_floats: Vec<Vec<f32>> = Vec::new();
    let no_cats: Vec<Vec<String>> = Vec::new();
    let err = model.predict_batch(&no_floats, &no_cats).unwrap_err();
    assert!(matches!(err, CatBoostError::EmptySamples));

    let err = model.predict_batch(&[Vec::<f32>::new()], &[Vec::<String>::new()]).unwrap_err();
    assert!(matches!(err, CatBoostError::EmptySamples));

    let err = model.predict_batch_proba(&no_floats, &no_cats).unwrap_err();
    assert!(matches!(err, CatBoostError::EmptySamples));

    let err = model.predict_single::<&str>(&[], &[]).unwrap_err();
    assert!(matches!(err, CatBoostError::EmptySample));
    let err = model.predict_single_proba::<&str>(&[], &[]).unwrap_err();
    assert!(matches!(err, CatBoostError::EmptySample));
    Ok(())
}

#[test]
#[ignore = "needs tests/fixtures/model.cbm or CATBOOST_TEST_MODEL"]
fn three_floats_one_category_scenario() -> Result<()> {
    let model = fixture_model()?;
    if model.float_features_count() != 3 || model.cat_features_count() != 1 {
        bail!(
            "fixture has {} float / {} categorical features, expected 3 / 1",
            model.float_features_count(),
            model.cat_features_count()
        );
    }

    let floats = vec![vec![1.0f32, 2.0, 3.0]];
    let cats = vec![vec!["red"]];
    let raw = model.predict_batch(&floats, &cats)?;
    assert_eq!(raw.len(), 1);

    let proba = model.predict_batch_proba(&floats, &cats)?;
    assert_abs_diff_eq!(proba[0], sigmoid(raw[0]), epsilon = 1e-12);
    Ok(())
}

#[test]
#[ignore = "needs tests/fixtures/model.cbm or CATBOOST_TEST_MODEL"]
fn shared_model_gives_consistent_results_across_threads() -> Result<()> {
    let model = fixture_model()?;

    let batch = Arc::new(sample_batch(&model, 8));
    let expected = model.predict_batch(&batch.float_features, &batch.cat_features)?;
    let model = Arc::new(model);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let model = Arc::clone(&model);
            let batch = Arc::clone(&batch);
            thread::spawn(move || model.predict_batch(&batch.float_features, &batch.cat_features))
        })
        .collect();

    for handle in handles {
        let got = handle.join().expect("prediction thread panicked")?;
        assert_eq!(got, expected);
    }
    Ok(())
}

#[test]
#[ignore = "needs tests/fixtures/model.cbm or CATBOOST_TEST_MODEL"]
fn close_releases_model() -> Result<()> {
    let model = fixture_model()?;
    assert!(model.tree_count() > 0);
    assert!(model.dimensions_count() >= 1);
    model.close();
    Ok(())
}
