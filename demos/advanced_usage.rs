use catboost_rust::{Model, PredictionKind};
use std::fs;
use std::sync::Arc;
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load a trained CatBoost model from memory
    let model_path = "model.cbm";

    println!("Loading model from: {}", model_path);
    let model = Model::load_from_buffer(&fs::read(model_path)?)?;

    println!("Model Information:");
    println!("  Float features: {}", model.float_features_count());
    println!("  Categorical features: {}", model.cat_features_count());
    println!("  Trees: {}", model.tree_count());
    println!("  Dimensions: {}", model.dimensions_count());

    let floats = vec![vec![1.0f32, 2.0, 3.0], vec![2.0, 3.0, 4.0]];
    let cats = vec![vec!["red"], vec!["blue"]];

    println!("\n--- Raw Prediction ---");
    let raw = model.predict_batch(&floats, &cats)?;
    println!("Raw margins: {:?}", raw);

    println!("\n--- Probability Prediction ---");
    let proba = model.predict_batch_proba(&floats, &cats)?;
    println!("Probabilities: {:?}", proba);

    println!("\n--- Selected Kind ---");
    let kind: PredictionKind = "probability".parse()?;
    let selected = model.predict_batch_as(kind, &floats, &cats)?;
    println!("{} predictions: {:?}", kind, selected);

    println!("\n--- Shared Across Threads ---");
    // Calls are serialized inside the binding, so sharing needs no extra lock
    let model = Arc::new(model);
    let handles: Vec<_> = (0..2)
        .map(|i| {
            let model = Arc::clone(&model);
            thread::spawn(move || model.predict_single_proba(&[i as f32, 0.5, 1.5], &["green"]))
        })
        .collect();
    for handle in handles {
        println!("Thread prediction: {:?}", handle.join().expect("thread panicked")?);
    }

    println!("\n--- Empty Input ---");
    let empty: Vec<Vec<f32>> = Vec::new();
    let no_cats: Vec<Vec<String>> = Vec::new();
    match model.predict_batch(&empty, &no_cats) {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Rejected as expected: {}", e),
    }

    Ok(())
}
