use catboost_rust::Model;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load a trained CatBoost model
    // Note: You'll need a trained model file to run this example
    let model_path = "model.cbm";

    println!("Loading model from: {}", model_path);
    let model = Model::load(model_path)?;

    println!("Model loaded successfully!");
    println!("Number of float features: {}", model.float_features_count());
    println!("Number of categorical features: {}", model.cat_features_count());

    // Example: Predict for a single sample with 3 float features and 1 categorical feature
    let floats = [1.0f32, 2.0, 3.0];
    let cats = ["red"];

    println!("\nMaking prediction for {:?} / {:?}", floats, cats);
    let raw = model.predict_single(&floats, &cats)?;
    println!("Raw margin: {}", raw);

    // Example: Predict for multiple samples (batch prediction)
    let batch_floats = vec![
        vec![1.0f32, 2.0, 3.0], // Sample 1
        vec![2.0, 3.0, 4.0],    // Sample 2
        vec![3.0, 4.0, 5.0],    // Sample 3
    ];
    let batch_cats = vec![vec!["red"], vec!["green"], vec!["blue"]];

    println!("\nMaking batch prediction...");
    let batch_predictions = model.predict_batch(&batch_floats, &batch_cats)?;

    println!("Batch predictions: {:?}", batch_predictions);

    Ok(())
}
