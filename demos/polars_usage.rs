use catboost_rust::Model;
use polars::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let model = Model::load("model.cbm")?;

    let df = df!(
        "f0" => [1.0f32, 2.0, 3.0],
        "f1" => [2.0f32, 3.0, 4.0],
        "f2" => [3.0f32, 4.0, 5.0],
        "color" => ["red", "green", "blue"],
    )?;
    println!("{}", df);

    let predictions = model.predict_dataframe(&df, &["f0", "f1", "f2"], &["color"])?;
    println!("Predictions: {:?}", predictions);

    Ok(())
}
