//! Example: loading fitted artifacts and predicting sentiment
//!
//! This example shows how to:
//! 1. Point the predictor at the two artifact files
//! 2. Run the one-time load
//! 3. Classify a few tweets
//!
//! Run with: cargo run --example predict
//!
//! Real deployments ship trainer-exported artifacts; this demo writes
//! a tiny fitted pair into a temp directory so it runs standalone.

use std::collections::HashMap;

use tweetsense_core::ArtifactKind;
use tweetsense_pipeline::artifact::wrap_payload;
use tweetsense_pipeline::vectorizer::TermEntry;
use tweetsense_pipeline::{ClassifierPayload, Predictor, PredictorConfig, VectorizerPayload};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("TweetSense Prediction Example\n");

    // 1. Write a small fitted artifact pair (vocabulary keyed by stems)
    let dir = tempfile::tempdir()?;
    let vectorizer = VectorizerPayload {
        vocabulary: HashMap::from([
            ("love".to_string(), TermEntry { index: 0, idf: 1.0 }),
            ("great".to_string(), TermEntry { index: 1, idf: 1.2 }),
            ("hate".to_string(), TermEntry { index: 2, idf: 1.1 }),
            ("terribl".to_string(), TermEntry { index: 3, idf: 1.3 }),
        ]),
    };
    let classifier = ClassifierPayload {
        weights: vec![2.1, 1.8, -2.4, -2.0],
        intercept: 0.0,
        threshold: 0.5,
    };

    let config = PredictorConfig::default().with_artifact_dir(dir.path());
    std::fs::write(
        &config.vectorizer_path,
        serde_json::to_vec_pretty(&wrap_payload(ArtifactKind::Vectorizer, &vectorizer))?,
    )?;
    std::fs::write(
        &config.classifier_path,
        serde_json::to_vec_pretty(&wrap_payload(ArtifactKind::Classifier, &classifier))?,
    )?;

    // 2. One-time load; any failure here is fatal and classified
    let predictor = Predictor::load(config)?;
    println!("Artifacts loaded (max input length: {})\n", predictor.max_text_length());

    // 3. Classify
    let tweets = [
        "I absolutely loved it, what a great day!",
        "This is terrible. I hate waiting in lines.",
        "completely neutral words about gardening",
    ];
    for tweet in tweets {
        let prediction = predictor.predict_sentiment(tweet);
        println!(
            "{:>8}  {:.2}  {tweet}",
            prediction.label.to_string(),
            prediction.confidence
        );
    }

    Ok(())
}
