/// Simple example demonstrating how to use the clip_insight library

use anyhow::Result;
use clip_insight::{analyze_text, classify, run};

fn main() -> Result<()> {
    let samples = [
        r#"{"name": "clip", "tags": ["a", "b"]}"#,
        "name,age\nann,30\nbob,41",
        "4 8 15 16 23 42",
        "https://a.io/x https://b.io https://a.io/y",
        "milk\neggs\nbread\nbutter",
    ];

    for text in samples {
        println!("\n{} -> {}", text.replace('\n', "\\n"), classify(text));

        // Summarize whatever was detected
        let result = run(text, "analyze");
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    // Transform instead of summarizing
    let sorted = run("pear\napple\nfig\nplum", "sort");
    if let Some(serde_json::Value::String(lines)) = &sorted.processed_data {
        println!("\nSorted list:\n{}", lines);
    }

    let report = analyze_text("The quick brown fox jumps over the lazy dog. It was not amused!");
    println!(
        "\nReading time: {} min, complexity: {:?}",
        report.reading_stats.reading_time_minutes, report.reading_stats.complexity_level
    );

    Ok(())
}
