//! Example: run a computation over a document file and write it back.
//!
//! This example shows:
//! - Writing a `<model> IO.json` document with `FileDocument`
//! - Running a closure-backed computation over it with `run_document`
//! - Reading the populated outputs back, plain and gzip-compressed
//!
//! Run with: `cargo run --example run_document`

use anyhow::Result;
use paramio::testing::DocumentBuilder;
use paramio::{
    Adapter, DocumentConfig, DocumentHandle, ParameterDocument, computation, document_path,
    run_document,
};

fn sample() -> ParameterDocument {
    DocumentBuilder::new()
        .extra("cardName", serde_json::json!("Auto"))
        .vectorized("a", [5, 10, 15])
        .vectorized("b", [1, 2, 3])
        .output("sum")
        .output("difference")
        .build()
}

fn show(label: &str, doc: &ParameterDocument) {
    println!("{label}:");
    for output in &doc.output_params {
        let values: Vec<String> = output.values.iter().map(ToString::to_string).collect();
        println!("  {} = [{}]", output.name, values.join(", "));
    }
}

fn main() -> Result<()> {
    let dir = tempfile::tempdir()?;
    println!("Working in {}\n", dir.path().display());

    let add_sub = computation(["a", "b"], |args| {
        let (a, b) = (args.integer("a")?, args.integer("b")?);
        Ok((a + b, a - b))
    });

    // Plain JSON next to the model
    let plain = DocumentConfig::default()
        .with_directory(dir.path())
        .with_pretty(true)
        .handle_for("Auto");
    plain.store(&sample())?;
    let report = run_document(&plain, &add_sub, &Adapter::default())?;
    report.print();
    show(
        &document_path(dir.path(), "Auto").display().to_string(),
        &plain.load()?,
    );

    // Same document, gzip-compressed
    #[cfg(feature = "compression-gzip")]
    {
        let gz = DocumentConfig::default()
            .with_directory(dir.path())
            .with_suffix(" IO.json.gz")
            .handle_for("Auto");
        gz.store(&sample())?;
        run_document(&gz, &add_sub, &Adapter::default())?;
        println!();
        show(&gz.describe(), &gz.load()?);
    }

    println!("\nDocument text:\n{}", std::fs::read_to_string(plain.path())?);
    Ok(())
}
