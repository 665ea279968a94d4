//! Décode une réponse SOAP enregistrée et affiche son diagnostic
//!
//! ```text
//! RUST_LOG=debug cargo run -p ihesoap --example decode_response -- iti43 response.xml
//! ```

use std::env;
use std::fs;

use anyhow::{Context, Result, anyhow};
use ihesoap::{ResponseEnvelope, SoapBody, SoapFault, Transaction};

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage:\n  {0} <iti18|iti43> <response.xml>", args[0]);
        std::process::exit(1);
    }

    let transaction = match args[1].as_str() {
        "iti18" => Transaction::RegistryStoredQuery,
        "iti43" => Transaction::RetrieveDocumentSet,
        other => return Err(anyhow!("Unknown transaction {other}")),
    };
    let xml = fs::read_to_string(&args[2]).with_context(|| format!("Cannot read {}", args[2]))?;

    if let Some(fault) = SoapFault::detect(&xml)? {
        println!("SOAP fault {}: {}", fault.code, fault.reason);
        return Ok(());
    }

    let envelope = ResponseEnvelope::from_xml(&xml, transaction.response_kind())?;
    println!("Transaction : {transaction}");
    println!("Body        : {}", envelope.body().kind());
    println!(
        "Action      : {}",
        envelope.header().and_then(|h| h.action()).unwrap_or("-")
    );
    println!("Attachments : {}", envelope.attachments().len());

    match envelope.body().error_from_fault() {
        Some(fault) => {
            println!("Status      : {} (failure)", fault.status);
            for error in &fault.errors {
                println!("  - {error}");
            }
        }
        None => println!("Status      : ok"),
    }

    for index in 0..envelope.document_count() {
        match envelope.document_bytes(index) {
            Some(bytes) => println!("Document {index:<3}: {} bytes", bytes.len()),
            None => println!("Document {index:<3}: missing"),
        }
    }

    Ok(())
}
