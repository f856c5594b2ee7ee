use std::path::Path;

use anyhow::{Result, bail};
use mailvet_lib::{BatchResult, Verdict};

pub fn print_batch(result: &BatchResult, learned: usize, out: &Path, format: &str) -> Result<()> {
    match format {
        "human" => {
            print!("{}", result.summary());
            println!("learned domains: {learned}");
            println!("output: {}", out.display());
            Ok(())
        }
        "json" => write_batch_json(result, learned, out),
        other => bail!("unknown --format '{other}', use: human|json"),
    }
}

pub fn print_verdict(email: &str, verdict: &Verdict, format: &str) -> Result<()> {
    match format {
        "human" => {
            let code = verdict.status.code();
            match verdict.suggestion.as_deref() {
                Some(s) => println!("[{code}] {email} :: {} (suggestion: {s})", verdict.status),
                None => println!("[{code}] {email} :: {}", verdict.status),
            }
            Ok(())
        }
        "json" => write_verdict_json(email, verdict),
        other => bail!("unknown --format '{other}', use: human|json"),
    }
}

#[cfg(feature = "with-serde")]
fn write_batch_json(result: &BatchResult, learned: usize, out: &Path) -> Result<()> {
    let payload = serde_json::json!({
        "summary": result.summary(),
        "learned_domains": learned,
        "output": out.display().to_string(),
        "rows": result.rows,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_batch_json(_: &BatchResult, _: usize, _: &Path) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}

#[cfg(feature = "with-serde")]
fn write_verdict_json(email: &str, verdict: &Verdict) -> Result<()> {
    let payload = serde_json::json!({
        "email": email,
        "status_code": verdict.status.code(),
        "status_label": verdict.status.label(),
        "suggestion": verdict.suggestion,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn write_verdict_json(_: &str, _: &Verdict) -> Result<()> {
    bail!("format=json nécessite la feature 'with-serde'")
}
