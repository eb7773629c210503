//! Validate command implementation

use anyhow::Result;

use super::SourceArgs;

pub fn run(source: &SourceArgs) -> Result<()> {
    let config = source.load()?;
    let optimizer = &config.compiler().optimizer;

    println!("Configuration OK: {} profile(s)", config.len());
    println!("Profiles: {}", config.profile_names().collect::<Vec<_>>().join(", "));
    match config.compiler().effective_runs() {
        Some(runs) => println!("Optimizer: enabled ({runs} runs)"),
        None => println!("Optimizer: disabled (runs = {})", optimizer.runs),
    }
    println!("Fingerprint: {}", config.fingerprint());
    Ok(())
}
