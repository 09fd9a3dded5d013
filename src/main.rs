use anyhow::{Context, Result};
use rawify::Config;
use std::fs;
use std::io::Write;

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;

    let target = rawify::resolve_target(&config, ".")?;

    let content = fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))?;

    let result = rawify::rewrite(&content, target.identity(), target.branch());

    if config.verbose {
        eprintln!("Repository: {}", target.identity());
        eprintln!("Branch: {}", target.branch());
        eprintln!("Rewritten image references: {}", result.rewritten());
    }

    match &config.output {
        Some(output) => {
            fs::write(output, result.text())
                .with_context(|| format!("Failed to write {}", output.display()))?;
            eprintln!("Transformed README written to: {}", output.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", result.text()).context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
