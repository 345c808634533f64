//! Config subcommand handlers.

use crate::cli::ConfigInitArgs;
use anyhow::{bail, Result};

const EXAMPLE_CONFIG: &str = include_str!("../../clusterview.example.toml");

/// Write the annotated example configuration to disk.
pub fn handle_config_init(args: ConfigInitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }

    std::fs::write(&args.output, EXAMPLE_CONFIG)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
