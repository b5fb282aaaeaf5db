//! Show or initialise the measurement defaults file.

use super::common::load_defaults;
use clap::Args;
use dualsig_config::{Defaults, defaults_path, find_defaults};
use std::path::Path;

#[derive(Args)]
pub struct DefaultsArgs {
    /// Write the built-in defaults to the defaults file
    #[arg(long)]
    init: bool,

    /// Overwrite an existing file with --init
    #[arg(long, requires = "init")]
    force: bool,
}

pub fn run(args: DefaultsArgs, config: Option<&Path>) -> anyhow::Result<()> {
    if args.init {
        let path = config.map_or_else(defaults_path, Path::to_path_buf);
        if path.exists() && !args.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        Defaults::default().save(&path)?;
        println!("Wrote defaults to {}", path.display());
        return Ok(());
    }

    let defaults = load_defaults(config)?;
    let source = config
        .map(Path::to_path_buf)
        .or_else(find_defaults)
        .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());

    println!("# Source: {source}");
    print!("{}", defaults.to_toml()?);
    Ok(())
}
