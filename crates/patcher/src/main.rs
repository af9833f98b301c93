//! `mesh-cli-patch`: applies the MeshCore parity enhancements to `mesh_cli.py`.

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use meshcore_cli_patcher::{PatchError, PatchReport, patch_file, pending_patches};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mesh-cli-patch",
    version,
    about = "Patch pyMC_Repeater's mesh_cli.py with MeshCore CommonCLI parity features"
)]
struct Cli {
    /// Path to mesh_cli.py.
    path: PathBuf,

    /// Report pending patches without writing (exit 1 if any). For CI.
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("meshcore_cli_patcher=warn"),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();
    let path = cli.path.display();

    if cli.check {
        let pending = exit_if_missing(pending_patches(&cli.path))?;
        if pending.is_empty() {
            println!("○ No changes needed for {path}");
        } else {
            println!("✗ {path} needs patching");
            println!("  Pending: {}", pending.join(", "));
            process::exit(1);
        }
        return Ok(());
    }

    match exit_if_missing(patch_file(&cli.path))? {
        PatchReport::Patched { applied } => {
            println!("✓ Patched {path}");
            println!("  Applied: {}", applied.join(", "));
        }
        PatchReport::Unchanged => println!("○ No changes needed for {path}"),
    }
    Ok(())
}

/// A missing target is reported on stdout with exit status 1; other errors
/// propagate.
fn exit_if_missing<T>(result: Result<T, PatchError>) -> Result<T> {
    match result {
        Err(err @ PatchError::NotFound { .. }) => {
            println!("Error: {err}");
            process::exit(1);
        }
        other => Ok(other?),
    }
}
