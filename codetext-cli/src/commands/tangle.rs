//! Tangle command implementation.

use std::path::PathBuf;

use codetext::errors::Result;
use codetext::interface::{tangle_document, write_tangled, Context, Document};

/// Options for the tangle command.
#[derive(Debug, Clone, Default)]
pub struct TangleOptions {
    /// Document to tangle.
    pub file: PathBuf,
    /// Output directory, overriding the configured one.
    pub output: Option<PathBuf>,
    /// Dry run - list the files without writing them.
    pub dry_run: bool,
}

/// Executes the tangle command.
pub fn tangle(ctx: &mut Context, options: TangleOptions) -> Result<()> {
    tracing::info!("Tangling {}...", options.file.display());

    if let Some(output) = options.output {
        ctx.config.output_dir = Some(output);
    }

    let doc = Document::load(&options.file, ctx)?;
    let tangled = tangle_document(ctx, &doc)?;

    if tangled.files().is_empty() {
        println!("No files to tangle.");
        return Ok(());
    }

    let paths = write_tangled(ctx, &doc, &tangled, options.dry_run)?;
    for path in paths {
        if options.dry_run {
            println!("would write {}", path.display());
        } else {
            println!("{}", path.display());
        }
    }

    Ok(())
}
