use std::io::{self, Write as _};

use anyhow::Context;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ListPiecesArg {}

pub fn run(arg: &ListPiecesArg) -> anyhow::Result<()> {
    let ListPiecesArg {} = arg;

    let mut catalog = String::new();
    blockfill_engine::write_catalog(&mut catalog).context("Failed to render piece catalog")?;
    io::stdout()
        .lock()
        .write_all(catalog.as_bytes())
        .context("Failed to write piece catalog to stdout")?;
    Ok(())
}
