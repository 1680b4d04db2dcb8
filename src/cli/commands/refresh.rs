//! tome refresh - Download the dumps and rebuild the catalog

use clap::Args;

use crate::app::AppContext;
use crate::error::Result;
use crate::ingest;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub fn run(ctx: &AppContext, _args: &RefreshArgs) -> Result<()> {
    let mut db = ctx.open_db()?;
    let loaded = ingest::refresh(&mut db, &ctx.config)?;
    println!("{loaded} books loaded into {}", ctx.db_path().display());
    Ok(())
}
