//! tome status - Show catalog status

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{emit_human, HumanLayout};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct StatusArgs {}

pub fn run(ctx: &AppContext, _args: &StatusArgs) -> Result<()> {
    let db = ctx.open_db()?;
    let count = db.count()?;

    let mut layout = HumanLayout::new();
    layout
        .title("tome catalog")
        .kv("database", &ctx.db_path().display().to_string())
        .kv("books", &count.to_string())
        .kv("data dir", &ctx.config.data.data_dir)
        .kv("output path", &ctx.config.data.output_path);
    emit_human(layout);
    Ok(())
}
