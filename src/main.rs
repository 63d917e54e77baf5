//! domkit entry point.

mod args;
mod tree_file;

use std::io::{self, Read, Write};
use std::{fs, process, str::FromStr};

use clap::Parser;
use dom::snapshot::outline;
use dom::{Document, outer_html};
use log::{LevelFilter, debug, error, info};
use mimalloc::MiMalloc;

use crate::args::Args;
use crate::tree_file::{TreeError, build, node_path, parse};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() {
    let args = Args::parse();

    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();
    debug!("parsed arguments: {args:?}");

    if let Err(err) = run(&args) {
        error!("{err}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), TreeError> {
    let input = match &args.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let mut doc = Document::with_config(args.document_config());
    let (root, links) = build(&mut doc, parse(&input)?)?.into_parts();
    info!("built {} nodes, {} links", doc.len(), links.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.html {
        writeln!(out, "{}", outer_html(&doc, root))?;
    } else {
        for line in outline(&doc, root, args.outline_cap) {
            writeln!(out, "{line}")?;
        }
    }
    if !links.is_empty() {
        writeln!(out)?;
        for (name, key) in links.sorted() {
            let path = node_path(&doc, root, key).unwrap_or_else(|| key.to_string());
            writeln!(out, "{name} -> {path}")?;
        }
    }
    Ok(())
}
