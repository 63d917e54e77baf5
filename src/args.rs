use std::path::PathBuf;

use clap::Parser;
use dom::DocumentConfig;

/// Build a node tree from a JSON description and print it.
///
/// A node is a string, a number, an array (its items in order) or an object
/// `{"tag": "div", "attrs": {..}, "children": [..]}`. An `attrs.link` entry
/// registers the node under that name.
#[derive(Debug, Parser)]
#[command(name = "domkit", version)]
pub struct Args {
    /// JSON tree file; reads stdin when omitted
    pub file: Option<PathBuf>,

    /// Print HTML instead of an outline
    #[arg(long)]
    pub html: bool,

    /// Maximum outline lines
    #[arg(long, default_value_t = 200)]
    pub outline_cap: usize,

    /// Reject element names outside the HTML element table
    #[arg(long)]
    pub known_tags_only: bool,

    /// Keep element names as written instead of lower-casing them
    #[arg(long)]
    pub keep_tag_case: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    pub fn document_config(&self) -> DocumentConfig {
        DocumentConfig {
            lowercase_tag_names: !self.keep_tag_case,
            known_tags_only: self.known_tags_only,
        }
    }
}
