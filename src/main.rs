use std::path::PathBuf;

use clap::Parser;

mod build;

use build::{ConvertOptions, Converter, Rule};

const DEFAULT_FOOTER: &str = "Copyright © the documentation authors";

/// Convert a folder of .rst documents into static HTML pages.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The path to the directory containing .rst files
    source_folder: PathBuf,

    /// The directory where converted files are placed (defaults to the source folder)
    #[arg(long = "output_folder")]
    output_folder: Option<PathBuf>,

    /// A pattern/replacement pair applied to documents before parsing;
    /// patterns are regular expressions (repeatable)
    #[arg(long = "replace", num_args = 2, value_names = ["OLD", "NEW"], action = clap::ArgAction::Append)]
    replace: Vec<String>,

    /// Path to the CSS stylesheet linked from every page
    #[arg(long, default_value = "style.css")]
    css: String,

    /// Path to a JavaScript file included at the end of every page
    #[arg(long)]
    js: Option<String>,

    /// Match substitution patterns case-insensitively
    #[arg(long = "ie")]
    ignore_case: bool,

    /// Footer text for every page; pass an empty string to disable the footer
    #[arg(long, default_value = DEFAULT_FOOTER)]
    footer: String,

    /// Link prefix for toctree entries
    #[arg(long = "link-prefix", default_value = "./")]
    link_prefix: String,
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    // --replace OLD NEW pairs arrive flattened.
    let rules = args
        .replace
        .chunks(2)
        .map(|pair| Rule {
            pattern: pair[0].clone(),
            replacement: pair[1].clone(),
        })
        .collect();

    let converter = Converter::new(ConvertOptions {
        source_folder: args.source_folder,
        output_folder: args.output_folder,
        rules,
        case_insensitive: args.ignore_case,
        css_path: args.css,
        js_path: args.js.filter(|p| !p.is_empty()),
        footer: Some(args.footer).filter(|f| !f.is_empty()),
        link_prefix: args.link_prefix,
    });

    let result = converter.convert()?;

    println!(
        "Converted {} document(s) to {}",
        result.documents,
        result.output_dir.display()
    );

    Ok(())
}
