use clap::Args;
use std::path::PathBuf;
use tree_sitter_hades::highlight::highlights;
use tree_sitter_hades::parser::parse_file;

#[derive(Args)]
pub struct HighlightArgs {
    /// Hades source file
    pub file: String,
}

pub fn run(args: HighlightArgs) {
    let parsed = match parse_file(&PathBuf::from(&args.file)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let spans = match highlights(&parsed.tree, parsed.source.as_bytes()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };
    for span in spans {
        println!("{:>4} {:<24} {}", span.line, span.capture, span.text);
    }
}
