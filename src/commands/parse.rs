use clap::Args;
use std::path::PathBuf;
use tree_sitter_hades::parser::{parse_source, HadesParser};
use tree_sitter_hades::sources::discover_sources;

#[derive(Args)]
pub struct ParseArgs {
    /// Source file or directory to parse
    pub path: String,
    /// Additional directory names to exclude
    #[arg(long, num_args = 1..)]
    pub exclude: Vec<String>,
    /// Only report syntax errors
    #[arg(long, short)]
    pub quiet: bool,
}

pub fn run(args: ParseArgs) {
    let path = args.path;
    let root = PathBuf::from(&path);
    if !root.exists() {
        eprintln!("Error: cannot resolve path '{}'", path);
        std::process::exit(1);
    }

    let files = discover_sources(&root, &args.exclude);
    if files.is_empty() {
        eprintln!("No .hd files found under {}", root.display());
        std::process::exit(1);
    }

    let mut parser = match HadesParser::new() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut failed = 0;
    for file in &files {
        let source = match std::fs::read_to_string(file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error: cannot read {}: {}", file.display(), e);
                failed += 1;
                continue;
            }
        };
        let parsed = match parse_source(&mut parser, file, source) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error: {e:#}");
                failed += 1;
                continue;
            }
        };

        if !args.quiet {
            println!("{}", parsed.tree.root_node().to_sexp());
        }
        for err in &parsed.errors {
            eprintln!("{}:{}:{}: {}", file.display(), err.line, err.column, err.message());
        }
        if !parsed.errors.is_empty() {
            failed += 1;
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} file(s) failed to parse cleanly", files.len());
        std::process::exit(1);
    }
}
