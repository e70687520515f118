use clap::Args;
use std::path::PathBuf;
use tree_sitter_hades::outline::outline;
use tree_sitter_hades::parser::parse_file;

#[derive(Args)]
pub struct OutlineArgs {
    /// Hades source file
    pub file: String,
    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: OutlineArgs) {
    let parsed = match parse_file(&PathBuf::from(&args.file)) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };
    for err in &parsed.errors {
        eprintln!("Warning: {}:{}:{}: {}", args.file, err.line, err.column, err.message());
    }

    let result = outline(&parsed.tree, parsed.source.as_bytes());
    let json = if args.pretty {
        serde_json::to_string_pretty(&result)
    } else {
        serde_json::to_string(&result)
    };
    match json {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Error: cannot serialize outline: {e}");
            std::process::exit(1);
        }
    }
}
