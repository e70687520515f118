use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hades-grammar", about = "Tree-sitter grammar tools for Hades", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify that the compiled grammar loads into the tree-sitter runtime
    Check(commands::check::CheckArgs),
    /// Parse Hades sources and report syntax errors
    Parse(commands::parse::ParseArgs),
    /// Print functions, variables, calls and returns as JSON
    Outline(commands::outline::OutlineArgs),
    /// Print highlight captures for a source file
    Highlight(commands::highlight::HighlightArgs),
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => commands::check::run(args),
        Commands::Parse(args) => commands::parse::run(args),
        Commands::Outline(args) => commands::outline::run(args),
        Commands::Highlight(args) => commands::highlight::run(args),
    }
}
