use clap::Args;
use tree_sitter_hades::loader::{grammar_info, load_language};
use tree_sitter_hades::LANGUAGE;

#[derive(Args)]
pub struct CheckArgs {
    /// Print the grammar summary as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: CheckArgs) {
    let language = match load_language(LANGUAGE) {
        Ok(l) => l,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    let info = grammar_info(&language);

    if args.json {
        match serde_json::to_string_pretty(&info) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: cannot serialize grammar info: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("Grammar: {}", info.name);
    println!("ABI version: {}", info.abi_version);
    println!("Node kinds: {} ({} named)", info.node_kind_count, info.named_kind_count);
    println!("Fields: {}", info.field_count);
    println!("Visible named kinds: {}", info.named_kinds.join(", "));
}
