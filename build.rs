use std::path::PathBuf;

fn main() {
    let grammar_path = PathBuf::from("grammar").join("grammar.json");
    println!("cargo:rerun-if-changed={}", grammar_path.display());

    let grammar_json = std::fs::read_to_string(&grammar_path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", grammar_path.display()));

    let [major, minor, patch] = ["MAJOR", "MINOR", "PATCH"].map(|part| {
        std::env::var(format!("CARGO_PKG_VERSION_{part}"))
            .ok()
            .and_then(|v| v.parse::<u8>().ok())
            .unwrap_or(0)
    });

    // 由 grammar.json 生成 LR 解析表（parser.c）
    let (name, c_code) =
        tree_sitter_generate::generate_parser_for_grammar(&grammar_json, Some((major, minor, patch)))
        .unwrap_or_else(|e| panic!("failed to generate parser from {}: {e}", grammar_path.display()));
    assert_eq!(name, "hades", "grammar.json must declare the hades grammar");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let header_dir = out_dir.join("tree_sitter");
    std::fs::create_dir_all(&header_dir).expect("create tree_sitter header dir");
    std::fs::write(header_dir.join("parser.h"), tree_sitter::PARSER_HEADER)
        .expect("write parser.h");

    let parser_path = out_dir.join("parser.c");
    std::fs::write(&parser_path, c_code).expect("write parser.c");

    let mut c_config = cc::Build::new();
    c_config
        .std("c11")
        .include(&out_dir)
        .flag_if_supported("-Wno-unused-parameter")
        .flag_if_supported("-Wno-unused-but-set-variable")
        .flag_if_supported("-Wno-trigraphs");
    if std::env::var("CARGO_CFG_TARGET_ENV").as_deref() == Ok("msvc") {
        c_config.flag("-utf-8");
    }
    c_config.file(&parser_path);
    c_config.compile("tree-sitter-hades");
}
