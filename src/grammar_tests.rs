/// tree-sitter 语法加载验证
/// 验证 Hades 语法可以正常加载，且节点表与 grammar.json 一致
#[cfg(test)]
mod grammar_tests {
    use crate::loader::{load_language, verify_grammar_loadable};
    use crate::{language, GRAMMAR_JSON, LANGUAGE};
    use tree_sitter::{Language, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};

    fn lang_hades() -> Language {
        LANGUAGE.into()
    }

    #[test]
    fn test_can_load_grammar() {
        if let Err(e) = verify_grammar_loadable() {
            panic!("{e}");
        }
    }

    #[test]
    fn test_hades_grammar_loads() {
        let lang = lang_hades();
        assert!(lang.node_kind_count() > 0);
    }

    #[test]
    fn test_abi_version_supported() {
        let version = language().abi_version();
        assert!(version >= MIN_COMPATIBLE_LANGUAGE_VERSION);
        assert!(version <= LANGUAGE_VERSION);
    }

    #[test]
    fn test_repeated_loads_agree() {
        let a = load_language(LANGUAGE).unwrap();
        let b = load_language(LANGUAGE).unwrap();
        assert_eq!(a.node_kind_count(), b.node_kind_count());
        assert_eq!(a.abi_version(), b.abi_version());
    }

    #[test]
    fn test_every_visible_rule_has_a_node_kind() {
        let grammar: serde_json::Value = serde_json::from_str(GRAMMAR_JSON).unwrap();
        let lang = lang_hades();
        for rule in grammar["rules"].as_object().unwrap().keys() {
            if rule.starts_with('_') {
                continue;
            }
            assert_ne!(lang.id_for_node_kind(rule, true), 0, "no node kind for rule '{rule}'");
        }
    }

    #[test]
    fn test_keywords_are_anonymous_kinds() {
        let lang = lang_hades();
        for keyword in ["fn", "let", "return", "bool", "int"] {
            let id = lang.id_for_node_kind(keyword, false);
            assert_ne!(id, 0, "missing keyword '{keyword}'");
            assert!(!lang.node_kind_is_named(id));
        }
    }

    #[test]
    fn test_parse_simple_hades() {
        let lang = lang_hades();
        let mut parser = tree_sitter::Parser::new();
        parser.set_language(&lang).expect("Failed to set Hades language");
        let tree = parser.parse("let x = 42;", None);
        assert!(tree.is_some());
        assert!(!tree.unwrap().root_node().has_error());
    }
}
