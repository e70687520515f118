use serde::Serialize;
use tree_sitter::{Node, Tree};

// ---------------------------------------------------------------------------
// 公共数据结构
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FunctionInfo {
    pub name: String,
    #[serde(rename = "returnType")]
    pub return_type: String,
    #[serde(rename = "startLine")]
    pub start_line: usize,
    #[serde(rename = "endLine")]
    pub end_line: usize,
    pub statements: usize,
    pub calls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableInfo {
    pub name: String,
    #[serde(rename = "valueKind")]
    pub value_kind: String, // "identifier", "call", "number", "string"
    pub value: String,
    pub line: usize,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallInfo {
    pub callee: String,
    pub args: Vec<String>,
    pub line: usize,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReturnInfo {
    #[serde(rename = "valueKind")]
    pub value_kind: String, // "identifier", "number", "string", "unary", "binary"
    pub operator: Option<String>,
    pub line: usize,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Outline {
    pub functions: Vec<FunctionInfo>,
    pub variables: Vec<VariableInfo>,
    pub calls: Vec<CallInfo>,
    pub returns: Vec<ReturnInfo>,
}

impl Outline {
    pub fn function(&self, name: &str) -> Option<&FunctionInfo> {
        self.functions.iter().find(|f| f.name == name)
    }
}

// ---------------------------------------------------------------------------
// 提取
// ---------------------------------------------------------------------------

/// 按源码顺序提取函数、变量、调用和返回语句；ERROR 子树被跳过
pub fn outline(tree: &Tree, source: &[u8]) -> Outline {
    let mut out = Outline::default();
    walk_nodes(tree.root_node(), &mut |node| match node.kind() {
        "function_definition" => {
            if let Some(f) = extract_function(node, source) {
                out.functions.push(f);
            }
        }
        "var_decl" => {
            if let Some(v) = extract_variable(node, source) {
                out.variables.push(v);
            }
        }
        "function_call" => {
            if let Some(c) = extract_call(node, source) {
                out.calls.push(c);
            }
        }
        "return_statement" => {
            if let Some(r) = extract_return(node, source) {
                out.returns.push(r);
            }
        }
        _ => {}
    });
    out
}

fn extract_function(node: Node, source: &[u8]) -> Option<FunctionInfo> {
    let name = find_child_of_type(node, "identifier")?;
    let mut cursor = node.walk();
    let return_type = node
        .children(&mut cursor)
        .find(|c| !c.is_named() && matches!(c.kind(), "int" | "bool"))
        .map(|c| c.kind().to_string())?;

    let block = find_child_of_type(node, "block");
    let statements = block.map(|b| b.named_child_count()).unwrap_or(0);
    let mut calls = Vec::new();
    if let Some(b) = block {
        walk_nodes(b, &mut |n| {
            if n.kind() == "function_call" {
                if let Some(callee) = find_child_of_type(n, "identifier") {
                    calls.push(node_text(callee, source).to_string());
                }
            }
        });
    }

    Some(FunctionInfo {
        name: node_text(name, source).to_string(),
        return_type,
        start_line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
        statements,
        calls,
    })
}

fn extract_variable(node: Node, source: &[u8]) -> Option<VariableInfo> {
    let mut cursor = node.walk();
    let mut named = node.named_children(&mut cursor);
    let name = named.next()?;
    let value = named.next()?;
    let (value_kind, value_text) = match value.kind() {
        "identifier" => ("identifier", node_text(value, source).to_string()),
        "function_call" => {
            let callee = find_child_of_type(value, "identifier")?;
            ("call", node_text(callee, source).to_string())
        }
        "value_literal" => literal(value, source)?,
        _ => return None,
    };
    Some(VariableInfo {
        name: node_text(name, source).to_string(),
        value_kind: value_kind.into(),
        value: value_text,
        line: node.start_position().row + 1,
        scope: enclosing_function(node, source),
    })
}

fn extract_call(node: Node, source: &[u8]) -> Option<CallInfo> {
    let callee = find_child_of_type(node, "identifier")?;
    let args = find_child_of_type(node, "call_parameter_list")
        .map(|list| {
            let mut cursor = list.walk();
            let args: Vec<String> = list
                .named_children(&mut cursor)
                .map(|arg| match arg.kind() {
                    "value_literal" => literal(arg, source)
                        .map(|(_, text)| text)
                        .unwrap_or_default(),
                    _ => node_text(arg, source).to_string(),
                })
                .collect();
            args
        })
        .unwrap_or_default();
    Some(CallInfo {
        callee: node_text(callee, source).to_string(),
        args,
        line: node.start_position().row + 1,
        scope: enclosing_function(node, source),
    })
}

fn extract_return(node: Node, source: &[u8]) -> Option<ReturnInfo> {
    let value = node.named_child(0)?;
    let (value_kind, operator) = match value.kind() {
        "identifier" => ("identifier", None),
        "value_literal" => (literal(value, source)?.0, None),
        "expression" => {
            let inner = value.named_child(0)?;
            let kind = match inner.kind() {
                "unary_expression" => "unary",
                "binary_expression" => "binary",
                _ => return None,
            };
            let mut cursor = inner.walk();
            let op = inner
                .children(&mut cursor)
                .find(|c| !c.is_named())
                .map(|c| c.kind().to_string());
            (kind, op)
        }
        _ => return None,
    };
    Some(ReturnInfo {
        value_kind: value_kind.into(),
        operator,
        line: node.start_position().row + 1,
        scope: enclosing_function(node, source),
    })
}

/// value_literal → ("number" | "string", 文本)；字符串去掉引号
fn literal(node: Node, source: &[u8]) -> Option<(&'static str, String)> {
    let inner = node.named_child(0)?;
    match inner.kind() {
        "number" => Some(("number", node_text(inner, source).to_string())),
        "string" => Some(("string", strip_quotes(node_text(inner, source)))),
        _ => None,
    }
}

fn enclosing_function(node: Node, source: &[u8]) -> Option<String> {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.kind() == "function_definition" {
            return find_child_of_type(n, "identifier").map(|id| node_text(id, source).to_string());
        }
        current = n.parent();
    }
    None
}

// ---------------------------------------------------------------------------
// 共享辅助函数
// ---------------------------------------------------------------------------

/// 深度优先遍历所有节点，对每个节点调用 visitor；不进入 ERROR 节点
/// 注意：使用递归实现，极端深层嵌套可能导致栈溢出
pub fn walk_nodes<'a, F>(node: Node<'a>, visitor: &mut F)
where
    F: FnMut(Node<'a>),
{
    if node.is_error() {
        return;
    }
    visitor(node);
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            walk_nodes(cursor.node(), visitor);
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
}

/// 查找第一个指定类型的直接子节点
pub fn find_child_of_type<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|child| child.kind() == kind);
    found
}

/// 去除字符串两端的引号
pub fn strip_quotes(s: &str) -> String {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
        .to_string()
}

/// 从源码字节中提取节点文本
pub fn node_text<'a>(node: Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}
