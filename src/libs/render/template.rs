//! Minimal HTML template language.
//!
//! Templates are rendered against a JSON value (the serialized report data).
//!
//! | Tag                          | Meaning                                        |
//! |------------------------------|------------------------------------------------|
//! | `{{ user.user_name }}`       | value at a dotted path, HTML-escaped           |
//! | `{{{ issue_html }}}`         | value at a path, written verbatim              |
//! | `{{#each issues}}…{{/each}}` | repeat the body for every array element        |
//! | `{{#if description}}…{{else}}…{{/if}}` | branch on a non-empty value          |
//! | `{{@index}}`                 | 1-based position inside the innermost loop     |
//! | `{{this}}`                   | the current loop element                       |
//!
//! Inside a loop the element's fields are visible without a prefix and lookups
//! fall back to the enclosing scopes. Unknown variables and unbalanced blocks
//! are errors.

use crate::libs::error::ReportError;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Var { path: String, escape: bool },
    Each { path: String, body: Vec<Node> },
    If { path: String, then: Vec<Node>, otherwise: Vec<Node> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum BlockKind {
    Each,
    If,
}

impl BlockKind {
    fn name(self) -> &'static str {
        match self {
            BlockKind::Each => "each",
            BlockKind::If => "if",
        }
    }
}

struct Block {
    kind: BlockKind,
    path: String,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
}

impl Block {
    fn nodes(&mut self) -> &mut Vec<Node> {
        match self.otherwise.as_mut() {
            Some(otherwise) => otherwise,
            None => &mut self.then,
        }
    }

    fn close(self) -> Node {
        match self.kind {
            BlockKind::Each => Node::Each {
                path: self.path,
                body: self.then,
            },
            BlockKind::If => Node::If {
                path: self.path,
                then: self.then,
                otherwise: self.otherwise.unwrap_or_default(),
            },
        }
    }
}

/// A parsed template, reusable across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, ReportError> {
        let mut root: Vec<Node> = Vec::new();
        let mut stack: Vec<Block> = Vec::new();
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                current(&mut root, &mut stack).push(Node::Text(rest[..start].to_string()));
            }
            let after = &rest[start..];

            let (tag, raw, consumed) = if let Some(inner) = after.strip_prefix("{{{") {
                let end = inner.find("}}}").ok_or_else(|| unclosed(after))?;
                (inner[..end].trim(), true, 3 + end + 3)
            } else {
                let inner = &after[2..];
                let end = inner.find("}}").ok_or_else(|| unclosed(after))?;
                (inner[..end].trim(), false, 2 + end + 2)
            };
            rest = &after[consumed..];

            if tag.is_empty() {
                return Err(ReportError::Template("empty tag".to_string()));
            }

            if raw {
                current(&mut root, &mut stack).push(Node::Var {
                    path: tag.to_string(),
                    escape: false,
                });
            } else if let Some(path) = tag.strip_prefix("#each ") {
                stack.push(open(BlockKind::Each, path)?);
            } else if let Some(path) = tag.strip_prefix("#if ") {
                stack.push(open(BlockKind::If, path)?);
            } else if tag == "else" {
                match stack.last_mut() {
                    Some(block) if block.kind == BlockKind::If && block.otherwise.is_none() => {
                        block.otherwise = Some(Vec::new());
                    }
                    _ => return Err(ReportError::Template("{{else}} outside of an {{#if}} block".to_string())),
                }
            } else if let Some(name) = tag.strip_prefix('/') {
                let block = stack
                    .pop()
                    .ok_or_else(|| ReportError::Template(format!("unexpected {{{{/{}}}}}", name)))?;
                if block.kind.name() != name.trim() {
                    return Err(ReportError::Template(format!(
                        "{{{{#{}}}}} closed by {{{{/{}}}}}",
                        block.kind.name(),
                        name.trim()
                    )));
                }
                let node = block.close();
                current(&mut root, &mut stack).push(node);
            } else if tag.starts_with('#') {
                return Err(ReportError::Template(format!("unknown block '{}'", tag)));
            } else {
                current(&mut root, &mut stack).push(Node::Var {
                    path: tag.to_string(),
                    escape: true,
                });
            }
        }

        if !rest.is_empty() {
            current(&mut root, &mut stack).push(Node::Text(rest.to_string()));
        }

        if let Some(block) = stack.last() {
            return Err(ReportError::Template(format!(
                "unclosed {{{{#{} {}}}}}",
                block.kind.name(),
                block.path
            )));
        }

        Ok(Template { nodes: root })
    }

    pub fn render(&self, context: &Value) -> Result<String, ReportError> {
        let mut out = String::new();
        let mut scopes = vec![Scope {
            value: context,
            index: None,
        }];
        render_nodes(&self.nodes, &mut scopes, &mut out)?;
        Ok(out)
    }
}

fn current<'a>(root: &'a mut Vec<Node>, stack: &'a mut [Block]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(block) => block.nodes(),
        None => root,
    }
}

fn open(kind: BlockKind, path: &str) -> Result<Block, ReportError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(ReportError::Template(format!("{{{{#{}}}}} needs a variable", kind.name())));
    }
    Ok(Block {
        kind,
        path: path.to_string(),
        then: Vec::new(),
        otherwise: None,
    })
}

fn unclosed(fragment: &str) -> ReportError {
    let preview: String = fragment.chars().take(24).collect();
    ReportError::Template(format!("unclosed tag near '{}'", preview))
}

struct Scope<'v> {
    value: &'v Value,
    index: Option<usize>,
}

fn render_nodes<'v>(nodes: &[Node], scopes: &mut Vec<Scope<'v>>, out: &mut String) -> Result<(), ReportError> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var { path, .. } if path == "@index" => {
                let index = scopes
                    .iter()
                    .rev()
                    .find_map(|scope| scope.index)
                    .ok_or_else(|| ReportError::Template("{{@index}} outside of an {{#each}} block".to_string()))?;
                out.push_str(&index.to_string());
            }
            Node::Var { path, escape } => {
                let text = scalar(path, lookup(path, scopes)?)?;
                if *escape {
                    out.push_str(&escape_html(&text));
                } else {
                    out.push_str(&text);
                }
            }
            Node::Each { path, body } => {
                let items = match lookup(path, scopes)? {
                    Value::Array(items) => items,
                    Value::Null => continue,
                    _ => return Err(ReportError::Template(format!("'{}' is not a list", path))),
                };
                for (index, item) in items.iter().enumerate() {
                    scopes.push(Scope {
                        value: item,
                        index: Some(index + 1),
                    });
                    let rendered = render_nodes(body, scopes, out);
                    scopes.pop();
                    rendered?;
                }
            }
            Node::If { path, then, otherwise } => {
                let branch = if is_truthy(lookup(path, scopes)?) { then } else { otherwise };
                render_nodes(branch, scopes, out)?;
            }
        }
    }
    Ok(())
}

fn lookup<'v>(path: &str, scopes: &[Scope<'v>]) -> Result<&'v Value, ReportError> {
    let unknown = || ReportError::Template(format!("unknown variable '{}'", path));

    let innermost = scopes.last().ok_or_else(unknown)?;
    if path == "this" {
        return Ok(innermost.value);
    }

    let mut segments = path.split('.');
    let head = segments.next().ok_or_else(unknown)?;
    let root = scopes
        .iter()
        .rev()
        .find_map(|scope| scope.value.get(head))
        .ok_or_else(unknown)?;

    segments.try_fold(root, |value, segment| value.get(segment).ok_or_else(unknown))
}

fn scalar(path: &str, value: &Value) -> Result<String, ReportError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => {
            Err(ReportError::Template(format!("'{}' cannot be printed directly", path)))
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
