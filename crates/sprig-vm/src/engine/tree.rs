//! Syntax tree produced by the parser.

use sprig_table::{Language, SymbolId, Visibility};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxNode {
    pub symbol: SymbolId,
    /// Byte range in the source.
    pub start: usize,
    pub end: usize,
    pub children: Vec<NodeId>,
    /// Shifted as an extra rather than by a grammar rule.
    pub extra: bool,
}

/// Arena of nodes with a single root.
#[derive(Debug)]
pub struct Tree<'l> {
    language: &'l Language,
    source: String,
    nodes: Vec<SyntaxNode>,
    root: NodeId,
}

impl<'l> Tree<'l> {
    pub(crate) fn new(
        language: &'l Language,
        source: String,
        nodes: Vec<SyntaxNode>,
        root: NodeId,
    ) -> Self {
        Self {
            language,
            source,
            nodes,
            root,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    /// Name of the rule or token that produced a node.
    pub fn kind(&self, id: NodeId) -> &str {
        self.language.symbol_name(self.node(id).symbol)
    }

    pub fn text(&self, id: NodeId) -> &str {
        let node = self.node(id);
        &self.source[node.start..node.end]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render named nodes as an S-expression.
    ///
    /// Anonymous tokens are left out and hidden nodes are replaced by their
    /// children. The root is always shown.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out, self.root, true);
        out
    }

    fn write_sexp(&self, out: &mut String, id: NodeId, is_root: bool) {
        let node = self.node(id);
        let visibility = self.language.symbol(node.symbol).visibility;
        match visibility {
            Visibility::Anonymous if !is_root => {}
            Visibility::Hidden if !is_root => {
                for &child in &node.children {
                    self.write_sexp(out, child, false);
                }
            }
            _ => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push('(');
                out.push_str(self.kind(id));
                for &child in &node.children {
                    self.write_sexp(out, child, false);
                }
                out.push(')');
            }
        }
    }
}
