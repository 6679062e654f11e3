use itertools::Itertools;

use crate::RuleId;

/// A parse tree node.
///
/// Leaves hold a consumed terminal, inner nodes a reduced rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstNode {
    pub kind: String,
    pub value: String,
    /// Rule reduced to build the node, `None` for leaves.
    pub rule: Option<RuleId>,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn leaf(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
            rule: None,
            children: vec![],
        }
    }

    pub fn reduce<I: IntoIterator<Item = Self>>(
        kind: impl Into<String>,
        rule: RuleId,
        children: I,
    ) -> Self {
        Self {
            kind: kind.into(),
            value: String::default(),
            rule: Some(rule),
            children: children.into_iter().collect(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.rule.is_none()
    }

    /// Renders the tree as an s-expression, leaves by value.
    ///
    /// # Example
    /// (E (E id) '+' (E id))
    pub fn to_sexpr(&self) -> String {
        if self.is_leaf() {
            return self.value.clone();
        }

        if self.children.is_empty() {
            return format!("({})", self.kind);
        }

        format!(
            "({} {})",
            self.kind,
            self.children.iter().map(AstNode::to_sexpr).join(" ")
        )
    }
}
