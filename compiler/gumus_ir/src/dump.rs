//! JSON tree form of the AST.
//!
//! Every node becomes `{"type", "line", "value", "children"}`. Nodes that
//! carry a resolver slot also get a `"distance"` field (`-1` when
//! unresolved). The format is read back by [`from_json`] so that tools can
//! consume a dump without linking the parser.

use serde::{Deserialize, Serialize};

use crate::ast::{ClassDecl, Expr, ExprKind, FunctionDecl, Literal, Stmt, StmtKind};

/// One node of the dumped tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<i64>,
    #[serde(default)]
    pub children: Vec<DumpNode>,
}

impl DumpNode {
    fn leaf(kind: &str, line: u32, value: impl Into<String>) -> Self {
        DumpNode {
            kind: kind.to_owned(),
            line,
            value: value.into(),
            distance: None,
            children: Vec::new(),
        }
    }

    fn with_children(mut self, children: Vec<DumpNode>) -> Self {
        self.children = children;
        self
    }

    fn with_distance(mut self, distance: i64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DumpNode::node_count).sum::<usize>()
    }
}

/// Dump a statement list, one node per top-level statement.
pub fn dump_program(stmts: &[Stmt]) -> Vec<DumpNode> {
    stmts.iter().map(dump_stmt).collect()
}

/// Dump a statement list as pretty-printed JSON.
pub fn program_to_json(stmts: &[Stmt]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&dump_program(stmts))
}

/// Read a dump produced by [`program_to_json`].
pub fn from_json(text: &str) -> Result<Vec<DumpNode>, serde_json::Error> {
    serde_json::from_str(text)
}

pub fn dump_stmt(stmt: &Stmt) -> DumpNode {
    let line = stmt.line;
    match &stmt.kind {
        StmtKind::Expression(expr) => {
            DumpNode::leaf("ExpressionStmt", line, "").with_children(vec![dump_expr(expr)])
        }
        StmtKind::Print(expr) => {
            DumpNode::leaf("PrintStmt", line, "yazdir").with_children(vec![dump_expr(expr)])
        }
        StmtKind::Block(stmts) => {
            DumpNode::leaf("BlockStmt", line, "{}").with_children(dump_program(stmts))
        }
        StmtKind::If {
            condition,
            then_branch,
            else_branch,
        } => {
            let mut children = vec![dump_expr(condition), dump_stmt(then_branch)];
            if let Some(else_branch) = else_branch {
                children.push(dump_stmt(else_branch));
            }
            DumpNode::leaf("IfStmt", line, "eger").with_children(children)
        }
        StmtKind::While { condition, body } => DumpNode::leaf("WhileStmt", line, "dongu")
            .with_children(vec![dump_expr(condition), dump_stmt(body)]),
        StmtKind::For {
            initializer,
            condition,
            increment,
            body,
        } => {
            let mut children = Vec::with_capacity(4);
            children.extend(initializer.as_deref().map(dump_stmt));
            children.extend(condition.as_ref().map(dump_expr));
            children.extend(increment.as_ref().map(dump_expr));
            children.push(dump_stmt(body));
            DumpNode::leaf("ForStmt", line, "dongu").with_children(children)
        }
        StmtKind::Break => DumpNode::leaf("BreakStmt", line, "kir"),
        StmtKind::Continue => DumpNode::leaf("ContinueStmt", line, "devam"),
        StmtKind::Function(decl) => dump_function(decl),
        StmtKind::Return(value) => DumpNode::leaf("ReturnStmt", line, "don")
            .with_children(value.iter().map(dump_expr).collect()),
        StmtKind::Var { name, initializer } => DumpNode::leaf("VarStmt", line, name.as_str())
            .with_children(initializer.iter().map(dump_expr).collect()),
        StmtKind::Class(class) => dump_class(class, line),
        StmtKind::TryCatch { body, handler, .. } => DumpNode::leaf("TryCatchStmt", line, "deneme")
            .with_children(vec![dump_stmt(body), dump_stmt(handler)]),
        StmtKind::Module { name, body } => {
            DumpNode::leaf("ModuleStmt", line, name.as_str()).with_children(dump_program(body))
        }
    }
}

fn dump_function(decl: &FunctionDecl) -> DumpNode {
    let body = DumpNode::leaf("BlockStmt", decl.line, "body").with_children(dump_program(&decl.body));
    DumpNode::leaf("FunctionStmt", decl.line, decl.name.as_str()).with_children(vec![body])
}

fn dump_class(class: &ClassDecl, line: u32) -> DumpNode {
    let mut children = Vec::with_capacity(class.methods.len() + 1);
    children.extend(class.superclass.as_ref().map(dump_expr));
    children.extend(class.methods.iter().map(|m| dump_function(m)));
    DumpNode::leaf("ClassStmt", line, class.name.as_str()).with_children(children)
}

pub fn dump_expr(expr: &Expr) -> DumpNode {
    let line = expr.line;
    match &expr.kind {
        ExprKind::Literal(lit) => DumpNode::leaf("Literal", line, literal_text(lit)),
        ExprKind::Binary { left, op, right } => DumpNode::leaf("BinaryExpr", line, op.as_symbol())
            .with_children(vec![dump_expr(left), dump_expr(right)]),
        ExprKind::Logical { left, op, right } => {
            DumpNode::leaf("LogicalExpr", line, op.as_symbol())
                .with_children(vec![dump_expr(left), dump_expr(right)])
        }
        ExprKind::Unary { op, operand } => DumpNode::leaf("UnaryExpr", line, op.as_symbol())
            .with_children(vec![dump_expr(operand)]),
        ExprKind::Variable { name, distance } => {
            DumpNode::leaf("Variable", line, name.as_str()).with_distance(distance.as_signed())
        }
        ExprKind::Assign {
            name,
            value,
            distance,
        } => DumpNode::leaf("AssignExpr", line, name.as_str())
            .with_distance(distance.as_signed())
            .with_children(vec![dump_expr(value)]),
        ExprKind::Call { callee, args } => {
            let mut children = Vec::with_capacity(args.len() + 1);
            children.push(dump_expr(callee));
            children.extend(args.iter().map(dump_expr));
            DumpNode::leaf("CallExpr", line, "()").with_children(children)
        }
        ExprKind::List(items) => {
            DumpNode::leaf("ListExpr", line, "[]").with_children(items.iter().map(dump_expr).collect())
        }
        ExprKind::Map(pairs) => {
            let children = pairs
                .iter()
                .map(|(k, v)| DumpNode::leaf("Pair", k.line, "").with_children(vec![dump_expr(k), dump_expr(v)]))
                .collect();
            DumpNode::leaf("MapExpr", line, "{}").with_children(children)
        }
        ExprKind::IndexGet { object, index } => DumpNode::leaf("IndexGetExpr", line, "[]")
            .with_children(vec![dump_expr(object), dump_expr(index)]),
        ExprKind::IndexSet {
            object,
            index,
            value,
        } => DumpNode::leaf("IndexSetExpr", line, "[]=").with_children(vec![
            dump_expr(object),
            dump_expr(index),
            dump_expr(value),
        ]),
        ExprKind::Get { object, name } => DumpNode::leaf("PropertyExpr", line, format!(".{name}"))
            .with_children(vec![dump_expr(object)]),
        ExprKind::Set {
            object,
            name,
            value,
        } => DumpNode::leaf("SetExpr", line, name.as_str())
            .with_children(vec![dump_expr(object), dump_expr(value)]),
        ExprKind::This { distance } => {
            DumpNode::leaf("ThisExpr", line, "oz").with_distance(distance.as_signed())
        }
        ExprKind::Super { method, distance } => {
            DumpNode::leaf("SuperExpr", line, format!("ata.{method}")).with_distance(distance.as_signed())
        }
        ExprKind::Scope { module, member } => {
            DumpNode::leaf("ScopeExpr", line, format!("{module}::{member}"))
        }
    }
}

fn literal_text(lit: &Literal) -> String {
    match lit {
        Literal::Bool(true) => "dogru".to_owned(),
        Literal::Bool(false) => "yanlis".to_owned(),
        Literal::Nil => "bos".to_owned(),
        other => other.to_string(),
    }
}
