//! Syntax tree.
//!
//! Statements and expressions are plain owned trees (`Box`/`Vec`). Every
//! node records the source line it started on. Nodes that name a binding
//! (`Variable`, `Assign`, `This`, `Super`) carry a [`Distance`] slot that
//! the resolver fills in after parsing; the tree is otherwise immutable.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Number of enclosing scopes between a reference and its binding.
///
/// Written once by the resolver, read by the evaluator. `None` means the
/// name was not found lexically and is looked up in the globals and the
/// function table at run time. Interior mutability keeps the rest of the
/// tree immutable while the resolver walks it by shared reference.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Distance(Cell<Option<u32>>);

impl Distance {
    /// A slot that has not been resolved.
    #[inline]
    pub fn unresolved() -> Self {
        Distance(Cell::new(None))
    }

    #[inline]
    pub fn get(&self) -> Option<u32> {
        self.0.get()
    }

    #[inline]
    pub fn set(&self, hops: u32) {
        self.0.set(Some(hops));
    }

    #[inline]
    pub fn clear(&self) {
        self.0.set(None);
    }

    /// Wire form used by the AST dump: `-1` for unresolved.
    pub fn as_signed(&self) -> i64 {
        self.get().map_or(-1, i64::from)
    }
}

impl fmt::Debug for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(hops) => write!(f, "Distance({hops})"),
            None => f.write_str("Distance(-)"),
        }
    }
}

/// Literal value in source.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Nil,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) => write!(f, "{x}"),
            Literal::Str(s) => f.write_str(s),
            Literal::Bool(true) => f.write_str("doğru"),
            Literal::Bool(false) => f.write_str("yanlış"),
            Literal::Nil => f.write_str("boş"),
        }
    }
}

/// Arithmetic, comparison and equality operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }
}

/// Short-circuiting operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            LogicalOp::And => "ve",
            LogicalOp::Or => "veya",
        }
    }
}

/// Prefix operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// An expression and the line it starts on.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: u32,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, line: u32) -> Self {
        Expr { kind, line }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        op: LogicalOp,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Variable {
        name: String,
        distance: Distance,
    },
    Assign {
        name: String,
        value: Box<Expr>,
        distance: Distance,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    List(Vec<Expr>),
    /// Key/value pairs in source order.
    Map(Vec<(Expr, Expr)>),
    IndexGet {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    IndexSet {
        object: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    /// `object.name`
    Get {
        object: Box<Expr>,
        name: String,
    },
    /// `object.name = value`
    Set {
        object: Box<Expr>,
        name: String,
        value: Box<Expr>,
    },
    /// `öz`
    This {
        distance: Distance,
    },
    /// `ata.method`
    Super {
        method: String,
        distance: Distance,
    },
    /// `Module::member`
    Scope {
        module: String,
        member: String,
    },
}

/// A statement and the line it starts on.
#[derive(Clone, Debug, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, line: u32) -> Self {
        Stmt { kind, line }
    }

    /// Wrap statements in a block.
    pub fn block(stmts: Vec<Stmt>, line: u32) -> Self {
        Stmt::new(StmtKind::Block(stmts), line)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StmtKind {
    Expression(Expr),
    Print(Expr),
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        /// Either a block or a chained `değilse eğer`.
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    For {
        initializer: Option<Box<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Box<Stmt>,
    },
    Break,
    Continue,
    Function(SharedFunction),
    Return(Option<Expr>),
    Var {
        name: String,
        initializer: Option<Expr>,
    },
    Class(ClassDecl),
    TryCatch {
        body: Box<Stmt>,
        error_name: String,
        handler: Box<Stmt>,
    },
    Module {
        name: String,
        body: Vec<Stmt>,
    },
}

/// A function or method declaration.
#[derive(Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

impl FunctionDecl {
    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Function declarations outlive the statement list they came from: the
/// function values built from them hold a clone of this handle.
pub type SharedFunction = Rc<FunctionDecl>;

/// A class declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    /// Always an `ExprKind::Variable` when present.
    pub superclass: Option<Expr>,
    pub methods: Vec<SharedFunction>,
}
