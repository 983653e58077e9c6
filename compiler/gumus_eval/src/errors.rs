//! Evaluation errors and their constructors.
//!
//! Every runtime message the evaluator can raise is built here, so the
//! wording lives in one place. Constructors leave the line at 0; the
//! statement and expression visitors stamp the line of the node being
//! evaluated on the way out (see [`EvalError::or_line`]).

use gumus_diagnostic::Diagnostic;
use gumus_ir::BinaryOp;

use crate::value::Value;

/// Result of evaluating an expression or calling a function.
pub type EvalResult<T = Value> = Result<T, EvalError>;

/// A failure that unwinds the evaluator.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// System error: type mismatch, arity, division by zero, unknown name.
    #[error("{message}")]
    Runtime {
        message: String,
        line: u32,
        suggestion: Option<String>,
    },
    /// `firlat(deger)` from script code.
    #[error("{display}")]
    Thrown {
        value: Value,
        /// Display string of `value`, taken when it was thrown.
        display: String,
        line: u32,
    },
    /// The debugger asked to stop. Never caught by `deneme`.
    #[error("program durduruldu")]
    Stopped,
}

impl EvalError {
    pub fn runtime(message: impl Into<String>) -> Self {
        EvalError::Runtime {
            message: message.into(),
            line: 0,
            suggestion: None,
        }
    }

    pub fn thrown(value: Value, display: String) -> Self {
        EvalError::Thrown {
            value,
            display,
            line: 0,
        }
    }

    /// Set the line if none has been recorded yet.
    #[must_use]
    pub fn or_line(mut self, at: u32) -> Self {
        match &mut self {
            EvalError::Runtime { line, .. } | EvalError::Thrown { line, .. } if *line == 0 => {
                *line = at;
            }
            _ => {}
        }
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, name: Option<String>) -> Self {
        if let EvalError::Runtime { suggestion, .. } = &mut self {
            *suggestion = name;
        }
        self
    }

    pub fn line(&self) -> u32 {
        match self {
            EvalError::Runtime { line, .. } | EvalError::Thrown { line, .. } => *line,
            EvalError::Stopped => 0,
        }
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        matches!(self, EvalError::Stopped)
    }

    /// The `runtime_error` diagnostic for an uncaught error.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::runtime(self.line(), self.to_string());
        match self {
            EvalError::Runtime {
                suggestion: Some(name),
                ..
            } => diagnostic.with_suggestion(name.clone()),
            _ => diagnostic,
        }
    }
}

impl From<EvalError> for Diagnostic {
    fn from(err: EvalError) -> Self {
        err.to_diagnostic()
    }
}

// Heap

#[cold]
pub fn stale_handle() -> EvalError {
    EvalError::runtime("Gecersiz bellek referansi.")
}

// Arithmetic

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::runtime("Sifira bolunme hatasi.")
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::runtime("Sifira gore mod alma hatasi.")
}

#[cold]
pub fn integer_overflow() -> EvalError {
    EvalError::runtime("Tamsayi tasmasi.")
}

#[cold]
pub fn invalid_binary_op(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::runtime(format!(
        "Gecersiz islem: '{}' {} ve {} arasinda kullanilamaz.",
        op.as_symbol(),
        left.type_name(),
        right.type_name()
    ))
}

#[cold]
pub fn invalid_unary_op(symbol: &str, operand: &Value) -> EvalError {
    EvalError::runtime(format!(
        "Gecersiz islem: '{symbol}' {} icin kullanilamaz.",
        operand.type_name()
    ))
}

// Names

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::runtime(format!("Tanimlanmamis degisken: '{name}'."))
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::runtime(format!("Tanimlanmamis fonksiyon: '{name}'."))
}

#[cold]
pub fn module_not_found(module: &str) -> EvalError {
    EvalError::runtime(format!("Modul bulunamadi: '{module}'."))
}

#[cold]
pub fn module_member_not_found(module: &str, member: &str) -> EvalError {
    EvalError::runtime(format!("Modulde uye bulunamadi: '{module}::{member}'."))
}

// Calls

#[cold]
pub fn not_callable() -> EvalError {
    EvalError::runtime("Sadece fonksiyonlar ve siniflar cagrilabilir.")
}

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::runtime(format!(
        "Fonksiyon '{name}': Beklenen parametre {expected} ama alinan {got}."
    ))
}

#[cold]
pub fn call_depth_exceeded(limit: usize) -> EvalError {
    EvalError::runtime(format!("Maksimum cagri derinligi asildi ({limit})."))
}

// Classes and properties

#[cold]
pub fn superclass_not_class() -> EvalError {
    EvalError::runtime("Ust sinif bir sinif olmalidir.")
}

#[cold]
pub fn undefined_property(name: &str) -> EvalError {
    EvalError::runtime(format!("Belirsiz ozellik '{name}'."))
}

#[cold]
pub fn private_access(name: &str) -> EvalError {
    EvalError::runtime(format!("Ozel ozellige erisim engellendi: '{name}'."))
}

#[cold]
pub fn private_assignment(name: &str) -> EvalError {
    EvalError::runtime(format!("Ozel ozellige atama engellendi: '{name}'."))
}

#[cold]
pub fn no_properties() -> EvalError {
    EvalError::runtime(
        "Sadece nesnelerin veya yerlesik tiplerin ozellikleri/metotlari olabilir.",
    )
}

#[cold]
pub fn cannot_set_property(target: &Value) -> EvalError {
    EvalError::runtime(format!(
        "Sadece nesnelerin ozellikleri atanabilir. Alinan tip: {}",
        target.type_name()
    ))
}

// Indexing

#[cold]
pub fn list_index_not_int() -> EvalError {
    EvalError::runtime("Liste indeksi tamsayi olmalidir.")
}

#[cold]
pub fn list_index_out_of_bounds() -> EvalError {
    EvalError::runtime("Liste indeks hatasi (sinir disi).")
}

#[cold]
pub fn string_index_not_int() -> EvalError {
    EvalError::runtime("Metin indeksi tamsayi olmalidir.")
}

#[cold]
pub fn string_index_out_of_bounds() -> EvalError {
    EvalError::runtime("Metin indeks hatasi (sinir disi).")
}

#[cold]
pub fn cannot_index() -> EvalError {
    EvalError::runtime("Sadece listeler, metinler ve sozlukler indekslenebilir.")
}

#[cold]
pub fn cannot_index_assign() -> EvalError {
    EvalError::runtime("Sadece listelere ve sozluklere indeks ile atama yapilabilir.")
}

/// How a statement finished.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ExecStatus {
    #[default]
    Normal,
    Return(Value),
    Break,
    Continue,
}
