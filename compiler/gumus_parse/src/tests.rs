use gumus_diagnostic::DiagnosticKind;
use gumus_ir::{BinaryOp, ExprKind, Literal, LogicalOp, Stmt, StmtKind};
use pretty_assertions::assert_eq;

use super::*;

fn parse_source(source: &str) -> ParseOutput {
    match gumus_lexer::lex(source) {
        Ok(tokens) => parse(&tokens),
        Err(err) => panic!("lex failed: {err}"),
    }
}

fn parse_ok(source: &str) -> Vec<Stmt> {
    let output = parse_source(source);
    assert!(
        !output.had_error,
        "unexpected errors: {:?}",
        output.diagnostics
    );
    output.statements
}

fn messages(source: &str) -> Vec<String> {
    parse_source(source)
        .diagnostics
        .into_iter()
        .map(|d| d.message)
        .collect()
}

#[test]
fn empty_token_slice() {
    let output = parse(&[]);
    assert!(output.statements.is_empty());
    assert!(!output.had_error);
}

#[test]
fn var_and_print() {
    let stmts = parse_ok("değişken x = 5\nyazdır x + 1\n");
    assert_eq!(stmts.len(), 2);
    match &stmts[0].kind {
        StmtKind::Var { name, initializer } => {
            assert_eq!(name, "x");
            assert!(matches!(
                initializer.as_ref().map(|e| &e.kind),
                Some(ExprKind::Literal(Literal::Int(5)))
            ));
        }
        other => panic!("expected var, got {other:?}"),
    }
    assert_eq!(stmts[1].line, 2);
    match &stmts[1].kind {
        StmtKind::Print(expr) => {
            assert!(matches!(
                expr.kind,
                ExprKind::Binary {
                    op: BinaryOp::Add,
                    ..
                }
            ));
        }
        other => panic!("expected print, got {other:?}"),
    }
}

#[test]
fn precedence_of_factor_over_term() {
    let stmts = parse_ok("yazdır 1 + 2 * 3");
    let StmtKind::Print(expr) = &stmts[0].kind else {
        panic!("expected print");
    };
    let ExprKind::Binary { op, right, .. } = &expr.kind else {
        panic!("expected binary");
    };
    assert_eq!(*op, BinaryOp::Add);
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            op: BinaryOp::Mul,
            ..
        }
    ));
}

#[test]
fn logical_operators_bind_looser_than_comparison() {
    let stmts = parse_ok("yazdır (a) ve (b) veya c < 2");
    let StmtKind::Print(expr) = &stmts[0].kind else {
        panic!("expected print");
    };
    let ExprKind::Logical { op, left, right } = &expr.kind else {
        panic!("expected logical");
    };
    assert_eq!(*op, LogicalOp::Or);
    assert!(matches!(
        left.kind,
        ExprKind::Logical {
            op: LogicalOp::And,
            ..
        }
    ));
    assert!(matches!(
        right.kind,
        ExprKind::Binary {
            op: BinaryOp::Lt,
            ..
        }
    ));
}

#[test]
fn assignment_targets() {
    let stmts = parse_ok("x = 1\na.b = 2\nl[0] = 3\n");
    let kinds: Vec<_> = stmts
        .iter()
        .map(|s| match &s.kind {
            StmtKind::Expression(e) => match e.kind {
                ExprKind::Assign { .. } => "assign",
                ExprKind::Set { .. } => "set",
                ExprKind::IndexSet { .. } => "index_set",
                _ => "other",
            },
            _ => "stmt",
        })
        .collect();
    assert_eq!(kinds, vec!["assign", "set", "index_set"]);
}

#[test]
fn invalid_assignment_target() {
    let output = parse_source("1 + 2 = 3");
    assert!(output.had_error);
    assert_eq!(output.diagnostics[0].message, "Gecersiz atama hedefi.");
    assert_eq!(output.diagnostics[0].kind, DiagnosticKind::ParserError);
}

#[test]
fn semicolon_is_rejected() {
    let output = parse_source("değişken x = 1;\nyazdır x");
    assert!(output.had_error);
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].kind, DiagnosticKind::SyntaxError);
    assert_eq!(
        output.diagnostics[0].message,
        "GümüşDil'de noktalı virgül kullanılmaz! Modern sözdizimi kullan."
    );
    // Recovery resumes at the next line.
    assert!(matches!(
        output.statements.last().map(|s| &s.kind),
        Some(StmtKind::Print(_))
    ));
}

#[test]
fn if_else_if_chain() {
    let stmts = parse_ok("eğer x > 1 {\n yazdır 1\n} değilse eğer x > 0 {\n yazdır 2\n} değilse {\n yazdır 3\n}");
    let StmtKind::If { else_branch, .. } = &stmts[0].kind else {
        panic!("expected if");
    };
    let Some(nested) = else_branch else {
        panic!("missing else");
    };
    let StmtKind::If {
        else_branch: Some(last),
        ..
    } = &nested.kind
    else {
        panic!("expected chained if");
    };
    assert!(matches!(last.kind, StmtKind::Block(_)));
}

#[test]
fn loop_forms() {
    let stmts = parse_ok(
        "döngü {\n kır\n}\n\
         döngü (x < 3) {\n x = x + 1\n}\n\
         döngü x < 3 {\n devam\n}\n\
         her (değişken i = 0; i < 3; i = i + 1) {\n yazdır i\n}\n\
         her değişken j = 0; j < 3; j = j + 1 {\n yazdır j\n}\n\
         döngü (i = 0; ; ) {\n kır\n}\n",
    );
    let shapes: Vec<_> = stmts
        .iter()
        .map(|s| match &s.kind {
            StmtKind::While { condition, .. } => match condition.kind {
                ExprKind::Literal(Literal::Bool(true)) => "infinite",
                _ => "while",
            },
            StmtKind::For {
                initializer,
                condition,
                increment,
                ..
            } => match (initializer.is_some(), condition.is_some(), increment.is_some()) {
                (true, true, true) => "for",
                (true, false, false) => "for_init_only",
                _ => "for_other",
            },
            _ => "other",
        })
        .collect();
    assert_eq!(
        shapes,
        vec!["infinite", "while", "while", "for", "for", "for_init_only"]
    );
}

#[test]
fn return_value_only_on_same_line() {
    let stmts = parse_ok("fonksiyon f() {\n dön\n}\nfonksiyon g() {\n dön 1 + 2\n}");
    let bodies: Vec<Option<bool>> = stmts
        .iter()
        .map(|s| match &s.kind {
            StmtKind::Function(decl) => match &decl.body[0].kind {
                StmtKind::Return(value) => Some(value.is_some()),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(bodies, vec![Some(false), Some(true)]);
}

#[test]
fn class_with_superclass_and_constructor() {
    let stmts = parse_ok(
        "sınıf B < A {\n kurucu(x) {\n ata.kurucu(x)\n }\n fonksiyon selam() {\n dön öz.x\n }\n al() {\n dön 1\n }\n}",
    );
    let StmtKind::Class(class) = &stmts[0].kind else {
        panic!("expected class");
    };
    assert_eq!(class.name, "B");
    assert!(matches!(
        class.superclass.as_ref().map(|e| &e.kind),
        Some(ExprKind::Variable { name, .. }) if name == "A"
    ));
    let names: Vec<_> = class.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["kurucu", "selam", "al"]);
    assert_eq!(class.methods[0].arity(), 1);
}

#[test]
fn class_body_rejects_statements() {
    let output = parse_source("sınıf A {\n yazdır 1\n}");
    assert!(output.had_error);
    assert_eq!(
        output.diagnostics[0].message,
        "Sinif icinde sadece metotlar tanimlanabilir."
    );
}

#[test]
fn try_catch_and_module() {
    let stmts = parse_ok(
        "deneme {\n firlat(1)\n} yakala (h) {\n yazdır h\n}\nmodül M {\n değişken x = 1\n fonksiyon f() {\n dön x\n }\n}\nyazdır M::x",
    );
    assert!(matches!(
        &stmts[0].kind,
        StmtKind::TryCatch { error_name, .. } if error_name == "h"
    ));
    assert!(matches!(
        &stmts[1].kind,
        StmtKind::Module { name, body } if name == "M" && body.len() == 2
    ));
    let StmtKind::Print(expr) = &stmts[2].kind else {
        panic!("expected print");
    };
    assert!(matches!(
        &expr.kind,
        ExprKind::Scope { module, member } if module == "M" && member == "x"
    ));
}

#[test]
fn collection_literals_allow_newlines_and_trailing_comma() {
    let stmts = parse_ok("değişken l = [\n 1,\n 2,\n]\ndeğişken m = {\n ad: \"x\",\n \"y\": 2,\n}\n");
    let StmtKind::Var {
        initializer: Some(list),
        ..
    } = &stmts[0].kind
    else {
        panic!("expected list var");
    };
    assert!(matches!(&list.kind, ExprKind::List(items) if items.len() == 2));
    let StmtKind::Var {
        initializer: Some(map),
        ..
    } = &stmts[1].kind
    else {
        panic!("expected map var");
    };
    let ExprKind::Map(entries) = &map.kind else {
        panic!("expected map");
    };
    assert_eq!(entries.len(), 2);
    assert!(matches!(
        &entries[0].0.kind,
        ExprKind::Literal(Literal::Str(key)) if key == "ad"
    ));
}

#[test]
fn call_chain_and_keyword_properties() {
    let stmts = parse_ok("yeni Nokta(1, 2).liste.ekle(3)[0]");
    let StmtKind::Expression(expr) = &stmts[0].kind else {
        panic!("expected expression");
    };
    let ExprKind::IndexGet { object, .. } = &expr.kind else {
        panic!("expected index");
    };
    let ExprKind::Call { callee, args } = &object.kind else {
        panic!("expected call");
    };
    assert_eq!(args.len(), 1);
    assert!(matches!(&callee.kind, ExprKind::Get { name, .. } if name == "ekle"));

    let stmts = parse_ok("x.yazdır");
    assert!(matches!(
        &stmts[0].kind,
        StmtKind::Expression(e) if matches!(&e.kind, ExprKind::Get { name, .. } if name == "yazdır")
    ));
}

#[test]
fn call_line_is_closing_paren() {
    let stmts = parse_ok("f(\n1,\n2\n)");
    let StmtKind::Expression(expr) = &stmts[0].kind else {
        panic!("expected expression");
    };
    assert_eq!(expr.line, 4);
}

#[test]
fn missing_expression_messages() {
    assert_eq!(messages("yazdır"), vec!["Ifade bekleniyor.".to_owned()]);
    assert_eq!(
        messages("eğer x yazdır 1"),
        vec!["If govdesi icin '{' bekleniyor.".to_owned()]
    );
    assert_eq!(
        messages("fonksiyon (a)"),
        vec!["fonksiyon adi bekleniyor.".to_owned()]
    );
}

#[test]
fn recovery_reports_errors_on_separate_lines() {
    let output = parse_source("değişken = 1\nyazdır 2\ndeğişken = 3\n");
    let lines: Vec<u32> = output.errors().map(|d| d.line).collect();
    assert_eq!(lines, vec![1, 3]);
    assert!(output
        .statements
        .iter()
        .any(|s| matches!(s.kind, StmtKind::Print(_))));
}

#[test]
fn error_cap_warns_once_and_skips_line() {
    let output = parse_source("yazdır ) yazdır ) yazdır ) yazdır ) yazdır )\nyazdır 1\n");
    let kinds: Vec<DiagnosticKind> = output.diagnostics.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::ParserError,
            DiagnosticKind::ParserError,
            DiagnosticKind::ParserError,
            DiagnosticKind::ParserError,
            DiagnosticKind::ParserWarning,
        ]
    );
    assert_eq!(output.diagnostics[4].message, "Çok fazla hata - satır atlanıyor");
    assert_eq!(output.statements.len(), 1);
}

#[test]
fn module_body_errors_are_recorded() {
    let output = parse_source("modül M {\n ) \n değişken x = 1\n}\n");
    assert!(output.had_error);
    let StmtKind::Module { body, .. } = &output.statements[0].kind else {
        panic!("expected module");
    };
    assert_eq!(body.len(), 1);
}

#[test]
fn module_body_errors_share_the_line_cap() {
    let output = parse_source(
        "modül M {\n yazdır ) yazdır ) yazdır ) yazdır ) yazdır ) yazdır )\n değişken x = 1\n}\nyazdır 2\n",
    );
    let on_line: Vec<DiagnosticKind> = output
        .diagnostics
        .iter()
        .filter(|d| d.line == 2)
        .map(|d| d.kind)
        .collect();
    assert_eq!(
        on_line,
        vec![
            DiagnosticKind::ParserError,
            DiagnosticKind::ParserError,
            DiagnosticKind::ParserError,
            DiagnosticKind::ParserError,
            DiagnosticKind::ParserWarning,
        ]
    );
    assert_eq!(output.diagnostics.len(), 5);
    assert_eq!(output.statements.len(), 2);
    let StmtKind::Module { body, .. } = &output.statements[0].kind else {
        panic!("expected module");
    };
    assert_eq!(body.len(), 1);
}

#[test]
fn module_recovery_keeps_the_closing_brace() {
    let output = parse_source("modül M { değişken = = = = = = = = }
yazdır 1
");
    assert_eq!(output.errors().count(), 1);
    assert!(matches!(output.statements[0].kind, StmtKind::Module { .. }));
    assert!(matches!(output.statements[1].kind, StmtKind::Print(_)));
}

#[test]
fn too_many_parameters() {
    let params: Vec<String> = (0..256).map(|i| format!("p{i}")).collect();
    let source = format!("fonksiyon f({}) {{\n}}", params.join(", "));
    assert_eq!(
        messages(&source).first().map(String::as_str),
        Some("255'ten fazla parametre olamaz.")
    );
}
