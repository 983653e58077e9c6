//! Dump, report and debug flags.

use gumus_ir::from_json;
use gumusc::{Outcome, RunOptions};
use pretty_assertions::assert_eq;

use crate::common::{debug_session, run_file_in, run_in, run_with, script};

#[test]
fn flags_map_to_options() {
    assert_eq!(RunOptions::from_flag("--dump-ast"), Some(RunOptions::DUMP_AST));
    assert_eq!(
        RunOptions::from_flag("--hata-ayikla"),
        Some(RunOptions::DEBUG | RunOptions::TIMING)
    );
    assert_eq!(RunOptions::from_flag("--debug"), RunOptions::from_flag("--hata-ayikla"));
    assert_eq!(RunOptions::from_flag("dosya.tr"), None);
}

#[test]
fn dump_ast_prints_the_tree_without_running() {
    let result = run_with(
        RunOptions::DUMP_AST,
        "yazdır 1\nfonksiyon f(a) { dön a }\n",
    );
    assert_eq!(result.outcome, Outcome::Completed);

    let nodes = match from_json(&result.output) {
        Ok(nodes) => nodes,
        Err(err) => panic!("dump is not JSON: {err}\n{}", result.output),
    };
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].kind, "PrintStmt");
    assert_eq!(nodes[0].line, 1);
    assert_eq!(nodes[1].kind, "FunctionStmt");
    assert_eq!(nodes[1].value, "f");

    let ret = &nodes[1].children[0].children[0];
    assert_eq!(ret.kind, "ReturnStmt");
    assert_eq!(ret.children[0].kind, "Variable");
    assert_eq!(ret.children[0].distance, Some(0));
}

#[test]
fn dump_memory_follows_the_program_output() {
    let result = run_with(RunOptions::DUMP_MEMORY, "değişken x = 3\nyazdır x\n");
    let Some(rest) = result.output.strip_prefix("3\n\n__MEMORY_JSON_START__\n") else {
        panic!("unexpected output: {}", result.output);
    };
    let Some(json) = rest.strip_suffix("\n__MEMORY_JSON_END__\n") else {
        panic!("missing end marker: {rest}");
    };
    assert!(json.starts_with(r#"{"scope":"Global""#));
    assert!(json.contains(r#""x":{"type":"Tamsayı","value":"3"}"#));
}

#[test]
fn dump_memory_after_a_runtime_error() {
    let result = run_with(RunOptions::DUMP_MEMORY, "değişken y = 1\ny()\n");
    assert_eq!(result.outcome, Outcome::Failed);
    assert!(result.output.contains("__MEMORY_JSON_START__"));
    assert!(result.output.contains(r#""y":{"type":"Tamsayı","value":"1"}"#));
}

#[test]
fn gc_report_counts_the_collection() {
    let result = run_with(
        RunOptions::GC_REPORT,
        "değişken tut = [1]\n[2, 3]\n",
    );
    assert_eq!(result.outcome, Outcome::Completed);
    assert!(result.output.starts_with("=== Cop Toplayici Raporu ===\n"));
    assert!(result.output.contains("Toplama sayisi: 1\n"));
}

#[test]
fn debugger_steps_then_continues() {
    let mut session = debug_session("STEP_OVER\nCONTINUE\n");
    let result = run_in(&mut session, "yazdır 1\nyazdır 2\nyazdır 3\n");
    assert_eq!(result.outcome, Outcome::Completed);
    assert_eq!(
        result.output,
        "__DEBUG_EVENT__{\"type\": \"line\", \"line\": 1}\n\
         1\n\
         __DEBUG_EVENT__{\"type\": \"line\", \"line\": 2}\n\
         2\n\
         __DEBUG_EVENT__{\"type\": \"line\", \"line\": 3}\n\
         3\n"
    );
}

#[test]
fn debugger_stop_ends_the_run_cleanly() {
    let mut session = debug_session("STEP_OVER\nSTOP\n");
    let result = run_in(&mut session, "yazdır 1\nyazdır 2\n");
    assert_eq!(result.outcome, Outcome::Completed);
    assert!(result.diagnostics.is_empty());
    assert_eq!(
        result.output,
        "__DEBUG_EVENT__{\"type\": \"line\", \"line\": 1}\n\
         1\n\
         __DEBUG_EVENT__{\"type\": \"line\", \"line\": 2}\n"
    );
}

#[test]
fn debug_runs_print_their_timing() {
    let (_dir, path) = script("zaman.tr", "yazdır \"bitti\"\n");
    let mut session = debug_session("CONTINUE\n");
    let result = run_file_in(&mut session, &path);
    let last = result.output.lines().last().unwrap_or_default();
    assert!(last.starts_with("[DEBUG] Program "), "{last}");
    assert!(last.ends_with(" ms icinde tamamlandi."), "{last}");
}
