//! GümüşDil command-line interface.

use std::io;
use std::path::Path;

use gumus_diagnostic::JsonEmitter;
use gumusc::{init_tracing, interpreter_for, run_prompt, RunOptions, Session};

/// Exit code for a command line without a file (`EX_USAGE`).
const USAGE_EXIT: i32 = 64;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() {
        run_repl();
        return;
    }

    let mut options = RunOptions::empty();
    let mut file = None;
    for arg in &args {
        match RunOptions::from_flag(arg) {
            Some(flag) => options |= flag,
            None if arg == "-h" || arg == "--help" => {
                print_usage();
                return;
            }
            None if arg.starts_with("--") => {
                eprintln!("Bilinmeyen secenek: {arg}");
                print_usage();
                std::process::exit(USAGE_EXIT);
            }
            None => file = Some(arg.as_str()),
        }
    }

    let Some(path) = file else {
        print_usage();
        std::process::exit(USAGE_EXIT);
    };

    let mut session = Session::new(interpreter_for(options), options);
    let outcome = session.run_file(Path::new(path), &mut JsonEmitter::stderr());
    std::process::exit(outcome.exit_code());
}

fn run_repl() {
    let mut session = Session::new(interpreter_for(RunOptions::empty()), RunOptions::empty());
    if let Err(err) = run_prompt(&mut session, io::stdin().lock(), &mut JsonEmitter::stderr()) {
        eprintln!("Girdi okunamadi: {err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Kullanim:");
    eprintln!("  gumus                          : Etkilesimli kabuk");
    eprintln!("  gumus [dosya.tr]               : Dosyayi calistir");
    eprintln!("  gumus --dump-ast [dosya.tr]    : AST JSON ciktisi al");
    eprintln!("  gumus --dump-memory [dosya.tr] : Bellek durumu dokumu al");
    eprintln!("  gumus --debug [dosya.tr]       : Hata ayiklama protokolunu ac");
    eprintln!("  gumus --gc-report [dosya.tr]   : Cop toplayici raporu yazdir");
}
