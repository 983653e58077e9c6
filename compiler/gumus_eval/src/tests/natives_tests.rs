//! Core natives and `dahil_et`.

use std::path::Path;

use gumus_diagnostic::DiagnosticKind;
use pretty_assertions::assert_eq;

use super::{output_of, run_in, runtime_error};
use crate::interpreter::Interpreter;
use crate::print_handler::buffer_handler;

/// A path as a string literal body usable inside test programs.
fn script_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn interpreter_searching(dir: &Path) -> Interpreter {
    Interpreter::builder()
        .print_handler(buffer_handler())
        .search_paths([dir])
        .build()
}

#[test]
fn conversions() {
    let source = r#"
yazdır metin(12) + metin(1.5)
yazdır sayi("42abc") + 1
yazdır sayı("  -7")
yazdır sayi("abc")
yazdır sayi(3.9)
yazdır sayi(doğru)
yazdır sayi([1])
"#;
    assert_eq!(output_of(source), "121.5\n43\n-7\n0\n3\n1\n0\n");
}

#[test]
fn type_names() {
    let source = r#"
yazdır tip(1)
yazdır tip(1.0)
yazdır tip("a")
yazdır tip(yanlış)
yazdır tip(boş)
yazdır tip([])
yazdır tip({})
yazdır tip(tip)
"#;
    assert_eq!(
        output_of(source),
        "Tamsayı\nOndalıklı\nMetin\nMantıksal\nBoş\nListe\nSözlük\nFonksiyon\n"
    );
}

#[test]
fn length_of_each_kind() {
    let source = "yazdır uzunluk(\"çay\")\nyazdır uzunluk([1, 2])\nyazdır uzunluk({a: 1})\nyazdır uzunluk(5)\n";
    assert_eq!(output_of(source), "3\n2\n1\n0\n");
}

#[test]
fn list_natives_mutate_in_place() {
    let source = r#"
değişken l = [3, 1, 2]
ekle(l, 0)
sil(l, 1)
sil(l, 10)
yazdır l
yazdır sirala(l)
yazdır l
yazdır ekle(5, 1)
"#;
    assert_eq!(output_of(source), "[3, 2, 0]\n[0, 2, 3]\n[0, 2, 3]\n0\n");
}

#[test]
fn sorting_groups_kinds() {
    let source = "yazdır sirala([\"b\", 2.5, \"a\", 1, doğru, 3])\n";
    assert_eq!(output_of(source), "[1, 2.5, 3, a, b, dogru]\n");
}

#[test]
fn square_root() {
    assert_eq!(output_of("yazdır karekok(17)\nyazdır karekok(2.25)\n"), "4\n1.5\n");
}

#[test]
fn random_numbers_are_non_negative_ints() {
    let source = r#"
değişken tamam = doğru
her (değişken i = 0; i < 50; i = i + 1) {
    değişken r = rastgele()
    eğer tip(r) != "Tamsayı" veya r < 0 { tamam = yanlış }
}
yazdır tamam
"#;
    assert_eq!(output_of(source), "dogru\n");
}

#[test]
fn time_is_positive() {
    assert_eq!(output_of("yazdır zaman() > 0\n"), "dogru\n");
}

#[test]
fn natives_check_arity() {
    assert_eq!(
        runtime_error("metin(1, 2)\n").0,
        "Fonksiyon 'metin': Beklenen parametre 1 ama alinan 2."
    );
}

#[test]
fn globals_shadow_natives() {
    assert_eq!(output_of("değişken metin = 5\nyazdır metin\n"), "5\n");
}

#[test]
fn file_natives_round_trip() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    };
    let path = script_path(&dir.path().join("not.txt"));
    let source = format!(
        r#"
yazdır dosya_yaz("{path}", "bir")
yazdır dosya_ekle("{path}", " iki")
yazdır dosya_oku("{path}")
yazdır dosya_oku("{path}.yok") == ""
yazdır dosya_yaz(1, "x")
"#
    );
    assert_eq!(output_of(&source), "dogru\ndogru\nbir iki\ndogru\nyanlis\n");
}

#[test]
fn include_runs_the_file_against_the_globals() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    };
    let lib = "\u{feff}değişken pi = 3\nfonksiyon iki_kat(x) { dön x * 2 }\nyazdır \"yüklendi\"\n";
    if let Err(err) = std::fs::write(dir.path().join("mat.gd"), lib) {
        panic!("write: {err}");
    }

    let mut interp = interpreter_searching(dir.path());
    let source = r#"
yazdır dahil_et("mat.gd")
yazdır dahil_et("mat.gd")
yazdır iki_kat(pi)
"#;
    if let Err(err) = run_in(&mut interp, source) {
        panic!("program failed: {err:?}");
    }
    assert_eq!(interp.print_handler().output(), "yüklendi\ndogru\ndogru\n6\n");
    assert!(interp.is_loaded("mat.gd"));
    assert!(interp.take_diagnostics().is_empty());
}

#[test]
fn include_inside_a_function_still_defines_globals() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    };
    if let Err(err) = std::fs::write(dir.path().join("a.gd"), "değişken g = 1\n") {
        panic!("write: {err}");
    }
    let mut interp = interpreter_searching(dir.path());
    let source = "fonksiyon yukle() {\n    değişken g = 0\n    dahil_et(\"a.gd\")\n    dön g\n}\nyazdır yukle()\nyazdır g\n";
    if let Err(err) = run_in(&mut interp, source) {
        panic!("program failed: {err:?}");
    }
    assert_eq!(interp.print_handler().output(), "0\n1\n");
}

#[test]
fn missing_include_is_reported_not_raised() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    };
    let mut interp = interpreter_searching(dir.path());
    if let Err(err) = run_in(&mut interp, "\nyazdır dahil_et(\"yok.gd\")\n") {
        panic!("program failed: {err:?}");
    }
    assert_eq!(interp.print_handler().output(), "yanlis\n");

    let diagnostics = interp.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::ImportError);
    assert_eq!(diagnostics[0].message, "Modul bulunamadi: yok.gd");
    assert_eq!(diagnostics[0].line, 2);
    assert!(!interp.is_loaded("yok.gd"));
}

#[test]
fn failing_include_reports_the_cause_with_its_file() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    };
    if let Err(err) = std::fs::write(dir.path().join("bozuk.gd"), "yazdır 1\nyazdır 1 / 0\n") {
        panic!("write: {err}");
    }
    let mut interp = interpreter_searching(dir.path());
    if let Err(err) = run_in(&mut interp, "yazdır dahil_et(\"bozuk.gd\")\n") {
        panic!("program failed: {err:?}");
    }
    assert_eq!(interp.print_handler().output(), "1\nyanlis\n");

    let diagnostics = interp.take_diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].message, "Modul yuklenirken hata: bozuk.gd");
    assert_eq!(diagnostics[1].kind, DiagnosticKind::RuntimeError);
    assert_eq!(diagnostics[1].line, 2);
    assert_eq!(diagnostics[1].file.as_deref(), Some("bozuk.gd"));
    assert_eq!(interp.current_env(), interp.globals());
}

#[test]
fn include_with_syntax_errors_does_not_run() {
    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(err) => panic!("tempdir: {err}"),
    };
    if let Err(err) = std::fs::write(dir.path().join("s.gd"), "yazdır \"x\"\ndeğişken = \n") {
        panic!("write: {err}");
    }
    let mut interp = interpreter_searching(dir.path());
    if let Err(err) = run_in(&mut interp, "yazdır dahil_et(\"s.gd\")\n") {
        panic!("program failed: {err:?}");
    }
    assert_eq!(interp.print_handler().output(), "yanlis\n");
    let diagnostics = interp.take_diagnostics();
    assert!(diagnostics.len() >= 2);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::ImportError);
    assert!(diagnostics[1..].iter().all(|d| d.file.as_deref() == Some("s.gd")));
}
