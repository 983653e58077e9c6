use pretty_assertions::assert_eq;

use super::*;

#[test]
fn buffer_println_appends_newline() {
    let handler = BufferPrintHandler::new();
    handler.println("merhaba");
    assert_eq!(handler.output(), "merhaba\n");
}

#[test]
fn buffer_print_has_no_newline() {
    let handler = BufferPrintHandler::new();
    handler.print("a");
    handler.print("b");
    assert_eq!(handler.output(), "ab");
}

#[test]
fn buffer_clear_empties_output() {
    let handler = buffer_handler();
    handler.println("x");
    handler.clear();
    assert_eq!(handler.output(), "");
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("kayip");
    assert_eq!(silent.output(), "");
    assert_eq!(stdout_handler().output(), "");
}
