//! Interactive prompt.

use std::io::BufRead;

use gumus_diagnostic::DiagnosticEmitter;

use crate::Session;

pub const BANNER: &str = "\
Turkce Programlama Dili (GumusDil) - Kodlamaya Hos Geldiniz!
Cikmak icin CTRL+C veya dosya sonu (EOF) gonderin.
--------------------------------------------------";

pub const PROMPT: &str = "> ";

/// Read-eval-print loop over `input` until end of input.
///
/// Every line is its own unit. Errors are reported and the loop goes on;
/// blank lines are skipped.
pub fn run_prompt(
    session: &mut Session,
    input: impl BufRead,
    emitter: &mut dyn DiagnosticEmitter,
) -> std::io::Result<()> {
    let output = session.interpreter().print_handler().clone();
    output.println(BANNER);

    let mut lines = input.lines();
    loop {
        output.print(PROMPT);
        output.flush();
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        session.run_source(&line, emitter);
    }
    output.println("");
    Ok(())
}
