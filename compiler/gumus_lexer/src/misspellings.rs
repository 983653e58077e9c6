//! Keyword spellings the lexer rejects.
//!
//! Keywords from other languages and ASCII spellings of the Turkish
//! keywords are not identifiers: writing one is a `syntax_error` that
//! names the correct keyword.

/// What to tell the user about a rejected word.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Correction {
    /// `❌ <shown> değil, '<correct>' yazılmalı!`
    Keyword {
        shown: &'static str,
        correct: &'static str,
    },
    /// Loop keywords from other languages.
    Loop,
}

const fn kw(shown: &'static str, correct: &'static str) -> Correction {
    Correction::Keyword { shown, correct }
}

/// Sorted by word for binary search.
const MISSPELLINGS: &[(&str, Correction)] = &[
    ("degilse", kw("'degilse'", "değilse")),
    ("degisken", kw("'degisken'", "değişken")),
    ("dogru", kw("'dogru'", "doğru")),
    ("don", kw("'don'", "dön")),
    ("dongu", kw("'dongu'", "döngü")),
    ("eger", kw("'eger'", "eğer")),
    ("else", kw("'else'", "değilse")),
    ("false", kw("'false'", "yanlış")),
    ("for", Correction::Loop),
    ("func", kw("'function'", "fonksiyon")),
    ("function", kw("'function'", "fonksiyon")),
    ("if", kw("'if'", "eğer")),
    ("kir", kw("'kir'", "kır")),
    ("let", kw("'var' veya 'let'", "değişken")),
    ("loop", Correction::Loop),
    ("modul", kw("'modul'", "modül")),
    ("none", kw("'null' veya 'none'", "boş")),
    ("null", kw("'null' veya 'none'", "boş")),
    ("oz", kw("'oz'", "öz")),
    ("print", kw("'print'", "yazdır")),
    ("return", kw("'return'", "dön")),
    ("sinif", kw("'sinif'", "sınıf")),
    ("true", kw("'true'", "doğru")),
    ("var", kw("'var' veya 'let'", "değişken")),
    ("while", Correction::Loop),
    ("yanlis", kw("'yanlis'", "yanlış")),
    ("yazdir", kw("'yazdir'", "yazdır")),
];

/// Look up a rejected spelling.
///
/// Returns `None` for ordinary identifiers.
pub fn lookup_misspelling(ident: &str) -> Option<Correction> {
    MISSPELLINGS
        .binary_search_by_key(&ident, |&(word, _)| word)
        .ok()
        .map(|idx| MISSPELLINGS[idx].1)
}

#[cfg(test)]
mod tests;
