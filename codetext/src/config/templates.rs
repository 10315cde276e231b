//! Built-in language templates.

use once_cell::sync::Lazy;

use super::language::{Comment, Language, Placement};

fn ids(identifiers: &[&str]) -> Vec<String> {
    identifiers.iter().map(|id| id.to_string()).collect()
}

/// Built-in language configurations, lazily initialized.
static BUILTIN_LANGUAGES: Lazy<Vec<Language>> = Lazy::new(|| {
    let c_block = || Comment::line("//").with_block("/*", " *", " */");
    vec![
        // C-style languages
        Language::new("c", c_block())
            .with_identifiers(ids(&["h"]))
            .with_function(
                r"^\s*(?:static\s+|inline\s+)*[\w\*]+[\s\*]+(?P<name>\w+)\s*\([^;]*$",
                Placement::Before,
            ),
        Language::new("cpp", c_block())
            .with_identifiers(ids(&["c++", "cxx", "cc", "hpp"]))
            .with_function(
                r"^\s*(?:static\s+|inline\s+|virtual\s+)*[\w:<>\*&]+[\s\*&]+(?P<name>[\w:~]+)\s*\([^;]*$",
                Placement::Before,
            ),
        Language::new("java", c_block()).with_function(
            r"^\s*(?:(?:public|private|protected|static|final|abstract)\s+)+[\w<>\[\]]+\s+(?P<name>\w+)\s*\(",
            Placement::Before,
        ),
        Language::new("javascript", c_block())
            .with_identifiers(ids(&["js", "mjs"]))
            .with_function(r"^\s*(?:async\s+)?function\s*\*?\s*(?P<name>\w+)", Placement::Before),
        Language::new("typescript", c_block())
            .with_identifiers(ids(&["ts"]))
            .with_function(
                r"^\s*(?:export\s+)?(?:async\s+)?function\s*\*?\s*(?P<name>\w+)",
                Placement::Before,
            ),
        Language::new("rust", Comment::line("//"))
            .with_identifiers(ids(&["rs"]))
            .with_function(
                r"^\s*(?:pub(?:\([\w:]+\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?fn\s+(?P<name>\w+)",
                Placement::Before,
            ),
        Language::new("go", Comment::line("//"))
            .with_function(r"^\s*func\s+(?:\([^)]*\)\s*)?(?P<name>\w+)", Placement::Before),
        Language::new("swift", Comment::line("//")),
        Language::new("kotlin", Comment::line("//")).with_identifiers(ids(&["kt"])),
        Language::new("scala", Comment::line("//")),
        Language::new("csharp", c_block()).with_identifiers(ids(&["cs", "c#"])),

        // Shell-style languages
        Language::new(
            "python",
            Comment::line("#")
                .with_block("\"\"\"", "", "\"\"\"")
                .with_indent("    "),
        )
        .with_identifiers(ids(&["py", "python3"]))
        .with_function(r"^\s*(?:async\s+)?def\s+(?P<name>\w+)", Placement::After),
        Language::new("ruby", Comment::line("#"))
            .with_identifiers(ids(&["rb"]))
            .with_function(r"^\s*def\s+(?:self\.)?(?P<name>\w+[?!]?)", Placement::Before),
        Language::new("perl", Comment::line("#")).with_identifiers(ids(&["pl"])),
        Language::new("bash", Comment::line("#"))
            .with_identifiers(ids(&["sh", "shell", "zsh"]))
            .with_function(r"^\s*(?:function\s+)?(?P<name>\w+)\s*\(\)", Placement::Before),
        Language::new("r", Comment::line("#")),
        Language::new("julia", Comment::line("#"))
            .with_identifiers(ids(&["jl"]))
            .with_function(r"^\s*function\s+(?P<name>\w+)", Placement::Before),
        Language::new("yaml", Comment::line("#")).with_identifiers(ids(&["yml"])),
        Language::new("toml", Comment::line("#")),
        Language::new("make", Comment::line("#")).with_identifiers(ids(&["makefile", "mk"])),
        Language::new("dockerfile", Comment::line("#")).with_identifiers(ids(&["docker"])),

        // Lisp-style languages
        Language::new("lisp", Comment::line(";")).with_identifiers(ids(&["cl", "el", "elisp"])),
        Language::new("scheme", Comment::line(";")).with_identifiers(ids(&["scm"])),
        Language::new("clojure", Comment::line(";")).with_identifiers(ids(&["clj", "cljs"])),

        // ML-style languages
        Language::new("haskell", Comment::line("--")).with_identifiers(ids(&["hs"])),
        Language::new("ocaml", Comment::default().with_block("(*", "", "*)"))
            .with_identifiers(ids(&["ml"])),

        // Web languages
        Language::new("html", Comment::default().with_block("<!--", "", "-->"))
            .with_identifiers(ids(&["htm"])),
        Language::new("css", Comment::default().with_block("/*", "", "*/")),

        // Other languages
        Language::new("sql", Comment::line("--")),
        Language::new("lua", Comment::line("--"))
            .with_function(r"^\s*(?:local\s+)?function\s+(?P<name>[\w.:]+)", Placement::Before),
        Language::new("zig", Comment::line("//")),
        Language::new("tex", Comment::line("%")).with_identifiers(ids(&["latex"])),
        Language::new("fortran", Comment::line("!")).with_identifiers(ids(&["f90", "f95"])),
    ]
});

/// Returns the list of built-in language configurations.
pub fn builtin_languages() -> &'static [Language] {
    &BUILTIN_LANGUAGES
}

/// Find a language by name or identifier.
pub fn find_language(identifier: &str) -> Option<Language> {
    builtin_languages()
        .iter()
        .find(|lang| lang.matches(identifier))
        .cloned()
}
