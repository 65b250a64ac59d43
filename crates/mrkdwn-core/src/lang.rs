use std::fmt;

/// Languages the highlighter knows how to colour.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Rust,
    Go,
    Java,
    Css,
    Html,
    Json,
    Bash,
    Sql,
}

/// Line comment introducers, each limited to the languages that use it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineComment {
    /// `#`, at line start or after whitespace.
    Hash,
    /// `//`, unless it follows a colon as in `https://`.
    DoubleSlash,
    /// `--`.
    DoubleDash,
}

/// How a single-quoted run is read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SingleQuote {
    String,
    /// Character literals only, so lifetimes such as `'a` stay untouched.
    Char,
}

#[derive(Debug)]
pub struct LanguageDefinition {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub builtins: &'static [&'static str],
    pub literals: &'static [&'static str],
    pub line_comments: &'static [LineComment],
    pub single_quote: SingleQuote,
    pub template_strings: bool,
    pub triple_quoted_strings: bool,
    /// Literals, keywords and builtins match regardless of case.
    pub case_insensitive: bool,
}

impl Language {
    pub const ALL: [Language; 11] = [
        Language::JavaScript,
        Language::TypeScript,
        Language::Python,
        Language::Rust,
        Language::Go,
        Language::Java,
        Language::Css,
        Language::Html,
        Language::Json,
        Language::Bash,
        Language::Sql,
    ];

    pub fn name(self) -> &'static str {
        self.definition().name
    }

    pub fn definition(self) -> &'static LanguageDefinition {
        match self {
            Language::JavaScript => &JAVASCRIPT,
            Language::TypeScript => &TYPESCRIPT,
            Language::Python => &PYTHON,
            Language::Rust => &RUST,
            Language::Go => &GO,
            Language::Java => &JAVA,
            Language::Css => &CSS,
            Language::Html => &HTML,
            Language::Json => &JSON,
            Language::Bash => &BASH,
            Language::Sql => &SQL,
        }
    }

    /// Looks up a canonical name such as `python`.
    pub fn from_name(name: &str) -> Option<Language> {
        Language::ALL
            .into_iter()
            .find(|language| language.name() == name)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const ALIASES: &[(&str, Language)] = &[
    ("js", Language::JavaScript),
    ("jsx", Language::JavaScript),
    ("mjs", Language::JavaScript),
    ("cjs", Language::JavaScript),
    ("node", Language::JavaScript),
    ("ts", Language::TypeScript),
    ("tsx", Language::TypeScript),
    ("py", Language::Python),
    ("python3", Language::Python),
    ("rs", Language::Rust),
    ("golang", Language::Go),
    ("sh", Language::Bash),
    ("shell", Language::Bash),
    ("zsh", Language::Bash),
    ("console", Language::Bash),
    ("md", Language::Bash),
    ("yml", Language::Bash),
    ("yaml", Language::Bash),
    ("mysql", Language::Sql),
    ("postgres", Language::Sql),
    ("postgresql", Language::Sql),
    ("psql", Language::Sql),
    ("sqlite", Language::Sql),
    ("htm", Language::Html),
    ("xml", Language::Html),
    ("svg", Language::Html),
    ("scss", Language::Css),
];

/// Resolves a fence tag or hint to a language: aliases first, then
/// canonical names. Matching ignores case and surrounding whitespace.
pub fn resolve_language(hint: &str) -> Option<Language> {
    let hint = hint.trim().to_ascii_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == hint)
        .map(|(_, language)| *language)
        .or_else(|| Language::from_name(&hint))
}

const C_STYLE: &[LineComment] = &[LineComment::DoubleSlash];
const HASH: &[LineComment] = &[LineComment::Hash];

static JAVASCRIPT: LanguageDefinition = LanguageDefinition {
    name: "javascript",
    keywords: &[
        "abstract", "arguments", "async", "await", "boolean", "break", "byte", "case", "catch",
        "char", "class", "const", "continue", "debugger", "default", "delete", "do", "double",
        "else", "enum", "eval", "export", "extends", "final", "finally", "float", "for", "from",
        "function", "goto", "if", "implements", "import", "in", "instanceof", "int", "interface",
        "let", "long", "native", "new", "null", "of", "package", "private", "protected", "public",
        "return", "short", "static", "super", "switch", "synchronized", "this", "throw", "throws",
        "transient", "try", "typeof", "undefined", "var", "void", "volatile", "while", "with",
        "yield",
    ],
    builtins: &[
        "Array", "Boolean", "console", "Date", "document", "Error", "fetch", "JSON", "Map",
        "Math", "Number", "Object", "Promise", "Proxy", "RegExp", "Set", "String", "Symbol",
        "URL", "WeakMap", "WeakSet", "window", "setTimeout", "setInterval", "clearTimeout",
        "clearInterval", "parseInt", "parseFloat", "isNaN", "isFinite", "encodeURI", "decodeURI",
        "require", "module", "exports", "process",
    ],
    literals: &["true", "false", "null", "undefined", "NaN", "Infinity"],
    line_comments: C_STYLE,
    single_quote: SingleQuote::String,
    template_strings: true,
    triple_quoted_strings: false,
    case_insensitive: false,
};

static TYPESCRIPT: LanguageDefinition = LanguageDefinition {
    name: "typescript",
    keywords: &[
        "abstract", "as", "async", "await", "boolean", "break", "case", "catch", "class",
        "const", "continue", "debugger", "declare", "default", "delete", "do", "else", "enum",
        "export", "extends", "finally", "for", "from", "function", "get", "if", "implements",
        "import", "in", "infer", "instanceof", "interface", "is", "keyof", "let", "module",
        "namespace", "never", "new", "null", "of", "package", "private", "protected", "public",
        "readonly", "return", "set", "static", "super", "switch", "this", "throw", "try", "type",
        "typeof", "undefined", "unique", "unknown", "var", "void", "while", "with", "yield",
    ],
    builtins: &[
        "Array", "Boolean", "console", "Date", "document", "Error", "fetch", "JSON", "Map",
        "Math", "Number", "Object", "Promise", "Partial", "Pick", "Omit", "Record", "Required",
        "Readonly", "Proxy", "RegExp", "Set", "String", "Symbol", "URL", "WeakMap", "WeakSet",
        "window", "Exclude", "Extract", "NonNullable", "ReturnType", "InstanceType",
        "Parameters",
    ],
    literals: &["true", "false", "null", "undefined", "NaN", "Infinity"],
    line_comments: C_STYLE,
    single_quote: SingleQuote::String,
    template_strings: true,
    triple_quoted_strings: false,
    case_insensitive: false,
};

static PYTHON: LanguageDefinition = LanguageDefinition {
    name: "python",
    keywords: &[
        "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del",
        "elif", "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is",
        "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with",
        "yield",
    ],
    builtins: &[
        "abs", "all", "any", "bin", "bool", "bytes", "callable", "chr", "classmethod", "compile",
        "complex", "dict", "dir", "divmod", "enumerate", "eval", "exec", "filter", "float",
        "format", "frozenset", "getattr", "globals", "hasattr", "hash", "help", "hex", "id",
        "input", "int", "isinstance", "issubclass", "iter", "len", "list", "locals", "map", "max",
        "memoryview", "min", "next", "object", "oct", "open", "ord", "pow", "print", "property",
        "range", "repr", "reversed", "round", "set", "setattr", "slice", "sorted",
        "staticmethod", "str", "sum", "super", "tuple", "type", "vars", "zip",
    ],
    literals: &["True", "False", "None"],
    line_comments: HASH,
    single_quote: SingleQuote::String,
    template_strings: false,
    triple_quoted_strings: true,
    case_insensitive: false,
};

static RUST: LanguageDefinition = LanguageDefinition {
    name: "rust",
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
        "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait", "type",
        "unsafe", "use", "where", "while",
    ],
    builtins: &[
        "bool", "char", "f32", "f64", "i8", "i16", "i32", "i64", "i128", "isize", "str", "u8",
        "u16", "u32", "u64", "u128", "usize", "Vec", "String", "Option", "Result", "Box", "Rc",
        "Arc", "HashMap", "HashSet", "BTreeMap", "BTreeSet", "println", "eprintln", "format",
        "panic", "assert", "dbg", "todo", "unimplemented",
    ],
    literals: &["true", "false", "None", "Some", "Ok", "Err"],
    line_comments: C_STYLE,
    single_quote: SingleQuote::Char,
    template_strings: false,
    triple_quoted_strings: false,
    case_insensitive: false,
};

static GO: LanguageDefinition = LanguageDefinition {
    name: "go",
    keywords: &[
        "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
        "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
        "return", "select", "struct", "switch", "type", "var",
    ],
    builtins: &[
        "append", "cap", "close", "complex", "copy", "delete", "imag", "len", "make", "new",
        "panic", "print", "println", "real", "recover", "bool", "byte", "complex64",
        "complex128", "error", "float32", "float64", "int", "int8", "int16", "int32", "int64",
        "rune", "string", "uint", "uint8", "uint16", "uint32", "uint64", "uintptr",
    ],
    literals: &["true", "false", "nil", "iota"],
    line_comments: C_STYLE,
    single_quote: SingleQuote::String,
    template_strings: false,
    triple_quoted_strings: false,
    case_insensitive: false,
};

static JAVA: LanguageDefinition = LanguageDefinition {
    name: "java",
    keywords: &[
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
        "const", "continue", "default", "do", "double", "else", "enum", "extends", "final",
        "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
        "interface", "long", "native", "new", "package", "private", "protected", "public",
        "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
        "throw", "throws", "transient", "try", "var", "void", "volatile", "while",
    ],
    builtins: &[
        "System", "String", "Integer", "Boolean", "Long", "Double", "Float", "Character", "Byte",
        "Short", "Object", "Class", "Thread", "Runnable", "Exception", "RuntimeException",
        "ArrayList", "HashMap", "HashSet", "LinkedList", "Collections", "Arrays", "Math",
        "Optional", "Stream", "List", "Map", "Set", "Iterator",
    ],
    literals: &["true", "false", "null"],
    line_comments: C_STYLE,
    single_quote: SingleQuote::String,
    template_strings: false,
    triple_quoted_strings: false,
    case_insensitive: false,
};

static CSS: LanguageDefinition = LanguageDefinition {
    name: "css",
    keywords: &[
        "important", "inherit", "initial", "unset", "revert", "auto", "none", "normal", "block",
        "inline", "flex", "grid", "absolute", "relative", "fixed", "sticky", "static", "hidden",
        "visible", "solid", "dashed", "dotted", "double", "center", "left", "right", "top",
        "bottom", "middle", "baseline", "stretch", "nowrap", "wrap", "row", "column", "ease",
        "linear", "infinite",
    ],
    builtins: &[
        "color", "background", "border", "margin", "padding", "font", "display", "position",
        "width", "height", "max-width", "min-width", "max-height", "min-height", "overflow",
        "text-align", "align-items", "justify-content", "flex-direction", "gap", "opacity",
        "transition", "transform", "animation", "box-shadow", "border-radius", "z-index",
        "cursor", "outline", "content", "grid-template", "visibility", "white-space",
        "word-break", "line-height", "letter-spacing", "text-decoration", "list-style", "float",
        "clear",
    ],
    literals: &[],
    line_comments: &[],
    single_quote: SingleQuote::String,
    template_strings: false,
    triple_quoted_strings: false,
    case_insensitive: false,
};

static HTML: LanguageDefinition = LanguageDefinition {
    name: "html",
    keywords: &[
        "doctype", "html", "head", "body", "div", "span", "p", "a", "img", "ul", "ol", "li",
        "table", "tr", "td", "th", "form", "input", "button", "select", "option", "textarea",
        "h1", "h2", "h3", "h4", "h5", "h6", "header", "footer", "main", "nav", "section",
        "article", "aside", "script", "style", "link", "meta", "title", "class", "id", "href",
        "src", "alt", "type", "name", "value", "placeholder", "action", "method",
    ],
    builtins: &[],
    literals: &["true", "false"],
    line_comments: &[],
    single_quote: SingleQuote::String,
    template_strings: false,
    triple_quoted_strings: false,
    case_insensitive: false,
};

static JSON: LanguageDefinition = LanguageDefinition {
    name: "json",
    keywords: &[],
    builtins: &[],
    literals: &["true", "false", "null"],
    line_comments: &[],
    single_quote: SingleQuote::String,
    template_strings: false,
    triple_quoted_strings: false,
    case_insensitive: false,
};

static BASH: LanguageDefinition = LanguageDefinition {
    name: "bash",
    keywords: &[
        "if", "then", "else", "elif", "fi", "for", "while", "do", "done", "case", "esac", "in",
        "function", "return", "exit", "break", "continue", "local", "export", "readonly",
        "declare", "typeset", "unset", "shift", "source", "alias", "unalias", "trap", "eval",
        "exec", "set",
    ],
    builtins: &[
        "echo", "printf", "read", "cd", "pwd", "ls", "cp", "mv", "rm", "mkdir", "rmdir", "chmod",
        "chown", "cat", "grep", "sed", "awk", "find", "sort", "uniq", "head", "tail", "wc", "cut",
        "paste", "tr", "xargs", "tee", "diff", "tar", "gzip", "curl", "wget", "ssh", "scp", "git",
        "npm", "yarn", "pip", "docker", "kubectl",
    ],
    literals: &["true", "false"],
    line_comments: HASH,
    single_quote: SingleQuote::String,
    template_strings: false,
    triple_quoted_strings: false,
    case_insensitive: false,
};

static SQL: LanguageDefinition = LanguageDefinition {
    name: "sql",
    keywords: &[
        "SELECT", "FROM", "WHERE", "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE",
        "CREATE", "TABLE", "ALTER", "DROP", "INDEX", "VIEW", "JOIN", "INNER", "LEFT", "RIGHT",
        "OUTER", "FULL", "CROSS", "ON", "AND", "OR", "NOT", "IN", "BETWEEN", "LIKE", "IS", "NULL",
        "AS", "ORDER", "BY", "GROUP", "HAVING", "LIMIT", "OFFSET", "UNION", "ALL", "DISTINCT",
        "EXISTS", "CASE", "WHEN", "THEN", "ELSE", "END", "PRIMARY", "KEY", "FOREIGN",
        "REFERENCES", "UNIQUE", "CHECK", "DEFAULT", "CONSTRAINT", "AUTO_INCREMENT", "CASCADE",
        "TRUNCATE", "GRANT", "REVOKE", "BEGIN", "COMMIT", "ROLLBACK", "TRANSACTION",
    ],
    builtins: &[
        "COUNT", "SUM", "AVG", "MIN", "MAX", "COALESCE", "IFNULL", "NULLIF", "CAST", "CONVERT",
        "CONCAT", "LENGTH", "SUBSTRING", "TRIM", "UPPER", "LOWER", "REPLACE", "NOW", "CURDATE",
        "CURTIME", "DATE_FORMAT", "DATEDIFF", "ROUND", "CEIL", "FLOOR", "ABS", "MOD", "POWER",
        "SQRT",
    ],
    literals: &["TRUE", "FALSE", "NULL"],
    line_comments: &[LineComment::DoubleDash],
    single_quote: SingleQuote::String,
    template_strings: false,
    triple_quoted_strings: false,
    case_insensitive: true,
};

#[cfg(test)]
mod tests {
    use super::{Language, resolve_language};

    #[test]
    fn aliases_resolve_to_canonical_languages() {
        assert_eq!(resolve_language("js"), Some(Language::JavaScript));
        assert_eq!(resolve_language("TSX"), Some(Language::TypeScript));
        assert_eq!(resolve_language("py"), Some(Language::Python));
        assert_eq!(resolve_language("zsh"), Some(Language::Bash));
        assert_eq!(resolve_language("postgresql"), Some(Language::Sql));
        assert_eq!(resolve_language("svg"), Some(Language::Html));
        assert_eq!(resolve_language("md"), Some(Language::Bash));
    }

    #[test]
    fn canonical_names_resolve_to_themselves() {
        for language in Language::ALL {
            assert_eq!(resolve_language(language.name()), Some(language));
        }
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(resolve_language("ruby"), None);
        assert_eq!(resolve_language(""), None);
    }

    #[test]
    fn only_sql_is_case_insensitive() {
        for language in Language::ALL {
            assert_eq!(
                language.definition().case_insensitive,
                language == Language::Sql,
                "{}",
                language
            );
        }
    }
}
