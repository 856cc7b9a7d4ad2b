use std::path::Path;

/// File names that imply a language whatever their extension. Matched exactly.
fn special_file(name: &str) -> Option<&'static str> {
    let lang = match name {
        "Dockerfile" => "Docker",
        "Makefile" => "Make",
        "CMakeLists.txt" => "CMake",
        "Vagrantfile" | "Gemfile" | "Rakefile" => "Ruby",
        _ => return None,
    };
    Some(lang)
}

/// `ext` is lowercase and includes the leading dot.
fn extension_language(ext: &str) -> Option<&'static str> {
    let lang = match ext {
        ".py" | ".pyi" => "Python",
        ".js" | ".mjs" | ".cjs" => "JavaScript",
        ".ts" | ".mts" => "TypeScript",
        ".jsx" => "React JSX",
        ".tsx" => "React TSX",
        ".java" => "Java",
        ".go" => "Go",
        ".rs" => "Rust",
        ".rb" => "Ruby",
        ".php" => "PHP",
        ".c" => "C",
        ".h" => "C/C++",
        ".cpp" | ".cc" | ".cxx" | ".hpp" => "C++",
        ".cs" => "C#",
        ".swift" => "Swift",
        ".kt" | ".kts" => "Kotlin",
        ".scala" => "Scala",
        ".r" => "R",
        ".sh" | ".bash" | ".zsh" => "Shell",
        ".html" | ".htm" => "HTML",
        ".css" => "CSS",
        ".scss" => "SCSS",
        ".sass" => "Sass",
        ".less" => "Less",
        ".sql" => "SQL",
        ".yaml" | ".yml" => "YAML",
        ".json" => "JSON",
        ".xml" => "XML",
        ".md" | ".mdx" => "Markdown",
        ".toml" => "TOML",
        ".lua" => "Lua",
        ".dart" => "Dart",
        ".ex" | ".exs" => "Elixir",
        ".erl" => "Erlang",
        ".hs" => "Haskell",
        ".ml" => "OCaml",
        ".clj" => "Clojure",
        ".vue" => "Vue",
        ".svelte" => "Svelte",
        ".tf" => "Terraform",
        ".proto" => "Protobuf",
        ".graphql" | ".gql" => "GraphQL",
        ".dockerfile" => "Docker",
        _ => return None,
    };
    Some(lang)
}

/// Map a repository path to a language label.
///
/// Exact file names win over extensions; extensions compare case-insensitively.
/// Paths with no recognizable name or extension yield `None`.
pub fn detect_language(path: &str) -> Option<&'static str> {
    let path = Path::new(path);
    let name = path.file_name()?.to_str()?;
    if let Some(lang) = special_file(name) {
        return Some(lang);
    }
    let ext = path.extension()?.to_str()?;
    extension_language(&format!(".{}", ext.to_lowercase()))
}
