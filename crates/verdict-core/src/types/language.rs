//! Language tags inferred from file extensions.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Language tag attached to extracted evidence snippets.
///
/// Inferred from the file extension via a fixed lookup table; unknown
/// extensions map to [`Language::Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    JavaScript,
    Rust,
    Python,
    Java,
    Go,
    Ruby,
    Php,
    CSharp,
    C,
    Cpp,
    Swift,
    Kotlin,
    Css,
    Html,
    Json,
    Toml,
    Yaml,
    Markdown,
    Sql,
    Shell,
    #[default]
    Text,
}

impl Language {
    /// Infer the language from a file path's extension.
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        Self::from_extension(ext)
    }

    /// Map a file extension (without the dot) to a language tag.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "ts" | "tsx" | "mts" | "cts" => Self::TypeScript,
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "rs" => Self::Rust,
            "py" | "pyi" => Self::Python,
            "java" => Self::Java,
            "go" => Self::Go,
            "rb" => Self::Ruby,
            "php" => Self::Php,
            "cs" => Self::CSharp,
            "c" | "h" => Self::C,
            "cpp" | "cc" | "cxx" | "hpp" => Self::Cpp,
            "swift" => Self::Swift,
            "kt" | "kts" => Self::Kotlin,
            "css" | "scss" | "less" => Self::Css,
            "html" | "htm" | "vue" | "svelte" => Self::Html,
            "json" => Self::Json,
            "toml" => Self::Toml,
            "yaml" | "yml" => Self::Yaml,
            "md" | "markdown" => Self::Markdown,
            "sql" => Self::Sql,
            "sh" | "bash" | "zsh" => Self::Shell,
            _ => Self::Text,
        }
    }

    /// Short tag used for markdown code fences.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::Java => "java",
            Self::Go => "go",
            Self::Ruby => "ruby",
            Self::Php => "php",
            Self::CSharp => "csharp",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::Swift => "swift",
            Self::Kotlin => "kotlin",
            Self::Css => "css",
            Self::Html => "html",
            Self::Json => "json",
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Markdown => "markdown",
            Self::Sql => "sql",
            Self::Shell => "shell",
            Self::Text => "text",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_from_path() {
        assert_eq!(Language::from_path("src/components/Toggle.tsx"), Language::TypeScript);
        assert_eq!(Language::from_path("lib/util.mjs"), Language::JavaScript);
        assert_eq!(Language::from_path("src/lib.rs"), Language::Rust);
        assert_eq!(Language::from_path("noextension"), Language::Text);
        assert_eq!(Language::from_path("weird.xyz"), Language::Text);
    }
}
