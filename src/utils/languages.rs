//! 编程语言目录
//!
//! 服务端支持的语言列表，以及从文件名推断语言。

use std::path::Path;

use crate::models::DEFAULT_LANGUAGE;

/// 服务端支持的编程语言
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "python", "javascript", "typescript", "java", "c", "cpp", "csharp", "go", "ruby", "php",
    "swift", "kotlin", "rust", "scala", "perl", "html", "css", "sql",
];

/// 各语言的文件扩展名
const LANGUAGE_EXTENSIONS: &[(&str, &[&str])] = &[
    ("python", &["py", "pyw", "pyx"]),
    ("javascript", &["js", "jsx", "mjs"]),
    ("typescript", &["ts", "tsx"]),
    ("java", &["java"]),
    ("c", &["c", "h"]),
    ("cpp", &["cpp", "hpp", "cc", "hh", "cxx", "hxx"]),
    ("csharp", &["cs"]),
    ("go", &["go"]),
    ("ruby", &["rb"]),
    ("php", &["php"]),
    ("swift", &["swift"]),
    ("kotlin", &["kt", "kts"]),
    ("rust", &["rs"]),
    ("scala", &["scala"]),
    ("perl", &["pl", "pm"]),
    ("html", &["html", "htm"]),
    ("css", &["css", "scss", "sass", "less"]),
    ("sql", &["sql"]),
];

/// 是否为服务端支持的语言
pub fn is_supported_language(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

/// 从文件名推断编程语言，无法推断时返回默认语言
pub fn detect_language_from_filename(filename: &str) -> &'static str {
    let Some(ext) = Path::new(filename).extension().and_then(|e| e.to_str()) else {
        return DEFAULT_LANGUAGE;
    };
    let ext = ext.to_lowercase();

    LANGUAGE_EXTENSIONS
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(language, _)| *language)
        .unwrap_or(DEFAULT_LANGUAGE)
}
