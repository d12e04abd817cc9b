//! 结果渲染
//!
//! 把不透明的响应体转成终端可读的文本。已知字段按段落输出，其余原样打印 JSON。

use serde_json::Value;

/// 按顺序展示的已知文本字段
const TEXT_SECTIONS: &[(&str, &str)] = &[
    ("explanation", "Explanation"),
    ("solution_code", "Solution"),
    ("improved_code", "Improved code"),
];

/// 按顺序展示的已知列表字段
const LIST_SECTIONS: &[(&str, &str)] = &[
    ("improvement_points", "Improvement points"),
    ("additional_resources", "Additional resources"),
];

/// 渲染响应体
pub fn render_body(body: &Value) -> String {
    let object = match body {
        Value::String(s) => return s.clone(),
        Value::Object(map) => map,
        other => return pretty(other),
    };

    let mut parts = Vec::new();

    // 代码分析的结果包在 result 字段里
    if let Some(result) = object.get("result") {
        parts.push(format!("Result:\n{}", as_text(result)));
    }

    for (key, title) in TEXT_SECTIONS {
        if let Some(text) = object.get(*key).and_then(Value::as_str) {
            if !text.is_empty() {
                parts.push(format!("{}:\n{}", title, text));
            }
        }
    }

    for (key, title) in LIST_SECTIONS {
        if let Some(items) = object.get(*key).and_then(Value::as_array) {
            if !items.is_empty() {
                let lines: Vec<String> = items.iter().map(|item| format!("  - {}", as_text(item))).collect();
                parts.push(format!("{}:\n{}", title, lines.join("\n")));
            }
        }
    }

    if parts.is_empty() {
        pretty(body)
    } else {
        parts.join("\n\n")
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => pretty(other),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
