//! 端点路径与 URL 构建工具

/// 代码分析
pub const ANALYZE: &str = "/code-analysis/analyze";
/// 代码建议
pub const SUGGEST: &str = "/code-suggestion/suggest";
/// 问题解决
pub const SOLVE: &str = "/problem-solving/solve";
/// 直接提问
pub const ASK: &str = "/direct-question/ask";

/// 健康检查
pub const HEALTH: &str = "/health";
/// 代码复杂度分析
pub const COMPLEXITY: &str = "/code-analysis/complexity";
/// 代码示例
pub const EXAMPLES: &str = "/code-suggestion/examples";
/// 概念讲解
pub const EXPLAIN: &str = "/problem-solving/explain";

/// 修复 base_url
///
/// - 移除首尾空白和末尾斜杠
/// - 修复双斜杠（保留协议部分）
pub fn fix_base_url(base_url: &str) -> String {
    let mut url = base_url.trim().trim_end_matches('/').to_string();

    if let Some(pos) = url.find("://") {
        let (protocol, rest) = url.split_at(pos + 3);
        let mut fixed_rest = rest.to_string();
        while fixed_rest.contains("//") {
            fixed_rest = fixed_rest.replace("//", "/");
        }
        url = format!("{}{}", protocol, fixed_rest);
    }

    url
}

/// 拼接基础 URL 与端点路径
pub fn build_endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", fix_base_url(base_url), path.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_base_url() {
        assert_eq!(fix_base_url("http://localhost:5000/api/"), "http://localhost:5000/api");
        assert_eq!(fix_base_url("http://localhost:5000//api"), "http://localhost:5000/api");
        assert_eq!(fix_base_url(" http://localhost:5000/api "), "http://localhost:5000/api");
    }

    #[test]
    fn test_build_endpoint() {
        assert_eq!(
            build_endpoint("http://localhost:5000/api", ANALYZE),
            "http://localhost:5000/api/code-analysis/analyze"
        );
        assert_eq!(
            build_endpoint("http://localhost:5000/api/", "direct-question/ask"),
            "http://localhost:5000/api/direct-question/ask"
        );
        assert_eq!(
            build_endpoint("http://127.0.0.1:8080", HEALTH),
            "http://127.0.0.1:8080/health"
        );
    }
}
