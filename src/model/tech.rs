//! 技术栈分类
//!
//! 按 URL 模式（可选响应头）把远端主机归类到已知服务/技术栈。
//! 纯函数：同一 URL 永远得到同一分类。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

use super::request::Headers;

/// 技术栈大类（用于节点着色与类型推导）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechCategory {
    Cdn,
    Api,
    Analytics,
    Font,
    Cloud,
    Dev,
    Generic,
}

/// 远端主机的技术栈标签。记录创建后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechStack {
    pub name: String,
    pub color: String,
    pub category: TechCategory,
}

impl TechStack {
    fn new(name: &str, color: &str, category: TechCategory) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            category,
        }
    }
}

struct TechPattern {
    pattern: Regex,
    name: &'static str,
    color: &'static str,
    category: TechCategory,
}

macro_rules! tech_patterns {
    ($(($re:literal, $name:literal, $color:literal, $cat:ident)),+ $(,)?) => {
        vec![
            $(TechPattern {
                pattern: Regex::new($re).expect("static tech pattern"),
                name: $name,
                color: $color,
                category: TechCategory::$cat,
            }),+
        ]
    };
}

static TECH_PATTERNS: LazyLock<Vec<TechPattern>> = LazyLock::new(|| {
    tech_patterns![
        // CDN
        (r"(?i)cdn\.jsdelivr\.net", "jsDelivr", "#e84d3d", Cdn),
        (r"(?i)cdnjs\.cloudflare\.com", "cdnjs", "#f48942", Cdn),
        (r"(?i)unpkg\.com", "unpkg", "#fff", Cdn),
        (r"(?i)fastly", "Fastly", "#ff282d", Cdn),
        (r"(?i)akamai", "Akamai", "#009bde", Cdn),
        (r"(?i)cloudfront\.net", "CloudFront", "#f79400", Cdn),
        // 字体（放在泛 googleapis 之前，否则会被吞掉）
        (
            r"(?i)fonts\.googleapis\.com|fonts\.gstatic\.com",
            "Google Fonts",
            "#4285f4",
            Font
        ),
        // 云厂商
        (r"(?i)cloudflare", "Cloudflare", "#f38020", Cloud),
        (r"(?i)amazonaws\.com|aws\.", "AWS", "#ff9900", Cloud),
        (r"(?i)azure", "Azure", "#0089d6", Cloud),
        (r"(?i)googleapis\.com", "Google APIs", "#4285f4", Api),
        (r"(?i)gstatic\.com", "Google Static", "#4285f4", Cdn),
        (r"(?i)firebase", "Firebase", "#ffca28", Cloud),
        (r"(?i)vercel", "Vercel", "#fff", Cloud),
        (r"(?i)netlify", "Netlify", "#00c7b7", Cloud),
        // API 服务
        (
            r"(?i)api\.github\.com|github\.com|github\.io|githubusercontent",
            "GitHub",
            "#f0f6fc",
            Api
        ),
        (r"(?i)gitlab", "GitLab", "#fc6d26", Api),
        (r"(?i)jsonplaceholder", "JSONPlaceholder", "#22c55e", Api),
        (r"(?i)httpbin", "HTTPBin", "#73dc8c", Api),
        (r"(?i)dummyjson", "DummyJSON", "#ef4444", Api),
        (r"(?i)openai", "OpenAI", "#10a37f", Api),
        (r"(?i)stripe", "Stripe", "#635bff", Api),
        // 统计与追踪
        (
            r"(?i)google-analytics|googletagmanager|analytics\.google",
            "Google Analytics",
            "#e37400",
            Analytics
        ),
        (r"(?i)sentry", "Sentry", "#362d59", Analytics),
        (r"(?i)segment", "Segment", "#52bd94", Analytics),
        (r"(?i)mixpanel", "Mixpanel", "#7856ff", Analytics),
        // 泛 Google 放在具体子域之后
        (r"(?i)google\.com|google\.", "Google", "#4285f4", Api),
        // 开发环境
        (r"(?i)localhost|127\.0\.0\.1|0\.0\.0\.0", "Localhost", "#a78bfa", Dev),
        (r"(?i)hot-update", "HMR", "#f59e0b", Dev),
    ]
});

static EXT_FONTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(woff2?|ttf|otf|eot)(\?|$)").expect("static pattern"));
static EXT_IMAGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(png|jpe?g|gif|svg|webp|ico|avif)(\?|$)").expect("static pattern")
});
static EXT_STYLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(css)(\?|$)").expect("static pattern"));
static EXT_SCRIPTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(js|mjs|ts)(\?|$)").expect("static pattern"));

/// 根据 URL（可选响应头）推导技术栈标签。
///
/// 顺序：已知服务模式 → 响应头提示 → 文件扩展名 → 通用 Server 兜底。
pub fn detect_tech(url: &str, response_headers: Option<&Headers>) -> TechStack {
    for p in TECH_PATTERNS.iter() {
        if p.pattern.is_match(url) {
            return TechStack::new(p.name, p.color, p.category);
        }
    }

    if let Some(headers) = response_headers
        && let Some(server) = headers.get("server")
        && server.to_ascii_lowercase().contains("cloudflare")
    {
        return TechStack::new("Cloudflare", "#f38020", TechCategory::Cloud);
    }

    if EXT_FONTS.is_match(url) {
        return TechStack::new("Fonts", "#e879f9", TechCategory::Font);
    }
    if EXT_IMAGES.is_match(url) {
        return TechStack::new("Images", "#fb923c", TechCategory::Cdn);
    }
    if EXT_STYLES.is_match(url) {
        return TechStack::new("Styles", "#38bdf8", TechCategory::Cdn);
    }
    if EXT_SCRIPTS.is_match(url) {
        return TechStack::new("Scripts", "#facc15", TechCategory::Cdn);
    }

    TechStack::new("Server", "#94a3b8", TechCategory::Generic)
}

/// 从 URL 提取主机名；解析失败时返回 "unknown" 哨兵，从不报错。
pub fn hostname_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "unknown".to_string())
}
