use crate::domain::model::Span;
use regex::Regex;
use std::sync::LazyLock;

// 依序嘗試：粗體、行內程式碼、連結、斜體。同一位置以最左側的分支優先
static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\*\*(?P<bold>.+?)\*\*|`(?P<code>[^`]+)`|\[(?P<label>[^\]]+)\]\((?P<url>[^)\s]+)\)|\*(?P<italic>[^*\s](?:[^*]*[^*\s])?)\*",
    )
    .expect("valid inline pattern")
});

/// 把一行文字切成格式片段；未成對的標記保留原文
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in INLINE.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            spans.push(Span::plain(&text[cursor..whole.start()]));
        }

        let span = if let Some(m) = caps.name("bold") {
            Span::bold(m.as_str())
        } else if let Some(m) = caps.name("code") {
            Span {
                text: m.as_str().to_string(),
                code: true,
                ..Span::default()
            }
        } else if let (Some(label), Some(url)) = (caps.name("label"), caps.name("url")) {
            Span {
                text: label.as_str().to_string(),
                link: Some(url.as_str().to_string()),
                ..Span::default()
            }
        } else if let Some(m) = caps.name("italic") {
            Span {
                text: m.as_str().to_string(),
                italic: true,
                ..Span::default()
            }
        } else {
            Span::plain(whole.as_str())
        };

        spans.push(span);
        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(Span::plain(&text[cursor..]));
    }

    spans
}
