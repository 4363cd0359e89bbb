//! Shared markup helpers.

/// Escape special HTML characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b class=\"x\">"), "&lt;b class=&quot;x&quot;&gt;");
        assert_eq!(escape_html("Tom & Jerry's"), "Tom &amp; Jerry&#x27;s");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_escape_html_attribute_breakout() {
        let class = "wide\" onclick=\"alert('x')";

        assert_eq!(
            format!("<div class=\"{}\">", escape_html(class)),
            "<div class=\"wide&quot; onclick=&quot;alert(&#x27;x&#x27;)\">"
        );
    }
}
