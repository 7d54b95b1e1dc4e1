//! Display formatting shared by the CLI tables and the web payloads.

/// Group digits in threes with `.` as the separator: `15000` → `15.000`.
pub fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Two-decimal rendering used for mean values on the bar labels.
pub fn two_decimals(value: f64) -> String {
    format!("{:.2}", value)
}

/// Escape text for interpolation into popup HTML.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1.000");
        assert_eq!(thousands(15000), "15.000");
        assert_eq!(thousands(1234567), "1.234.567");
    }

    #[test]
    fn test_two_decimals() {
        assert_eq!(two_decimals(11.0), "11.00");
        assert_eq!(two_decimals(2.346), "2.35");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & Jerry's <Grill>"), "Tom &amp; Jerry&#39;s &lt;Grill&gt;");
    }
}
