//! Terminal utility functions

/// Render a URL as an OSC 8 hyperlink when stdout supports it, plain cyan otherwise.
pub fn terminal_link(url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        format!("\x1b]8;;{url}\x07\x1b[36m{url}\x1b[0m\x1b]8;;\x07")
    } else {
        format!("\x1b[36m{url}\x1b[0m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_link_contains_url_and_color() {
        let url = "http://localhost:5390/?q=next&type=GitHub";
        let result = terminal_link(url);
        assert!(result.contains(url));
        assert!(result.contains("\x1b[36m"));
        assert!(result.ends_with("\x1b[0m") || result.ends_with("\x1b]8;;\x07"));
    }
}
