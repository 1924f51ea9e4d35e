use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::config::Theme;
use crate::provider::ModelInfo;

const INDENT: &str = "      ";

/// Format token count in a human-friendly way (e.g., 192K, 1M)
pub fn format_tokens(tokens: u32) -> String {
    if tokens >= 1_000_000 {
        format!("{}M", tokens / 1_000_000)
    } else if tokens >= 1_000 {
        format!("{}K", tokens / 1_000)
    } else {
        format!("{}", tokens)
    }
}

/// Price per million tokens, e.g. "$0.30/M"
pub fn format_price(price: f64) -> String {
    format!("${:.2}/M", price)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

/// Lines describing the selected model
pub fn model_info_lines(info: &ModelInfo, theme: &Theme) -> Vec<Line<'static>> {
    let muted = theme.muted_style();
    let value = Style::default().fg(theme.colors.info.to_color());

    let mut lines = Vec::new();

    if !info.description.is_empty() {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled(info.description.clone(), value),
        ]));
    }

    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled("Context: ", muted),
        Span::styled(format_tokens(info.context_window), value),
        Span::styled("  Max output: ", muted),
        Span::styled(format_tokens(info.max_tokens), value),
    ]));

    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled("Images: ", muted),
        Span::styled(yes_no(info.supports_images), value),
        Span::styled("  Prompt cache: ", muted),
        Span::styled(yes_no(info.supports_prompt_cache), value),
    ]));

    lines.push(Line::from(vec![
        Span::raw(INDENT),
        Span::styled("Input: ", muted),
        Span::styled(format_price(info.input_price), value),
        Span::styled("  Output: ", muted),
        Span::styled(format_price(info.output_price), value),
    ]));

    if let (Some(writes), Some(reads)) = (info.cache_writes_price, info.cache_reads_price) {
        lines.push(Line::from(vec![
            Span::raw(INDENT),
            Span::styled("Cache writes: ", muted),
            Span::styled(format_price(writes), value),
            Span::styled("  Cache reads: ", muted),
            Span::styled(format_price(reads), value),
        ]));
    }

    lines
}
