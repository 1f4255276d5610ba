use console::style;
use rust_decimal::Decimal;

/// Defines different styles for text elements.
pub enum StyleType {
    Value,
    Notice,
    Error,
}

/// Applies a consistent style to a string. Styling is dropped when stdout is
/// not a terminal, so piped output stays a bare number.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Value => style(text).green().bold(),
        StyleType::Notice => style(text).dim(),
        StyleType::Error => style(text).red(),
    };
    styled.to_string()
}

/// Quotes are printed without trailing zeros: `452.3100` becomes `452.31`.
pub fn format_quote(quote: Decimal) -> String {
    quote.normalize().to_string()
}

pub fn print_quote(quote: Decimal) {
    println!("{}", style_text(&format_quote(quote), StyleType::Value));
}

pub fn print_notice(message: &str) {
    println!("{}", style_text(message, StyleType::Notice));
}

pub fn print_error(message: &str) {
    eprintln!("{}", style_text(message, StyleType::Error));
}
