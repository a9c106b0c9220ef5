//! Numeric display formatting
//!
//! Every numeric cell renders with exactly two decimal places and thousands
//! grouping ("28,395.00"). Missing and falsy values (zero, NaN) render as
//! the literal "N/A".

/// Format a number with two decimals and comma grouping. Zero and NaN count
/// as missing and render "N/A".
pub fn format_number(value: f64) -> String {
    if value == 0.0 || value.is_nan() {
        return "N/A".to_string();
    }

    let negative = value < 0.0;
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Format an optional number, rendering missing values as "N/A"
pub fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(v) => format_number(v),
        None => "N/A".to_string(),
    }
}
