// File: crates/chart-core/src/format.rs
// Summary: Number formatting for tooltips and tick labels (thousands grouping, fixed decimals).

/// Fixed `decimals`, thousands separated by commas: `1234.5, 2 -> "1,234.50"`.
pub fn grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    // "-0.00" reads as "0.00"
    if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Grouped with the shortest exact decimal form: `1234 -> "1,234"`, `12.5 -> "12.5"`.
pub fn grouped_auto(value: f64) -> String {
    let repr = value.abs().to_string();
    let decimals = repr.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
    grouped(value, decimals)
}

/// Rounded to one decimal, trailing `.0` dropped: `45.26 -> "45.3%"`, `40.0 -> "40%"`.
pub fn percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    format!("{}%", grouped_auto(rounded))
}
