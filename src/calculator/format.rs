//! Human-readable descriptions and result formatting.

use super::operation::Operation;

/// Magnitude from which results switch to scientific notation.
const SCIENTIFIC_THRESHOLD: f64 = 1e15;

/// Describe an operation applied to its operands, e.g. `5 + 3` or `2 × sin(30°)`.
///
/// Operand lists that do not fit the operation fall back to `op(a, b, ...)`.
pub fn describe(operation: Operation, operands: &[f64]) -> String {
    let n = |v: f64| format_plain(v);

    match (operation, operands) {
        (Operation::Add | Operation::Sub | Operation::Mul | Operation::Div, &[a, b]) => {
            format!("{} {} {}", n(a), operation, n(b))
        }
        (Operation::Modulo, &[a, b]) => format!("{} mod {}", n(a), n(b)),
        (Operation::Power, &[base, exponent]) => format!("{}^{}", n(base), n(exponent)),
        (Operation::Log, &[number, base]) => format!("log_{}({})", n(base), n(number)),
        (Operation::Pi, &[]) => "π".to_string(),
        (trig, &[angle]) if trig.is_trigonometric() => format!("{}({}°)", trig, n(angle)),
        (trig, &[multiplier, angle]) if trig.is_trigonometric() => {
            format!("{} × {}({}°)", n(multiplier), trig, n(angle))
        }
        (op, values) => {
            let args: Vec<String> = values.iter().map(|&v| n(v)).collect();
            format!("{}({})", op, args.join(", "))
        }
    }
}

/// Format a number for display (with thousand separators).
pub fn format_display(value: f64) -> String {
    if let Some(special) = non_finite(value) {
        return special.to_string();
    }
    if value.abs() >= SCIENTIFIC_THRESHOLD {
        return format!("{:e}", value);
    }

    let plain = format_plain(value);
    if plain.contains('e') {
        return plain;
    }
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, dec_part) = match digits.find('.') {
        Some(dot_pos) => digits.split_at(dot_pos),
        None => (digits, ""),
    };

    format!("{}{}{}", sign, group_thousands(int_part), dec_part)
}

/// Format a number without separators (at most ten decimals, trailing zeros trimmed).
pub fn format_plain(value: f64) -> String {
    if let Some(special) = non_finite(value) {
        return special.to_string();
    }
    if value.abs() >= SCIENTIFIC_THRESHOLD {
        return format!("{:e}", value);
    }
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }

    let formatted = format!("{:.10}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        // Values smaller than the displayed precision keep full precision.
        "0" | "-0" => format!("{:e}", value),
        other => other.to_string(),
    }
}

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value.is_infinite() {
        Some(if value.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        })
    } else {
        None
    }
}

/// Insert a comma every three digits of an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
