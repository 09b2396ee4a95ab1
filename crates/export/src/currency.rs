/// Render an amount as Indonesian Rupiah: `Rp 1.234.567`.
///
/// Rounds to the nearest whole rupiah; thousands are separated by dots.
pub fn format_rupiah(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("Rp -{grouped}")
    } else {
        format!("Rp {grouped}")
    }
}
