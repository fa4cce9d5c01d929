//! Text formatting shared by the canvas labels and the tooltip.

const ELLIPSIS: char = '…';

/// Formats a rupee amount with Indian digit grouping, rounded to whole
/// rupees: `2800000.0` becomes `₹28,00,000`.
pub fn format_inr(amount: f64) -> String {
	let sign = if amount < 0.0 { "-" } else { "" };
	let digits = (amount.abs().round() as u64).to_string();

	if digits.len() <= 3 {
		return format!("{sign}₹{digits}");
	}

	// Last three digits form one group, the rest are grouped in pairs.
	let (head, tail) = digits.split_at(digits.len() - 3);
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
	for (i, ch) in head.chars().enumerate() {
		if i > 0 && (head.len() - i) % 2 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}
	format!("{sign}₹{grouped},{tail}")
}

/// Cuts `label` to at most `max_chars` characters, appending an ellipsis
/// when anything was removed.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
	match label.char_indices().nth(max_chars) {
		Some((cut, _)) => {
			let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
			out.push_str(&label[..cut]);
			out.push(ELLIPSIS);
			out
		}
		None => label.to_string(),
	}
}

/// `rtgs_transfer` -> `rtgs transfer`.
pub fn humanize(category: &str) -> String {
	category.replace('_', " ")
}
