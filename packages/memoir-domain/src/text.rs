/// Strips HTML markup from a rich-text field, leaving plain text.
///
/// Block-level closers become spaces so adjacent blocks do not glue together.
/// Only the entities rich-text editors actually emit are decoded.
pub fn html_to_text(html: &str) -> String {
	let mut out = String::with_capacity(html.len());
	let mut chars = html.chars().peekable();

	while let Some(ch) = chars.next() {
		match ch {
			'<' => {
				for inner in chars.by_ref() {
					if inner == '>' {
						break;
					}
				}

				out.push(' ');
			},
			'&' => {
				let mut entity = String::new();

				while let Some(&next) = chars.peek() {
					if next == ';' {
						chars.next();

						break;
					}
					if next == '&' || next == '<' || next.is_whitespace() || entity.len() >= 8 {
						break;
					}

					entity.push(next);
					chars.next();
				}

				match entity.as_str() {
					"amp" => out.push('&'),
					"lt" => out.push('<'),
					"gt" => out.push('>'),
					"quot" => out.push('"'),
					"apos" | "#39" => out.push('\''),
					"nbsp" => out.push(' '),
					other => {
						out.push('&');
						out.push_str(other);
					},
				}
			},
			_ => out.push(ch),
		}
	}

	collapse_whitespace(&out)
}

/// Collapses runs of whitespace (including newlines) into single spaces and
/// trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
	text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes one labeled source fragment into its indexed form.
///
/// Normalization happens per fragment, before joining, so multi-word values
/// stay distinguishable by their original boundaries. Empty values drop out.
pub fn normalize_fragment(label: &str, value: &str) -> Option<String> {
	let cleaned = collapse_whitespace(value).to_lowercase();

	if cleaned.is_empty() {
		return None;
	}

	Some(format!("{label}: {cleaned}"))
}

/// Joins normalized fragments into the final search-index blob.
pub fn compose(fragments: &[String]) -> String {
	fragments.join("\n")
}
