use serde_json::Value;

use crate::{Error, Result};

/// Parses structured LLM output, attempting one repair pass when the raw text
/// is not valid JSON: code fences are stripped, the outermost JSON bracket
/// pair is sliced out, and trailing commas are removed.
pub fn parse_lenient(raw: &str) -> Result<Value> {
	if let Ok(value) = serde_json::from_str(raw) {
		return Ok(value);
	}

	let repaired = repair(raw);

	serde_json::from_str(&repaired).map_err(|_| Error::InvalidResponse {
		message: "Structured response is not valid JSON after repair.".to_string(),
	})
}

fn repair(raw: &str) -> String {
	let stripped = strip_code_fences(raw);
	let sliced = slice_outer_brackets(stripped);

	strip_trailing_commas(sliced)
}

fn strip_code_fences(raw: &str) -> &str {
	let trimmed = raw.trim();
	let Some(rest) = trimmed.strip_prefix("```") else {
		return trimmed;
	};
	let rest = rest.strip_prefix("json").unwrap_or(rest);

	rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn slice_outer_brackets(raw: &str) -> &str {
	let object = raw.find('{').map(|start| (start, '}'));
	let array = raw.find('[').map(|start| (start, ']'));
	let outer = match (object, array) {
		(Some(obj), Some(arr)) =>
			if obj.0 < arr.0 {
				Some(obj)
			} else {
				Some(arr)
			},
		(Some(obj), None) => Some(obj),
		(None, Some(arr)) => Some(arr),
		(None, None) => None,
	};
	let Some((start, closer)) = outer else {
		return raw;
	};
	let Some(end) = raw.rfind(closer) else {
		return raw;
	};

	if end <= start {
		return raw;
	}

	&raw[start..=end]
}

fn strip_trailing_commas(raw: &str) -> String {
	let mut out = String::with_capacity(raw.len());
	let mut in_string = false;
	let mut escaped = false;

	for ch in raw.chars() {
		if in_string {
			out.push(ch);

			if escaped {
				escaped = false;
			} else if ch == '\\' {
				escaped = true;
			} else if ch == '"' {
				in_string = false;
			}

			continue;
		}

		match ch {
			'"' => {
				in_string = true;

				out.push(ch);
			},
			'}' | ']' => {
				while out.ends_with(char::is_whitespace) || out.ends_with(',') {
					out.pop();
				}

				out.push(ch);
			},
			_ => out.push(ch),
		}
	}

	out
}
