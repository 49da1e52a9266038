use thiserror::Error;

/// Reasons an expression produced no value.
#[derive(Debug, Error, PartialEq)]
pub enum EvaluationError {
	#[error("expression is empty")]
	Empty,

	#[error("invalid {radix} literal '{literal}'")]
	Literal { literal: String, radix: &'static str },

	#[error("cannot evaluate '{expression}': {reason}")]
	Malformed { expression: String, reason: String },

	#[error("'{expression}' does not evaluate to a finite number")]
	NotFinite { expression: String },
}

/// Evaluate an arithmetic expression and format the result.
///
/// Hexadecimal (`0x1F`) and binary (`0b101`) literals are accepted next to
/// plain decimals.
pub fn evaluate(expression: &str) -> Result<String, EvaluationError> {
	let trimmed = expression.trim();
	if trimmed.is_empty() {
		return Err(EvaluationError::Empty);
	}

	let expanded = expand_radix_literals(trimmed)?;
	let value = meval::eval_str(&expanded).map_err(|err| EvaluationError::Malformed {
		expression: trimmed.to_string(),
		reason: err.to_string(),
	})?;
	if !value.is_finite() {
		return Err(EvaluationError::NotFinite {
			expression: trimmed.to_string(),
		});
	}
	Ok(format_number(value))
}

/// Rewrite `0x..` and `0b..` literals as decimals.
pub fn expand_radix_literals(expression: &str) -> Result<String, EvaluationError> {
	let chars: Vec<char> = expression.chars().collect();
	let mut out = String::with_capacity(expression.len());
	let mut index = 0;
	while index < chars.len() {
		let current = chars[index];
		let starts_token = index == 0 || !is_word_char(chars[index - 1]);
		let prefix = chars.get(index + 1).map(char::to_ascii_lowercase);
		let radix = match (current, prefix) {
			('0', Some('x')) if starts_token => Some((16, "hexadecimal")),
			('0', Some('b')) if starts_token => Some((2, "binary")),
			_ => None,
		};

		let Some((radix, name)) = radix else {
			out.push(current);
			index += 1;
			continue;
		};

		let start = index + 2;
		let mut end = start;
		while end < chars.len() && is_word_char(chars[end]) {
			end += 1;
		}
		let digits: String = chars[start..end].iter().collect();
		let literal: String = chars[index..end].iter().collect();
		let value = u64::from_str_radix(&digits, radix).map_err(|_| EvaluationError::Literal {
			literal,
			radix: name,
		})?;
		out.push_str(&value.to_string());
		index = end;
	}
	Ok(out)
}

/// Render `value` without a trailing `.0` and with at most ten decimals.
#[must_use]
pub fn format_number(value: f64) -> String {
	if value == value.trunc() && value.abs() < 1e15 {
		return format!("{value:.0}");
	}
	let fixed = format!("{value:.10}");
	fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn is_word_char(c: char) -> bool {
	c.is_ascii_alphanumeric() || c == '_'
}
