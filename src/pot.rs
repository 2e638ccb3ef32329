use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum PotError {
	#[error("malformed cracked record: {0}")]
	MalformedRecord(String),
}

/// A `hash:plain` pair as printed by `--show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrackedEntry {
	#[serde(rename = "Hash")]
	pub hash: String,
	#[serde(rename = "Plain")]
	pub plain: String,
}

pub fn parse_record(token: &str) -> Result<CrackedEntry, PotError> {
	// hash:plain, only the first ':' splits; allow an empty plain
	if let Some((hash, plain)) = token.split_once(':') {
		if hash.is_empty() {
			return Err(PotError::MalformedRecord(token.to_string()));
		}
		Ok(CrackedEntry {
			hash: hash.to_string(),
			plain: plain.to_string(),
		})
	} else {
		Err(PotError::MalformedRecord(token.to_string()))
	}
}

pub fn parse_records<S: AsRef<str>>(tokens: &[S]) -> Vec<CrackedEntry> {
	tokens
		.iter()
		.filter_map(|t| match parse_record(t.as_ref()) {
			Ok(entry) => Some(entry),
			Err(e) => {
				log::debug!("skipping {}", e);
				None
			}
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_plain_with_colons() {
		let entry = parse_record("abcdef:pa:ss:wd").unwrap();
		assert_eq!(entry.hash, "abcdef");
		assert_eq!(entry.plain, "pa:ss:wd");
	}

	#[test]
	fn skips_malformed_tokens() {
		let entries = parse_records(&["no_colon", ":orphan", "123:abc", "456:"]);
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].plain, "abc");
		assert_eq!(entries[1].hash, "456");
		assert_eq!(entries[1].plain, "");
	}
}
