//! Player name lookup for the search boxes.

use super::dataset::Dataset;

/// Player names containing `term`, case-insensitively, at most `limit` of them.
///
/// A blank term matches nothing.
pub fn search_players<'d>(dataset: &'d Dataset, term: &str, limit: usize) -> Vec<&'d str> {
	let term = term.trim().to_lowercase();
	if term.is_empty() {
		return Vec::new();
	}
	dataset
		.players
		.keys()
		.filter(|name| name.to_lowercase().contains(&term))
		.take(limit)
		.map(String::as_str)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dataset() -> Dataset {
		Dataset::from_players([
			("Parvati", vec![13, 16, 20]),
			("Rob", vec![4, 8, 20, 22]),
			("Robin", vec![31]),
			("Sandra", vec![7, 20]),
			("Tony", vec![28, 40]),
		])
	}

	#[test]
	fn matches_substrings_case_insensitively() {
		let dataset = dataset();
		assert_eq!(search_players(&dataset, "ROB", 5), vec!["Rob", "Robin"]);
		assert_eq!(search_players(&dataset, "an", 5), vec!["Sandra"]);
	}

	#[test]
	fn blank_terms_match_nothing() {
		let dataset = dataset();
		assert!(search_players(&dataset, "", 5).is_empty());
		assert!(search_players(&dataset, "   ", 5).is_empty());
	}

	#[test]
	fn trims_and_caps() {
		let dataset = dataset();
		assert_eq!(search_players(&dataset, "  a ", 2), vec!["Parvati", "Sandra"]);
	}
}
