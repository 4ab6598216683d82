//! High score leaderboard
//!
//! A fixed table of ten descending `(score, name)` slots, padded with
//! zero entries so insertion is a plain scan-and-shift. Persisted through
//! a [`crate::platform::ScoreStore`] using the legacy line format
//! `<digits><name>`; the parser scans digit runs against non-digit runs
//! and tolerates arbitrary garbage, so a corrupt file degrades to an
//! all-zero table instead of failing.

/// Number of slots on the board
pub const MAX_HIGH_SCORES: usize = 10;

/// Name a fresh insertion carries until the player types one
pub const PLACEHOLDER_NAME: &str = "YOU!";

/// A single board slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub score: u64,
    pub name: String,
}

impl HighScoreEntry {
    fn zero() -> Self {
        Self {
            score: 0,
            name: String::new(),
        }
    }
}

/// The always-full leaderboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    entries: Vec<HighScoreEntry>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// An all-zero board
    pub fn new() -> Self {
        Self {
            entries: vec![HighScoreEntry::zero(); MAX_HIGH_SCORES],
        }
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn get(&self, slot: usize) -> Option<&HighScoreEntry> {
        self.entries.get(slot)
    }

    /// Place a score on the board if it qualifies
    ///
    /// Scans top-down for the first slot the score ties or beats, inserts
    /// a placeholder-named entry there and shifts the tail down, dropping
    /// the last slot. Returns the slot index, or `None` when the score
    /// beats nothing.
    pub fn insert(&mut self, score: u64) -> Option<usize> {
        let slot = self.entries.iter().position(|e| score >= e.score)?;
        self.entries.insert(
            slot,
            HighScoreEntry {
                score,
                name: PLACEHOLDER_NAME.to_string(),
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot)
    }

    /// Replace the placeholder name of a freshly inserted slot
    pub fn set_nickname(&mut self, slot: usize, nick: String) {
        if let Some(entry) = self.entries.get_mut(slot) {
            entry.name = nick;
        }
    }

    /// Parse the persisted text form
    ///
    /// Digit runs become scores, the non-digit run that follows becomes
    /// the slot's name (surrounding whitespace stripped). Anything
    /// unparseable is skipped; the result is re-sorted descending so a
    /// hand-edited file still renders sanely.
    pub fn parse(text: &str) -> Self {
        let mut table = Self::new();
        let mut slot = 0;
        let mut rest = text;

        while slot < MAX_HIGH_SCORES && !rest.is_empty() {
            let split = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            if split > 0 {
                // Digit run: this slot's score. Absurdly long runs are
                // treated as garbage and leave the slot at zero.
                table.entries[slot].score = rest[..split].parse().unwrap_or(0);
                rest = &rest[split..];
            } else {
                // Non-digit run: this slot's name, then move on
                let end = rest
                    .find(|c: char| c.is_ascii_digit())
                    .unwrap_or(rest.len());
                table.entries[slot].name = rest[..end].trim().to_string();
                rest = &rest[end..];
                slot += 1;
            }
        }

        // Stable sort keeps equal scores in file order
        table.entries.sort_by(|a, b| b.score.cmp(&a.score));
        table
    }

    /// Serialize to the persisted text form
    pub fn format(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.score.to_string());
            out.push_str(&entry.name);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sequence_sorts_descending() {
        let mut scores = HighScores::new();
        for s in [50, 90, 10, 200, 90] {
            assert!(scores.insert(s).is_some());
        }

        let got: Vec<u64> = scores.entries().iter().map(|e| e.score).collect();
        assert_eq!(got, vec![200, 90, 90, 50, 10, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_insert_reports_slot() {
        let mut scores = HighScores::new();
        assert_eq!(scores.insert(50), Some(0));
        assert_eq!(scores.insert(90), Some(0));
        assert_eq!(scores.insert(70), Some(1));
        // Ties insert above the existing equal entry
        assert_eq!(scores.insert(90), Some(0));
    }

    #[test]
    fn test_too_low_score_is_rejected() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u64 {
            scores.insert(s * 10);
        }

        let before = scores.clone();
        assert_eq!(scores.insert(5), None);
        assert_eq!(scores, before);
    }

    #[test]
    fn test_nickname_replaces_placeholder() {
        let mut scores = HighScores::new();
        let slot = scores.insert(120).unwrap();
        assert_eq!(scores.get(slot).map(|e| e.name.as_str()), Some("YOU!"));

        scores.set_nickname(slot, "ADA".to_string());
        assert_eq!(scores.get(slot).map(|e| e.name.as_str()), Some("ADA"));
    }

    #[test]
    fn test_format_parse_round_trip() {
        let mut scores = HighScores::new();
        scores.insert(300);
        scores.set_nickname(0, "EVE".to_string());
        scores.insert(150);
        scores.set_nickname(1, "BOB".to_string());

        let reparsed = HighScores::parse(&scores.format());
        assert_eq!(reparsed, scores);

        // And stable from there on
        assert_eq!(reparsed.format(), HighScores::parse(&reparsed.format()).format());
    }

    #[test]
    fn test_parse_tolerates_garbage() {
        let table = HighScores::parse("not a number at all\x07\x01???");
        assert!(table.entries().iter().all(|e| e.score == 0));

        let table = HighScores::parse("");
        assert_eq!(table, HighScores::new());
    }

    #[test]
    fn test_parse_mixed_lines() {
        let table = HighScores::parse("500ZOE\n20\n7MAX\n");
        let top: Vec<(u64, &str)> = table
            .entries()
            .iter()
            .take(3)
            .map(|e| (e.score, e.name.as_str()))
            .collect();
        assert_eq!(top, vec![(500, "ZOE"), (20, ""), (7, "MAX")]);
    }

    #[test]
    fn test_parse_overlong_digit_run_degrades_to_zero() {
        let table = HighScores::parse("99999999999999999999999999999999IRA\n");
        assert_eq!(table.get(0).map(|e| e.score), Some(0));
    }
}
