//! Pure line-filter predicate — zero I/O, easily unit-testable.
//!
//! Exclusions win: a line containing any exclude term is hidden no matter
//! what the include text says. Exclude terms are semicolon-separated; the
//! include text is a single substring. All matching is case-insensitive.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    pub include: String,
    pub exclude: String,
}

impl FilterSpec {
    pub fn new(include: impl Into<String>, exclude: impl Into<String>) -> Self {
        Self {
            include: include.into(),
            exclude: exclude.into(),
        }
    }

    /// True when the filter hides nothing.
    pub fn is_passthrough(&self) -> bool {
        self.include.trim().is_empty() && self.exclude.split(';').all(|t| t.trim().is_empty())
    }

    pub fn matches(&self, line: &str) -> bool {
        let lower = line.to_lowercase();

        for term in self.exclude.split(';') {
            let term = term.trim();
            if !term.is_empty() && lower.contains(&term.to_lowercase()) {
                return false;
            }
        }

        let include = self.include.trim();
        include.is_empty() || lower.contains(&include.to_lowercase())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_passes_everything() {
        let f = FilterSpec::default();
        assert!(f.is_passthrough());
        assert!(f.matches("anything at all"));
        assert!(f.matches(""));
    }

    #[test]
    fn include_is_case_insensitive_substring() {
        let f = FilterSpec::new("Economy", "");
        assert!(f.matches("[Info] economy tick complete"));
        assert!(f.matches("ECONOMY crashed"));
        assert!(!f.matches("[Info] military tick"));
    }

    #[test]
    fn exclude_terms_are_semicolon_separated() {
        let f = FilterSpec::new("", "spam; noise ;");
        assert!(!f.matches("some SPAM here"));
        assert!(!f.matches("background Noise level"));
        assert!(f.matches("a useful line"));
    }

    #[test]
    fn exclude_wins_over_include() {
        let f = FilterSpec::new("tick", "economy");
        assert!(f.matches("military tick"));
        assert!(!f.matches("economy tick"));
    }

    #[test]
    fn blank_exclude_terms_are_ignored() {
        let f = FilterSpec::new("", ";;  ;");
        assert!(f.is_passthrough());
        assert!(f.matches("still visible"));
    }
}
