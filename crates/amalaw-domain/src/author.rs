//! Target-author identity matching.

/// The discussion participant whose replies are treated as answers.
///
/// The same person may appear under more than one name across threads
/// (HN username, display name), so identity is a small fixed alias set
/// matched case-insensitively.
#[derive(Debug, Clone)]
pub struct TargetAuthor {
    aliases: Vec<String>,
}

impl TargetAuthor {
    /// Create a target author from a set of aliases.
    pub fn new<I, S>(aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases
                .into_iter()
                .map(|a| a.into().to_lowercase())
                .collect(),
        }
    }

    /// Whether an author name matches any alias.
    ///
    /// An absent author (deleted comment) never matches.
    pub fn matches(&self, author: Option<&str>) -> bool {
        match author {
            Some(name) => {
                let name = name.to_lowercase();
                self.aliases.iter().any(|alias| *alias == name)
            }
            None => false,
        }
    }
}

impl Default for TargetAuthor {
    /// The immigration-AMA attorney the original dataset was built around.
    fn default() -> Self {
        Self::new(["proberts", "peter roberts"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        let target = TargetAuthor::default();
        assert!(target.matches(Some("proberts")));
        assert!(target.matches(Some("PRoberts")));
        assert!(target.matches(Some("Peter Roberts")));
        assert!(!target.matches(Some("alice")));
    }

    #[test]
    fn test_absent_author_never_matches() {
        let target = TargetAuthor::default();
        assert!(!target.matches(None));
    }

    #[test]
    fn test_custom_aliases() {
        let target = TargetAuthor::new(["dang"]);
        assert!(target.matches(Some("Dang")));
        assert!(!target.matches(Some("proberts")));
    }
}
