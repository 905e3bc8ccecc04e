use rustc_hash::FxHashMap;

/// Reformatting rule for one block-introducing keyword.
#[derive(Debug, Clone, Default)]
pub struct DeclarationRule {
    pub keyword: String,
    /// Keyword attaches to the end of the previous line, as in `} else {`.
    pub trailing: bool,
    /// Keyword carries no name or argument-list header, only a body.
    pub headless: bool,
    /// Keywords allowed to continue this declaration in place of a body,
    /// as `if` follows `else`.
    pub continuators: Vec<String>,
}

impl DeclarationRule {
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        DeclarationRule {
            keyword: keyword.into(),
            ..DeclarationRule::default()
        }
    }

    #[must_use]
    pub fn trailing(mut self) -> Self {
        self.trailing = true;
        self
    }

    #[must_use]
    pub fn headless(mut self) -> Self {
        self.headless = true;
        self
    }

    #[must_use]
    pub fn continuators(mut self, keywords: &[&str]) -> Self {
        self.continuators
            .extend(keywords.iter().map(|k| (*k).to_string()));
        self
    }
}

/// Keyword-indexed rule table, built once per formatting run and read-only
/// afterwards.
#[derive(Debug, Default)]
pub(crate) struct Grammar {
    rules: FxHashMap<String, DeclarationRule>,
}

impl Grammar {
    pub(crate) fn new(rules: &[DeclarationRule]) -> Self {
        let mut table = FxHashMap::default();
        for rule in rules {
            table.insert(rule.keyword.clone(), rule.clone());
        }
        Grammar { rules: table }
    }

    pub(crate) fn get(&self, keyword: &str) -> Option<&DeclarationRule> {
        self.rules.get(keyword)
    }

    pub(crate) fn contains(&self, keyword: &str) -> bool {
        self.rules.contains_key(keyword)
    }
}
