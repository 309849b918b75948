use super::templates::{TemplateRule, WordPool, builtin_rules};
use super::wrapper::{wrap_text, wrap_words};
use crate::config::DEFAULT_KNOWN_PARTIES;

/// The display lines of one description cell and the template that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub lines: Vec<String>,
    /// Name of the template rule that matched; `None` for the generic wrap.
    pub rule: Option<&'static str>,
}

/// Splits descriptions into display lines.
///
/// Rules are tried in order; the first whose predicate matches extracts the
/// lines. Descriptions no rule recognises are greedy-wrapped.
#[derive(Debug, Clone)]
pub struct Segmenter {
    rules: Vec<TemplateRule>,
    known_parties: Vec<String>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_KNOWN_PARTIES.iter().map(|s| s.to_string()).collect())
    }
}

impl Segmenter {
    /// A segmenter with the built-in template rules.
    pub fn new(known_parties: Vec<String>) -> Self {
        Self::with_rules(builtin_rules(), known_parties)
    }

    pub fn with_rules(rules: Vec<TemplateRule>, known_parties: Vec<String>) -> Self {
        Self { rules, known_parties }
    }

    /// Adds a rule after the existing ones.
    pub fn push_rule(&mut self, rule: TemplateRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[TemplateRule] {
        &self.rules
    }

    pub fn segment(&self, description: &str, max_line_chars: usize) -> Segmentation {
        let description = description.trim();
        if description.is_empty() {
            return Segmentation { lines: vec![String::new()], rule: None };
        }

        let upper = description.to_uppercase();
        if let Some(rule) = self.rules.iter().find(|r| (r.matches)(&upper)) {
            let mut pool = WordPool::new(description);
            let mut lines = (rule.extract)(&mut pool, &self.known_parties);
            lines.extend(wrap_words(pool.remaining(), max_line_chars));
            if !lines.is_empty() {
                log::trace!("Description {:?} matched template '{}'", description, rule.name);
                return Segmentation { lines, rule: Some(rule.name) };
            }
        }

        let lines = wrap_text(description, max_line_chars);
        Segmentation { lines, rule: None }
    }
}

/// Segments with the built-in rules and default party list.
pub fn segment(description: &str, max_line_chars: usize) -> Vec<String> {
    Segmenter::default().segment(description, max_line_chars).lines
}
