//! Recognizers for description formats the bank prints on several lines.
//!
//! Each rule pulls known parts out of the description (a label, an embedded
//! date, reference tokens, a counterparty) and returns them in the order the
//! statement shows them. Parts that are absent are skipped. Words no extractor
//! claimed are left in the pool for the caller to wrap after the extracted lines.

use replica_normalize::months;

/// One template: a cheap predicate over the upper-cased description and an
/// extractor that consumes words from the pool.
#[derive(Clone, Copy)]
pub struct TemplateRule {
    pub name: &'static str,
    pub matches: fn(&str) -> bool,
    pub extract: fn(&mut WordPool<'_>, &[String]) -> Vec<String>,
}

impl std::fmt::Debug for TemplateRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRule").field("name", &self.name).finish()
    }
}

/// Minimum digit count for a bare number to be treated as a tracking reference.
pub const LONG_REFERENCE_DIGITS: usize = 10;

pub fn builtin_rules() -> Vec<TemplateRule> {
    vec![
        TemplateRule {
            name: "spei_transfer",
            matches: |upper| has_word(upper, "SPEI"),
            extract: extract_spei,
        },
        TemplateRule {
            name: "third_party_payment",
            matches: |upper| has_word(upper, "TERCERO"),
            extract: extract_third_party,
        },
    ]
}

fn has_word(upper: &str, word: &str) -> bool {
    upper.split_whitespace().any(|w| w == word)
}

const SPEI_SUFFIXES: &[&str] = &["ENVIADO", "RECIBIDO", "DEVUELTO"];

fn extract_spei(pool: &mut WordPool<'_>, parties: &[String]) -> Vec<String> {
    let date = pool.take_date();
    let number = pool.take_long_number(LONG_REFERENCE_DIGITS);
    let party = pool.take_party(parties);
    let slashed = pool.take_slash_reference();
    let label = pool.take_label("SPEI", SPEI_SUFFIXES);
    [label, date, number, party, slashed].into_iter().flatten().collect()
}

fn extract_third_party(pool: &mut WordPool<'_>, parties: &[String]) -> Vec<String> {
    let number = pool.take_long_number(LONG_REFERENCE_DIGITS);
    let date = pool.take_date();
    let party = pool.take_party(parties);
    let label = pool.take_label("TERCERO", &[]);
    [label, number, date, party].into_iter().flatten().collect()
}

/// The words of a description with a consumed flag per word.
#[derive(Debug)]
pub struct WordPool<'a> {
    words: Vec<&'a str>,
    taken: Vec<bool>,
}

impl<'a> WordPool<'a> {
    pub fn new(text: &'a str) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        let taken = vec![false; words.len()];
        Self { words, taken }
    }

    fn free(&self, i: usize) -> Option<&'a str> {
        if self.taken.get(i) == Some(&false) { Some(self.words[i]) } else { None }
    }

    /// Words nobody consumed, in their original order.
    pub fn remaining(&self) -> Vec<&'a str> {
        self.words
            .iter()
            .zip(&self.taken)
            .filter(|(_, taken)| !**taken)
            .map(|(w, _)| *w)
            .collect()
    }

    /// Free words before and including `marker`, plus one following suffix word.
    pub fn take_label(&mut self, marker: &str, suffixes: &[&str]) -> Option<String> {
        let pos = (0..self.words.len())
            .find(|&i| self.free(i).is_some_and(|w| w.eq_ignore_ascii_case(marker)))?;
        let mut end = pos;
        if let Some(next) = self.free(pos + 1)
            && suffixes.iter().any(|s| next.eq_ignore_ascii_case(s))
        {
            end = pos + 1;
        }
        let parts: Vec<&str> = (0..=end).filter_map(|i| self.free(i)).collect();
        for i in 0..=end {
            self.taken[i] = true;
        }
        Some(parts.join(" "))
    }

    /// A `DD MON` word pair or a compact `DDMON` word.
    pub fn take_date(&mut self) -> Option<String> {
        for i in 0..self.words.len() {
            let Some(word) = self.free(i) else { continue };
            if is_day(word)
                && let Some(next) = self.free(i + 1)
                && months::is_month(next)
            {
                self.taken[i] = true;
                self.taken[i + 1] = true;
                return Some(format!("{} {}", word, next.to_uppercase()));
            }
            if let Some(split) = word.find(|c: char| !c.is_ascii_digit())
                && is_day(&word[..split])
                && months::is_month(&word[split..])
            {
                self.taken[i] = true;
                return Some(word.to_uppercase());
            }
        }
        None
    }

    /// The first all-digit word with at least `min_digits` digits.
    pub fn take_long_number(&mut self, min_digits: usize) -> Option<String> {
        let i = (0..self.words.len()).find(|&i| {
            self.free(i)
                .is_some_and(|w| w.len() >= min_digits && w.bytes().all(|b| b.is_ascii_digit()))
        })?;
        self.taken[i] = true;
        Some(self.words[i].to_string())
    }

    /// The first `//`-prefixed token. A bare `//` absorbs the word after it.
    pub fn take_slash_reference(&mut self) -> Option<String> {
        let i = (0..self.words.len()).find(|&i| self.free(i).is_some_and(|w| w.starts_with("//")))?;
        self.taken[i] = true;
        let word = self.words[i];
        if word == "//"
            && let Some(next) = self.free(i + 1)
        {
            self.taken[i + 1] = true;
            return Some(format!("//{}", next));
        }
        Some(word.to_string())
    }

    /// The longest known party name occurring as consecutive free words.
    pub fn take_party(&mut self, parties: &[String]) -> Option<String> {
        let mut candidates: Vec<Vec<&str>> = parties
            .iter()
            .map(|p| p.split_whitespace().collect::<Vec<_>>())
            .filter(|p| !p.is_empty())
            .collect();
        candidates.sort_by(|a, b| b.len().cmp(&a.len()));

        for party in &candidates {
            let n = party.len();
            if n > self.words.len() {
                continue;
            }
            for start in 0..=self.words.len() - n {
                let hit = (0..n).all(|k| {
                    self.free(start + k)
                        .is_some_and(|w| w.eq_ignore_ascii_case(party[k]))
                });
                if hit {
                    let text: Vec<&str> = (start..start + n).map(|i| self.words[i]).collect();
                    for i in start..start + n {
                        self.taken[i] = true;
                    }
                    return Some(text.join(" "));
                }
            }
        }
        None
    }
}

fn is_day(s: &str) -> bool {
    matches!(s.len(), 1 | 2)
        && s.bytes().all(|b| b.is_ascii_digit())
        && s.parse::<u8>().is_ok_and(|d| (1..=31).contains(&d))
}
