//! Pattern rule tables for text style detection
//!
//! Each category is one ordered, data-driven table of phrase-level rules,
//! so coverage and precedence are defined once. Patterns are written in
//! lowercase and matched against lowercased message text.

use lazy_static::lazy_static;
use regex::Regex;

/// Pattern category a rule belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCategory {
    /// Blaming, commanding, or insulting language (issue)
    Aggressive,
    /// Hedging, over-apologizing, self-deprecating language (issue)
    Passive,
    /// Direct "I" statements and collaborative framing (strength)
    Assertive,
    /// Validation and active-listening language (strength)
    Empathetic,
}

/// One phrase-level detection rule
#[derive(Debug)]
pub struct PatternRule {
    /// Compiled detection pattern
    pub regex: Regex,
    /// Issue or strength text appended on match
    pub description: &'static str,
}

/// Filler-word vocabulary, matched on word boundaries
pub const FILLER_WORDS: &[&str] = &[
    "um",
    "uh",
    "like",
    "you know",
    "basically",
    "literally",
    "actually",
    "honestly",
];

fn compile(rules: &[(&'static str, &'static str)]) -> Vec<PatternRule> {
    rules
        .iter()
        .map(|(pattern, description)| PatternRule {
            // Table patterns are static; a failure here is a programming error
            // caught by the pattern-compilation test below.
            regex: Regex::new(pattern).unwrap_or_else(|e| panic!("bad pattern {pattern}: {e}")),
            description,
        })
        .collect()
}

lazy_static! {
    /// Aggressive phrase rules, in precedence order
    pub static ref AGGRESSIVE_RULES: Vec<PatternRule> = compile(&[
        (r"\byou always\b", "Absolute blame ('you always')"),
        (r"\byou never\b", "Absolute blame ('you never')"),
        (r"\byou should\b", "Commanding tone"),
        (r"\bwhy didn'?t you\b", "Accusatory question"),
        (r"\bwhat'?s wrong with you\b", "Personal attack"),
        (r"\byou need to\b", "Demanding language"),
        (r"\byou'?re (being )?(stupid|lazy|useless)\b", "Direct insult"),
    ]);

    /// Passive phrase rules
    pub static ref PASSIVE_RULES: Vec<PatternRule> = compile(&[
        (r"\bmaybe we could\b", "Overly tentative"),
        (r"\bi guess\b", "Lacks confidence"),
        (r"\bsorry,? but\b", "Unnecessary apologizing"),
        (r"\bif that'?s okay\b", "Excessive permission-seeking"),
        (r"\bjust think\b", "'Just' minimizes your opinion"),
        (r"\bi'?m no expert\b", "Self-deprecating"),
        (r"\bkind of\b|\bsort of\b", "Hedging language"),
    ]);

    /// Assertive phrase rules
    pub static ref ASSERTIVE_RULES: Vec<PatternRule> = compile(&[
        (r"\bi feel\b.*\bwhen\b", "Strong 'I feel ... when' statement"),
        (r"\bi think\b", "Owning your opinion"),
        (r"\bi believe\b", "Confident stance"),
        (r"\bi need\b", "Clear need expression"),
        (r"\bi'?d like\b", "Polite but direct"),
        (r"\blet'?s\b", "Collaborative language"),
        (r"\bwhat do you think\b", "Inviting dialogue"),
    ]);

    /// Empathetic phrase rules
    pub static ref EMPATHETIC_RULES: Vec<PatternRule> = compile(&[
        (r"\bi understand\b", "Shows understanding"),
        (r"\bi hear you\b", "Active listening"),
        (r"\bthat must be\b", "Emotional validation"),
        (r"\bhow do you feel\b", "Checking in on emotions"),
        (r"\bi appreciate\b", "Showing gratitude"),
    ]);

    /// Compiled word-boundary filler matchers, parallel to [`FILLER_WORDS`]
    pub static ref FILLER_PATTERNS: Vec<(&'static str, Regex)> = FILLER_WORDS
        .iter()
        .map(|word| {
            let pattern = format!(r"\b{}\b", regex::escape(word));
            (
                *word,
                Regex::new(&pattern).unwrap_or_else(|e| panic!("bad filler {word}: {e}")),
            )
        })
        .collect();
}

/// Rules for one category, in evaluation order
pub fn rules_for(category: PatternCategory) -> &'static [PatternRule] {
    match category {
        PatternCategory::Aggressive => &AGGRESSIVE_RULES,
        PatternCategory::Passive => &PASSIVE_RULES,
        PatternCategory::Assertive => &ASSERTIVE_RULES,
        PatternCategory::Empathetic => &EMPATHETIC_RULES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(AGGRESSIVE_RULES.len(), 7);
        assert_eq!(PASSIVE_RULES.len(), 7);
        assert_eq!(ASSERTIVE_RULES.len(), 7);
        assert_eq!(EMPATHETIC_RULES.len(), 5);
        assert_eq!(FILLER_PATTERNS.len(), FILLER_WORDS.len());
    }

    #[test]
    fn test_aggressive_patterns_match() {
        let text = "you always do this and you're being lazy";
        let hits = AGGRESSIVE_RULES
            .iter()
            .filter(|r| r.regex.is_match(text))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_contractions_match_with_and_without_apostrophe() {
        assert!(AGGRESSIVE_RULES[3].regex.is_match("why didn't you call"));
        assert!(AGGRESSIVE_RULES[3].regex.is_match("why didnt you call"));
        assert!(PASSIVE_RULES[2].regex.is_match("sorry, but i disagree"));
        assert!(PASSIVE_RULES[2].regex.is_match("sorry but i disagree"));
    }

    #[test]
    fn test_word_boundaries_prevent_partial_matches() {
        // "umbrella" must not count as the filler "um"
        let um = &FILLER_PATTERNS[0].1;
        assert!(!um.is_match("take an umbrella"));
        assert!(um.is_match("um, i forgot"));
    }

    #[test]
    fn test_i_feel_when_spans_words() {
        let rule = &ASSERTIVE_RULES[0].regex;
        assert!(rule.is_match("i feel frustrated when meetings run late"));
        assert!(!rule.is_match("i feel frustrated"));
    }
}
