//! Word-list polarity estimator.
//!
//! Each lexicon hit contributes its polarity, scaled by a preceding
//! intensifier and flipped to half strength by a nearby negation. The text
//! polarity is the mean of all contributions.

use analysis_core::PolarityEstimator;
use std::collections::{HashMap, HashSet};

const NEGATION_WORDS: &[&str] = &[
    "not", "no", "never", "don't", "doesn't", "didn't", "isn't", "aren't",
    "wasn't", "weren't", "won't", "wouldn't", "couldn't", "shouldn't", "can't",
    "cannot", "hardly", "barely", "neither", "nor", "without", "nothing",
];

const NEGATION_WINDOW: usize = 3;
const NEGATION_FACTOR: f64 = -0.5;

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.4),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("insanely", 1.5),
    ("absolutely", 1.4),
    ("totally", 1.3),
    ("highly", 1.3),
    ("hugely", 1.4),
    ("pretty", 1.1),
    ("quite", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.6),
    ("kinda", 0.7),
];

/// Word polarities on the [-1, 1] scale.
const LEXICON: &[(&str, f64)] = &[
    // General English
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("fantastic", 0.4),
    ("wonderful", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("love", 0.5),
    ("like", 0.2),
    ("happy", 0.8),
    ("glad", 0.5),
    ("impressive", 1.0),
    ("solid", 0.4),
    ("perfect", 1.0),
    ("positive", 0.2),
    ("promising", 0.5),
    ("exciting", 0.3),
    ("excited", 0.4),
    ("confident", 0.5),
    ("safe", 0.5),
    ("cheap", 0.4),
    ("undervalued", 0.6),
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("worse", -0.4),
    ("poor", -0.4),
    ("hate", -0.8),
    ("sad", -0.5),
    ("ugly", -0.7),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    ("negative", -0.3),
    ("weak", -0.4),
    ("scary", -0.5),
    ("worried", -0.4),
    ("risky", -0.5),
    ("overvalued", -0.6),
    ("expensive", -0.5),
    ("dead", -0.2),
    ("stupid", -0.8),
    ("dumb", -0.4),
    ("fake", -0.5),
    ("useless", -0.5),
    // Market language
    ("bullish", 0.7),
    ("bearish", -0.7),
    ("rally", 0.5),
    ("rallying", 0.5),
    ("surge", 0.6),
    ("surging", 0.6),
    ("soar", 0.6),
    ("soaring", 0.6),
    ("gain", 0.4),
    ("gains", 0.4),
    ("profit", 0.4),
    ("profitable", 0.5),
    ("growth", 0.4),
    ("growing", 0.3),
    ("beat", 0.4),
    ("upgrade", 0.5),
    ("upgraded", 0.5),
    ("outperform", 0.5),
    ("strong", 0.4),
    ("breakout", 0.5),
    ("buy", 0.3),
    ("buying", 0.3),
    ("long", 0.2),
    ("calls", 0.2),
    ("record", 0.3),
    ("rebound", 0.4),
    ("recovery", 0.3),
    ("crash", -0.8),
    ("crashing", -0.8),
    ("plunge", -0.7),
    ("plunging", -0.7),
    ("dump", -0.6),
    ("dumping", -0.6),
    ("tank", -0.6),
    ("tanking", -0.7),
    ("drop", -0.4),
    ("dropping", -0.4),
    ("fall", -0.4),
    ("falling", -0.4),
    ("loss", -0.5),
    ("losses", -0.5),
    ("miss", -0.4),
    ("missed", -0.4),
    ("downgrade", -0.5),
    ("downgraded", -0.5),
    ("underperform", -0.5),
    ("sell", -0.3),
    ("selling", -0.3),
    ("short", -0.2),
    ("puts", -0.2),
    ("bubble", -0.5),
    ("scam", -0.9),
    ("fraud", -0.9),
    ("bankrupt", -0.9),
    ("bankruptcy", -0.9),
    ("lawsuit", -0.5),
    ("dilution", -0.5),
    ("recession", -0.6),
    // Retail-trading slang
    ("moon", 0.6),
    ("mooning", 0.7),
    ("tendies", 0.6),
    ("lambo", 0.5),
    ("stonks", 0.3),
    ("hodl", 0.3),
    ("bagholder", -0.6),
    ("bagholders", -0.6),
    ("rekt", -0.8),
    ("rugpull", -0.9),
    ("🚀", 0.6),
    ("💎", 0.4),
    ("🌙", 0.5),
    ("📈", 0.5),
    ("📉", -0.5),
    ("🐻", -0.4),
    ("💀", -0.4),
];

pub struct LexiconPolarity {
    lexicon: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
    negations: HashSet<&'static str>,
}

impl LexiconPolarity {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
            negations: NEGATION_WORDS.iter().copied().collect(),
        }
    }

    /// Lowercased whitespace tokens with surrounding ASCII punctuation removed.
    fn tokenize(text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|w| {
                w.trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
                    .trim_matches('\'')
                    .to_lowercase()
                    .replace('’', "'")
            })
            .filter(|w| !w.is_empty())
            .collect()
    }

    fn is_negation(&self, token: &str) -> bool {
        self.negations.contains(token) || token.ends_with("n't")
    }
}

impl Default for LexiconPolarity {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityEstimator for LexiconPolarity {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn polarity(&self, text: &str) -> Option<f64> {
        let tokens = Self::tokenize(text);
        if tokens.is_empty() {
            return None;
        }

        let mut contributions = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            let Some(&base) = self.lexicon.get(token.as_str()) else {
                continue;
            };

            let mut score = base;
            if i > 0 {
                if let Some(&factor) = self.intensifiers.get(tokens[i - 1].as_str()) {
                    score *= factor;
                }
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..i].iter().any(|t| self.is_negation(t)) {
                score *= NEGATION_FACTOR;
            }

            contributions.push(score.clamp(-1.0, 1.0));
        }

        if contributions.is_empty() {
            return Some(0.0);
        }

        let polarity = contributions.iter().sum::<f64>() / contributions.len() as f64;
        Some(polarity.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polarity(text: &str) -> Option<f64> {
        LexiconPolarity::new().polarity(text)
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        let tokens = LexiconPolarity::tokenize("  Great stock!!! To the MOON 🚀, don't sell.");
        assert_eq!(tokens, vec!["great", "stock", "to", "the", "moon", "🚀", "don't", "sell"]);
    }

    #[test]
    fn test_empty_and_punctuation_only_are_unscorable() {
        assert_eq!(polarity(""), None);
        assert_eq!(polarity("   \n\t"), None);
        assert_eq!(polarity("!!! ... ???"), None);
    }

    #[test]
    fn test_no_lexicon_hits_is_zero() {
        assert_eq!(polarity("The quarterly call is on Thursday"), Some(0.0));
    }

    #[test]
    fn test_positive_and_negative() {
        assert!(polarity("Great stock, very bullish").unwrap() > 0.0);
        assert!(polarity("Terrible earnings, this will crash").unwrap() < 0.0);
    }

    #[test]
    fn test_intensifier_scales() {
        let plain = polarity("good company").unwrap();
        let intense = polarity("very good company").unwrap();
        assert!(intense > plain);
        assert!((intense - 0.91).abs() < 1e-9);
    }

    #[test]
    fn test_negation_flips_at_half_strength() {
        let value = polarity("this is not good").unwrap();
        assert!((value - (-0.35)).abs() < 1e-9);

        let value = polarity("I don't see it crashing").unwrap();
        assert!(value > 0.0);
    }

    #[test]
    fn test_negation_outside_window_ignored() {
        let value = polarity("no doubt about it honestly great").unwrap();
        assert!((value - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_contributions_clamped() {
        let value = polarity("extremely excellent").unwrap();
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_curly_apostrophe_negation() {
        let value = polarity("it isn’t bad").unwrap();
        assert!(value > 0.0);
    }
}
