/// Text analytics engine
///
/// Computes counts, averages, a readability score, vocabulary statistics and a
/// guess at the content type and language of a text. Every field of the report
/// is always present; an input without words or sentences simply yields zeros.

use serde::Serialize;

use crate::config::AnalyticsSettings;
use crate::core::handlers::{count_in_order, top_counts};
use crate::core::patterns::{
    BULLET_MARKERS, CODE_INDICATORS, EMAIL_RE, ENGLISH_MARKERS, FRENCH_MARKERS,
    MARKDOWN_INDICATORS, NUMBERED_ITEM_RE, SENTENCE_END_RE, SPANISH_MARKERS, STOP_WORDS,
    WEB_MARKER_RE, WORD_RE,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub basic_stats: BasicStats,
    pub averages: Averages,
    pub reading_stats: ReadingStats,
    pub word_analysis: WordAnalysis,
    pub content_info: ContentInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub lines: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Averages {
    pub word_length: f64,
    pub sentence_length: f64,
    pub line_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingStats {
    pub reading_time_minutes: f64,
    pub complexity_score: f64,
    pub complexity_level: ComplexityLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordAnalysis {
    pub unique_words: usize,
    /// Distinct tokens over total tokens, in `[0, 1]`
    pub vocabulary_richness: f64,
    pub most_common_words: Vec<(String, usize)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentInfo {
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComplexityLevel {
    Simple,
    Easy,
    Moderate,
    Complex,
    #[serde(rename = "Very Complex")]
    VeryComplex,
}

impl ComplexityLevel {
    /// Map a complexity score onto its band
    pub fn from_score(score: f64) -> Self {
        if score <= 3.0 {
            ComplexityLevel::Simple
        } else if score <= 5.0 {
            ComplexityLevel::Easy
        } else if score <= 7.0 {
            ComplexityLevel::Moderate
        } else if score <= 8.0 {
            ComplexityLevel::Complex
        } else {
            ComplexityLevel::VeryComplex
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Code,
    Email,
    WebContent,
    Markdown,
    Json,
    Csv,
    NumberedList,
    BulletList,
    PlainText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    Unknown,
}

/// Marker lists in tie-breaking order
const LANGUAGE_MARKERS: [(Language, &[&str]); 3] = [
    (Language::English, ENGLISH_MARKERS),
    (Language::Spanish, SPANISH_MARKERS),
    (Language::French, FRENCH_MARKERS),
];

/// Stateless analyzer parameterised by its tuning settings
#[derive(Debug, Clone, Default)]
pub struct TextAnalyzer {
    settings: AnalyticsSettings,
}

impl TextAnalyzer {
    pub fn new(settings: AnalyticsSettings) -> Self {
        Self { settings }
    }

    /// Analyze a text
    ///
    /// # Arguments
    ///
    /// * `text` - The text to analyze
    ///
    /// # Returns
    ///
    /// A fully populated report
    pub fn analyze(&self, text: &str) -> AnalysisReport {
        // Basic statistics
        let characters = text.chars().count();
        let characters_no_spaces = text.chars().filter(|&c| c != ' ').count();
        let word_count = text.split_whitespace().count();
        let sentence_count = SENTENCE_END_RE.find_iter(text).count();
        let paragraph_count = text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count();

        let lines: Vec<&str> = text.split('\n').collect();
        let line_length = lines.iter().map(|l| l.chars().count()).sum::<usize>() as f64
            / lines.len() as f64;

        // Word tokens
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = WORD_RE.find_iter(&lowered).map(|m| m.as_str()).collect();
        let word_length = if tokens.is_empty() {
            0.0
        } else {
            tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / tokens.len() as f64
        };

        let meaningful = tokens
            .iter()
            .copied()
            .filter(|t| !STOP_WORDS.contains(t) && t.chars().count() > 2);
        let most_common_words = top_counts(count_in_order(meaningful), self.settings.top_words);

        let unique_words = count_in_order(tokens.iter().copied()).len();
        let vocabulary_richness = if tokens.is_empty() {
            0.0
        } else {
            round_to(unique_words as f64 / tokens.len() as f64, 3)
        };

        // Reading statistics
        let sentence_length = if sentence_count > 0 {
            word_count as f64 / sentence_count as f64
        } else {
            0.0
        };
        let complexity_score = complexity_score(word_length, sentence_length);

        AnalysisReport {
            basic_stats: BasicStats {
                characters,
                characters_no_spaces,
                words: word_count,
                sentences: sentence_count,
                paragraphs: paragraph_count,
                lines: lines.len(),
            },
            averages: Averages {
                word_length: round_to(word_length, 2),
                sentence_length: round_to(sentence_length, 2),
                line_length: round_to(line_length, 2),
            },
            reading_stats: ReadingStats {
                reading_time_minutes: round_to(word_count as f64 / self.settings.words_per_minute, 1),
                complexity_score: round_to(complexity_score, 1),
                complexity_level: ComplexityLevel::from_score(complexity_score),
            },
            word_analysis: WordAnalysis {
                unique_words,
                vocabulary_richness,
                most_common_words,
            },
            content_info: ContentInfo {
                content_type: detect_content_type(text),
                language: self.detect_language(text),
            },
        }
    }

    /// Score each language by how many of its marker words appear anywhere in the text
    ///
    /// Containment is by substring, so `"the"` also counts inside `"other"`.
    pub fn detect_language(&self, text: &str) -> Language {
        let lowered = text.to_lowercase();

        let mut best = (Language::Unknown, 0);
        for (language, markers) in LANGUAGE_MARKERS.iter() {
            let score = markers.iter().filter(|m| lowered.contains(*m)).count();
            // Strictly greater keeps the earlier language on ties
            if score > best.1 {
                best = (*language, score);
            }
        }

        if best.1 > self.settings.language_min_score {
            best.0
        } else {
            Language::Unknown
        }
    }
}

/// Analyze a text with the default settings
pub fn analyze_text(text: &str) -> AnalysisReport {
    TextAnalyzer::default().analyze(text)
}

/// Word length and sentence length blended into a 1..=10 score
pub fn complexity_score(avg_word_length: f64, avg_sentence_length: f64) -> f64 {
    (avg_word_length * 2.0 + avg_sentence_length / 5.0).clamp(1.0, 10.0)
}

/// Guess what kind of content a text is; the first matching rule wins
pub fn detect_content_type(text: &str) -> ContentType {
    if CODE_INDICATORS.iter().any(|i| text.contains(i)) {
        return ContentType::Code;
    }

    if text.contains('@') && EMAIL_RE.is_match(text) {
        return ContentType::Email;
    }

    if WEB_MARKER_RE.is_match(text) {
        return ContentType::WebContent;
    }

    if MARKDOWN_INDICATORS.iter().any(|i| text.contains(i)) {
        return ContentType::Markdown;
    }

    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return ContentType::Json;
    }

    if text.contains(',') && text.contains('\n') {
        let lines: Vec<&str> = trimmed.split('\n').collect();
        if lines.len() > 1 && lines.iter().take(3).all(|line| line.contains(',')) {
            return ContentType::Csv;
        }
    }

    if text.split('\n').any(|line| NUMBERED_ITEM_RE.is_match(line.trim())) {
        return ContentType::NumberedList;
    }

    if text
        .split('\n')
        .any(|line| BULLET_MARKERS.iter().any(|b| line.trim().starts_with(b)))
    {
        return ContentType::BulletList;
    }

    ContentType::PlainText
}

/// Round to a number of decimal places
///
/// Works on the exact binary value, so exact ties go to the even digit
/// (`0.25` -> `0.2`) and `2.675` rounds down.
fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_short_sentence() {
        let report = analyze_text("Hi.");

        assert_eq!(report.basic_stats.words, 1);
        assert_eq!(report.basic_stats.sentences, 1);
        assert_eq!(report.basic_stats.characters, 3);
        assert_eq!(report.reading_stats.reading_time_minutes, 0.0);
        // 2 * 2 + 1 / 5
        assert_eq!(report.reading_stats.complexity_score, 4.2);
        assert_eq!(report.reading_stats.complexity_level, ComplexityLevel::Easy);
        assert_eq!(report.word_analysis.vocabulary_richness, 1.0);
        assert_eq!(report.content_info.content_type, ContentType::PlainText);
        assert_eq!(report.content_info.language, Language::Unknown);
    }

    #[test]
    fn test_basic_counts() {
        let text = "One two three. Four five!\n\nSix seven?? Eight\nnine";
        let stats = analyze_text(text).basic_stats;

        assert_eq!(stats.words, 9);
        assert_eq!(stats.sentences, 3);
        assert_eq!(stats.paragraphs, 2);
        assert_eq!(stats.lines, 4);
        assert_eq!(stats.characters, text.chars().count());
        assert_eq!(stats.characters_no_spaces, text.chars().count() - 6);
    }

    #[test]
    fn test_averages_are_rounded() {
        let averages = analyze_text("ab abc.\nabcd").averages;
        // (2 + 3 + 4) / 3
        assert_eq!(averages.word_length, 3.0);
        assert_eq!(averages.sentence_length, 3.0);
        // (7 + 4) / 2
        assert_eq!(averages.line_length, 5.5);

        let averages = analyze_text("a bb bb").averages;
        assert_eq!(averages.word_length, 1.67);
        assert_eq!(averages.sentence_length, 0.0);
    }

    #[test]
    fn test_most_common_words_skip_stop_words_and_short_tokens() {
        let text = "The cat and the dog. The cat ran. A dog ran to the cat. Owl owl ox";
        let words = analyze_text(text).word_analysis.most_common_words;

        assert_eq!(
            words,
            vec![
                ("cat".to_string(), 3),
                ("dog".to_string(), 2),
                ("ran".to_string(), 2),
                ("owl".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_most_common_words_limit_and_tie_order() {
        let text = "zeta alpha beta gamma delta epsilon alpha";
        let words = analyze_text(text).word_analysis.most_common_words;
        let names: Vec<&str> = words.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta", "beta", "gamma", "delta"]);
    }

    #[test]
    fn test_vocabulary_richness_bounds() {
        for text in ["", "...", "word word word", "every word differs here"] {
            let richness = analyze_text(text).word_analysis.vocabulary_richness;
            assert!((0.0..=1.0).contains(&richness), "{} out of range", richness);
        }
        assert_eq!(analyze_text("word word word").word_analysis.vocabulary_richness, 0.333);
    }

    #[test]
    fn test_complexity_bands() {
        assert_eq!(ComplexityLevel::from_score(1.0), ComplexityLevel::Simple);
        assert_eq!(ComplexityLevel::from_score(3.0), ComplexityLevel::Simple);
        assert_eq!(ComplexityLevel::from_score(3.01), ComplexityLevel::Easy);
        assert_eq!(ComplexityLevel::from_score(5.0), ComplexityLevel::Easy);
        assert_eq!(ComplexityLevel::from_score(7.0), ComplexityLevel::Moderate);
        assert_eq!(ComplexityLevel::from_score(8.0), ComplexityLevel::Complex);
        assert_eq!(ComplexityLevel::from_score(8.5), ComplexityLevel::VeryComplex);
        assert_eq!(
            serde_json::to_string(&ComplexityLevel::VeryComplex).unwrap(),
            "\"Very Complex\""
        );
    }

    #[test]
    fn test_complexity_score_is_clamped() {
        assert_eq!(complexity_score(0.0, 0.0), 1.0);
        assert_eq!(complexity_score(9.0, 50.0), 10.0);
        assert_eq!(complexity_score(3.0, 10.0), 8.0);
    }

    #[test]
    fn test_content_type_rules() {
        assert_eq!(detect_content_type("def main():\n    pass"), ContentType::Code);
        assert_eq!(detect_content_type("SELECT id FROM users"), ContentType::Code);
        assert_eq!(detect_content_type("write to ann@site.org"), ContentType::Email);
        assert_eq!(detect_content_type("go to www.example.com"), ContentType::WebContent);
        assert_eq!(detect_content_type("# Title\nbody"), ContentType::Markdown);
        assert_eq!(detect_content_type("some **bold** text"), ContentType::Markdown);
        assert_eq!(detect_content_type("{\"a\": 1}"), ContentType::Json);
        assert_eq!(detect_content_type("a,b\nc,d\ne,f"), ContentType::Csv);
        assert_eq!(detect_content_type("1. first\n2. second"), ContentType::NumberedList);
        assert_eq!(detect_content_type("shopping:\n* milk\n* eggs"), ContentType::BulletList);
        assert_eq!(detect_content_type("nothing special"), ContentType::PlainText);
    }

    #[test]
    fn test_content_type_priority() {
        // Code beats the email address in it
        assert_eq!(
            detect_content_type("import smtp\nsend(ann@site.org)"),
            ContentType::Code
        );
        // Email beats the URL
        assert_eq!(
            detect_content_type("ann@site.org https://site.org"),
            ContentType::Email
        );
    }

    #[test]
    fn test_language_detection() {
        let analyzer = TextAnalyzer::default();
        assert_eq!(
            analyzer.detect_language("The cat and the dog have gone for a walk with you"),
            Language::English
        );
        assert_eq!(
            analyzer.detect_language("Quiero que todo sea por su bien"),
            Language::Spanish
        );
        assert_eq!(
            analyzer.detect_language("Il est dans le jardin pour avoir et être"),
            Language::French
        );
        assert_eq!(analyzer.detect_language("xyz"), Language::Unknown);
    }

    #[test]
    fn test_language_ties_prefer_english_then_spanish() {
        let analyzer = TextAnalyzer::default();
        // English: with, you, his. French: pour, dans, avoir.
        assert_eq!(
            analyzer.detect_language("pour dans avoir with you his"),
            Language::English
        );
        // Spanish: todo, su, "da" inside dans. French: pour, dans, avoir.
        assert_eq!(
            analyzer.detect_language("todo su pour dans avoir"),
            Language::Spanish
        );
    }

    #[test]
    fn test_rounding_sends_exact_ties_to_even() {
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.75, 1), 0.8);
        assert_eq!(round_to(1.125, 2), 1.12);
        assert_eq!(round_to(1.375, 2), 1.38);
        // 2.675 is stored slightly below the tie
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(2.0 / 3.0, 3), 0.667);
    }

    #[test]
    fn test_reading_time_ties() {
        let words = |n: usize| vec!["word"; n].join(" ");
        // 50 / 200 = 0.25
        assert_eq!(analyze_text(&words(50)).reading_stats.reading_time_minutes, 0.2);
        // 150 / 200 = 0.75
        assert_eq!(analyze_text(&words(150)).reading_stats.reading_time_minutes, 0.8);
        assert_eq!(analyze_text(&words(250)).reading_stats.reading_time_minutes, 1.2);
    }

    #[test]
    fn test_language_threshold_from_settings() {
        let strict = TextAnalyzer::new(AnalyticsSettings {
            language_min_score: 100,
            ..AnalyticsSettings::default()
        });
        assert_eq!(
            strict.detect_language("The cat and the dog have gone for a walk with you"),
            Language::Unknown
        );
    }

    #[test]
    fn test_report_shape() {
        let value = serde_json::to_value(analyze_text("Hello world.")).unwrap();
        for section in ["basic_stats", "averages", "reading_stats", "word_analysis", "content_info"] {
            assert!(value.get(section).is_some(), "missing {}", section);
        }
        assert_eq!(value["content_info"]["type"], "plain_text");
        assert_eq!(value["content_info"]["language"], "unknown");
    }
}
