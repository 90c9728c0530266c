//! Bilingual stop-word sets and stop-word based language detection.

use std::collections::HashSet;

use super::Language;

const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "couldn", "d", "did", "didn", "do", "does", "doesn", "doing",
    "don", "down", "during", "each", "few", "for", "from", "further", "had", "hadn", "has",
    "hasn", "have", "haven", "having", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "i", "if", "in", "into", "is", "isn", "it", "its", "itself", "just", "ll", "m",
    "ma", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "o", "of", "off", "on",
    "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "re", "s",
    "same", "she", "should", "shouldn", "so", "some", "such", "t", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
    "to", "too", "under", "until", "up", "ve", "very", "was", "wasn", "we", "were", "weren",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "won",
    "wouldn", "y", "you", "your", "yours", "yourself", "yourselves", "also", "get", "got", "im",
    "ok", "okay", "yes", "yeah", "oh",
];

const SPANISH: &[&str] = &[
    "a", "al", "algo", "algunas", "algunos", "ante", "antes", "como", "con", "contra", "cual",
    "cuando", "de", "del", "desde", "donde", "durante", "e", "el", "ella", "ellas", "ellos", "en",
    "entre", "era", "erais", "eran", "eras", "eres", "es", "esa", "esas", "ese", "eso", "esos",
    "esta", "estaba", "estado", "estamos", "estan", "estar", "estas", "este", "esto", "estos",
    "estoy", "está", "están", "fue", "fueron", "fui", "ha", "había", "han", "has", "hasta", "hay",
    "he", "la", "las", "le", "les", "lo", "los", "me", "mi", "mis", "mucho", "muchos", "muy",
    "más", "mí", "mía", "mío", "nada", "ni", "no", "nos", "nosotros", "nuestra", "nuestro", "o",
    "os", "otra", "otros", "para", "pero", "poco", "por", "porque", "que", "quien", "quienes",
    "qué", "se", "sea", "ser", "si", "sido", "sin", "sobre", "sois", "somos", "son", "soy", "su",
    "sus", "suya", "suyo", "sí", "también", "tanto", "te", "tenemos", "tener", "tengo", "ti",
    "tiene", "tienen", "todo", "todos", "tu", "tus", "tú", "un", "una", "uno", "unos", "vosotros",
    "y", "ya", "yo", "él", "pues", "bueno", "eh", "ah", "jaja", "jajaja", "q", "x", "xq",
];

/// Read-only English and Spanish stop-word sets.
///
/// Cleaned word counts exclude tokens found in either set, whatever the
/// detected language, so bilingual transcripts are filtered consistently.
#[derive(Debug, Clone)]
pub struct StopWords {
    english: HashSet<String>,
    spanish: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StopWords {
    /// Built-in lists.
    pub fn builtin() -> Self {
        Self {
            english: ENGLISH.iter().map(|w| (*w).to_string()).collect(),
            spanish: SPANISH.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// Adds lowercase words to one language's set.
    #[must_use]
    pub fn with_words<I, S>(mut self, language: Language, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = match language {
            Language::En => &mut self.english,
            Language::Es => &mut self.spanish,
        };
        set.extend(words.into_iter().map(|w| w.into().to_lowercase()));
        self
    }

    /// Returns `true` if `token` is a stop word in the given language.
    pub fn is_stop_word(&self, language: Language, token: &str) -> bool {
        match language {
            Language::En => self.english.contains(token),
            Language::Es => self.spanish.contains(token),
        }
    }

    /// Returns `true` if `token` is a stop word in either language.
    pub fn contains(&self, token: &str) -> bool {
        self.english.contains(token) || self.spanish.contains(token)
    }

    /// Guesses the language of lowercase tokens from stop-word hits.
    ///
    /// Only the first `sample` tokens are inspected. Ties favor English.
    pub fn detect_language<S: AsRef<str>>(&self, tokens: &[S], sample: usize) -> Language {
        let (en, es) = tokens
            .iter()
            .take(sample)
            .fold((0usize, 0usize), |(en, es), token| {
                let token = token.as_ref();
                (
                    en + usize::from(self.is_stop_word(Language::En, token)),
                    es + usize::from(self.is_stop_word(Language::Es, token)),
                )
            });

        if es > en { Language::Es } else { Language::En }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_either_language() {
        let stop = StopWords::builtin();
        assert!(stop.contains("the"));
        assert!(stop.contains("pero"));
        assert!(!stop.contains("pizza"));
    }

    #[test]
    fn test_detect_english() {
        let stop = StopWords::builtin();
        let tokens = ["i", "think", "the", "movie", "was", "great"];
        assert_eq!(stop.detect_language(&tokens, 60), Language::En);
    }

    #[test]
    fn test_detect_spanish() {
        let stop = StopWords::builtin();
        let tokens = ["creo", "que", "la", "película", "estuvo", "muy", "buena"];
        assert_eq!(stop.detect_language(&tokens, 60), Language::Es);
    }

    #[test]
    fn test_detect_tie_favors_english() {
        let stop = StopWords::builtin();
        assert_eq!(stop.detect_language::<&str>(&[], 60), Language::En);
        assert_eq!(stop.detect_language(&["pizza", "taco"], 60), Language::En);
    }

    #[test]
    fn test_detect_respects_sample_size() {
        let stop = StopWords::builtin();
        let tokens = ["the", "que", "la", "de"];
        assert_eq!(stop.detect_language(&tokens, 1), Language::En);
        assert_eq!(stop.detect_language(&tokens, 4), Language::Es);
    }

    #[test]
    fn test_with_words() {
        let stop = StopWords::builtin().with_words(Language::En, ["LOL"]);
        assert!(stop.is_stop_word(Language::En, "lol"));
        assert!(!stop.is_stop_word(Language::Es, "lol"));
    }

    #[test]
    fn test_added_words_steer_detection() {
        let stop = StopWords::builtin().with_words(Language::Es, ["che", "boludo"]);
        assert_eq!(stop.detect_language(&["che", "boludo", "hello"], 10), Language::Es);
    }
}
