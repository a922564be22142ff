use crate::domain::model::{FieldPath, Record};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

pub const ENGLISH_CODE: &str = "en";

// 外語停用字命中數的下限，且要比英文命中數多出一個以上
const MIN_FOREIGN_HITS: usize = 2;

const COMMON_ENGLISH_WORDS: &[&str] = &[
    "a", "about", "after", "all", "also", "am", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "but", "by", "can", "could", "day", "do", "does", "for", "from", "get",
    "go", "good", "got", "had", "has", "have", "he", "her", "here", "him", "his", "how", "i",
    "if", "in", "into", "is", "it", "its", "just", "know", "like", "love", "make", "me", "more",
    "my", "new", "no", "not", "now", "of", "on", "one", "only", "or", "our", "out", "people",
    "really", "said", "see", "she", "so", "some", "still", "than", "that", "the", "their",
    "them", "then", "there", "they", "think", "this", "time", "to", "today", "up", "us", "was",
    "we", "well", "were", "what", "when", "where", "which", "who", "why", "will", "with",
    "would", "you", "your",
];

// 只收英文裡不會出現的字
const FOREIGN_STOPWORDS: &[(&str, &[&str])] = &[
    (
        "es",
        &[
            "el", "la", "los", "las", "del", "es", "esta", "este", "está", "estoy", "se", "en",
            "que", "por", "para", "una", "muy", "pero", "como", "más", "mi", "mis", "su", "sus",
            "y", "hola", "gracias", "bien", "también", "yo", "tengo",
        ],
    ),
    (
        "fr",
        &[
            "le", "la", "les", "des", "du", "est", "je", "tu", "il", "elle", "nous", "vous", "et",
            "une", "pour", "pas", "avec", "très", "suis", "sur", "dans", "mais", "oui", "merci",
            "bonjour", "ce", "cette", "qui", "que", "te", "moi", "tout", "ça", "ne",
        ],
    ),
    (
        "pt",
        &[
            "o", "os", "uma", "não", "eu", "você", "muito", "obrigado", "obrigada", "com", "para",
            "que", "em", "é", "está", "mas", "das", "dos", "ele", "ela", "sei", "isso", "meu",
            "minha", "tudo", "fazer", "bom",
        ],
    ),
    (
        "de",
        &[
            "der", "das", "und", "ist", "nicht", "ich", "du", "wir", "ein", "eine", "mit", "auf",
            "für", "sehr", "danke", "aber", "auch", "den", "dem", "zu", "mein",
        ],
    ),
    (
        "it",
        &[
            "il", "gli", "che", "di", "non", "sono", "una", "molto", "grazie", "ciao", "questo",
            "ma", "anche", "della", "sei", "io", "la",
        ],
    ),
];

fn common_english_words() -> &'static HashSet<&'static str> {
    static WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    WORDS.get_or_init(|| COMMON_ENGLISH_WORDS.iter().copied().collect())
}

fn foreign_stopwords() -> &'static [(&'static str, HashSet<&'static str>)] {
    static WORDS: OnceLock<Vec<(&'static str, HashSet<&'static str>)>> = OnceLock::new();
    WORDS.get_or_init(|| {
        FOREIGN_STOPWORDS
            .iter()
            .map(|(code, words)| (*code, words.iter().copied().collect()))
            .collect()
    })
}

fn noise_re() -> &'static Regex {
    static NOISE_RE: OnceLock<Regex> = OnceLock::new();
    NOISE_RE.get_or_init(|| {
        Regex::new(r"(?i)https?://\S+|[@#]\w+").expect("valid language noise regex")
    })
}

/// 判定內容不是英文的依據
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignEvidence {
    /// 超過一半的字母不是拉丁字母
    NonLatinScript,
    /// 某個外語的停用字明顯多過英文
    Stopwords(&'static str),
}

/// 被過濾掉的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    DeclaredLanguage(Option<String>),
    NonEnglishText(ForeignEvidence),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::DeclaredLanguage(Some(code)) => write!(f, "lang of {}", code),
            Rejection::DeclaredLanguage(None) => write!(f, "missing lang"),
            Rejection::NonEnglishText(ForeignEvidence::NonLatinScript) => {
                write!(f, "text is mostly non-Latin script")
            }
            Rejection::NonEnglishText(ForeignEvidence::Stopwords(code)) => {
                write!(f, "text reads as {}", code)
            }
        }
    }
}

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
        || ('\u{00C0}'..='\u{024F}').contains(&c)
        || ('\u{1E00}'..='\u{1EFF}').contains(&c)
}

fn stopword_hits(words: &[String], list: &HashSet<&str>) -> usize {
    words.iter().filter(|word| list.contains(word.as_str())).count()
}

/// 找出文字不是英文的證據；找不到就回傳 `None`，交給宣告的語言代碼決定。
///
/// 網址、`@` 提及與 `#` 標籤先移除，不參與判斷。
pub fn foreign_evidence(text: &str) -> Option<ForeignEvidence> {
    let cleaned = noise_re().replace_all(text, " ");

    let (latin, other) = cleaned
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(latin, other), c| {
            if is_latin(c) {
                (latin + 1, other)
            } else {
                (latin, other + 1)
            }
        });
    if other > latin {
        return Some(ForeignEvidence::NonLatinScript);
    }

    let words: Vec<String> = cleaned
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect();

    let english = stopword_hits(&words, common_english_words());

    foreign_stopwords()
        .iter()
        .map(|(code, list)| (*code, stopword_hits(&words, list)))
        .filter(|(_, count)| *count >= MIN_FOREIGN_HITS && *count > english + 1)
        .max_by_key(|(_, count)| *count)
        .map(|(code, _)| ForeignEvidence::Stopwords(code))
}

/// 只保留宣告語言為 `en` 的 status。
///
/// 語言代碼照單全收（代碼可能說謊，但目前信任它）；`check_text` 開啟時，只有在文字
/// 明確帶有其他語言的證據時才否決。
#[derive(Debug, Clone)]
pub struct LanguageFilter {
    language_field: FieldPath,
    text_field: FieldPath,
    check_text: bool,
}

impl LanguageFilter {
    pub fn new(language_field: FieldPath, text_field: FieldPath, check_text: bool) -> Self {
        Self {
            language_field,
            text_field,
            check_text,
        }
    }

    pub fn check(&self, record: &Record) -> Result<(), Rejection> {
        let declared = record.text_at(&self.language_field);
        if declared != Some(ENGLISH_CODE) {
            let code = match record.lookup(&self.language_field) {
                lookup if lookup.is_missing() => None,
                lookup => Some(lookup.to_cell()),
            };
            return Err(Rejection::DeclaredLanguage(code));
        }

        if self.check_text {
            if let Some(evidence) = record.text_at(&self.text_field).and_then(foreign_evidence) {
                return Err(Rejection::NonEnglishText(evidence));
            }
        }

        Ok(())
    }

    pub fn accepts(&self, record: &Record) -> bool {
        self.check(record).is_ok()
    }
}
