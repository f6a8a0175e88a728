use super::{ContentLibrary, ContentPage, ContentProvider, ContentTier, Segment, TranslatableUnit};
use once_cell::sync::Lazy;

/// Pages carrying demo text; later pages of the book are blank in the demo.
pub(crate) const DEMO_PAGE_COUNT: u32 = 14;

// `[word]` marks a revealed unit, `{word}` a unit that stays hidden.
const WORD_LEVEL_PARAGRAPHS: &[&str] = &[
    "The old [house] stood at the end of the [street], behind a {garden} of roses.",
    "Every [morning] the [baker] opened his {window} and sang to the [birds].",
    "Marie walked to the [market] with her [brother] and bought fresh {bread}.",
    "In the [evening] the whole [family] sat by the {fire} and told [stories].",
    "A small [dog] followed them home through the {rain} and the [wind].",
    "The [doctor] wrote a long [letter] to her {friend} across the [sea].",
    "At the [station] the [train] was late, so they shared an {apple}.",
];

// A leading `~` marks a sentence whose translation stays hidden.
const SENTENCE_LEVEL_PARAGRAPHS: &[&[&str]] = &[
    &[
        "The old house stood at the end of the street.",
        "~Behind it grew a garden of roses.",
    ],
    &[
        "Every morning the baker opened his window.",
        "He sang to the birds while the bread was baking.",
    ],
    &[
        "Marie walked to the market with her brother.",
        "~They bought fresh bread and a basket of pears.",
    ],
    &[
        "In the evening the whole family sat by the fire.",
        "Grandfather told stories about the war and the sea.",
    ],
    &[
        "A small dog followed them home through the rain.",
        "~Nobody knew where it had come from.",
    ],
];

static WORD_LEVEL: Lazy<ContentLibrary> = Lazy::new(|| build_library(ContentTier::WordLevel));
static SENTENCE_LEVEL: Lazy<ContentLibrary> =
    Lazy::new(|| build_library(ContentTier::SentenceLevel));

/// Built-in content tables, shared process-wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticContent;

impl ContentProvider for StaticContent {
    fn content(&self, tier: ContentTier) -> &ContentLibrary {
        match tier {
            ContentTier::WordLevel => &WORD_LEVEL,
            ContentTier::SentenceLevel => &SENTENCE_LEVEL,
        }
    }
}

fn build_library(tier: ContentTier) -> ContentLibrary {
    (1..=DEMO_PAGE_COUNT)
        .map(|number| {
            let idx = number as usize;
            let paragraphs = match tier {
                ContentTier::WordLevel => {
                    let count = WORD_LEVEL_PARAGRAPHS.len();
                    vec![
                        parse_word_paragraph(WORD_LEVEL_PARAGRAPHS[idx % count]),
                        parse_word_paragraph(WORD_LEVEL_PARAGRAPHS[(idx + 3) % count]),
                    ]
                }
                ContentTier::SentenceLevel => {
                    let count = SENTENCE_LEVEL_PARAGRAPHS.len();
                    vec![
                        sentence_paragraph(SENTENCE_LEVEL_PARAGRAPHS[idx % count]),
                        sentence_paragraph(SENTENCE_LEVEL_PARAGRAPHS[(idx + 2) % count]),
                    ]
                }
            };
            (number, ContentPage { number, paragraphs })
        })
        .collect()
}

fn parse_word_paragraph(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut plain = String::new();
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        let close = match ch {
            '[' => ']',
            '{' => '}',
            _ => {
                plain.push(ch);
                continue;
            }
        };
        if !plain.is_empty() {
            segments.push(Segment::Plain(std::mem::take(&mut plain)));
        }
        let word: String = chars.by_ref().take_while(|c| *c != close).collect();
        segments.push(Segment::Translatable(TranslatableUnit {
            translation_key: Some(word.to_lowercase()),
            source_text: word,
            revealed: close == ']',
        }));
    }

    if !plain.is_empty() {
        segments.push(Segment::Plain(plain));
    }
    segments
}

fn sentence_paragraph(sentences: &[&str]) -> Vec<Segment> {
    sentences
        .iter()
        .map(|sentence| {
            let (revealed, text) = match sentence.strip_prefix('~') {
                Some(rest) => (false, rest),
                None => (true, *sentence),
            };
            Segment::Translatable(TranslatableUnit {
                source_text: text.to_string(),
                translation_key: Some(sentence_key(text)),
                revealed,
            })
        })
        .collect()
}

/// Dictionary key for a whole sentence: lowercase words joined by `_`.
pub(crate) fn sentence_key(text: &str) -> String {
    let words: Vec<String> = text
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect();
    format!("s.{}", words.join("_"))
}
