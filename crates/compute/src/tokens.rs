//! Word tokens and sentence boundaries over a text, by byte offset.

use noesis_core::Span;

/// Characters that end a sentence when they appear between two words.
const SENTENCE_BREAKS: &[char] = &['.', '!', '?', ';', '…', '\n'];

/// Word tokens of a text with their sentence numbers.
///
/// A token is a maximal run of word characters (letters, digits, `_` and
/// combining marks). A `.` directly between two word characters (`3.5`,
/// `e.g`) does not end a sentence.
#[derive(Debug, Clone)]
pub struct TokenIndex<'a> {
    text: &'a str,
    tokens: Vec<Span>,
    sentences: Vec<usize>,
}

impl<'a> TokenIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokens = Vec::new();
        let mut sentences = Vec::new();
        let mut sentence = 0usize;
        let mut start: Option<usize> = None;
        let mut pending_break = false;
        let mut prev: Option<char> = None;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if is_word_char(c) {
                if start.is_none() {
                    if pending_break && !tokens.is_empty() {
                        sentence += 1;
                    }
                    pending_break = false;
                    start = Some(i);
                }
            } else {
                if let Some(s) = start.take() {
                    tokens.push(Span::new(s, i));
                    sentences.push(sentence);
                }
                if SENTENCE_BREAKS.contains(&c) {
                    let inner_dot = c == '.'
                        && prev.is_some_and(is_word_char)
                        && chars.peek().is_some_and(|&(_, n)| is_word_char(n));
                    if !inner_dot {
                        pending_break = true;
                    }
                }
            }
            prev = Some(c);
        }
        if let Some(s) = start {
            tokens.push(Span::new(s, text.len()));
            sentences.push(sentence);
        }

        Self {
            text,
            tokens,
            sentences,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn text(&self, token: usize) -> &'a str {
        let span = self.tokens[token];
        &self.text[span.start..span.end]
    }

    pub fn sentence(&self, token: usize) -> usize {
        self.sentences[token]
    }

    /// First and last token touched by a byte span, or `None` when the span
    /// covers no word characters.
    pub fn token_range(&self, span: Span) -> Option<(usize, usize)> {
        let first = self.tokens.partition_point(|t| t.end <= span.start);
        let end = self.tokens.partition_point(|t| t.start < span.end);
        if first < end {
            Some((first, end - 1))
        } else {
            None
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || ('\u{0300}'..='\u{036F}').contains(&c)
}
