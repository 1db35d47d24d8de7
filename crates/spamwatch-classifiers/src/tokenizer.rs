//! Word tokenizer
//!
//! Text is cut into whitespace-delimited chunks, and each chunk is segmented
//! with Unicode word boundaries (UAX #29). Pieces are then glued back
//! together unless Penn Treebank conventions separate them:
//!
//! - `; @ # $ % & ? ! *`, brackets and double quotes always stand alone
//! - `:` and `,` stand alone unless a digit follows (`12:30`, `1,000`)
//! - a trailing period or ellipsis is split off, as is `--`
//! - a single hyphen joins a compound (`free-entry`)
//!
//! Contractions are split last, so `"you've won"` becomes `you`, `'ve`, `won`
//! and `"can't"` becomes `ca`, `n't`.

use unicode_segmentation::UnicodeSegmentation;

/// Clitics split off the end of a word, longest first.
const CLITIC_SUFFIXES: &[&str] = &["n't", "'ll", "'re", "'ve", "'s", "'m", "'d"];

/// Fused words the Treebank conventions split in two.
const FUSED_WORDS: &[(&str, usize)] = &[
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

/// Punctuation that is always a token of its own.
const SPLIT_PUNCTUATION: &[char] = &[
    ';', '@', '#', '$', '%', '&', '?', '!', '*', '(', ')', '[', ']', '{', '}', '<', '>', '"',
];

/// Closing marks that may follow a sentence-final period.
const CLOSERS: &[char] = &[')', ']', '}', '>', '"', '\''];

/// Split text into word and punctuation tokens.
pub fn word_tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut chunk_start = None;

    for (offset, segment) in text.split_word_bound_indices() {
        if segment.chars().all(char::is_whitespace) {
            if let Some(start) = chunk_start.take() {
                tokenize_chunk(&text[start..offset], &mut tokens);
            }
        } else if chunk_start.is_none() {
            chunk_start = Some(offset);
        }
    }
    if let Some(start) = chunk_start {
        tokenize_chunk(&text[start..], &mut tokens);
    }

    tokens
}

/// Word-boundary segments of a chunk, with `;` and letter-bound `:`/`,`
/// cut out of the segments UAX #29 keeps whole (`urgent:call`, `1;2`).
fn pieces(chunk: &str) -> Vec<&str> {
    let mut pieces = Vec::new();

    for (offset, segment) in chunk.split_word_bound_indices() {
        let mut start = 0;
        for (i, c) in segment.char_indices() {
            let end = i + c.len_utf8();
            let cut = match c {
                ';' => true,
                ':' | ',' => !starts_with_digit(&chunk[offset + end..]),
                _ => false,
            };
            if cut {
                if start < i {
                    pieces.push(&segment[start..i]);
                }
                pieces.push(&segment[i..end]);
                start = end;
            }
        }
        if start < segment.len() {
            pieces.push(&segment[start..]);
        }
    }

    pieces
}

fn tokenize_chunk<'a>(chunk: &'a str, tokens: &mut Vec<&'a str>) {
    let pieces = pieces(chunk);
    let mut word_start = 0;
    let mut offset = 0;
    let mut i = 0;

    while i < pieces.len() {
        let piece = pieces[i];
        let mut end = offset + piece.len();

        let split = match piece {
            "." | "-" => {
                while i + 1 < pieces.len() && pieces[i + 1] == piece {
                    i += 1;
                    end += piece.len();
                }
                let run = end - offset;
                if piece == "-" {
                    run >= 2
                } else {
                    run >= 3 || chunk[end..].chars().all(|c| CLOSERS.contains(&c))
                }
            }
            ":" | "," => !starts_with_digit(&chunk[end..]),
            "'" => !chunk[end..].starts_with(char::is_alphanumeric),
            _ => {
                let mut chars = piece.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => SPLIT_PUNCTUATION.contains(&c),
                    _ => false,
                }
            }
        };

        if split {
            push_word(&chunk[word_start..offset], tokens);
            tokens.push(&chunk[offset..end]);
            word_start = end;
        }
        offset = end;
        i += 1;
    }

    push_word(&chunk[word_start..], tokens);
}

fn starts_with_digit(rest: &str) -> bool {
    rest.starts_with(char::is_numeric)
}

fn push_word<'a>(word: &'a str, tokens: &mut Vec<&'a str>) {
    if word.is_empty() {
        return;
    }

    let lower = word.to_lowercase();
    if lower.len() != word.len() {
        tokens.push(word);
        return;
    }

    if let Some((_, split)) = FUSED_WORDS.iter().find(|(fused, _)| *fused == lower) {
        tokens.push(&word[..*split]);
        tokens.push(&word[*split..]);
        return;
    }

    for clitic in CLITIC_SUFFIXES {
        let split = word.len().saturating_sub(clitic.len());
        if split > 0 && lower.ends_with(clitic) && word.is_char_boundary(split) {
            tokens.push(&word[..split]);
            tokens.push(&word[split..]);
            return;
        }
    }

    tokens.push(word);
}
