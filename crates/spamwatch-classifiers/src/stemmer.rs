//! Porter stemming algorithm.
//!
//! Reduces English words to a root form by staged suffix rewriting:
//! 1. Plurals and `-ed`/`-ing` suffixes, final `y -> i`
//! 2. Double suffixes such as `-ational -> -ate`
//! 3. `-icate -> -ic`, `-ful -> ""`, ...
//! 4. Single suffixes such as `-ance`, `-ment`, `-ion`
//! 5. Final `-e` and `-ll`
//!
//! The rule tables follow the revised variant shipped as the default by
//! NLTK, so stems line up with vocabularies fitted by Python pipelines:
//! an irregular-form table, `ies`/`ied` handling for four-letter words,
//! `y -> i` only after a consonant, and the `bli`, `fulli`, `logi` rules.
//!
//! Within each step the first rule whose suffix matches decides. If its
//! condition fails the word is left alone for that step.

/// Words whose stem cannot be derived by the rules.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("skies", "sky"),
    ("sky", "sky"),
    ("dying", "die"),
    ("lying", "lie"),
    ("tying", "tie"),
    ("news", "news"),
    ("innings", "inning"),
    ("inning", "inning"),
    ("outings", "outing"),
    ("outing", "outing"),
    ("cannings", "canning"),
    ("canning", "canning"),
    ("howe", "howe"),
    ("proceed", "proceed"),
    ("exceed", "exceed"),
    ("succeed", "succeed"),
];

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("fulli", "ful"),
    ("logi", "log"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Stateless Porter stemmer
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        Self
    }

    /// Stem a single word. The input is lowercased first.
    pub fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();

        if let Some((_, stem)) = IRREGULAR_FORMS.iter().find(|(form, _)| *form == lower) {
            return (*stem).to_string();
        }

        let mut w: Vec<char> = lower.chars().collect();
        if w.len() <= 2 {
            return lower;
        }

        step1a(&mut w);
        step1b(&mut w);
        step1c(&mut w);
        step2(&mut w);
        step3(&mut w);
        step4(&mut w);
        step5a(&mut w);
        step5b(&mut w);

        w.into_iter().collect()
    }
}

fn is_consonant(w: &[char], i: usize) -> bool {
    match w[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant transitions, the `m` of `[C](VC)^m[V]`.
fn measure(stem: &[char]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for i in 0..stem.len() {
        let consonant = is_consonant(stem, i);
        if consonant && prev_vowel {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn contains_vowel(stem: &[char]) -> bool {
    (0..stem.len()).any(|i| !is_consonant(stem, i))
}

fn ends_double_consonant(w: &[char]) -> bool {
    let n = w.len();
    n >= 2 && w[n - 1] == w[n - 2] && is_consonant(w, n - 1)
}

fn ends_cvc(w: &[char]) -> bool {
    let n = w.len();
    if n >= 3 {
        is_consonant(w, n - 3)
            && !is_consonant(w, n - 2)
            && is_consonant(w, n - 1)
            && !matches!(w[n - 1], 'w' | 'x' | 'y')
    } else {
        n == 2 && !is_consonant(w, 0) && is_consonant(w, 1)
    }
}

fn ends_with(w: &[char], suffix: &str) -> bool {
    let n = suffix.len();
    w.len() >= n && w[w.len() - n..].iter().copied().eq(suffix.chars())
}

fn replace_suffix(w: &mut Vec<char>, suffix_len: usize, replacement: &str) {
    w.truncate(w.len() - suffix_len);
    w.extend(replacement.chars());
}

/// Apply the first rule whose suffix matches, if `condition` accepts the
/// remaining stem. Returns whether any suffix matched.
fn apply_rules<F>(w: &mut Vec<char>, rules: &[(&str, &str)], condition: F) -> bool
where
    F: Fn(&[char], &str) -> bool,
{
    for (suffix, replacement) in rules {
        if ends_with(w, suffix) {
            let stem_len = w.len() - suffix.len();
            if condition(&w[..stem_len], suffix) {
                replace_suffix(w, suffix.len(), replacement);
            }
            return true;
        }
    }
    false
}

fn step1a(w: &mut Vec<char>) {
    if w.len() == 4 && ends_with(w, "ies") {
        replace_suffix(w, 3, "ie");
        return;
    }
    apply_rules(
        w,
        &[("sses", "ss"), ("ies", "i"), ("ss", "ss"), ("s", "")],
        |_, _| true,
    );
}

fn step1b(w: &mut Vec<char>) {
    if ends_with(w, "ied") {
        let replacement = if w.len() == 4 { "ie" } else { "i" };
        replace_suffix(w, 3, replacement);
        return;
    }

    if ends_with(w, "eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            replace_suffix(w, 3, "ee");
        }
        return;
    }

    let suffix_len = if ends_with(w, "ed") && contains_vowel(&w[..w.len() - 2]) {
        2
    } else if ends_with(w, "ing") && contains_vowel(&w[..w.len() - 3]) {
        3
    } else {
        return;
    };
    w.truncate(w.len() - suffix_len);

    if ends_with(w, "at") || ends_with(w, "bl") || ends_with(w, "iz") {
        w.push('e');
    } else if ends_double_consonant(w) {
        if !matches!(w.last(), Some('l' | 's' | 'z')) {
            w.pop();
        }
    } else if measure(w) == 1 && ends_cvc(w) {
        w.push('e');
    }
}

fn step1c(w: &mut Vec<char>) {
    let n = w.len();
    if ends_with(w, "y") && n - 1 > 1 && is_consonant(&w[..n - 1], n - 2) {
        w[n - 1] = 'i';
    }
}

fn step2(w: &mut Vec<char>) {
    if ends_with(w, "alli") && measure(&w[..w.len() - 4]) > 0 {
        replace_suffix(w, 4, "al");
        step2(w);
        return;
    }

    apply_rules(w, STEP2_RULES, |stem, suffix| {
        if suffix == "logi" {
            // the `l` stays with the stem when measuring
            let mut with_l = stem.to_vec();
            with_l.push('l');
            measure(&with_l) > 0
        } else {
            measure(stem) > 0
        }
    });
}

fn step3(w: &mut Vec<char>) {
    apply_rules(w, STEP3_RULES, |stem, _| measure(stem) > 0);
}

fn step4(w: &mut Vec<char>) {
    for suffix in STEP4_SUFFIXES {
        if ends_with(w, suffix) {
            let stem = &w[..w.len() - suffix.len()];
            let accept = measure(stem) > 1
                && (*suffix != "ion" || matches!(stem.last(), Some('s' | 't')));
            if accept {
                w.truncate(stem.len());
            }
            return;
        }
    }
}

fn step5a(w: &mut Vec<char>) {
    if ends_with(w, "e") {
        let stem = &w[..w.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            w.pop();
        }
    }
}

fn step5b(w: &mut Vec<char>) {
    if ends_with(w, "ll") && measure(&w[..w.len() - 1]) > 1 {
        w.pop();
    }
}
