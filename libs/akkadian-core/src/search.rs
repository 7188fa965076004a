//! Search algorithms for the lookup feature.
//!
//! English lookups are literal: every English headword containing the query
//! is a candidate, and candidates are returned shortest first.
//!
//! Akkadian lookups compare the query length to a cutoff. Short queries use
//! prefix search: a headword qualifies if it starts with the query once
//! diacritical marks are ignored. Longer queries use edit distance: the
//! Levenshtein distance to every headword is computed with the same
//! diacritic-folding character comparison, a same-length pair additionally
//! takes the smaller of Levenshtein and Hamming distance, and headwords
//! within the cutoff are returned nearest first.
//!
//! You usually know how to spell the English word you want, but you might
//! not know the exact diacritical marks of the Akkadian one.

use crate::dictionary::Dictionary;
use crate::types::LookupSettings;

fn fold_class(c: char) -> Option<u8> {
    match c {
        's' | 'š' | 'ṣ' => Some(0),
        't' | 'ṭ' => Some(1),
        'h' | 'ḫ' => Some(2),
        'a' | 'ā' | 'â' => Some(3),
        'e' | 'ē' | 'ê' => Some(4),
        'i' | 'ī' | 'î' => Some(5),
        'u' | 'ū' | 'û' => Some(6),
        _ => None,
    }
}

/// True if the characters are equal once diacritical marks are ignored, so
/// a plain `s` matches both `š` and `ṣ`. Symmetric and total; characters
/// outside the folded alphabet compare by identity.
pub fn fold_eq(a: char, b: char) -> bool {
    match (fold_class(a), fold_class(b)) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn starts_with_folded(word: &[char], prefix: &[char]) -> bool {
    word.len() >= prefix.len() && prefix.iter().zip(word).all(|(p, w)| fold_eq(*p, *w))
}

fn lev_dist(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if fold_eq(a[i - 1], b[j - 1]) { 0 } else { 1 };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

fn hamming_dist(a: &[char], b: &[char]) -> usize {
    a.iter().zip(b).filter(|(x, y)| !fold_eq(**x, **y)).count()
}

/// Levenshtein distance with diacritic-folding character equality.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    lev_dist(&a, &b)
}

impl Dictionary {
    /// Look up headwords similar to the query. The query is trimmed;
    /// dictionary data never is. Results are capped at `limit`.
    pub fn search(&self, query: &str, limit: usize, cutoff: usize, engl: bool) -> Vec<String> {
        let query = query.trim();

        if engl {
            return self.engl_search(query, limit);
        }

        if query.chars().count() <= cutoff {
            self.prefix_search(query, limit)
        } else {
            self.distance_search(query, limit, cutoff)
        }
    }

    /// [`Dictionary::search`] with configured limit and cutoff.
    pub fn search_with(&self, query: &str, settings: &LookupSettings, engl: bool) -> Vec<String> {
        self.search(query, settings.limit, settings.cutoff, engl)
    }

    fn engl_search(&self, query: &str, limit: usize) -> Vec<String> {
        let mut out: Vec<&String> = self
            .keys(true)
            .iter()
            .filter(|word| word.contains(query))
            .collect();

        out.sort_by_key(|word| word.chars().count());
        out.truncate(limit);

        out.into_iter().cloned().collect()
    }

    fn prefix_search(&self, query: &str, limit: usize) -> Vec<String> {
        let prefix: Vec<char> = query.chars().collect();

        let mut out: Vec<&String> = self
            .keys(false)
            .iter()
            .filter(|word| {
                let chars: Vec<char> = word.chars().collect();
                starts_with_folded(&chars, &prefix)
            })
            .collect();

        out.sort_by_key(|word| word.chars().count());
        out.truncate(limit);

        out.into_iter().cloned().collect()
    }

    fn distance_search(&self, query: &str, limit: usize, cutoff: usize) -> Vec<String> {
        let q: Vec<char> = query.chars().collect();
        let mut results: Vec<(usize, &String)> = Vec::new();

        for word in self.keys(false) {
            let w: Vec<char> = word.chars().collect();
            let mut dist = lev_dist(&q, &w);

            // Prioritize substitutions when the lengths line up
            if q.len() == w.len() {
                dist = dist.min(hamming_dist(&q, &w));
            }

            if dist <= cutoff {
                results.push((dist, word));
            }
        }

        results.sort_by_key(|(dist, _)| *dist);
        results.truncate(limit);

        results.into_iter().map(|(_, word)| word.clone()).collect()
    }
}
