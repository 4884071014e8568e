use std::{cmp, collections::BTreeSet, mem::swap};

/// Indel edit distance: like Levenshtein, but a substitution costs a
/// deletion plus an insertion. This is the metric behind the 0..100
/// similarity ratios below.
pub fn distance(s1_in: &str, s2_in: &str) -> usize {
    if s1_in == s2_in {
        return 0;
    }

    let s1: &str;
    let mut s1_len = s1_in.chars().count();

    let s2: &str;
    let mut s2_len = s2_in.chars().count();

    if s2_len > s1_len {
        s1 = s2_in;
        s2 = s1_in;
        swap(&mut s1_len, &mut s2_len);
    } else {
        s1 = s1_in;
        s2 = s2_in;
    }
    assert!(s1_len >= s2_len);

    let mut matrix = vec![vec![0usize; s2_len + 1]; s1_len + 1];
    (0..cmp::max(s1_len, s2_len) + 1).for_each(|i| {
        if s1_len >= i {
            matrix[i][0] = i;
        }
        if s2_len >= i {
            matrix[0][i] = i;
        }
    });

    s2.chars().enumerate().for_each(|(j, jc)| {
        s1.chars().enumerate().for_each(|(i, ic)| {
            let sub_cost = if ic == jc { 0 } else { 2 };
            let a = matrix[i][j + 1] + 1;
            let b = matrix[i + 1][j] + 1;
            let c = matrix[i][j] + sub_cost;
            matrix[i + 1][j + 1] = cmp::min(a, cmp::min(b, c));
        });
    });
    matrix[s1_len][s2_len]
}

/// Normalized indel similarity in 0..100.
pub fn ratio(s1: &str, s2: &str) -> f64 {
    let total = s1.chars().count() + s2.chars().count();
    if total == 0 {
        return 100.0;
    }
    let dist = distance(s1, s2);
    (1.0 - dist as f64 / total as f64) * 100.0
}

/// Token-set similarity in 0..100: symmetric and invariant under token
/// order and token repetition, so "hbf nuernberg" matches
/// "nuernberg hbf" at 100.
pub fn token_set_ratio(s1: &str, s2: &str) -> f64 {
    let tokens1: BTreeSet<&str> = s1.split_whitespace().collect();
    let tokens2: BTreeSet<&str> = s2.split_whitespace().collect();

    let common = join_tokens(tokens1.intersection(&tokens2).copied());
    let rest1 = join_tokens(tokens1.difference(&tokens2).copied());
    let rest2 = join_tokens(tokens2.difference(&tokens1).copied());

    let combined1 = concat_tokens(&common, &rest1);
    let combined2 = concat_tokens(&common, &rest2);

    ratio(&common, &combined1)
        .max(ratio(&common, &combined2))
        .max(ratio(&combined1, &combined2))
}

fn join_tokens<'a>(tokens: impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

fn concat_tokens(head: &str, tail: &str) -> String {
    if head.is_empty() {
        tail.to_string()
    } else if tail.is_empty() {
        head.to_string()
    } else {
        format!("{head} {tail}")
    }
}

#[test]
fn fuzzy_empty_vs_empty() {
    let dist = distance("", "");
    assert_eq!(dist, 0);
}

#[test]
fn fuzzy_empty_vs_nonempty() {
    let dist = distance("", "abc");
    assert_eq!(dist, 3);
}

#[test]
fn fuzzy_substitution_costs_two() {
    let dist = distance("cat", "cut");
    assert_eq!(dist, 2);
}

#[test]
fn fuzzy_insertion() {
    let dist = distance("cat", "cart");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_deletion() {
    let dist = distance("cart", "cat");
    assert_eq!(dist, 1);
}

#[test]
fn fuzzy_ratio_equal() {
    assert_eq!(ratio("lorenzkirche", "lorenzkirche"), 100.0);
}

#[test]
fn fuzzy_ratio_empty() {
    assert_eq!(ratio("", ""), 100.0);
    assert_eq!(ratio("abc", ""), 0.0);
}

#[test]
fn token_set_order_invariant() {
    let a = token_set_ratio("nuernberg hbf", "hbf nuernberg");
    assert_eq!(a, 100.0);
}

#[test]
fn token_set_subset_scores_full() {
    let a = token_set_ratio("nuernberg", "nuernberg hbf");
    assert_eq!(a, 100.0);
}

#[test]
fn token_set_symmetric() {
    let a = token_set_ratio("plaerrer", "lorenzkirche");
    let b = token_set_ratio("lorenzkirche", "plaerrer");
    assert_eq!(a, b);
}

#[test]
fn token_set_partial_overlap_beats_disjoint() {
    let near = token_set_ratio("reichenschwand rathaus", "reichenschwand bahnhof");
    let far = token_set_ratio("reichenschwand rathaus", "fuerth klinikum");
    assert!(near > far);
}
