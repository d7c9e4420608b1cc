fn normalize_token(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr = vec![0; b_chars.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b_chars.len()]
}

fn distance(input: &str, candidate: &str) -> Option<usize> {
    if input.is_empty() || candidate.is_empty() {
        return None;
    }
    if input == candidate {
        return Some(0);
    }
    if input.contains(candidate) || candidate.contains(input) {
        return Some(1);
    }
    Some(levenshtein(input, candidate))
}

fn max_allowed_distance(normalized: &str) -> usize {
    match normalized.len() {
        0 => 0,
        1..=4 => 1,
        5..=8 => 2,
        len => ((len as f32 * 0.35).floor() as usize).max(3),
    }
}

/// Ranks `candidates` by edit distance to `input`, closest first.
pub fn suggest(input: &str, candidates: &[String], limit: usize) -> Vec<String> {
    let needle = normalize_token(input);
    if needle.is_empty() {
        return Vec::new();
    }
    let allowed = max_allowed_distance(&needle);
    let mut scored: Vec<(&String, usize)> = candidates
        .iter()
        .filter_map(|candidate| {
            let score = distance(&needle, &normalize_token(candidate))?;
            (score <= allowed).then_some((candidate, score))
        })
        .collect();
    scored.sort_by(|a, b| {
        a.1.cmp(&b.1)
            .then_with(|| a.0.len().cmp(&b.0.len()))
            .then_with(|| a.0.cmp(b.0))
    });
    let mut out: Vec<String> = Vec::new();
    for (candidate, _) in scored {
        if !out.contains(candidate) {
            out.push(candidate.clone());
        }
        if out.len() >= limit.max(1) {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closest_candidate_first() {
        let candidates = vec![
            "api_put".to_string(),
            "api_post".to_string(),
            "api_post_form".to_string(),
        ];
        let out = suggest("api_posr", &candidates, 2);
        assert_eq!(out.first().map(String::as_str), Some("api_post"));
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(suggest("  ", &["api_get".to_string()], 3).is_empty());
    }
}
