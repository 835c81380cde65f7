use crate::hunt::types::Mission;

/// Lowercase, collapse whitespace runs to a single space and trim.
pub fn normalize_answer(input: &str) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Exact comparison of normalised forms. Blank input never matches.
pub fn verify_answer(submitted: &str, mission: &Mission) -> bool {
    let candidate = normalize_answer(submitted);
    if candidate.is_empty() {
        return false;
    }
    candidate == normalize_answer(&mission.answer_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hunt::types::Difficulty;

    fn mission(answer: &str) -> Mission {
        Mission::new("m", "t", "d", "s", Difficulty::Beginner, 1, answer, "h", 1)
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_answer("  O   Tempo\tESTA\na despertar "), "o tempo esta a despertar");
    }

    #[test]
    fn accepts_normalized_match() {
        let m = mission("o tempo esta a despertar");
        assert!(verify_answer("O TEMPO  esta a   despertar", &m));
        assert!(verify_answer("function soma(a,b){return a+b}", &mission("function soma(a,b){return a+b}")));
    }

    #[test]
    fn rejects_partial_and_blank() {
        let m = mission("http");
        assert!(!verify_answer("https", &m));
        assert!(!verify_answer("htt", &m));
        assert!(!verify_answer("   ", &m));
        assert!(!verify_answer("", &mission("")));
    }

    #[test]
    fn whitespace_inside_tokens_matters() {
        let m = mission("function soma(a,b){return a+b}");
        assert!(!verify_answer("function soma(a, b){return a+b}", &m));
    }
}
