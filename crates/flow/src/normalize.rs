use unicode_normalization::UnicodeNormalization;

/// Canonical form used for keyword matching.
///
/// Lowercases, decomposes to NFD and drops combining diacritical marks
/// (U+0300..=U+036F), then trims surrounding whitespace. Total over any
/// input; the empty string maps to itself.
pub fn normalize_text(text: &str) -> String {
    let folded = text
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_diacritic(*ch))
        .collect::<String>();

    folded.trim().to_string()
}

fn is_combining_diacritic(ch: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_and_case() {
        assert_eq!(normalize_text("  Não É Possível "), "nao e possivel");
        assert_eq!(normalize_text("Só CURIOSO"), "so curioso");
        assert_eq!(normalize_text("começar"), "comecar");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize_text(""), "");
        assert_eq!(normalize_text(" \t\n "), "");
    }

    #[test]
    fn emoji_and_punctuation_survive() {
        assert_eq!(normalize_text("Sim 😊!"), "sim 😊!");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "Não seria problema",
            "  DEPENDE do valor ",
            "À tarde, às vezes",
            "Ç ñ ü Å",
            "",
            "1 hora",
        ];

        for sample in samples {
            let once = normalize_text(sample);
            assert_eq!(normalize_text(&once), once, "sample {sample:?}");
        }
    }
}
