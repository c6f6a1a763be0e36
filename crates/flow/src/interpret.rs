use crate::normalize::normalize_text;
use crate::step::{Choice, StepId, StepTable};

/// Resolves a raw reply to one of the step's choice labels.
///
/// A bare `a`/`b`/`c` (any case or accent) wins outright. Otherwise each
/// label is tried in [`Choice::ORDER`] and the first one owning a keyword
/// contained in the normalized reply is returned. Containment is plain
/// substring matching, so `"olhando"` on P1 resolves to `A` through the
/// `"a"` keyword before `C` is ever tried.
///
/// Returns `None` for undeclared steps, steps without keyword lists and
/// replies that match nothing.
pub fn interpret_answer(table: &StepTable, step: StepId, input: &str) -> Option<Choice> {
    let keywords = table.lookup(step)?.keywords?;
    let normalized = normalize_text(input);

    if let Some(choice) = Choice::from_exact(&normalized) {
        return Some(choice);
    }

    Choice::ORDER.into_iter().find(|choice| {
        keywords.for_choice(*choice).iter().any(|keyword| {
            let keyword = normalize_text(keyword);
            !keyword.is_empty() && normalized.contains(keyword.as_str())
        })
    })
}
