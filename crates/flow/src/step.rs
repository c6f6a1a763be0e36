use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use snafu::ensure;

use crate::error::{
    DanglingFallbackSnafu, DanglingTransitionSnafu, DuplicateStepSnafu, FlowResult,
    MissingTransitionsSnafu, TerminalHasTransitionsSnafu, UnknownStepSnafu,
    UnreachableTerminalSnafu,
};

/// Identifier of one state in the qualification dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepId {
    Start,
    Question1,
    Question1FollowUp,
    Question2,
    Question3,
    Success,
    Declined,
}

impl StepId {
    pub const INITIAL: StepId = StepId::Start;
    pub const ALL: [StepId; 7] = [
        StepId::Start,
        StepId::Question1,
        StepId::Question1FollowUp,
        StepId::Question2,
        StepId::Question3,
        StepId::Success,
        StepId::Declined,
    ];

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Declined)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "START",
            Self::Question1 => "P1",
            Self::Question1FollowUp => "P1_FOLLOWUP",
            Self::Question2 => "P2",
            Self::Question3 => "P3",
            Self::Success => "SUCCESS",
            Self::Declined => "END",
        }
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// One of the three categorical answers a step offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Choice {
    A,
    B,
    C,
}

impl Choice {
    /// Fixed checking order. Ties between labels are always broken by this order.
    pub const ORDER: [Choice; 3] = [Choice::A, Choice::B, Choice::C];

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
        }
    }

    /// Matches an already normalized input against the bare single-letter labels.
    pub fn from_exact(normalized: &str) -> Option<Self> {
        Self::ORDER
            .into_iter()
            .find(|choice| choice.label() == normalized)
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => formatter.write_str("A"),
            Self::B => formatter.write_str("B"),
            Self::C => formatter.write_str("C"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceKeywords {
    pub a: &'static [&'static str],
    pub b: &'static [&'static str],
    pub c: &'static [&'static str],
}

impl ChoiceKeywords {
    pub fn for_choice(&self, choice: Choice) -> &'static [&'static str] {
        match choice {
            Choice::A => self.a,
            Choice::B => self.b,
            Choice::C => self.c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transitions {
    pub a: StepId,
    pub b: StepId,
    pub c: StepId,
    /// Where unrecognized input leads. `None` keeps the cursor in place.
    pub unrecognized: Option<StepId>,
}

impl Transitions {
    pub fn target(&self, choice: Choice) -> StepId {
        match choice {
            Choice::A => self.a,
            Choice::B => self.b,
            Choice::C => self.c,
        }
    }
}

/// A prompt bundled with its branching rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub id: StepId,
    pub message: &'static str,
    pub keywords: Option<ChoiceKeywords>,
    pub transitions: Option<Transitions>,
}

impl Step {
    pub fn is_terminal(&self) -> bool {
        self.id.is_terminal()
    }
}

/// Static mapping from step identifier to its definition.
///
/// Tables built through [`StepTable::new`] form a closed graph: every
/// transition target is declared, both terminals are reachable from
/// [`StepId::INITIAL`] and terminals never transition.
#[derive(Debug, Clone, Copy)]
pub struct StepTable {
    steps: &'static [Step],
}

impl StepTable {
    pub fn new(steps: &'static [Step]) -> FlowResult<Self> {
        let table = Self { steps };
        table.validate()?;
        Ok(table)
    }

    /// The built-in qualification script.
    pub fn standard() -> Self {
        // Validated by `standard_script_is_a_closed_graph`.
        Self {
            steps: &crate::script::STANDARD_STEPS,
        }
    }

    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    pub fn lookup(&self, id: StepId) -> Option<&'static Step> {
        self.steps.iter().find(|step| step.id == id)
    }

    pub fn get(&self, id: StepId, stage: &'static str) -> FlowResult<&'static Step> {
        match self.lookup(id) {
            Some(step) => Ok(step),
            None => UnknownStepSnafu { stage, step: id }.fail(),
        }
    }

    /// Every step reachable from `start` by following declared transitions.
    pub fn reachable_from(&self, start: StepId) -> BTreeSet<StepId> {
        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from([start]);

        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            let Some(transitions) = self.lookup(id).and_then(|step| step.transitions) else {
                continue;
            };

            queue.extend(Choice::ORDER.map(|choice| transitions.target(choice)));
            queue.extend(transitions.unrecognized);
        }

        seen
    }

    fn validate(&self) -> FlowResult<()> {
        let mut declared = BTreeSet::new();
        for step in self.steps {
            ensure!(
                declared.insert(step.id),
                DuplicateStepSnafu {
                    stage: "validate-unique-ids",
                    step: step.id,
                }
            );
        }

        self.get(StepId::INITIAL, "validate-initial-step")?;

        for step in self.steps {
            self.validate_step(step, &declared)?;
        }

        let reachable = self.reachable_from(StepId::INITIAL);
        for terminal in [StepId::Success, StepId::Declined] {
            ensure!(
                reachable.contains(&terminal),
                UnreachableTerminalSnafu {
                    stage: "validate-reachability",
                    start: StepId::INITIAL,
                    step: terminal,
                }
            );
        }

        Ok(())
    }

    fn validate_step(&self, step: &Step, declared: &BTreeSet<StepId>) -> FlowResult<()> {
        if step.is_terminal() {
            ensure!(
                step.transitions.is_none(),
                TerminalHasTransitionsSnafu {
                    stage: "validate-terminal",
                    step: step.id,
                }
            );
            return Ok(());
        }

        let (Some(transitions), Some(_)) = (step.transitions, step.keywords) else {
            return MissingTransitionsSnafu {
                stage: "validate-non-terminal",
                step: step.id,
            }
            .fail();
        };

        for choice in Choice::ORDER {
            let to = transitions.target(choice);
            ensure!(
                declared.contains(&to),
                DanglingTransitionSnafu {
                    stage: "validate-transition",
                    from: step.id,
                    choice,
                    to,
                }
            );
        }

        if let Some(to) = transitions.unrecognized {
            ensure!(
                declared.contains(&to),
                DanglingFallbackSnafu {
                    stage: "validate-fallback",
                    from: step.id,
                    to,
                }
            );
        }

        Ok(())
    }
}

impl Default for StepTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;

    const YES_NO: ChoiceKeywords = ChoiceKeywords {
        a: &["sim"],
        b: &[],
        c: &["nao"],
    };

    const fn route(a: StepId, c: StepId) -> Option<Transitions> {
        Some(Transitions {
            a,
            b: a,
            c,
            unrecognized: None,
        })
    }

    const fn question(id: StepId, transitions: Option<Transitions>) -> Step {
        Step {
            id,
            message: "?",
            keywords: Some(YES_NO),
            transitions,
        }
    }

    const fn terminal(id: StepId) -> Step {
        Step {
            id,
            message: "fim",
            keywords: None,
            transitions: None,
        }
    }

    static DANGLING: [Step; 2] = [
        question(StepId::Start, route(StepId::Question1, StepId::Declined)),
        terminal(StepId::Declined),
    ];

    static NO_SUCCESS_PATH: [Step; 3] = [
        question(StepId::Start, route(StepId::Declined, StepId::Declined)),
        terminal(StepId::Success),
        terminal(StepId::Declined),
    ];

    static TERMINAL_WITH_EXIT: [Step; 3] = [
        question(StepId::Start, route(StepId::Success, StepId::Declined)),
        question(StepId::Success, route(StepId::Start, StepId::Start)),
        terminal(StepId::Declined),
    ];

    static DUPLICATED: [Step; 4] = [
        question(StepId::Start, route(StepId::Success, StepId::Declined)),
        question(StepId::Start, route(StepId::Success, StepId::Declined)),
        terminal(StepId::Success),
        terminal(StepId::Declined),
    ];

    static MINIMAL: [Step; 3] = [
        question(StepId::Start, route(StepId::Success, StepId::Declined)),
        terminal(StepId::Success),
        terminal(StepId::Declined),
    ];

    #[test]
    fn standard_script_is_a_closed_graph() {
        let table = StepTable::new(&crate::script::STANDARD_STEPS);
        assert!(table.is_ok(), "{:?}", table.err());
    }

    #[test]
    fn every_step_id_is_declared_once_in_standard_script() {
        let table = StepTable::standard();
        for id in StepId::ALL {
            assert_eq!(
                table.steps().iter().filter(|step| step.id == id).count(),
                1,
                "step {id}"
            );
        }
    }

    #[test]
    fn exhaustive_walk_only_reaches_declared_steps_and_two_terminals() {
        let table = StepTable::standard();
        let reachable = table.reachable_from(StepId::INITIAL);

        assert!(reachable.iter().all(|id| table.lookup(*id).is_some()));
        let terminals = reachable
            .iter()
            .filter(|id| id.is_terminal())
            .copied()
            .collect::<Vec<_>>();
        assert_eq!(terminals, vec![StepId::Success, StepId::Declined]);

        for id in &reachable {
            let step = table.lookup(*id).map(|step| step.transitions.is_some());
            assert_eq!(step, Some(!id.is_terminal()), "step {id}");
        }
    }

    #[test]
    fn rejects_dangling_transition() {
        let error = StepTable::new(&DANGLING).err();
        assert!(matches!(
            error,
            Some(FlowError::DanglingTransition {
                from: StepId::Start,
                to: StepId::Question1,
                ..
            })
        ));
    }

    #[test]
    fn rejects_unreachable_terminal() {
        let error = StepTable::new(&NO_SUCCESS_PATH).err();
        assert!(matches!(
            error,
            Some(FlowError::UnreachableTerminal {
                step: StepId::Success,
                ..
            })
        ));
    }

    #[test]
    fn rejects_terminal_with_transitions() {
        let error = StepTable::new(&TERMINAL_WITH_EXIT).err();
        assert!(matches!(
            error,
            Some(FlowError::TerminalHasTransitions {
                step: StepId::Success,
                ..
            })
        ));
    }

    #[test]
    fn rejects_duplicate_steps() {
        let error = StepTable::new(&DUPLICATED).err();
        assert!(matches!(
            error,
            Some(FlowError::DuplicateStep {
                step: StepId::Start,
                ..
            })
        ));
    }

    #[test]
    fn accepts_minimal_table() {
        assert!(StepTable::new(&MINIMAL).is_ok());
    }

    #[test]
    fn exact_labels_map_to_choices() {
        assert_eq!(Choice::from_exact("a"), Some(Choice::A));
        assert_eq!(Choice::from_exact("b"), Some(Choice::B));
        assert_eq!(Choice::from_exact("c"), Some(Choice::C));
        assert_eq!(Choice::from_exact("d"), None);
        assert_eq!(Choice::from_exact("A"), None);
    }
}
