//! Turning a graded prompt into learner evidence.

use std::collections::BTreeMap;

use super::{Attempt, EntityKind, EvidenceReport, LearningSdk, ModelStore, GAME_FILTER};
use crate::quiz::{describe_prompt, GradedPrompt};

/// Event name attached to every quiz evidence report.
pub const EVIDENCE_EVENT: &str = "shape_quiz_answered";

/// What happened to the evidence for one graded prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOutcome {
    Sent,
    /// The model store does not know the prompt, or has no items for it
    Skipped,
    Failed,
}

/// Build the report for a graded prompt, or `None` when the model store has
/// nothing to attribute it to.
///
/// Every item gets the same outcome: all true when the answer was exactly
/// right, all false on any missed or extra selection.
pub fn build_evidence_report(
    store: &dyn ModelStore,
    learner_id: &str,
    graded: &GradedPrompt,
) -> Option<EvidenceReport> {
    let prompt_uri = describe_prompt(graded.prompt);
    store.entity_by_uri(EntityKind::Prompt, &prompt_uri)?;

    let items = store.items(GAME_FILTER, &prompt_uri);
    if items.is_empty() {
        return None;
    }

    // TODO: attribute false positives to the dimension that caused them
    // instead of failing every item.
    let outcome = graded.grade.is_correct;
    let attempts = items
        .iter()
        .map(|item| Attempt {
            item_uri: item.uri.clone(),
            outcome,
        })
        .collect();

    let prompt_answers: BTreeMap<String, String> = store
        .categories(&prompt_uri)
        .into_iter()
        .map(|category| {
            let picked = graded
                .selected_choices()
                .map(|c| category.dimension.variant_name(c.variant(category.dimension)))
                .collect::<Vec<_>>()
                .join(",");
            (category.uri.clone(), picked)
        })
        .collect();

    Some(EvidenceReport {
        event_name: EVIDENCE_EVENT.to_string(),
        learner_id: learner_id.to_string(),
        prompt_uri,
        attempts,
        prompt_answers,
    })
}

/// Build and send the evidence for a graded prompt. Failures are logged and
/// never propagate to the quiz.
pub fn report_graded_prompt(
    sdk: &mut dyn LearningSdk,
    store: &dyn ModelStore,
    learner_id: &str,
    graded: &GradedPrompt,
) -> ReportOutcome {
    let report = match build_evidence_report(store, learner_id, graded) {
        Some(report) => report,
        None => {
            log::debug!(
                "no model entry for prompt {:#05x}, evidence skipped",
                graded.prompt.bits()
            );
            return ReportOutcome::Skipped;
        }
    };

    match sdk.report_evidence(&report) {
        Ok(()) => {
            log::debug!(
                "evidence sent prompt:{} correct:{} items:{}",
                report.prompt_uri,
                graded.grade.is_correct,
                report.attempts.len()
            );
            ReportOutcome::Sent
        }
        Err(e) => {
            log::warn!("evidence report for {} failed: {}", report.prompt_uri, e);
            ReportOutcome::Failed
        }
    }
}
