use serde::{Deserialize, Serialize};

use super::state::{AnalysisHistoryEntry, SessionState};
use crate::domain::assessment::Condition;
use crate::domain::foundation::{SessionId, Timestamp};

/// Export view of a session: assessment snapshot plus every analysed turn.
///
/// Field names are stable; list fields inside each entry are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub session_id: SessionId,
    pub generated_at: Timestamp,
    pub current_focus: Option<String>,
    pub conditions: Vec<Condition>,
    pub entries: Vec<AnalysisHistoryEntry>,
}

impl AnalysisReport {
    pub fn from_session(state: &SessionState, generated_at: Timestamp) -> Self {
        let assessment = state.assessment();
        Self {
            session_id: state.session_id(),
            generated_at,
            current_focus: assessment.current_focus().map(str::to_string),
            conditions: assessment.conditions().values().cloned().collect(),
            entries: state.analysis_history().to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::safety::{ConcernCategory, Specialist};
    use crate::domain::session::{GenerationOutcome, TurnEngine};
    use crate::ports::SpecialistDirectory;
    use std::sync::Arc;

    struct NoSpecialists;

    impl SpecialistDirectory for NoSpecialists {
        fn roster(&self, _category: ConcernCategory) -> Vec<Specialist> {
            Vec::new()
        }
    }

    #[test]
    fn report_snapshots_assessment_and_entries() {
        let engine = TurnEngine::new(Arc::new(NoSpecialists));
        let (state, _) = SessionState::default().apply_turn(
            &engine,
            "I can't relax",
            GenerationOutcome::Completed(
                "Mental Health Concerns:\nanxiety (confidence: 70%)".to_string(),
            ),
        );

        let report = AnalysisReport::from_session(&state, Timestamp::now());
        assert_eq!(report.session_id, state.session_id());
        assert_eq!(report.current_focus.as_deref(), Some("anxiety"));
        assert_eq!(report.conditions.len(), 1);
        assert_eq!(report.entries.len(), 1);
    }

    #[test]
    fn report_json_keeps_empty_list_fields() {
        let engine = TurnEngine::new(Arc::new(NoSpecialists));
        let (state, _) = SessionState::default().apply_turn(
            &engine,
            "hello",
            GenerationOutcome::Completed("Follow-up Question:\nHow are you?".to_string()),
        );
        let report = AnalysisReport::from_session(&state, Timestamp::now());
        let json = serde_json::to_value(&report).unwrap();
        let response = &json["entries"][0]["response"];

        for field in [
            "initialThoughts",
            "mentalHealthConcerns",
            "suggestedActivities",
            "researchBasedSolutions",
        ] {
            assert_eq!(response[field], serde_json::json!([]), "{field}");
        }
        assert_eq!(response["followUpQuestion"], "How are you?");
        assert_eq!(response["therapeuticResponse"], "");
    }

    #[test]
    fn fresh_session_report_is_empty() {
        let report = AnalysisReport::from_session(&SessionState::default(), Timestamp::now());
        assert!(report.is_empty());
        assert!(report.current_focus.is_none());
    }
}
