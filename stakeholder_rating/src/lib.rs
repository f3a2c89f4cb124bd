mod config;
pub mod manual;

use log::{debug, info};

use std::collections::HashMap;

pub use crate::config::*;

// **** Scoring ****

/// Parses a raw answer string into a numeric value.
///
/// Anything that does not parse as a number (a literal NaN included) is a
/// missing answer, never an error. The value is not range-checked: answers
/// outside 1-10 are averaged as-is.
pub fn parse_answer(raw: &str) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(x) if !x.is_nan() => Some(x),
        _ => None,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Computes the derived aggregates for one set of raw answers.
///
/// The per-axis scores are the arithmetic means of the answers that parse;
/// the combined values are only defined when both axes are (no partial
/// credit). The returned values are unrounded.
pub fn compute_scores(answers: &HashMap<String, String>) -> RatingScores {
    let power_vals: Vec<f64> = POWER_QUESTIONS
        .iter()
        .filter_map(|q| answers.get(q.id).and_then(|raw| parse_answer(raw)))
        .collect();
    let interest_vals: Vec<f64> = INTEREST_QUESTIONS
        .iter()
        .filter_map(|q| answers.get(q.id).and_then(|raw| parse_answer(raw)))
        .collect();
    debug!(
        "compute_scores: {} power and {} interest answers parsed",
        power_vals.len(),
        interest_vals.len()
    );

    let power_score = mean(&power_vals);
    let interest_score = mean(&interest_vals);
    let (combined_average, combined_total) = match (power_score, interest_score) {
        (Some(p), Some(i)) => (Some((p + i) / 2.0), Some(p + i)),
        _ => (None, None),
    };
    RatingScores {
        power_score,
        interest_score,
        combined_average,
        combined_total,
    }
}

// **** Session state ****

/// The in-memory state of one rater's run: the rater name and the records
/// accumulated so far, in processing order.
///
/// There is no concurrent-writer protection: the design assumes a single
/// active rater per process lifetime. Submitting a new rater name clears
/// the record sequence.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Session {
    rater_name: String,
    records: Vec<ResponseRecord>,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn rater_name(&self) -> &str {
        &self.rater_name
    }

    /// Stores the trimmed rater name and clears the record sequence.
    pub fn set_rater(&mut self, name: &str) {
        self.rater_name = name.trim().to_string();
        self.records.clear();
    }

    pub fn append_record(&mut self, record: ResponseRecord) {
        self.records.push(record);
    }

    /// Read-only snapshot of the accumulated records.
    pub fn records(&self) -> &[ResponseRecord] {
        &self.records
    }
}

// **** Wizard state machine ****

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum WizardState {
    AwaitingRater,
    /// Cursor into the organisation list. Always strictly below the list
    /// length; reaching the length transitions to `Done`.
    InProgress(usize),
    Done,
}

/// The result of a skip or submit action.
#[derive(PartialEq, Debug, Clone)]
pub enum StepOutcome {
    /// The cursor advanced to the given index.
    Advanced(usize),
    /// The last organisation was processed; the machine is `Done`.
    Completed,
    /// Required fields were absent. Nothing was recorded and the cursor did
    /// not move; the caller should re-render the step with its previously
    /// entered values.
    Invalid { missing: Vec<String> },
}

/// Sequences a single rater through the immutable organisation list.
///
/// States: `AwaitingRater -> InProgress(0) -> ... -> Done`. `Done` is
/// terminal for the current rater; calling [`Wizard::start`] again restarts
/// the machine at the first organisation with a cleared session.
#[derive(PartialEq, Debug, Clone)]
pub struct Wizard {
    organisations: Vec<String>,
    session: Session,
    state: WizardState,
}

impl Wizard {
    pub fn new(organisations: Vec<String>) -> Result<Wizard, RatingErrors> {
        if organisations.is_empty() {
            return Err(RatingErrors::NoOrganisations);
        }
        info!("wizard: {} organisations to rate", organisations.len());
        Ok(Wizard {
            organisations,
            session: Session::new(),
            state: WizardState::AwaitingRater,
        })
    }

    pub fn organisations(&self) -> &[String] {
        &self.organisations
    }

    pub fn organisation(&self, idx: usize) -> Option<&str> {
        self.organisations.get(idx).map(|s| s.as_str())
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Starts (or restarts) the run for the given rater. Valid from any
    /// state; the session is always reset.
    pub fn start(&mut self, rater: &str) {
        self.session.set_rater(rater);
        self.state = WizardState::InProgress(0);
        info!("wizard: session started for rater {:?}", self.session.rater_name());
    }

    fn current_index(&self) -> Result<usize, RatingErrors> {
        match self.state {
            WizardState::InProgress(idx) => Ok(idx),
            _ => Err(RatingErrors::NotInProgress),
        }
    }

    /// Records a skip for the current organisation: only the organisation
    /// and rater names are kept, every other field stays blank.
    pub fn skip(&mut self) -> Result<StepOutcome, RatingErrors> {
        let idx = self.current_index()?;
        let record = ResponseRecord {
            organisation: self.organisations[idx].clone(),
            rater_name: self.session.rater_name().to_string(),
            fields: None,
        };
        info!("wizard: skipped {:?}", record.organisation);
        self.session.append_record(record);
        Ok(self.advance(idx))
    }

    /// Validates and records a full submission for the current organisation.
    pub fn submit(&mut self, submission: &Submission) -> Result<StepOutcome, RatingErrors> {
        let idx = self.current_index()?;
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            debug!(
                "wizard: submission for index {} missing fields {:?}",
                idx, missing
            );
            return Ok(StepOutcome::Invalid { missing });
        }
        let record = self.build_record(idx, submission);
        info!("wizard: recorded ratings for {:?}", record.organisation);
        self.session.append_record(record);
        Ok(self.advance(idx))
    }

    fn build_record(&self, idx: usize, submission: &Submission) -> ResponseRecord {
        let scores = compute_scores(&submission.answers);
        let answers: Vec<(String, String)> = POWER_QUESTIONS
            .iter()
            .chain(INTEREST_QUESTIONS.iter())
            .map(|q| {
                (
                    q.id.to_string(),
                    submission.answers.get(q.id).cloned().unwrap_or_default(),
                )
            })
            .collect();
        ResponseRecord {
            organisation: self.organisations[idx].clone(),
            rater_name: self.session.rater_name().to_string(),
            fields: Some(RatedFields {
                sector: submission.sector.clone(),
                subject_area: submission.subject_area.clone(),
                organisation_type: submission.organisation_type.clone(),
                geographical_scope: submission.geographical_scope.clone(),
                description: submission.description.trim().to_string(),
                answers,
                power_score: scores.power_score.map(round2),
                interest_score: scores.interest_score.map(round2),
                combined_average: scores.combined_average.map(round2),
                combined_total: scores.combined_total.map(round2),
                // The classification reads the unrounded average.
                quadrant: scores.combined_average.map(Quadrant::from_average),
            }),
        }
    }

    fn advance(&mut self, idx: usize) -> StepOutcome {
        let next = idx + 1;
        if next == self.organisations.len() {
            info!("wizard: all {} organisations processed", next);
            self.state = WizardState::Done;
            StepOutcome::Completed
        } else {
            self.state = WizardState::InProgress(next);
            StepOutcome::Advanced(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(power: &[&str], interest: &[&str]) -> HashMap<String, String> {
        let mut m: HashMap<String, String> = HashMap::new();
        for (q, v) in POWER_QUESTIONS.iter().zip(power) {
            m.insert(q.id.to_string(), v.to_string());
        }
        for (q, v) in INTEREST_QUESTIONS.iter().zip(interest) {
            m.insert(q.id.to_string(), v.to_string());
        }
        m
    }

    fn full_submission(power: &[&str], interest: &[&str]) -> Submission {
        Submission {
            sector: "Third Sector".to_string(),
            subject_area: "Food".to_string(),
            organisation_type: "Charity/Not for Profit".to_string(),
            geographical_scope: "Regional".to_string(),
            description: "A community group.".to_string(),
            answers: answers(power, interest),
        }
    }

    fn wizard(orgs: &[&str]) -> Wizard {
        Wizard::new(orgs.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    #[test]
    fn scores_are_means_of_parsed_answers() {
        let scores = compute_scores(&answers(
            &["3", "3", "3", "4"],
            &["1", "2", "3", "4", "5", "6"],
        ));
        assert_eq!(scores.power_score, Some(3.25));
        assert_eq!(scores.interest_score, Some(3.5));
        assert_eq!(scores.combined_average, Some(3.375));
        assert_eq!(scores.combined_total, Some(6.75));
    }

    #[test]
    fn combined_average_is_half_of_total() {
        let scores = compute_scores(&answers(
            &["7", "9", "10", "6"],
            &["2", "5", "8", "3", "9", "10"],
        ));
        let avg = scores.combined_average.unwrap();
        let total = scores.combined_total.unwrap();
        assert_eq!(avg, total / 2.0);
    }

    #[test]
    fn unparseable_answers_are_dropped_silently() {
        // Three bad power answers: the mean covers the single good one.
        let scores = compute_scores(&answers(
            &["high", "", "NaN", "4"],
            &["5", "5", "5", "5", "5", "5"],
        ));
        assert_eq!(scores.power_score, Some(4.0));
        assert_eq!(scores.interest_score, Some(5.0));
    }

    #[test]
    fn no_parseable_answers_leaves_scores_undefined() {
        let scores = compute_scores(&answers(
            &["a", "b", "c", "d"],
            &["5", "5", "5", "5", "5", "5"],
        ));
        assert_eq!(scores.power_score, None);
        assert_eq!(scores.interest_score, Some(5.0));
        // No partial credit.
        assert_eq!(scores.combined_average, None);
        assert_eq!(scores.combined_total, None);
    }

    #[test]
    fn out_of_range_answers_are_accepted() {
        let scores = compute_scores(&answers(
            &["12", "12", "12", "12"],
            &["0", "0", "0", "0", "0", "0"],
        ));
        assert_eq!(scores.power_score, Some(12.0));
        assert_eq!(scores.interest_score, Some(0.0));
        assert_eq!(scores.combined_average, Some(6.0));
    }

    #[test]
    fn quadrant_boundaries_are_exact() {
        assert_eq!(Quadrant::from_average(8.0), Quadrant::ManageClosely);
        assert_eq!(Quadrant::from_average(7.999), Quadrant::KeepSatisfied);
        assert_eq!(Quadrant::from_average(6.0), Quadrant::KeepSatisfied);
        assert_eq!(Quadrant::from_average(5.999), Quadrant::KeepInformed);
        assert_eq!(Quadrant::from_average(3.0), Quadrant::KeepInformed);
        assert_eq!(Quadrant::from_average(2.999), Quadrant::Monitor);
    }

    #[test]
    fn empty_organisation_list_is_rejected() {
        assert_eq!(Wizard::new(vec![]).unwrap_err(), RatingErrors::NoOrganisations);
    }

    #[test]
    fn actions_outside_in_progress_are_errors() {
        let mut w = wizard(&["Alpha"]);
        assert_eq!(w.skip().unwrap_err(), RatingErrors::NotInProgress);
        w.start("Jo");
        w.skip().unwrap();
        assert_eq!(w.state(), WizardState::Done);
        assert_eq!(
            w.submit(&full_submission(&["5"; 4], &["5"; 6])).unwrap_err(),
            RatingErrors::NotInProgress
        );
    }

    #[test]
    fn skip_records_only_names_and_advances() {
        let mut w = wizard(&["Alpha", "Beta"]);
        w.start("  Jo  ");
        assert_eq!(w.skip().unwrap(), StepOutcome::Advanced(1));
        let records = w.session().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].organisation, "Alpha");
        assert_eq!(records[0].rater_name, "Jo");
        assert!(records[0].is_skipped());
        assert_eq!(w.state(), WizardState::InProgress(1));
    }

    #[test]
    fn missing_field_rerenders_without_recording() {
        let mut w = wizard(&["Alpha"]);
        w.start("Jo");
        let mut submission = full_submission(&["5"; 4], &["5"; 6]);
        submission.sector = String::new();
        submission.answers.remove("i_value");
        match w.submit(&submission).unwrap() {
            StepOutcome::Invalid { missing } => {
                assert_eq!(missing, vec!["sector".to_string(), "i_value".to_string()]);
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
        assert_eq!(w.session().records().len(), 0);
        assert_eq!(w.state(), WizardState::InProgress(0));

        // Filling in the blanks makes the same step succeed.
        submission.sector = "Media".to_string();
        submission.answers.insert("i_value".to_string(), "7".to_string());
        assert_eq!(w.submit(&submission).unwrap(), StepOutcome::Completed);
        assert_eq!(w.session().records().len(), 1);
    }

    #[test]
    fn whitespace_answer_passes_validation_but_drops_from_mean() {
        let mut w = wizard(&["Alpha"]);
        w.start("Jo");
        let mut submission = full_submission(&["5", "5", "5", "5"], &["5"; 6]);
        submission.answers.insert("p_influence".to_string(), " ".to_string());
        assert_eq!(w.submit(&submission).unwrap(), StepOutcome::Completed);
        let fields = w.session().records()[0].fields.as_ref().unwrap();
        assert_eq!(fields.power_score, Some(5.0));
    }

    #[test]
    fn derived_fields_are_rounded_for_storage() {
        let mut w = wizard(&["Alpha"]);
        w.start("Jo");
        w.submit(&full_submission(
            &["3", "3", "3", "4"],
            &["1", "2", "3", "4", "5", "6"],
        ))
        .unwrap();
        let fields = w.session().records()[0].fields.as_ref().unwrap();
        assert_eq!(fields.power_score, Some(3.25));
        assert_eq!(fields.interest_score, Some(3.5));
        assert_eq!(fields.combined_average, Some(3.38));
        assert_eq!(fields.combined_total, Some(6.75));
        assert_eq!(fields.quadrant, Some(Quadrant::KeepInformed));
        // Raw answers are stored in question order.
        assert_eq!(fields.answers.len(), 10);
        assert_eq!(fields.answers[0], ("p_influence".to_string(), "3".to_string()));
        assert_eq!(fields.answers[4], ("i_alignment".to_string(), "1".to_string()));
    }

    #[test]
    fn mixed_run_of_three_organisations() {
        let mut w = wizard(&["Alpha", "Beta", "Gamma"]);
        w.start("Jo");
        assert_eq!(w.skip().unwrap(), StepOutcome::Advanced(1));
        assert_eq!(
            w.submit(&full_submission(&["8"; 4], &["8"; 6])).unwrap(),
            StepOutcome::Advanced(2)
        );
        assert_eq!(
            w.submit(&full_submission(&["5"; 4], &["5"; 6])).unwrap(),
            StepOutcome::Completed
        );
        assert_eq!(w.state(), WizardState::Done);

        let records = w.session().records();
        assert_eq!(records.len(), 3);
        let quadrants: Vec<Option<Quadrant>> = records
            .iter()
            .map(|r| r.fields.as_ref().and_then(|f| f.quadrant))
            .collect();
        assert_eq!(
            quadrants,
            vec![None, Some(Quadrant::ManageClosely), Some(Quadrant::KeepInformed)]
        );
    }

    #[test]
    fn new_rater_restarts_with_cleared_session() {
        let mut w = wizard(&["Alpha"]);
        w.start("Jo");
        w.skip().unwrap();
        assert_eq!(w.state(), WizardState::Done);
        assert_eq!(w.session().records().len(), 1);

        w.start("Sam");
        assert_eq!(w.state(), WizardState::InProgress(0));
        assert_eq!(w.session().rater_name(), "Sam");
        assert_eq!(w.session().records().len(), 0);
    }

    #[test]
    fn session_reset_on_set_rater() {
        let mut session = Session::new();
        session.set_rater("Jo");
        session.append_record(ResponseRecord {
            organisation: "Alpha".to_string(),
            rater_name: "Jo".to_string(),
            fields: None,
        });
        assert_eq!(session.records().len(), 1);
        session.set_rater("Sam");
        assert_eq!(session.rater_name(), "Sam");
        assert_eq!(session.records().len(), 0);
    }
}
