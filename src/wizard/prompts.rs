use dialoguer::{Input, Select};
use snafu::ResultExt;

use std::collections::HashMap;

use stakeholder_rating::{
    Question, Submission, GEO_OPTIONS, INTEREST_QUESTIONS, POWER_QUESTIONS, SECTOR_OPTIONS,
    SUBJECT_OPTIONS, TYPE_OPTIONS,
};

use crate::wizard::{PromptSnafu, WizardResult};

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum StepAction {
    Rate,
    Skip,
}

/// The start step. An empty name is permitted.
pub fn prompt_rater_name() -> WizardResult<String> {
    Input::<String>::new()
        .with_prompt("Rater name")
        .allow_empty(true)
        .interact_text()
        .context(PromptSnafu {})
}

pub fn prompt_action(org: &str) -> WizardResult<StepAction> {
    let selection = Select::new()
        .with_prompt(format!("What do you want to do with '{}'?", org))
        .items(&["Rate this organisation", "Skip it"])
        .default(0)
        .interact()
        .context(PromptSnafu {})?;
    Ok(if selection == 0 {
        StepAction::Rate
    } else {
        StepAction::Skip
    })
}

/// Arrow-key confirmation, defaulting to "No" for safety.
pub fn prompt_confirmation(prompt: &str, default_yes: bool) -> WizardResult<bool> {
    let default_index = if default_yes { 0 } else { 1 };
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&["Yes", "No"])
        .default(default_index)
        .interact()
        .context(PromptSnafu {})?;
    Ok(selection == 0)
}

/// Collects one full rate-step form. When `previous` is given (a submission
/// that failed validation), every prompt is seeded with the value entered
/// the first time around.
pub fn collect_submission(previous: Option<&Submission>) -> WizardResult<Submission> {
    let blank = Submission::default();
    let prev = previous.unwrap_or(&blank);

    let sector = prompt_select("Sector", &SECTOR_OPTIONS, &prev.sector)?;
    let subject_area = prompt_select("Subject area", &SUBJECT_OPTIONS, &prev.subject_area)?;
    let organisation_type =
        prompt_select("Type of organisation", &TYPE_OPTIONS, &prev.organisation_type)?;
    let geographical_scope =
        prompt_select("Geographical scope", &GEO_OPTIONS, &prev.geographical_scope)?;

    let mut answers: HashMap<String, String> = HashMap::new();
    for q in POWER_QUESTIONS.iter().chain(INTEREST_QUESTIONS.iter()) {
        let answer = prompt_answer(q, prev.answers.get(q.id))?;
        if !answer.is_empty() {
            answers.insert(q.id.to_string(), answer);
        }
    }

    let description = Input::<String>::new()
        .with_prompt("Description (optional)")
        .allow_empty(true)
        .with_initial_text(prev.description.clone())
        .interact_text()
        .context(PromptSnafu {})?;

    Ok(Submission {
        sector,
        subject_area,
        organisation_type,
        geographical_scope,
        description,
        answers,
    })
}

fn prompt_select(prompt: &str, options: &[&str], previous: &str) -> WizardResult<String> {
    let default_index = options.iter().position(|o| *o == previous).unwrap_or(0);
    let selection = Select::new()
        .with_prompt(prompt)
        .items(options)
        .default(default_index)
        .interact()
        .context(PromptSnafu {})?;
    Ok(options[selection].to_string())
}

fn prompt_answer(q: &Question, previous: Option<&String>) -> WizardResult<String> {
    println!("{}", q.long);
    Input::<String>::new()
        .with_prompt(format!(
            "{} (1 = {}, 5 = {}, 10 = {})",
            q.text, q.label_low, q.label_mid, q.label_high
        ))
        .allow_empty(true)
        .with_initial_text(previous.cloned().unwrap_or_default())
        .interact_text()
        .context(PromptSnafu {})
}
