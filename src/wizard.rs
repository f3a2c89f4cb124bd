use log::{info, warn};

use snafu::{prelude::*, Snafu};

use std::path::PathBuf;

use stakeholder_rating::{StepOutcome, Wizard, WizardState};

use crate::args::Args;

pub mod config_reader;
pub mod export;
pub mod org_reader;
pub mod prompts;

use config_reader::AppConfig;

pub const DEFAULT_ORGANISATIONS_FILE: &str = "data/organisations.xlsx";
pub const DEFAULT_FILE_PREFIX: &str = "stakeholder_ratings";

#[derive(Debug, Snafu)]
pub enum WizardError {
    #[snafu(display("Error opening organisation file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The organisation file {path} contains no usable rows"))]
    EmptyExcel { path: String },
    #[snafu(display("No organisation names found in {path}"))]
    NoOrganisations { path: String },
    #[snafu(display("Error opening config file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing config file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Terminal prompt failed"))]
    Prompt { source: dialoguer::Error },
    #[snafu(display("Error writing workbook {path}"))]
    WritingExcel {
        source: rust_xlsxwriter::XlsxError,
        path: String,
    },
    #[snafu(display("Refusing to export an empty rating session"))]
    EmptyExport {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type WizardResult<T> = Result<T, WizardError>;

/// The fully resolved run options: command-line flag over configuration key
/// over built-in default.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunOptions {
    pub organisations_file: String,
    pub excel_worksheet_name: Option<String>,
    pub output_directory: PathBuf,
    pub file_prefix: String,
    pub rater_name: Option<String>,
}

pub fn resolve_options(args: &Args) -> WizardResult<RunOptions> {
    let config = match &args.config {
        Some(path) => config_reader::read_config(path)?,
        None => AppConfig::default(),
    };
    let organisations_file = args
        .organisations
        .clone()
        .or(config.organisations_file)
        .unwrap_or_else(|| DEFAULT_ORGANISATIONS_FILE.to_string());
    let excel_worksheet_name = args
        .excel_worksheet_name
        .clone()
        .or(config.excel_worksheet_name);
    let output_directory = PathBuf::from(
        args.out_dir
            .clone()
            .or(config.output_directory)
            .unwrap_or_else(|| ".".to_string()),
    );
    let file_prefix = config
        .file_prefix
        .unwrap_or_else(|| DEFAULT_FILE_PREFIX.to_string());
    let rater_name = args.rater.clone().or(config.rater_name);
    Ok(RunOptions {
        organisations_file,
        excel_worksheet_name,
        output_directory,
        file_prefix,
        rater_name,
    })
}

/// Drives the whole interactive flow: load the organisation list once, then
/// run rater sessions until the user declines to start another.
pub fn run_session(args: &Args) -> WizardResult<()> {
    let options = resolve_options(args)?;
    let orgs = org_reader::read_organisations(
        &options.organisations_file,
        options.excel_worksheet_name.as_deref(),
    )?;
    info!(
        "Loaded {} organisations from {}",
        orgs.len(),
        options.organisations_file
    );

    let mut wizard = match Wizard::new(orgs) {
        Ok(w) => w,
        Err(e) => whatever!("Cannot start the wizard: {}", e),
    };
    let total = wizard.organisations().len();

    // The flag/config rater only applies to the first session.
    let mut preset_rater = options.rater_name.clone();
    loop {
        let rater = match preset_rater.take() {
            Some(name) => name,
            None => prompts::prompt_rater_name()?,
        };
        wizard.start(&rater);

        while let WizardState::InProgress(idx) = wizard.state() {
            run_step(&mut wizard, idx, total)?;
        }

        let rater_name = wizard.session().rater_name().to_string();
        if rater_name.is_empty() {
            println!("\nAll {} organisations processed.", total);
        } else {
            println!("\nAll {} organisations processed. Thank you, {}!", total, rater_name);
        }

        let file_name = export::timestamped_file_name(&options.file_prefix);
        let path = options.output_directory.join(file_name);
        match export::write_ratings_workbook(wizard.session().records(), &path) {
            Ok(()) => println!("Ratings written to {}", path.display()),
            Err(WizardError::EmptyExport {}) => {
                // Nothing to export: back to the start step.
                warn!("No records to export, returning to the start step");
                continue;
            }
            Err(e) => return Err(e),
        }

        if !prompts::prompt_confirmation("Start a new session with another rater?", false)? {
            return Ok(());
        }
    }
}

fn run_step(wizard: &mut Wizard, idx: usize, total: usize) -> WizardResult<()> {
    let org = wizard.organisation(idx).unwrap_or_default().to_string();
    println!();
    println!("Organisation {} of {}: {}", idx + 1, total, org);
    match prompts::prompt_action(&org)? {
        prompts::StepAction::Skip => match wizard.skip() {
            Ok(_) => Ok(()),
            Err(e) => whatever!("Skip rejected: {}", e),
        },
        prompts::StepAction::Rate => {
            let mut previous = None;
            loop {
                let submission = prompts::collect_submission(previous.as_ref())?;
                match wizard.submit(&submission) {
                    Ok(StepOutcome::Invalid { missing }) => {
                        // Same step again, seeded with what was entered.
                        println!("Missing required fields: {}", missing.join(", "));
                        previous = Some(submission);
                    }
                    Ok(_) => return Ok(()),
                    Err(e) => whatever!("Submission rejected: {}", e),
                }
            }
        }
    }
}
