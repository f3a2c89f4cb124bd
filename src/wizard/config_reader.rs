use log::debug;

use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use std::fs;

use crate::wizard::{OpeningConfigSnafu, ParsingConfigSnafu, WizardResult};

/// The optional run configuration. Every key is optional; command-line
/// flags take precedence over the corresponding keys.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "organisationsFile")]
    pub organisations_file: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "outputDirectory")]
    pub output_directory: Option<String>,
    #[serde(rename = "filePrefix")]
    pub file_prefix: Option<String>,
    #[serde(rename = "raterName")]
    pub rater_name: Option<String>,
}

pub fn read_config(path: &str) -> WizardResult<AppConfig> {
    let contents = fs::read_to_string(path).context(OpeningConfigSnafu { path })?;
    let config: AppConfig =
        serde_json::from_str(contents.as_str()).context(ParsingConfigSnafu { path })?;
    debug!("read_config: {:?}", config);
    Ok(config)
}
