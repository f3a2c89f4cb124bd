use clap::Parser;

/// This is a guided stakeholder rating program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A configuration file in JSON format. Every key is
    /// optional and every key can be overridden by the corresponding flag.
    /// For more information about the keys, read the manual of the
    /// stakeholder_rating crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, optional) The Excel file containing the organisation names,
    /// one per row. Defaults to data/organisations.xlsx.
    #[clap(short = 'O', long, value_parser)]
    pub organisations: Option<String>,

    /// (default first sheet) The name of the worksheet holding the
    /// organisation names.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (directory, optional) Where the export workbook is written. Defaults to
    /// the current directory.
    #[clap(short, long, value_parser)]
    pub out_dir: Option<String>,

    /// (optional) The rater name for the first session. When provided, the
    /// rater-name prompt is skipped.
    #[clap(short, long, value_parser)]
    pub rater: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard
    /// output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
