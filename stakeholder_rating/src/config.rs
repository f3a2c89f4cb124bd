// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// One Likert-scale question on a 1-10 scale.
///
/// The anchor labels describe the meaning of the low (1), middle (5) and
/// high (10) ends of the scale and are shown to the rater next to the
/// question text.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    /// Unique key. Also used as the column header in the export.
    pub id: &'static str,
    pub text: &'static str,
    /// The long-form description shown before the answer is collected.
    pub long: &'static str,
    pub label_low: &'static str,
    pub label_mid: &'static str,
    pub label_high: &'static str,
}

/// The fixed set of Power questions, in presentation and export order.
pub const POWER_QUESTIONS: [Question; 4] = [
    Question {
        id: "p_influence",
        text: "Influence on Policy & Decisions",
        long: "What is the stakeholder's capacity to directly influence or shape policy, project approvals, or key decisions within their sector or geographic area?",
        label_low: "No influence",
        label_mid: "Moderate, occasional influence",
        label_high: "Directly influences major decisions",
    },
    Question {
        id: "p_resources",
        text: "Control of Critical Resources",
        long: "To what extent does this stakeholder control financial resources (e.g., grant funding, sponsorship), skills, or in-kind assets that are essential for the network's work?",
        label_low: "No control",
        label_mid: "Controls some relevant resources",
        label_high: "Controls significant resources",
    },
    Question {
        id: "p_reputation",
        text: "Public Standing & Reputation",
        long: "What is the stakeholder's ability to affect the network's reputation, either positively or negatively, through their public influence and standing as a trusted partner?",
        label_low: "No effect",
        label_mid: "Moderate effect on public trust",
        label_high: "Strong positive/negative influence",
    },
    Question {
        id: "p_audience",
        text: "Impact on Target Audience",
        long: "How significant is this stakeholder's reach and influence over the communities, organisations, or individuals that the network aims to serve or engage?",
        label_low: "Minimal reach",
        label_mid: "Moderate reach within target audience",
        label_high: "Influences a large portion of the audience",
    },
];

/// The fixed set of Interest questions, in presentation and export order.
pub const INTEREST_QUESTIONS: [Question; 6] = [
    Question {
        id: "i_alignment",
        text: "Alignment with Mission & Vision",
        long: "How closely do the stakeholder's core mission, values, and strategic objectives align with the network's vision for community climate action and a just transition?",
        label_low: "Completely misaligned",
        label_mid: "Partially aligned with some shared goals",
        label_high: "Perfectly aligned",
    },
    Question {
        id: "i_engagement",
        text: "Current Level of Engagement",
        long: "How actively engaged is the stakeholder with the network's activities, communications, or membership? Is there an existing relationship that is active and mutually beneficial?",
        label_low: "No prior contact",
        label_mid: "Occasional/limited engagement",
        label_high: "Regular, high-level interaction",
    },
    Question {
        id: "i_partnership",
        text: "Potential for Partnership & Collaboration",
        long: "How strong is the opportunity for a high-impact collaboration or a new project with this stakeholder?",
        label_low: "No potential",
        label_mid: "Moderate potential (needs development)",
        label_high: "Immediate, high-potential opportunities",
    },
    Question {
        id: "i_overlap",
        text: "Overlap of Services & Competitiveness",
        long: "To what degree do this stakeholder's services or objectives complement the network's, rather than compete for the same funding, members, or projects?",
        label_low: "Direct competitor",
        label_mid: "Some overlap; generally complementary",
        label_high: "Highly complementary, non-competitive",
    },
    Question {
        id: "i_value",
        text: "Strategic Value to Future Goals",
        long: "How critical is this stakeholder to achieving one or more of the network's long-term strategic objectives, such as scaling a programme, influencing policy, or securing major funding?",
        label_low: "Not critical",
        label_mid: "Helpful but not pivotal",
        label_high: "Essential for long-term success",
    },
    Question {
        id: "i_champions",
        text: "Internal Champions & Relationships",
        long: "Is there a specific individual or department within the stakeholder organisation that is a known champion or ally for the network's work?",
        label_low: "No known contact",
        label_mid: "At least one contact; limited championing",
        label_high: "Multiple high-level champions",
    },
];

pub const SECTOR_OPTIONS: [&str; 6] = [
    "Public Sector",
    "Third Sector",
    "Corporate",
    "Education/Research",
    "Media",
    "Parliament/Political",
];

pub const SUBJECT_OPTIONS: [&str; 15] = [
    "Lobbying & Activism",
    "Building & Energy",
    "Action & Justice",
    "Education & Awareness",
    "Land & Nature",
    "Organisation Development",
    "Climate Know-How",
    "Food",
    "Circular Economy",
    "Transport",
    "Education",
    "Health",
    "Culture",
    "Biodiversity",
    "Multi sectoral Approach",
];

pub const TYPE_OPTIONS: [&str; 13] = [
    "Local Authority",
    "National Authority",
    "Regulatory Authority",
    "Institutional Donor",
    "Charity/Not for Profit",
    "Trusts and Foundations",
    "Higher Education Institution",
    "Research institute",
    "Schools/Colleges",
    "Individual",
    "Media",
    "Network/Forum etc",
    "Schools",
];

pub const GEO_OPTIONS: [&str; 4] = ["Local", "Regional", "National", "International"];

/// One rate-step form as entered by the rater, before validation.
///
/// The answers map is keyed by question id and holds the raw strings as
/// typed. Nothing here is checked: presence is validated by the wizard and
/// numeric parsing happens in the scoring engine.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Submission {
    pub sector: String,
    pub subject_area: String,
    pub organisation_type: String,
    pub geographical_scope: String,
    pub description: String,
    pub answers: HashMap<String, String>,
}

impl Submission {
    /// The required fields that are absent from this submission, in display
    /// order: the four categorical selections first, then every question id.
    /// The description is optional.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for (name, value) in [
            ("sector", &self.sector),
            ("subject_area", &self.subject_area),
            ("organisation_type", &self.organisation_type),
            ("geographical_scope", &self.geographical_scope),
        ] {
            if value.is_empty() {
                missing.push(name.to_string());
            }
        }
        for q in POWER_QUESTIONS.iter().chain(INTEREST_QUESTIONS.iter()) {
            match self.answers.get(q.id) {
                Some(v) if !v.is_empty() => {}
                _ => missing.push(q.id.to_string()),
            }
        }
        missing
    }
}

// ******** Output data structures *********

/// The derived aggregates for one submission, as computed by the scoring
/// engine. All values are unrounded; rounding to 2 decimals happens when a
/// record is built for storage.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct RatingScores {
    pub power_score: Option<f64>,
    pub interest_score: Option<f64>,
    pub combined_average: Option<f64>,
    pub combined_total: Option<f64>,
}

/// Engagement-priority classification derived from the combined average.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Quadrant {
    ManageClosely,
    KeepSatisfied,
    KeepInformed,
    Monitor,
}

impl Quadrant {
    /// All quadrants in legend order (highest combined average first).
    pub const ALL: [Quadrant; 4] = [
        Quadrant::ManageClosely,
        Quadrant::KeepSatisfied,
        Quadrant::KeepInformed,
        Quadrant::Monitor,
    ];

    /// Classifies a combined average. The thresholds are checked from the
    /// highest down and every range is half-open on its lower bound.
    pub fn from_average(avg: f64) -> Quadrant {
        if avg >= 8.0 {
            Quadrant::ManageClosely
        } else if avg >= 6.0 {
            Quadrant::KeepSatisfied
        } else if avg >= 3.0 {
            Quadrant::KeepInformed
        } else {
            Quadrant::Monitor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::ManageClosely => "Manage Closely",
            Quadrant::KeepSatisfied => "Keep Satisfied",
            Quadrant::KeepInformed => "Keep Informed",
            Quadrant::Monitor => "Monitor",
        }
    }

    /// The display form of the combined-average range, used in the export
    /// legend.
    pub fn score_range(&self) -> &'static str {
        match self {
            Quadrant::ManageClosely => "8–10",
            Quadrant::KeepSatisfied => "6–<8",
            Quadrant::KeepInformed => "3–<6",
            Quadrant::Monitor => "<3",
        }
    }
}

/// The rated part of a response record. Absent on skipped organisations.
#[derive(PartialEq, Debug, Clone)]
pub struct RatedFields {
    pub sector: String,
    pub subject_area: String,
    pub organisation_type: String,
    pub geographical_scope: String,
    pub description: String,
    /// Raw answer strings by question id, in question order.
    pub answers: Vec<(String, String)>,
    // Derived fields, rounded to 2 decimals for storage.
    pub power_score: Option<f64>,
    pub interest_score: Option<f64>,
    pub combined_average: Option<f64>,
    pub combined_total: Option<f64>,
    pub quadrant: Option<Quadrant>,
}

/// One row of the final export: an organisation as seen by one rater.
#[derive(PartialEq, Debug, Clone)]
pub struct ResponseRecord {
    pub organisation: String,
    pub rater_name: String,
    /// `None` when the organisation was skipped.
    pub fields: Option<RatedFields>,
}

impl ResponseRecord {
    pub fn is_skipped(&self) -> bool {
        self.fields.is_none()
    }
}

/// Errors that prevent the wizard from operating.
///
/// Validation failures are not errors: they surface as
/// [`StepOutcome::Invalid`](crate::StepOutcome) so the caller can re-render
/// the current step.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RatingErrors {
    /// The organisation list was empty at construction.
    NoOrganisations,
    /// A rate or skip action was attempted outside `InProgress`.
    NotInProgress,
}

impl Error for RatingErrors {}

impl Display for RatingErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatingErrors::NoOrganisations => {
                write!(f, "the organisation list contains no entries")
            }
            RatingErrors::NotInProgress => {
                write!(f, "no rating step is in progress for this action")
            }
        }
    }
}
