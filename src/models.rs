use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A closed set of values one filter dimension can take.
///
/// `ALL` lists the values in checkbox order, which is also the order the
/// panel inserts them in.
pub trait FilterValue: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    /// Wire name sent to the jobs API.
    fn as_str(&self) -> &'static str;

    /// Human label used in tags and the filter panel.
    fn label(&self) -> String;

    fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "paidTimeOff" -> "Paid Time Off"
fn split_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
    }
    capitalize(&out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmploymentType {
    FullTime,
    PartTime,
    Intern,
    Contractor,
}

impl FilterValue for EmploymentType {
    const ALL: &'static [Self] = &[
        EmploymentType::FullTime,
        EmploymentType::PartTime,
        EmploymentType::Intern,
        EmploymentType::Contractor,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::FullTime => "fulltime",
            EmploymentType::PartTime => "parttime",
            EmploymentType::Intern => "intern",
            EmploymentType::Contractor => "contractor",
        }
    }

    fn label(&self) -> String {
        capitalize(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl FilterValue for ExperienceLevel {
    const ALL: &'static [Self] = &[
        ExperienceLevel::Entry,
        ExperienceLevel::Mid,
        ExperienceLevel::Senior,
        ExperienceLevel::Executive,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Executive => "executive",
        }
    }

    fn label(&self) -> String {
        capitalize(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Benefit {
    HealthInsurance,
    DentalInsurance,
    VisionInsurance,
    RetirementPlan,
    PaidTimeOff,
}

impl FilterValue for Benefit {
    const ALL: &'static [Self] = &[
        Benefit::HealthInsurance,
        Benefit::DentalInsurance,
        Benefit::VisionInsurance,
        Benefit::RetirementPlan,
        Benefit::PaidTimeOff,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Benefit::HealthInsurance => "healthInsurance",
            Benefit::DentalInsurance => "dentalInsurance",
            Benefit::VisionInsurance => "visionInsurance",
            Benefit::RetirementPlan => "retirementPlan",
            Benefit::PaidTimeOff => "paidTimeOff",
        }
    }

    fn label(&self) -> String {
        split_camel_case(self.as_str())
    }
}

macro_rules! filter_value_from_str {
    ($($ty:ty => $what:literal),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = String;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as FilterValue>::parse(s).ok_or_else(|| {
                        let names: Vec<&str> =
                            <$ty as FilterValue>::ALL.iter().map(|v| v.as_str()).collect();
                        format!("unknown {} '{}' (expected one of: {})", $what, s, names.join(", "))
                    })
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

filter_value_from_str! {
    EmploymentType => "employment type",
    ExperienceLevel => "experience level",
    Benefit => "benefit",
}

/// How the result list is ordered. Sorting never touches the filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Relevance,
    Date,
    Salary,
}

impl SortMode {
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Relevance => "Relevance",
            SortMode::Date => "Newest",
            SortMode::Salary => "Salary",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortMode::Relevance => SortMode::Date,
            SortMode::Date => SortMode::Salary,
            SortMode::Salary => SortMode::Relevance,
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(SortMode::Relevance),
            "date" => Ok(SortMode::Date),
            "salary" => Ok(SortMode::Salary),
            other => Err(format!(
                "unknown sort '{}' (expected relevance, date or salary)",
                other
            )),
        }
    }
}

/// Reads an explicit `null` as the type's default, same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProvider {
    #[serde(rename = "jobProvider", default, deserialize_with = "null_as_default")]
    pub job_provider: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// One posting as returned by the jobs API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub employment_type: String,
    #[serde(default)]
    pub salary_range: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_ago_posted: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_providers: Vec<JobProvider>,
}
