use std::fmt;

use crate::models::{Benefit, EmploymentType, ExperienceLevel, FilterValue};

/// Ordered, duplicate-free set of filter values.
///
/// Order is insertion order. `toggle` places newly checked values at their
/// checkbox position so panel edits keep the canonical order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T: FilterValue> {
    values: Vec<T>,
}

impl<T: FilterValue> Default for Selection<T> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<T: FilterValue> Selection<T> {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            values: T::ALL.to_vec(),
        }
    }

    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        let mut selection = Self::empty();
        for value in values {
            if !selection.values.contains(&value) {
                selection.values.push(value);
            }
        }
        selection
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, value: T) -> bool {
        self.values.contains(&value)
    }

    /// True when every value is selected, regardless of order.
    pub fn is_full(&self) -> bool {
        T::ALL.iter().all(|v| self.values.contains(v))
    }

    pub fn toggle(&mut self, value: T) {
        if let Some(pos) = self.values.iter().position(|v| *v == value) {
            self.values.remove(pos);
            return;
        }
        let rank = |v: &T| T::ALL.iter().position(|a| a == v).unwrap_or(usize::MAX);
        let target = rank(&value);
        let at = self
            .values
            .iter()
            .position(|v| rank(v) > target)
            .unwrap_or(self.values.len());
        self.values.insert(at, value);
    }

    /// Wire form: values joined by `;`.
    pub fn join(&self) -> String {
        self.values
            .iter()
            .map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn labels(&self) -> String {
        self.values
            .iter()
            .map(|v| v.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One independently removable filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Employment,
    Remote,
    Experience,
    Salary,
    Benefits,
}

impl FilterDimension {
    pub fn key(&self) -> &'static str {
        match self {
            FilterDimension::Employment => "employment",
            FilterDimension::Remote => "remote",
            FilterDimension::Experience => "experience",
            FilterDimension::Salary => "salary",
            FilterDimension::Benefits => "benefits",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display label for one active dimension plus the key that removes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterTag {
    pub label: String,
    pub dimension: FilterDimension,
}

/// The committed search filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub employment_types: Selection<EmploymentType>,
    pub remote_only: bool,
    pub auto_translate_location: bool,
    pub experience_levels: Selection<ExperienceLevel>,
    pub min_salary: Option<u64>,
    pub max_salary: Option<u64>,
    pub benefits: Selection<Benefit>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            employment_types: Selection::all(),
            remote_only: false,
            auto_translate_location: true,
            experience_levels: Selection::empty(),
            min_salary: None,
            max_salary: None,
            benefits: Selection::empty(),
        }
    }
}

impl FilterState {
    pub fn set_employment_types(&mut self, types: Selection<EmploymentType>) {
        self.employment_types = types;
    }

    pub fn set_remote_only(&mut self, remote_only: bool) {
        self.remote_only = remote_only;
    }

    pub fn set_auto_translate_location(&mut self, enabled: bool) {
        self.auto_translate_location = enabled;
    }

    pub fn set_experience_levels(&mut self, levels: Selection<ExperienceLevel>) {
        self.experience_levels = levels;
    }

    /// Bounds are stored as given; `min > max` is allowed.
    pub fn set_salary_range(&mut self, min: Option<u64>, max: Option<u64>) {
        self.min_salary = min;
        self.max_salary = max;
    }

    pub fn set_benefits(&mut self, benefits: Selection<Benefit>) {
        self.benefits = benefits;
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }

    pub fn remove_dimension(&mut self, dimension: FilterDimension) {
        match dimension {
            FilterDimension::Employment => self.employment_types = Selection::all(),
            FilterDimension::Remote => self.remote_only = false,
            FilterDimension::Experience => self.experience_levels = Selection::empty(),
            FilterDimension::Salary => {
                self.min_salary = None;
                self.max_salary = None;
            }
            FilterDimension::Benefits => self.benefits = Selection::empty(),
        }
    }

    fn has_salary(&self) -> bool {
        self.min_salary.is_some() || self.max_salary.is_some()
    }

    /// Weighted count shown on the filters button. Experience levels and
    /// benefits count once per selected value; every other dimension counts
    /// at most once.
    pub fn active_filter_count(&self) -> usize {
        let mut count = 0;
        if !self.employment_types.is_full() {
            count += 1;
        }
        if self.remote_only {
            count += 1;
        }
        if !self.auto_translate_location {
            count += 1;
        }
        count += self.experience_levels.len();
        if self.has_salary() {
            count += 1;
        }
        count += self.benefits.len();
        count
    }

    pub fn describe_active_filters(&self) -> Vec<FilterTag> {
        let mut tags = Vec::new();

        if !self.employment_types.is_full() {
            tags.push(FilterTag {
                label: format!("Employment: {}", self.employment_types.labels()),
                dimension: FilterDimension::Employment,
            });
        }

        if self.remote_only {
            tags.push(FilterTag {
                label: "Remote Only".to_string(),
                dimension: FilterDimension::Remote,
            });
        }

        if !self.experience_levels.is_empty() {
            tags.push(FilterTag {
                label: format!("Experience: {}", self.experience_levels.labels()),
                dimension: FilterDimension::Experience,
            });
        }

        if let Some(text) = salary_text(self.min_salary, self.max_salary) {
            tags.push(FilterTag {
                label: format!("Salary: {}", text),
                dimension: FilterDimension::Salary,
            });
        }

        if !self.benefits.is_empty() {
            tags.push(FilterTag {
                label: format!("Benefits: {}", self.benefits.labels()),
                dimension: FilterDimension::Benefits,
            });
        }

        tags
    }
}

fn salary_text(min: Option<u64>, max: Option<u64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!(
            "${} - ${}",
            format_thousands(min),
            format_thousands(max)
        )),
        (Some(min), None) => Some(format!("${}+", format_thousands(min))),
        (None, Some(max)) => Some(format!("Up to ${}", format_thousands(max))),
        (None, None) => None,
    }
}

/// 1234567 -> "1,234,567"
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Reads a salary text field. Leading whitespace is skipped and the leading
/// run of digits is taken; input without one is absent.
pub fn parse_salary_input(input: &str) -> Option<u64> {
    let digits: String = input
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Staged edits made in the filter panel.
///
/// The draft starts as a copy of the committed state and is only written back
/// by `apply`. Dropping it (cancel) leaves the committed state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    pub state: FilterState,
    pub min_salary_input: String,
    pub max_salary_input: String,
}

impl FilterDraft {
    pub fn from_committed(committed: &FilterState) -> Self {
        Self {
            state: committed.clone(),
            min_salary_input: committed
                .min_salary
                .map(|v| v.to_string())
                .unwrap_or_default(),
            max_salary_input: committed
                .max_salary
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn set_min_salary_input(&mut self, input: String) {
        self.state.min_salary = parse_salary_input(&input);
        self.min_salary_input = input;
    }

    pub fn set_max_salary_input(&mut self, input: String) {
        self.state.max_salary = parse_salary_input(&input);
        self.max_salary_input = input;
    }

    /// Resets the draft only.
    pub fn reset(&mut self) {
        *self = Self::from_committed(&FilterState::default());
    }

    pub fn apply(self, committed: &mut FilterState) {
        *committed = self.state;
    }
}
