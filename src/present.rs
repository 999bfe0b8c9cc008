use regex::Regex;
use std::sync::LazyLock;

use crate::models::{JobRecord, SortMode};

pub const NO_JOBS_MESSAGE: &str = "No jobs found. Try adjusting your search criteria.";
pub const ERROR_MESSAGE: &str = "Something went wrong loading jobs. Press r to retry.";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const NO_PROVIDERS: &str = "No application links available.";

static TIME_AGO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*(day|hour|week)").expect("valid regex"));
static FIRST_INT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("valid regex"));

/// Palette for company badges, indexed by `company_color`.
pub const COMPANY_PALETTE: [&str; 8] = [
    "#6366f1", "#8b5cf6", "#ec4899", "#ef4444", "#f59e0b", "#10b981", "#06b6d4", "#6366f1",
];

/// Age in hours from strings like "3 days ago". Unparseable input is 0.
pub fn parse_time_ago(text: &str) -> u64 {
    let Some(caps) = TIME_AGO_RE.captures(text) else {
        return 0;
    };
    let n: u64 = caps[1].parse().unwrap_or(0);
    match &caps[2] {
        "hour" => n,
        "day" => n.saturating_mul(24),
        "week" => n.saturating_mul(24 * 7),
        _ => 0,
    }
}

/// First integer in the salary text: "$80,000 - $100,000" -> 80.
pub fn parse_salary(text: Option<&str>) -> u64 {
    text.and_then(|t| FIRST_INT_RE.captures(t))
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

/// Stable reorder of a batch. Relevance keeps the API order.
pub fn sort_jobs(jobs: &mut [JobRecord], mode: SortMode) {
    match mode {
        SortMode::Relevance => {}
        SortMode::Date => jobs.sort_by_key(|job| parse_time_ago(&job.time_ago_posted)),
        SortMode::Salary => jobs.sort_by_key(|job| {
            std::cmp::Reverse(parse_salary(job.salary_range.as_deref()))
        }),
    }
}

pub fn company_initial(company: &str) -> String {
    company
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

/// Index into `COMPANY_PALETTE`: sum of code points mod palette size.
pub fn company_color(company: &str) -> usize {
    let sum: u64 = company.chars().map(|c| c as u64).sum();
    (sum % COMPANY_PALETTE.len() as u64) as usize
}

/// Badge text for the record's own employment type, e.g. "FULLTIME" ->
/// "Fulltime". Empty when the API sent nothing.
pub fn employment_badge(employment_type: &str) -> String {
    let trimmed = employment_type.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}

pub fn skill_tags(title: &str) -> Vec<&'static str> {
    let title = title.to_lowercase();
    let mut tags = Vec::new();
    if title.contains("javascript") || title.contains("js") {
        tags.push("JavaScript");
    }
    if title.contains("react") {
        tags.push("React");
    }
    if title.contains("ux") || title.contains("ui") {
        tags.push("UX/UI");
    }
    if title.contains("design") {
        tags.push("Design");
    }
    tags
}

pub fn list_salary(job: &JobRecord) -> &str {
    job.salary_range
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("Competitive salary")
}

pub fn detail_salary(job: &JobRecord) -> &str {
    job.salary_range
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or("Competitive salary, commensurate with experience")
}

pub fn detail_description(job: &JobRecord) -> &str {
    job.description
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(NO_DESCRIPTION)
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, age: &str, salary: Option<&str>) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            title: format!("Job {}", id),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            employment_type: "Full-time".to_string(),
            salary_range: salary.map(str::to_string),
            time_ago_posted: age.to_string(),
            description: None,
            job_providers: Vec::new(),
        }
    }

    fn ids(jobs: &[JobRecord]) -> Vec<&str> {
        jobs.iter().map(|j| j.id.as_str()).collect()
    }

    #[test]
    fn test_parse_time_ago() {
        assert_eq!(parse_time_ago("5 hours ago"), 5);
        assert_eq!(parse_time_ago("3 days ago"), 72);
        assert_eq!(parse_time_ago("1 week ago"), 168);
        assert_eq!(parse_time_ago("2weeks"), 336);
        assert_eq!(parse_time_ago("just now"), 0);
        assert_eq!(parse_time_ago("30+ days ago"), 0);
        assert_eq!(parse_time_ago(""), 0);
    }

    #[test]
    fn test_parse_salary() {
        assert_eq!(parse_salary(Some("$80,000")), 80);
        assert_eq!(parse_salary(Some("$120,000 - $150,000")), 120);
        assert_eq!(parse_salary(Some("45000 USD")), 45_000);
        assert_eq!(parse_salary(Some("Negotiable")), 0);
        assert_eq!(parse_salary(Some("")), 0);
        assert_eq!(parse_salary(None), 0);
    }

    #[test]
    fn test_sort_by_date_most_recent_first() {
        let mut jobs = vec![
            job("days", "3 days", None),
            job("hours", "5 hours", None),
            job("week", "1 week", None),
        ];
        sort_jobs(&mut jobs, SortMode::Date);
        assert_eq!(ids(&jobs), vec!["hours", "days", "week"]);
    }

    #[test]
    fn test_sort_by_date_unparseable_counts_as_newest() {
        let mut jobs = vec![job("old", "2 days ago", None), job("odd", "yesterday", None)];
        sort_jobs(&mut jobs, SortMode::Date);
        assert_eq!(ids(&jobs), vec!["odd", "old"]);
    }

    #[test]
    fn test_sort_by_salary_descending_missing_last() {
        let mut jobs = vec![
            job("80k", "", Some("$80,000")),
            job("none", "", Some("")),
            job("120k", "", Some("$120,000")),
        ];
        sort_jobs(&mut jobs, SortMode::Salary);
        assert_eq!(ids(&jobs), vec!["120k", "80k", "none"]);
    }

    #[test]
    fn test_sort_is_stable_and_relevance_keeps_order() {
        let mut jobs = vec![
            job("a", "1 day", Some("$50,000")),
            job("b", "24 hours", Some("$50,000")),
            job("c", "1 day", None),
        ];
        sort_jobs(&mut jobs, SortMode::Relevance);
        assert_eq!(ids(&jobs), vec!["a", "b", "c"]);

        sort_jobs(&mut jobs, SortMode::Date);
        assert_eq!(ids(&jobs), vec!["a", "b", "c"]);

        sort_jobs(&mut jobs, SortMode::Salary);
        assert_eq!(ids(&jobs), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_company_badge() {
        assert_eq!(company_initial("acme"), "A");
        assert_eq!(company_initial(""), "?");
        // 'A' + 'B' = 65 + 66 = 131, 131 % 8 = 3
        assert_eq!(company_color("AB"), 3);
        assert_eq!(company_color(""), 0);
    }

    #[test]
    fn test_employment_badge_reflects_actual_type() {
        assert_eq!(employment_badge("FULLTIME"), "Fulltime");
        assert_eq!(employment_badge("Contractor"), "Contractor");
        assert_eq!(employment_badge("  "), "");
    }

    #[test]
    fn test_skill_tags() {
        assert_eq!(
            skill_tags("Senior React/JS Developer"),
            vec!["JavaScript", "React"]
        );
        assert_eq!(skill_tags("Product Designer (UX)"), vec!["UX/UI", "Design"]);
        assert!(skill_tags("Rust Engineer").is_empty());
    }

    #[test]
    fn test_fallback_text() {
        let mut record = job("x", "", None);
        assert_eq!(list_salary(&record), "Competitive salary");
        assert_eq!(
            detail_salary(&record),
            "Competitive salary, commensurate with experience"
        );
        assert_eq!(detail_description(&record), NO_DESCRIPTION);

        record.salary_range = Some("$70k".to_string());
        record.description = Some("Build things.".to_string());
        assert_eq!(list_salary(&record), "$70k");
        assert_eq!(detail_description(&record), "Build things.");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long job title", 10), "a very ...");
    }
}
