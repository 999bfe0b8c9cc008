use crate::filters::FilterState;

pub const DEFAULT_QUERY: &str = "jobs";
pub const ANYWHERE: &str = "anywhere";

/// Free-text part of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchContext {
    pub query: String,
    pub location: String,
}

impl SearchContext {
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
        }
    }
}

/// Snapshot of filters and context as API query parameters.
///
/// `query`, `location`, `autoTranslateLocation`, `remoteOnly` and
/// `employmentTypes` are always present. An empty employment selection is sent
/// as `fulltime` because the API needs at least one type.
pub fn build_params(filters: &FilterState, context: &SearchContext) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::with_capacity(9);
    let mut push = |key: &str, value: String| params.push((key.to_string(), value));

    let query = if context.query.is_empty() {
        DEFAULT_QUERY
    } else {
        context.query.as_str()
    };
    push("query", query.to_string());

    let location = if context.location.is_empty() || context.location == ANYWHERE {
        ANYWHERE
    } else {
        context.location.as_str()
    };
    push("location", location.to_string());

    push(
        "autoTranslateLocation",
        filters.auto_translate_location.to_string(),
    );
    push("remoteOnly", filters.remote_only.to_string());

    let employment = if filters.employment_types.is_empty() {
        "fulltime".to_string()
    } else {
        filters.employment_types.join()
    };
    push("employmentTypes", employment);

    if !filters.experience_levels.is_empty() {
        push("experienceLevels", filters.experience_levels.join());
    }
    if let Some(min) = filters.min_salary {
        push("minSalary", min.to_string());
    }
    if let Some(max) = filters.max_salary {
        push("maxSalary", max.to_string());
    }
    if !filters.benefits.is_empty() {
        push("benefits", filters.benefits.join());
    }

    params
}

/// Renders params as a form-encoded query string, the same encoding the HTTP
/// client puts on the wire.
pub fn encode_query(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Selection;
    use crate::models::{Benefit, EmploymentType, ExperienceLevel};

    fn value<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_defaults_with_empty_context() {
        let params = build_params(&FilterState::default(), &SearchContext::default());
        assert_eq!(
            encode_query(&params),
            "query=jobs&location=anywhere&autoTranslateLocation=true&remoteOnly=false&employmentTypes=fulltime%3Bparttime%3Bintern%3Bcontractor"
        );
    }

    #[test]
    fn test_empty_employment_falls_back_to_fulltime() {
        let mut filters = FilterState::default();
        filters.set_employment_types(Selection::empty());
        let params = build_params(&filters, &SearchContext::default());

        let employment: Vec<&str> = params
            .iter()
            .filter(|(k, _)| k == "employmentTypes")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(employment, vec!["fulltime"]);
    }

    #[test]
    fn test_selected_employment_types_keep_stored_order() {
        let mut filters = FilterState::default();
        filters.set_employment_types(Selection::from_values([
            EmploymentType::Contractor,
            EmploymentType::PartTime,
        ]));
        let params = build_params(&filters, &SearchContext::default());
        assert_eq!(value(&params, "employmentTypes"), Some("contractor;parttime"));
    }

    #[test]
    fn test_context_values_pass_through() {
        let params = build_params(
            &FilterState::default(),
            &SearchContext::new("rust developer", "Berlin"),
        );
        assert_eq!(value(&params, "query"), Some("rust developer"));
        assert_eq!(value(&params, "location"), Some("Berlin"));

        let params = build_params(
            &FilterState::default(),
            &SearchContext::new("", ANYWHERE),
        );
        assert_eq!(value(&params, "query"), Some("jobs"));
        assert_eq!(value(&params, "location"), Some("anywhere"));
    }

    #[test]
    fn test_optional_params_only_when_set() {
        let mut filters = FilterState::default();
        let params = build_params(&filters, &SearchContext::default());
        for key in ["experienceLevels", "benefits", "minSalary", "maxSalary"] {
            assert_eq!(value(&params, key), None, "{} should be omitted", key);
        }

        filters.set_remote_only(true);
        filters.set_auto_translate_location(false);
        filters.set_experience_levels(Selection::from_values([
            ExperienceLevel::Entry,
            ExperienceLevel::Mid,
        ]));
        filters.set_salary_range(None, Some(90_000));
        filters.set_benefits(Selection::from_values([
            Benefit::HealthInsurance,
            Benefit::RetirementPlan,
        ]));

        let params = build_params(&filters, &SearchContext::default());
        assert_eq!(value(&params, "remoteOnly"), Some("true"));
        assert_eq!(value(&params, "autoTranslateLocation"), Some("false"));
        assert_eq!(value(&params, "experienceLevels"), Some("entry;mid"));
        assert_eq!(value(&params, "minSalary"), None);
        assert_eq!(value(&params, "maxSalary"), Some("90000"));
        assert_eq!(
            value(&params, "benefits"),
            Some("healthInsurance;retirementPlan")
        );
    }

    #[test]
    fn test_required_keys_always_present_and_deterministic() {
        let mut filters = FilterState::default();
        filters.set_employment_types(Selection::empty());
        filters.set_salary_range(Some(1), Some(0));
        let context = SearchContext::new("data", "London");

        let first = build_params(&filters, &context);
        let second = build_params(&filters, &context);
        assert_eq!(first, second);

        for key in ["query", "location", "autoTranslateLocation", "remoteOnly"] {
            assert!(value(&first, key).is_some(), "{} missing", key);
        }
        assert_eq!(value(&first, "maxSalary"), Some("0"));
    }

    #[test]
    fn test_encode_query_escapes() {
        let params = vec![
            ("query".to_string(), "c++ & rust".to_string()),
            ("location".to_string(), "São Paulo".to_string()),
        ];
        assert_eq!(
            encode_query(&params),
            "query=c%2B%2B+%26+rust&location=S%C3%A3o+Paulo"
        );
    }

    #[test]
    fn test_encode_query_matches_request_url() {
        let params = vec![("employmentTypes".to_string(), "fulltime;parttime".to_string())];
        let mut url = reqwest::Url::parse("https://jobs.test/v2/list").unwrap();
        url.query_pairs_mut().extend_pairs(&params);

        assert_eq!(encode_query(&params), "employmentTypes=fulltime%3Bparttime");
        assert_eq!(url.query(), Some(encode_query(&params).as_str()));
    }
}
