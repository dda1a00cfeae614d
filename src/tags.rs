//! TestRail metadata carried in test tags
//!
//! Tests link themselves to TestRail through `key=value` tags:
//!
//! ```text
//! testrailid=10    defects=BUG-1, BUG-2    references=REF-3, REF-4
//! ```

use crate::client::models::CaseId;

const CASE_ID_KEY: &str = "testrailid";
const DEFECTS_KEY: &str = "defects";
const REFERENCES_KEY: &str = "references";

/// TestRail fields parsed from a test's tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestTags {
    /// Case the test reports to; `None` when the test is not tracked
    pub case_id: Option<CaseId>,
    pub defects: Vec<String>,
    pub references: Vec<String>,
}

impl TestTags {
    /// Parse the TestRail tags out of a test's tag list.
    ///
    /// Keys match case-insensitively and the first tag with a given key
    /// wins. A `testrailid` that is not a positive integer leaves the test
    /// untracked. Never fails: tags it does not recognize are ignored.
    pub fn parse<S: AsRef<str>>(tags: &[S]) -> Self {
        let case_id = find_value(tags, CASE_ID_KEY).and_then(parse_case_id);
        let defects = find_value(tags, DEFECTS_KEY)
            .map(split_list)
            .unwrap_or_default();
        let references = find_value(tags, REFERENCES_KEY)
            .map(split_list)
            .unwrap_or_default();

        Self {
            case_id,
            defects,
            references,
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.case_id.is_some()
    }

    /// Defects as TestRail expects them, or `None` when there are none
    pub fn defects_field(&self) -> Option<String> {
        join(&self.defects)
    }

    /// References as TestRail expects them, or `None` when there are none
    pub fn references_field(&self) -> Option<String> {
        join(&self.references)
    }
}

/// Case id of a tag list, without parsing the other fields.
pub fn case_id<S: AsRef<str>>(tags: &[S]) -> Option<CaseId> {
    find_value(tags, CASE_ID_KEY).and_then(parse_case_id)
}

fn find_value<'a, S: AsRef<str>>(tags: &'a [S], key: &str) -> Option<&'a str> {
    tags.iter().find_map(|tag| {
        let (k, v) = tag.as_ref().split_once('=')?;
        k.trim().eq_ignore_ascii_case(key).then_some(v)
    })
}

fn parse_case_id(value: &str) -> Option<CaseId> {
    value.trim().parse::<CaseId>().ok().filter(|id| *id > 0)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn join(items: &[String]) -> Option<String> {
    if items.is_empty() {
        None
    } else {
        Some(items.join(", "))
    }
}
