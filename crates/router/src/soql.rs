//! SOQL statements for the category lookups.

use crate::term::SearchTerm;

pub fn flow_definitions(term: &SearchTerm, limit: usize) -> String {
    let pattern = term.like_pattern();
    format!(
        "SELECT Id, DeveloperName, ActiveVersion.MasterLabel, LatestVersion.MasterLabel, \
         ActiveVersionId, LatestVersionId FROM FlowDefinition \
         WHERE DeveloperName LIKE '{pattern}' OR ActiveVersion.MasterLabel LIKE '{pattern}' \
         LIMIT {limit}"
    )
}

pub fn users(term: &SearchTerm, limit: usize) -> String {
    format!(
        "SELECT Id, Name, Username FROM User WHERE Name LIKE '{}' LIMIT {limit}",
        term.like_pattern()
    )
}

pub fn profiles(term: &SearchTerm, limit: usize) -> String {
    format!(
        "SELECT Id, Name FROM Profile WHERE Name LIKE '{}' LIMIT {limit}",
        term.like_pattern()
    )
}
