//! OS/arch/feature rule evaluation.
//!
//! A rule list gates library inclusion and structured `arguments.game[]` /
//! `arguments.jvm[]` elements. Evaluation is last-match-wins over an ordered
//! list; an empty list is vacuously satisfied; no match defaults to deny.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use picomc_core::{ArchTag, OsTag};
use regex::Regex;
use serde::Deserialize;

/// Host context a rule list is evaluated against.
#[derive(Debug, Clone)]
pub struct Environment {
    pub os: OsTag,
    pub arch: ArchTag,
    pub os_version: String,
    /// This launcher never advertises features; kept as a unit so the
    /// `Rule` shape matches the upstream JSON schema losslessly.
    pub features: (),
}

impl Environment {
    pub fn host() -> Self {
        Self {
            os: picomc_core::OS,
            arch: picomc_core::ARCHITECTURE,
            os_version: picomc_core::system::os_version_string(),
            features: (),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Disallow,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleOs {
    pub name: Option<String>,
    pub arch: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub action: RuleAction,
    #[serde(default)]
    pub os: Option<RuleOs>,
    #[serde(default)]
    pub features: Option<HashMap<String, bool>>,
}

impl Rule {
    /// A rule matches if every declared sub-clause matches. A rule carrying
    /// `features` never matches (this launcher advertises none).
    fn matches(&self, env: &Environment) -> bool {
        if self.features.is_some() {
            return false;
        }
        match &self.os {
            None => true,
            Some(os) => {
                let name_ok = os
                    .name
                    .as_deref()
                    .map_or(true, |n| n == env.os.to_string());
                let arch_ok = os
                    .arch
                    .as_deref()
                    .map_or(true, |pattern| regex_matches(pattern, &env.arch.to_string()));
                let version_ok = os
                    .version
                    .as_deref()
                    .map_or(true, |pattern| regex_matches(pattern, &env.os_version));
                name_ok && arch_ok && version_ok
            }
        }
    }
}

fn regex_matches(pattern: &str, value: &str) -> bool {
    static CACHE: Lazy<std::sync::Mutex<HashMap<String, Regex>>> =
        Lazy::new(|| std::sync::Mutex::new(HashMap::new()));
    let mut cache = CACHE.lock().unwrap();
    let re = cache
        .entry(pattern.to_string())
        .or_insert_with(|| Regex::new(pattern).unwrap_or_else(|_| Regex::new("$^").unwrap()));
    re.is_match(value)
}

/// Evaluates a rule list against an [`Environment`]: last matching rule's
/// action wins, no match defaults to deny, an empty list is allow.
pub struct RuleEngine;

impl RuleEngine {
    pub fn evaluate(rules: &[Rule], env: &Environment) -> bool {
        if rules.is_empty() {
            return true;
        }
        let mut result = false;
        let mut matched_any = false;
        for rule in rules {
            if rule.matches(env) {
                matched_any = true;
                result = rule.action == RuleAction::Allow;
            }
        }
        matched_any && result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux_env() -> Environment {
        Environment {
            os: OsTag::Linux,
            arch: ArchTag::X64,
            os_version: "6.1.0".into(),
            features: (),
        }
    }

    #[test]
    fn empty_rule_list_allows() {
        assert!(RuleEngine::evaluate(&[], &linux_env()));
    }

    #[test]
    fn no_matching_rule_denies() {
        let rules = vec![Rule {
            action: RuleAction::Allow,
            os: Some(RuleOs {
                name: Some("windows".into()),
                arch: None,
                version: None,
            }),
            features: None,
        }];
        assert!(!RuleEngine::evaluate(&rules, &linux_env()));
    }

    #[test]
    fn later_matching_rule_overrides_earlier() {
        let rules = vec![
            Rule {
                action: RuleAction::Allow,
                os: None,
                features: None,
            },
            Rule {
                action: RuleAction::Disallow,
                os: Some(RuleOs {
                    name: Some("osx".into()),
                    arch: None,
                    version: None,
                }),
                features: None,
            },
        ];
        assert!(RuleEngine::evaluate(&rules, &linux_env()));
    }

    #[test]
    fn rule_with_features_never_matches() {
        let mut features = HashMap::new();
        features.insert("is_demo_user".to_string(), true);
        let rules = vec![Rule {
            action: RuleAction::Allow,
            os: None,
            features: Some(features),
        }];
        assert!(!RuleEngine::evaluate(&rules, &linux_env()));
    }
}
