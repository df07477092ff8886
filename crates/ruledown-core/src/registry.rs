//! The effective rule set.
//!
//! A registry is assembled once from a base grammar and a list of
//! extensions, validated, sorted by precedence and then only read. The
//! standard grammar lives in a process-wide static.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::Lazy;

use crate::error::GrammarError;
use crate::rule::Rule;
use crate::rules;

/// Inputs every rule is tried against at build time. A rule that matches any
/// of them with zero length can stall the parser; the catch-all rule must
/// consume at least one byte of each non-empty probe.
const PROBES: &[&str] = &[
    "", " ", "\n", "x", "xyz", "7", "_", "*", "~", "!", "[", "(", ")", "-", "img", "é", "\t\t",
    "~!", "~~~", "__", "**", "-youtube(",
];

static STANDARD: Lazy<Registry> = Lazy::new(|| {
    Registry::build(&rules::base(), &rules::extensions())
        .unwrap_or_else(|err| panic!("built-in grammar is invalid: {err}"))
});

/// Ordered, validated, read-only rule set.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Sorted ascending by order; ties keep merge order.
    rules: Vec<Rule>,
    by_type: HashMap<&'static str, usize>,
    catch_all: usize,
}

impl Registry {
    /// The built-in grammar: [`rules::base`] merged with
    /// [`rules::extensions`]. Built on first use.
    pub fn standard() -> &'static Registry {
        &STANDARD
    }

    /// Merge `extensions` over `base` and validate the result.
    ///
    /// An extension whose type id already exists replaces that rule
    /// wholesale, keeping its merge position; a new type id is appended.
    /// The merged list is stably sorted by order.
    pub fn build(base: &[Rule], extensions: &[Rule]) -> Result<Self, GrammarError> {
        let mut merged: Vec<Rule> = Vec::with_capacity(base.len() + extensions.len());
        for rule in base.iter().chain(extensions) {
            match merged.iter_mut().find(|r| r.type_id == rule.type_id) {
                Some(existing) => *existing = *rule,
                None => merged.push(*rule),
            }
        }

        for rule in &merged {
            validate(rule)?;
        }

        merged.sort_by(|a, b| a.order.total_cmp(&b.order));

        let catch_all = merged
            .iter()
            .position(|r| r.catch_all)
            .ok_or(GrammarError::MissingCatchAll)?;
        check_catch_all(&merged[catch_all])?;

        let by_type = merged
            .iter()
            .enumerate()
            .map(|(i, r)| (r.type_id, i))
            .collect();

        let registry = Self {
            rules: merged,
            by_type,
            catch_all,
        };
        debug!("grammar order: {}", registry.describe());
        Ok(registry)
    }

    /// Rules in precedence order.
    #[inline]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Rule for a node type.
    #[inline]
    pub fn get(&self, type_id: &str) -> Option<&Rule> {
        self.by_type.get(type_id).map(|&i| &self.rules[i])
    }

    /// The fallback rule for unrecognized input.
    #[inline]
    pub fn catch_all(&self) -> &Rule {
        &self.rules[self.catch_all]
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `type_id@order` pairs in precedence order.
    pub fn describe(&self) -> String {
        self.rules
            .iter()
            .map(|r| format!("{}@{}", r.type_id, r.order))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn validate(rule: &Rule) -> Result<(), GrammarError> {
    if !rule.order.is_finite() {
        return Err(GrammarError::InvalidOrder {
            type_id: rule.type_id,
        });
    }
    for &probe in PROBES {
        let Some(result) = rule.try_match(probe) else {
            continue;
        };
        if result.len == 0 {
            return Err(GrammarError::EmptyMatch {
                type_id: rule.type_id,
                offset: 0,
            });
        }
        if !probe.is_char_boundary(result.len) {
            return Err(GrammarError::MalformedMatch {
                type_id: rule.type_id,
                offset: 0,
            });
        }
    }
    Ok(())
}

fn check_catch_all(rule: &Rule) -> Result<(), GrammarError> {
    for &probe in PROBES.iter().filter(|p| !p.is_empty()) {
        match rule.try_match(probe) {
            Some(result) if result.len > 0 => {}
            _ => {
                return Err(GrammarError::CatchAllRejected {
                    type_id: rule.type_id,
                    probe,
                })
            }
        }
    }
    Ok(())
}
