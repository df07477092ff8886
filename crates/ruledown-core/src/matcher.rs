//! First-match selection over the ordered rule list.

use log::trace;

use crate::error::GrammarError;
use crate::rule::{Capture, Fragment, Rule};

/// Find the first rule, in order, that matches at the start of `remaining`.
///
/// Block rules are skipped when `inline` is set. The winning match is
/// validated into a [`Capture`]; a rule that consumes nothing or reports
/// ranges outside the input is a grammar defect and stops the parse.
pub fn match_at<'r, 'a>(
    rules: &'r [Rule],
    remaining: Fragment<'a>,
    inline: bool,
) -> Result<(&'r Rule, Capture<'a>), GrammarError> {
    for rule in rules {
        if inline && rule.block {
            continue;
        }
        if let Some(result) = rule.try_match(remaining.text) {
            trace!(
                "rule `{}` matched {} bytes at offset {}",
                rule.type_id,
                result.len,
                remaining.offset
            );
            let capture = Capture::resolve(rule.type_id, remaining, result)?;
            return Ok((rule, capture));
        }
    }

    Err(GrammarError::NoRuleMatched {
        offset: remaining.offset,
    })
}
