//! Command selection and execution.
//!
//! After binding, at most one command slot of the argument class is
//! populated. The dispatcher runs it; when none matched it falls back to
//! the declared default command, re-binding the raw input as if the
//! default's name had been typed first.

use serde::Serialize;

use crate::binder::bind_entries;
use crate::error::Result;
use crate::schema::member::MemberKind;
use crate::schema::{ArgumentClass, schema_for};
use crate::tokenizer::{ParsedEntry, tokenize};

/// A runnable command bound from the command line.
pub trait Command {
    fn execute(&mut self);
}

/// Outcome of a dispatch call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResult {
    /// Whether any command ran.
    pub executed: bool,
    /// Present only when the default command was synthesized: the input
    /// was re-bound, so the leftover set may differ from the first bind.
    pub leftovers: Option<Vec<ParsedEntry>>,
}

impl DispatchResult {
    fn none() -> Self {
        Self {
            executed: false,
            leftovers: None,
        }
    }
}

/// Runs the command bound into `target`, if any.
///
/// `raw_args` must be the same input `target` was bound from; it is only
/// consulted when no command matched and a default command has to be
/// synthesized. Returns how the dispatch ended; a class without command
/// members dispatches to nothing.
pub fn execute<T, S>(target: &mut T, raw_args: &[S], case_sensitive: bool) -> Result<DispatchResult>
where
    T: ArgumentClass,
    S: AsRef<str>,
{
    let schema = schema_for::<T>()?;
    if !schema.has_commands() {
        return Ok(DispatchResult::none());
    }

    for member in schema.command_members() {
        let MemberKind::Command(spec) = &member.kind else {
            continue;
        };
        if (spec.run)(target) {
            tracing::debug!(command = member.name(), "dispatched");
            return Ok(DispatchResult {
                executed: true,
                leftovers: None,
            });
        }
    }

    let Some(member) = schema.default_command(!raw_args.is_empty()) else {
        return Ok(DispatchResult::none());
    };
    let MemberKind::Command(spec) = &member.kind else {
        return Ok(DispatchResult::none());
    };

    // Re-bind as if the user had typed the default command's name first.
    tracing::debug!(command = member.name(), "falling back to default command");
    let mut synthesized: Vec<String> = Vec::with_capacity(raw_args.len() + 1);
    synthesized.push(member.name().to_string());
    synthesized.extend(raw_args.iter().map(|arg| arg.as_ref().to_string()));
    let mut entries = tokenize(&synthesized, case_sensitive);
    bind_entries(&schema, &mut entries, target)?;
    let executed = (spec.run)(target);
    Ok(DispatchResult {
        executed,
        leftovers: Some(entries.leftovers()),
    })
}
