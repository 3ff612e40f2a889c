//! Binds parsed entries onto an argument class instance.
//!
//! Members bind in declaration order and consume their entries from the
//! set as they match, so whatever the caller finds left in the entry set
//! afterwards never matched any member. The first error aborts the bind.

use crate::convert::{ConvertFailure, trim_quotation};
use crate::error::{BindError, Error};
use crate::schema::ClassSchema;
use crate::schema::member::{CommandArity, MemberKind, SchemaMember};
use crate::tokenizer::{ParsedEntries, ParsedEntry};

/// Binds `entries` onto `target` following `schema`, consuming every
/// matched entry from the set.
pub fn bind_entries<T>(
    schema: &ClassSchema<T>,
    entries: &mut ParsedEntries,
    target: &mut T,
) -> Result<(), Error> {
    for member in schema.members() {
        match &member.kind {
            MemberKind::Flag { set } => {
                // A flag given under several of its names is harmless;
                // every form is consumed and the flag is simply set.
                let mut matched = false;
                for name in member.lookup_names() {
                    if let Some(entry) = entries.take(name) {
                        if entry.value.as_deref().is_some_and(|v| !v.is_empty()) {
                            return Err(BindError::OptionWithValue(entry.name).into());
                        }
                        matched = true;
                    }
                }
                if matched {
                    set(target, true);
                    member.validate(target)?;
                } else if member.is_required() {
                    return Err(missing(member).into());
                }
            }
            MemberKind::Named {
                trim_quotation: trim,
                assign,
            } => {
                match take_unique(entries, member)? {
                    Some(entry) => {
                        let Some(value) = entry.value else {
                            return Err(BindError::ArgumentWithoutValue(entry.name).into());
                        };
                        let raw = if *trim { trim_quotation(&value) } else { &value };
                        assign(target, raw).map_err(|f| conversion(f, member))?;
                        member.validate(target)?;
                    }
                    None if member.is_required() => return Err(missing(member).into()),
                    None => {}
                }
            }
            MemberKind::Indexed {
                position,
                trim_quotation: trim,
                assign,
            } => {
                // A marked spelling wins over the positional slot; a bare
                // token that merely spells the member's name stays
                // positional.
                let raw = match take_unique_marked(entries, member)? {
                    Some(entry) => match entry.value {
                        Some(value) => Some(value),
                        None => return Err(BindError::ArgumentWithoutValue(entry.name).into()),
                    },
                    None => entries.take_position(*position).map(|entry| entry.name),
                };
                match raw {
                    Some(value) => {
                        let raw = if *trim { trim_quotation(&value) } else { &value };
                        assign(target, raw).map_err(|f| conversion(f, member))?;
                        member.validate(target)?;
                    }
                    None if member.is_required() => return Err(missing(member).into()),
                    None => {}
                }
            }
            MemberKind::Command(spec) => {
                match take_unique(entries, member)? {
                    Some(entry) => {
                        // A value on a command token carries no meaning.
                        tracing::debug!(command = entry.name, "command matched");
                        match &spec.arity {
                            CommandArity::Parameterless { install } => install(target),
                            CommandArity::Typed { bind } => bind(target, entries)?,
                        }
                        member.validate(target)?;
                    }
                    None if member.is_required() => return Err(missing(member).into()),
                    None => {}
                }
            }
        }
    }
    Ok(())
}

/// Consumes the entry matching any of the member's names, raising an
/// ambiguity error when more than one form was supplied.
fn take_unique<T>(
    entries: &mut ParsedEntries,
    member: &SchemaMember<T>,
) -> Result<Option<ParsedEntry>, BindError> {
    take_matching(entries, member, ParsedEntries::take)
}

/// `take_unique` restricted to marked entries, for indexed members.
fn take_unique_marked<T>(
    entries: &mut ParsedEntries,
    member: &SchemaMember<T>,
) -> Result<Option<ParsedEntry>, BindError> {
    take_matching(entries, member, ParsedEntries::take_marked)
}

fn take_matching<T>(
    entries: &mut ParsedEntries,
    member: &SchemaMember<T>,
    take: fn(&mut ParsedEntries, &str) -> Option<ParsedEntry>,
) -> Result<Option<ParsedEntry>, BindError> {
    let mut found: Option<ParsedEntry> = None;
    for name in member.lookup_names() {
        if let Some(entry) = take(entries, name) {
            if found.is_some() {
                return Err(BindError::AmbiguousArgument(member.name().to_string()));
            }
            found = Some(entry);
        }
    }
    Ok(found)
}

fn missing<T>(member: &SchemaMember<T>) -> BindError {
    BindError::MissingRequiredArgument(member.name().to_string())
}

fn conversion<T>(failure: ConvertFailure, member: &SchemaMember<T>) -> Error {
    BindError::TypeConversionFailure {
        value: failure.value,
        parameter: member.name().to_string(),
        type_name: failure.type_name,
        valid_values: failure.valid_values.map(<[_]>::to_vec),
    }
    .into()
}
