//! Schema member model.
//!
//! A [`SchemaMember`] is one declared binding target of an argument class:
//! a named argument, a flag, an indexed (positional) argument, or a
//! command. The typed setter is erased behind a boxed closure so a whole
//! class schema can live in one homogeneous list and be cached.

use crate::convert::ConvertFailure;
use crate::error::{BindError, Error};
use crate::tokenizer::ParsedEntries;

/// Writes a converted value into the target struct.
pub(crate) type AssignFn<T> =
    Box<dyn Fn(&mut T, &str) -> Result<(), ConvertFailure> + Send + Sync>;

/// Whole-target validation hook, run after a member bound successfully.
pub(crate) type ValidateFn<T> = Box<dyn Fn(&T) -> Result<(), String> + Send + Sync>;

/// Installs a parameterless command instance into its slot.
pub(crate) type InstallFn<T> = Box<dyn Fn(&mut T) + Send + Sync>;

/// Binds the remaining entries into a command's own argument class and
/// installs the resulting command instance.
pub(crate) type NestedBindFn<T> =
    Box<dyn Fn(&mut T, &mut ParsedEntries) -> Result<(), Error> + Send + Sync>;

/// Executes a bound command, returning whether one actually ran.
pub(crate) type RunFn<T> = Box<dyn Fn(&mut T) -> bool + Send + Sync>;

/// Help metadata attached to a member.
pub struct HelpText {
    /// Fallback description, shown when no lookup resolves the key.
    pub description: String,
    /// Optional key for resolving a localized description at render time.
    pub resource_key: Option<String>,
}

/// How entries bind to this member.
pub(crate) enum MemberKind<T> {
    /// `-name=value` style argument with a typed value.
    Named {
        trim_quotation: bool,
        assign: AssignFn<T>,
    },
    /// `-name` style boolean switch; rejects non-empty values.
    Flag { set: fn(&mut T, bool) },
    /// Bound by position among the unmarked tokens.
    Indexed {
        position: usize,
        trim_quotation: bool,
        assign: AssignFn<T>,
    },
    /// A sub-command selected by a bare token.
    Command(CommandSpec<T>),
}

pub(crate) struct CommandSpec<T> {
    /// Eligible to run when no command name was supplied.
    pub(crate) is_default: bool,
    pub(crate) arity: CommandArity<T>,
    pub(crate) run: RunFn<T>,
}

/// Whether a command consumes the remaining arguments.
pub(crate) enum CommandArity<T> {
    /// Instantiated from `Default`, takes no arguments of its own.
    Parameterless { install: InstallFn<T> },
    /// Carries an argument class that the leftover entries bind into.
    Typed { bind: NestedBindFn<T> },
}

/// One declared member of an argument class schema.
pub struct SchemaMember<T> {
    pub(crate) name: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) required: bool,
    pub(crate) help: Option<HelpText>,
    pub(crate) validator: Option<ValidateFn<T>>,
    pub(crate) kind: MemberKind<T>,
}

impl<T> SchemaMember<T> {
    /// Declared primary name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub(crate) fn help(&self) -> Option<&HelpText> {
        self.help.as_ref()
    }

    /// Primary name first, then aliases, in declaration order. Lookup
    /// precedence during binding follows this order.
    pub(crate) fn lookup_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub(crate) fn is_command(&self) -> bool {
        matches!(self.kind, MemberKind::Command(_))
    }

    /// Runs the member validator against the (already assigned) target.
    pub(crate) fn validate(&self, target: &T) -> Result<(), BindError> {
        if let Some(validator) = &self.validator {
            validator(target).map_err(|message| BindError::ValidationFailure {
                name: self.name.clone(),
                message,
            })?;
        }
        Ok(())
    }
}
