//! Argument class schemas.
//!
//! An argument class is a plain struct that declares, once, how command
//! line entries bind onto its fields. The declaration is evaluated lazily,
//! validated for name collisions, and cached per type for the lifetime of
//! the process.

pub mod builder;
pub mod member;
mod registry;

pub use builder::{MemberRef, SchemaBuilder};
pub use registry::schema_for;

use crate::error::ConfigError;
use crate::schema::member::{CommandArity, MemberKind, SchemaMember};

/// A struct whose fields can be bound from command line arguments.
///
/// `Default` provides the pre-bind state; anything the input does not
/// mention keeps its default value.
pub trait ArgumentClass: Default + 'static {
    /// Declares the bindable members of this class.
    fn declare(schema: &mut SchemaBuilder<Self>);
}

/// The sealed, validated schema of one argument class.
pub struct ClassSchema<T> {
    pub(crate) class_name: &'static str,
    pub(crate) members: Vec<SchemaMember<T>>,
    pub(crate) has_commands: bool,
}

impl<T: ArgumentClass> ClassSchema<T> {
    pub(crate) fn build() -> Result<Self, ConfigError> {
        let mut builder = SchemaBuilder::new();
        T::declare(&mut builder);
        builder.finish(short_type_name::<T>())
    }
}

impl<T> ClassSchema<T> {
    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Members in declaration order, which is also binding order.
    pub fn members(&self) -> &[SchemaMember<T>] {
        &self.members
    }

    pub(crate) fn has_commands(&self) -> bool {
        self.has_commands
    }

    pub(crate) fn command_members(&self) -> impl Iterator<Item = &SchemaMember<T>> {
        self.members.iter().filter(|m| m.is_command())
    }

    /// The default command matching the shape of the input: a typed
    /// default when arguments are present, a parameterless one when the
    /// input is empty.
    pub(crate) fn default_command(&self, expects_arguments: bool) -> Option<&SchemaMember<T>> {
        self.command_members().find(|member| {
            let MemberKind::Command(spec) = &member.kind else {
                return false;
            };
            spec.is_default
                && matches!(spec.arity, CommandArity::Typed { .. }) == expects_arguments
        })
    }

    /// Closest declared name or alias to `input`, for "did you mean"
    /// diagnostics on leftover entries. Only near misses qualify.
    pub fn suggest(&self, input: &str) -> Option<&str> {
        let folded = input.to_lowercase();
        self.members
            .iter()
            .flat_map(SchemaMember::lookup_names)
            .map(|name| (strsim::levenshtein(&folded, &name.to_lowercase()), name))
            .filter(|(distance, _)| *distance <= 2)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, name)| name)
    }
}

impl<T> std::fmt::Debug for ClassSchema<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassSchema")
            .field("class_name", &self.class_name)
            .field("members", &self.members.len())
            .field("has_commands", &self.has_commands)
            .finish()
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
