//! Fluent schema declaration.
//!
//! An argument class declares its members through a [`SchemaBuilder`]
//! inside [`ArgumentClass::declare`](crate::ArgumentClass::declare). Each
//! declaration returns a [`MemberRef`] handle for chaining the optional
//! attributes (aliases, required, help text, quote trimming, validators).

use std::collections::HashMap;

use crate::convert::{self, ArgValue};
use crate::dispatch::Command;
use crate::error::ConfigError;
use crate::schema::member::{
    AssignFn, CommandArity, CommandSpec, HelpText, MemberKind, SchemaMember,
};
use crate::schema::{ArgumentClass, ClassSchema, schema_for};

/// Collects member declarations for one argument class.
pub struct SchemaBuilder<T> {
    members: Vec<SchemaMember<T>>,
}

impl<T: 'static> SchemaBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    fn push(&mut self, member: SchemaMember<T>) -> MemberRef<'_, T> {
        self.members.push(member);
        MemberRef {
            member: self.members.last_mut().expect("member was just pushed"),
        }
    }

    fn assign_fn<V: ArgValue>(set: fn(&mut T, V)) -> AssignFn<T> {
        Box::new(move |target, raw| {
            let value = convert::convert::<V>(raw)?;
            set(target, value);
            Ok(())
        })
    }

    /// Declares a named argument: `-name=value` or `-name:value`.
    pub fn named<V: ArgValue>(&mut self, name: &str, set: fn(&mut T, V)) -> MemberRef<'_, T> {
        self.push(SchemaMember {
            name: name.to_string(),
            aliases: Vec::new(),
            required: false,
            help: None,
            validator: None,
            kind: MemberKind::Named {
                trim_quotation: false,
                assign: Self::assign_fn(set),
            },
        })
    }

    /// Declares a boolean switch: `-name` sets it, a non-empty value is an
    /// error.
    pub fn flag(&mut self, name: &str, set: fn(&mut T, bool)) -> MemberRef<'_, T> {
        self.push(SchemaMember {
            name: name.to_string(),
            aliases: Vec::new(),
            required: false,
            help: None,
            validator: None,
            kind: MemberKind::Flag { set },
        })
    }

    /// Declares an argument bound by its position among the unmarked
    /// tokens. The name is still usable for `-name=value` style input and
    /// for help output.
    pub fn indexed<V: ArgValue>(
        &mut self,
        position: usize,
        name: &str,
        set: fn(&mut T, V),
    ) -> MemberRef<'_, T> {
        self.push(SchemaMember {
            name: name.to_string(),
            aliases: Vec::new(),
            required: false,
            help: None,
            validator: None,
            kind: MemberKind::Indexed {
                position,
                trim_quotation: false,
                assign: Self::assign_fn(set),
            },
        })
    }

    /// Declares a parameterless sub-command, selected by a bare token and
    /// instantiated from `Default`.
    pub fn command<C>(&mut self, name: &str, slot: fn(&mut T) -> &mut Option<C>) -> MemberRef<'_, T>
    where
        C: Command + Default + 'static,
    {
        self.push(SchemaMember {
            name: name.to_string(),
            aliases: Vec::new(),
            required: false,
            help: None,
            validator: None,
            kind: MemberKind::Command(CommandSpec {
                is_default: false,
                arity: CommandArity::Parameterless {
                    install: Box::new(move |target| {
                        *slot(target) = Some(C::default());
                    }),
                },
                run: Self::run_fn(slot),
            }),
        })
    }

    /// Declares a sub-command with its own argument class. When the
    /// command matches, the remaining entries bind into a fresh `A` and
    /// `make` turns it into the command instance.
    pub fn command_for<A, C>(
        &mut self,
        name: &str,
        slot: fn(&mut T) -> &mut Option<C>,
        make: fn(A) -> C,
    ) -> MemberRef<'_, T>
    where
        A: ArgumentClass,
        C: Command + 'static,
    {
        self.push(SchemaMember {
            name: name.to_string(),
            aliases: Vec::new(),
            required: false,
            help: None,
            validator: None,
            kind: MemberKind::Command(CommandSpec {
                is_default: false,
                arity: CommandArity::Typed {
                    bind: Box::new(move |target, entries| {
                        let schema = schema_for::<A>()?;
                        let mut arguments = A::default();
                        crate::binder::bind_entries(&schema, entries, &mut arguments)?;
                        *slot(target) = Some(make(arguments));
                        Ok(())
                    }),
                },
                run: Self::run_fn(slot),
            }),
        })
    }

    fn run_fn<C: Command + 'static>(
        slot: fn(&mut T) -> &mut Option<C>,
    ) -> Box<dyn Fn(&mut T) -> bool + Send + Sync> {
        Box::new(move |target| match slot(target).as_mut() {
            Some(command) => {
                command.execute();
                true
            }
            None => false,
        })
    }

    /// Seals the declaration, checking name/alias uniqueness across the
    /// whole class (case-insensitive, regardless of the binding mode the
    /// schema is later used with).
    pub(crate) fn finish(self, class_name: &'static str) -> Result<ClassSchema<T>, ConfigError> {
        let mut seen: HashMap<String, String> = HashMap::new();
        for member in &self.members {
            for name in member.lookup_names() {
                let key = name.to_lowercase();
                if let Some(first) = seen.insert(key, member.name().to_string()) {
                    if first != member.name() {
                        return Err(ConfigError::DuplicateName {
                            class_name,
                            first,
                            second: member.name().to_string(),
                            name: name.to_string(),
                        });
                    }
                    // A member colliding with itself is a self-alias; the
                    // alias is simply redundant.
                }
            }
        }
        let has_commands = self.members.iter().any(SchemaMember::is_command);
        Ok(ClassSchema {
            class_name,
            members: self.members,
            has_commands,
        })
    }
}

/// Chaining handle for the member declared last.
pub struct MemberRef<'a, T> {
    member: &'a mut SchemaMember<T>,
}

impl<T> MemberRef<'_, T> {
    /// Adds an alternative name. Lookup prefers the primary name, then
    /// aliases in declaration order.
    pub fn alias(self, name: &str) -> Self {
        self.member.aliases.push(name.to_string());
        self
    }

    /// Marks the member as required; binding fails with a
    /// `MissingRequiredArgument` when it gets no match.
    pub fn required(self) -> Self {
        self.member.required = true;
        self
    }

    /// Strips one pair of matching quotes from the raw value before
    /// conversion. Only meaningful for value-carrying members.
    pub fn trim_quotation(self) -> Self {
        match &mut self.member.kind {
            MemberKind::Named { trim_quotation, .. }
            | MemberKind::Indexed { trim_quotation, .. } => *trim_quotation = true,
            MemberKind::Flag { .. } | MemberKind::Command(_) => {}
        }
        self
    }

    /// Attaches a description shown in help output.
    pub fn help(self, description: &str) -> Self {
        self.member.help = Some(HelpText {
            description: description.to_string(),
            resource_key: None,
        });
        self
    }

    /// Attaches a help description resolved through a
    /// [`DescriptionLookup`](crate::DescriptionLookup) at render time,
    /// falling back to `fallback` when the key does not resolve.
    pub fn help_localized(self, resource_key: &str, fallback: &str) -> Self {
        self.member.help = Some(HelpText {
            description: fallback.to_string(),
            resource_key: Some(resource_key.to_string()),
        });
        self
    }

    /// Marks a command as the default: it runs when the input names no
    /// command. A parameterless default handles empty input, a typed
    /// default handles input that carries arguments.
    pub fn default_command(self) -> Self {
        if let MemberKind::Command(spec) = &mut self.member.kind {
            spec.is_default = true;
        }
        self
    }

    /// Attaches a validator run right after this member binds. It sees
    /// the whole target so cross-field checks are possible; an `Err`
    /// message surfaces as a `ValidationFailure` bind error.
    pub fn validated_by<F>(self, validator: F) -> Self
    where
        F: Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    {
        self.member.validator = Some(Box::new(validator));
        self
    }
}
