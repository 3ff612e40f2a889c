//! Declarative command line argument binding.
//!
//! An argument class is a plain struct implementing [`ArgumentClass`]: it
//! declares once how tokens like `-name=value`, `/flag` or bare command
//! words map onto its fields, and [`bind`] fills an instance from argv.
//! Commands declared on the class are run through [`run`], including
//! fallback to a default command when the input names none.
//!
//! ```
//! use argbind::{ArgumentClass, SchemaBuilder};
//!
//! #[derive(Default)]
//! struct BuildArgs {
//!     target: String,
//!     release: bool,
//! }
//!
//! impl ArgumentClass for BuildArgs {
//!     fn declare(schema: &mut SchemaBuilder<Self>) {
//!         schema
//!             .named("target", |a: &mut Self, v: String| a.target = v)
//!             .alias("t");
//!         schema.flag("release", |a, v| a.release = v).alias("r");
//!     }
//! }
//!
//! let binding = argbind::bind::<BuildArgs, _>(&["-target=debug", "-r"]).unwrap();
//! assert_eq!(binding.arguments.target, "debug");
//! assert!(binding.arguments.release);
//! assert!(binding.leftovers.is_empty());
//! ```

pub mod binder;
pub mod convert;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod schema;
pub mod tokenizer;

pub use binder::bind_entries;
pub use convert::ArgValue;
pub use dispatch::{Command, DispatchResult};
pub use error::{BindError, ConfigError, Error, Result};
pub use help::{ArgumentHelp, DescriptionLookup};
pub use schema::{ArgumentClass, ClassSchema, MemberRef, SchemaBuilder, schema_for};
pub use tokenizer::{ParsedEntries, ParsedEntry, tokenize};

/// A bound argument class plus whatever input did not match its schema.
#[derive(Debug)]
pub struct Binding<T> {
    pub arguments: T,
    /// Entries no member consumed. Marked entries come first (sorted by
    /// name), then positional ones in input order.
    pub leftovers: Vec<ParsedEntry>,
}

/// Binds `args` onto a fresh `T`, matching names case-insensitively.
pub fn bind<T, S>(args: &[S]) -> Result<Binding<T>>
where
    T: ArgumentClass,
    S: AsRef<str>,
{
    bind_with(args, T::default(), false)
}

/// Binds `args` onto an existing instance, optionally matching names
/// case-sensitively. Fields the input does not mention keep the values
/// the instance came in with.
pub fn bind_with<T, S>(args: &[S], instance: T, case_sensitive: bool) -> Result<Binding<T>>
where
    T: ArgumentClass,
    S: AsRef<str>,
{
    let schema = schema_for::<T>()?;
    let mut entries = tokenize(args, case_sensitive);
    let mut arguments = instance;
    bind_entries(&schema, &mut entries, &mut arguments)?;
    Ok(Binding {
        arguments,
        leftovers: entries.leftovers(),
    })
}

/// Outcome of a bind-and-dispatch cycle.
#[derive(Debug)]
pub struct RunOutcome<T> {
    pub arguments: T,
    /// Whether a command (explicit or default) was executed.
    pub command_executed: bool,
    pub leftovers: Vec<ParsedEntry>,
}

/// Binds `args` onto a fresh `T` and runs the matched command, falling
/// back to the declared default command when no command was named.
pub fn run<T, S>(args: &[S]) -> Result<RunOutcome<T>>
where
    T: ArgumentClass,
    S: AsRef<str>,
{
    let Binding {
        mut arguments,
        mut leftovers,
    } = bind::<T, S>(args)?;
    let dispatched = dispatch::execute(&mut arguments, args, false)?;
    // A synthesized default command re-binds the input, so its leftover
    // set supersedes the first one.
    if let Some(rebound) = dispatched.leftovers {
        leftovers = rebound;
    }
    Ok(RunOutcome {
        arguments,
        command_executed: dispatched.executed,
        leftovers,
    })
}

/// Renders the help screen for `T` at the given console width.
pub fn format_help<T: ArgumentClass>(
    console_width: usize,
    lookup: Option<&dyn DescriptionLookup>,
) -> Result<String> {
    let schema = schema_for::<T>()?;
    Ok(help::render(&help::help_rows(&schema, lookup), console_width))
}

/// The raw help rows for `T`, for hosts that do their own layout.
pub fn help_entries<T: ArgumentClass>(
    lookup: Option<&dyn DescriptionLookup>,
) -> Result<Vec<ArgumentHelp>> {
    let schema = schema_for::<T>()?;
    Ok(help::help_rows(&schema, lookup))
}
