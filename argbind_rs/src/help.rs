//! Help rendering for argument class schemas.
//!
//! Only members that declared a description show up. The output is a
//! three-column layout sized from the longest name and alias list, with
//! descriptions word-wrapped to the remaining console width.

use std::collections::HashMap;

use crate::schema::ClassSchema;

/// Resolves localized help descriptions by resource key.
pub trait DescriptionLookup {
    fn description(&self, resource_key: &str) -> Option<String>;
}

impl DescriptionLookup for HashMap<String, String> {
    fn description(&self, resource_key: &str) -> Option<String> {
        self.get(resource_key).cloned()
    }
}

/// One help row, ready for layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentHelp {
    pub name: String,
    /// Aliases joined with `", "`; empty when the member has none.
    pub aliases: String,
    pub description: String,
}

/// Collects the help rows of a schema in declaration order, resolving
/// localized descriptions through `lookup` where a resource key exists.
pub fn help_rows<T>(
    schema: &ClassSchema<T>,
    lookup: Option<&dyn DescriptionLookup>,
) -> Vec<ArgumentHelp> {
    schema
        .members()
        .iter()
        .filter_map(|member| {
            let help = member.help()?;
            let description = help
                .resource_key
                .as_deref()
                .and_then(|key| lookup?.description(key))
                .unwrap_or_else(|| help.description.clone());
            Some(ArgumentHelp {
                name: member.name().to_string(),
                aliases: member.aliases().join(", "),
                description,
            })
        })
        .collect()
}

/// Lays the rows out for a console of `console_width` characters.
pub fn render(rows: &[ArgumentHelp], console_width: usize) -> String {
    let Some(longest_name) = rows.iter().map(|r| r.name.len()).max() else {
        return String::new();
    };
    let longest_aliases = rows.iter().map(|r| r.aliases.len()).max().unwrap_or(0);

    // "-name" plus at least one trailing space; "[a, b]" plus two.
    let name_width = longest_name + 2;
    let alias_width = longest_aliases + 4;
    let description_width = console_width
        .saturating_sub(name_width + alias_width)
        .max(1);

    let mut out = String::new();
    for row in rows {
        // Alias-less members still get their "[]" cell.
        let aliases = format!("[{}]", row.aliases);
        let mut lines = wrap_words(&row.description, description_width).into_iter();
        out.push_str(&format!(
            "{:<name_width$}{:<alias_width$}{}\n",
            format!("-{}", row.name),
            aliases,
            lines.next().unwrap_or_default(),
        ));
        for continuation in lines {
            out.push_str(&format!(
                "{:pad$}{}\n",
                "",
                continuation,
                pad = name_width + alias_width
            ));
        }
    }
    out
}

/// Greedy word wrap. Words longer than `width` get a line of their own
/// rather than being split.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    if text.len() <= width {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ArgumentClass, SchemaBuilder};

    #[derive(Default)]
    struct HelpArgs {
        path: String,
        silent: bool,
        quiet: bool,
    }

    impl ArgumentClass for HelpArgs {
        fn declare(schema: &mut SchemaBuilder<Self>) {
            schema
                .named("path", |a: &mut Self, v: String| a.path = v)
                .alias("p")
                .alias("file")
                .help("The path of the file to execute");
            schema
                .flag("silent", |a, v| a.silent = v)
                .help_localized("Help.Silent", "Suppresses all output");
            schema.flag("quiet", |a, v| a.quiet = v);
        }
    }

    fn rows(lookup: Option<&dyn DescriptionLookup>) -> Vec<ArgumentHelp> {
        let schema = ClassSchema::<HelpArgs>::build().unwrap();
        help_rows(&schema, lookup)
    }

    #[test]
    fn skips_members_without_help_text() {
        let rows = rows(None);
        let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["path", "silent"]);
    }

    #[test]
    fn joins_aliases_for_display() {
        let rows = rows(None);
        assert_eq!(rows[0].aliases, "p, file");
        assert_eq!(rows[1].aliases, "");
    }

    #[test]
    fn resolves_localized_descriptions_through_the_lookup() {
        let mut table = HashMap::new();
        table.insert("Help.Silent".to_string(), "Localized text".to_string());
        let rows = rows(Some(&table));
        assert_eq!(rows[1].description, "Localized text");
        // Without a lookup the fallback text is used.
        let fallback = self::rows(None);
        assert_eq!(fallback[1].description, "Suppresses all output");
    }

    #[test]
    fn columns_are_sized_from_the_longest_entries() {
        let rows = rows(None);
        let text = render(&rows, 80);
        let lines: Vec<&str> = text.lines().collect();
        // name column: "silent" (6) + 2; alias column: "p, file" (7) + 4.
        assert!(lines[0].starts_with("-path   "));
        assert_eq!(&lines[0][8..19], "[p, file]  ");
        // Alias-less rows still render their bracket cell.
        assert!(lines[1].starts_with("-silent []"));
        assert!(lines[0].ends_with("The path of the file to execute"));
    }

    #[test]
    fn long_descriptions_wrap_and_continuation_lines_align() {
        let row = ArgumentHelp {
            name: "x".to_string(),
            aliases: String::new(),
            description: "one two three four five six".to_string(),
        };
        let text = render(&[row], 17);
        // name col 3, alias col 4, description col 10.
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "-x []  one two");
        assert_eq!(lines[1], "       three four");
        assert_eq!(lines[2], "       five six");
    }

    #[test]
    fn empty_row_set_renders_nothing() {
        assert_eq!(render(&[], 80), "");
    }
}
