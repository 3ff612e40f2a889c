//! String-to-value conversion for matched arguments.
//!
//! Every declared member type implements [`ArgValue`]. Scalars parse via
//! `FromStr` (locale-independent by construction); booleans additionally
//! accept an empty value as `true`, which covers `-flag=` on a
//! bool-declared named argument. Enums get an implementation through the
//! [`arg_enum!`](crate::arg_enum) macro, including the list of valid
//! member names used in conversion error messages.

use std::path::PathBuf;

/// A value type that can be bound from a command line token.
pub trait ArgValue: Sized + 'static {
    /// Type name used in conversion error messages.
    const TYPE_NAME: &'static str;

    /// Parses the raw token text. `None` means the value is invalid.
    fn from_token(raw: &str) -> Option<Self>;

    /// The value to use when the matched entry carried an empty value.
    /// Only booleans resolve this (`-flag=` means `true`); everything else
    /// falls through to [`from_token`](Self::from_token).
    fn from_empty() -> Option<Self> {
        None
    }

    /// For enum-like types, the full list of valid member names.
    fn valid_values() -> Option<&'static [&'static str]> {
        None
    }
}

/// A failed conversion, before it is attributed to a schema member.
/// The binder turns this into `BindError::TypeConversionFailure`.
#[derive(Debug)]
pub struct ConvertFailure {
    pub value: String,
    pub type_name: &'static str,
    pub valid_values: Option<&'static [&'static str]>,
}

/// Converts a raw string value to the declared type.
pub fn convert<V: ArgValue>(raw: &str) -> Result<V, ConvertFailure> {
    if raw.is_empty() {
        if let Some(value) = V::from_empty() {
            return Ok(value);
        }
    }
    V::from_token(raw).ok_or_else(|| ConvertFailure {
        value: raw.to_string(),
        type_name: V::TYPE_NAME,
        valid_values: V::valid_values(),
    })
}

/// Strips one matching pair of leading/trailing single or double quotes.
pub(crate) fn trim_quotation(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

impl ArgValue for String {
    const TYPE_NAME: &'static str = "String";

    fn from_token(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl ArgValue for PathBuf {
    const TYPE_NAME: &'static str = "PathBuf";

    fn from_token(raw: &str) -> Option<Self> {
        Some(PathBuf::from(raw))
    }
}

impl ArgValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_token(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn from_empty() -> Option<Self> {
        Some(true)
    }
}

macro_rules! impl_arg_value_via_from_str {
    ($($ty:ty),+ $(,)?) => {$(
        impl ArgValue for $ty {
            const TYPE_NAME: &'static str = stringify!($ty);

            fn from_token(raw: &str) -> Option<Self> {
                raw.parse().ok()
            }
        }
    )+};
}

impl_arg_value_via_from_str!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Declares a unit enum that can be bound from the command line.
///
/// Variant names are matched case-insensitively; the variant list feeds
/// the "Possible values are ..." part of conversion error messages.
///
/// ```rust
/// argbind::arg_enum! {
///     #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
///     pub enum ColorMode {
///         #[default]
///         Auto,
///         Always,
///         Never,
///     }
/// }
/// ```
#[macro_export]
macro_rules! arg_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$variant_meta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $crate::ArgValue for $name {
            const TYPE_NAME: &'static str = stringify!($name);

            fn from_token(raw: &str) -> Option<Self> {
                $(
                    if raw.eq_ignore_ascii_case(stringify!($variant)) {
                        return Some(Self::$variant);
                    }
                )+
                None
            }

            fn valid_values() -> Option<&'static [&'static str]> {
                Some(&[$(stringify!($variant)),+])
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    arg_enum! {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum Boolenum {
            True,
            False,
        }
    }

    #[test]
    fn converts_booleans_case_insensitively() {
        assert_eq!(convert::<bool>("True").unwrap(), true);
        assert_eq!(convert::<bool>("TRUE").unwrap(), true);
        assert_eq!(convert::<bool>("false").unwrap(), false);
        assert!(convert::<bool>("Tuere").is_err());
    }

    #[test]
    fn empty_value_means_true_for_booleans_only() {
        assert_eq!(convert::<bool>("").unwrap(), true);
        assert!(convert::<i32>("").is_err());
        assert_eq!(convert::<String>("").unwrap(), "");
    }

    #[test]
    fn converts_scalars() {
        assert_eq!(convert::<i32>("45").unwrap(), 45);
        assert_eq!(convert::<f64>("2.5").unwrap(), 2.5);
        assert!(convert::<i32>("TRUE").is_err());
        assert!(convert::<f64>("Twentyfive").is_err());
    }

    #[test]
    fn converts_enums_case_insensitively() {
        assert_eq!(convert::<Boolenum>("False").unwrap(), Boolenum::False);
        assert_eq!(convert::<Boolenum>("TRUE").unwrap(), Boolenum::True);
    }

    #[test]
    fn enum_failure_carries_valid_values() {
        let failure = convert::<Boolenum>("Null").unwrap_err();
        assert_eq!(failure.type_name, "Boolenum");
        assert_eq!(failure.valid_values, Some(&["True", "False"][..]));
    }

    #[test]
    fn trims_one_matching_quote_pair() {
        assert_eq!(trim_quotation("\"TheValue\""), "TheValue");
        assert_eq!(trim_quotation("'TheValue'"), "TheValue");
        assert_eq!(trim_quotation("\"\""), "");
        // Mismatched or absent quotes are left alone.
        assert_eq!(trim_quotation("\"TheValue'"), "\"TheValue'");
        assert_eq!(trim_quotation("TheValue"), "TheValue");
        assert_eq!(trim_quotation("\""), "\"");
    }
}
