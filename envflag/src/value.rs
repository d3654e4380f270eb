/*!
The closed set of value types a flag can hold, and the text coercion for each
of them.

Every flag holds a [`Value`], which is one of a fixed set of variants. The
[`FlagType`] trait connects each variant to the Rust type callers register
with and read back; it is sealed, so a default of any other type fails to
compile rather than failing at run time.
*/

use core::fmt::{self, Display};
use core::num::{ParseFloatError, ParseIntError};

use crate::duration::{Duration, ParseDurationError};
use crate::string_list::StringList;

/// The type of a flag's value, without the value itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    Int,
    Uint,
    Float,
    Duration,
    String,
    StringList,
}

impl Kind {
    /// A short human-readable name for this kind, used as the default
    /// placeholder in usage messages. Bool has none, since boolean flags
    /// don't take an argument.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Bool => "",
            Kind::Int => "int",
            Kind::Uint => "uint",
            Kind::Float => "float",
            Kind::Duration => "duration",
            Kind::String => "string",
            Kind::StringList => "list",
        }
    }

    /// Does a flag of this kind need an argument on the command line?
    #[inline]
    #[must_use]
    pub const fn takes_argument(self) -> bool {
        !matches!(self, Kind::Bool)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Duration(Duration),
    String(String),
    StringList(StringList),
}

/// The text couldn't be coerced into the flag's type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseValueError {
    #[error("expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False")]
    Bool,

    #[error(transparent)]
    Int(ParseIntError),

    #[error(transparent)]
    Uint(ParseIntError),

    #[error(transparent)]
    Float(ParseFloatError),

    #[error(transparent)]
    Duration(#[from] ParseDurationError),
}

pub fn parse_bool(text: &str) -> Result<bool, ParseValueError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseValueError::Bool),
    }
}

pub fn parse_int(text: &str) -> Result<i64, ParseValueError> {
    text.parse().map_err(ParseValueError::Int)
}

pub fn parse_uint(text: &str) -> Result<u64, ParseValueError> {
    text.parse().map_err(ParseValueError::Uint)
}

pub fn parse_float(text: &str) -> Result<f64, ParseValueError> {
    text.parse().map_err(ParseValueError::Float)
}

pub fn parse_duration(text: &str) -> Result<Duration, ParseValueError> {
    text.parse().map_err(ParseValueError::Duration)
}

/// Lists keep their text unsplit; see [`StringList::materialize`]
pub fn parse_string_list(text: &str) -> StringList {
    StringList::new(text)
}

impl Value {
    /// Coerce `text` into a value of the given kind.
    pub fn parse(kind: Kind, text: &str) -> Result<Self, ParseValueError> {
        Ok(match kind {
            Kind::Bool => Value::Bool(parse_bool(text)?),
            Kind::Int => Value::Int(parse_int(text)?),
            Kind::Uint => Value::Uint(parse_uint(text)?),
            Kind::Float => Value::Float(parse_float(text)?),
            Kind::Duration => Value::Duration(parse_duration(text)?),
            Kind::String => Value::String(text.to_owned()),
            Kind::StringList => Value::StringList(parse_string_list(text)),
        })
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::Duration(_) => Kind::Duration,
            Value::String(_) => Kind::String,
            Value::StringList(_) => Kind::StringList,
        }
    }

    /// True if this is the zero value of its kind: `false`, `0`, `0s`, or
    /// empty text.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Bool(value) => !value,
            Value::Int(value) => *value == 0,
            Value::Uint(value) => *value == 0,
            Value::Float(value) => *value == 0.0,
            Value::Duration(value) => *value == Duration::ZERO,
            Value::String(value) => value.is_empty(),
            Value::StringList(value) => value.raw().is_empty(),
        }
    }

    /// Split the text of a list value into its items. Does nothing for
    /// other kinds.
    pub fn materialize(&mut self) {
        if let Value::StringList(list) = self {
            list.materialize();
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => Display::fmt(value, f),
            Value::Int(value) => Display::fmt(value, f),
            Value::Uint(value) => Display::fmt(value, f),
            Value::Float(value) => Display::fmt(value, f),
            Value::Duration(value) => Display::fmt(value, f),
            Value::String(value) => write!(f, "{value:?}"),
            Value::StringList(value) => write!(f, "{:?}", value.raw()),
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/**
A Rust type that can be stored in a flag.

Implemented for exactly `bool`, `i64`, `u64`, `f64`, [`Duration`], [`String`]
and [`StringList`].
*/
pub trait FlagType: sealed::Sealed + Sized {
    const KIND: Kind;

    fn into_value(self) -> Value;

    /// Borrow the typed value back out, if `value` has the right variant
    fn from_value(value: &Value) -> Option<&Self>;
}

macro_rules! flag_types {
    ($($type:ty => $variant:ident,)*) => {
        $(
            impl sealed::Sealed for $type {}

            impl FlagType for $type {
                const KIND: Kind = Kind::$variant;

                #[inline]
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                #[inline]
                fn from_value(value: &Value) -> Option<&Self> {
                    match value {
                        Value::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

flag_types! {
    bool => Bool,
    i64 => Int,
    u64 => Uint,
    f64 => Float,
    Duration => Duration,
    String => String,
    StringList => StringList,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_forms() {
        for text in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(text), Ok(true), "{text:?}");
        }

        for text in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(text), Ok(false), "{text:?}");
        }

        for text in ["", "yes", "tRUE", " true"] {
            assert_eq!(parse_bool(text), Err(ParseValueError::Bool), "{text:?}");
        }
    }

    #[test]
    fn integers() {
        assert_eq!(Value::parse(Kind::Int, "-42"), Ok(Value::Int(-42)));
        assert_eq!(Value::parse(Kind::Int, "+7"), Ok(Value::Int(7)));
        assert_eq!(
            Value::parse(Kind::Uint, "18446744073709551615"),
            Ok(Value::Uint(u64::MAX))
        );

        assert!(matches!(
            Value::parse(Kind::Int, "9223372036854775808"),
            Err(ParseValueError::Int(_))
        ));
        assert!(matches!(
            Value::parse(Kind::Uint, "-1"),
            Err(ParseValueError::Uint(_))
        ));
        assert!(matches!(
            Value::parse(Kind::Int, "12abc"),
            Err(ParseValueError::Int(_))
        ));
        assert!(matches!(
            Value::parse(Kind::Int, "0x10"),
            Err(ParseValueError::Int(_))
        ));
    }

    #[test]
    fn floats() {
        assert_eq!(Value::parse(Kind::Float, "1.5"), Ok(Value::Float(1.5)));
        assert_eq!(Value::parse(Kind::Float, "2e3"), Ok(Value::Float(2000.0)));
        assert!(matches!(
            Value::parse(Kind::Float, "one"),
            Err(ParseValueError::Float(_))
        ));
    }

    #[test]
    fn durations() {
        assert_eq!(
            Value::parse(Kind::Duration, "1m30s"),
            Ok(Value::Duration(Duration::from_secs(90)))
        );
        assert_eq!(
            Value::parse(Kind::Duration, "10"),
            Err(ParseValueError::Duration(ParseDurationError::MissingUnit(
                "10".into()
            )))
        );
    }

    #[test]
    fn strings_are_verbatim() {
        assert_eq!(
            Value::parse(Kind::String, "  spaced, out "),
            Ok(Value::String("  spaced, out ".into()))
        );
    }

    #[test]
    fn lists_defer_splitting() {
        let mut value = Value::parse(Kind::StringList, "a, b ,c").unwrap();

        let Value::StringList(list) = &value else {
            panic!("expected a list, got {value:?}");
        };
        assert!(list.value().is_empty());

        value.materialize();
        let list = StringList::from_value(&value).unwrap();
        assert_eq!(list.value(), ["a", "b", "c"]);
    }

    #[test]
    fn kinds_match_variants() {
        assert_eq!(true.into_value().kind(), bool::KIND);
        assert_eq!(3i64.into_value().kind(), Kind::Int);
        assert_eq!(Duration::ZERO.into_value().kind(), Kind::Duration);
        assert_eq!(String::new().into_value().kind(), String::KIND);
        assert_eq!(i64::from_value(&Value::Uint(3)), None);
        assert_eq!(u64::from_value(&Value::Uint(3)), Some(&3));
    }

    #[test]
    fn zero_values() {
        assert!(Value::Bool(false).is_zero());
        assert!(Value::Float(0.0).is_zero());
        assert!(Value::StringList(StringList::default()).is_zero());
        assert!(!Value::String("x".into()).is_zero());
        assert!(!Value::Duration(Duration::from_secs(1)).is_zero());
    }

    #[test]
    fn display() {
        assert_eq!(Value::String("custom".into()).to_string(), "\"custom\"");
        assert_eq!(Value::Duration(Duration::from_secs(90)).to_string(), "1m30s");
        assert_eq!(Value::Int(-3).to_string(), "-3");
    }
}
