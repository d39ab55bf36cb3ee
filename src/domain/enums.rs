use serde::Serialize;
use thiserror::Error;

/// Raised whenever a raw value falls outside one of the closed domain sets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid {kind}: {value}")]
pub struct InvalidEnumValue {
    pub kind: &'static str,
    pub value: String,
}

impl InvalidEnumValue {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Symbolic badge color understood by the admin UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    Primary,
    Success,
    Warning,
    Danger,
    Info,
    Gray,
}

impl ColorTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Primary => "primary",
            ColorTag::Success => "success",
            ColorTag::Warning => "warning",
            ColorTag::Danger => "danger",
            ColorTag::Info => "info",
            ColorTag::Gray => "gray",
        }
    }
}

/// A fixed set of values with a storage string and a display label.
pub trait ClosedEnum: Sized + Copy + 'static {
    /// Human name of the set, used in error messages.
    const KIND: &'static str;

    fn all() -> &'static [Self];
    fn as_str(&self) -> &'static str;
    fn label(&self) -> &'static str;
}

pub trait Colored: ClosedEnum {
    fn color(&self) -> ColorTag;

    fn badge(&self) -> Badge {
        Badge {
            value: self.as_str(),
            label: self.label(),
            color: self.color(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub value: &'static str,
    pub label: &'static str,
    pub color: ColorTag,
}

/// One selectable value as shown in admin forms and filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumOption {
    pub value: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorTag>,
}

pub fn options<E: ClosedEnum>() -> Vec<EnumOption> {
    E::all()
        .iter()
        .map(|v| EnumOption {
            value: v.as_str(),
            label: v.label(),
            color: None,
        })
        .collect()
}

pub fn colored_options<E: Colored>() -> Vec<EnumOption> {
    E::all()
        .iter()
        .map(|v| EnumOption {
            value: v.as_str(),
            label: v.label(),
            color: Some(v.color()),
        })
        .collect()
}

pub fn parse_enum<E: ClosedEnum>(raw: &str) -> Result<E, InvalidEnumValue> {
    E::all()
        .iter()
        .copied()
        .find(|v| v.as_str() == raw)
        .ok_or_else(|| InvalidEnumValue::new(E::KIND, raw))
}

/// Label lookup straight from a stored or submitted string.
pub fn label_of<E: ClosedEnum>(raw: &str) -> Result<&'static str, InvalidEnumValue> {
    parse_enum::<E>(raw).map(|v| v.label())
}

pub fn color_of<E: Colored>(raw: &str) -> Result<ColorTag, InvalidEnumValue> {
    parse_enum::<E>(raw).map(|v| v.color())
}

/// Declares a closed enum with its wire strings and labels.
///
/// Each arm maps a variant to `(storage string, display label)`; the generated
/// `as_str`/`label` are exhaustive matches, and parsing (including serde
/// deserialization) rejects anything else with [`InvalidEnumValue`].
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident as $kind:literal {
            $($variant:ident => ($wire:literal, $label:literal)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl $crate::domain::ClosedEnum for $name {
            const KIND: &'static str = $kind;

            fn all() -> &'static [Self] {
                $name::ALL
            }

            fn as_str(&self) -> &'static str {
                $name::as_str(self)
            }

            fn label(&self) -> &'static str {
                $name::label(self)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($wire => Ok($name::$variant),)+
                    other => Err($crate::domain::InvalidEnumValue::new($kind, other)),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::InvalidEnumValue;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}
