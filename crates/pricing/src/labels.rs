//! Closed vocabularies with a display label that doubles as the persisted form.

/// Normalise a user-supplied label for lenient matching: lower-case, ASCII
/// alphanumerics only (`"Motion Graphics"`, `"motion-graphics"` and
/// `"motiongraphics"` all compare equal).
pub(crate) fn normalize(s: &str) -> String {
    s.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Declares a unit-only enum whose serialized form is its label, with
/// `ALL`, `label()`, `Display` and a lenient `FromStr`.
macro_rules! labeled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $label)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl core::str::FromStr for $name {
            type Err = lapis_core::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = $crate::labels::normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| $crate::labels::normalize(v.label()) == wanted)
                    .ok_or_else(|| {
                        let options: Vec<&str> = Self::ALL.iter().map(|v| v.label()).collect();
                        lapis_core::DomainError::validation(format!(
                            "unknown {} {:?} (expected one of: {})",
                            stringify!($name),
                            s,
                            options.join(", ")
                        ))
                    })
            }
        }
    };
}

pub(crate) use labeled_enum;
