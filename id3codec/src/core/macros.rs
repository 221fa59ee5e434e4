/// Takes an enum definition with corresponding integer values and generates a `repr(u8)` enum
/// with a corresponding `parse` function that takes a `u8` and returns its corresponding enum
/// variant. If the byte cannot be matched, `err` is returned.
macro_rules! byte_enum {(
    $(#[$meta:meta])*
    $vis:vis enum $name:ident {
        $($(#[$vmeta:meta])* $variant:ident = $val:expr,)*
    };
    $err:expr
) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])*
            $variant = $val,)*
        }

        impl $name {
            pub(crate) fn parse(byte: u8) -> Self {
                match byte {
                    $($val => Self::$variant,)*
                    _ => $err
                }
            }
        }
    }
}

/// Generates an enum of frame subtypes that are told apart purely by their identifier.
///
/// Every variant is given its ID3v2.3/ID3v2.4 identifier, its ID3v2.2 identifier if one
/// exists, and a readable name.
macro_rules! id_enum {(
    $(#[$meta:meta])*
    $vis:vis enum $name:ident {
        $($variant:ident = ($id:literal, $legacy:expr, $desc:literal),)*
    }
) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
        $vis enum $name {
            $($variant,)*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant,)*];

            /// The ID3v2.3/ID3v2.4 identifier of this subtype.
            pub fn id(&self) -> &'static [u8; 4] {
                match self {
                    $(Self::$variant => $id,)*
                }
            }

            /// The ID3v2.2 identifier of this subtype, if ID3v2.2 has it.
            pub fn legacy_id(&self) -> Option<&'static [u8; 3]> {
                match self {
                    $(Self::$variant => $legacy,)*
                }
            }

            pub fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)*
                }
            }

            pub(crate) fn from_id(id: &[u8]) -> Option<Self> {
                match id {
                    $($id => Some(Self::$variant),)*
                    _ => None,
                }
            }

            pub(crate) fn from_legacy_id(id: &[u8]) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|ty| ty.legacy_id().map_or(false, |legacy| &legacy[..] == id))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                write![f, "{}", self.name()]
            }
        }
    }
}
