//! Bitmask options for parsing and saving.
//!
//! Both sets start empty; callers combine the associated constants with `|`
//! and pass the result to each parse or save call.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

macro_rules! flag_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $(#[$flag_meta:meta])* const $flag:ident = $bit:expr; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
        pub struct $name(u8);

        impl $name {
            $( $(#[$flag_meta])* pub const $flag: Self = Self($bit); )+

            const ALL_BITS: u8 = 0 $( | $bit )+;

            pub const fn empty() -> Self {
                Self(0)
            }

            pub const fn bits(self) -> u8 {
                self.0
            }

            /// Builds a flag set from raw bits, dropping bits that name no flag.
            pub const fn from_bits_truncate(bits: u8) -> Self {
                Self(bits & Self::ALL_BITS)
            }

            pub const fn is_empty(self) -> bool {
                self.0 == 0
            }

            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn insert(&mut self, other: Self) {
                self.0 |= other.0;
            }

            fn names(self) -> impl Iterator<Item = &'static str> {
                [$( (Self::$flag, stringify!($flag)) ),+]
                    .into_iter()
                    .filter(move |(flag, _)| self.contains(*flag))
                    .map(|(_, name)| name)
            }
        }

        impl BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.insert(rhs);
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_empty() {
                    return write!(f, "{}(empty)", stringify!($name));
                }
                let names: Vec<_> = self.names().collect();
                write!(f, "{}({})", stringify!($name), names.join(" | "))
            }
        }
    };
}

flag_set! {
    /// Comment handling applied to each line before it is interpreted.
    pub struct ParseFlags {
        /// Drop everything from the first `//` onwards.
        const COMMENTS_SLASH = 1 << 0;
        /// Drop everything from the first `#` onwards.
        const COMMENTS_HASH = 1 << 1;
        /// Both of the above.
        const COMMENTS_ALL = 1 << 2;
    }
}

impl ParseFlags {
    pub fn strips_slash_comments(self) -> bool {
        self.contains(Self::COMMENTS_SLASH) || self.contains(Self::COMMENTS_ALL)
    }

    pub fn strips_hash_comments(self) -> bool {
        self.contains(Self::COMMENTS_HASH) || self.contains(Self::COMMENTS_ALL)
    }
}

flag_set! {
    /// Output formatting used when rendering a document.
    pub struct SaveFlags {
        /// Skip sections without keys and keys with empty values.
        const PRUNE = 1 << 0;
        /// Blank line after each section.
        const PADDING_SECTIONS = 1 << 1;
        /// `[ name ]` headers.
        const SPACE_SECTIONS = 1 << 2;
        /// `key = value` pairs.
        const SPACE_KEYS = 1 << 3;
        /// Indent keys of named sections with a tab.
        const TAB_KEYS = 1 << 4;
        /// Terminate key lines with `;`.
        const SEMICOLON_KEYS = 1 << 5;
    }
}
