//! Macros for declaring state tags and simple events.

/// Generate a unit-variant enum implementing
/// [`StateTag`](crate::table::StateTag).
///
/// # Example
///
/// ```
/// use junction::state_tags;
/// use junction::table::StateTag;
///
/// state_tags! {
///     pub enum Phase {
///         Idle,
///         Running,
///     }
/// }
///
/// assert_eq!(Phase::Running.name(), "Running");
/// ```
#[macro_export]
macro_rules! state_tags {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::table::StateTag for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

/// Generate a unit-variant enum implementing [`Event`](crate::core::Event),
/// named after its variants.
///
/// # Example
///
/// ```
/// use junction::core::Event;
/// use junction::event_enum;
///
/// event_enum! {
///     pub enum Button {
///         Press,
///         Release,
///     }
/// }
///
/// assert_eq!(Button::Release.name(), "Release");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
