//! Helper macro for declaring port error enums.
//!
//! Every variant carries named fields and a display message. Each variant
//! gets a `snake_case` constructor whose parameters accept anything
//! convertible into the field type, so adapters can write
//! `UserPersistenceError::query(err.to_string())`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),+ $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $(#[doc = concat!("`", stringify!($field), "` detail.")] $field: $ty),+ },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    #[doc = "Construct [`" $name "::" $variant "`]."]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),+) -> Self {
                        Self::$variant { $($field: $field.into()),+ }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
