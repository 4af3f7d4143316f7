//! `define_port_error!`: error enums for the gateway's outbound ports.
//!
//! Each variant gets a `#[error]` message, a snake-case constructor whose
//! field arguments take `impl Into<_>`, and a `kind()` label for logs.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (@kind $variant:ident) => {
        ::paste::paste! { stringify!([<$variant:snake>]) }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*

            /// Snake-case variant name, stable across message changes.
            #[must_use]
            pub const fn kind(&self) -> &'static str {
                match self {
                    $(
                        Self::$variant { .. } => define_port_error!(@kind $variant),
                    )*
                }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum UpstreamError {
            Offline => "backend offline",
            Refused { status: u16, body: String } => "refused {status}: {body}",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(UpstreamError::offline().to_string(), "backend offline");
    }

    #[test]
    fn constructors_convert_field_arguments() {
        let err = UpstreamError::refused(502_u16, "bad gateway");
        assert_eq!(err.to_string(), "refused 502: bad gateway");
    }

    #[test]
    fn kinds_are_snake_case_variant_names() {
        assert_eq!(UpstreamError::offline().kind(), "offline");
        assert_eq!(UpstreamError::refused(500_u16, "").kind(), "refused");
    }
}
