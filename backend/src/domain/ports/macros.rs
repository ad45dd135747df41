//! `define_port_error!` builds a repository error enum.
//!
//! Every variant carries one `String` field, so adapters can keep the
//! driver's diagnostic text. The macro derives `thiserror::Error` with the
//! given message and adds a snake_case constructor per variant taking
//! `impl Into<String>`:
//!
//! ```ignore
//! define_port_error! {
//!     /// Errors from the store.
//!     pub enum StoreError {
//!         /// Unreachable.
//!         Offline { message } => "store offline: {message}",
//!     }
//! }
//! let err = StoreError::offline("refused");
//! ```

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $field:ident } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $field: String },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    /// Build this variant from any string-like value.
                    pub fn [<$variant:snake>]($field: impl Into<String>) -> Self {
                        Self::$variant { $field: $field.into() }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;
