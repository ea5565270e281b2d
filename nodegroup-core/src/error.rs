//! Error types for the nodegroup core library.
//!
//! Defines the pipeline error enum exposed by the public API, its stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, num::NonZeroUsize};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Every code in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$CodeVariant),+];

            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when constructing or running
/// [`crate::InventoryPipeline`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum PipelineError {
    /// The sanity-check threshold must be greater than zero.
    #[error("min_groups must be at least 1 (got {got})")]
    InvalidMinGroups {
        /// The invalid threshold supplied by the caller.
        got: usize,
    },
    /// Grouping produced fewer groups than the sanity-check threshold, which
    /// usually means the upstream inventory is truncated or corrupt.
    #[error(
        "inventory `{source_name}` produced {groups} groups but at least {min_groups} are required"
    )]
    SanityCheckFailed {
        /// Name reported by the inventory source.
        source_name: String,
        /// Number of groups produced by the run.
        groups: usize,
        /// Configured minimum number of groups.
        min_groups: NonZeroUsize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PipelineError`] variants.
    enum PipelineErrorCode for PipelineError {
        /// The sanity-check threshold must be greater than zero.
        InvalidMinGroups => InvalidMinGroups { .. } => "NODEGROUP_INVALID_MIN_GROUPS",
        /// Grouping produced fewer groups than the sanity-check threshold.
        SanityCheckFailed => SanityCheckFailed { .. } => "NODEGROUP_SANITY_CHECK_FAILED",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PipelineError>;
