//! Convenient re-exports for common usage.
//!
//! ```
//! use crdt_gset::prelude::*;
//! ```

pub use crate::AnySupport;
pub use crate::Codec;
pub use crate::Crdt;
pub use crate::Delta;
pub use crate::Element;
pub use crate::FromAny;
pub use crate::GSet;
pub use crate::GSetError;
pub use crate::Record;
pub use crate::ReplicatedCrdt;
#[cfg(feature = "sync")]
pub use crate::SharedGSet;
pub use crate::TypeUrl;
pub use crate::Value;
