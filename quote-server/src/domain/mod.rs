//! Domain types for the quotation engine.
//!
//! Value types shared by the rate tables, the resolvers and the web layer.
//! Parsing enforces validity at construction time, so code that receives
//! these types can trust them.

mod container;
mod error;
mod money;

pub use container::{ContainerType, InvalidContainerType, InvalidOwnership, Ownership, WeightTier};
pub use error::DomainError;
pub use money::{Currency, FeeAmount, Money};
