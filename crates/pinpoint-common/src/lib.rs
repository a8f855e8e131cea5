pub mod dom;
pub mod protocol;

pub use dom::{Dom, Mutation, NodeId, QueryError};
