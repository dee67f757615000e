pub mod config;
pub mod node;
pub mod tree;

pub use config::SearchConfig;
pub use node::{Node, NodeId};
pub use tree::SearchTree;
