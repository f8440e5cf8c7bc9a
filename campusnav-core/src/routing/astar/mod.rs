mod search;
mod state;

pub use search::{PathResult, astar, nearest_node, search_between};
