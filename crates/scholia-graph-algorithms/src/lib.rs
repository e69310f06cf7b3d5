pub mod common;
pub mod pathfinding;

pub use common::{EdgeRef, GraphView, NodeId};
pub use pathfinding::{bfs, dfs, dijkstra, minimax_path, PathResult};
