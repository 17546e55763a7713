mod color;
mod distance;
mod edge;
mod node;

pub use self::color::StepColor;
pub use self::distance::Distance;
pub use self::edge::{Edge, EdgeId};
pub use self::node::{Node, NodeId};
