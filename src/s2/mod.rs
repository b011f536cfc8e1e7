pub mod cap;
pub mod latlng;
pub mod point;
pub mod rect;
pub mod rect_bounder;

pub mod region;

pub mod predicates;

pub mod shape;

pub mod r#loop;

pub mod chain_index;
mod edge_crosser;
mod edge_crossings;
pub mod encoding;
pub mod error;
pub mod loop_hierarchy;
pub mod polygon;
#[cfg(any(test, feature = "rand"))]
pub mod random;
#[cfg(test)]
mod test_util;
