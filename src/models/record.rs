//! Tabular input rows.

use serde::{Deserialize, Serialize};

use super::{Node, NodeKind};

/// One row of the node table (`ID, X, Y, Demand, NodeType`).
///
/// Field names match the column headers, so rows can be deserialized
/// directly from CSV or JSON.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, NodeKind, NodeRecord};
///
/// let row = NodeRecord::new(3, 1.0, 2.0, 4, "DischargeStation");
/// let node = Node::from(&row);
/// assert_eq!(node.kind(), NodeKind::DischargeStation);
/// assert_eq!(node.id(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(rename = "ID")]
    pub id: usize,
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "Demand")]
    pub demand: i32,
    #[serde(rename = "NodeType")]
    pub node_type: String,
}

impl NodeRecord {
    pub fn new(id: usize, x: f64, y: f64, demand: i32, node_type: impl Into<String>) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            node_type: node_type.into(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        NodeKind::parse(&self.node_type)
    }
}

impl From<&NodeRecord> for Node {
    fn from(record: &NodeRecord) -> Self {
        Node::new(record.id, record.x, record.y, record.demand, record.kind())
    }
}
