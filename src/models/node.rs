//! Node and node kind types.

use serde::{Deserialize, Serialize};

use crate::distance::Cost;

/// Role of a node in the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Start and end of every route. Exactly one per instance.
    Depot,
    /// A node that must always be visited.
    Customer,
    /// A node that may be skipped at a penalty when discharge mode is enabled.
    DischargeStation,
}

impl NodeKind {
    /// Parses an input `NodeType` value, case-insensitively.
    ///
    /// `"depot"` and `"dischargestation"` are recognized; anything else is a
    /// customer.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_cvrp::models::NodeKind;
    ///
    /// assert_eq!(NodeKind::parse("Depot"), NodeKind::Depot);
    /// assert_eq!(NodeKind::parse("DischargeStation"), NodeKind::DischargeStation);
    /// assert_eq!(NodeKind::parse("shop"), NodeKind::Customer);
    /// ```
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "depot" => Self::Depot,
            "dischargestation" => Self::DischargeStation,
            _ => Self::Customer,
        }
    }
}

/// A location in a routing problem: the depot, a customer, or a discharge
/// station.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Node, NodeKind};
///
/// let depot = Node::depot(0, 35.0, 35.0);
/// assert_eq!(depot.kind(), NodeKind::Depot);
/// assert_eq!(depot.demand(), 0);
///
/// let station = Node::discharge_station(4, 10.0, 12.0, 3).with_penalty(25);
/// assert_eq!(station.penalty(), Some(25));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
    demand: i32,
    kind: NodeKind,
    penalty: Option<Cost>,
}

impl Node {
    /// Creates a node of the given kind with no explicit skip penalty.
    pub fn new(id: usize, x: f64, y: f64, demand: i32, kind: NodeKind) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            kind,
            penalty: None,
        }
    }

    /// Creates a depot (demand 0).
    pub fn depot(id: usize, x: f64, y: f64) -> Self {
        Self::new(id, x, y, 0, NodeKind::Depot)
    }

    pub fn customer(id: usize, x: f64, y: f64, demand: i32) -> Self {
        Self::new(id, x, y, demand, NodeKind::Customer)
    }

    pub fn discharge_station(id: usize, x: f64, y: f64, demand: i32) -> Self {
        Self::new(id, x, y, demand, NodeKind::DischargeStation)
    }

    /// Sets an explicit skip penalty, overriding the discharge mode default.
    ///
    /// Ignored unless the node is a discharge station.
    pub fn with_penalty(mut self, penalty: Cost) -> Self {
        self.penalty = Some(penalty);
        self
    }

    /// Caller-supplied node ID.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn demand(&self) -> i32 {
        self.demand
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Explicit skip penalty, if one was set.
    pub fn penalty(&self) -> Option<Cost> {
        self.penalty
    }

    pub fn is_depot(&self) -> bool {
        self.kind == NodeKind::Depot
    }
}
