//! Validated problem instance.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Fleet, Node, NodeKind, NodeRecord};
use crate::distance::{Cost, DistanceMatrix};
use crate::error::ValidationError;

/// Index of the depot in every validated [`Problem`].
pub const DEPOT: usize = 0;

/// Skip penalty used by [`DischargeMode::enabled`].
pub const DEFAULT_SKIP_PENALTY: Cost = 10;

/// Whether discharge stations may be skipped, and at what default price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DischargeMode {
    /// Every node is mandatory.
    #[default]
    Disabled,
    /// Discharge stations are optional. A station without an explicit
    /// penalty costs `default_penalty` when skipped. A station whose
    /// penalty is zero stays mandatory.
    Enabled { default_penalty: Cost },
}

impl DischargeMode {
    /// Enabled with [`DEFAULT_SKIP_PENALTY`].
    pub fn enabled() -> Self {
        Self::Enabled {
            default_penalty: DEFAULT_SKIP_PENALTY,
        }
    }

    pub fn with_penalty(default_penalty: Cost) -> Self {
        Self::Enabled { default_penalty }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }
}

/// An immutable, validated routing instance.
///
/// Node 0 is always the depot; the remaining nodes keep their input order.
/// The distance matrix is computed once on construction.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{DischargeMode, Fleet, Node, Problem};
///
/// let nodes = vec![
///     Node::customer(1, 1.0, 0.0, 5),
///     Node::depot(0, 0.0, 0.0),
///     Node::discharge_station(2, 9.0, 0.0, 1),
/// ];
/// let problem = Problem::new(nodes, Fleet::new(1, 10), DischargeMode::enabled()).unwrap();
/// assert_eq!(problem.node_count(), 3);
/// assert!(problem.node(0).is_depot());
/// assert!(problem.is_optional(2));
/// assert_eq!(problem.penalty(2), 10);
/// assert_eq!(problem.distance(0, 2), 9);
/// ```
#[derive(Debug, Clone)]
pub struct Problem {
    nodes: Vec<Node>,
    fleet: Fleet,
    discharge_mode: DischargeMode,
    distances: DistanceMatrix,
    penalties: Vec<Option<Cost>>,
}

impl Problem {
    /// Validates the instance and builds the distance matrix.
    pub fn new(
        nodes: Vec<Node>,
        fleet: Fleet,
        discharge_mode: DischargeMode,
    ) -> Result<Self, ValidationError> {
        if nodes.is_empty() {
            return Err(ValidationError::EmptyNodeSet);
        }
        if fleet.vehicle_count() == 0 {
            return Err(ValidationError::NoVehicles);
        }
        if fleet.capacity() <= 0 {
            return Err(ValidationError::NonPositiveCapacity(fleet.capacity()));
        }
        if let DischargeMode::Enabled { default_penalty } = discharge_mode {
            if default_penalty < 0 {
                return Err(ValidationError::NegativePenalty {
                    id: DEPOT,
                    penalty: default_penalty,
                });
            }
        }

        let mut depots = nodes.iter().filter(|n| n.is_depot());
        let depot_id = depots.next().ok_or(ValidationError::MissingDepot)?.id();
        if let Some(second) = depots.next() {
            return Err(ValidationError::MultipleDepots {
                first: depot_id,
                second: second.id(),
            });
        }

        let mut seen = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(node.id()) {
                return Err(ValidationError::DuplicateId(node.id()));
            }
            if node.demand() < 0 {
                return Err(ValidationError::NegativeDemand {
                    id: node.id(),
                    demand: node.demand(),
                });
            }
            if node.is_depot() && node.demand() != 0 {
                return Err(ValidationError::DepotDemand {
                    id: node.id(),
                    demand: node.demand(),
                });
            }
            if let Some(penalty) = node.penalty().filter(|&p| p < 0) {
                return Err(ValidationError::NegativePenalty {
                    id: node.id(),
                    penalty,
                });
            }
        }

        let (depot, others): (Vec<Node>, Vec<Node>) = nodes.into_iter().partition(Node::is_depot);
        let nodes: Vec<Node> = depot.into_iter().chain(others).collect();
        let distances = DistanceMatrix::from_nodes(&nodes)?;

        let penalties: Vec<Option<Cost>> = nodes
            .iter()
            .map(|node| match (node.kind(), discharge_mode) {
                (NodeKind::DischargeStation, DischargeMode::Enabled { default_penalty }) => {
                    Some(node.penalty().unwrap_or(default_penalty)).filter(|&p| p > 0)
                }
                _ => None,
            })
            .collect();

        let limit = DistanceMatrix::cost_limit(nodes.len());
        if let Some(value) = penalties.iter().flatten().copied().find(|&p| p > limit) {
            return Err(ValidationError::CostOverflow { value, limit });
        }

        Ok(Self {
            nodes,
            fleet,
            discharge_mode,
            distances,
            penalties,
        })
    }

    /// Builds a problem from table rows.
    pub fn from_records(
        records: &[NodeRecord],
        fleet: Fleet,
        discharge_mode: DischargeMode,
    ) -> Result<Self, ValidationError> {
        Self::new(records.iter().map(Node::from).collect(), fleet, discharge_mode)
    }

    /// Number of nodes including the depot.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn demand(&self, index: usize) -> i32 {
        self.nodes[index].demand()
    }

    pub fn kind(&self, index: usize) -> NodeKind {
        self.nodes[index].kind()
    }

    /// Cost of skipping `index`; zero for mandatory nodes.
    pub fn penalty(&self, index: usize) -> Cost {
        self.penalties[index].unwrap_or(0)
    }

    /// Returns `true` if `index` may be skipped instead of visited: a
    /// discharge station with a positive penalty, in discharge mode.
    pub fn is_optional(&self, index: usize) -> bool {
        self.penalties[index].is_some()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn vehicle_count(&self) -> usize {
        self.fleet.vehicle_count()
    }

    pub fn capacity(&self) -> i32 {
        self.fleet.capacity()
    }

    pub fn discharge_mode(&self) -> DischargeMode {
        self.discharge_mode
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> Cost {
        self.distances.get(from, to)
    }

    /// Indices of all non-depot nodes that must be visited.
    pub fn mandatory_nodes(&self) -> Vec<usize> {
        (1..self.node_count())
            .filter(|&i| !self.is_optional(i))
            .collect()
    }

    /// Indices of all nodes that may be skipped.
    pub fn optional_nodes(&self) -> Vec<usize> {
        (1..self.node_count())
            .filter(|&i| self.is_optional(i))
            .collect()
    }

    /// Sum of demands over `route`.
    ///
    /// Summed in `i64`, so any set of `i32` demands fits.
    pub fn load(&self, route: &[usize]) -> i64 {
        route.iter().map(|&i| i64::from(self.demand(i))).sum()
    }

    /// `true` if a vehicle carrying `load` can also take `index`.
    #[inline]
    pub fn fits(&self, load: i64, index: usize) -> bool {
        load + i64::from(self.demand(index)) <= i64::from(self.capacity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<Node> {
        vec![
            Node::customer(10, 1.0, 0.0, 5),
            Node::discharge_station(11, 0.0, 3.0, 2),
            Node::depot(1, 0.0, 0.0),
            Node::customer(12, 4.0, 0.0, 1),
        ]
    }

    #[test]
    fn test_depot_moved_to_front() {
        let p = Problem::new(nodes(), Fleet::new(1, 10), DischargeMode::Disabled).expect("valid");
        let ids: Vec<usize> = p.nodes().iter().map(Node::id).collect();
        assert_eq!(ids, vec![1, 10, 11, 12]);
        assert_eq!(p.kind(DEPOT), NodeKind::Depot);
        assert_eq!(p.distance(0, 3), 4);
    }

    #[test]
    fn test_discharge_disabled_all_mandatory() {
        let p = Problem::new(nodes(), Fleet::new(1, 10), DischargeMode::Disabled).expect("valid");
        assert!(p.optional_nodes().is_empty());
        assert_eq!(p.mandatory_nodes(), vec![1, 2, 3]);
        assert_eq!(p.penalty(2), 0);
    }

    #[test]
    fn test_discharge_enabled_penalties() {
        let mut ns = nodes();
        ns.push(Node::discharge_station(13, 2.0, 2.0, 0).with_penalty(3));
        ns.push(Node::customer(14, 2.0, 2.0, 0).with_penalty(99));
        let p = Problem::new(ns, Fleet::new(1, 10), DischargeMode::with_penalty(7)).expect("valid");
        assert_eq!(p.optional_nodes(), vec![2, 4]);
        assert_eq!(p.penalty(2), 7);
        assert_eq!(p.penalty(4), 3);
        // Penalties on customers are ignored
        assert!(!p.is_optional(5));
        assert_eq!(p.penalty(5), 0);
    }

    #[test]
    fn test_default_penalty() {
        let p = Problem::new(nodes(), Fleet::new(1, 10), DischargeMode::enabled()).expect("valid");
        assert_eq!(p.penalty(2), DEFAULT_SKIP_PENALTY);
    }

    #[test]
    fn test_zero_penalty_is_mandatory() {
        let mut ns = nodes();
        ns.push(Node::discharge_station(13, 100.0, 0.0, 1).with_penalty(0));
        let p = Problem::new(ns, Fleet::new(1, 10), DischargeMode::enabled()).expect("valid");
        assert!(p.is_optional(2));
        assert!(!p.is_optional(4));
        assert_eq!(p.optional_nodes(), vec![2]);

        let p = Problem::new(nodes(), Fleet::new(1, 10), DischargeMode::with_penalty(0))
            .expect("valid");
        assert!(p.optional_nodes().is_empty());
    }

    #[test]
    fn test_penalty_above_cost_limit() {
        let mut ns = nodes();
        ns.push(Node::discharge_station(13, 2.0, 2.0, 1).with_penalty(Cost::MAX));
        let limit = DistanceMatrix::cost_limit(5);
        assert_eq!(
            Problem::new(ns, Fleet::new(1, 10), DischargeMode::enabled()).err(),
            Some(ValidationError::CostOverflow {
                value: Cost::MAX,
                limit
            })
        );
    }

    #[test]
    fn test_load_with_extreme_demands() {
        let ns = vec![
            Node::depot(0, 0.0, 0.0),
            Node::customer(1, 1.0, 0.0, i32::MAX),
            Node::customer(2, 2.0, 0.0, i32::MAX),
        ];
        let p = Problem::new(ns, Fleet::new(2, i32::MAX), DischargeMode::Disabled)
            .expect("valid");
        assert_eq!(p.load(&[1, 2]), 2 * i64::from(i32::MAX));
        assert!(p.fits(0, 1));
        assert!(!p.fits(p.load(&[1]), 2));
    }

    #[test]
    fn test_missing_depot() {
        let ns = vec![Node::customer(1, 0.0, 0.0, 1), Node::customer(2, 1.0, 0.0, 1)];
        assert_eq!(
            Problem::new(ns, Fleet::new(1, 10), DischargeMode::Disabled).err(),
            Some(ValidationError::MissingDepot)
        );
    }

    #[test]
    fn test_multiple_depots() {
        let mut ns = nodes();
        ns.push(Node::depot(20, 5.0, 5.0));
        assert_eq!(
            Problem::new(ns, Fleet::new(1, 10), DischargeMode::Disabled).err(),
            Some(ValidationError::MultipleDepots {
                first: 1,
                second: 20
            })
        );
    }

    #[test]
    fn test_negative_demand() {
        let mut ns = nodes();
        ns.push(Node::customer(20, 5.0, 5.0, -1));
        assert_eq!(
            Problem::new(ns, Fleet::new(1, 10), DischargeMode::Disabled).err(),
            Some(ValidationError::NegativeDemand { id: 20, demand: -1 })
        );
    }

    #[test]
    fn test_depot_demand() {
        let ns = vec![
            Node::new(0, 0.0, 0.0, 3, NodeKind::Depot),
            Node::customer(1, 1.0, 0.0, 1),
        ];
        assert_eq!(
            Problem::new(ns, Fleet::new(1, 10), DischargeMode::Disabled).err(),
            Some(ValidationError::DepotDemand { id: 0, demand: 3 })
        );
    }

    #[test]
    fn test_empty_and_depot_only() {
        assert_eq!(
            Problem::new(vec![], Fleet::new(1, 10), DischargeMode::Disabled).err(),
            Some(ValidationError::EmptyNodeSet)
        );
        assert_eq!(
            Problem::new(
                vec![Node::depot(0, 0.0, 0.0)],
                Fleet::new(1, 10),
                DischargeMode::Disabled
            )
            .err(),
            Some(ValidationError::TooFewPoints(1))
        );
    }

    #[test]
    fn test_duplicate_id() {
        let mut ns = nodes();
        ns.push(Node::customer(12, 5.0, 5.0, 1));
        assert_eq!(
            Problem::new(ns, Fleet::new(1, 10), DischargeMode::Disabled).err(),
            Some(ValidationError::DuplicateId(12))
        );
    }

    #[test]
    fn test_bad_fleet() {
        assert_eq!(
            Problem::new(nodes(), Fleet::new(0, 10), DischargeMode::Disabled).err(),
            Some(ValidationError::NoVehicles)
        );
        assert_eq!(
            Problem::new(nodes(), Fleet::new(1, 0), DischargeMode::Disabled).err(),
            Some(ValidationError::NonPositiveCapacity(0))
        );
    }

    #[test]
    fn test_negative_penalty() {
        let mut ns = nodes();
        ns.push(Node::discharge_station(30, 1.0, 1.0, 0).with_penalty(-5));
        assert_eq!(
            Problem::new(ns, Fleet::new(1, 10), DischargeMode::enabled()).err(),
            Some(ValidationError::NegativePenalty {
                id: 30,
                penalty: -5
            })
        );
    }

    #[test]
    fn test_from_records() {
        let rows = vec![
            NodeRecord::new(0, 0.0, 0.0, 0, "Depot"),
            NodeRecord::new(1, 3.0, 4.0, 2, "Customer"),
            NodeRecord::new(2, 6.0, 8.0, 1, "dischargestation"),
        ];
        let p = Problem::from_records(&rows, Fleet::new(2, 5), DischargeMode::enabled())
            .expect("valid");
        assert_eq!(p.node_count(), 3);
        assert_eq!(p.distance(0, 1), 5);
        assert!(p.is_optional(2));
        assert_eq!(p.load(&[1, 2]), 3);
        assert_eq!(p.vehicle_count(), 2);
        assert_eq!(p.capacity(), 5);
    }
}
