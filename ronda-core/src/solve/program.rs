//! Arc-multiplicity integer program for one inspection run.

use good_lp::{
    Constraint, Expression, IntoAffineExpression, ProblemVariables, Variable, variable,
};
use log::debug;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::model::StreetNetwork;
use crate::{Arc, Error, FuelCostModel};

/// Decision variables, constraints and objective for a minimum-cost walk
/// covering every street at least once.
///
/// Building the program never touches a solver and never mutates the
/// network. Arcs are indexed in street order, forward orientation first;
/// that order is relied upon downstream as the deterministic tie-break.
pub struct RouteProgram {
    pub(crate) vars: ProblemVariables,
    pub(crate) objective: Expression,
    pub(crate) constraints: Vec<Constraint>,
    pub(crate) arcs: Vec<Arc>,
    pub(crate) arc_vars: Vec<Variable>,
}

impl RouteProgram {
    /// Formulates the program for a walk from `start` to `end`.
    ///
    /// Per street `{u, v}` two non-negative integer variables count the
    /// traversals of `(u, v)` and `(v, u)`; their sum must be at least 1.
    /// Per node, in- and out-flow must balance, except for one surplus
    /// departure at `start` and one surplus arrival at `end`. When
    /// `start == end` the program is the closed-circuit variant instead:
    /// flow balances exactly at every node.
    ///
    /// # Errors
    ///
    /// Fails when either endpoint index is not part of the network.
    pub fn build(
        network: &StreetNetwork,
        costs: &FuelCostModel,
        start: NodeIndex,
        end: NodeIndex,
    ) -> Result<Self, Error> {
        for endpoint in [start, end] {
            if network.graph.node_weight(endpoint).is_none() {
                return Err(Error::InvalidConfig(format!(
                    "endpoint index {} is not part of the network",
                    endpoint.index()
                )));
            }
        }

        let street_count = network.street_count();
        let node_count = network.node_count();

        let mut vars = ProblemVariables::new();
        let mut objective: Expression = 0.into();
        let mut constraints = Vec::with_capacity(street_count + node_count);
        let mut arcs = Vec::with_capacity(street_count * 2);
        let mut arc_vars = Vec::with_capacity(street_count * 2);

        // One integer variable per traversal direction; each street must
        // be walked at least once in some direction.
        for street in network.graph.edge_references() {
            let (u, v) = (street.source(), street.target());
            let cost = costs.street_cost(street.weight().length_m);

            let forward = vars.add(variable().integer().min(0));
            let reverse = vars.add(variable().integer().min(0));
            arcs.push((u, v));
            arc_vars.push(forward);
            arcs.push((v, u));
            arc_vars.push(reverse);

            objective += forward * cost;
            objective += reverse * cost;
            constraints.push((forward.into_expression() + reverse).geq(1));
        }

        // Flow conservation from the incidence accumulated above.
        let mut outflow: Vec<Expression> = (0..node_count).map(|_| 0.into()).collect();
        let mut inflow: Vec<Expression> = (0..node_count).map(|_| 0.into()).collect();
        for (&(from, to), &var) in arcs.iter().zip(&arc_vars) {
            outflow[from.index()] += var;
            inflow[to.index()] += var;
        }
        for node in network.graph.node_indices() {
            let net = if start == end {
                0.0
            } else if node == start {
                1.0
            } else if node == end {
                -1.0
            } else {
                0.0
            };
            let balance = std::mem::replace(&mut outflow[node.index()], 0.into())
                - std::mem::replace(&mut inflow[node.index()], 0.into());
            constraints.push(balance.eq(net));
        }

        debug!(
            "formulated program: {} variables, {} constraints",
            arc_vars.len(),
            constraints.len()
        );

        Ok(Self {
            vars,
            objective,
            constraints,
            arcs,
            arc_vars,
        })
    }

    /// Arcs in variable order, forward orientation of each street first.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub fn variable_count(&self) -> usize {
        self.arc_vars.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}
