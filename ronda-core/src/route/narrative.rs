//! Turn-by-turn narration of a reconstructed trail.

use std::fmt;

use crate::model::StreetNetwork;

use super::trail::Trail;

/// Instruction class of a route step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// First step, leaving the start intersection
    Start { from: String },
    /// Same street as the previous step
    Continue,
    /// The street name changed
    Turn,
}

impl StepAction {
    /// Stable lowercase tag, used in exports.
    pub fn kind(&self) -> &'static str {
        match self {
            StepAction::Start { .. } => "start",
            StepAction::Continue => "continue",
            StepAction::Turn => "turn",
        }
    }
}

/// One narrated instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteStep {
    /// 1-based position in the itinerary
    pub ordinal: usize,
    pub action: StepAction,
    /// Narrated street name; unnamed streets carry the placeholder
    pub street: String,
    /// Descriptive name of the intersection this step arrives at
    pub destination: String,
}

impl fmt::Display for RouteStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}: ", self.ordinal)?;
        match &self.action {
            StepAction::Start { from } => {
                write!(f, "Start at '{from}' and take {}", self.street)?;
            }
            StepAction::Continue => write!(f, "Continue on {}", self.street)?,
            StepAction::Turn => write!(f, "Turn onto {}", self.street)?,
        }
        write!(f, " (toward {})", self.destination)
    }
}

/// Ordered route steps plus the run summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    pub steps: Vec<RouteStep>,
    /// Descriptive name of the final intersection
    pub final_destination: String,
}

impl Itinerary {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Itinerary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        write!(
            f,
            "Total steps: {}. Final destination: {}.",
            self.steps.len(),
            self.final_destination
        )
    }
}

/// Flattens the trail into narrated steps.
///
/// The action class tracks the street name across consecutive arcs: the
/// name changing means a turn, the same name means continuing. Streets
/// with no name narrate as the placeholder rather than failing the run,
/// and two consecutive unnamed arcs read as continuing on the same
/// street, which matches how such blocks are walked in practice.
pub fn narrate(network: &StreetNetwork, trail: &Trail) -> Itinerary {
    let mut steps = Vec::with_capacity(trail.len());
    let mut previous_street: Option<String> = None;

    for (i, &(from, to)) in trail.iter().enumerate() {
        let street = network
            .street_between(from, to)
            .map(|street| street.display_name().to_owned())
            .unwrap_or_else(|| crate::model::UNNAMED_STREET.to_owned());

        let action = if i == 0 {
            StepAction::Start {
                from: network.node(from).description.clone(),
            }
        } else if previous_street.as_deref() == Some(street.as_str()) {
            StepAction::Continue
        } else {
            StepAction::Turn
        };

        steps.push(RouteStep {
            ordinal: i + 1,
            action,
            street: street.clone(),
            destination: network.node(to).description.clone(),
        });
        previous_street = Some(street);
    }

    let final_destination = trail
        .last()
        .map(|&(_, to)| network.node(to).description.clone())
        .unwrap_or_default();

    Itinerary {
        steps,
        final_destination,
    }
}
