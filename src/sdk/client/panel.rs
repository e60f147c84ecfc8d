use crate::sdk::map::style::RouteColor;
use crate::sdk::routing::route::{Route, RouteId};
use std::fmt;

/// Statistics shown for one drawn route.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBlock {
    pub route_id: RouteId,
    pub color: RouteColor,
    pub distance_km: f64,
    pub duration_min: f64,
    pub safety_score: f64,
}

impl SummaryBlock {
    pub fn from_route(route: &Route, color: RouteColor) -> Self {
        Self {
            route_id: route.route_id.clone(),
            color,
            distance_km: route.distance_km,
            duration_min: route.duration_min,
            safety_score: route.safety_score,
        }
    }

    /// Single-line form, e.g. `Route 1 / 5.2 km / 14 min / 0.81`.
    pub fn headline(&self) -> String {
        format!(
            "Route {} / {} km / {} min / {}",
            self.route_id, self.distance_km, self.duration_min, self.safety_score
        )
    }
}

impl fmt::Display for SummaryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Route {} ({})", self.route_id, self.color.css_name())?;
        writeln!(f, "  Distance: {} km", self.distance_km)?;
        writeln!(f, "  Duration: {} min", self.duration_min)?;
        write!(f, "  Safety Score (0 to 1): {}", self.safety_score)
    }
}

/// The list of route summaries next to the map.
#[derive(Debug, Clone, Default)]
pub struct ResultsPanel {
    blocks: Vec<SummaryBlock>,
}

impl ResultsPanel {
    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    pub fn append(&mut self, block: SummaryBlock) {
        self.blocks.push(block);
    }

    pub fn blocks(&self) -> &[SummaryBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl fmt::Display for ResultsPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", block)?;
        }
        Ok(())
    }
}
