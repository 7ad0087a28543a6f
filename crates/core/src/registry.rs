use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Identifier of one demo panel. The set is closed; the landing view uses
/// [`crate::shell::ActivePanel::Home`] rather than a sentinel id.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum DemoId {
    BackgroundTasks,
    Sketch,
    Location,
    Viewport,
    Network,
}

impl DemoId {
    pub fn as_str(&self) -> &'static str {
        match self {
            DemoId::BackgroundTasks => "background-tasks",
            DemoId::Sketch => "sketch",
            DemoId::Location => "location",
            DemoId::Viewport => "viewport",
            DemoId::Network => "network",
        }
    }
}

impl fmt::Display for DemoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DemoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "background-tasks" | "tasks" => Ok(DemoId::BackgroundTasks),
            "sketch" | "canvas" => Ok(DemoId::Sketch),
            "location" | "geolocation" => Ok(DemoId::Location),
            "viewport" | "intersection" => Ok(DemoId::Viewport),
            "network" => Ok(DemoId::Network),
            other => Err(anyhow!(
                "Unknown demo '{}': expected background-tasks|sketch|location|viewport|network",
                other
            )),
        }
    }
}

impl ValueEnum for DemoId {
    fn value_variants<'a>() -> &'a [Self] {
        const VARIANTS: [DemoId; 5] = [
            DemoId::BackgroundTasks,
            DemoId::Sketch,
            DemoId::Location,
            DemoId::Viewport,
            DemoId::Network,
        ];
        &VARIANTS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// One entry of the demo registry, defined once at process start.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DemoDescriptor {
    pub id: DemoId,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

pub const DEMOS: [DemoDescriptor; 5] = [
    DemoDescriptor {
        id: DemoId::BackgroundTasks,
        name: "Background Tasks",
        icon: "⏱️",
        description: "Execute simulated work during idle time slices",
    },
    DemoDescriptor {
        id: DemoId::Sketch,
        name: "Sketch Pad",
        icon: "🎨",
        description: "Interactive 2D plotting and drawing",
    },
    DemoDescriptor {
        id: DemoId::Location,
        name: "Location",
        icon: "📍",
        description: "Position fixes from a simulated receiver",
    },
    DemoDescriptor {
        id: DemoId::Viewport,
        name: "Viewport Tracker",
        icon: "👁️",
        description: "Monitor element visibility while scrolling",
    },
    DemoDescriptor {
        id: DemoId::Network,
        name: "Network Quality",
        icon: "📶",
        description: "Detect connection quality and type",
    },
];

pub fn descriptor(id: DemoId) -> &'static DemoDescriptor {
    DEMOS
        .iter()
        .find(|demo| demo.id == id)
        .expect("registry covers every DemoId")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DemoId::BackgroundTasks, "background-tasks")]
    #[case(DemoId::Sketch, "sketch")]
    #[case(DemoId::Location, "location")]
    #[case(DemoId::Viewport, "viewport")]
    #[case(DemoId::Network, "network")]
    fn id_round_trips_through_strings(#[case] id: DemoId, #[case] text: &str) {
        assert_eq!(id.as_str(), text);
        assert_eq!(text.parse::<DemoId>().unwrap(), id);
    }

    #[test]
    fn unknown_id_fails_parsing() {
        assert!("bluetooth".parse::<DemoId>().is_err());
    }

    #[test]
    fn every_id_has_a_descriptor() {
        for id in DemoId::value_variants() {
            let demo = descriptor(*id);
            assert_eq!(demo.id, *id);
            assert!(!demo.name.is_empty());
            assert!(!demo.description.is_empty());
        }
    }
}
