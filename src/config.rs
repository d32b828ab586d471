//! Compile-time configuration: data locations, routes and tuning constants.

use force_graph::SimulationParameters;

/// Route of the landing page.
pub const HOME_ROUTE: &str = "/";
/// Route of the knowledge-graph viewer.
pub const GRAPH_ROUTE: &str = "/graph";
/// Route of the search results page, takes `q`.
pub const RESULTS_ROUTE: &str = "/search";
/// Route of the research details page, takes `id`.
pub const DETAILS_ROUTE: &str = "/details";

/// Offset added to a selected paper's `Id` to form its node identifier.
pub const PAPER_ID_OFFSET: i64 = 10_000;

/// Maximum number of inline search suggestions.
pub const MAX_SUGGESTIONS: usize = 5;

/// Delay between successive side panel items entering.
pub const PANEL_STAGGER_MS: u64 = 100;

/// Value some records carry instead of leaving a section empty.
pub const NOT_FOUND_SENTINEL: &str = "Not Found";

/// Relative URLs of the pre-baked JSON files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataSources {
	pub papers: &'static str,
	pub edges: &'static str,
	pub selected_papers: &'static str,
	pub search_records: &'static str,
}

impl Default for DataSources {
	fn default() -> Self {
		Self {
			papers: "public/knowledge_graph_pro/data.json",
			edges: "public/knowledge_graph_pro/edges.json",
			selected_papers: "public/knowledge_graph_pro/selected_papers.json",
			search_records: "public/searchpro/data.json",
		}
	}
}

/// Border/background pair used to paint a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Swatch {
	pub border: &'static str,
	pub background: &'static str,
}

const NODE_BACKGROUND: &str = "#161b22";

/// Topic colors, indexed by `Cluster mod len`.
pub const TOPIC_PALETTE: &[Swatch] = &[
	Swatch { border: "#e83e8c", background: NODE_BACKGROUND },
	Swatch { border: "#fd7e14", background: NODE_BACKGROUND },
	Swatch { border: "#20c997", background: NODE_BACKGROUND },
	Swatch { border: "#6f42c1", background: NODE_BACKGROUND },
	Swatch { border: "#007bff", background: NODE_BACKGROUND },
	Swatch { border: "#ffc107", background: NODE_BACKGROUND },
];

pub const PAPER_SWATCH: Swatch = Swatch {
	border: "#007bff",
	background: NODE_BACKGROUND,
};

pub const TOPIC_NODE_SIZE: f64 = 50.0;
pub const TOPIC_FONT_SIZE: f64 = 16.0;
pub const PAPER_FONT_SIZE: f64 = 14.0;
pub const PAPER_BOX_WIDTH: f64 = 150.0;
pub const PAPER_BOX_HEIGHT: f64 = 50.0;
pub const DEFAULT_EDGE_COLOR: &str = "#30363d";

/// Physics used by the knowledge-graph canvas.
pub fn graph_physics() -> SimulationParameters {
	SimulationParameters {
		force_charge: 4000.0,
		force_spring: 0.04,
		force_max: 280.0,
		node_speed: 7000.0,
		damping_factor: 0.83,
	}
}

/// Square pixels of canvas per star.
pub const STAR_DENSITY: f64 = 8000.0;
/// Square pixels of canvas per plexus particle.
pub const PLEXUS_DENSITY: f64 = 12000.0;
/// Lowest opacity a twinkling star fades to.
pub const STAR_MIN_ALPHA: f64 = 0.1;
/// Radius around the pointer in which plexus lines brighten.
pub const POINTER_RADIUS: f64 = 150.0;
/// Squared distance at which a plexus line fades out completely.
pub const PLEXUS_FADE_DISTANCE_SQ: f64 = 25000.0;
