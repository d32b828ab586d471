pub mod background;
pub mod error_panel;
pub mod force_graph;
pub mod knowledge_graph;
pub mod search_box;
pub mod side_nav;
pub mod side_panel;
pub mod teardown;
