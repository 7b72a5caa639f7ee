pub mod colormap;
pub mod filter_panel;
pub mod heatmap_view;
pub mod scatter_view;
pub mod table_view;
pub mod theme;
pub mod toolbar;
