pub mod renderer;
pub mod scene;
pub mod view;

// Re-export main types
pub use renderer::MapRenderer;
pub use scene::{EmptyState, MapContent, MapScene, SceneOverlays, SceneState};
pub use view::{MapView, ViewState};
