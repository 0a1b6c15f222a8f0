pub mod engine;
pub mod faces;
pub mod meshes;
pub mod overlay;
pub mod plugin;
pub mod scheduler;
pub mod selector;
pub mod stats;
pub mod systems;
pub mod types;
pub mod widget;

pub use engine::*;
pub use faces::*;
pub use meshes::*;
pub use overlay::*;
pub use plugin::*;
pub use scheduler::*;
pub use selector::*;
pub use stats::*;
pub use systems::*;
pub use types::*;
pub use widget::*;
