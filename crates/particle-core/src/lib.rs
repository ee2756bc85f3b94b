pub mod animator;
pub mod config;
pub mod constants;
pub mod gesture;
pub mod mailbox;
pub mod photos;
pub mod poses;
pub mod scene;
pub mod shapes;
pub mod sprites;
pub mod status;

pub use animator::*;
pub use config::*;
pub use constants::*;
pub use gesture::*;
pub use mailbox::*;
pub use photos::*;
pub use scene::*;
pub use shapes::*;
pub use sprites::*;
pub use status::*;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
