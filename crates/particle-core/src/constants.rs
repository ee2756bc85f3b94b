// Shared scene tuning constants used by both web and native frontends.

// Particle groups
pub const ACCENT_COUNT: usize = 2000; // gold star particles
pub const BACKGROUND_COUNT: usize = 4000; // red field particles
pub const ACCENT_POINT_SIZE: f32 = 2.5;
pub const BACKGROUND_POINT_SIZE: f32 = 4.0;
pub const SCATTER_EXTENT: f32 = 120.0; // edge of the cube particles start in

// Morphing
pub const BLEND_RATE: f32 = 0.08; // per-frame convex blend toward targets

// Flag geometry
pub const STAR_OUTER_RADIUS: f32 = 20.0;
pub const STAR_INNER_RATIO: f32 = 0.382; // inner/outer radius of a regular five-pointed star
pub const FLAG_WIDTH: f32 = 80.0;
pub const FLAG_HEIGHT: f32 = 50.0;
pub const FLAG_DEPTH: f32 = 1.0;

// Heart and explosion
pub const HEART_SCALE: f32 = 2.2;
pub const HEART_OFFSET_Y: f32 = 5.0;
pub const HEART_FILL_EXPONENT: f32 = 0.3; // < 1 pushes samples toward the curve
pub const EXPLODE_MAX_RADIUS: f32 = 100.0;

// Rejection sampling
pub const REJECTION_RETRY_CAP: u32 = 1000;

// Gesture thresholds (normalized landmark space)
pub const HEART_INDEX_THRESHOLD: f32 = 0.2;
pub const HEART_THUMB_THRESHOLD: f32 = 0.2;
pub const FIST_OPENNESS_THRESHOLD: f32 = 0.25;
pub const PINCH_THRESHOLD: f32 = 0.05;

// Group motion
pub const SHIMMER_SPEED: f32 = 5.0;
pub const FLAG_SWAY_AMPLITUDE: f32 = 0.05;
pub const HEART_BEAT_SPEED: f32 = 3.0;
pub const HEART_BEAT_AMPLITUDE: f32 = 0.15;
pub const HAND_ROTATION_GAIN: f32 = 4.0; // radians per unit of hand_x offset
pub const ROTATION_FOLLOW_RATE: f32 = 0.1;
pub const DEFAULT_HAND_X: f32 = 0.5;

// Photo ring
pub const PHOTO_COUNT: usize = 5;
pub const PHOTO_ORBIT_RADIUS: f32 = 35.0;
pub const PHOTO_LERP_RATE: f32 = 0.1;
pub const PHOTO_BOB_AMPLITUDE: f32 = 3.0;
pub const PHOTO_FRONT_Z: f32 = 5.0; // planes past this z grow
pub const PHOTO_FRONT_GROWTH: f32 = 0.8;
pub const PHOTO_BACK_SCALE: f32 = 0.6;
pub const PHOTO_FOCUS_Z: f32 = 60.0;
pub const PHOTO_FOCUS_SCALE: f32 = 5.0;
pub const PHOTO_PLANE_SIZE: f32 = 8.0;
pub const PHOTO_SOURCES: [&str; PHOTO_COUNT] = [
    "/image1.jpeg",
    "/image2.jpeg",
    "/image3.jpeg",
    "/image4.jpeg",
    "/image5.jpeg",
];
pub const PHOTO_TEXTURE_SIZE: u32 = 512; // square texture array layer edge, in texels

// Banners
pub const TITLE_Y: f32 = 40.0;
pub const LOVE_BANNER_Z: f32 = 20.0;
pub const BANNER_LERP_RATE: f32 = 0.1;
pub const LOVE_BEAT_AMPLITUDE: f32 = 0.1;

// Camera
pub const CAMERA_Z: f32 = 100.0;
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const POINT_WORLD_SCALE: f32 = 0.58; // point size units -> world-space quad edge

// Palette
pub const ACCENT_COLOR: [f32; 3] = [1.0, 0.843, 0.0]; // #FFD700
pub const BACKGROUND_COLOR: [f32; 3] = [0.855, 0.145, 0.114]; // #DA251D
// panel tint until (or unless) the photo for that plane has loaded
pub const PHOTO_PANEL_COLORS: [[f32; 3]; PHOTO_COUNT] = [
    [0.85, 0.75, 0.60],
    [0.60, 0.70, 0.85],
    [0.75, 0.85, 0.65],
    [0.85, 0.65, 0.70],
    [0.70, 0.65, 0.85],
];
