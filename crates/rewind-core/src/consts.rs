/// Minimum pixel count (w*h) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Scale multiplier applied by a single zoom-in step. Zoom-out uses its reciprocal.
pub const DEFAULT_ZOOM_STEP: f64 = 1.25;

/// Largest displayed area (scaled width * scaled height) zooming may reach.
/// 36x a 1-megapixel image, matching a 6x linear zoom ceiling.
pub const DEFAULT_MAX_DISPLAY_AREA: f64 = 36.0e6;

/// Zoom-out stops once the displayed area is at or below this (a 50x50 view).
pub const DEFAULT_MIN_DISPLAY_AREA: f64 = 2_500.0;

/// Largest edge (in pixels) a resize may produce.
pub const DEFAULT_RESIZE_PIXEL_CEILING: u32 = 10_000;

/// Rotation angles accepted from the parameter prompt, in degrees.
pub const MAX_ROTATION_DEGREES: f64 = 360.0;

/// Default viewport size when no display is attached.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1152;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 648;

/// Fill for pixels uncovered by a non-right-angle rotation (transparent black).
pub const DEFAULT_ROTATION_FILL: [u8; 4] = [0, 0, 0, 0];

/// Small epsilon for floating-point comparisons of angles and scales.
pub const EPSILON: f64 = 1e-9;
