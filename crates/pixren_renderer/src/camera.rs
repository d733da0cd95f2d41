//! Camera for ray generation.

use pixren_math::random::random_in_unit_disk;
use pixren_math::{Point3, Ray, Vec3, Vec3Ext};
use rand::RngCore;

/// Thin-lens perspective camera.
///
/// Every setter recomputes the cached basis and viewport, so a camera is
/// always ready to generate rays.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    // Camera positioning
    look_from: Point3,
    look_at: Point3,
    vup: Vec3,

    // Lens settings
    vfov: f64,         // Vertical field of view in degrees
    aspect_ratio: f64, // Viewport width over height
    aperture: f64,     // Lens diameter; 0 is a pinhole
    focus_dist: f64,   // Distance from camera to plane of perfect focus

    // Cached computed values
    origin: Point3,
    lower_left_corner: Point3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    lens_radius: f64,
}

impl Camera {
    /// Create a pinhole camera at the origin looking down -Z.
    pub fn new() -> Self {
        let mut camera = Self {
            look_from: Point3::ZERO,
            look_at: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 16.0 / 9.0,
            aperture: 0.0,
            focus_dist: 1.0,
            origin: Point3::ZERO,
            lower_left_corner: Point3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            lens_radius: 0.0,
        };
        camera.initialize();
        camera
    }

    /// Set camera position.
    pub fn with_position(mut self, look_from: Point3, look_at: Point3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.initialize();
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, aperture: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_dist = focus_dist;
        self.initialize();
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.initialize();
        self
    }

    /// Swing `look_from` around `look_at` by `angle` radians about `vup`.
    pub fn orbit(&mut self, angle: f64) {
        let offset = (self.look_from - self.look_at).rotate(angle, self.vup);
        self.look_from = self.look_at + offset;
        self.initialize();
    }

    pub fn look_from(&self) -> Point3 {
        self.look_from
    }

    pub fn look_at(&self) -> Point3 {
        self.look_at
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// The `(u, v, w)` orthonormal basis; `w` points away from the view.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    fn initialize(&mut self) {
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = self.aspect_ratio * viewport_height;

        // Calculate camera basis vectors
        self.w = (self.look_from - self.look_at).normalize();
        self.u = self.vup.cross(self.w).normalize();
        self.v = self.w.cross(self.u);

        self.origin = self.look_from;
        self.horizontal = self.focus_dist * viewport_width * self.u;
        self.vertical = self.focus_dist * viewport_height * self.v;
        self.lower_left_corner = self.origin
            - self.horizontal / 2.0
            - self.vertical / 2.0
            - self.focus_dist * self.w;

        self.lens_radius = self.aperture / 2.0;
    }

    /// Generate a ray through viewport coordinates `(s, t)` in [0, 1].
    ///
    /// `(0, 0)` is the lower-left corner of the image.
    pub fn get_ray(&self, s: f64, t: f64, rng: &mut dyn RngCore) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3::ZERO
        };

        let ray_origin = self.origin + offset;
        Ray::new(
            ray_origin,
            self.lower_left_corner + s * self.horizontal + t * self.vertical - ray_origin,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
