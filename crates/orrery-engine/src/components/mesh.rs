use serde::Deserialize;

/// Linear RGB color, each channel in [0, 1].
///
/// Deserializes from a packed `0xRRGGBB` integer so configuration files can
/// use the familiar hex notation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "u32")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Unpack a `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    /// Scale every channel, e.g. color × light intensity.
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<u32> for Rgb {
    fn from(hex: u32) -> Self {
        Self::from_hex(hex)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Mesh shape primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// UV sphere. Segment counts are tessellation hints for the drawing side.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

/// Shading model applied by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Material {
    /// Unlit: flat color, ignores lights.
    Basic,
    /// Diffuse-only lighting from ambient and point lights.
    #[default]
    Lambert,
}

impl Material {
    /// Wire code for the mesh instance buffer.
    pub fn code(self) -> f32 {
        match self {
            Material::Basic => 0.0,
            Material::Lambert => 1.0,
        }
    }
}

/// Component for renderable meshes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub color: Rgb,
    pub material: Material,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: MeshShape::Sphere { radius: 1.0, width_segments: 32, height_segments: 32 },
            color: Rgb::default(),
            material: Material::default(),
        }
    }
}

impl MeshComponent {
    pub fn new(shape: MeshShape, color: Rgb) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    /// Sphere with the default 32×32 tessellation.
    pub fn sphere(radius: f32, color: Rgb) -> Self {
        Self::new(
            MeshShape::Sphere { radius, width_segments: 32, height_segments: 32 },
            color,
        )
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Bounding radius in local units.
    pub fn radius(&self) -> f32 {
        match self.shape {
            MeshShape::Sphere { radius, .. } => radius,
        }
    }

    /// Tessellation hints as (width, height) segment counts.
    pub fn segments(&self) -> (u32, u32) {
        match self.shape {
            MeshShape::Sphere { width_segments, height_segments, .. } => (width_segments, height_segments),
        }
    }
}
