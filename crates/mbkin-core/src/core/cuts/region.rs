/// A named closed polygon in a two-dimensional observable space (e.g. ΔE vs E).
///
/// The last vertex connects back to the first. Points exactly on an edge may fall either way.
#[derive(Debug, Clone, PartialEq)]
pub struct CutRegion {
    name: String,
    vertices: Vec<(f64, f64)>,
}

impl CutRegion {
    /// Builds a polygon; callers are expected to pass at least three vertices.
    pub fn new(name: impl Into<String>, vertices: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            vertices,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[(f64, f64)] {
        &self.vertices
    }

    /// Even-odd (ray casting) inside test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.vertices[i];
            let (xj, yj) = self.vertices[j];
            if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}
