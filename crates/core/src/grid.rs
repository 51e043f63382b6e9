//! Temperature field state and boundary invariants
//!
//! The field is a flat `Vec<f64>` in i-major order (`idx = i * ny + j`),
//! with `i` running along the plate length and `j` along the height. Each
//! i-line is therefore contiguous, which the steppers exploit for
//! row-parallel updates.
//!
//! Boundary contract, held after initialization and after every step:
//! - `T[i][0] = T_in` and `T[0][j] = T_in` (heated Dirichlet boundaries)
//! - the far row/column (`j = ny-1`, `i = nx-1`) carries a zero-flux
//!   condition, each cell equal to its interior neighbor

/// 2D temperature field with owned storage
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureField {
    nx: usize,
    ny: usize,
    values: Vec<f64>,
}

impl TemperatureField {
    /// Create a field of `nx * ny` cells, every cell set to `fill`
    pub fn new(nx: usize, ny: usize, fill: f64) -> Self {
        assert!(nx >= 2 && ny >= 2, "field must be at least 2x2");
        Self {
            nx,
            ny,
            values: vec![fill; nx * ny],
        }
    }

    /// Set every cell to `t_init`, then pin the heated boundaries
    /// (`j = 0` row and `i = 0` column) to `t_in`.
    ///
    /// Idempotent for fixed arguments; no partial state is observable
    /// outside this call.
    pub fn initialize(&mut self, t_init: f64, t_in: f64) {
        for v in &mut self.values {
            *v = t_init;
        }
        for i in 0..self.nx {
            self.values[i * self.ny] = t_in;
        }
        for j in 0..self.ny {
            self.values[j] = t_in;
        }
    }

    /// Cells along the first axis
    pub fn nx(&self) -> usize {
        self.nx
    }

    /// Cells along the second axis
    pub fn ny(&self) -> usize {
        self.ny
    }

    /// Value at `(i, j)`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.ny + j]
    }

    /// Overwrite the value at `(i, j)`
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[i * self.ny + j] = value;
    }

    /// Flat i-major view of the field
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The contiguous line `T[i][..]` for a fixed `i`
    pub fn line(&self, i: usize) -> &[f64] {
        &self.values[i * self.ny..(i + 1) * self.ny]
    }

    /// Replace the backing storage with a freshly computed buffer.
    ///
    /// The steppers compute into a distinct buffer and commit it here with a
    /// single pointer swap, so no partially updated field is ever visible.
    pub(crate) fn swap_values(&mut self, next: Vec<f64>) {
        assert_eq!(next.len(), self.values.len(), "buffer shape mismatch");
        self.values = next;
    }

    /// Re-derive the far boundaries by zero-flux copy: the bottom row
    /// (`j = ny-1`) takes its interior neighbor, then the right column
    /// (`i = nx-1`) takes its interior neighbor. The order matters only for
    /// the far corner, which ends up with the right-column value.
    pub fn apply_zero_flux(&mut self) {
        let ny = self.ny;
        for i in 0..self.nx {
            self.values[i * ny + (ny - 1)] = self.values[i * ny + (ny - 2)];
        }
        let last = (self.nx - 1) * ny;
        let prev = (self.nx - 2) * ny;
        for j in 0..ny {
            self.values[last + j] = self.values[prev + j];
        }
    }

    /// Diagonal entries `T[i][i]` for `i < min(nx, ny)`
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.nx.min(self.ny)).map(|i| self.get(i, i)).collect()
    }
}
