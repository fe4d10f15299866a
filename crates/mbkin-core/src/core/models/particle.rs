use super::element::{ElementError, isotope_label};
use crate::core::constants::{ATOMIC_MASS_UNIT, NEUTRON_MASS, PROTON_MASS};

/// One participant of a two-body reaction: its nuclide identity plus a kinematic state.
///
/// Only the primary quantities are stored. Mass, momenta and the Lorentz factor are derived on
/// every call from the current state, so a `Particle` can be reused as a scratch calculator by
/// overwriting the per-event fields (`energy_lab`, `theta_lab`, `ex`, ...) through `&mut self`.
///
/// The invariant `0 <= Z <= A` is not enforced here; it is checked when a reaction is configured.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Particle {
    /// Mass number.
    a: u32,
    /// Atomic number.
    z: u32,
    /// Binding energy per nucleon in keV.
    binding_energy: f64,
    /// Kinetic energy in the laboratory frame in keV.
    energy_lab: f64,
    /// Total energy in the centre-of-mass frame in keV.
    energy_tot_cm: f64,
    /// Polar angle in the centre-of-mass frame in radians.
    theta_cm: f64,
    /// Polar angle in the laboratory frame in radians.
    theta_lab: f64,
    /// Excitation energy in keV.
    ex: f64,
}

impl Particle {
    /// Creates a particle at rest with zero binding energy.
    pub fn new(a: u32, z: u32) -> Self {
        Self {
            a,
            z,
            ..Self::default()
        }
    }

    pub fn a(&self) -> u32 {
        self.a
    }

    pub fn z(&self) -> u32 {
        self.z
    }

    /// Neutron number, `A - Z`.
    pub fn n(&self) -> i64 {
        self.a as i64 - self.z as i64
    }

    /// Rest mass in keV/c²: `N·m_n + Z·m_p − A·B/A`.
    pub fn mass(&self) -> f64 {
        let mut mass = self.n() as f64 * NEUTRON_MASS;
        mass += self.z as f64 * PROTON_MASS;
        mass -= self.a as f64 * self.binding_energy;
        mass
    }

    /// Rest mass in atomic mass units.
    pub fn mass_u(&self) -> f64 {
        self.mass() / ATOMIC_MASS_UNIT
    }

    /// Isotope label such as `"4He"` or `"1n"`.
    ///
    /// # Errors
    ///
    /// Fails when `Z` is outside the element table.
    pub fn isotope(&self) -> Result<String, ElementError> {
        isotope_label(self.a, self.z)
    }

    pub fn binding_energy(&self) -> f64 {
        self.binding_energy
    }

    pub fn energy_lab(&self) -> f64 {
        self.energy_lab
    }

    /// Total laboratory energy, rest mass plus kinetic energy.
    pub fn energy_tot_lab(&self) -> f64 {
        self.mass() + self.energy_lab
    }

    pub fn energy_tot_cm(&self) -> f64 {
        self.energy_tot_cm
    }

    /// Laboratory momentum in keV/c.
    pub fn momentum_lab(&self) -> f64 {
        (self.energy_tot_lab().powi(2) - self.mass().powi(2)).sqrt()
    }

    /// Centre-of-mass momentum in keV/c. `NaN` until a CM total energy of at least the
    /// rest mass has been set.
    pub fn momentum_cm(&self) -> f64 {
        (self.energy_tot_cm.powi(2) - self.mass().powi(2)).sqrt()
    }

    /// Lorentz factor in the laboratory frame.
    pub fn gamma(&self) -> f64 {
        self.energy_tot_lab() / self.mass()
    }

    /// Velocity in the laboratory frame as a fraction of c, derived from [`Particle::gamma`].
    pub fn beta(&self) -> f64 {
        (1.0 - self.gamma().powi(-2)).sqrt()
    }

    pub fn theta_cm(&self) -> f64 {
        self.theta_cm
    }

    pub fn theta_lab(&self) -> f64 {
        self.theta_lab
    }

    pub fn ex(&self) -> f64 {
        self.ex
    }

    pub fn set_a(&mut self, a: u32) {
        self.a = a;
    }

    pub fn set_z(&mut self, z: u32) {
        self.z = z;
    }

    pub fn set_binding_energy(&mut self, binding_energy: f64) {
        self.binding_energy = binding_energy;
    }

    pub fn set_energy_lab(&mut self, energy_lab: f64) {
        self.energy_lab = energy_lab;
    }

    pub fn set_energy_tot_cm(&mut self, energy_tot_cm: f64) {
        self.energy_tot_cm = energy_tot_cm;
    }

    pub fn set_theta_cm(&mut self, theta_cm: f64) {
        self.theta_cm = theta_cm;
    }

    pub fn set_theta_lab(&mut self, theta_lab: f64) {
        self.theta_lab = theta_lab;
    }

    pub fn set_ex(&mut self, ex: f64) {
        self.ex = ex;
    }
}
