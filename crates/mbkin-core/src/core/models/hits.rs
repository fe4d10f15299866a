/// Address of a charged-particle hit in a CD detector.
pub trait CdAddress {
    fn detector(&self) -> u8;
    fn sector(&self) -> u8;
    fn strip_p(&self) -> u8;
    fn strip_n(&self) -> u8;
}

/// Address of a gamma-ray hit in the Miniball array.
pub trait SegmentAddress {
    fn cluster(&self) -> u8;
    fn crystal(&self) -> u8;
    fn segment(&self) -> u8;
}

/// A charged particle detected in the CD.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParticleHit {
    pub detector: u8,
    pub sector: u8,
    pub strip_p: u8,
    pub strip_n: u8,
    /// Deposited energy on the p side in keV.
    pub energy_p: f64,
    /// Deposited energy on the n side in keV.
    pub energy_n: f64,
    /// Timestamp in ns.
    pub time: f64,
}

impl CdAddress for ParticleHit {
    fn detector(&self) -> u8 {
        self.detector
    }
    fn sector(&self) -> u8 {
        self.sector
    }
    fn strip_p(&self) -> u8 {
        self.strip_p
    }
    fn strip_n(&self) -> u8 {
        self.strip_n
    }
}

/// A single-crystal gamma-ray hit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GammaRayHit {
    pub cluster: u8,
    pub crystal: u8,
    /// Segment with the largest energy deposit; 0 is the core.
    pub segment: u8,
    /// Energy in keV.
    pub energy: f64,
    /// Timestamp in ns.
    pub time: f64,
}

impl SegmentAddress for GammaRayHit {
    fn cluster(&self) -> u8 {
        self.cluster
    }
    fn crystal(&self) -> u8 {
        self.crystal
    }
    fn segment(&self) -> u8 {
        self.segment
    }
}

/// A gamma ray reconstructed by summing neighbouring crystals of one cluster.
///
/// The address is the one of the crystal with the largest deposit, which is also the one
/// used for the emission angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GammaRayAddbackHit {
    pub cluster: u8,
    pub crystal: u8,
    pub segment: u8,
    /// Summed energy in keV.
    pub energy: f64,
    pub time: f64,
    /// Number of crystals that contributed to the sum.
    pub multiplicity: u8,
}

impl SegmentAddress for GammaRayAddbackHit {
    fn cluster(&self) -> u8 {
        self.cluster
    }
    fn crystal(&self) -> u8 {
        self.crystal
    }
    fn segment(&self) -> u8 {
        self.segment
    }
}
