use std::fmt;

/// Rover profile the converter applies to the mesh
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Rover {
    Mer,
    Msl,
}

impl Rover {
    /// Select a rover from the two command line flags, `None` unless exactly one is set.
    pub fn from_flags(mer: bool, msl: bool) -> Option<Rover> {
        match (mer, msl) {
            (true, false) => Some(Rover::Mer),
            (false, true) => Some(Rover::Msl),
            _ => None,
        }
    }

    /// Literal passed to the converter.
    pub fn tag(self) -> &'static str {
        match self {
            Rover::Mer => "MER",
            Rover::Msl => "MSL",
        }
    }
}

impl fmt::Display for Rover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.tag()) }
}
