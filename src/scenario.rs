use core::fmt;

/// The supported display configurations, plus the fallback for everything else
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Scenario {
    LaptopOnly,
    LaptopPlus1External,
    LaptopPlus2External,
    LaptopPlus3External,
    External1Only,
    External2Only,
    External3Only,
    Fallback,
}

impl Scenario {
    /// Number of external monitors the scenario lays out, `None` for the fallback
    pub fn external_count(&self) -> Option<usize> {
        match self {
            Scenario::LaptopOnly => Some(0),
            Scenario::LaptopPlus1External | Scenario::External1Only => Some(1),
            Scenario::LaptopPlus2External | Scenario::External2Only => Some(2),
            Scenario::LaptopPlus3External | Scenario::External3Only => Some(3),
            Scenario::Fallback => None,
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Scenario::LaptopOnly => write!(f, "laptop_only"),
            Scenario::LaptopPlus1External => write!(f, "laptop_plus_1_external"),
            Scenario::LaptopPlus2External => write!(f, "laptop_plus_2_external"),
            Scenario::LaptopPlus3External => write!(f, "laptop_plus_3_external"),
            Scenario::External1Only => write!(f, "1_external_only"),
            Scenario::External2Only => write!(f, "2_external_only"),
            Scenario::External3Only => write!(f, "3_external_only"),
            Scenario::Fallback => write!(f, "fallback"),
        }
    }
}

/// Picks the scenario from cardinality and lid state alone.
///
/// The laptop is used when it is available and its lid is open.
pub fn classify(laptop_available: bool, lid_closed: bool, external_count: usize) -> Scenario {
    let use_laptop = laptop_available && !lid_closed;
    let scenario = match (use_laptop, external_count) {
        (true, 0) => Scenario::LaptopOnly,
        (true, 1) => Scenario::LaptopPlus1External,
        (true, 2) => Scenario::LaptopPlus2External,
        (true, 3) => Scenario::LaptopPlus3External,
        (false, 1) => Scenario::External1Only,
        (false, 2) => Scenario::External2Only,
        (false, 3) => Scenario::External3Only,
        _ => Scenario::Fallback,
    };
    log::debug!(
        "Classified laptop_available={} lid_closed={} externals={} as {}",
        laptop_available,
        lid_closed,
        external_count,
        scenario
    );
    scenario
}
