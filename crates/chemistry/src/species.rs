use std::fmt;

/// The molecular species tracked in an aqueous solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Species {
    /// Hydronium, H3O+.
    H3O,
    /// Hydroxide, OH-.
    OH,
    /// Water, H2O.
    H2O,
}

impl Species {
    /// All tracked species, in display order.
    pub const ALL: [Self; 3] = [Self::H3O, Self::OH, Self::H2O];

    /// Returns the chemical formula.
    #[must_use]
    pub fn formula(self) -> &'static str {
        match self {
            Self::H3O => "H3O+",
            Self::OH => "OH-",
            Self::H2O => "H2O",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.formula())
    }
}
