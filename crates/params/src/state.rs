//! Binary weather state of the alternating spell process.

/// Wet or dry state of a simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WeatherState {
    /// No precipitation.
    Dry = 0,
    /// Precipitation above the wet-day threshold.
    Wet = 1,
}

impl WeatherState {
    /// Both states in index order.
    pub const ALL: [WeatherState; 2] = [Self::Dry, Self::Wet];

    /// Returns the zero-based index of this state (matches the `#[repr(u8)]` discriminant).
    pub fn as_index(self) -> usize {
        self as usize
    }

    /// Returns the opposite state.
    pub fn flip(self) -> Self {
        match self {
            Self::Dry => Self::Wet,
            Self::Wet => Self::Dry,
        }
    }

    /// Returns `true` for [`WeatherState::Wet`].
    pub fn is_wet(self) -> bool {
        self == Self::Wet
    }

    /// Lower-case label used in logs and output files.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dry => "dry",
            Self::Wet => "wet",
        }
    }
}

impl std::fmt::Display for WeatherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_index_values() {
        assert_eq!(WeatherState::Dry.as_index(), 0);
        assert_eq!(WeatherState::Wet.as_index(), 1);
    }

    #[test]
    fn flip_alternates() {
        assert_eq!(WeatherState::Dry.flip(), WeatherState::Wet);
        assert_eq!(WeatherState::Wet.flip(), WeatherState::Dry);
        for s in WeatherState::ALL {
            assert_eq!(s.flip().flip(), s);
        }
    }

    #[test]
    fn display() {
        assert_eq!(WeatherState::Wet.to_string(), "wet");
        assert_eq!(WeatherState::Dry.to_string(), "dry");
    }

    #[test]
    fn trait_assertions() {
        fn assert_copy<T: Copy>() {}
        fn assert_eq<T: Eq>() {}
        fn assert_hash<T: std::hash::Hash>() {}
        assert_copy::<WeatherState>();
        assert_eq::<WeatherState>();
        assert_hash::<WeatherState>();
    }
}
