use serde::{Deserialize, Serialize};

/// Salutation shown above the daily cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    /// Greeting for an hour of the day (0-23).
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Greeting::Morning,
            12..=17 => Greeting::Afternoon,
            _ => Greeting::Evening,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Greeting::Morning => "Good Morning",
            Greeting::Afternoon => "Good Afternoon",
            Greeting::Evening => "Good Evening",
        }
    }
}

impl std::fmt::Display for Greeting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_boundaries() {
        assert_eq!(Greeting::for_hour(0), Greeting::Morning);
        assert_eq!(Greeting::for_hour(11), Greeting::Morning);
        assert_eq!(Greeting::for_hour(12), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(17), Greeting::Afternoon);
        assert_eq!(Greeting::for_hour(18), Greeting::Evening);
        assert_eq!(Greeting::for_hour(23).to_string(), "Good Evening");
    }
}
