use crate::LapchartError;

pub const DRIVER_CODE_LEN: usize = 3;

/// A validated lap request: season year, race identifier and driver code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LapQuery {
    pub year: String,
    pub race: String,
    pub driver: String,
}

impl LapQuery {
    /// Builds a query from raw form input. Fields are trimmed and the driver
    /// code is upper-cased before validation.
    pub fn from_form(year: &str, race: &str, driver: &str) -> Result<Self, LapchartError> {
        let year = year.trim();
        let race = race.trim();
        let driver = driver.trim().to_uppercase();

        if year.is_empty() || race.is_empty() || driver.is_empty() {
            return Err(LapchartError::MissingFields);
        }

        if driver.chars().count() != DRIVER_CODE_LEN {
            return Err(LapchartError::InvalidDriverCode { driver });
        }

        Ok(Self {
            year: year.to_string(),
            race: race.to_string(),
            driver,
        })
    }
}
