use std::str::FromStr;

use anyhow::{Error, bail};

/// Physical quantity whose time series can be read from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    Co2,
    Temperature,
    RelativeHumidity,
    ElectricalConductivity,
    Ph,
    WaterTemperature,
    LightIntensity,
    LightSpectrum,
    LedPanel,
}

impl SensorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Co2 => "co2",
            SensorKind::Temperature => "temperature",
            SensorKind::RelativeHumidity => "relative_humidity",
            SensorKind::ElectricalConductivity => "electrical_conductivity",
            SensorKind::Ph => "ph",
            SensorKind::WaterTemperature => "water_temperature",
            SensorKind::LightIntensity => "light_intensity",
            SensorKind::LightSpectrum => "light_spectrum",
            SensorKind::LedPanel => "led_panel",
        }
    }

    /// Storage partition key for this quantity.
    ///
    /// These names are fixed by the deployed data; the water
    /// temperature key keeps its historical misspelling, and LED panel
    /// frames live under the light spectrum key.
    pub fn property_name(&self) -> &'static str {
        match self {
            SensorKind::Co2 => "air_carbon_dioxide_ppm",
            SensorKind::Temperature => "air_temperature_celsius",
            SensorKind::RelativeHumidity => "air_humidity_percent",
            SensorKind::ElectricalConductivity => "water_electrical_conductivity_ms_cm",
            SensorKind::Ph => "water_potential_hydrogen",
            SensorKind::WaterTemperature => "water_temperature_celcius",
            SensorKind::LightIntensity => "light_intensity_watts",
            SensorKind::LightSpectrum | SensorKind::LedPanel => "light_spectrum_nm_percent",
        }
    }
}

impl FromStr for SensorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "co2" => Ok(SensorKind::Co2),
            "temperature" => Ok(SensorKind::Temperature),
            "relative_humidity" => Ok(SensorKind::RelativeHumidity),
            "electrical_conductivity" => Ok(SensorKind::ElectricalConductivity),
            "ph" => Ok(SensorKind::Ph),
            "water_temperature" => Ok(SensorKind::WaterTemperature),
            "light_intensity" => Ok(SensorKind::LightIntensity),
            "light_spectrum" => Ok(SensorKind::LightSpectrum),
            "led_panel" => Ok(SensorKind::LedPanel),
            _ => bail!("unknown sensor kind: {}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SensorKind; 9] = [
        SensorKind::Co2,
        SensorKind::Temperature,
        SensorKind::RelativeHumidity,
        SensorKind::ElectricalConductivity,
        SensorKind::Ph,
        SensorKind::WaterTemperature,
        SensorKind::LightIntensity,
        SensorKind::LightSpectrum,
        SensorKind::LedPanel,
    ];

    #[test]
    fn short_names_round_trip() {
        for kind in ALL {
            assert_eq!(kind.as_str().parse::<SensorKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!("barometric_pressure".parse::<SensorKind>().is_err());
    }

    #[test]
    fn led_panel_shares_the_spectrum_partition() {
        assert_eq!(
            SensorKind::LedPanel.property_name(),
            SensorKind::LightSpectrum.property_name()
        );
    }
}
