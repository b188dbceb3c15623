//! Calculator inputs
//!
//! The four user-editable values and the field names used to address them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Editable input field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    FlowerWeight,
    ThcPercent,
    BhoYieldPercent,
    OilVolume,
}

impl InputField {
    pub const ALL: [InputField; 4] = [
        InputField::FlowerWeight,
        InputField::ThcPercent,
        InputField::BhoYieldPercent,
        InputField::OilVolume,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InputField::FlowerWeight => "flower_weight",
            InputField::ThcPercent => "thc_percent",
            InputField::BhoYieldPercent => "bho_yield_percent",
            InputField::OilVolume => "oil_volume",
        }
    }

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            InputField::FlowerWeight => "Blütenmenge (g)",
            InputField::ThcPercent => "THC-Gehalt der Blüten (%)",
            InputField::BhoYieldPercent => "BHO-Ausbeute (%)",
            InputField::OilVolume => "Ölmenge (ml)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            InputField::FlowerWeight => "g",
            InputField::ThcPercent | InputField::BhoYieldPercent => "%",
            InputField::OilVolume => "ml",
        }
    }
}

impl FromStr for InputField {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flower_weight" | "flower_weight_g" | "weight" => Ok(InputField::FlowerWeight),
            "thc_percent" | "thc" => Ok(InputField::ThcPercent),
            "bho_yield_percent" | "bho_yield" | "yield" => Ok(InputField::BhoYieldPercent),
            "oil_volume" | "oil_volume_ml" | "oil" => Ok(InputField::OilVolume),
            _ => Err(InputError::UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current values of the four input fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    pub flower_weight_g: f64,
    pub thc_percent: f64,
    pub bho_yield_percent: f64,
    pub oil_volume_ml: f64,
}

impl CalculatorInputs {
    pub fn new(flower_weight_g: f64, thc_percent: f64, bho_yield_percent: f64, oil_volume_ml: f64) -> Self {
        Self {
            flower_weight_g,
            thc_percent,
            bho_yield_percent,
            oil_volume_ml,
        }
    }

    pub fn get(&self, field: InputField) -> f64 {
        match field {
            InputField::FlowerWeight => self.flower_weight_g,
            InputField::ThcPercent => self.thc_percent,
            InputField::BhoYieldPercent => self.bho_yield_percent,
            InputField::OilVolume => self.oil_volume_ml,
        }
    }

    pub fn set(&mut self, field: InputField, value: f64) {
        match field {
            InputField::FlowerWeight => self.flower_weight_g = value,
            InputField::ThcPercent => self.thc_percent = value,
            InputField::BhoYieldPercent => self.bho_yield_percent = value,
            InputField::OilVolume => self.oil_volume_ml = value,
        }
    }
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self::new(35.0, 32.0, 20.0, 500.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_aliases() {
        assert_eq!("weight".parse::<InputField>(), Ok(InputField::FlowerWeight));
        assert_eq!("THC".parse::<InputField>(), Ok(InputField::ThcPercent));
        assert_eq!(" yield ".parse::<InputField>(), Ok(InputField::BhoYieldPercent));
        assert_eq!("oil_volume_ml".parse::<InputField>(), Ok(InputField::OilVolume));
    }

    #[test]
    fn test_unknown_field() {
        assert_eq!(
            "density".parse::<InputField>(),
            Err(InputError::UnknownField("density".to_string()))
        );
    }

    #[test]
    fn test_as_str_parses_back() {
        for field in InputField::ALL {
            assert_eq!(field.as_str().parse::<InputField>(), Ok(field));
        }
    }

    #[test]
    fn test_set_only_touches_one_field() {
        let mut inputs = CalculatorInputs::default();
        inputs.set(InputField::OilVolume, 250.0);
        assert_eq!(inputs.oil_volume_ml, 250.0);
        assert_eq!(inputs.flower_weight_g, 35.0);
        assert_eq!(inputs.thc_percent, 32.0);
        assert_eq!(inputs.bho_yield_percent, 20.0);
        assert_eq!(inputs.get(InputField::OilVolume), 250.0);
    }
}
