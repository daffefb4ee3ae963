use kernel::error::app_error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vehicle class of a registered user. Doubles as the access role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Normal,
    Ambulance,
    Police,
    Fire,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Normal,
        VehicleType::Ambulance,
        VehicleType::Police,
        VehicleType::Fire,
    ];

    #[inline]
    pub const fn code(&self) -> &'static str {
        use VehicleType::*;
        match self {
            Normal => "normal",
            Ambulance => "ambulance",
            Police => "police",
            Fire => "fire",
        }
    }

    /// Parse a stored or submitted code. Exact, lowercase match only.
    pub fn from_code(code: &str) -> Option<Self> {
        use VehicleType::*;
        match code {
            "normal" => Some(Normal),
            "ambulance" => Some(Ambulance),
            "police" => Some(Police),
            "fire" => Some(Fire),
            _ => None,
        }
    }
}

impl FromStr for VehicleType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            AppError::bad_request(format!("Invalid vehicle type: {s:?}"))
                .with_action("Use one of: normal, ambulance, police, fire")
        })
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_round_trips_code() {
        for vehicle_type in VehicleType::ALL {
            assert_eq!(VehicleType::from_code(vehicle_type.code()), Some(vehicle_type));
            assert_eq!(vehicle_type.to_string(), vehicle_type.code());
        }
    }

    #[test]
    fn test_vehicle_type_rejects_unknown() {
        assert!("truck".parse::<VehicleType>().is_err());
        assert!("Ambulance".parse::<VehicleType>().is_err());
        assert!("".parse::<VehicleType>().is_err());
        assert_eq!(
            "truck".parse::<VehicleType>().unwrap_err().status_code(),
            400
        );
    }

    #[test]
    fn test_vehicle_type_serde() {
        assert_eq!(serde_json::to_string(&VehicleType::Fire).unwrap(), "\"fire\"");
        let parsed: VehicleType = serde_json::from_str("\"police\"").unwrap();
        assert_eq!(parsed, VehicleType::Police);
    }
}
