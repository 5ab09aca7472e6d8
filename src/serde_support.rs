use crate::position::Position;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Positions travel as `"x,y"` / `"x,y,z"` strings.
impl<const D: usize> Serialize for Position<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let axes: Vec<String> = self.axes().iter().map(|axis| axis.to_string()).collect();
        serializer.serialize_str(&axes.join(","))
    }
}

impl<'de, const D: usize> Deserialize<'de> for Position<D> {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|e| serde::de::Error::custom(format!("Invalid position {:?}: {}", s, e)))
    }
}
