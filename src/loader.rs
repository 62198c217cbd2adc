use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, warn};
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use uom::si::{length::meter, thermodynamic_temperature::kelvin};

use crate::error::{LoadError, LoadResult};
use crate::model::{
    as_loaded, CellSpec, DispersionData, Material, Model, RelaxationData, SensorSpec,
};

/// Something reported while loading a model.
/// Sensors and cells are only ever seen through these.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LoadEvent {
    SensorAdded(SensorSpec),
    CellAdded(CellSpec),
}

impl fmt::Display for LoadEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadEvent::SensorAdded(sensor) => write!(
                f,
                "Successfully added sensor {} to the model. The sensor's initial temperature is {:?}",
                sensor.id,
                sensor.init_temp.get::<kelvin>()
            ),
            LoadEvent::CellAdded(cell) => write!(
                f,
                "Successfully added a {:?} * {:?} cell to the model. The cell is linked to sensor {}",
                cell.length.get::<meter>(),
                cell.width.get::<meter>(),
                cell.sensor_id
            ),
        }
    }
}

/// A model together with the events produced while loading it, in document order
/// (all sensors, then all cells).
#[derive(Clone, Debug, PartialEq)]
pub struct Loaded {
    pub model: Model,
    pub events: Vec<LoadEvent>,
}

impl Loaded {
    /// Extract the model from an already parsed document
    pub fn from_tree(tree: serde_json::Value) -> LoadResult<Self> {
        let loaded: as_loaded::Model = serde_json::from_value(tree)?;
        loaded.try_into()
    }
}

impl TryFrom<as_loaded::Model> for Loaded {
    type Error = LoadError;
    fn try_from(value: as_loaded::Model) -> Result<Self, Self::Error> {
        let ignored = value.materials.len().saturating_sub(1);
        let first_material = value.materials.into_iter().next().ok_or_else(|| {
            LoadError::FieldType("`materials` must contain at least one material".into())
        })?;
        if ignored > 0 {
            warn!("Only a single material is supported, ignoring {ignored} more");
        }

        let material = get_material(&first_material).map_err(|e| match e {
            LoadError::FieldType(message) => {
                LoadError::FieldType(format!("materials[0]: {message}"))
            }
            e => e,
        })?;
        let model = value.settings.convert(material);

        debug!(
            "Loaded {} sensors and {} cells",
            value.sensors.len(),
            value.cells.len()
        );
        let events = value
            .sensors
            .into_iter()
            .map(|sensor| LoadEvent::SensorAdded(sensor.convert()))
            .chain(
                value
                    .cells
                    .into_iter()
                    .map(|cell| LoadEvent::CellAdded(cell.convert())),
            )
            .collect();

        Ok(Loaded { model, events })
    }
}

impl Model {
    pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Self> {
        Ok(load(path)?.model)
    }

    pub fn from_json(json: &str) -> LoadResult<Self> {
        Ok(load_str(json)?.model)
    }
}

/// Load a model file and print one line per sensor and per cell to stdout.
pub fn initialize_model<P: AsRef<Path>>(path: P) -> LoadResult<Model> {
    let loaded = load(path)?;
    for event in &loaded.events {
        println!("{event}");
    }
    Ok(loaded.model)
}

/// Load a model file, returning the events instead of printing them
pub fn load<P: AsRef<Path>>(path: P) -> LoadResult<Loaded> {
    let path = path.as_ref();
    let string = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {:?}", string.len(), path);
    load_str(&string)
}

pub fn load_str(json: &str) -> LoadResult<Loaded> {
    Loaded::from_tree(parse(json)?)
}

const NON_FINITE: &str = "non-finite number";

/// Parse a JSON5 (or plain JSON) document into an untyped tree.
///
/// Plain JSON goes through `serde_json`, which keeps integers too large for `i64`
/// as floats. Anything else is read as JSON5. `Infinity` and `NaN` have no place in
/// the tree and are reported as field errors naming where they appeared.
pub fn parse(json: &str) -> LoadResult<serde_json::Value> {
    if let Ok(tree) = serde_json::from_str(json) {
        return Ok(tree);
    }
    match json5::from_str::<Json5Tree>(json) {
        Ok(Json5Tree(tree)) => Ok(tree),
        Err(json5::Error::Message { msg, .. }) if msg.contains(NON_FINITE) => {
            Err(LoadError::FieldType(msg))
        }
        Err(e) => Err(e.into()),
    }
}

struct Json5Tree(serde_json::Value);

impl<'de> Deserialize<'de> for Json5Tree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TreeVisitor {
            path: String::new(),
        }
        .deserialize(deserializer)
        .map(Json5Tree)
    }
}

/// Builds a `serde_json::Value`, tracking the JSON pointer of the current node
struct TreeVisitor {
    path: String,
}

impl TreeVisitor {
    fn child(&self, key: impl fmt::Display) -> Self {
        TreeVisitor {
            path: format!("{}/{}", self.path, key),
        }
    }
}

impl<'de> DeserializeSeed<'de> for TreeVisitor {
    type Value = serde_json::Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for TreeVisitor {
    type Value = serde_json::Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON5 value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(serde_json::Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.into())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.into())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        serde_json::Number::from_f64(v)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                let at = if self.path.is_empty() {
                    "/"
                } else {
                    self.path.as_str()
                };
                E::custom(format!("{NON_FINITE} {v} at {at}"))
            })
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(serde_json::Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(serde_json::Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(serde_json::Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(serde_json::Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        self.deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(self.child(items.len()))? {
            items.push(item);
        }
        Ok(serde_json::Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut object = serde_json::Map::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(self.child(&key))?;
            object.insert(key, value);
        }
        Ok(serde_json::Value::Object(object))
    }
}

pub fn get_material(node: &serde_json::Value) -> LoadResult<Material> {
    Ok(as_loaded::Material::deserialize(node)?.convert())
}

pub fn get_dispersion_data(node: &serde_json::Value) -> LoadResult<DispersionData> {
    Ok(as_loaded::DispersionData::deserialize(node)?.convert())
}

pub fn get_relaxation_data(node: &serde_json::Value) -> LoadResult<RelaxationData> {
    Ok(as_loaded::RelaxationData::deserialize(node)?.convert())
}

pub fn get_model(material: Material, settings: &serde_json::Value) -> LoadResult<Model> {
    Ok(as_loaded::Settings::deserialize(settings)?.convert(material))
}
