pub mod error;
pub mod loader;
pub mod model;

pub use error::{LoadError, LoadResult};
pub use loader::{
    get_dispersion_data, get_material, get_model, get_relaxation_data, initialize_model, load,
    load_str, parse, LoadEvent, Loaded,
};
pub use model::{CellSpec, DispersionData, Material, Model, RelaxationData, SensorSpec};
