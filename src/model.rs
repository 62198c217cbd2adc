use uom::si::f64::{AngularVelocity, Length, ThermodynamicTemperature, Time};

#[cfg(test)]
use proptest::{
    arbitrary::Arbitrary,
    prelude::prop,
    strategy::{BoxedStrategy, Strategy},
};
#[cfg(test)]
use uom::si::{
    angular_velocity::radian_per_second, thermodynamic_temperature::kelvin, time::second,
};

/// Everything the simulator needs from a model document.
/// Only a single material is supported.
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub material: Material,
    pub high_temp: ThermodynamicTemperature,
    pub low_temp: ThermodynamicTemperature,
    pub sim_time: Time,
}

#[cfg(test)]
impl Arbitrary for Model {
    type Parameters = ();
    type Strategy = BoxedStrategy<Model>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (
            Material::arbitrary(),
            prop::num::f64::NORMAL,
            prop::num::f64::NORMAL,
            prop::num::f64::NORMAL,
        )
            .prop_map(|tuple| Model {
                material: tuple.0,
                high_temp: ThermodynamicTemperature::new::<kelvin>(tuple.1),
                low_temp: ThermodynamicTemperature::new::<kelvin>(tuple.2),
                sim_time: Time::new::<second>(tuple.3),
            })
            .boxed()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub dispersion: DispersionData,
    pub relaxation: RelaxationData,
}

#[cfg(test)]
impl Arbitrary for Material {
    type Parameters = ();
    type Strategy = BoxedStrategy<Material>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (DispersionData::arbitrary(), RelaxationData::arbitrary())
            .prop_map(|(dispersion, relaxation)| Material {
                dispersion,
                relaxation,
            })
            .boxed()
    }
}

/// Longitudinal (LA) and transverse (TA) acoustic branch data
#[derive(Clone, Debug, PartialEq)]
pub struct DispersionData {
    pub la_data: Vec<f64>,
    pub w_max_la: AngularVelocity,
    pub ta_data: Vec<f64>,
    pub w_max_ta: AngularVelocity,
}

#[cfg(test)]
impl Arbitrary for DispersionData {
    type Parameters = ();
    type Strategy = BoxedStrategy<DispersionData>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (
            prop::collection::vec(prop::num::f64::NORMAL, 0..20),
            prop::num::f64::NORMAL,
            prop::collection::vec(prop::num::f64::NORMAL, 0..20),
            prop::num::f64::NORMAL,
        )
            .prop_map(|tuple| DispersionData {
                la_data: tuple.0,
                w_max_la: AngularVelocity::new::<radian_per_second>(tuple.1),
                ta_data: tuple.2,
                w_max_ta: AngularVelocity::new::<radian_per_second>(tuple.3),
            })
            .boxed()
    }
}

/// Coefficients of the phonon relaxation time model
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RelaxationData {
    pub b_l: f64,
    pub b_tn: f64,
    pub b_tu: f64,
    pub b_i: f64,
    pub w: f64,
}

#[cfg(test)]
impl Arbitrary for RelaxationData {
    type Parameters = ();
    type Strategy = BoxedStrategy<RelaxationData>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (
            prop::num::f64::NORMAL,
            prop::num::f64::NORMAL,
            prop::num::f64::NORMAL,
            prop::num::f64::NORMAL,
            prop::num::f64::NORMAL,
        )
            .prop_map(|tuple| RelaxationData {
                b_l: tuple.0,
                b_tn: tuple.1,
                b_tu: tuple.2,
                b_i: tuple.3,
                w: tuple.4,
            })
            .boxed()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SensorSpec {
    pub id: i32,
    pub init_temp: ThermodynamicTemperature,
}

/// Geometry of a single cell.
/// `sensor_id` is expected to name a sensor, but nothing checks that it does.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellSpec {
    pub length: Length,
    pub width: Length,
    pub sensor_id: i32,
}

/// Records exactly as they appear in the model document.
/// Quantities are read in SI base units.
pub(crate) mod as_loaded {
    use serde::Deserialize;
    use uom::si::f64::{AngularVelocity, Length, ThermodynamicTemperature, Time};

    #[derive(Clone, Debug, Deserialize)]
    pub struct Model {
        /// Kept untyped, only the first entry is ever looked at
        pub materials: Vec<serde_json::Value>,
        pub settings: Settings,
        pub sensors: Vec<Sensor>,
        pub cells: Vec<Cell>,
    }

    #[derive(Clone, Debug, Deserialize, PartialEq)]
    pub struct Material {
        pub d_data: DispersionData,
        pub r_data: RelaxationData,
    }

    impl Material {
        pub fn convert(self) -> super::Material {
            super::Material {
                dispersion: self.d_data.convert(),
                relaxation: self.r_data.convert(),
            }
        }
    }

    #[derive(Clone, Debug, Deserialize, PartialEq)]
    pub struct DispersionData {
        pub max_freq_la: AngularVelocity,
        pub max_freq_ta: AngularVelocity,
        pub la_data: Vec<f64>,
        pub ta_data: Vec<f64>,
    }

    impl DispersionData {
        pub fn convert(self) -> super::DispersionData {
            super::DispersionData {
                la_data: self.la_data,
                w_max_la: self.max_freq_la,
                ta_data: self.ta_data,
                w_max_ta: self.max_freq_ta,
            }
        }
    }

    #[derive(Clone, Debug, Deserialize, PartialEq)]
    pub struct RelaxationData {
        pub b_l: f64,
        pub b_tn: f64,
        pub b_tu: f64,
        pub b_i: f64,
        pub w: f64,
    }

    impl RelaxationData {
        pub fn convert(self) -> super::RelaxationData {
            super::RelaxationData {
                b_l: self.b_l,
                b_tn: self.b_tn,
                b_tu: self.b_tu,
                b_i: self.b_i,
                w: self.w,
            }
        }
    }

    #[derive(Clone, Debug, Deserialize, PartialEq)]
    pub struct Settings {
        pub high_temp: ThermodynamicTemperature,
        pub low_temp: ThermodynamicTemperature,
        pub sim_time: Time,
    }

    impl Settings {
        pub fn convert(self, material: super::Material) -> super::Model {
            super::Model {
                material,
                high_temp: self.high_temp,
                low_temp: self.low_temp,
                sim_time: self.sim_time,
            }
        }
    }

    #[derive(Clone, Debug, Deserialize, PartialEq)]
    pub struct Sensor {
        pub id: i32,
        pub t_init: ThermodynamicTemperature,
    }

    impl Sensor {
        pub fn convert(self) -> super::SensorSpec {
            super::SensorSpec {
                id: self.id,
                init_temp: self.t_init,
            }
        }
    }

    #[derive(Clone, Debug, Deserialize, PartialEq)]
    pub struct Cell {
        pub length: Length,
        pub width: Length,
        #[serde(rename = "sensorID")]
        pub sensor_id: i32,
    }

    impl Cell {
        pub fn convert(self) -> super::CellSpec {
            super::CellSpec {
                length: self.length,
                width: self.width,
                sensor_id: self.sensor_id,
            }
        }
    }
}
