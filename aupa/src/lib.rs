pub mod controller;
pub mod datagram;
pub mod error;
pub mod gain;
pub mod link;
pub mod modulation;
pub mod prelude;

pub use aupa_driver as driver;
pub use aupa_driver::derive;

pub use controller::Controller;
#[cfg(feature = "async")]
pub use controller::AsyncController;

#[cfg(test)]
mod tests {
    use aupa_driver::{
        autd3_device::AUTD3,
        fpga::TransMode,
        geometry::{Geometry, GeometryBuilder, Vector3},
    };

    pub fn random_vector3(
        range_x: std::ops::Range<f64>,
        range_y: std::ops::Range<f64>,
        range_z: std::ops::Range<f64>,
    ) -> Vector3 {
        use rand::Rng;
        let mut rng = rand::rng();
        Vector3::new(
            rng.random_range(range_x),
            rng.random_range(range_y),
            rng.random_range(range_z),
        )
    }

    pub fn create_geometry(n: usize) -> Geometry {
        create_geometry_with_mode(n, TransMode::Legacy)
    }

    pub fn create_geometry_with_mode(n: usize, mode: TransMode) -> Geometry {
        let mut builder = GeometryBuilder::new().with_mode(mode);
        (0..n).for_each(|i| {
            builder.add_device(AUTD3::new(Vector3::new(
                i as f64 * AUTD3::DEVICE_WIDTH,
                0.,
                0.,
            )));
        });
        builder.build().unwrap()
    }
}
