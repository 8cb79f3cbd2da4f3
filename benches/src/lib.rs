use aupa_driver::{
    autd3_device::AUTD3,
    fpga::TransMode,
    geometry::{Geometry, GeometryBuilder, Vector3},
};

pub const TEST_SIZES: &[usize] = &[1, 10, 20];

pub fn generate_geometry(size: usize, mode: TransMode) -> Geometry {
    let mut builder = GeometryBuilder::new().with_mode(mode);
    (0..size).for_each(|i| {
        builder.add_device(AUTD3::new(Vector3::new(
            i as f64 * AUTD3::DEVICE_WIDTH,
            0.,
            0.,
        )));
    });
    match builder.build() {
        Ok(geometry) => geometry,
        Err(e) => panic!("{}", e),
    }
}
