mod bessel;
mod focus;
mod group;
mod null;
mod plane;
mod trans_test;
mod uniform;

pub use bessel::Bessel;
pub use focus::Focus;
pub use group::Group;
pub use null::Null;
pub use plane::Plane;
pub use trans_test::TransducerTest;
pub use uniform::Uniform;

pub use aupa_driver::datagram::{
    GainCache as Cache, GainTransform as Transform, IntoGainCache as IntoCache,
    IntoGainTransform as IntoTransform,
};
