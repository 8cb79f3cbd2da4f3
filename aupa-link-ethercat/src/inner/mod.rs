mod handler;
mod io;
mod lookup;
mod smoothing;
mod state;

pub(crate) use handler::EtherCATHandler;
