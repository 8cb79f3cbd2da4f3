mod bessel;
mod flag;
mod transtest;
mod test_runner;

pub use test_runner::run;
