mod config;
mod gain;
mod modulation;
mod stm;
