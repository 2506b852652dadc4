pub mod health;
pub mod neuron;
